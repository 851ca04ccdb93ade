//! askdoc-chunk
//!
//! Document segmentation. One entry point, `chunker::chunk`, dispatches
//! over the closed set of strategies in `askdoc_core::types::ChunkStrategy`.

pub mod chunker;

mod boundaries;
mod hierarchy;
mod recursive;
mod semantic;
mod words;

pub use chunker::chunk;
