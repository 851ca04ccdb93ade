//! askdoc-engine
//!
//! The orchestration layer: ties chunking, indexing, retrieval, and
//! extractive synthesis together behind a two-call surface
//! (`RagEngine::add_documents`, `RagEngine::generate_response`).

pub mod engine;
pub mod synthesize;

pub use engine::RagEngine;
