//! askdoc-index
//!
//! Sparse TF-IDF indexing and cosine-ranked retrieval over one chunk
//! sequence. `vectorizer` owns the fitted vocabulary and weighting;
//! `retrieve` ranks chunk vectors against a projected query.

pub mod retrieve;
pub mod vectorizer;

pub use retrieve::top_k;
pub use vectorizer::SparseVectorizer;
