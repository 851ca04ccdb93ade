//! The retrieval engine: one document, one fitted index, many queries.

use tracing::{debug, info};

use askdoc_chunk::chunk;
use askdoc_core::sparse::SparseVector;
use askdoc_core::types::{
    Answer, Chunk, ChunkStrategy, RetrievalParams, ScoredChunk, SynthesisParams,
};
use askdoc_core::{Error, Result};
use askdoc_index::{top_k, SparseVectorizer};

use crate::synthesize::synthesize;

/// Orchestrates chunking, indexing, retrieval, and synthesis for a single
/// in-memory document.
///
/// The engine starts without an index; `add_documents` builds one and
/// `generate_response` queries it. Re-ingesting replaces all derived state
/// in one step, and a failed ingest leaves the previous state untouched.
/// One engine instance belongs to one logical session; it holds no shared
/// or ambient mutable state.
pub struct RagEngine {
    retrieval: RetrievalParams,
    synthesis: SynthesisParams,
    state: Option<EngineState>,
}

struct EngineState {
    chunks: Vec<Chunk>,
    vectorizer: SparseVectorizer,
    vectors: Vec<SparseVector>,
}

impl RagEngine {
    pub fn new(retrieval: RetrievalParams, synthesis: SynthesisParams) -> Self {
        Self { retrieval, synthesis, state: None }
    }

    /// Whether a document has been ingested and indexed.
    pub fn is_ready(&self) -> bool {
        self.state.is_some()
    }

    /// The indexed chunk sequence; empty before the first ingest.
    pub fn chunks(&self) -> &[Chunk] {
        self.state.as_ref().map_or(&[], |state| state.chunks.as_slice())
    }

    /// Segment `text` with `strategy`, fit the index over the chunks, and
    /// swap the new state in. Every parameter is validated before any
    /// chunking work happens.
    pub fn add_documents(&mut self, text: &str, strategy: &ChunkStrategy) -> Result<()> {
        strategy.validate()?;
        self.retrieval.validate()?;
        self.synthesis.validate()?;

        let chunks = chunk(text, strategy)?;
        let mut vectorizer = SparseVectorizer::new();
        let vectors = {
            let texts: Vec<&str> = chunks.iter().map(|c| c.text.as_str()).collect();
            vectorizer.fit(&texts)?
        };
        info!(
            strategy = strategy.name(),
            chunks = chunks.len(),
            terms = vectorizer.vocabulary_len(),
            "document indexed"
        );
        self.state = Some(EngineState { chunks, vectorizer, vectors });
        Ok(())
    }

    /// Rank the indexed chunks against `query`, best first.
    pub fn retrieve(&self, query: &str) -> Result<Vec<ScoredChunk>> {
        let state = self.state.as_ref().ok_or(Error::EngineNotReady)?;
        if query.trim().is_empty() {
            return Err(Error::EmptyQuery);
        }
        let query_vector = state.vectorizer.transform(query)?;
        let hits = top_k(
            &query_vector,
            &state.vectors,
            self.retrieval.top_k,
            self.retrieval.min_score,
        );
        debug!(query_terms = query_vector.len(), hits = hits.len(), "retrieved chunks");
        Ok(hits
            .into_iter()
            .map(|(index, score)| ScoredChunk { chunk: state.chunks[index].clone(), score })
            .collect())
    }

    /// Answer `query` from the indexed document. A miss is not an error:
    /// an empty retrieval produces the fixed fallback answer.
    pub fn generate_response(&self, query: &str) -> Result<Answer> {
        let results = self.retrieve(query)?;
        Ok(synthesize(&results, &self.synthesis))
    }
}
