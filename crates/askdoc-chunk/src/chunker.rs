//! Strategy dispatch for document segmentation.

use askdoc_core::types::{Chunk, ChunkStrategy};
use askdoc_core::{Error, Result};
use tracing::debug;

use crate::{boundaries, hierarchy, recursive, semantic, words};

/// Split `text` into an ordered chunk sequence according to `strategy`.
///
/// Empty or whitespace-only input is an error. Everything else yields at
/// least one chunk: a document with no internal boundaries for the chosen
/// strategy comes back as a single whole-document chunk. Deterministic for
/// a given `(text, strategy)` pair.
pub fn chunk(text: &str, strategy: &ChunkStrategy) -> Result<Vec<Chunk>> {
    strategy.validate()?;
    if text.trim().is_empty() {
        return Err(Error::EmptyDocument);
    }

    let mut chunks = match *strategy {
        ChunkStrategy::FixedSize { size, overlap } => words::fixed_size(text, size, overlap),
        ChunkStrategy::SentenceRegex => {
            spans_to_chunks(text, boundaries::sentence_spans_regex(text))
        }
        ChunkStrategy::SentenceUnicode => {
            spans_to_chunks(text, boundaries::sentence_spans_unicode(text))
        }
        ChunkStrategy::Paragraph => spans_to_chunks(text, boundaries::paragraph_spans(text)),
        ChunkStrategy::SlidingWindow { window_size, step_size } => {
            words::sliding_window(text, window_size, step_size)
        }
        ChunkStrategy::Recursive { max_chars, overlap_chars } => {
            recursive::split(text, max_chars, overlap_chars)
        }
        ChunkStrategy::Semantic { threshold, buffer } => semantic::split(text, threshold, buffer),
        ChunkStrategy::Hierarchical { max_chars, preserve_context } => {
            hierarchy::split(text, max_chars, preserve_context)
        }
    };

    if chunks.is_empty() {
        if let Some((start, end)) = boundaries::trimmed_span(text, 0, text.len()) {
            chunks.push(Chunk::new(0, &text[start..end], start, end));
        }
    }
    for (index, chunk) in chunks.iter_mut().enumerate() {
        chunk.index = index;
    }

    debug!(strategy = strategy.name(), chunks = chunks.len(), "segmented document");
    Ok(chunks)
}

fn spans_to_chunks(text: &str, spans: Vec<(usize, usize)>) -> Vec<Chunk> {
    spans
        .into_iter()
        .enumerate()
        .map(|(index, (start, end))| Chunk::new(index, &text[start..end], start, end))
        .collect()
}
