//! Lexical-cohesion grouping: consecutive sentences stay in one chunk
//! while neighbouring sentence windows remain similar.

use std::collections::HashMap;

use askdoc_core::sparse::{count_vector, SparseVector};
use askdoc_core::types::Chunk;

use crate::boundaries::sentence_spans_regex;

/// Each sentence is encoded from the window of `buffer` sentences ending
/// at it (bag-of-words counts, no document statistics). A new chunk starts
/// wherever the cosine similarity of adjacent windows falls below
/// `threshold`.
pub(crate) fn split(text: &str, threshold: f32, buffer: usize) -> Vec<Chunk> {
    let sentences = sentence_spans_regex(text);
    if sentences.len() <= 1 {
        return sentences
            .into_iter()
            .map(|(s, e)| Chunk::new(0, &text[s..e], s, e))
            .collect();
    }

    let mut vocabulary = HashMap::new();
    let vectors: Vec<SparseVector> = (0..sentences.len())
        .map(|i| {
            let from = (i + 1).saturating_sub(buffer);
            let (window_start, _) = sentences[from];
            let (_, window_end) = sentences[i];
            count_vector(&text[window_start..window_end], &mut vocabulary)
        })
        .collect();

    let mut chunks: Vec<Chunk> = Vec::new();
    let mut group_first = 0;
    for i in 0..sentences.len() {
        let cohesion_breaks =
            i + 1 == sentences.len() || vectors[i].dot(&vectors[i + 1]) < threshold;
        if cohesion_breaks {
            let (start, _) = sentences[group_first];
            let (_, end) = sentences[i];
            chunks.push(Chunk::new(chunks.len(), &text[start..end], start, end));
            group_first = i + 1;
        }
    }
    chunks
}
