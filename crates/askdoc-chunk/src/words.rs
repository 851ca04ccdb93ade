//! Word-window strategies: fixed-size groups and the sliding window.

use askdoc_core::types::Chunk;

/// Byte spans of whitespace-separated words.
pub(crate) fn word_spans(text: &str) -> Vec<(usize, usize)> {
    let mut spans = Vec::new();
    let mut start = None;
    for (i, ch) in text.char_indices() {
        if ch.is_whitespace() {
            if let Some(s) = start.take() {
                spans.push((s, i));
            }
        } else if start.is_none() {
            start = Some(i);
        }
    }
    if let Some(s) = start {
        spans.push((s, text.len()));
    }
    spans
}

pub(crate) fn fixed_size(text: &str, size: usize, overlap: usize) -> Vec<Chunk> {
    window_chunks(text, size, size - overlap)
}

pub(crate) fn sliding_window(text: &str, window_size: usize, step_size: usize) -> Vec<Chunk> {
    window_chunks(text, window_size, step_size)
}

/// Word windows of `size` advancing by `step`. The window that reaches the
/// final word ends the sequence, so only the last chunk may hold fewer
/// than `size` words; it is emitted even when truncated.
fn window_chunks(text: &str, size: usize, step: usize) -> Vec<Chunk> {
    let spans = word_spans(text);
    let mut chunks = Vec::new();
    let mut word = 0;
    while word < spans.len() {
        let last = (word + size).min(spans.len()) - 1;
        let (start, _) = spans[word];
        let (_, end) = spans[last];
        chunks.push(Chunk::new(chunks.len(), &text[start..end], start, end));
        if last + 1 == spans.len() {
            break;
        }
        word += step;
    }
    chunks
}
