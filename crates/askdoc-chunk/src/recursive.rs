//! Budgeted splitting at the largest natural boundary that fits.
//!
//! Descends paragraph -> sentence -> word; a single run longer than the
//! budget is hard-cut at character boundaries. Adjacent chunks share an
//! `overlap_chars` tail, snapped to a word boundary, and the overlap is
//! shrunk where needed so no chunk ever exceeds `max_chars`.

use askdoc_core::types::Chunk;

use crate::boundaries::{paragraph_spans, sentence_spans_regex};
use crate::words::word_spans;

pub(crate) fn split(text: &str, max_chars: usize, overlap_chars: usize) -> Vec<Chunk> {
    match crate::boundaries::trimmed_span(text, 0, text.len()) {
        Some((start, end)) => split_span(text, start, end, max_chars, overlap_chars),
        None => Vec::new(),
    }
}

/// Split `[start, end)` of `text`; offsets in the returned chunks are
/// absolute.
pub(crate) fn split_span(
    text: &str,
    start: usize,
    end: usize,
    max_chars: usize,
    overlap_chars: usize,
) -> Vec<Chunk> {
    let mut pieces = Vec::new();
    decompose(text, start, end, max_chars, &mut pieces);
    merge(text, &pieces, max_chars, overlap_chars)
}

fn char_len(text: &str, start: usize, end: usize) -> usize {
    text[start..end].chars().count()
}

/// Break a span into pieces no longer than `max_chars`, preferring the
/// largest boundary kind that exists inside it.
fn decompose(text: &str, start: usize, end: usize, max_chars: usize, out: &mut Vec<(usize, usize)>) {
    if start >= end {
        return;
    }
    if char_len(text, start, end) <= max_chars {
        out.push((start, end));
        return;
    }
    let slice = &text[start..end];

    let paragraphs = paragraph_spans(slice);
    if paragraphs.len() > 1 {
        for (s, e) in paragraphs {
            decompose(text, start + s, start + e, max_chars, out);
        }
        return;
    }

    let sentences = sentence_spans_regex(slice);
    if sentences.len() > 1 {
        for (s, e) in sentences {
            decompose(text, start + s, start + e, max_chars, out);
        }
        return;
    }

    let words = word_spans(slice);
    if words.len() > 1 {
        for (s, e) in words {
            decompose(text, start + s, start + e, max_chars, out);
        }
        return;
    }

    // One indivisible run: hard cut at character boundaries.
    let mut cut_start = start;
    let mut taken = 0;
    for (i, _) in slice.char_indices() {
        if taken == max_chars {
            out.push((cut_start, start + i));
            cut_start = start + i;
            taken = 0;
        }
        taken += 1;
    }
    if cut_start < end {
        out.push((cut_start, end));
    }
}

/// Greedily pack pieces into chunks under `max_chars`, then stitch an
/// overlap tail from each chunk onto the head of the next.
fn merge(text: &str, pieces: &[(usize, usize)], max_chars: usize, overlap_chars: usize) -> Vec<Chunk> {
    let mut groups: Vec<(usize, usize)> = Vec::new();
    for &(piece_start, piece_end) in pieces {
        if let Some(last) = groups.last_mut() {
            if char_len(text, last.0, piece_end) <= max_chars {
                last.1 = piece_end;
                continue;
            }
        }
        groups.push((piece_start, piece_end));
    }

    let mut chunks: Vec<Chunk> = Vec::new();
    for (i, &(group_start, group_end)) in groups.iter().enumerate() {
        let start = if i == 0 {
            group_start
        } else {
            overlap_start(text, group_start, group_end, max_chars, overlap_chars)
        };
        chunks.push(Chunk::new(chunks.len(), &text[start..group_end], start, group_end));
    }
    chunks
}

/// Where the overlap prefix of a chunk beginning at `group_start` should
/// start: up to `overlap_chars` characters back, snapped forward to a word
/// boundary, shrunk so the whole chunk stays within `max_chars`.
fn overlap_start(
    text: &str,
    group_start: usize,
    group_end: usize,
    max_chars: usize,
    overlap_chars: usize,
) -> usize {
    let content_len = char_len(text, group_start, group_end);
    let budget = overlap_chars.min(max_chars.saturating_sub(content_len));
    if budget == 0 {
        return group_start;
    }
    let mut raw = group_start;
    let mut taken = 0;
    for (i, _) in text[..group_start].char_indices().rev() {
        if taken == budget {
            break;
        }
        raw = i;
        taken += 1;
    }
    // Snap to the word boundary after the first whitespace in the window.
    match text[raw..group_start].find(char::is_whitespace) {
        Some(ws) => {
            let after = raw + ws;
            text[after..group_start]
                .find(|c: char| !c.is_whitespace())
                .map_or(group_start, |off| after + off)
        }
        None => raw,
    }
}
