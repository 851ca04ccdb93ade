//! Sentence and paragraph boundary scanning. All spans are byte offsets
//! into the original text, already shrunk to exclude surrounding
//! whitespace.

use regex::Regex;
use std::sync::OnceLock;
use unicode_segmentation::UnicodeSegmentation;

fn sentence_break_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"([.!?]+)(\s+)").expect("sentence pattern"))
}

fn paragraph_break_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\n\s*\n").expect("paragraph pattern"))
}

/// Shrink `[start, end)` to exclude surrounding whitespace; None when
/// nothing is left.
pub(crate) fn trimmed_span(text: &str, start: usize, end: usize) -> Option<(usize, usize)> {
    let slice = &text[start..end];
    let led = slice.len() - slice.trim_start().len();
    let trimmed = slice.trim();
    if trimmed.is_empty() {
        return None;
    }
    let s = start + led;
    Some((s, s + trimmed.len()))
}

/// Sentence spans split on terminator punctuation followed by whitespace.
/// The naive split: abbreviations and quoted terminators break sentences
/// too. Trailing text without a terminator forms the final sentence.
pub(crate) fn sentence_spans_regex(text: &str) -> Vec<(usize, usize)> {
    let mut spans = Vec::new();
    let mut start = 0;
    for caps in sentence_break_re().captures_iter(text) {
        let punct_end = caps.get(1).map_or(start, |m| m.end());
        if let Some(span) = trimmed_span(text, start, punct_end) {
            spans.push(span);
        }
        start = caps.get(0).map_or(punct_end, |m| m.end());
    }
    if let Some(span) = trimmed_span(text, start, text.len()) {
        spans.push(span);
    }
    spans
}

/// Sentence spans from UAX #29 sentence boundaries; tolerant of
/// abbreviations and closing quotes where the regex split is not.
pub(crate) fn sentence_spans_unicode(text: &str) -> Vec<(usize, usize)> {
    text.split_sentence_bound_indices()
        .filter_map(|(offset, sentence)| trimmed_span(text, offset, offset + sentence.len()))
        .collect()
}

/// Paragraph spans delimited by blank lines; a run of consecutive blank
/// lines is one boundary.
pub(crate) fn paragraph_spans(text: &str) -> Vec<(usize, usize)> {
    let mut spans = Vec::new();
    let mut start = 0;
    for m in paragraph_break_re().find_iter(text) {
        if let Some(span) = trimmed_span(text, start, m.start()) {
            spans.push(span);
        }
        start = m.end();
    }
    if let Some(span) = trimmed_span(text, start, text.len()) {
        spans.push(span);
    }
    spans
}
