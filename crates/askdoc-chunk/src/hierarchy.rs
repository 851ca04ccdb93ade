//! Heading-aware chunking: detect heading lines, derive a section tree,
//! and emit one chunk per section body (re-split recursively when a body
//! outgrows the character budget).

use regex::Regex;
use std::sync::OnceLock;

use askdoc_core::types::Chunk;

use crate::boundaries::trimmed_span;
use crate::recursive;

fn markdown_heading_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(#{1,6})\s+(\S.*)$").expect("markdown heading pattern"))
}

fn numbered_heading_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(\d+(?:\.\d+)*)[.)]?\s+(\S.*)$").expect("numbered heading pattern"))
}

const BARE_HEADING_MAX_CHARS: usize = 60;

struct Heading {
    level: usize,
    title: String,
    /// Byte offset just past the heading's line (its body starts here).
    body_from: usize,
    /// Byte offset where the heading's line begins (the previous body ends
    /// here).
    line_start: usize,
}

pub(crate) fn split(text: &str, max_chars: usize, preserve_context: bool) -> Vec<Chunk> {
    let headings = scan_headings(text);
    if headings.is_empty() {
        return recursive::split(text, max_chars, 0);
    }

    let mut chunks: Vec<Chunk> = Vec::new();

    // Text before the first heading has no structural path.
    let preamble_end = headings[0].line_start;
    if let Some((s, e)) = trimmed_span(text, 0, preamble_end) {
        emit_section(text, s, e, "", max_chars, preserve_context, &mut chunks);
    }

    let mut path: Vec<(usize, String)> = Vec::new();
    for (i, heading) in headings.iter().enumerate() {
        while path.last().is_some_and(|&(level, _)| level >= heading.level) {
            path.pop();
        }
        path.push((heading.level, heading.title.clone()));

        let body_end = headings.get(i + 1).map_or(text.len(), |next| next.line_start);
        if let Some((s, e)) = trimmed_span(text, heading.body_from, body_end) {
            let joined = path.iter().map(|(_, t)| t.as_str()).collect::<Vec<_>>().join(" > ");
            emit_section(text, s, e, &joined, max_chars, preserve_context, &mut chunks);
        }
    }
    chunks
}

fn emit_section(
    text: &str,
    start: usize,
    end: usize,
    path: &str,
    max_chars: usize,
    preserve_context: bool,
    chunks: &mut Vec<Chunk>,
) {
    for piece in recursive::split_span(text, start, end, max_chars, 0) {
        let index = chunks.len();
        let chunk = if path.is_empty() {
            Chunk::new(index, piece.text, piece.start, piece.end)
        } else if preserve_context {
            Chunk::new(index, format!("{path}: {}", piece.text), piece.start, piece.end)
                .with_context(path)
        } else {
            Chunk::new(index, piece.text, piece.start, piece.end).with_context(path)
        };
        chunks.push(chunk);
    }
}

/// Heading lines in document order. Markdown `#` levels and numbered
/// `1.2.3` levels carry their own depth; a bare short line (no terminal
/// punctuation, preceded by a blank line or the document start) counts as
/// a level-1 heading.
fn scan_headings(text: &str) -> Vec<Heading> {
    let mut headings = Vec::new();
    let mut line_start = 0;
    let mut previous_blank = true;
    for line in text.split_inclusive('\n') {
        let line_end = line_start + line.len();
        let trimmed = line.trim();
        if let Some((level, title)) = classify_line(trimmed, previous_blank) {
            headings.push(Heading { level, title, body_from: line_end, line_start });
        }
        previous_blank = trimmed.is_empty();
        line_start = line_end;
    }
    headings
}

fn classify_line(line: &str, previous_blank: bool) -> Option<(usize, String)> {
    if line.is_empty() {
        return None;
    }
    if let Some(caps) = markdown_heading_re().captures(line) {
        let level = caps.get(1).map_or(1, |m| m.as_str().len());
        let title = caps.get(2).map_or("", |m| m.as_str()).trim().to_string();
        return Some((level, title));
    }
    if line.chars().count() <= BARE_HEADING_MAX_CHARS {
        if let Some(caps) = numbered_heading_re().captures(line) {
            let level = caps.get(1).map_or(1, |m| m.as_str().split('.').count());
            return Some((level, line.to_string()));
        }
        let ends_like_prose = line.ends_with(['.', '!', '?', ',', ';', ':']);
        let has_letters = line.chars().any(char::is_alphabetic);
        if previous_blank && !ends_like_prose && has_letters {
            return Some((1, line.to_string()));
        }
    }
    None
}
