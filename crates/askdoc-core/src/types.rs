//! Domain types shared by the chunking, indexing, and engine crates.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A contiguous (or deliberately overlapping) span of the source document,
/// the atomic unit of retrieval.
///
/// - `index`: 0-based position within the chunk sequence
/// - `text`: chunk payload; a verbatim source slice unless the producing
///   strategy prepends overlap or heading context
/// - `start`/`end`: byte offsets of the underlying span in the source
/// - `word_count`/`char_count`: derived from `text`
/// - `context`: ancestor heading path when produced by hierarchical
///   chunking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    pub index: usize,
    pub text: String,
    pub start: usize,
    pub end: usize,
    pub word_count: usize,
    pub char_count: usize,
    pub context: Option<String>,
}

impl Chunk {
    pub fn new(index: usize, text: impl Into<String>, start: usize, end: usize) -> Self {
        let text = text.into();
        let word_count = text.split_whitespace().count();
        let char_count = text.chars().count();
        Self { index, text, start, end, word_count, char_count, context: None }
    }

    #[must_use]
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }
}

/// How a document is segmented into chunks. Exactly one strategy is active
/// per engine instance; adding a strategy means adding a variant here and
/// an arm to the chunker dispatch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChunkStrategy {
    /// Consecutive groups of `size` words, `overlap` words shared between
    /// neighbouring groups.
    FixedSize { size: usize, overlap: usize },
    /// One chunk per sentence, split on terminator punctuation.
    SentenceRegex,
    /// One chunk per sentence, split on UAX #29 sentence boundaries.
    SentenceUnicode,
    /// One chunk per blank-line-delimited paragraph.
    Paragraph,
    /// Word window of `window_size` advancing by `step_size` words.
    SlidingWindow { window_size: usize, step_size: usize },
    /// Largest-natural-boundary splitting (paragraph, sentence, word) under
    /// `max_chars`, with `overlap_chars` carried between adjacent chunks.
    Recursive { max_chars: usize, overlap_chars: usize },
    /// Consecutive sentences grouped while adjacent `buffer`-sentence
    /// windows stay at or above `threshold` cosine similarity.
    Semantic { threshold: f32, buffer: usize },
    /// Heading-derived section tree; bodies above `max_chars` are re-split
    /// with the recursive policy. `preserve_context` prefixes each chunk
    /// with its ancestor heading path.
    Hierarchical { max_chars: usize, preserve_context: bool },
}

impl ChunkStrategy {
    /// Parameter validation, run before any chunking work happens.
    pub fn validate(&self) -> Result<()> {
        match *self {
            Self::FixedSize { size, overlap } => {
                if size == 0 {
                    return Err(Error::InvalidConfig("fixed-size chunk size must be >= 1".into()));
                }
                if overlap >= size {
                    return Err(Error::InvalidConfig(format!(
                        "fixed-size overlap ({overlap}) must be smaller than size ({size})"
                    )));
                }
            }
            Self::SlidingWindow { window_size, step_size } => {
                if window_size == 0 {
                    return Err(Error::InvalidConfig("sliding window size must be >= 1".into()));
                }
                if step_size == 0 {
                    return Err(Error::InvalidConfig("sliding step size must be >= 1".into()));
                }
                if step_size > window_size {
                    return Err(Error::InvalidConfig(format!(
                        "sliding step size ({step_size}) must not exceed window size ({window_size})"
                    )));
                }
            }
            Self::Recursive { max_chars, overlap_chars } => {
                if max_chars == 0 {
                    return Err(Error::InvalidConfig("recursive max chars must be >= 1".into()));
                }
                if overlap_chars >= max_chars {
                    return Err(Error::InvalidConfig(format!(
                        "recursive overlap ({overlap_chars}) must be smaller than max chars ({max_chars})"
                    )));
                }
            }
            Self::Semantic { threshold, buffer } => {
                if !(0.0..=1.0).contains(&threshold) {
                    return Err(Error::InvalidConfig(format!(
                        "semantic threshold ({threshold}) must lie in [0, 1]"
                    )));
                }
                if buffer == 0 {
                    return Err(Error::InvalidConfig("semantic sentence buffer must be >= 1".into()));
                }
            }
            Self::Hierarchical { max_chars, .. } => {
                if max_chars == 0 {
                    return Err(Error::InvalidConfig("hierarchical max chars must be >= 1".into()));
                }
            }
            Self::SentenceRegex | Self::SentenceUnicode | Self::Paragraph => {}
        }
        Ok(())
    }

    /// Short name used in logs and CLI output.
    pub fn name(&self) -> &'static str {
        match self {
            Self::FixedSize { .. } => "fixed",
            Self::SentenceRegex => "sentence",
            Self::SentenceUnicode => "sentence-unicode",
            Self::Paragraph => "paragraph",
            Self::SlidingWindow { .. } => "sliding",
            Self::Recursive { .. } => "recursive",
            Self::Semantic { .. } => "semantic",
            Self::Hierarchical { .. } => "hierarchical",
        }
    }
}

/// How many chunks to return per query and the relevance floor below which
/// a chunk is not worth returning at all.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalParams {
    pub top_k: usize,
    pub min_score: f32,
}

impl Default for RetrievalParams {
    fn default() -> Self {
        Self { top_k: 3, min_score: 0.0 }
    }
}

impl RetrievalParams {
    pub fn validate(&self) -> Result<()> {
        if self.top_k == 0 {
            return Err(Error::InvalidConfig("retrieval top_k must be >= 1".into()));
        }
        if !(0.0..=1.0).contains(&self.min_score) {
            return Err(Error::InvalidConfig(format!(
                "retrieval min_score ({}) must lie in [0, 1]",
                self.min_score
            )));
        }
        Ok(())
    }
}

/// Answer-assembly knobs: overall length budget and whether supporting
/// chunks are annotated with their similarity inside the answer text.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SynthesisParams {
    pub max_answer_chars: usize,
    pub annotate_scores: bool,
}

impl Default for SynthesisParams {
    fn default() -> Self {
        Self { max_answer_chars: 4000, annotate_scores: false }
    }
}

impl SynthesisParams {
    pub fn validate(&self) -> Result<()> {
        if self.max_answer_chars == 0 {
            return Err(Error::InvalidConfig("synthesis max_answer_chars must be >= 1".into()));
        }
        Ok(())
    }
}

/// One retrieved chunk together with its cosine similarity to the query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredChunk {
    pub chunk: Chunk,
    pub score: f32,
}

/// The response to one query: the composed text plus the scored chunks it
/// was extracted from. Empty `sources` means no relevant content was found.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Answer {
    pub text: String,
    pub sources: Vec<ScoredChunk>,
}

impl Answer {
    pub fn is_grounded(&self) -> bool {
        !self.sources.is_empty()
    }
}
