//! Configuration loading for CLI collaborators.
//!
//! Uses Figment to merge `askdoc.toml` + `ASKDOC_*` env vars into flat
//! settings structs, then maps those onto the closed strategy enum.
//! Provides a helper to expand `~` and `${VAR}` in user-supplied paths.

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::Deserialize;
use std::path::PathBuf;

use crate::error::{Error, Result};
use crate::types::{ChunkStrategy, RetrievalParams, SynthesisParams};

/// Flat chunking settings as they appear in `askdoc.toml` or the
/// environment. `strategy` selects which of the numeric knobs apply; the
/// rest keep their defaults when unused.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ChunkingSettings {
    pub strategy: String,
    pub chunk_size: usize,
    pub overlap: usize,
    pub window_size: usize,
    pub step_size: usize,
    pub max_chars: usize,
    pub overlap_chars: usize,
    pub threshold: f32,
    pub buffer: usize,
    pub preserve_context: bool,
}

impl Default for ChunkingSettings {
    fn default() -> Self {
        Self {
            strategy: "fixed".to_string(),
            chunk_size: 15,
            overlap: 2,
            window_size: 20,
            step_size: 10,
            max_chars: 800,
            overlap_chars: 80,
            threshold: 0.25,
            buffer: 1,
            preserve_context: true,
        }
    }
}

impl ChunkingSettings {
    /// Map the flat settings onto the strategy variant they select.
    /// Unknown names and invalid parameter combinations both fail here,
    /// before any chunking work happens.
    pub fn strategy(&self) -> Result<ChunkStrategy> {
        let strategy = match self.strategy.as_str() {
            "fixed" => ChunkStrategy::FixedSize { size: self.chunk_size, overlap: self.overlap },
            "sentence" | "regex" => ChunkStrategy::SentenceRegex,
            "sentence-unicode" | "unicode" => ChunkStrategy::SentenceUnicode,
            "paragraph" => ChunkStrategy::Paragraph,
            "sliding" => ChunkStrategy::SlidingWindow {
                window_size: self.window_size,
                step_size: self.step_size,
            },
            "recursive" => ChunkStrategy::Recursive {
                max_chars: self.max_chars,
                overlap_chars: self.overlap_chars,
            },
            "semantic" => ChunkStrategy::Semantic { threshold: self.threshold, buffer: self.buffer },
            "hierarchical" => ChunkStrategy::Hierarchical {
                max_chars: self.max_chars,
                preserve_context: self.preserve_context,
            },
            other => {
                return Err(Error::InvalidConfig(format!("unknown chunking strategy '{other}'")))
            }
        };
        strategy.validate()?;
        Ok(strategy)
    }
}

/// Everything a collaborator needs to build an engine.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub chunking: ChunkingSettings,
    pub retrieval: RetrievalParams,
    pub synthesis: SynthesisParams,
}

impl Settings {
    /// Merge `askdoc.toml` from the working directory with `ASKDOC_*`
    /// environment variables (double underscore separates nesting, e.g.
    /// `ASKDOC_CHUNKING__CHUNK_SIZE=30`). Environment wins.
    pub fn load() -> anyhow::Result<Self> {
        let settings = Figment::new()
            .merge(Toml::file("askdoc.toml"))
            .merge(Env::prefixed("ASKDOC_").split("__"))
            .extract()
            .map_err(|e| anyhow::anyhow!("Failed to load settings: {e}"))?;
        Ok(settings)
    }
}

/// Expand a user-provided path string:
/// - Expands leading '~' to the user's home directory
/// - Expands ${VAR} and $VAR environment variables
/// - Returns a PathBuf without attempting to canonicalize
pub fn expand_path<S: AsRef<str>>(input: S) -> PathBuf {
    let s = input.as_ref();
    // Expand env vars first
    let expanded_env = shellexpand::env(s).unwrap_or(std::borrow::Cow::Borrowed(s));
    // Expand ~ at start
    let expanded = shellexpand::tilde(&expanded_env);
    PathBuf::from(expanded.as_ref())
}
