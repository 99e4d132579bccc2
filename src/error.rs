//! Error types for lexicon loading and configuration.
//!
//! The scoring engine itself is total and never fails; errors only arise at
//! the edges, while loading data files or validating caller configuration.

use std::path::PathBuf;
use thiserror::Error;

/// Failures while building the lexicon store. Any of these at start-up is fatal.
#[derive(Debug, Error)]
pub enum LexiconError {
    #[error("reading lexicon from {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("lexicon line {line}: {reason}")]
    Parse { line: usize, reason: String },

    #[error("lexicon JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("non-finite valence {value} for '{word}'")]
    InvalidValence { word: String, value: f64 },

    #[error("lexicon contains no entries")]
    Empty,
}

/// Rejected configuration, reported at the boundary before the engine runs.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("confidence threshold must be within [0, 1], got {0}")]
    ThresholdOutOfRange(f64),

    #[error("invalid heuristics: {0}")]
    InvalidHeuristics(String),

    #[error("invalid value for {key}: '{value}'")]
    InvalidEnv { key: &'static str, value: String },

    #[error("reading config from {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parsing config {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}
