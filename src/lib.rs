// src/lib.rs
// Public library surface for the binary, integration tests and reuse.

pub mod aggregate;
pub mod analyzer;
pub mod classify;
pub mod config;
pub mod error;
pub mod lexicon;
pub mod normalize;
pub mod rules;
pub mod scoring;

// HTTP hosting (used by the binary)
pub mod api;
pub mod metrics;

// ---- Re-exports for stable public API ----
pub use crate::aggregate::{filter_by_confidence, summarize, AnalysisSummary};
pub use crate::analyzer::{Analysis, SentimentAnalyzer};
pub use crate::api::create_router;
pub use crate::classify::{classify, Label};
pub use crate::lexicon::Lexicon;
pub use crate::normalize::{normalize_and_tokenize, Token};
pub use crate::rules::Heuristics;
pub use crate::scoring::{score_token, DocumentScore, ScoringMode, WordScore};

use anyhow::Context;
use std::sync::Arc;
use tracing::info;

use crate::config::ServiceConfig;

/// Load the lexicon and rule table named by `cfg` and build the analyzer.
///
/// Any failure here means the process must not serve requests.
pub fn build_analyzer(cfg: &ServiceConfig) -> anyhow::Result<SentimentAnalyzer> {
    let lexicon = match &cfg.lexicon_path {
        Some(p) => Lexicon::load_from_file(p)
            .with_context(|| format!("loading lexicon from {}", p.display()))?,
        None => Lexicon::embedded().context("loading embedded lexicon")?,
    };
    let heuristics = match &cfg.heuristics_path {
        Some(p) => Heuristics::load_from_file(p)
            .with_context(|| format!("loading heuristics from {}", p.display()))?,
        None => Heuristics::english(),
    };
    info!(
        entries = lexicon.len(),
        negations = heuristics.negations.len(),
        mode = ?cfg.analyzer.scoring_mode,
        "lexicon loaded"
    );

    Ok(SentimentAnalyzer::new(Arc::new(lexicon))
        .with_heuristics(heuristics)
        .with_mode(cfg.analyzer.scoring_mode))
}

/// Analyzer + router for `cfg`, without the `/metrics` route.
pub fn app(cfg: &ServiceConfig) -> anyhow::Result<axum::Router> {
    let analyzer = build_analyzer(cfg)?;
    let state = api::AppState::new(analyzer, cfg.analyzer).with_max_text_chars(cfg.max_text_chars);
    Ok(create_router(state))
}
