//! # Sentiment Analyzer
//! One-stop facade: tokenize → score every token → summarize.
//!
//! Holds the shared, read-only lexicon and rule table behind `Arc`s; cloning
//! an analyzer is cheap and every call is independent of the others.

use crate::aggregate::{filter_by_confidence, summarize, AnalysisSummary};
use crate::lexicon::Lexicon;
use crate::normalize::normalize_and_tokenize;
use crate::rules::Heuristics;
use crate::scoring::{score_document, score_tokens, DocumentScore, ScoringMode, WordScore};
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct SentimentAnalyzer {
    lexicon: Arc<Lexicon>,
    heuristics: Arc<Heuristics>,
    mode: ScoringMode,
}

/// Everything one analysis run produces.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Analysis {
    pub words: Vec<WordScore>,
    pub summary: AnalysisSummary,
    pub document: DocumentScore,
}

impl Analysis {
    /// Detail view: words at or above `threshold` confidence, in order.
    pub fn details(&self, threshold: f64) -> Vec<&WordScore> {
        filter_by_confidence(&self.words, threshold)
    }
}

impl SentimentAnalyzer {
    pub fn new(lexicon: Arc<Lexicon>) -> Self {
        Self {
            lexicon,
            heuristics: Arc::new(Heuristics::english()),
            mode: ScoringMode::default(),
        }
    }

    pub fn with_heuristics(mut self, heuristics: Heuristics) -> Self {
        self.heuristics = Arc::new(heuristics);
        self
    }

    pub fn with_mode(mut self, mode: ScoringMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn mode(&self) -> ScoringMode {
        self.mode
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    pub fn analyze(&self, text: &str) -> Analysis {
        self.analyze_with_mode(text, self.mode)
    }

    /// Same as [`analyze`](Self::analyze) with a per-call scoring mode.
    pub fn analyze_with_mode(&self, text: &str, mode: ScoringMode) -> Analysis {
        let tokens = normalize_and_tokenize(text);
        let words = score_tokens(&tokens, &self.lexicon, &self.heuristics, mode);
        let document = score_document(&tokens, &self.lexicon, &self.heuristics, mode);
        let summary = summarize(&words);
        Analysis {
            words,
            summary,
            document,
        }
    }
}
