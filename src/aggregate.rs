//! # Aggregator
//! Rolls per-word results into label counts and percentages, and applies
//! the caller's confidence threshold to produce the detail view.
//!
//! An empty input is an explicit "no content" state: counts are zero and
//! percentages are `None` rather than a division by zero.

use crate::classify::Label;
use crate::scoring::WordScore;
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LabelCounts {
    #[serde(rename = "POSITIVE")]
    pub positive: usize,
    #[serde(rename = "NEGATIVE")]
    pub negative: usize,
    #[serde(rename = "NEUTRAL")]
    pub neutral: usize,
}

impl LabelCounts {
    pub fn get(&self, label: Label) -> usize {
        match label {
            Label::Positive => self.positive,
            Label::Negative => self.negative,
            Label::Neutral => self.neutral,
        }
    }

    fn bump(&mut self, label: Label) {
        match label {
            Label::Positive => self.positive += 1,
            Label::Negative => self.negative += 1,
            Label::Neutral => self.neutral += 1,
        }
    }
}

/// Share of each label in percent (0–100), unrounded.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LabelPercentages {
    #[serde(rename = "POSITIVE")]
    pub positive: f64,
    #[serde(rename = "NEGATIVE")]
    pub negative: f64,
    #[serde(rename = "NEUTRAL")]
    pub neutral: f64,
}

impl LabelPercentages {
    pub fn get(&self, label: Label) -> f64 {
        match label {
            Label::Positive => self.positive,
            Label::Negative => self.negative,
            Label::Neutral => self.neutral,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisSummary {
    pub counts: LabelCounts,
    pub total: usize,
    /// `None` when `total == 0`.
    pub percentages: Option<LabelPercentages>,
    pub no_content: bool,
}

impl AnalysisSummary {
    pub fn count(&self, label: Label) -> usize {
        self.counts.get(label)
    }

    pub fn percentage(&self, label: Label) -> Option<f64> {
        self.percentages.map(|p| p.get(label))
    }

    /// Percentage rounded to one decimal, as shown to users.
    pub fn percentage_rounded(&self, label: Label) -> Option<f64> {
        self.percentage(label).map(|p| (p * 10.0).round() / 10.0)
    }
}

pub fn summarize(scores: &[WordScore]) -> AnalysisSummary {
    let mut counts = LabelCounts::default();
    for s in scores {
        counts.bump(s.label);
    }
    let total = scores.len();

    let percentages = (total > 0).then(|| {
        let pct = |n: usize| n as f64 / total as f64 * 100.0;
        LabelPercentages {
            positive: pct(counts.positive),
            negative: pct(counts.negative),
            neutral: pct(counts.neutral),
        }
    });

    AnalysisSummary {
        counts,
        total,
        percentages,
        no_content: total == 0,
    }
}

/// Scores with `confidence >= threshold`, original order preserved.
pub fn filter_by_confidence(scores: &[WordScore], threshold: f64) -> Vec<&WordScore> {
    scores.iter().filter(|s| s.confidence >= threshold).collect()
}
