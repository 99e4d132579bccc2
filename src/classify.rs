//! Three-way sentiment label derived from a compound score.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Compound scores at or above this value are POSITIVE.
pub const POSITIVE_THRESHOLD: f64 = 0.05;
/// Compound scores at or below this value are NEGATIVE.
pub const NEGATIVE_THRESHOLD: f64 = -0.05;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Label {
    Positive,
    Negative,
    Neutral,
}

impl Label {
    pub const ALL: [Label; 3] = [Label::Positive, Label::Negative, Label::Neutral];

    pub fn as_str(self) -> &'static str {
        match self {
            Label::Positive => "POSITIVE",
            Label::Negative => "NEGATIVE",
            Label::Neutral => "NEUTRAL",
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Map a compound score to its label. Both thresholds are inclusive;
/// anything in between (and NaN) is NEUTRAL.
pub fn classify(compound: f64) -> Label {
    if compound >= POSITIVE_THRESHOLD {
        Label::Positive
    } else if compound <= NEGATIVE_THRESHOLD {
        Label::Negative
    } else {
        Label::Neutral
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thresholds_are_inclusive() {
        assert_eq!(classify(0.05), Label::Positive);
        assert_eq!(classify(-0.05), Label::Negative);
        assert_eq!(classify(0.0499), Label::Neutral);
        assert_eq!(classify(-0.0499), Label::Neutral);
    }

    #[test]
    fn extremes_and_nan() {
        assert_eq!(classify(f64::INFINITY), Label::Positive);
        assert_eq!(classify(f64::NEG_INFINITY), Label::Negative);
        assert_eq!(classify(f64::NAN), Label::Neutral);
    }

    #[test]
    fn serializes_uppercase() {
        let s = serde_json::to_string(&Label::Negative).unwrap();
        assert_eq!(s, "\"NEGATIVE\"");
        assert_eq!(Label::Neutral.to_string(), "NEUTRAL");
    }
}
