//! Heuristic rule table: negation cues, degree modifiers and the constants
//! the scoring engine applies on top of raw lexicon valences.
//!
//! The table is plain data so it can be swapped (TOML file) without touching
//! scoring control flow. `Heuristics::english()` is the built-in default.
//!
//! TOML shape (every field optional, missing ones fall back to English):
//! ```toml
//! negations = ["not", "never", "dont"]
//! boosters = ["very", "extremely"]
//! diminishers = ["slightly"]
//! negation_window = 3
//! negation_factor = -0.74
//! ```

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::{collections::HashSet, fs, path::Path};

/// Word that scales the valence of the word right after it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Degree {
    Booster,
    Diminisher,
}

// Apostrophes are stripped by the normalizer, so contractions appear fused.
const NEGATIONS: &[&str] = &[
    "aint", "arent", "cannot", "cant", "couldnt", "darent", "didnt", "doesnt", "dont", "hadnt",
    "hasnt", "havent", "isnt", "mightnt", "mustnt", "neednt", "neither", "never", "no", "none",
    "nope", "nor", "not", "nothing", "nowhere", "oughtnt", "shant", "shouldnt", "wasnt",
    "werent", "without", "wont", "wouldnt", "rarely", "seldom", "despite",
];

const BOOSTERS: &[&str] = &[
    "absolutely", "amazingly", "awfully", "completely", "considerably", "decidedly", "deeply",
    "enormously", "entirely", "especially", "exceptionally", "extremely", "fabulously",
    "fully", "greatly", "hella", "highly", "hugely", "incredibly", "intensely", "majorly",
    "more", "most", "particularly", "purely", "quite", "really", "remarkably", "so",
    "substantially", "thoroughly", "totally", "tremendously", "uber", "unbelievably",
    "unusually", "utterly", "very",
];

const DIMINISHERS: &[&str] = &[
    "almost", "barely", "hardly", "kinda", "less", "little", "marginally", "occasionally",
    "partly", "scarcely", "slightly", "somewhat", "sorta",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Heuristics {
    pub negations: HashSet<String>,
    pub boosters: HashSet<String>,
    pub diminishers: HashSet<String>,
    /// How many preceding tokens a negation cue reaches across.
    pub negation_window: usize,
    /// Multiplier applied to negated valences (inverts and dampens).
    pub negation_factor: f64,
    pub booster_multiplier: f64,
    pub diminisher_multiplier: f64,
    pub exclamation_increment: f64,
    pub max_exclamations: u32,
    /// Per `?` when two or three follow a word.
    pub question_increment: f64,
    /// Flat amount when more than three `?` follow a word.
    pub question_flood_increment: f64,
    pub caps_increment: f64,
    /// Upper bound on the combined punctuation/caps emphasis.
    pub max_emphasis: f64,
    /// Saturation constant for `x / sqrt(x^2 + alpha)`.
    pub alpha: f64,
}

impl Default for Heuristics {
    fn default() -> Self {
        Self::english()
    }
}

fn to_set(words: &[&str]) -> HashSet<String> {
    words.iter().map(|w| w.to_string()).collect()
}

impl Heuristics {
    pub fn english() -> Self {
        Self {
            negations: to_set(NEGATIONS),
            boosters: to_set(BOOSTERS),
            diminishers: to_set(DIMINISHERS),
            negation_window: 3,
            negation_factor: -0.74,
            booster_multiplier: 1.293,
            diminisher_multiplier: 0.707,
            exclamation_increment: 0.292,
            max_exclamations: 4,
            question_increment: 0.18,
            question_flood_increment: 0.96,
            caps_increment: 0.733,
            max_emphasis: 2.0,
            alpha: 15.0,
        }
    }

    pub fn from_toml_str(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Load and validate a rule table from a TOML file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let h = Self::from_toml_str(&content).map_err(|source| ConfigError::Toml {
            path: path.to_path_buf(),
            source,
        })?;
        h.validate()?;
        Ok(h)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let bad = |msg: &str| Err(ConfigError::InvalidHeuristics(msg.to_string()));
        if !(self.alpha.is_finite() && self.alpha > 0.0) {
            return bad("alpha must be a positive number");
        }
        if !(self.negation_factor.is_finite() && self.negation_factor < 0.0) {
            return bad("negation_factor must be negative");
        }
        if !(self.booster_multiplier.is_finite() && self.booster_multiplier >= 1.0) {
            return bad("booster_multiplier must be >= 1");
        }
        if !(self.diminisher_multiplier > 0.0 && self.diminisher_multiplier <= 1.0) {
            return bad("diminisher_multiplier must be within (0, 1]");
        }
        let increments = [
            self.exclamation_increment,
            self.question_increment,
            self.question_flood_increment,
            self.caps_increment,
            self.max_emphasis,
        ];
        if increments.iter().any(|v| !v.is_finite() || *v < 0.0) {
            return bad("emphasis increments must be non-negative");
        }
        Ok(())
    }

    #[inline]
    pub fn is_negation(&self, word: &str) -> bool {
        self.negations.contains(word)
    }

    pub fn degree_of(&self, word: &str) -> Option<Degree> {
        if self.boosters.contains(word) {
            Some(Degree::Booster)
        } else if self.diminishers.contains(word) {
            Some(Degree::Diminisher)
        } else {
            None
        }
    }

    pub fn degree_multiplier(&self, degree: Degree) -> f64 {
        match degree {
            Degree::Booster => self.booster_multiplier,
            Degree::Diminisher => self.diminisher_multiplier,
        }
    }
}
