//! # Lexicon Store
//! Immutable word → base valence mapping, loaded once and shared by reference.
//!
//! Sources:
//! - the embedded default (`sentiment_lexicon.json`, compiled in)
//! - a JSON object `{ "word": valence, ... }`
//! - a VADER-style text file: `word<TAB>mean[<TAB>...]` per line
//!
//! Keys are lower-cased on load; lookups expect normalized tokens.
//!
//! The embedded file is a hand-picked subset of roughly 200 common English
//! words on the VADER valence scale (about -4 to +4), not the full ~7,500-entry
//! VADER lexicon. Words outside it score neutral. For full coverage, point
//! `lexicon_path` in the service config (or `SENTIMENT_LEXICON_PATH`) at the
//! upstream `vader_lexicon.txt`; it loads as-is through [`Lexicon::from_vader_str`].

use crate::error::LexiconError;
use std::{collections::HashMap, fs, path::Path};

static EMBEDDED: &str = include_str!("../sentiment_lexicon.json");

#[derive(Debug, Clone, Default)]
pub struct Lexicon {
    entries: HashMap<String, f64>,
}

impl Lexicon {
    /// Build from in-memory pairs. Non-finite valences are rejected.
    pub fn from_entries<I, S>(entries: I) -> Result<Self, LexiconError>
    where
        I: IntoIterator<Item = (S, f64)>,
        S: AsRef<str>,
    {
        let mut map = HashMap::new();
        for (word, value) in entries {
            let word = word.as_ref().trim().to_lowercase();
            if word.is_empty() {
                continue;
            }
            if !value.is_finite() {
                return Err(LexiconError::InvalidValence { word, value });
            }
            map.insert(word, value);
        }
        if map.is_empty() {
            return Err(LexiconError::Empty);
        }
        Ok(Self { entries: map })
    }

    /// The default English lexicon shipped inside the binary.
    pub fn embedded() -> Result<Self, LexiconError> {
        Self::from_json_str(EMBEDDED)
    }

    pub fn from_json_str(s: &str) -> Result<Self, LexiconError> {
        let raw: HashMap<String, f64> = serde_json::from_str(s)?;
        Self::from_entries(raw)
    }

    /// Parse the tab-separated VADER format. Blank lines and `#` comments are
    /// skipped; any other line must carry a word and a numeric mean valence.
    pub fn from_vader_str(s: &str) -> Result<Self, LexiconError> {
        let mut pairs = Vec::new();
        for (i, line) in s.lines().enumerate() {
            let line_no = i + 1;
            let trimmed = line.trim_end_matches(['\r', '\n']);
            if trimmed.trim().is_empty() || trimmed.trim_start().starts_with('#') {
                continue;
            }
            let mut cols = trimmed.split('\t');
            let word = cols.next().unwrap_or_default();
            let mean = cols.next().ok_or_else(|| LexiconError::Parse {
                line: line_no,
                reason: "missing valence column".into(),
            })?;
            let value: f64 = mean.trim().parse().map_err(|_| LexiconError::Parse {
                line: line_no,
                reason: format!("'{}' is not a number", mean.trim()),
            })?;
            pairs.push((word.to_string(), value));
        }
        Self::from_entries(pairs)
    }

    /// Load from disk; `.json` files are read as JSON, everything else as
    /// the VADER text format.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, LexiconError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| LexiconError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let is_json = path
            .extension()
            .and_then(|s| s.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            Self::from_json_str(&content)
        } else {
            Self::from_vader_str(&content)
        }
    }

    /// Base valence for a normalized word, `None` when absent.
    #[inline]
    pub fn lookup(&self, word: &str) -> Option<f64> {
        self.entries.get(word).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_lexicon_loads() {
        let lex = Lexicon::embedded().unwrap();
        assert!(lex.len() > 100);
        assert!(lex.lookup("love").unwrap() > 0.0);
        assert!(lex.lookup("hate").unwrap() < 0.0);
        for w in ["i", "this", "that", "check"] {
            assert!(lex.lookup(w).is_none(), "{w} should be absent");
        }
    }

    #[test]
    fn embedded_subset_is_extended_by_external_vader_file() {
        let embedded = Lexicon::embedded().unwrap();
        assert!(embedded.len() < 1_000);
        assert!(embedded.lookup("kill").is_none());

        let full = Lexicon::from_vader_str("kill\t-3.7\t0.78102\t[-4, -4, -3]\n").unwrap();
        assert_eq!(full.lookup("kill"), Some(-3.7));
    }

    #[test]
    fn vader_format_parses_and_reports_line() {
        let txt = "# comment\n\nGood\t1.9\t0.9\t[2, 2]\nbad\t-2.5\n";
        let lex = Lexicon::from_vader_str(txt).unwrap();
        assert_eq!(lex.lookup("good"), Some(1.9));
        assert_eq!(lex.lookup("bad"), Some(-2.5));

        let err = Lexicon::from_vader_str("ok\t1.0\nbroken\tabc\n").unwrap_err();
        match err {
            LexiconError::Parse { line, .. } => assert_eq!(line, 2),
            other => panic!("unexpected error: {other}"),
        }
        assert!(matches!(
            Lexicon::from_vader_str("lonely\n"),
            Err(LexiconError::Parse { line: 1, .. })
        ));
    }

    #[test]
    fn empty_and_non_finite_are_rejected() {
        assert!(matches!(Lexicon::from_json_str("{}"), Err(LexiconError::Empty)));
        assert!(matches!(
            Lexicon::from_entries([("x", f64::NAN)]),
            Err(LexiconError::InvalidValence { .. })
        ));
    }

    #[test]
    fn load_from_file_dispatches_on_extension() {
        let dir = tempfile::tempdir().unwrap();
        let json = dir.path().join("lex.json");
        fs::write(&json, r#"{"great": 3.1}"#).unwrap();
        assert_eq!(Lexicon::load_from_file(&json).unwrap().lookup("great"), Some(3.1));

        let txt = dir.path().join("lex.txt");
        fs::write(&txt, "awful\t-2.0\t0.5\n").unwrap();
        assert_eq!(Lexicon::load_from_file(&txt).unwrap().lookup("awful"), Some(-2.0));

        let missing = dir.path().join("nope.txt");
        assert!(matches!(
            Lexicon::load_from_file(&missing),
            Err(LexiconError::Io { .. })
        ));
    }
}
