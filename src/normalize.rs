//! # Normalizer / Tokenizer
//! Strips URLs, mentions, hashtags and non-letter noise, then splits the
//! remainder into lower-case word tokens in their original order.
//!
//! Sentence punctuation (`. ! ?`) survives cleaning but is never emitted as a
//! token; it is folded into the preceding word as emphasis / boundary cues.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

static RE_URL: Lazy<Regex> = Lazy::new(|| Regex::new(r"http\S+|www\S+").expect("url regex"));
static RE_TAGS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[@#]\w+").expect("mention/hashtag regex"));
static RE_NOISE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-zA-Z\s.!?,]").expect("noise regex"));
static RE_WS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("whitespace regex"));

/// A single word with its position and the punctuation that followed it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    /// Lower-cased word, letters only.
    pub text: String,
    /// Word as written, before lower-casing.
    pub surface: String,
    /// 0-based index in the token sequence.
    pub index: usize,
    pub exclamations: u32,
    pub questions: u32,
    /// A `.`, `!` or `?` follows this word.
    pub ends_sentence: bool,
}

impl Token {
    pub fn new(surface: impl Into<String>, index: usize) -> Self {
        let surface = surface.into();
        Self {
            text: surface.to_ascii_lowercase(),
            surface,
            index,
            exclamations: 0,
            questions: 0,
            ends_sentence: false,
        }
    }

    /// Builder-style helper, mostly for tests: attach trailing punctuation.
    pub fn with_trailing(mut self, punct: &str) -> Self {
        for ch in punct.chars() {
            self.push_punct(ch);
        }
        self
    }

    /// Two or more letters, all upper-case.
    pub fn is_all_caps(&self) -> bool {
        self.surface.len() >= 2 && self.surface.chars().all(|c| c.is_ascii_uppercase())
    }

    fn push_punct(&mut self, ch: char) {
        match ch {
            '!' => {
                self.exclamations += 1;
                self.ends_sentence = true;
            }
            '?' => {
                self.questions += 1;
                self.ends_sentence = true;
            }
            '.' => self.ends_sentence = true,
            _ => {}
        }
    }
}

/// Steps 1–3: remove URLs, mention/hashtag runs, and any character that is
/// not a letter, whitespace, or one of `. ! ? ,`. Case is preserved.
pub fn strip_noise(text: &str) -> String {
    let out = RE_URL.replace_all(text, "");
    let out = RE_TAGS.replace_all(&out, "");
    RE_NOISE.replace_all(&out, "").into_owned()
}

/// Steps 1–5: the cleaned, lower-cased, whitespace-collapsed text.
pub fn clean_text(text: &str) -> String {
    let lowered = strip_noise(text).to_lowercase();
    RE_WS.replace_all(&lowered, " ").trim().to_string()
}

/// Full pipeline: clean, then split into word tokens. Pure and total;
/// empty or punctuation-only input yields an empty sequence.
pub fn normalize_and_tokenize(text: &str) -> Vec<Token> {
    let stripped = strip_noise(text);
    let mut tokens: Vec<Token> = Vec::new();
    let mut word = String::new();

    for ch in stripped.chars() {
        if ch.is_ascii_alphabetic() {
            word.push(ch);
            continue;
        }
        if !word.is_empty() {
            let index = tokens.len();
            tokens.push(Token::new(std::mem::take(&mut word), index));
        }
        // Punctuation before the first word has nothing to attach to.
        if let Some(last) = tokens.last_mut() {
            last.push_punct(ch);
        }
    }
    if !word.is_empty() {
        let index = tokens.len();
        tokens.push(Token::new(word, index));
    }

    tokens
}
