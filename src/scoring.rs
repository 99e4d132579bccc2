//! # Scoring Engine
//! Turns tokens into bounded compound scores using lexicon valences plus
//! rule-based adjustments (negation, degree modifiers, emphasis).
//!
//! Order per token: lookup → negation → degree → emphasis → saturate.
//!
//! Context (negation scope, preceding modifier, caps differential) is
//! resolved up front into read-only [`TokenContext`] values, so the per-token
//! step [`score_with_context`] is pure and can be fanned out freely.

use crate::classify::{classify, Label};
use crate::lexicon::Lexicon;
use crate::normalize::Token;
use crate::rules::{Degree, Heuristics};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

static DEFAULT_HEURISTICS: Lazy<Heuristics> = Lazy::new(Heuristics::english);

/// How much surrounding context a token sees.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoringMode {
    /// Negation and degree modifiers look back over the whole sequence.
    #[default]
    Contextual,
    /// Every token is scored alone, as a one-word text.
    Isolated,
}

/// Per-class share of a word's sentiment. Always sums to 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ClassScores {
    #[serde(rename = "POSITIVE")]
    pub positive: f64,
    #[serde(rename = "NEGATIVE")]
    pub negative: f64,
    #[serde(rename = "NEUTRAL")]
    pub neutral: f64,
}

impl ClassScores {
    pub fn from_compound(compound: f64) -> Self {
        Self {
            positive: compound.max(0.0),
            negative: (-compound).max(0.0),
            neutral: 1.0 - compound.abs(),
        }
    }

    pub fn sum(&self) -> f64 {
        self.positive + self.negative + self.neutral
    }
}

/// Scored word. Built once by the engine and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WordScore {
    pub word: String,
    pub index: usize,
    pub compound: f64,
    pub scores: ClassScores,
    #[serde(rename = "dominant_sentiment")]
    pub label: Label,
    pub confidence: f64,
}

impl WordScore {
    fn new(token: &Token, compound: f64) -> Self {
        Self {
            word: token.text.clone(),
            index: token.index,
            compound,
            scores: ClassScores::from_compound(compound),
            label: classify(compound),
            confidence: compound.abs(),
        }
    }
}

/// Read-only look-back facts for one token.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TokenContext {
    pub negated: bool,
    pub degree: Option<Degree>,
    /// Token is ALL-CAPS inside mixed-case text.
    pub caps_emphasis: bool,
}

/// Largest magnitude a compound score may take; keeps scores strictly inside (-1, 1).
pub const MAX_COMPOUND: f64 = 1.0 - f64::EPSILON;

/// Saturate an unbounded valence into (-1, 1).
///
/// `hypot` avoids squaring, so huge finite valences saturate instead of overflowing.
#[inline]
pub fn normalize_valence(valence: f64, alpha: f64) -> f64 {
    if valence.is_nan() {
        return 0.0;
    }
    if valence.is_infinite() {
        return MAX_COMPOUND.copysign(valence);
    }
    (valence / valence.hypot(alpha.sqrt())).clamp(-MAX_COMPOUND, MAX_COMPOUND)
}

/// Addition that saturates at `±f64::MAX` instead of reaching infinity.
#[inline]
fn add_finite(a: f64, b: f64) -> f64 {
    let s = a + b;
    if s.is_finite() {
        s
    } else {
        f64::MAX.copysign(s)
    }
}

/// Resolve look-back context for every token in `tokens`.
pub fn resolve_contexts(tokens: &[Token], heuristics: &Heuristics) -> Vec<TokenContext> {
    let mixed_case = tokens.iter().any(|t| !t.is_all_caps());
    (0..tokens.len())
        .map(|i| TokenContext {
            negated: negated_at(tokens, i, heuristics),
            degree: preceding_degree(tokens, i, heuristics),
            caps_emphasis: mixed_case && tokens[i].is_all_caps(),
        })
        .collect()
}

fn negated_at(tokens: &[Token], i: usize, h: &Heuristics) -> bool {
    for k in 1..=h.negation_window {
        let Some(j) = i.checked_sub(k) else {
            break;
        };
        let prev = &tokens[j];
        // Punctuation after `prev` sits between it and the current token.
        if prev.ends_sentence {
            break;
        }
        if h.is_negation(&prev.text) {
            return true;
        }
    }
    false
}

fn preceding_degree(tokens: &[Token], i: usize, h: &Heuristics) -> Option<Degree> {
    let prev = &tokens[i.checked_sub(1)?];
    if prev.ends_sentence {
        return None;
    }
    h.degree_of(&prev.text)
}

fn emphasis(token: &Token, caps: bool, h: &Heuristics) -> f64 {
    let bangs = token.exclamations.min(h.max_exclamations) as f64 * h.exclamation_increment;
    let questions = match token.questions {
        0 | 1 => 0.0,
        n @ 2..=3 => n as f64 * h.question_increment,
        _ => h.question_flood_increment,
    };
    let shout = if caps { h.caps_increment } else { 0.0 };
    (bangs + questions + shout).min(h.max_emphasis)
}

/// Lexicon valence after negation, degree and emphasis, before saturation.
pub fn adjusted_valence(
    token: &Token,
    ctx: &TokenContext,
    lexicon: &Lexicon,
    h: &Heuristics,
) -> f64 {
    // Modifiers only act on their neighbour.
    if h.degree_of(&token.text).is_some() {
        return 0.0;
    }
    let mut v = lexicon.lookup(&token.text).unwrap_or(0.0);
    if v == 0.0 {
        return 0.0;
    }
    if ctx.negated {
        v *= h.negation_factor;
    }
    if let Some(degree) = ctx.degree {
        v *= h.degree_multiplier(degree);
    }
    add_finite(v, emphasis(token, ctx.caps_emphasis, h) * v.signum())
}

/// Score one token given its pre-resolved context.
pub fn score_with_context(
    token: &Token,
    ctx: &TokenContext,
    lexicon: &Lexicon,
    h: &Heuristics,
) -> WordScore {
    let v = adjusted_valence(token, ctx, lexicon, h);
    WordScore::new(token, normalize_valence(v, h.alpha))
}

/// Score a token on its own with the default English rules.
pub fn score_token(token: &Token, lexicon: &Lexicon) -> WordScore {
    score_token_with(token, lexicon, &DEFAULT_HEURISTICS)
}

pub fn score_token_with(token: &Token, lexicon: &Lexicon, h: &Heuristics) -> WordScore {
    score_with_context(token, &TokenContext::default(), lexicon, h)
}

fn contexts_for(tokens: &[Token], h: &Heuristics, mode: ScoringMode) -> Vec<TokenContext> {
    match mode {
        ScoringMode::Contextual => resolve_contexts(tokens, h),
        // A one-word text has no look-back and no caps differential.
        ScoringMode::Isolated => vec![TokenContext::default(); tokens.len()],
    }
}

/// Score a whole sequence, one `WordScore` per token in the same order.
pub fn score_tokens(
    tokens: &[Token],
    lexicon: &Lexicon,
    h: &Heuristics,
    mode: ScoringMode,
) -> Vec<WordScore> {
    let contexts = contexts_for(tokens, h, mode);
    tokens
        .iter()
        .zip(&contexts)
        .map(|(tok, ctx)| score_with_context(tok, ctx, lexicon, h))
        .collect()
}

/// Text-level polarity: saturated sum of adjusted valences plus the
/// positive / negative / neutral proportions of sentiment mass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DocumentScore {
    pub compound: f64,
    pub positive: f64,
    pub negative: f64,
    pub neutral: f64,
    pub label: Label,
}

impl DocumentScore {
    fn empty() -> Self {
        Self {
            compound: 0.0,
            positive: 0.0,
            negative: 0.0,
            neutral: 1.0,
            label: Label::Neutral,
        }
    }
}

pub fn score_document(
    tokens: &[Token],
    lexicon: &Lexicon,
    h: &Heuristics,
    mode: ScoringMode,
) -> DocumentScore {
    if tokens.is_empty() {
        return DocumentScore::empty();
    }
    let contexts = contexts_for(tokens, h, mode);

    let mut sum = 0.0;
    let mut pos_mass = 0.0;
    let mut neg_mass = 0.0;
    let mut neu_mass = 0.0;
    for (tok, ctx) in tokens.iter().zip(&contexts) {
        let v = adjusted_valence(tok, ctx, lexicon, h);
        sum = add_finite(sum, v);
        if v > 0.0 {
            pos_mass = add_finite(pos_mass, v + 1.0);
        } else if v < 0.0 {
            neg_mass = add_finite(neg_mass, v.abs() + 1.0);
        } else {
            neu_mass += 1.0;
        }
    }

    let total = add_finite(add_finite(pos_mass, neg_mass), neu_mass);
    let compound = normalize_valence(sum, h.alpha);
    DocumentScore {
        compound,
        positive: pos_mass / total,
        negative: neg_mass / total,
        neutral: neu_mass / total,
        label: classify(compound),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::normalize_and_tokenize;

    fn lex() -> Lexicon {
        Lexicon::from_entries([("love", 3.2), ("hate", -2.7), ("good", 1.9), ("bad", -2.5)])
            .unwrap()
    }

    fn contextual(text: &str) -> Vec<WordScore> {
        let h = Heuristics::english();
        score_tokens(&normalize_and_tokenize(text), &lex(), &h, ScoringMode::Contextual)
    }

    #[test]
    fn single_word_matches_saturation_formula() {
        let s = score_token(&Token::new("love", 0), &lex());
        let expected = 3.2 / (3.2f64 * 3.2 + 15.0).sqrt();
        assert!((s.compound - expected).abs() < 1e-12);
        assert_eq!(s.label, Label::Positive);
        assert_eq!(s.confidence, s.compound.abs());
    }

    #[test]
    fn unknown_word_is_neutral_with_zero_confidence() {
        let s = score_token(&Token::new("table", 4), &lex());
        assert_eq!(s.compound, 0.0);
        assert_eq!(s.confidence, 0.0);
        assert_eq!(s.label, Label::Neutral);
        assert_eq!(s.scores.neutral, 1.0);
        assert_eq!(s.index, 4);
    }

    #[test]
    fn negation_inverts_within_window() {
        let s = contextual("this is not very good");
        let good = &s[4];
        assert_eq!(good.label, Label::Negative);
        let expected = normalize_valence(1.9 * -0.74 * 1.293, 15.0);
        assert!((good.compound - expected).abs() < 1e-12);
    }

    #[test]
    fn negation_out_of_window_or_across_sentence_is_ignored() {
        let far = contextual("not that it was ever good");
        assert_eq!(far[5].label, Label::Positive);

        let split = contextual("not. good");
        assert_eq!(split[1].label, Label::Positive);
    }

    #[test]
    fn comma_does_not_stop_negation() {
        let s = contextual("no, good");
        assert_eq!(s[1].label, Label::Negative);
    }

    #[test]
    fn booster_and_diminisher_scale_magnitude() {
        let plain = contextual("good")[0].compound;
        let boosted = contextual("very good")[1].compound;
        let damped = contextual("slightly good")[1].compound;
        assert!(boosted > plain);
        assert!(damped < plain && damped > 0.0);
        assert_eq!(contextual("very good")[0].compound, 0.0, "booster itself is neutral");
    }

    #[test]
    fn exclamation_and_caps_add_emphasis() {
        let plain = contextual("bad")[0].compound;
        let bang = contextual("bad!!")[0].compound;
        assert!(bang < plain, "emphasis pushes negatives further down");

        let shout = contextual("that is BAD")[2].compound;
        assert!(shout < plain);
        // All-caps text has no caps differential.
        let all_caps = contextual("THAT IS BAD")[2].compound;
        assert!((all_caps - plain).abs() < 1e-12);
    }

    #[test]
    fn emphasis_is_capped() {
        let h = Heuristics::english();
        let tok = Token::new("GOOD", 0).with_trailing("!!!!!!!????");
        let ctx = TokenContext {
            caps_emphasis: true,
            ..Default::default()
        };
        let v = adjusted_valence(&tok, &ctx, &lex(), &h);
        assert!((v - (1.9 + h.max_emphasis)).abs() < 1e-12);
    }

    #[test]
    fn single_question_mark_adds_nothing() {
        let one = contextual("good?")[0].compound;
        let three = contextual("good???")[0].compound;
        assert_eq!(one, contextual("good")[0].compound);
        assert!(three > one);
    }

    #[test]
    fn isolated_mode_ignores_context() {
        let h = Heuristics::english();
        let toks = normalize_and_tokenize("not good");
        let iso = score_tokens(&toks, &lex(), &h, ScoringMode::Isolated);
        assert_eq!(iso[1].label, Label::Positive);
        assert_eq!(iso[1], score_token(&toks[1], &lex()));
    }

    #[test]
    fn huge_valences_saturate_without_overflow() {
        let lex = Lexicon::from_entries([("huge", 1e200), ("big", 1e9), ("dire", -1e300)]).unwrap();
        let huge = score_token(&Token::new("huge", 0), &lex);
        assert_eq!(huge.label, Label::Positive);
        assert!(huge.compound > 0.99 && huge.compound < 1.0);

        let big = score_token(&Token::new("big", 0), &lex);
        assert!(big.compound < 1.0);
        assert!(big.scores.neutral > 0.0);

        let dire = score_token(&Token::new("dire", 0).with_trailing("!!!!"), &lex);
        assert_eq!(dire.label, Label::Negative);
        assert!(dire.compound > -1.0);

        assert!(normalize_valence(1e155, 15.0) > 0.99);
        assert_eq!(normalize_valence(f64::INFINITY, 15.0), MAX_COMPOUND);
    }

    #[test]
    fn extreme_rule_table_stays_finite() {
        let lex = Lexicon::from_entries([("huge", 1e300)]).unwrap();
        let h = Heuristics {
            booster_multiplier: 1e300,
            ..Heuristics::english()
        };
        let toks = normalize_and_tokenize("very huge huge huge");
        let words = score_tokens(&toks, &lex, &h, ScoringMode::Contextual);
        assert!(words.iter().all(|w| w.compound.abs() < 1.0));

        let doc = score_document(&toks, &lex, &h, ScoringMode::Contextual);
        assert_eq!(doc.label, Label::Positive);
        assert!(doc.compound < 1.0);
        for share in [doc.positive, doc.negative, doc.neutral] {
            assert!(share.is_finite());
        }
        assert!((doc.positive + doc.negative + doc.neutral - 1.0).abs() < 1e-9);
    }

    #[test]
    fn class_scores_sum_to_one() {
        for c in [-0.99, -0.5, -0.05, 0.0, 0.03, 0.7, 0.999] {
            let s = ClassScores::from_compound(c);
            assert!((s.sum() - 1.0).abs() < 1e-12);
            assert!(s.neutral >= 0.0);
        }
    }

    #[test]
    fn document_score_mixes_polarities() {
        let h = Heuristics::english();
        let toks = normalize_and_tokenize("I love this! I hate that.");
        let doc = score_document(&toks, &lex(), &h, ScoringMode::Contextual);
        let expected = normalize_valence(3.2 - 2.7, 15.0);
        assert!((doc.compound - expected).abs() < 1e-12);
        assert!((doc.positive + doc.negative + doc.neutral - 1.0).abs() < 1e-12);
        assert!(doc.positive > doc.negative);
        assert_eq!(doc.label, Label::Positive);
    }

    #[test]
    fn empty_document_is_neutral() {
        let doc = score_document(&[], &lex(), &Heuristics::english(), ScoringMode::Contextual);
        assert_eq!(doc.compound, 0.0);
        assert_eq!(doc.neutral, 1.0);
        assert_eq!(doc.label, Label::Neutral);
    }
}
