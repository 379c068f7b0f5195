//! Lexicon-based sentiment scoring.
//!
//! Scoring runs in three steps:
//! 1. Tokenize and sum word valences, shifting each sentiment word by the
//!    boosters, dampeners and negations among the three tokens before it
//! 2. Compress the raw sum into [-1.0, 1.0] with `x / sqrt(x^2 + alpha)`
//! 3. Derive the label: strong-negative words, then strong-positive words,
//!    then the closed-interval thresholds
//!
//! The scorer is a pure function of the text and its immutable lexicon.

use std::sync::Arc;

use serde::Serialize;
use tracing::trace;

use feedback_types::{SentimentConfig, SentimentLabel, SentimentResult};

use crate::lexicon::Lexicon;
use crate::tokenize::{exclamation_count, tokenize};

/// Multiplier applied per negation in the look-back window.
const NEGATION_SCALAR: f64 = -0.74;

/// Booster/dampener weight by distance (1, 2, 3 tokens back).
const SHIFTER_DECAY: [f64; 3] = [1.0, 0.95, 0.9];

/// Scaling around the first contrastive "but".
const BEFORE_BUT: f64 = 0.5;
const AFTER_BUT: f64 = 1.5;

/// Emphasis per exclamation mark, capped at four marks.
const EXCLAMATION_INCREMENT: f64 = 0.292;
const MAX_EXCLAMATIONS: usize = 4;

/// A lexicon word that contributed to the raw valence.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredWord {
    pub word: String,
    /// Contribution after shifting
    pub valence: f64,
}

/// Full breakdown of one scoring call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SentimentAnalysis {
    pub result: SentimentResult,
    /// Sum before normalization
    pub raw_valence: f64,
    pub matched: Vec<ScoredWord>,
    /// Override word that decided the label, if any
    pub override_word: Option<String>,
}

impl SentimentAnalysis {
    fn empty() -> Self {
        Self {
            result: SentimentResult::neutral(),
            raw_valence: 0.0,
            matched: Vec::new(),
            override_word: None,
        }
    }
}

/// Scores text against a shared [`Lexicon`].
#[derive(Debug, Clone)]
pub struct SentimentScorer {
    lexicon: Arc<Lexicon>,
    config: SentimentConfig,
}

impl SentimentScorer {
    pub fn new(lexicon: Arc<Lexicon>, config: SentimentConfig) -> Self {
        Self { lexicon, config }
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    pub fn config(&self) -> &SentimentConfig {
        &self.config
    }

    /// Compound score only.
    pub fn score(&self, text: &str) -> f64 {
        self.analyze(text).result.score
    }

    /// Score and label, derived together.
    pub fn score_and_label(&self, text: &str) -> SentimentResult {
        self.analyze(text).result
    }

    /// Score a feedback title and body as one text.
    pub fn score_feedback(&self, title: &str, content: &str) -> SentimentResult {
        self.score_and_label(feedback_types::FeedbackText::new(title, content).as_str())
    }

    /// Score and label with the contributing words.
    pub fn analyze(&self, text: &str) -> SentimentAnalysis {
        let tokens = tokenize(text);
        if tokens.is_empty() {
            return SentimentAnalysis::empty();
        }

        let mut contributions = self.shifted_valences(&tokens);
        apply_contrast(&tokens, &mut contributions);

        let mut raw_valence: f64 = contributions.iter().sum();
        if raw_valence != 0.0 {
            let marks = exclamation_count(text).min(MAX_EXCLAMATIONS);
            raw_valence += raw_valence.signum() * marks as f64 * EXCLAMATION_INCREMENT;
        }

        let score = self.normalize(raw_valence);
        let (label, override_word) = self.label_tokens(&tokens, score);

        let matched = tokens
            .iter()
            .zip(&contributions)
            .filter(|(_, v)| **v != 0.0)
            .map(|(word, &valence)| ScoredWord {
                word: word.clone(),
                valence,
            })
            .collect();

        trace!(raw_valence, score, label = %label, "Scored text");

        SentimentAnalysis {
            result: SentimentResult::new(score, label),
            raw_valence,
            matched,
            override_word,
        }
    }

    /// Label for a score when no override word is present.
    ///
    /// Both boundaries are inclusive.
    pub fn threshold_label(&self, score: f64) -> SentimentLabel {
        if score <= self.config.negative_threshold {
            SentimentLabel::Negative
        } else if score >= self.config.positive_threshold {
            SentimentLabel::Positive
        } else {
            SentimentLabel::Neutral
        }
    }

    /// Compress a raw valence sum into [-1.0, 1.0].
    pub fn normalize(&self, raw: f64) -> f64 {
        if raw == 0.0 {
            return 0.0;
        }
        let compound = raw / (raw * raw + self.config.normalization_alpha).sqrt();
        compound.clamp(-1.0, 1.0)
    }

    fn shifted_valences(&self, tokens: &[String]) -> Vec<f64> {
        tokens
            .iter()
            .enumerate()
            .map(|(i, token)| {
                if self.lexicon.shifter(token).is_some() {
                    return 0.0;
                }
                let Some(base) = self.lexicon.valence(token) else {
                    return 0.0;
                };

                let mut valence = base;
                let mut negations = 0;
                for (distance, decay) in SHIFTER_DECAY.iter().enumerate() {
                    let Some(prev) = i.checked_sub(distance + 1).map(|j| &tokens[j]) else {
                        break;
                    };
                    if let Some(increment) = self.lexicon.shifter(prev) {
                        valence = shift_magnitude(valence, increment * decay);
                    }
                    if self.lexicon.is_negation(prev) {
                        negations += 1;
                    }
                }
                valence * NEGATION_SCALAR.powi(negations)
            })
            .collect()
    }

    fn label_tokens(&self, tokens: &[String], score: f64) -> (SentimentLabel, Option<String>) {
        if let Some(word) = tokens.iter().find(|t| self.lexicon.is_strong_negative(t)) {
            return (SentimentLabel::Negative, Some(word.clone()));
        }
        if let Some(word) = tokens.iter().find(|t| self.lexicon.is_strong_positive(t)) {
            return (SentimentLabel::Positive, Some(word.clone()));
        }
        (self.threshold_label(score), None)
    }
}

impl Default for SentimentScorer {
    fn default() -> Self {
        Self::new(Arc::new(Lexicon::feedback()), SentimentConfig::default())
    }
}

/// Grow (or shrink, for a negative increment) the magnitude of a valence.
/// A dampener can reduce a word to zero but never flip its polarity.
fn shift_magnitude(valence: f64, increment: f64) -> f64 {
    let magnitude = (valence.abs() + increment).max(0.0);
    magnitude.copysign(valence)
}

/// Halve sentiment before the first "but" and amplify sentiment after it.
fn apply_contrast(tokens: &[String], contributions: &mut [f64]) {
    let Some(pivot) = tokens.iter().position(|t| t == "but") else {
        return;
    };
    for (i, value) in contributions.iter_mut().enumerate() {
        if i < pivot {
            *value *= BEFORE_BUT;
        } else if i > pivot {
            *value *= AFTER_BUT;
        }
    }
}
