//! Valence lexicon.
//!
//! The lexicon is assembled once through [`LexiconBuilder`] and is read-only
//! afterwards. There is no mutation API on [`Lexicon`], so it can be shared
//! across threads behind an `Arc` without locking.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::dictionary::{
    BASE_VALENCES, BOOSTERS, DAMPENERS, DOMAIN_VALENCES, NEGATIONS, STRONG_NEGATIVE,
    STRONG_POSITIVE,
};
use crate::error::LexiconError;
use crate::tokenize::tokenize;

/// Magnitude added (or removed) by an intensifier.
pub const BOOSTER_INCREMENT: f64 = 0.293;

/// Immutable word -> valence mapping plus shifter and override sets.
#[derive(Debug, Clone)]
pub struct Lexicon {
    valences: HashMap<String, f64>,
    /// Signed increment: positive for boosters, negative for dampeners
    shifters: HashMap<String, f64>,
    negations: HashSet<String>,
    strong_negative: HashSet<String>,
    strong_positive: HashSet<String>,
}

impl Lexicon {
    /// Base dictionary merged with feedback vocabulary and the default
    /// override sets.
    pub fn feedback() -> Self {
        LexiconBuilder::feedback().build_unchecked()
    }

    /// Valence weight of a word, if it carries sentiment.
    pub fn valence(&self, word: &str) -> Option<f64> {
        self.valences.get(word).copied()
    }

    /// Signed intensity increment of a booster/dampener.
    pub fn shifter(&self, word: &str) -> Option<f64> {
        self.shifters.get(word).copied()
    }

    pub fn is_negation(&self, word: &str) -> bool {
        self.negations.contains(word)
    }

    pub fn is_strong_negative(&self, word: &str) -> bool {
        self.strong_negative.contains(word)
    }

    pub fn is_strong_positive(&self, word: &str) -> bool {
        self.strong_positive.contains(word)
    }

    /// Number of words with a valence.
    pub fn len(&self) -> usize {
        self.valences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.valences.is_empty()
    }
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::feedback()
    }
}

/// Assembles a [`Lexicon`].
///
/// Later insertions of the same word replace earlier ones, which is how the
/// domain dictionary overrides the base dictionary.
#[derive(Debug, Clone, Default)]
pub struct LexiconBuilder {
    valences: HashMap<String, f64>,
    shifters: HashMap<String, f64>,
    negations: HashSet<String>,
    strong_negative: HashSet<String>,
    strong_positive: HashSet<String>,
}

impl LexiconBuilder {
    /// Empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder preloaded with the built-in feedback lexicon.
    pub fn feedback() -> Self {
        Self::new()
            .with_valences(BASE_VALENCES.iter().copied())
            .with_valences(DOMAIN_VALENCES.iter().copied())
            .with_negations(NEGATIONS.iter().copied())
            .with_boosters(BOOSTERS.iter().copied())
            .with_dampeners(DAMPENERS.iter().copied())
            .with_strong_negative(STRONG_NEGATIVE.iter().copied())
            .with_strong_positive(STRONG_POSITIVE.iter().copied())
    }

    pub fn with_valences<'a>(mut self, entries: impl IntoIterator<Item = (&'a str, f64)>) -> Self {
        for (word, weight) in entries {
            self.valences.insert(word.to_lowercase(), weight);
        }
        self
    }

    pub fn with_negations<'a>(mut self, words: impl IntoIterator<Item = &'a str>) -> Self {
        self.negations
            .extend(words.into_iter().map(str::to_lowercase));
        self
    }

    pub fn with_boosters<'a>(mut self, words: impl IntoIterator<Item = &'a str>) -> Self {
        for word in words {
            self.shifters.insert(word.to_lowercase(), BOOSTER_INCREMENT);
        }
        self
    }

    pub fn with_dampeners<'a>(mut self, words: impl IntoIterator<Item = &'a str>) -> Self {
        for word in words {
            self.shifters.insert(word.to_lowercase(), -BOOSTER_INCREMENT);
        }
        self
    }

    pub fn with_strong_negative<'a>(mut self, words: impl IntoIterator<Item = &'a str>) -> Self {
        self.strong_negative
            .extend(words.into_iter().map(str::to_lowercase));
        self
    }

    pub fn with_strong_positive<'a>(mut self, words: impl IntoIterator<Item = &'a str>) -> Self {
        self.strong_positive
            .extend(words.into_iter().map(str::to_lowercase));
        self
    }

    /// Validate and freeze the lexicon.
    ///
    /// Every word must tokenize to itself, weights must be finite, and the
    /// two override sets must be disjoint.
    pub fn build(self) -> Result<Lexicon, LexiconError> {
        let all_words = self
            .valences
            .keys()
            .chain(self.shifters.keys())
            .chain(self.negations.iter())
            .chain(self.strong_negative.iter())
            .chain(self.strong_positive.iter());
        for word in all_words {
            let tokens = tokenize(word);
            if tokens.len() != 1 || tokens[0] != *word {
                return Err(LexiconError::NotAToken(word.clone()));
            }
        }

        for (word, &weight) in &self.valences {
            if !weight.is_finite() {
                return Err(LexiconError::InvalidWeight {
                    word: word.clone(),
                    weight,
                });
            }
        }

        let mut overlap: Vec<&String> = self
            .strong_negative
            .intersection(&self.strong_positive)
            .collect();
        overlap.sort();
        if let Some(word) = overlap.first() {
            return Err(LexiconError::ConflictingOverride((*word).clone()));
        }

        Ok(self.build_unchecked())
    }

    fn build_unchecked(self) -> Lexicon {
        debug!(
            valences = self.valences.len(),
            shifters = self.shifters.len(),
            negations = self.negations.len(),
            "Built sentiment lexicon"
        );
        Lexicon {
            valences: self.valences,
            shifters: self.shifters,
            negations: self.negations,
            strong_negative: self.strong_negative,
            strong_positive: self.strong_positive,
        }
    }
}
