//! Lexicon construction errors.

use thiserror::Error;

/// Errors raised while building a [`crate::Lexicon`].
///
/// Scoring itself never fails; only construction validates its input.
#[derive(Debug, Error, PartialEq)]
pub enum LexiconError {
    /// Word would never survive tokenization intact
    #[error("Word is not a single token: {0:?}")]
    NotAToken(String),

    /// Word placed in both override sets
    #[error("Word is both strong-negative and strong-positive: {0}")]
    ConflictingOverride(String),

    /// Weight is NaN or infinite
    #[error("Invalid weight for {word}: {weight}")]
    InvalidWeight { word: String, weight: f64 },
}
