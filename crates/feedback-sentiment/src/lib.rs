//! # feedback-sentiment
//!
//! Rule-based sentiment scoring for feedback text.
//!
//! A [`Lexicon`] maps lowercase words to signed valence weights (a generic
//! base dictionary merged with product/feedback vocabulary) and carries the
//! negation, intensifier and strong-override word sets. The
//! [`SentimentScorer`] turns text into a compound score in [-1.0, 1.0] and a
//! label that always agrees with it.
//!
//! ## Features
//! - Valence shifting: negation flips and dampens, boosters scale
//! - Contrastive "but" and exclamation emphasis
//! - Compressive normalization `x / sqrt(x^2 + alpha)`
//! - Strong override words dominate threshold labeling
//!
//! ```
//! use feedback_sentiment::SentimentScorer;
//! use feedback_types::SentimentLabel;
//!
//! let scorer = SentimentScorer::default();
//! let result = scorer.score_and_label("This feature is excellent and works beautifully. Love it!");
//! assert_eq!(result.label, SentimentLabel::Positive);
//! assert!(result.score > 0.0);
//! ```

pub mod dictionary;
pub mod error;
pub mod lexicon;
pub mod scorer;
pub mod tokenize;

pub use error::LexiconError;
pub use lexicon::{Lexicon, LexiconBuilder};
pub use scorer::{ScoredWord, SentimentAnalysis, SentimentScorer};
pub use tokenize::tokenize;
