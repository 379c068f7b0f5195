//! # feedback-topics
//!
//! Topic discovery over a feedback corpus.
//!
//! Documents are weighted with TF-IDF over unigrams and bigrams, partitioned
//! with seeded k-means, and each non-empty cluster is labeled from the
//! strongest terms of its centroid.
//!
//! ## Features
//! - Stop-word removal, document-frequency pruning, vocabulary cap
//! - k-means++ seeding with restarts, reproducible for a fixed seed
//! - Keyword labels and example documents per cluster
//! - LRU cache keyed by corpus fingerprint and k
//!
//! Degenerate input (a corpus smaller than k, or no shared vocabulary)
//! yields an empty list rather than an error.

pub mod cache;
pub mod clusterer;
pub mod error;
pub mod kmeans;
pub mod labeling;
pub mod similarity;
pub mod tfidf;

pub use cache::{fingerprint, ClusterCache, CorpusFingerprint};
pub use clusterer::TopicClusterer;
pub use error::TopicsError;
pub use kmeans::{KMeans, KMeansConfig, KMeansFit};
pub use labeling::{KeywordLabeler, LabelingConfig, TopicLabel, TopicLabeler, UNKNOWN_TOPIC};
pub use tfidf::{TfIdfMatrix, TfIdfVectorizer, VectorizerConfig};
