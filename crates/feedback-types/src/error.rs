//! Error types shared across the feedback engine.

use thiserror::Error;

/// Unified error type for shared type and configuration handling.
#[derive(Debug, Error)]
pub enum FeedbackError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Unknown status string
    #[error("Unknown feedback status: {0}")]
    UnknownStatus(String),

    /// Unknown sentiment label string
    #[error("Unknown sentiment label: {0}")]
    UnknownLabel(String),

    /// Invalid input error
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
