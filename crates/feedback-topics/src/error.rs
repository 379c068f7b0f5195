//! Topic error types.

use thiserror::Error;

/// Errors that can occur during topic clustering.
///
/// Degenerate corpora are not errors: they yield an empty cluster list.
#[derive(Debug, Error, PartialEq)]
pub enum TopicsError {
    /// Caller contract violation, such as k < 2
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
