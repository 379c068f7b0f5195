//! Storage layer error types.

use feedback_types::FeedbackId;
use thiserror::Error;

/// Errors that can occur in the storage layer
#[derive(Error, Debug)]
pub enum StorageError {
    /// RocksDB operation failed
    #[error("RocksDB error: {0}")]
    RocksDb(#[from] rocksdb::Error),

    /// Column family not found
    #[error("Column family not found: {0}")]
    ColumnFamilyNotFound(String),

    /// Key encoding/decoding error
    #[error("Key error: {0}")]
    Key(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Feedback not found
    #[error("Feedback not found: {0}")]
    NotFound(FeedbackId),

    /// Feedback id already taken
    #[error("Feedback already exists: {0}")]
    AlreadyExists(FeedbackId),

    /// Write based on a stale revision
    #[error("Conflict on feedback {feedback_id}: stored revision {stored_revision}, write carries {revision}")]
    Conflict {
        feedback_id: FeedbackId,
        stored_revision: u32,
        revision: u32,
    },

    /// Row and event do not describe the same change
    #[error("Inconsistent write: {0}")]
    Inconsistent(String),
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        StorageError::Serialization(err.to_string())
    }
}
