//! Service layer error types.

use feedback_lifecycle::LifecycleError;
use feedback_storage::StorageError;
use feedback_topics::TopicsError;
use feedback_types::FeedbackId;
use thiserror::Error;

/// Errors returned by [`crate::FeedbackService`] operations.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// No feedback with this id
    #[error("Feedback not found: {0}")]
    NotFound(FeedbackId),

    /// Caller lacks ownership or role
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Request rejected before reaching the engine
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Lifecycle rule violated
    #[error("Lifecycle error: {0}")]
    Lifecycle(#[from] LifecycleError),

    /// Topic clustering failed
    #[error("Topics error: {0}")]
    Topics(#[from] TopicsError),

    /// Storage error
    #[error("Storage error: {0}")]
    Storage(StorageError),

    /// Background task panicked or was cancelled
    #[error("Task error: {0}")]
    Task(String),
}

impl ServiceError {
    /// Whether the caller can fix the request (maps to 4xx in an HTTP layer).
    pub fn is_client_error(&self) -> bool {
        match self {
            ServiceError::NotFound(_)
            | ServiceError::Forbidden(_)
            | ServiceError::BadRequest(_)
            | ServiceError::Topics(TopicsError::InvalidInput(_)) => true,
            ServiceError::Lifecycle(err) => !matches!(err, LifecycleError::BrokenAuditTrail(_)),
            _ => false,
        }
    }
}

impl From<StorageError> for ServiceError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound(id) => ServiceError::NotFound(id),
            other => ServiceError::Storage(other),
        }
    }
}
