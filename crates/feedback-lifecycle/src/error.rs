//! Lifecycle error types.

use feedback_types::{FeedbackId, FeedbackStatus};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LifecycleError {
    /// The transition table refuses this status change
    #[error("Transition not allowed: {from} -> {to}")]
    TransitionNotAllowed {
        from: FeedbackStatus,
        to: FeedbackStatus,
    },

    /// Resolved feedback cannot change its content
    #[error("Feedback {feedback_id} is {status} and cannot be edited")]
    EditRejected {
        feedback_id: FeedbackId,
        status: FeedbackStatus,
    },

    /// Resolved feedback cannot be deleted
    #[error("Feedback {feedback_id} is {status} and cannot be deleted")]
    DeleteRejected {
        feedback_id: FeedbackId,
        status: FeedbackStatus,
    },

    /// Required field missing or blank
    #[error("Invalid feedback: {0}")]
    InvalidFeedback(String),

    /// Event chain does not reconstruct a valid history
    #[error("Broken audit trail: {0}")]
    BrokenAuditTrail(String),
}
