//! Feedback status values.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::FeedbackError;

/// Status of a feedback item.
///
/// Owned by a [`crate::Feedback`] and changed only through the status
/// lifecycle, which records every change as a [`crate::StatusEvent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackStatus {
    /// Freshly submitted, not yet looked at
    New,
    /// Reviewed and classified
    Triaged,
    /// Being worked on
    InProgress,
    /// Addressed; content is frozen
    Resolved,
    /// Declined
    Rejected,
}

impl FeedbackStatus {
    /// Every status, in declaration order.
    pub const ALL: [FeedbackStatus; 5] = [
        FeedbackStatus::New,
        FeedbackStatus::Triaged,
        FeedbackStatus::InProgress,
        FeedbackStatus::Resolved,
        FeedbackStatus::Rejected,
    ];

    /// Wire/storage representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            FeedbackStatus::New => "new",
            FeedbackStatus::Triaged => "triaged",
            FeedbackStatus::InProgress => "in_progress",
            FeedbackStatus::Resolved => "resolved",
            FeedbackStatus::Rejected => "rejected",
        }
    }

    /// Whether the item still counts as open work.
    pub fn is_open(&self) -> bool {
        matches!(
            self,
            FeedbackStatus::New | FeedbackStatus::Triaged | FeedbackStatus::InProgress
        )
    }

    /// Position in [`FeedbackStatus::ALL`]; used to index transition tables.
    pub fn index(&self) -> usize {
        match self {
            FeedbackStatus::New => 0,
            FeedbackStatus::Triaged => 1,
            FeedbackStatus::InProgress => 2,
            FeedbackStatus::Resolved => 3,
            FeedbackStatus::Rejected => 4,
        }
    }
}

impl std::fmt::Display for FeedbackStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FeedbackStatus {
    type Err = FeedbackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "new" => Ok(FeedbackStatus::New),
            "triaged" => Ok(FeedbackStatus::Triaged),
            "in_progress" => Ok(FeedbackStatus::InProgress),
            "resolved" => Ok(FeedbackStatus::Resolved),
            "rejected" => Ok(FeedbackStatus::Rejected),
            other => Err(FeedbackError::UnknownStatus(other.to_string())),
        }
    }
}
