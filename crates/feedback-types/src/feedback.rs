//! Feedback record and scoring input.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::sentiment::SentimentResult;
use crate::status::FeedbackStatus;

/// Identifier of a feedback item.
pub type FeedbackId = u64;

/// Identifier of a user (submitter or administrator).
pub type UserId = u64;

/// Scoring and clustering input: title and body joined by a single space.
///
/// Never mutated; build a new one when the source content changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackText(String);

impl FeedbackText {
    pub fn new(title: &str, content: &str) -> Self {
        Self(format!("{} {}", title, content))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for FeedbackText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A feedback item as held by the collaborator store.
///
/// `status`, `resolved_at` and `revision` are owned by the status lifecycle:
/// they change only together with a newly appended status event, and
/// `revision` always equals the sequence number of the latest event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feedback {
    pub id: FeedbackId,
    pub user_id: UserId,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub category_id: Option<u64>,
    #[serde(default)]
    pub tag_ids: Vec<u64>,
    pub status: FeedbackStatus,
    pub sentiment: SentimentResult,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub updated_at: DateTime<Utc>,
    #[serde(default, with = "chrono::serde::ts_milliseconds_option")]
    pub resolved_at: Option<DateTime<Utc>>,
    /// Sequence number of the most recent status event (0 = creation)
    #[serde(default)]
    pub revision: u32,
}

impl Feedback {
    /// Scoring/clustering input for this item.
    pub fn text(&self) -> FeedbackText {
        FeedbackText::new(&self.title, &self.content)
    }

    /// Whether the submitter may still change title/content.
    pub fn is_editable(&self) -> bool {
        self.status != FeedbackStatus::Resolved
    }

    /// Hours between creation and resolution, if resolved.
    pub fn resolution_hours(&self) -> Option<f64> {
        self.resolved_at
            .map(|resolved| (resolved - self.created_at).num_milliseconds() as f64 / 3_600_000.0)
    }
}
