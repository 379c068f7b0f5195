//! Status audit events.
//!
//! A status event is an immutable record of one status change. The events of
//! a feedback item, ordered by `sequence`, reconstruct its full status
//! history: the first event is always `(None -> New)` and every later event's
//! `old_status` equals the previous event's `new_status`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::feedback::{FeedbackId, UserId};
use crate::status::FeedbackStatus;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusEvent {
    pub feedback_id: FeedbackId,

    /// 0 for the creation event, then +1 per transition
    pub sequence: u32,

    /// `None` only for the creation event
    pub old_status: Option<FeedbackStatus>,

    pub new_status: FeedbackStatus,

    /// Actor that requested the change
    pub changed_by: UserId,

    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
}

impl StatusEvent {
    /// Whether this is the event written together with the feedback item.
    pub fn is_creation(&self) -> bool {
        self.old_status.is_none()
    }

    /// Whether the event records a same-state request.
    pub fn is_noop(&self) -> bool {
        self.old_status == Some(self.new_status)
    }

    /// Serialize to JSON bytes for storage.
    pub fn to_bytes(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }

    /// Deserialize from JSON bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }
}
