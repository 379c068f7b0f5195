//! Administrator responses.
//!
//! A response is a note an administrator attaches to a feedback item. It
//! never changes the item itself and is removed together with it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::feedback::{FeedbackId, UserId};

/// Identifier of an administrator response.
pub type ResponseId = u64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminResponse {
    pub id: ResponseId,
    pub feedback_id: FeedbackId,
    pub admin_id: UserId,
    pub message: String,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
}

impl AdminResponse {
    /// Serialize to JSON bytes for storage.
    pub fn to_bytes(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }

    /// Deserialize from JSON bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_created_at_serializes_as_millis() {
        let response = AdminResponse {
            id: 3,
            feedback_id: 9,
            admin_id: 1,
            message: "Fixed in 2.4".to_string(),
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["created_at"], 1_704_067_200_000i64);
        assert_eq!(AdminResponse::from_bytes(&response.to_bytes().unwrap()).unwrap(), response);
    }
}
