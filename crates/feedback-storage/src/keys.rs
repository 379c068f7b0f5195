//! Key encoding and decoding for the storage layer.
//!
//! Numbers are zero-padded so that lexicographic key order equals numeric
//! order:
//! - feedback: `fb:{id:020}`
//! - status events: `se:{feedback_id:020}:{sequence:010}`
//! - admin responses: `ar:{feedback_id:020}:{id:020}`
//!
//! All events of one item share the `se:{feedback_id:020}:` prefix and scan
//! in sequence order; responses likewise scan in id order.

use feedback_types::{FeedbackId, ResponseId};

use crate::error::StorageError;

/// Meta key holding the next unallocated feedback id.
pub const NEXT_FEEDBACK_ID_KEY: &[u8] = b"meta:next_feedback_id";

/// Meta key holding the next unallocated response id.
pub const NEXT_RESPONSE_ID_KEY: &[u8] = b"meta:next_response_id";

/// Prefix shared by all feedback keys.
pub const FEEDBACK_PREFIX: &[u8] = b"fb:";

/// Key for a feedback row
/// Format: fb:{id:020}
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedbackKey {
    pub id: FeedbackId,
}

impl FeedbackKey {
    pub fn new(id: FeedbackId) -> Self {
        Self { id }
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        format!("fb:{:020}", self.id).into_bytes()
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, StorageError> {
        let s = std::str::from_utf8(bytes)
            .map_err(|e| StorageError::Key(format!("Invalid UTF-8: {}", e)))?;
        let id = s
            .strip_prefix("fb:")
            .ok_or_else(|| StorageError::Key(format!("Invalid feedback key format: {}", s)))?
            .parse()
            .map_err(|e| StorageError::Key(format!("Invalid feedback id: {}", e)))?;
        Ok(Self { id })
    }
}

/// Key for a status event
/// Format: se:{feedback_id:020}:{sequence:010}
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusEventKey {
    pub feedback_id: FeedbackId,
    pub sequence: u32,
}

impl StatusEventKey {
    pub fn new(feedback_id: FeedbackId, sequence: u32) -> Self {
        Self {
            feedback_id,
            sequence,
        }
    }

    /// Prefix covering every event of one feedback item.
    pub fn prefix(feedback_id: FeedbackId) -> Vec<u8> {
        format!("se:{:020}:", feedback_id).into_bytes()
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        format!("se:{:020}:{:010}", self.feedback_id, self.sequence).into_bytes()
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, StorageError> {
        let s = std::str::from_utf8(bytes)
            .map_err(|e| StorageError::Key(format!("Invalid UTF-8: {}", e)))?;
        let parts: Vec<&str> = s.split(':').collect();
        if parts.len() != 3 || parts[0] != "se" {
            return Err(StorageError::Key(format!(
                "Invalid status event key format: {}",
                s
            )));
        }
        let feedback_id = parts[1]
            .parse()
            .map_err(|e| StorageError::Key(format!("Invalid feedback id: {}", e)))?;
        let sequence = parts[2]
            .parse()
            .map_err(|e| StorageError::Key(format!("Invalid sequence: {}", e)))?;
        Ok(Self {
            feedback_id,
            sequence,
        })
    }
}

/// Key for an admin response
/// Format: ar:{feedback_id:020}:{id:020}
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResponseKey {
    pub feedback_id: FeedbackId,
    pub id: ResponseId,
}

impl ResponseKey {
    pub fn new(feedback_id: FeedbackId, id: ResponseId) -> Self {
        Self { feedback_id, id }
    }

    /// Prefix covering every response to one feedback item.
    pub fn prefix(feedback_id: FeedbackId) -> Vec<u8> {
        format!("ar:{:020}:", feedback_id).into_bytes()
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        format!("ar:{:020}:{:020}", self.feedback_id, self.id).into_bytes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feedback_key_format() {
        assert_eq!(FeedbackKey::new(42).to_bytes(), b"fb:00000000000000000042".to_vec());
        let decoded = FeedbackKey::from_bytes(&FeedbackKey::new(42).to_bytes()).unwrap();
        assert_eq!(decoded.id, 42);
    }

    #[test]
    fn test_feedback_key_lexicographic_order() {
        assert!(FeedbackKey::new(9).to_bytes() < FeedbackKey::new(10).to_bytes());
    }

    #[test]
    fn test_status_event_key_roundtrip() {
        let key = StatusEventKey::new(7, 3);
        assert_eq!(StatusEventKey::from_bytes(&key.to_bytes()).unwrap(), key);
    }

    #[test]
    fn test_status_event_prefix() {
        let key = StatusEventKey::new(7, 12);
        assert!(key.to_bytes().starts_with(&StatusEventKey::prefix(7)));
        // Item 70 must not fall under item 7's prefix
        assert!(!StatusEventKey::new(70, 0)
            .to_bytes()
            .starts_with(&StatusEventKey::prefix(7)));
        assert!(StatusEventKey::new(7, 2).to_bytes() < StatusEventKey::new(7, 10).to_bytes());
    }

    #[test]
    fn test_response_key_prefix() {
        let key = ResponseKey::new(7, 41);
        assert_eq!(key.to_bytes(), b"ar:00000000000000000007:00000000000000000041".to_vec());
        assert!(key.to_bytes().starts_with(&ResponseKey::prefix(7)));
        assert!(!ResponseKey::new(70, 1)
            .to_bytes()
            .starts_with(&ResponseKey::prefix(7)));
    }

    #[test]
    fn test_invalid_keys() {
        assert!(FeedbackKey::from_bytes(b"xx:1").is_err());
        assert!(StatusEventKey::from_bytes(b"se:1").is_err());
        assert!(StatusEventKey::from_bytes(b"se:a:b").is_err());
    }
}
