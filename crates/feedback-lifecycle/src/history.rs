//! Status history reconstructed from audit events.

use feedback_types::{FeedbackStatus, StatusEvent};

use crate::error::LifecycleError;

/// Verified, sequence-ordered event chain of one feedback item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusHistory {
    events: Vec<StatusEvent>,
}

impl StatusHistory {
    /// Order events by sequence and verify the chain.
    ///
    /// The first event must be `(None -> NEW)` at sequence 0, sequences must
    /// be contiguous, all events must belong to one item, and each
    /// `old_status` must equal the previous `new_status`.
    pub fn from_events(mut events: Vec<StatusEvent>) -> Result<Self, LifecycleError> {
        events.sort_by_key(|e| e.sequence);

        let Some(first) = events.first() else {
            return Err(LifecycleError::BrokenAuditTrail("no events".to_string()));
        };
        if first.sequence != 0 || first.old_status.is_some() || first.new_status != FeedbackStatus::New
        {
            return Err(LifecycleError::BrokenAuditTrail(format!(
                "history of feedback {} does not start with creation",
                first.feedback_id
            )));
        }

        for pair in events.windows(2) {
            let (prev, next) = (&pair[0], &pair[1]);
            if next.feedback_id != prev.feedback_id {
                return Err(LifecycleError::BrokenAuditTrail(format!(
                    "events of feedback {} and {} mixed",
                    prev.feedback_id, next.feedback_id
                )));
            }
            if next.sequence != prev.sequence + 1 {
                return Err(LifecycleError::BrokenAuditTrail(format!(
                    "sequence gap after {} for feedback {}",
                    prev.sequence, prev.feedback_id
                )));
            }
            if next.old_status != Some(prev.new_status) {
                return Err(LifecycleError::BrokenAuditTrail(format!(
                    "event {} of feedback {} does not chain from {}",
                    next.sequence, next.feedback_id, prev.new_status
                )));
            }
        }

        Ok(Self { events })
    }

    pub fn events(&self) -> &[StatusEvent] {
        &self.events
    }

    /// (old, new) pairs in order, starting with `(None, NEW)`.
    pub fn transitions(&self) -> Vec<(Option<FeedbackStatus>, FeedbackStatus)> {
        self.events
            .iter()
            .map(|e| (e.old_status, e.new_status))
            .collect()
    }

    /// Status after the latest event.
    pub fn current(&self) -> FeedbackStatus {
        self.events
            .last()
            .map(|e| e.new_status)
            .unwrap_or(FeedbackStatus::New)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use FeedbackStatus::*;

    fn event(seq: u32, old: Option<FeedbackStatus>, new: FeedbackStatus) -> StatusEvent {
        StatusEvent {
            feedback_id: 4,
            sequence: seq,
            old_status: old,
            new_status: new,
            changed_by: 1,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_valid_chain_in_any_input_order() {
        let history = StatusHistory::from_events(vec![
            event(2, Some(Triaged), Resolved),
            event(0, None, New),
            event(1, Some(New), Triaged),
        ])
        .unwrap();
        assert_eq!(
            history.transitions(),
            vec![(None, New), (Some(New), Triaged), (Some(Triaged), Resolved)]
        );
        assert_eq!(history.current(), Resolved);
        assert_eq!(history.len(), 3);
    }

    #[test]
    fn test_empty_is_broken() {
        assert!(StatusHistory::from_events(vec![]).is_err());
    }

    #[test]
    fn test_missing_creation_is_broken() {
        let result = StatusHistory::from_events(vec![event(0, Some(New), Triaged)]);
        assert!(matches!(result, Err(LifecycleError::BrokenAuditTrail(_))));
    }

    #[test]
    fn test_gap_is_broken() {
        let result = StatusHistory::from_events(vec![
            event(0, None, New),
            event(2, Some(New), Triaged),
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_chain_mismatch_is_broken() {
        let result = StatusHistory::from_events(vec![
            event(0, None, New),
            event(1, Some(Triaged), Resolved),
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_mixed_items_are_broken() {
        let mut other = event(1, Some(New), Triaged);
        other.feedback_id = 5;
        assert!(StatusHistory::from_events(vec![event(0, None, New), other]).is_err());
    }
}
