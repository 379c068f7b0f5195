//! Status lifecycle of a feedback item.
//!
//! Every status request, including a same-state no-op, yields the updated
//! item together with exactly one [`StatusEvent`]. The caller persists both
//! atomically; nothing here performs I/O.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use feedback_sentiment::SentimentScorer;
use feedback_types::{
    Feedback, FeedbackId, FeedbackStatus, LifecycleConfig, StatusEvent, UserId,
};

use crate::error::LifecycleError;
use crate::transitions::TransitionTable;

/// Content of a feedback item before it exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewFeedback {
    pub id: FeedbackId,
    pub user_id: UserId,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub category_id: Option<u64>,
    #[serde(default)]
    pub tag_ids: Vec<u64>,
}

/// Content changes requested by the owner.
///
/// Absent or empty fields leave the current value in place.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeedbackEdit {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

impl FeedbackEdit {
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }
}

/// Governs status changes and content edits.
#[derive(Debug, Clone, Default)]
pub struct StatusLifecycle {
    table: TransitionTable,
}

impl StatusLifecycle {
    pub fn new(table: TransitionTable) -> Self {
        Self { table }
    }

    pub fn from_config(config: &LifecycleConfig) -> Self {
        Self::new(TransitionTable::from_config(config))
    }

    pub fn table(&self) -> &TransitionTable {
        &self.table
    }

    /// Create a feedback item in NEW together with its creation event.
    ///
    /// The sentiment is scored from the title and content.
    pub fn create(
        &self,
        new: NewFeedback,
        scorer: &SentimentScorer,
        at: DateTime<Utc>,
    ) -> Result<(Feedback, StatusEvent), LifecycleError> {
        if new.title.trim().is_empty() {
            return Err(LifecycleError::InvalidFeedback("title is required".to_string()));
        }

        let sentiment = scorer.score_feedback(&new.title, &new.content);
        let feedback = Feedback {
            id: new.id,
            user_id: new.user_id,
            title: new.title,
            content: new.content,
            category_id: new.category_id,
            tag_ids: new.tag_ids,
            status: FeedbackStatus::New,
            sentiment,
            created_at: at,
            updated_at: at,
            resolved_at: None,
            revision: 0,
        };
        let event = StatusEvent {
            feedback_id: feedback.id,
            sequence: 0,
            old_status: None,
            new_status: FeedbackStatus::New,
            changed_by: feedback.user_id,
            created_at: at,
        };

        debug!(feedback_id = feedback.id, sentiment = %feedback.sentiment.label, "Created feedback");
        Ok((feedback, event))
    }

    /// Apply a status change at the current time.
    pub fn apply_transition(
        &self,
        feedback: &Feedback,
        new_status: FeedbackStatus,
        actor: UserId,
    ) -> Result<(Feedback, StatusEvent), LifecycleError> {
        self.apply_transition_at(feedback, new_status, actor, Utc::now())
    }

    /// Apply a status change at `at`.
    ///
    /// Entering RESOLVED stamps `resolved_at`; leaving it clears the stamp;
    /// RESOLVED -> RESOLVED keeps the original stamp.
    #[instrument(skip(self, feedback), fields(feedback_id = feedback.id, old_status = %feedback.status))]
    pub fn apply_transition_at(
        &self,
        feedback: &Feedback,
        new_status: FeedbackStatus,
        actor: UserId,
        at: DateTime<Utc>,
    ) -> Result<(Feedback, StatusEvent), LifecycleError> {
        let old_status = feedback.status;
        if !self.table.allows(old_status, new_status) {
            return Err(LifecycleError::TransitionNotAllowed {
                from: old_status,
                to: new_status,
            });
        }

        let sequence = feedback.revision.checked_add(1).ok_or_else(|| {
            LifecycleError::BrokenAuditTrail(format!(
                "feedback {} exhausted its event sequence",
                feedback.id
            ))
        })?;

        let resolved_at = match (old_status, new_status) {
            (FeedbackStatus::Resolved, FeedbackStatus::Resolved) => feedback.resolved_at.or(Some(at)),
            (_, FeedbackStatus::Resolved) => Some(at),
            _ => None,
        };

        let updated = Feedback {
            status: new_status,
            resolved_at,
            revision: sequence,
            updated_at: at,
            ..feedback.clone()
        };
        let event = StatusEvent {
            feedback_id: feedback.id,
            sequence,
            old_status: Some(old_status),
            new_status,
            changed_by: actor,
            created_at: at,
        };

        debug!(new_status = %new_status, sequence, "Applied status transition");
        Ok((updated, event))
    }

    /// Apply a content edit and rescore sentiment.
    ///
    /// Score and label are always recomputed together from the final
    /// title and content.
    pub fn apply_edit(
        &self,
        feedback: &Feedback,
        edit: FeedbackEdit,
        scorer: &SentimentScorer,
        at: DateTime<Utc>,
    ) -> Result<Feedback, LifecycleError> {
        if !feedback.is_editable() {
            return Err(LifecycleError::EditRejected {
                feedback_id: feedback.id,
                status: feedback.status,
            });
        }

        let mut updated = feedback.clone();
        if let Some(title) = edit.title.filter(|t| !t.is_empty()) {
            updated.title = title;
        }
        if let Some(content) = edit.content.filter(|c| !c.is_empty()) {
            updated.content = content;
        }
        updated.sentiment = scorer.score_feedback(&updated.title, &updated.content);
        updated.updated_at = at;

        debug!(feedback_id = feedback.id, sentiment = %updated.sentiment.label, "Edited feedback");
        Ok(updated)
    }

    /// Resolved feedback is kept for the record.
    pub fn ensure_deletable(&self, feedback: &Feedback) -> Result<(), LifecycleError> {
        if feedback.status == FeedbackStatus::Resolved {
            return Err(LifecycleError::DeleteRejected {
                feedback_id: feedback.id,
                status: feedback.status,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use feedback_types::SentimentLabel;
    use FeedbackStatus::*;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    fn new_feedback(title: &str, content: &str) -> NewFeedback {
        NewFeedback {
            id: 1,
            user_id: 10,
            title: title.to_string(),
            content: content.to_string(),
            category_id: Some(2),
            tag_ids: vec![1, 3],
        }
    }

    fn created() -> Feedback {
        StatusLifecycle::default()
            .create(
                new_feedback("Slow dashboard", "Charts take forever"),
                &SentimentScorer::default(),
                t0(),
            )
            .unwrap()
            .0
    }

    #[test]
    fn test_create_writes_initial_event() {
        let (feedback, event) = StatusLifecycle::default()
            .create(
                new_feedback("Login keeps failing", "The login is broken"),
                &SentimentScorer::default(),
                t0(),
            )
            .unwrap();

        assert_eq!(feedback.status, New);
        assert_eq!(feedback.revision, 0);
        assert_eq!(feedback.sentiment.label, SentimentLabel::Negative);
        assert_eq!(feedback.tag_ids, vec![1, 3]);
        assert_eq!(event.old_status, None);
        assert_eq!(event.new_status, New);
        assert_eq!(event.sequence, 0);
        assert_eq!(event.changed_by, 10);
    }

    #[test]
    fn test_create_requires_title() {
        let result = StatusLifecycle::default().create(
            new_feedback("   ", "body"),
            &SentimentScorer::default(),
            t0(),
        );
        assert!(matches!(result, Err(LifecycleError::InvalidFeedback(_))));
    }

    #[test]
    fn test_new_in_progress_resolved_scenario() {
        let lifecycle = StatusLifecycle::default();
        let (feedback, created_event) = lifecycle
            .create(
                new_feedback("Export", "CSV export please"),
                &SentimentScorer::default(),
                t0(),
            )
            .unwrap();
        assert!(feedback.resolved_at.is_none());

        let (feedback, second) = lifecycle
            .apply_transition_at(&feedback, InProgress, 99, t0() + Duration::hours(1))
            .unwrap();
        assert!(feedback.resolved_at.is_none());

        let resolved_time = t0() + Duration::hours(5);
        let (feedback, third) = lifecycle
            .apply_transition_at(&feedback, Resolved, 99, resolved_time)
            .unwrap();

        let pairs: Vec<_> = [created_event, second, third]
            .iter()
            .map(|e| (e.old_status, e.new_status, e.sequence))
            .collect();
        assert_eq!(
            pairs,
            vec![
                (None, New, 0),
                (Some(New), InProgress, 1),
                (Some(InProgress), Resolved, 2)
            ]
        );
        assert_eq!(feedback.resolved_at, Some(resolved_time));
        assert_eq!(feedback.revision, 2);
        assert!((feedback.resolution_hours().unwrap() - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_leaving_resolved_clears_timestamp() {
        let lifecycle = StatusLifecycle::default();
        let (resolved, _) = lifecycle
            .apply_transition_at(&created(), Resolved, 99, t0())
            .unwrap();
        let (reopened, event) = lifecycle
            .apply_transition_at(&resolved, New, 99, t0() + Duration::hours(2))
            .unwrap();
        assert_eq!(reopened.status, New);
        assert!(reopened.resolved_at.is_none());
        assert_eq!(event.old_status, Some(Resolved));
    }

    #[test]
    fn test_resolved_noop_keeps_timestamp_and_records_event() {
        let lifecycle = StatusLifecycle::default();
        let (resolved, _) = lifecycle
            .apply_transition_at(&created(), Resolved, 99, t0())
            .unwrap();
        let (again, event) = lifecycle
            .apply_transition_at(&resolved, Resolved, 99, t0() + Duration::days(1))
            .unwrap();
        assert_eq!(again.resolved_at, Some(t0()));
        assert!(event.is_noop());
        assert_eq!(event.sequence, 2);
    }

    #[test]
    fn test_noop_on_open_status_still_appends() {
        let (same, event) = StatusLifecycle::default()
            .apply_transition_at(&created(), New, 99, t0())
            .unwrap();
        assert_eq!(same.status, New);
        assert_eq!(same.revision, 1);
        assert_eq!(event.old_status, Some(New));
        assert_eq!(event.new_status, New);
    }

    #[test]
    fn test_restricted_table_rejects() {
        let lifecycle = StatusLifecycle::new(TransitionTable::with_denied([(Resolved, New)]));
        let (resolved, _) = lifecycle
            .apply_transition_at(&created(), Resolved, 99, t0())
            .unwrap();
        let result = lifecycle.apply_transition_at(&resolved, New, 99, t0());
        assert_eq!(
            result.unwrap_err(),
            LifecycleError::TransitionNotAllowed {
                from: Resolved,
                to: New
            }
        );
    }

    #[test]
    fn test_edit_rescores_sentiment() {
        let lifecycle = StatusLifecycle::default();
        let feedback = created();
        let edited = lifecycle
            .apply_edit(
                &feedback,
                FeedbackEdit::default().content("Now it is fast and smooth, great work"),
                &SentimentScorer::default(),
                t0() + Duration::minutes(5),
            )
            .unwrap();
        assert_eq!(edited.title, "Slow dashboard");
        assert_eq!(edited.sentiment.label, SentimentLabel::Positive);
        assert_eq!(edited.updated_at, t0() + Duration::minutes(5));
        assert_eq!(edited.revision, feedback.revision);
    }

    #[test]
    fn test_empty_edit_fields_are_ignored() {
        let edited = StatusLifecycle::default()
            .apply_edit(
                &created(),
                FeedbackEdit::default().title("").content(""),
                &SentimentScorer::default(),
                t0(),
            )
            .unwrap();
        assert_eq!(edited.title, "Slow dashboard");
        assert_eq!(edited.content, "Charts take forever");
    }

    #[test]
    fn test_resolved_feedback_is_frozen() {
        let lifecycle = StatusLifecycle::default();
        let (resolved, _) = lifecycle
            .apply_transition_at(&created(), Resolved, 99, t0())
            .unwrap();

        let edit = lifecycle.apply_edit(
            &resolved,
            FeedbackEdit::default().title("New title"),
            &SentimentScorer::default(),
            t0(),
        );
        assert!(matches!(edit, Err(LifecycleError::EditRejected { .. })));
        assert!(matches!(
            lifecycle.ensure_deletable(&resolved),
            Err(LifecycleError::DeleteRejected { .. })
        ));
    }

    #[test]
    fn test_rejected_feedback_is_editable_and_deletable() {
        let lifecycle = StatusLifecycle::default();
        let (rejected, _) = lifecycle
            .apply_transition_at(&created(), Rejected, 99, t0())
            .unwrap();
        assert!(lifecycle.ensure_deletable(&rejected).is_ok());
        assert!(lifecycle
            .apply_edit(&rejected, FeedbackEdit::default(), &SentimentScorer::default(), t0())
            .is_ok());
    }
}
