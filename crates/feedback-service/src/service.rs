//! Feedback request handling.
//!
//! Composes the engine (scorer, clusterer, lifecycle) with storage:
//! - Ownership and role checks before any engine call
//! - Atomic persistence of status changes with their audit events
//! - Cluster cache invalidation on every content change

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use feedback_lifecycle::{FeedbackEdit, NewFeedback, StatusHistory, StatusLifecycle};
use feedback_sentiment::{Lexicon, SentimentScorer};
use feedback_storage::Storage;
use feedback_topics::{ClusterCache, TopicClusterer};
use feedback_types::{Actor, Feedback, FeedbackId, FeedbackStatus, Settings};

use crate::error::ServiceError;

/// Feedback submission from a user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateFeedbackRequest {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub category_id: Option<u64>,
    #[serde(default)]
    pub tag_ids: Vec<u64>,
}

impl CreateFeedbackRequest {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            ..Default::default()
        }
    }
}

/// Filter for [`FeedbackService::list_feedback`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackFilter {
    #[serde(default)]
    pub status: Option<FeedbackStatus>,
    #[serde(default)]
    pub category_id: Option<u64>,
}

/// Request layer over the feedback engine and its store.
pub struct FeedbackService {
    pub(crate) storage: Arc<Storage>,
    pub(crate) scorer: Arc<SentimentScorer>,
    pub(crate) clusterer: Arc<TopicClusterer>,
    pub(crate) lifecycle: StatusLifecycle,
    pub(crate) cache: Arc<ClusterCache>,
}

impl FeedbackService {
    /// Build the engine from settings over an open store.
    pub fn new(storage: Arc<Storage>, settings: &Settings) -> Result<Self, ServiceError> {
        let scorer = SentimentScorer::new(Arc::new(Lexicon::feedback()), settings.sentiment.clone());
        let clusterer = TopicClusterer::new(settings.clustering.clone())?;
        Ok(Self {
            storage,
            scorer: Arc::new(scorer),
            clusterer: Arc::new(clusterer),
            lifecycle: StatusLifecycle::from_config(&settings.lifecycle),
            cache: Arc::new(ClusterCache::new(settings.clustering.cache_capacity)),
        })
    }

    /// Service with default settings.
    pub fn with_defaults(storage: Arc<Storage>) -> Result<Self, ServiceError> {
        Self::new(storage, &Settings::default())
    }

    pub fn storage(&self) -> &Arc<Storage> {
        &self.storage
    }

    pub fn scorer(&self) -> &SentimentScorer {
        &self.scorer
    }

    pub fn cache(&self) -> &ClusterCache {
        &self.cache
    }

    /// Submit new feedback owned by `actor`.
    #[instrument(skip(self, request), fields(user_id = actor.id))]
    pub async fn create_feedback(
        &self,
        actor: &Actor,
        request: CreateFeedbackRequest,
    ) -> Result<Feedback, ServiceError> {
        self.create_feedback_at(actor, request, Utc::now())
    }

    pub(crate) fn create_feedback_at(
        &self,
        actor: &Actor,
        request: CreateFeedbackRequest,
        at: DateTime<Utc>,
    ) -> Result<Feedback, ServiceError> {
        if request.title.trim().is_empty() {
            return Err(ServiceError::BadRequest("title is required".to_string()));
        }

        let id = self.storage.next_feedback_id()?;
        let new = NewFeedback {
            id,
            user_id: actor.id,
            title: request.title,
            content: request.content,
            category_id: request.category_id,
            tag_ids: request.tag_ids,
        };
        let (feedback, event) = self.lifecycle.create(new, &self.scorer, at)?;
        self.storage.insert_feedback(&feedback, &event)?;
        self.cache.invalidate();

        info!(
            feedback_id = feedback.id,
            sentiment = %feedback.sentiment.label,
            score = feedback.sentiment.score,
            "Feedback created"
        );
        Ok(feedback)
    }

    /// Fetch one item. Owner or admin only.
    pub async fn get_feedback(&self, actor: &Actor, id: FeedbackId) -> Result<Feedback, ServiceError> {
        let feedback = self.load(id)?;
        ensure_owner_or_admin(actor, &feedback, "view")?;
        Ok(feedback)
    }

    /// Items visible to `actor`, newest first.
    ///
    /// Admins see every item, users only their own.
    pub async fn list_feedback(
        &self,
        actor: &Actor,
        filter: FeedbackFilter,
    ) -> Result<Vec<Feedback>, ServiceError> {
        let mut items: Vec<Feedback> = self
            .storage
            .list_feedback()?
            .into_iter()
            .filter(|f| actor.is_admin() || f.user_id == actor.id)
            .filter(|f| filter.status.map_or(true, |s| f.status == s))
            .filter(|f| filter.category_id.map_or(true, |c| f.category_id == Some(c)))
            .collect();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(items)
    }

    /// Edit title/content. Owner only; resolved items are frozen.
    #[instrument(skip(self, edit), fields(user_id = actor.id))]
    pub async fn update_feedback(
        &self,
        actor: &Actor,
        id: FeedbackId,
        edit: FeedbackEdit,
    ) -> Result<Feedback, ServiceError> {
        let feedback = self.load(id)?;
        ensure_owner(actor, &feedback, "update")?;

        let updated = self.lifecycle.apply_edit(&feedback, edit, &self.scorer, Utc::now())?;
        self.storage.update_feedback(&updated)?;
        self.cache.invalidate();

        debug!(feedback_id = id, sentiment = %updated.sentiment.label, "Feedback updated");
        Ok(updated)
    }

    /// Delete an item, its audit trail and its responses. Owner only;
    /// resolved items are kept.
    ///
    /// The delete is bound to the revision the checks ran against, so a
    /// status change committed in between fails with a storage conflict.
    #[instrument(skip(self), fields(user_id = actor.id))]
    pub async fn delete_feedback(&self, actor: &Actor, id: FeedbackId) -> Result<(), ServiceError> {
        let feedback = self.load(id)?;
        ensure_owner(actor, &feedback, "delete")?;
        self.lifecycle.ensure_deletable(&feedback)?;

        let deleted = self.storage.delete_feedback(id, feedback.revision)?;
        self.cache.invalidate();

        info!(
            feedback_id = id,
            events = deleted.events,
            responses = deleted.responses,
            "Feedback deleted"
        );
        Ok(())
    }

    /// Change the status of an item. Admin only.
    ///
    /// The updated item and its audit event are written in one batch.
    #[instrument(skip(self), fields(admin_id = actor.id))]
    pub async fn update_status(
        &self,
        actor: &Actor,
        id: FeedbackId,
        status: FeedbackStatus,
    ) -> Result<Feedback, ServiceError> {
        ensure_admin(actor)?;
        self.update_status_at(actor, id, status, Utc::now())
    }

    pub(crate) fn update_status_at(
        &self,
        actor: &Actor,
        id: FeedbackId,
        status: FeedbackStatus,
        at: DateTime<Utc>,
    ) -> Result<Feedback, ServiceError> {
        let feedback = self.load(id)?;
        let (updated, event) = self
            .lifecycle
            .apply_transition_at(&feedback, status, actor.id, at)?;
        self.storage.commit_transition(&updated, &event)?;

        info!(
            feedback_id = id,
            old_status = %feedback.status,
            new_status = %updated.status,
            sequence = event.sequence,
            "Status changed"
        );
        Ok(updated)
    }

    /// Verified status history of an item. Owner or admin only.
    pub async fn history(&self, actor: &Actor, id: FeedbackId) -> Result<StatusHistory, ServiceError> {
        let feedback = self.load(id)?;
        ensure_owner_or_admin(actor, &feedback, "view")?;
        let events = self.storage.status_events(id)?;
        Ok(StatusHistory::from_events(events)?)
    }

    pub(crate) fn load(&self, id: FeedbackId) -> Result<Feedback, ServiceError> {
        self.storage
            .get_feedback(id)?
            .ok_or(ServiceError::NotFound(id))
    }
}

pub(crate) fn ensure_admin(actor: &Actor) -> Result<(), ServiceError> {
    if actor.is_admin() {
        Ok(())
    } else {
        Err(ServiceError::Forbidden("admin role required".to_string()))
    }
}

fn ensure_owner(actor: &Actor, feedback: &Feedback, action: &str) -> Result<(), ServiceError> {
    if feedback.user_id == actor.id {
        Ok(())
    } else {
        Err(ServiceError::Forbidden(format!(
            "not authorized to {action} feedback {}",
            feedback.id
        )))
    }
}

pub(crate) fn ensure_owner_or_admin(
    actor: &Actor,
    feedback: &Feedback,
    action: &str,
) -> Result<(), ServiceError> {
    if actor.is_admin() {
        return Ok(());
    }
    ensure_owner(actor, feedback, action)
}

#[cfg(test)]
mod tests {
    use super::*;
    use feedback_lifecycle::LifecycleError;
    use feedback_types::SentimentLabel;
    use tempfile::TempDir;

    fn create_test_service() -> (FeedbackService, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let storage = Storage::open(temp_dir.path()).unwrap();
        let service = FeedbackService::with_defaults(Arc::new(storage)).unwrap();
        (service, temp_dir)
    }

    const USER: Actor = Actor {
        id: 7,
        role: feedback_types::Role::User,
    };
    const OTHER: Actor = Actor {
        id: 8,
        role: feedback_types::Role::User,
    };
    const ADMIN: Actor = Actor {
        id: 1,
        role: feedback_types::Role::Admin,
    };

    #[tokio::test]
    async fn test_create_scores_and_records_creation_event() {
        let (service, _temp) = create_test_service();
        let feedback = service
            .create_feedback(
                &USER,
                CreateFeedbackRequest::new(
                    "Broken export",
                    "The CSV export is broken and loses rows.",
                ),
            )
            .await
            .unwrap();

        assert_eq!(feedback.id, 1);
        assert_eq!(feedback.user_id, USER.id);
        assert_eq!(feedback.status, FeedbackStatus::New);
        assert_eq!(feedback.sentiment.label, SentimentLabel::Negative);

        let history = service.history(&USER, feedback.id).await.unwrap();
        assert_eq!(history.transitions(), vec![(None, FeedbackStatus::New)]);
    }

    #[tokio::test]
    async fn test_create_requires_title() {
        let (service, _temp) = create_test_service();
        let result = service
            .create_feedback(&USER, CreateFeedbackRequest::new("  ", "content"))
            .await;
        assert!(matches!(result, Err(ServiceError::BadRequest(_))));
        assert!(service.storage().list_feedback().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_checks_in_order() {
        let (service, _temp) = create_test_service();
        let fb = service
            .create_feedback(&USER, CreateFeedbackRequest::new("Dark mode", "Please add it"))
            .await
            .unwrap();

        let missing = service
            .update_feedback(&USER, 99, FeedbackEdit::default().title("x"))
            .await;
        assert!(matches!(missing, Err(ServiceError::NotFound(99))));

        let foreign = service
            .update_feedback(&OTHER, fb.id, FeedbackEdit::default().title("x"))
            .await;
        assert!(matches!(foreign, Err(ServiceError::Forbidden(_))));

        // Admins do not own the item either
        let admin = service
            .update_feedback(&ADMIN, fb.id, FeedbackEdit::default().title("x"))
            .await;
        assert!(matches!(admin, Err(ServiceError::Forbidden(_))));

        service
            .update_status(&ADMIN, fb.id, FeedbackStatus::Resolved)
            .await
            .unwrap();
        let frozen = service
            .update_feedback(&USER, fb.id, FeedbackEdit::default().title("x"))
            .await;
        assert!(matches!(
            frozen,
            Err(ServiceError::Lifecycle(LifecycleError::EditRejected { .. }))
        ));
    }

    #[tokio::test]
    async fn test_edit_rescores() {
        let (service, _temp) = create_test_service();
        let fb = service
            .create_feedback(&USER, CreateFeedbackRequest::new("Checkout", "It works"))
            .await
            .unwrap();

        let updated = service
            .update_feedback(
                &USER,
                fb.id,
                FeedbackEdit::default().content("Checkout is terrible now"),
            )
            .await
            .unwrap();
        assert_eq!(updated.title, "Checkout");
        assert_eq!(updated.sentiment.label, SentimentLabel::Negative);
        assert_eq!(
            service.storage().get_feedback(fb.id).unwrap().unwrap(),
            updated
        );
    }

    #[tokio::test]
    async fn test_update_status_requires_admin() {
        let (service, _temp) = create_test_service();
        let fb = service
            .create_feedback(&USER, CreateFeedbackRequest::new("Slow", "Pages load slowly"))
            .await
            .unwrap();

        let denied = service
            .update_status(&USER, fb.id, FeedbackStatus::Triaged)
            .await;
        assert!(matches!(denied, Err(ServiceError::Forbidden(_))));

        let missing = service
            .update_status(&ADMIN, 42, FeedbackStatus::Triaged)
            .await;
        assert!(matches!(missing, Err(ServiceError::NotFound(42))));
    }

    #[tokio::test]
    async fn test_status_sequence_builds_history() {
        let (service, _temp) = create_test_service();
        let fb = service
            .create_feedback(&USER, CreateFeedbackRequest::new("Login", "Cannot sign in"))
            .await
            .unwrap();

        let in_progress = service
            .update_status(&ADMIN, fb.id, FeedbackStatus::InProgress)
            .await
            .unwrap();
        assert!(in_progress.resolved_at.is_none());

        let resolved = service
            .update_status(&ADMIN, fb.id, FeedbackStatus::Resolved)
            .await
            .unwrap();
        assert!(resolved.resolved_at.is_some());

        let history = service.history(&ADMIN, fb.id).await.unwrap();
        assert_eq!(
            history.transitions(),
            vec![
                (None, FeedbackStatus::New),
                (Some(FeedbackStatus::New), FeedbackStatus::InProgress),
                (Some(FeedbackStatus::InProgress), FeedbackStatus::Resolved),
            ]
        );
        assert_eq!(history.events()[2].changed_by, ADMIN.id);

        let reopened = service
            .update_status(&ADMIN, fb.id, FeedbackStatus::New)
            .await
            .unwrap();
        assert!(reopened.resolved_at.is_none());
    }

    #[tokio::test]
    async fn test_same_state_request_is_audited() {
        let (service, _temp) = create_test_service();
        let fb = service
            .create_feedback(&USER, CreateFeedbackRequest::new("Docs", "More examples"))
            .await
            .unwrap();
        service
            .update_status(&ADMIN, fb.id, FeedbackStatus::New)
            .await
            .unwrap();
        let history = service.history(&USER, fb.id).await.unwrap();
        assert_eq!(history.len(), 2);
        assert!(history.events()[1].is_noop());
    }

    #[tokio::test]
    async fn test_delete_rules() {
        let (service, _temp) = create_test_service();
        let fb = service
            .create_feedback(&USER, CreateFeedbackRequest::new("Typo", "On the pricing page"))
            .await
            .unwrap();

        assert!(matches!(
            service.delete_feedback(&OTHER, fb.id).await,
            Err(ServiceError::Forbidden(_))
        ));

        service.delete_feedback(&USER, fb.id).await.unwrap();
        assert!(matches!(
            service.get_feedback(&USER, fb.id).await,
            Err(ServiceError::NotFound(_))
        ));
        assert!(service.storage().status_events(fb.id).unwrap().is_empty());

        let kept = service
            .create_feedback(&USER, CreateFeedbackRequest::new("Fixed", "Thanks"))
            .await
            .unwrap();
        service
            .update_status(&ADMIN, kept.id, FeedbackStatus::Resolved)
            .await
            .unwrap();
        assert!(matches!(
            service.delete_feedback(&USER, kept.id).await,
            Err(ServiceError::Lifecycle(LifecycleError::DeleteRejected { .. }))
        ));
    }

    #[tokio::test]
    async fn test_visibility() {
        let (service, _temp) = create_test_service();
        let mine = service
            .create_feedback(&USER, CreateFeedbackRequest::new("Mine", "a"))
            .await
            .unwrap();
        service
            .create_feedback(&OTHER, CreateFeedbackRequest::new("Theirs", "b"))
            .await
            .unwrap();

        assert!(matches!(
            service.get_feedback(&OTHER, mine.id).await,
            Err(ServiceError::Forbidden(_))
        ));
        assert_eq!(service.get_feedback(&ADMIN, mine.id).await.unwrap().id, mine.id);

        let own = service
            .list_feedback(&USER, FeedbackFilter::default())
            .await
            .unwrap();
        assert_eq!(own.len(), 1);
        let all = service
            .list_feedback(&ADMIN, FeedbackFilter::default())
            .await
            .unwrap();
        assert_eq!(all.len(), 2);

        service
            .update_status(&ADMIN, mine.id, FeedbackStatus::Triaged)
            .await
            .unwrap();
        let triaged = service
            .list_feedback(
                &ADMIN,
                FeedbackFilter {
                    status: Some(FeedbackStatus::Triaged),
                    category_id: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(triaged.len(), 1);
        assert_eq!(triaged[0].id, mine.id);
    }
}
