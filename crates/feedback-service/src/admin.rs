//! Administrator curation: responses and category/tag reassignment.
//!
//! None of these touch status, sentiment or the audit trail.

use chrono::Utc;
use tracing::{info, instrument};

use feedback_types::{Actor, AdminResponse, Feedback, FeedbackId};

use crate::error::ServiceError;
use crate::service::{ensure_admin, ensure_owner_or_admin, FeedbackService};

impl FeedbackService {
    /// Attach a response note to an item. Admin only.
    #[instrument(skip(self, message), fields(admin_id = actor.id))]
    pub async fn respond(
        &self,
        actor: &Actor,
        id: FeedbackId,
        message: &str,
    ) -> Result<AdminResponse, ServiceError> {
        ensure_admin(actor)?;
        let message = message.trim();
        if message.is_empty() {
            return Err(ServiceError::BadRequest("message is required".to_string()));
        }

        let response = self.storage.add_response(id, actor.id, message, Utc::now())?;
        info!(feedback_id = id, response_id = response.id, "Response added");
        Ok(response)
    }

    /// Responses to an item, oldest first. Owner or admin only.
    pub async fn responses(
        &self,
        actor: &Actor,
        id: FeedbackId,
    ) -> Result<Vec<AdminResponse>, ServiceError> {
        let feedback = self.load(id)?;
        ensure_owner_or_admin(actor, &feedback, "view")?;
        Ok(self.storage.responses(id)?)
    }

    /// Move an item to another category. Admin only.
    #[instrument(skip(self), fields(admin_id = actor.id))]
    pub async fn update_category(
        &self,
        actor: &Actor,
        id: FeedbackId,
        category_id: u64,
    ) -> Result<Feedback, ServiceError> {
        ensure_admin(actor)?;
        if category_id == 0 {
            return Err(ServiceError::BadRequest("category id must be positive".to_string()));
        }

        let mut feedback = self.load(id)?;
        feedback.category_id = Some(category_id);
        feedback.updated_at = Utc::now();
        self.storage.update_feedback(&feedback)?;

        info!(feedback_id = id, category_id, "Category updated");
        Ok(feedback)
    }

    /// Replace the tags of an item. Admin only; an empty list clears them.
    #[instrument(skip(self, tag_ids), fields(admin_id = actor.id))]
    pub async fn update_tags(
        &self,
        actor: &Actor,
        id: FeedbackId,
        mut tag_ids: Vec<u64>,
    ) -> Result<Feedback, ServiceError> {
        ensure_admin(actor)?;
        if tag_ids.contains(&0) {
            return Err(ServiceError::BadRequest("tag ids must be positive".to_string()));
        }
        tag_ids.sort_unstable();
        tag_ids.dedup();

        let mut feedback = self.load(id)?;
        feedback.tag_ids = tag_ids;
        feedback.updated_at = Utc::now();
        self.storage.update_feedback(&feedback)?;

        info!(feedback_id = id, tags = ?feedback.tag_ids, "Tags updated");
        Ok(feedback)
    }
}
