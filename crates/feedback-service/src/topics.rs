//! Topic clustering over the stored corpus.

use std::sync::Arc;

use tracing::{info, instrument};

use feedback_types::{Actor, CorpusDocument, TopicCluster};

use crate::error::ServiceError;
use crate::service::{ensure_admin, FeedbackService};

/// Smallest accepted cluster count.
pub const MIN_TOPICS: usize = 2;

/// Largest accepted cluster count.
pub const MAX_TOPICS: usize = 20;

impl FeedbackService {
    /// Cluster all stored feedback into at most `k` topics. Admin only.
    ///
    /// Clustering runs on the blocking pool. Results are memoized per
    /// corpus snapshot and `k`; an empty list means there is not enough data.
    #[instrument(skip(self), fields(admin_id = actor.id))]
    pub async fn topics(
        &self,
        actor: &Actor,
        k: usize,
    ) -> Result<Arc<Vec<TopicCluster>>, ServiceError> {
        ensure_admin(actor)?;
        if !(MIN_TOPICS..=MAX_TOPICS).contains(&k) {
            return Err(ServiceError::BadRequest(format!(
                "k must be between {MIN_TOPICS} and {MAX_TOPICS}, got {k}"
            )));
        }

        let corpus: Vec<CorpusDocument> = self
            .storage
            .list_feedback()?
            .iter()
            .map(CorpusDocument::from)
            .collect();
        let corpus_size = corpus.len();

        let clusterer = Arc::clone(&self.clusterer);
        let cache = Arc::clone(&self.cache);
        let clusters = tokio::task::spawn_blocking(move || {
            cache.get_or_compute(&corpus, k, || clusterer.cluster(&corpus, k))
        })
        .await
        .map_err(|e| ServiceError::Task(format!("Clustering task failed: {e}")))??;

        info!(k, corpus_size, cluster_count = clusters.len(), "Topics computed");
        Ok(clusters)
    }
}
