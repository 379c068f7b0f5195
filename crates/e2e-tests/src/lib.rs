//! End-to-end test infrastructure for the feedback engine.
//!
//! Provides a shared TestHarness and helper functions for E2E tests
//! covering submission, status lifecycle, clustering and analytics.

use std::sync::Arc;

use feedback_service::{CreateFeedbackRequest, FeedbackService, SeedOptions};
use feedback_storage::Storage;
use feedback_types::{Actor, Feedback, Settings};

/// Submitting user in E2E scenarios.
pub const USER: Actor = Actor {
    id: 2,
    role: feedback_types::Role::User,
};

/// Operator in E2E scenarios.
pub const ADMIN: Actor = Actor {
    id: 1,
    role: feedback_types::Role::Admin,
};

/// Shared test harness for E2E tests.
///
/// Owns a temp-dir RocksDB store and a service over it.
pub struct TestHarness {
    /// Keeps temp dir alive for the lifetime of the harness
    pub _temp_dir: tempfile::TempDir,
    /// Shared storage instance
    pub storage: Arc<Storage>,
    /// Service over `storage` with default settings
    pub service: FeedbackService,
}

impl TestHarness {
    /// Create a new test harness with default settings.
    pub fn new() -> Self {
        Self::with_settings(&Settings::default())
    }

    pub fn with_settings(settings: &Settings) -> Self {
        let temp_dir = tempfile::TempDir::new().expect("Failed to create temp dir");
        let storage =
            Arc::new(Storage::open(temp_dir.path()).expect("Failed to open test storage"));
        let service =
            FeedbackService::new(Arc::clone(&storage), settings).expect("Failed to build service");

        Self {
            _temp_dir: temp_dir,
            storage,
            service,
        }
    }

    /// A second service over the same store, as a restarted process would build.
    pub fn fresh_service(&self) -> FeedbackService {
        FeedbackService::with_defaults(Arc::clone(&self.storage)).expect("Failed to build service")
    }

    /// Submit feedback as [`USER`].
    pub async fn submit(&self, title: &str, content: &str) -> Feedback {
        self.service
            .create_feedback(&USER, CreateFeedbackRequest::new(title, content))
            .await
            .expect("Failed to submit feedback")
    }

    /// Load the demo corpus with a fixed RNG seed.
    pub async fn seed(&self) {
        self.service
            .seed_demo(&SeedOptions {
                user: USER,
                admin: ADMIN,
                rng_seed: 7,
            })
            .await
            .expect("Failed to seed demo corpus");
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}
