//! # feedback-service
//!
//! Request layer of the feedback engine.
//!
//! Provides:
//! - Feedback create/edit/delete with ownership checks
//! - Admin status changes persisted atomically with their audit events
//! - Admin responses and category/tag reassignment
//! - Topic clustering over the stored corpus, memoized per snapshot
//! - Analytics: overview, volume, sentiment trends and breakdown
//! - Demo corpus seeding

pub mod admin;
pub mod analytics;
pub mod error;
pub mod seed;
pub mod service;
pub mod topics;

pub use analytics::{
    IdCount, OverviewStats, SentimentBreakdown, SentimentPoint, VolumePoint, MAX_WINDOW_DAYS,
};
pub use error::ServiceError;
pub use seed::{SampleFeedback, SeedOptions, SeedReport, CATEGORIES, SAMPLE_FEEDBACK, TAGS};
pub use service::{CreateFeedbackRequest, FeedbackFilter, FeedbackService};
pub use topics::{MAX_TOPICS, MIN_TOPICS};
