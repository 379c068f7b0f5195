//! # feedback-types
//!
//! Shared domain types for the feedback intelligence engine.
//!
//! This crate defines the data structures passed between the engine and
//! its collaborators:
//! - Feedback: the intake record and its status
//! - Status events: the append-only audit trail of status changes
//! - Admin responses: notes administrators attach to an item
//! - Sentiment results: bounded polarity score plus label
//! - Topic clusters: transient clustering output
//! - Settings: layered configuration for every engine component
//!
//! ## Usage
//!
//! ```rust
//! use feedback_types::{FeedbackStatus, FeedbackText};
//!
//! let text = FeedbackText::new("Login broken", "Cannot sign in");
//! assert_eq!(text.as_str(), "Login broken Cannot sign in");
//! assert!(FeedbackStatus::New.is_open());
//! ```

pub mod actor;
pub mod config;
pub mod error;
pub mod event;
pub mod feedback;
pub mod response;
pub mod sentiment;
pub mod status;
pub mod topic;

pub use actor::{Actor, Role};
pub use config::{
    ClusteringConfig, DeniedTransition, LifecycleConfig, Settings, SentimentConfig,
    TransitionPolicy,
};
pub use error::FeedbackError;
pub use event::StatusEvent;
pub use feedback::{Feedback, FeedbackId, FeedbackText, UserId};
pub use response::{AdminResponse, ResponseId};
pub use sentiment::{SentimentLabel, SentimentResult};
pub use status::FeedbackStatus;
pub use topic::{CorpusDocument, TopicCluster};
