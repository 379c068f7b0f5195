//! # feedback-lifecycle
//!
//! Status governance for feedback items.
//!
//! [`StatusLifecycle`] validates status requests against an explicit
//! [`TransitionTable`], maintains the resolution timestamp, and returns one
//! [`feedback_types::StatusEvent`] per request for the caller to persist
//! together with the updated item. [`StatusHistory`] verifies a stored event
//! chain and replays it.
//!
//! Content edits and deletes of resolved feedback are refused here as well;
//! ownership and role checks belong to the caller.

pub mod error;
pub mod history;
pub mod lifecycle;
pub mod transitions;

pub use error::LifecycleError;
pub use history::StatusHistory;
pub use lifecycle::{FeedbackEdit, NewFeedback, StatusLifecycle};
pub use transitions::TransitionTable;
