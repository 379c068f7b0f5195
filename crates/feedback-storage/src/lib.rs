//! # feedback-storage
//!
//! RocksDB-backed persistence for feedback items and their status audit trail.
//!
//! Column families:
//! - `feedback`: one JSON row per item, keyed by zero-padded id
//! - `status_events`: append-only audit events, keyed by item and sequence
//! - `responses`: admin notes, keyed by item and response id
//! - `meta`: id allocators
//!
//! A status change writes the updated row and its event in a single
//! `WriteBatch`, so the two are never observed apart. Deleting an item
//! removes its events and responses in the same batch.

pub mod column_families;
pub mod db;
pub mod error;
pub mod keys;

pub use db::{DeletedFeedback, Storage, StorageStats};
pub use error::StorageError;
pub use keys::{FeedbackKey, ResponseKey, StatusEventKey};
