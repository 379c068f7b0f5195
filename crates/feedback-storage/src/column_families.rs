//! Column family definitions for RocksDB.
//!
//! - feedback: one row per feedback item
//! - status_events: append-only audit events, keyed by item then sequence
//! - responses: admin notes, keyed by item then response id
//! - meta: counters

use rocksdb::{ColumnFamilyDescriptor, Options};

/// Column family name for feedback rows
pub const CF_FEEDBACK: &str = "feedback";

/// Column family name for status audit events
pub const CF_STATUS_EVENTS: &str = "status_events";

/// Column family name for admin responses
pub const CF_RESPONSES: &str = "responses";

/// Column family name for counters
pub const CF_META: &str = "meta";

/// All column family names
pub const ALL_CF_NAMES: &[&str] = &[CF_FEEDBACK, CF_STATUS_EVENTS, CF_RESPONSES, CF_META];

/// Audit events are append-only and compress well
fn status_events_options() -> Options {
    let mut opts = Options::default();
    opts.set_compression_type(rocksdb::DBCompressionType::Zstd);
    opts
}

/// Build all column family descriptors
pub fn build_cf_descriptors() -> Vec<ColumnFamilyDescriptor> {
    vec![
        ColumnFamilyDescriptor::new(CF_FEEDBACK, Options::default()),
        ColumnFamilyDescriptor::new(CF_STATUS_EVENTS, status_events_options()),
        ColumnFamilyDescriptor::new(CF_RESPONSES, Options::default()),
        ColumnFamilyDescriptor::new(CF_META, Options::default()),
    ]
}
