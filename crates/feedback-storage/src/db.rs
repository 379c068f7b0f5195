//! RocksDB wrapper for feedback storage.
//!
//! Provides:
//! - Database open with column family setup
//! - Atomic write batches (feedback row + status event)
//! - Admin responses stored beside their item
//! - Revision checks that reject stale writes
//! - Single-item and full-corpus reads

use rocksdb::{Direction, IteratorMode, Options, WriteBatch, DB};
use std::path::Path;
use chrono::{DateTime, Utc};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::{debug, info};

use feedback_types::{AdminResponse, Feedback, FeedbackId, StatusEvent, UserId};

use crate::column_families::{
    build_cf_descriptors, ALL_CF_NAMES, CF_FEEDBACK, CF_META, CF_RESPONSES, CF_STATUS_EVENTS,
};
use crate::error::StorageError;
use crate::keys::{
    FeedbackKey, ResponseKey, StatusEventKey, FEEDBACK_PREFIX, NEXT_FEEDBACK_ID_KEY,
    NEXT_RESPONSE_ID_KEY,
};

/// Main storage interface for feedback items and their audit trail
pub struct Storage {
    db: DB,
    /// Serializes read-check-write sequences
    write_lock: Mutex<()>,
}

impl Storage {
    /// Open storage at the given path, creating if necessary
    pub fn open(path: &Path) -> Result<Self, StorageError> {
        info!("Opening storage at {:?}", path);

        let mut db_opts = Options::default();
        db_opts.create_if_missing(true);
        db_opts.create_missing_column_families(true);
        db_opts.set_max_background_jobs(4);

        let db = DB::open_cf_descriptors(&db_opts, path, build_cf_descriptors())?;

        Ok(Self {
            db,
            write_lock: Mutex::new(()),
        })
    }

    fn cf(&self, name: &str) -> Result<&rocksdb::ColumnFamily, StorageError> {
        self.db
            .cf_handle(name)
            .ok_or_else(|| StorageError::ColumnFamilyNotFound(name.to_string()))
    }

    fn lock(&self) -> MutexGuard<'_, ()> {
        self.write_lock.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Allocate the next feedback id. Ids start at 1 and are never reused.
    pub fn next_feedback_id(&self) -> Result<FeedbackId, StorageError> {
        let _guard = self.lock();
        self.allocate(NEXT_FEEDBACK_ID_KEY)
    }

    /// Bump a meta counter. Caller holds the write lock.
    fn allocate(&self, counter: &[u8]) -> Result<u64, StorageError> {
        let meta_cf = self.cf(CF_META)?;

        let next = match self.db.get_cf(meta_cf, counter)? {
            Some(bytes) => {
                let raw: [u8; 8] = bytes.as_slice().try_into().map_err(|_| {
                    StorageError::Serialization(format!(
                        "Corrupt counter {}",
                        String::from_utf8_lossy(counter)
                    ))
                })?;
                u64::from_be_bytes(raw)
            }
            None => 1,
        };
        self.db.put_cf(meta_cf, counter, (next + 1).to_be_bytes())?;
        Ok(next)
    }

    /// Store a new feedback item together with its creation event.
    pub fn insert_feedback(
        &self,
        feedback: &Feedback,
        event: &StatusEvent,
    ) -> Result<(), StorageError> {
        if !event.is_creation() || event.sequence != 0 || feedback.revision != 0 {
            return Err(StorageError::Inconsistent(format!(
                "feedback {} must be inserted with its creation event",
                feedback.id
            )));
        }
        check_same_item(feedback, event)?;

        let _guard = self.lock();
        let feedback_cf = self.cf(CF_FEEDBACK)?;
        let events_cf = self.cf(CF_STATUS_EVENTS)?;

        let key = FeedbackKey::new(feedback.id);
        if self.db.get_cf(feedback_cf, key.to_bytes())?.is_some() {
            return Err(StorageError::AlreadyExists(feedback.id));
        }

        let mut batch = WriteBatch::default();
        batch.put_cf(feedback_cf, key.to_bytes(), serde_json::to_vec(feedback)?);
        batch.put_cf(
            events_cf,
            StatusEventKey::new(event.feedback_id, event.sequence).to_bytes(),
            event.to_bytes()?,
        );
        self.db.write(batch)?;

        debug!(feedback_id = feedback.id, "Stored feedback with creation event");
        Ok(())
    }

    /// Store a status change: updated row and its event in one batch.
    ///
    /// The event must be the next in sequence after the stored revision.
    pub fn commit_transition(
        &self,
        feedback: &Feedback,
        event: &StatusEvent,
    ) -> Result<(), StorageError> {
        check_same_item(feedback, event)?;
        if feedback.revision != event.sequence || feedback.status != event.new_status {
            return Err(StorageError::Inconsistent(format!(
                "feedback {} does not reflect event {}",
                feedback.id, event.sequence
            )));
        }

        let _guard = self.lock();
        let feedback_cf = self.cf(CF_FEEDBACK)?;
        let events_cf = self.cf(CF_STATUS_EVENTS)?;

        let stored = self
            .read_feedback(feedback.id)?
            .ok_or(StorageError::NotFound(feedback.id))?;
        if stored.revision.checked_add(1) != Some(event.sequence) {
            return Err(StorageError::Conflict {
                feedback_id: feedback.id,
                stored_revision: stored.revision,
                revision: event.sequence,
            });
        }

        let mut batch = WriteBatch::default();
        batch.put_cf(
            feedback_cf,
            FeedbackKey::new(feedback.id).to_bytes(),
            serde_json::to_vec(feedback)?,
        );
        batch.put_cf(
            events_cf,
            StatusEventKey::new(event.feedback_id, event.sequence).to_bytes(),
            event.to_bytes()?,
        );
        self.db.write(batch)?;

        debug!(
            feedback_id = feedback.id,
            sequence = event.sequence,
            new_status = %event.new_status,
            "Committed status transition"
        );
        Ok(())
    }

    /// Overwrite content fields of an existing item.
    ///
    /// Rejected when a status change was committed since `feedback` was read.
    pub fn update_feedback(&self, feedback: &Feedback) -> Result<(), StorageError> {
        let _guard = self.lock();
        let feedback_cf = self.cf(CF_FEEDBACK)?;

        let stored = self
            .read_feedback(feedback.id)?
            .ok_or(StorageError::NotFound(feedback.id))?;
        if stored.revision != feedback.revision || stored.status != feedback.status {
            return Err(StorageError::Conflict {
                feedback_id: feedback.id,
                stored_revision: stored.revision,
                revision: feedback.revision,
            });
        }

        self.db.put_cf(
            feedback_cf,
            FeedbackKey::new(feedback.id).to_bytes(),
            serde_json::to_vec(feedback)?,
        )?;
        debug!(feedback_id = feedback.id, "Updated feedback");
        Ok(())
    }

    /// Delete an item with its events and responses atomically.
    ///
    /// `revision` is the revision the caller's checks were made against; a
    /// status change committed since then makes the delete a `Conflict`.
    pub fn delete_feedback(
        &self,
        id: FeedbackId,
        revision: u32,
    ) -> Result<DeletedFeedback, StorageError> {
        let _guard = self.lock();
        let feedback_cf = self.cf(CF_FEEDBACK)?;
        let events_cf = self.cf(CF_STATUS_EVENTS)?;
        let responses_cf = self.cf(CF_RESPONSES)?;

        let stored = self.read_feedback(id)?.ok_or(StorageError::NotFound(id))?;
        if stored.revision != revision {
            return Err(StorageError::Conflict {
                feedback_id: id,
                stored_revision: stored.revision,
                revision,
            });
        }

        let mut batch = WriteBatch::default();
        batch.delete_cf(feedback_cf, FeedbackKey::new(id).to_bytes());
        let event_keys = self.prefix_keys(events_cf, &StatusEventKey::prefix(id))?;
        for event_key in &event_keys {
            batch.delete_cf(events_cf, event_key);
        }
        let response_keys = self.prefix_keys(responses_cf, &ResponseKey::prefix(id))?;
        for response_key in &response_keys {
            batch.delete_cf(responses_cf, response_key);
        }
        self.db.write(batch)?;

        let deleted = DeletedFeedback {
            events: event_keys.len(),
            responses: response_keys.len(),
        };
        debug!(
            feedback_id = id,
            events = deleted.events,
            responses = deleted.responses,
            "Deleted feedback"
        );
        Ok(deleted)
    }

    /// Attach an admin response to an existing item.
    pub fn add_response(
        &self,
        feedback_id: FeedbackId,
        admin_id: UserId,
        message: &str,
        at: DateTime<Utc>,
    ) -> Result<AdminResponse, StorageError> {
        let _guard = self.lock();
        let responses_cf = self.cf(CF_RESPONSES)?;

        if self.read_feedback(feedback_id)?.is_none() {
            return Err(StorageError::NotFound(feedback_id));
        }

        let response = AdminResponse {
            id: self.allocate(NEXT_RESPONSE_ID_KEY)?,
            feedback_id,
            admin_id,
            message: message.to_string(),
            created_at: at,
        };
        self.db.put_cf(
            responses_cf,
            ResponseKey::new(feedback_id, response.id).to_bytes(),
            response.to_bytes()?,
        )?;

        debug!(feedback_id, response_id = response.id, "Stored admin response");
        Ok(response)
    }

    /// Responses to one item in id order.
    pub fn responses(&self, feedback_id: FeedbackId) -> Result<Vec<AdminResponse>, StorageError> {
        let responses_cf = self.cf(CF_RESPONSES)?;
        let prefix = ResponseKey::prefix(feedback_id);
        let iter = self
            .db
            .iterator_cf(responses_cf, IteratorMode::From(&prefix, Direction::Forward));

        let mut results = Vec::new();
        for item in iter {
            let (key, value) = item?;
            if !key.starts_with(&prefix) {
                break;
            }
            results.push(AdminResponse::from_bytes(&value)?);
        }
        Ok(results)
    }

    /// Get a feedback item by id
    pub fn get_feedback(&self, id: FeedbackId) -> Result<Option<Feedback>, StorageError> {
        self.read_feedback(id)
    }

    fn read_feedback(&self, id: FeedbackId) -> Result<Option<Feedback>, StorageError> {
        let feedback_cf = self.cf(CF_FEEDBACK)?;
        match self.db.get_cf(feedback_cf, FeedbackKey::new(id).to_bytes())? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    /// All feedback items in id order.
    pub fn list_feedback(&self) -> Result<Vec<Feedback>, StorageError> {
        let feedback_cf = self.cf(CF_FEEDBACK)?;
        let iter = self.db.iterator_cf(
            feedback_cf,
            IteratorMode::From(FEEDBACK_PREFIX, Direction::Forward),
        );

        let mut results = Vec::new();
        for item in iter {
            let (key, value) = item?;
            if !key.starts_with(FEEDBACK_PREFIX) {
                break;
            }
            results.push(serde_json::from_slice(&value)?);
        }
        Ok(results)
    }

    /// Events of one item in sequence order.
    pub fn status_events(&self, id: FeedbackId) -> Result<Vec<StatusEvent>, StorageError> {
        let events_cf = self.cf(CF_STATUS_EVENTS)?;
        let prefix = StatusEventKey::prefix(id);
        let iter = self
            .db
            .iterator_cf(events_cf, IteratorMode::From(&prefix, Direction::Forward));

        let mut results = Vec::new();
        for item in iter {
            let (key, value) = item?;
            if !key.starts_with(&prefix) {
                break;
            }
            results.push(StatusEvent::from_bytes(&value)?);
        }
        Ok(results)
    }

    fn prefix_keys(
        &self,
        cf: &rocksdb::ColumnFamily,
        prefix: &[u8],
    ) -> Result<Vec<Vec<u8>>, StorageError> {
        let iter = self
            .db
            .iterator_cf(cf, IteratorMode::From(prefix, Direction::Forward));
        let mut keys = Vec::new();
        for item in iter {
            let (key, _) = item?;
            if !key.starts_with(prefix) {
                break;
            }
            keys.push(key.to_vec());
        }
        Ok(keys)
    }

    /// Flush all column families to disk
    pub fn flush(&self) -> Result<(), StorageError> {
        for cf_name in ALL_CF_NAMES {
            if let Some(cf) = self.db.cf_handle(cf_name) {
                self.db.flush_cf(cf)?;
            }
        }
        Ok(())
    }

    /// Get database statistics.
    pub fn stats(&self) -> Result<StorageStats, StorageError> {
        Ok(StorageStats {
            feedback_count: self.count_cf_entries(self.cf(CF_FEEDBACK)?)?,
            status_event_count: self.count_cf_entries(self.cf(CF_STATUS_EVENTS)?)?,
            response_count: self.count_cf_entries(self.cf(CF_RESPONSES)?)?,
            disk_usage_bytes: self.get_disk_usage(),
        })
    }

    fn count_cf_entries(&self, cf: &rocksdb::ColumnFamily) -> Result<u64, StorageError> {
        let mut count = 0u64;
        for item in self.db.iterator_cf(cf, IteratorMode::Start) {
            item?;
            count += 1;
        }
        Ok(count)
    }

    fn get_disk_usage(&self) -> u64 {
        let mut total_size = 0u64;
        if let Ok(entries) = std::fs::read_dir(self.db.path()) {
            for entry in entries.flatten() {
                if let Ok(metadata) = entry.metadata() {
                    total_size += metadata.len();
                }
            }
        }
        total_size
    }
}

fn check_same_item(feedback: &Feedback, event: &StatusEvent) -> Result<(), StorageError> {
    if feedback.id != event.feedback_id {
        return Err(StorageError::Inconsistent(format!(
            "event for feedback {} written with feedback {}",
            event.feedback_id, feedback.id
        )));
    }
    Ok(())
}

/// What a delete removed besides the item itself.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DeletedFeedback {
    pub events: usize,
    pub responses: usize,
}

/// Statistics about the storage.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct StorageStats {
    /// Number of feedback items
    pub feedback_count: u64,
    /// Number of status events
    pub status_event_count: u64,
    /// Number of admin responses
    pub response_count: u64,
    /// Total disk usage in bytes
    pub disk_usage_bytes: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use feedback_types::{FeedbackStatus, SentimentResult};
    use tempfile::TempDir;

    fn create_test_storage() -> (Storage, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let storage = Storage::open(temp_dir.path()).unwrap();
        (storage, temp_dir)
    }

    fn feedback(id: FeedbackId) -> (Feedback, StatusEvent) {
        let at = Utc.with_ymd_and_hms(2024, 2, 1, 8, 0, 0).unwrap();
        let feedback = Feedback {
            id,
            user_id: 5,
            title: format!("Item {id}"),
            content: "Export to CSV".to_string(),
            category_id: None,
            tag_ids: vec![],
            status: FeedbackStatus::New,
            sentiment: SentimentResult::neutral(),
            created_at: at,
            updated_at: at,
            resolved_at: None,
            revision: 0,
        };
        let event = StatusEvent {
            feedback_id: id,
            sequence: 0,
            old_status: None,
            new_status: FeedbackStatus::New,
            changed_by: 5,
            created_at: at,
        };
        (feedback, event)
    }

    fn transition(current: &Feedback, to: FeedbackStatus) -> (Feedback, StatusEvent) {
        let mut next = current.clone();
        next.status = to;
        next.revision += 1;
        let event = StatusEvent {
            feedback_id: current.id,
            sequence: next.revision,
            old_status: Some(current.status),
            new_status: to,
            changed_by: 1,
            created_at: current.updated_at,
        };
        (next, event)
    }

    #[test]
    fn test_open_creates_column_families() {
        let (storage, _dir) = create_test_storage();
        for name in ALL_CF_NAMES {
            assert!(storage.db.cf_handle(name).is_some());
        }
    }

    #[test]
    fn test_next_feedback_id_is_monotonic_and_persisted() {
        let temp_dir = TempDir::new().unwrap();
        {
            let storage = Storage::open(temp_dir.path()).unwrap();
            assert_eq!(storage.next_feedback_id().unwrap(), 1);
            assert_eq!(storage.next_feedback_id().unwrap(), 2);
        }
        let storage = Storage::open(temp_dir.path()).unwrap();
        assert_eq!(storage.next_feedback_id().unwrap(), 3);
    }

    #[test]
    fn test_insert_and_get() {
        let (storage, _dir) = create_test_storage();
        let (fb, ev) = feedback(1);
        storage.insert_feedback(&fb, &ev).unwrap();

        assert_eq!(storage.get_feedback(1).unwrap(), Some(fb));
        assert_eq!(storage.status_events(1).unwrap(), vec![ev]);
        assert!(storage.get_feedback(2).unwrap().is_none());
    }

    #[test]
    fn test_insert_duplicate_rejected() {
        let (storage, _dir) = create_test_storage();
        let (fb, ev) = feedback(1);
        storage.insert_feedback(&fb, &ev).unwrap();
        assert!(matches!(
            storage.insert_feedback(&fb, &ev),
            Err(StorageError::AlreadyExists(1))
        ));
    }

    #[test]
    fn test_insert_requires_creation_event() {
        let (storage, _dir) = create_test_storage();
        let (fb, _) = feedback(1);
        let (_, not_creation) = transition(&fb, FeedbackStatus::Triaged);
        assert!(matches!(
            storage.insert_feedback(&fb, &not_creation),
            Err(StorageError::Inconsistent(_))
        ));
    }

    #[test]
    fn test_commit_transition_appends_event() {
        let (storage, _dir) = create_test_storage();
        let (fb, ev) = feedback(1);
        storage.insert_feedback(&fb, &ev).unwrap();

        let (triaged, ev1) = transition(&fb, FeedbackStatus::Triaged);
        storage.commit_transition(&triaged, &ev1).unwrap();
        let (resolved, ev2) = transition(&triaged, FeedbackStatus::Resolved);
        storage.commit_transition(&resolved, &ev2).unwrap();

        let stored = storage.get_feedback(1).unwrap().unwrap();
        assert_eq!(stored.status, FeedbackStatus::Resolved);
        assert_eq!(stored.revision, 2);
        let sequences: Vec<u32> = storage
            .status_events(1)
            .unwrap()
            .iter()
            .map(|e| e.sequence)
            .collect();
        assert_eq!(sequences, vec![0, 1, 2]);
    }

    #[test]
    fn test_stale_transition_conflicts() {
        let (storage, _dir) = create_test_storage();
        let (fb, ev) = feedback(1);
        storage.insert_feedback(&fb, &ev).unwrap();

        let (a, ev_a) = transition(&fb, FeedbackStatus::Triaged);
        let (b, ev_b) = transition(&fb, FeedbackStatus::Rejected);
        storage.commit_transition(&a, &ev_a).unwrap();

        let err = storage.commit_transition(&b, &ev_b).unwrap_err();
        assert!(matches!(
            err,
            StorageError::Conflict {
                feedback_id: 1,
                stored_revision: 1,
                revision: 1
            }
        ));
        assert_eq!(storage.status_events(1).unwrap().len(), 2);
        assert_eq!(
            storage.get_feedback(1).unwrap().unwrap().status,
            FeedbackStatus::Triaged
        );
    }

    #[test]
    fn test_transition_of_missing_item() {
        let (storage, _dir) = create_test_storage();
        let (fb, _) = feedback(9);
        let (next, ev) = transition(&fb, FeedbackStatus::Triaged);
        assert!(matches!(
            storage.commit_transition(&next, &ev),
            Err(StorageError::NotFound(9))
        ));
    }

    #[test]
    fn test_update_feedback_checks_revision() {
        let (storage, _dir) = create_test_storage();
        let (fb, ev) = feedback(1);
        storage.insert_feedback(&fb, &ev).unwrap();

        let mut edited = fb.clone();
        edited.title = "Edited".to_string();
        storage.update_feedback(&edited).unwrap();
        assert_eq!(storage.get_feedback(1).unwrap().unwrap().title, "Edited");

        let (triaged, ev1) = transition(&fb, FeedbackStatus::Triaged);
        storage.commit_transition(&triaged, &ev1).unwrap();
        // `edited` predates the transition
        assert!(matches!(
            storage.update_feedback(&edited),
            Err(StorageError::Conflict { .. })
        ));
    }

    #[test]
    fn test_delete_cascades_events() {
        let (storage, _dir) = create_test_storage();
        let (fb, ev) = feedback(1);
        storage.insert_feedback(&fb, &ev).unwrap();
        let (next, ev1) = transition(&fb, FeedbackStatus::Triaged);
        storage.commit_transition(&next, &ev1).unwrap();
        let (other, other_ev) = feedback(2);
        storage.insert_feedback(&other, &other_ev).unwrap();

        storage.add_response(1, 1, "Looking into it", next.updated_at).unwrap();
        storage.add_response(2, 1, "Thanks", other.updated_at).unwrap();

        let deleted = storage.delete_feedback(1, next.revision).unwrap();
        assert_eq!(
            deleted,
            DeletedFeedback {
                events: 2,
                responses: 1
            }
        );
        assert!(storage.get_feedback(1).unwrap().is_none());
        assert!(storage.status_events(1).unwrap().is_empty());
        assert!(storage.responses(1).unwrap().is_empty());
        assert_eq!(storage.status_events(2).unwrap().len(), 1);
        assert_eq!(storage.responses(2).unwrap().len(), 1);
        assert!(matches!(
            storage.delete_feedback(1, next.revision),
            Err(StorageError::NotFound(1))
        ));
    }

    #[test]
    fn test_delete_with_stale_revision_conflicts() {
        let (storage, _dir) = create_test_storage();
        let (fb, ev) = feedback(1);
        storage.insert_feedback(&fb, &ev).unwrap();

        // Resolved after the caller read revision 0
        let (resolved, ev1) = transition(&fb, FeedbackStatus::Resolved);
        storage.commit_transition(&resolved, &ev1).unwrap();

        let err = storage.delete_feedback(1, fb.revision).unwrap_err();
        assert!(matches!(
            err,
            StorageError::Conflict {
                feedback_id: 1,
                stored_revision: 1,
                revision: 0
            }
        ));
        assert_eq!(storage.get_feedback(1).unwrap(), Some(resolved));
        assert_eq!(storage.status_events(1).unwrap().len(), 2);
    }

    #[test]
    fn test_responses_in_id_order() {
        let (storage, _dir) = create_test_storage();
        let (fb, ev) = feedback(1);
        storage.insert_feedback(&fb, &ev).unwrap();

        let first = storage.add_response(1, 1, "Triaged", fb.created_at).unwrap();
        let second = storage.add_response(1, 4, "Fix shipped", fb.created_at).unwrap();
        assert_eq!((first.id, second.id), (1, 2));

        let messages: Vec<String> = storage
            .responses(1)
            .unwrap()
            .into_iter()
            .map(|r| r.message)
            .collect();
        assert_eq!(messages, vec!["Triaged", "Fix shipped"]);
        // Counter is separate from feedback ids
        assert_eq!(storage.next_feedback_id().unwrap(), 1);
    }

    #[test]
    fn test_response_to_missing_item() {
        let (storage, _dir) = create_test_storage();
        assert!(matches!(
            storage.add_response(3, 1, "Hello", Utc::now()),
            Err(StorageError::NotFound(3))
        ));
        assert_eq!(storage.stats().unwrap().response_count, 0);
    }

    #[test]
    fn test_list_feedback_in_id_order() {
        let (storage, _dir) = create_test_storage();
        for id in [10, 2, 7] {
            let (fb, ev) = feedback(id);
            storage.insert_feedback(&fb, &ev).unwrap();
        }
        let ids: Vec<FeedbackId> = storage
            .list_feedback()
            .unwrap()
            .iter()
            .map(|f| f.id)
            .collect();
        assert_eq!(ids, vec![2, 7, 10]);
    }

    #[test]
    fn test_stats() {
        let (storage, _dir) = create_test_storage();
        let (fb, ev) = feedback(1);
        storage.insert_feedback(&fb, &ev).unwrap();
        let stats = storage.stats().unwrap();
        assert_eq!(stats.feedback_count, 1);
        assert_eq!(stats.status_event_count, 1);
        assert_eq!(stats.response_count, 0);
        storage.flush().unwrap();
    }
}
