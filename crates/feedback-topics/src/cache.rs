//! Memoized clustering results.
//!
//! Entries are keyed by a SHA-256 fingerprint of the corpus together with k.
//! Any content change alters the fingerprint, so a stale entry can never be
//! served; [`ClusterCache::invalidate`] only releases memory.

use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use lru::LruCache;
use sha2::{Digest, Sha256};
use tracing::debug;

use feedback_types::{CorpusDocument, TopicCluster};

/// SHA-256 digest of a corpus snapshot.
pub type CorpusFingerprint = [u8; 32];

/// Fingerprint of the corpus in order.
///
/// Fields are length-prefixed so that moving text between title and
/// content changes the digest.
pub fn fingerprint(corpus: &[CorpusDocument]) -> CorpusFingerprint {
    let mut hasher = Sha256::new();
    hasher.update((corpus.len() as u64).to_le_bytes());
    for doc in corpus {
        hasher.update(doc.id.to_le_bytes());
        for field in [&doc.title, &doc.content] {
            hasher.update((field.len() as u64).to_le_bytes());
            hasher.update(field.as_bytes());
        }
    }
    hasher.finalize().into()
}

type CacheKey = (CorpusFingerprint, usize);

/// Bounded LRU of cluster lists.
pub struct ClusterCache {
    entries: Mutex<LruCache<CacheKey, Arc<Vec<TopicCluster>>>>,
}

impl ClusterCache {
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, LruCache<CacheKey, Arc<Vec<TopicCluster>>>> {
        // Entries are plain values; a poisoned lock still holds a valid map
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn get(&self, fingerprint: &CorpusFingerprint, k: usize) -> Option<Arc<Vec<TopicCluster>>> {
        self.lock().get(&(*fingerprint, k)).cloned()
    }

    pub fn insert(
        &self,
        fingerprint: CorpusFingerprint,
        k: usize,
        clusters: Vec<TopicCluster>,
    ) -> Arc<Vec<TopicCluster>> {
        let clusters = Arc::new(clusters);
        self.lock().put((fingerprint, k), Arc::clone(&clusters));
        clusters
    }

    /// Return the cached result or compute and store it.
    ///
    /// Errors from `compute` are returned and nothing is cached.
    pub fn get_or_compute<E>(
        &self,
        corpus: &[CorpusDocument],
        k: usize,
        compute: impl FnOnce() -> Result<Vec<TopicCluster>, E>,
    ) -> Result<Arc<Vec<TopicCluster>>, E> {
        let key = fingerprint(corpus);
        if let Some(hit) = self.get(&key, k) {
            debug!(k, "Cluster cache hit");
            return Ok(hit);
        }
        debug!(k, "Cluster cache miss");
        let clusters = compute()?;
        Ok(self.insert(key, k, clusters))
    }

    /// Drop every entry.
    pub fn invalidate(&self) {
        let mut entries = self.lock();
        if !entries.is_empty() {
            debug!(entries = entries.len(), "Invalidating cluster cache");
        }
        entries.clear();
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

impl Default for ClusterCache {
    fn default() -> Self {
        Self::new(feedback_types::ClusteringConfig::default().cache_capacity)
    }
}
