//! Bounded in-memory LRU cache of rendered thumbnails.

use std::num::NonZeroUsize;

use bytes::Bytes;
use lru::LruCache;
use tokio::sync::Mutex;

/// A cached rendering: actual output dimensions plus encoded bytes.
///
/// The dimensions stored here are the ones the winning loader produced,
/// which may be smaller than the requested box the entry is keyed under.
#[derive(Debug, Clone, PartialEq)]
pub struct CachedThumbnail {
    pub width: u32,
    pub height: u32,
    pub data: Bytes,
}

/// Fixed-capacity LRU cache behind one cache-wide lock.
///
/// All operations are pure in-memory; nothing may touch I/O while the lock
/// is held. The cache is never persisted; every entry is rebuildable from
/// its source media, so starting empty after a restart is harmless.
pub struct ThumbnailCache {
    entries: Mutex<LruCache<String, CachedThumbnail>>,
}

impl ThumbnailCache {
    pub const DEFAULT_CAPACITY: usize = 2048;

    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Mutex::new(LruCache::new(
                NonZeroUsize::new(capacity.max(1)).unwrap(),
            )),
        }
    }

    /// A hit counts as a use and promotes the entry to most-recently-used.
    pub async fn get(&self, key: &str) -> Option<CachedThumbnail> {
        self.entries.lock().await.get(key).cloned()
    }

    /// Insert or replace. At capacity a new key evicts the single
    /// least-recently-used entry first.
    pub async fn put(&self, key: String, entry: CachedThumbnail) {
        self.entries.lock().await.put(key, entry);
    }

    /// Presence check that does not count as a use.
    pub async fn contains(&self, key: &str) -> bool {
        self.entries.lock().await.contains(key)
    }

    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }
}

impl Default for ThumbnailCache {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY)
    }
}
