//! In-memory cache entries with a staleness window and an atomic fetch claim.
//!
//! The claim is a single locked check-and-set over the entry's fetching flag
//! and freshness, so the guard holds under concurrent callers, not just on a
//! cooperative event loop. There is no waiter queue: a caller that loses the
//! claim gets nothing and polls again later.

use std::collections::HashMap;
use std::sync::Mutex;
use time::{Duration, OffsetDateTime};

/// How long a cached value stays fresh. Fresh entries never trigger a fetch.
pub const STALE_WINDOW: Duration = Duration::milliseconds(3000);

/// One cached resource: latest value (if any), whether a fetch is in flight,
/// and when the value was last updated.
#[derive(Clone, Debug)]
pub struct CacheEntry<T> {
    pub value: Option<T>,
    pub fetching: bool,
    pub updated_at: Option<OffsetDateTime>,
}

impl<T> CacheEntry<T> {
    fn claimed() -> Self {
        Self {
            value: None,
            fetching: true,
            updated_at: None,
        }
    }

    pub fn is_fresh(&self, now: OffsetDateTime) -> bool {
        match self.updated_at {
            Some(updated_at) => now - updated_at < STALE_WINDOW,
            None => false,
        }
    }
}

/// Keyed cache map with claim/complete/release lifecycle. Singleton resources
/// use a fixed key.
pub struct CacheMap<T> {
    entries: Mutex<HashMap<String, CacheEntry<T>>>,
}

impl<T: Clone> CacheMap<T> {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Snapshot of the entry for a key, if one exists.
    pub fn get(&self, key: &str) -> Option<CacheEntry<T>> {
        self.entries.lock().unwrap().get(key).cloned()
    }

    /// Try to claim the fetch for a key. Fails when a fetch is already in
    /// flight or the cached value is still fresh. On success the entry is
    /// marked fetching before the lock is dropped, so no second caller can
    /// claim the same key.
    pub fn try_claim(&self, key: &str, now: OffsetDateTime) -> bool {
        let mut entries = self.entries.lock().unwrap();
        match entries.get_mut(key) {
            Some(entry) => {
                if entry.fetching || entry.is_fresh(now) {
                    return false;
                }
                entry.fetching = true;
                true
            }
            None => {
                entries.insert(key.to_string(), CacheEntry::claimed());
                true
            }
        }
    }

    /// Publish a fetched value: stores it, clears the fetching flag, and
    /// stamps the update time.
    pub fn complete(&self, key: &str, value: T, now: OffsetDateTime) {
        let mut entries = self.entries.lock().unwrap();
        entries.insert(
            key.to_string(),
            CacheEntry {
                value: Some(value),
                fetching: false,
                updated_at: Some(now),
            },
        );
    }

    /// Drop the claim after a failed fetch. Value and timestamp are left
    /// untouched, so the next poll retries immediately.
    pub fn release(&self, key: &str) {
        let mut entries = self.entries.lock().unwrap();
        if let Some(entry) = entries.get_mut(key) {
            entry.fetching = false;
        }
    }
}

impl<T: Clone> Default for CacheMap<T> {
    fn default() -> Self {
        Self::new()
    }
}
