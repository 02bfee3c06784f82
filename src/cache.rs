//! Expiring cache of rendered alignments.
//!
//! Keys are `(viewer language, foreign page identity)`. The compute body runs
//! at most once per key per expiry window: concurrent callers for the same
//! key wait on that key's lock and then read the stored value. Different keys
//! never wait on each other beyond a short map lookup.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Duration, Utc};

use crate::error::Result;

/// Default time-to-live: one day.
pub const DEFAULT_TTL_SECS: i64 = 24 * 60 * 60;

/// Cache key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    /// Language the reader asked for
    pub viewer_language: String,

    /// Identity of the foreign page (usually its URL)
    pub foreign_page: String,
}

impl CacheKey {
    /// Create a key.
    pub fn new(viewer_language: impl Into<String>, foreign_page: impl Into<String>) -> Self {
        Self {
            viewer_language: viewer_language.into(),
            foreign_page: foreign_page.into(),
        }
    }
}

struct Entry<V> {
    value: V,
    expires_at: DateTime<Utc>,
}

type Slot<V> = Arc<Mutex<Option<Entry<V>>>>;

/// Thread-safe cache with a fixed time-to-live.
pub struct AlignmentCache<V = String> {
    ttl: Duration,
    slots: Mutex<HashMap<CacheKey, Slot<V>>>,
}

impl<V: Clone> AlignmentCache<V> {
    /// Create a cache whose entries live for `ttl`.
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            slots: Mutex::new(HashMap::new()),
        }
    }

    /// Create a cache whose entries live for `secs` seconds.
    pub fn with_ttl_secs(secs: i64) -> Self {
        Self::new(Duration::seconds(secs))
    }

    /// Time-to-live of new entries.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Return the cached value for `key`, computing and storing it on a miss.
    ///
    /// Errors from `compute` are returned and not cached, so the next caller
    /// tries again.
    pub fn get_or_compute<F>(&self, key: &CacheKey, compute: F) -> Result<V>
    where
        F: FnOnce() -> Result<V>,
    {
        let slot = self.slot(key);
        let mut guard = lock(&slot);

        if let Some(entry) = guard.as_ref() {
            if Utc::now() < entry.expires_at {
                log::debug!("Cache hit for {:?}", key);
                return Ok(entry.value.clone());
            }
        }

        log::debug!("Cache miss for {:?}", key);
        let value = compute()?;
        *guard = Some(Entry {
            value: value.clone(),
            expires_at: Utc::now() + self.ttl,
        });
        Ok(value)
    }

    /// Cached value for `key`, if present and fresh.
    pub fn get(&self, key: &CacheKey) -> Option<V> {
        let slot = lock(&self.slots).get(key).cloned()?;
        let guard = lock(&slot);
        guard
            .as_ref()
            .filter(|entry| Utc::now() < entry.expires_at)
            .map(|entry| entry.value.clone())
    }

    /// Store a value, replacing any previous one.
    pub fn insert(&self, key: CacheKey, value: V) {
        let slot = self.slot(&key);
        *lock(&slot) = Some(Entry {
            value,
            expires_at: Utc::now() + self.ttl,
        });
    }

    /// Drop the entry for `key`. Returns whether a value was stored.
    pub fn invalidate(&self, key: &CacheKey) -> bool {
        let Some(slot) = lock(&self.slots).remove(key) else {
            return false;
        };
        let had_value = lock(&slot).is_some();
        had_value
    }

    /// Drop every expired entry, returning how many were removed.
    pub fn purge_expired(&self) -> usize {
        let now = Utc::now();
        let mut slots = lock(&self.slots);
        let before = slots.len();
        // A slot locked by a running compute is kept.
        slots.retain(|_, slot| match slot.try_lock() {
            Ok(guard) => guard.as_ref().is_some_and(|e| now < e.expires_at),
            Err(_) => true,
        });
        let removed = before - slots.len();
        if removed > 0 {
            log::debug!("Purged {} expired cache entries", removed);
        }
        removed
    }

    /// Number of stored entries, expired ones included until purged.
    pub fn len(&self) -> usize {
        lock(&self.slots)
            .values()
            .filter(|slot| match slot.try_lock() {
                Ok(guard) => guard.is_some(),
                Err(_) => false,
            })
            .count()
    }

    /// Check if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop everything.
    pub fn clear(&self) {
        lock(&self.slots).clear();
    }

    fn slot(&self, key: &CacheKey) -> Slot<V> {
        lock(&self.slots)
            .entry(key.clone())
            .or_insert_with(|| Arc::new(Mutex::new(None)))
            .clone()
    }
}

impl<V: Clone> Default for AlignmentCache<V> {
    fn default() -> Self {
        Self::with_ttl_secs(DEFAULT_TTL_SECS)
    }
}

/// Lock a mutex, recovering the data if a previous holder panicked.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
