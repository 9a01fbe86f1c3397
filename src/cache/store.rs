//! Time-bounded content store.
//!
//! Entries are kept until overwritten; an entry older than the configured TTL
//! is shadowed on read but stays in the map until the next successful fetch
//! for the same key replaces it.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use metrics::counter;
use serde_json::Value;
use time::{Duration, OffsetDateTime};
use tracing::{debug, trace};

use super::clock::{Clock, SystemClock};
use super::config::CacheConfig;
use super::keys::CacheKey;
use super::lock::{rw_read, rw_write};

const SOURCE: &str = "cache::store";

/// A normalized payload plus the instant it was written.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub value: Arc<Value>,
    pub stored_at: OffsetDateTime,
}

/// Process-wide payload cache shared by resolvers and the shell loader.
///
/// Values are handed out as `Arc<Value>` and are never mutated after
/// insertion; callers that need to change a payload work on their own copy.
pub struct ContentCache {
    entries: RwLock<HashMap<CacheKey, CacheEntry>>,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl ContentCache {
    /// Create a cache reading time from the system clock.
    pub fn new(config: &CacheConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    pub fn with_clock(config: &CacheConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl: config.ttl(),
            clock,
        }
    }

    /// Return the stored payload while it is no older than the TTL.
    pub fn get(&self, key: &CacheKey) -> Option<Arc<Value>> {
        let now = self.clock.now();
        let entries = rw_read(&self.entries, SOURCE, "get");

        let Some(entry) = entries.get(key) else {
            counter!("pagewire_cache_miss_total").increment(1);
            trace!(resource = %key.resource, language = %key.language, "cache miss");
            return None;
        };

        let age = now - entry.stored_at;
        if age > self.ttl {
            counter!("pagewire_cache_miss_total").increment(1);
            debug!(
                resource = %key.resource,
                language = %key.language,
                age_ms = age.whole_milliseconds(),
                "cache entry expired"
            );
            return None;
        }

        counter!("pagewire_cache_hit_total").increment(1);
        Some(Arc::clone(&entry.value))
    }

    /// Store `value` under `key`, replacing any previous entry.
    pub fn put(&self, key: CacheKey, value: Arc<Value>) {
        let entry = CacheEntry {
            value,
            stored_at: self.clock.now(),
        };
        rw_write(&self.entries, SOURCE, "put").insert(key, entry);
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Number of stored entries, expired ones included.
    pub fn len(&self) -> usize {
        rw_read(&self.entries, SOURCE, "len").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        rw_write(&self.entries, SOURCE, "clear").clear();
    }
}
