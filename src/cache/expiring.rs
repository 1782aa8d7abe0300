//! Expiring Cache Module
//!
//! Time-boxed memoization over an injected [`KeyValueStore`]. Entries are only
//! evicted by the read that finds them stale; nothing sweeps in the background.

use std::fmt::Debug;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::cache::{current_timestamp_ms, CacheEntry, CacheStats, KeyValueStore};
use crate::error::StoreError;

/// Prefix applied to every key written to the backing store.
pub const CACHE_NAMESPACE: &str = "mermaid-diagrams";

/// Default time-to-live: 24 hours.
pub const DEFAULT_TTL: Duration = Duration::from_secs(24 * 60 * 60);

// == Clock ==
/// Source of the current time in Unix milliseconds.
pub trait Clock: Send + Sync + Debug {
    fn now_ms(&self) -> u64;
}

/// Wall clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        current_timestamp_ms()
    }
}

/// Clock that only moves when told to.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: AtomicU64,
}

impl ManualClock {
    pub fn new(start_ms: u64) -> Self {
        Self {
            now: AtomicU64::new(start_ms),
        }
    }

    pub fn set(&self, now_ms: u64) {
        self.now.store(now_ms, Ordering::SeqCst);
    }

    pub fn advance(&self, by: Duration) {
        self.now.fetch_add(by.as_millis() as u64, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now.load(Ordering::SeqCst)
    }
}

// == Expiring Cache ==
/// Key-value cache whose entries go stale after a fixed TTL.
pub struct ExpiringCache {
    store: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
    ttl: Duration,
    stats: RwLock<CacheStats>,
}

impl ExpiringCache {
    /// Creates a cache over `store` using the wall clock.
    pub fn new(store: Arc<dyn KeyValueStore>, ttl: Duration) -> Self {
        Self::with_clock(store, ttl, Arc::new(SystemClock))
    }

    pub fn with_clock(store: Arc<dyn KeyValueStore>, ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            clock,
            ttl,
            stats: RwLock::new(CacheStats::new()),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    fn store_key(key: &str) -> String {
        format!("{}-{}", CACHE_NAMESPACE, key)
    }

    // == Set ==
    /// Stores `value` under `key` stamped with the current time, overwriting
    /// any previous entry.
    pub async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let entry = CacheEntry::new(value, self.clock.now_ms());
        let raw = serde_json::to_string(&entry)?;

        self.store.set_item(&Self::store_key(key), raw).await?;
        self.stats.write().await.record_write();
        Ok(())
    }

    // == Get ==
    /// Returns the value under `key` if present and no older than the TTL.
    ///
    /// Stale and unreadable entries are removed and reported as a miss.
    pub async fn get(&self, key: &str) -> Option<String> {
        let store_key = Self::store_key(key);

        let raw = match self.store.get_item(&store_key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                self.stats.write().await.record_miss();
                return None;
            }
            Err(e) => {
                warn!(key, "Cache store read failed, treating as miss: {}", e);
                self.stats.write().await.record_miss();
                return None;
            }
        };

        let entry = match serde_json::from_str::<CacheEntry>(&raw) {
            Ok(entry) => entry,
            Err(e) => {
                warn!(key, "Discarding corrupt cache entry: {}", e);
                self.remove_quietly(&store_key).await;
                self.stats.write().await.record_miss();
                return None;
            }
        };

        let now = self.clock.now_ms();
        if entry.is_expired(now, self.ttl.as_millis() as u64) {
            debug!(key, age_ms = entry.age_ms(now), "Cache entry expired");
            self.remove_quietly(&store_key).await;
            self.stats.write().await.record_expired();
            return None;
        }

        self.stats.write().await.record_hit();
        Some(entry.value)
    }

    /// Current counters.
    pub async fn stats(&self) -> CacheStats {
        self.stats.read().await.clone()
    }

    async fn remove_quietly(&self, store_key: &str) {
        if let Err(e) = self.store.remove_item(store_key).await {
            warn!(key = store_key, "Failed to remove cache entry: {}", e);
        }
    }
}

impl Debug for ExpiringCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExpiringCache")
            .field("clock", &self.clock)
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}
