//! Cache Entry Module
//!
//! Defines the persisted shape of a cached generation and its age checks.

use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

// == Cache Entry ==
/// A cached value with its creation time, stored as `{"value", "timestamp"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheEntry {
    /// The stored value
    pub value: String,
    /// Creation timestamp (Unix milliseconds)
    pub timestamp: u64,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates an entry stamped with `now_ms`.
    pub fn new(value: impl Into<String>, now_ms: u64) -> Self {
        Self {
            value: value.into(),
            timestamp: now_ms,
        }
    }

    // == Age ==
    /// Milliseconds since creation. A timestamp in the future counts as age zero.
    pub fn age_ms(&self, now_ms: u64) -> u64 {
        now_ms.saturating_sub(self.timestamp)
    }

    // == Is Expired ==
    /// Checks whether the entry is stale.
    ///
    /// Boundary condition: an entry exactly `ttl_ms` old is still fresh; it
    /// expires one millisecond later.
    pub fn is_expired(&self, now_ms: u64, ttl_ms: u64) -> bool {
        self.age_ms(now_ms) > ttl_ms
    }
}

// == Utility Functions ==
/// Returns current Unix timestamp in milliseconds.
pub fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as u64)
        .unwrap_or(0)
}
