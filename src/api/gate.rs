//! Debounce Gate
//!
//! Caller-side minimum-interval gate. Identical requests arriving closer
//! together than the interval are turned away before they reach the generator.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use tokio::sync::Mutex;

/// Tracks when each request key was last let through.
#[derive(Debug)]
pub struct MinIntervalGate {
    min_interval: Duration,
    last_seen: Mutex<HashMap<String, Instant>>,
}

impl MinIntervalGate {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_seen: Mutex::new(HashMap::new()),
        }
    }

    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    /// Returns `true` and records the attempt when `key` has been quiet for at
    /// least the interval; `false` otherwise.
    ///
    /// Rejected attempts do not extend the quiet period.
    pub async fn try_pass(&self, key: &str) -> bool {
        self.try_pass_at(key, Instant::now()).await
    }

    async fn try_pass_at(&self, key: &str, now: Instant) -> bool {
        if self.min_interval.is_zero() {
            return true;
        }

        let mut last_seen = self.last_seen.lock().await;

        // Forget keys that went quiet so the map stays small.
        let min_interval = self.min_interval;
        last_seen.retain(|_, seen| now.saturating_duration_since(*seen) < min_interval);

        if last_seen.contains_key(key) {
            return false;
        }

        last_seen.insert(key.to_string(), now);
        true
    }
}
