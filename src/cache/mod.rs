//! Cache Module
//!
//! Expiring memoization of generated diagrams over a pluggable durable store.

mod entry;
mod expiring;
mod stats;
mod store;


// Re-export public types
pub use entry::{current_timestamp_ms, CacheEntry};
pub use expiring::{Clock, ExpiringCache, ManualClock, SystemClock, CACHE_NAMESPACE, DEFAULT_TTL};
pub use stats::CacheStats;
pub use store::{FileStore, KeyValueStore, MemoryStore};
