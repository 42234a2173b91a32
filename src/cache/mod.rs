//! Cache Module
//!
//! Bounded in-memory cache with LRU eviction and lazy plus active TTL expiration.

mod entry;
mod iter;
mod lru;
mod options;
mod stats;
mod store;


// Re-export public types
pub use entry::{current_timestamp_ms, CacheEntry};
pub use iter::{Entries, Keys, Values};
pub use lru::{Handle, RecencyList};
pub use options::{CacheOptions, Observer, DEFAULT_CLEANUP_INTERVAL};
pub use stats::CacheStats;
pub use store::Cache;
