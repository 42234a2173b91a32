//! Preset Cache - bounded, time-aware cache engine
//!
//! LRU eviction by entry count, uniform TTL with lazy and active expiration,
//! and eviction/expiration observers. Ships with a small server that memoizes
//! filter presets through the cache.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod presets;
pub mod tasks;

pub use api::AppState;
pub use cache::{Cache, CacheOptions};
pub use config::Config;
pub use tasks::{CleanupHandle, SharedCache};
