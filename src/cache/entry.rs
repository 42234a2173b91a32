//! Cache Entry Module
//!
//! Defines the stored value together with its optional expiry timestamp.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

// == Cache Entry ==
/// A single stored value with its expiration metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry<V> {
    /// The stored value
    pub value: V,
    /// Expiration timestamp (Unix milliseconds), None = no expiration
    pub expiry: Option<u64>,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a new entry. A zero `ttl` leaves the entry without expiry.
    pub fn new(value: V, ttl: Duration) -> Self {
        let expiry = if ttl.is_zero() {
            None
        } else {
            // Sub-millisecond TTLs round up to 1 ms; oversized ones saturate.
            let ttl_ms = u64::try_from(ttl.as_millis()).unwrap_or(u64::MAX).max(1);
            Some(current_timestamp_ms().saturating_add(ttl_ms))
        };

        Self { value, expiry }
    }

    // == Is Expired ==
    /// Checks the entry against the current wall clock.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(current_timestamp_ms())
    }

    /// Checks the entry against a given timestamp.
    ///
    /// An entry expires strictly after its expiry instant: at `now == expiry`
    /// it is still live.
    pub fn is_expired_at(&self, now: u64) -> bool {
        match self.expiry {
            Some(expiry) => now > expiry,
            None => false,
        }
    }

}

// == Utility Functions ==
/// Returns current Unix timestamp in milliseconds.
///
/// A clock set before the epoch reads as zero.
pub fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
