//! Cache Options Module
//!
//! Construction-time configuration for the cache engine.

use std::fmt;
use std::time::Duration;

/// Observer invoked with the key and value of a removed entry.
pub type Observer<K, V> = Box<dyn FnMut(&K, &V) + Send + 'static>;

/// Default interval between active sweep ticks.
pub const DEFAULT_CLEANUP_INTERVAL: Duration = Duration::from_millis(60_000);

// == Cache Options ==
/// Builder for [`Cache`](super::Cache) and [`SharedCache`](crate::tasks::SharedCache).
///
/// ```
/// use std::time::Duration;
/// use preset_cache::cache::{Cache, CacheOptions};
///
/// let mut cache = Cache::new(
///     CacheOptions::new()
///         .max_size(2)
///         .ttl(Duration::from_secs(30))
///         .on_evict(|key: &String, _value: &u32| println!("evicted {key}")),
/// );
/// cache.set("a".to_string(), 1);
/// assert_eq!(cache.get(&"a".to_string()), Some(&1));
/// ```
pub struct CacheOptions<K, V> {
    pub(crate) max_size: Option<usize>,
    pub(crate) ttl: Duration,
    pub(crate) cleanup_interval: Duration,
    pub(crate) on_evict: Option<Observer<K, V>>,
    pub(crate) on_expire: Option<Observer<K, V>>,
}

impl<K, V> CacheOptions<K, V> {
    /// Unbounded, no TTL, no observers.
    pub fn new() -> Self {
        Self {
            max_size: None,
            ttl: Duration::ZERO,
            cleanup_interval: DEFAULT_CLEANUP_INTERVAL,
            on_evict: None,
            on_expire: None,
        }
    }

    /// Caps the number of stored entries. Zero means unbounded.
    pub fn max_size(mut self, max_size: usize) -> Self {
        self.max_size = (max_size > 0).then_some(max_size);
        self
    }

    /// Uniform lifetime applied to every entry. Zero disables expiration.
    pub fn ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Interval of the sweep that starts automatically when a TTL is set.
    ///
    /// Only [`SharedCache`](crate::tasks::SharedCache) runs a timer.
    pub fn cleanup_interval(mut self, interval: Duration) -> Self {
        self.cleanup_interval = interval;
        self
    }

    pub fn on_evict<F>(mut self, observer: F) -> Self
    where
        F: FnMut(&K, &V) + Send + 'static,
    {
        self.on_evict = Some(Box::new(observer));
        self
    }

    pub fn on_expire<F>(mut self, observer: F) -> Self
    where
        F: FnMut(&K, &V) + Send + 'static,
    {
        self.on_expire = Some(Box::new(observer));
        self
    }
}

impl<K, V> Default for CacheOptions<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> fmt::Debug for CacheOptions<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheOptions")
            .field("max_size", &self.max_size)
            .field("ttl", &self.ttl)
            .field("cleanup_interval", &self.cleanup_interval)
            .field("on_evict", &self.on_evict.is_some())
            .field("on_expire", &self.on_expire.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let opts: CacheOptions<String, u32> = CacheOptions::default();
        assert_eq!(opts.max_size, None);
        assert!(opts.ttl.is_zero());
        assert_eq!(opts.cleanup_interval, DEFAULT_CLEANUP_INTERVAL);
        assert!(opts.on_evict.is_none());
        assert!(opts.on_expire.is_none());
    }

    #[test]
    fn test_zero_max_size_is_unbounded() {
        let opts: CacheOptions<String, u32> = CacheOptions::new().max_size(0);
        assert_eq!(opts.max_size, None);

        let opts: CacheOptions<String, u32> = CacheOptions::new().max_size(5);
        assert_eq!(opts.max_size, Some(5));
    }

    #[test]
    fn test_debug_hides_observers() {
        let opts: CacheOptions<String, u32> = CacheOptions::new().on_expire(|_, _| {});
        let debug = format!("{:?}", opts);
        assert!(debug.contains("on_expire: true"));
        assert!(debug.contains("on_evict: false"));
    }
}
