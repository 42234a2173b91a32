//! Cache Store Module
//!
//! Main cache engine combining a hash index with recency tracking and TTL expiration.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::time::Duration;

use tracing::debug;

use crate::cache::entry::current_timestamp_ms;
use crate::cache::iter::{Entries, Keys, Values};
use crate::cache::lru::{Handle, RecencyList};
use crate::cache::{CacheEntry, CacheOptions, CacheStats, Observer};

/// A key and its entry, linked into the recency list.
#[derive(Debug)]
pub(crate) struct Slot<K, V> {
    pub(crate) key: K,
    pub(crate) entry: CacheEntry<V>,
}

// == Cache ==
/// Bounded, time-aware LRU cache.
///
/// Reads (`get`) refresh recency but not expiry. Expired entries stay stored
/// until `get`, `has`, `size` or `sweep_expired` finds them; the enumeration
/// views skip them without removing anything.
pub struct Cache<K, V> {
    /// Key to node lookup
    index: HashMap<K, Handle>,
    /// Entries, oldest first
    order: RecencyList<Slot<K, V>>,
    stats: CacheStats,
    max_size: Option<usize>,
    ttl: Duration,
    cleanup_interval: Duration,
    on_evict: Option<Observer<K, V>>,
    on_expire: Option<Observer<K, V>>,
}

impl<K, V> Cache<K, V>
where
    K: Hash + Eq + Clone,
{
    // == Constructor ==
    pub fn new(options: CacheOptions<K, V>) -> Self {
        Self {
            index: HashMap::new(),
            order: RecencyList::new(),
            stats: CacheStats::new(),
            max_size: options.max_size,
            ttl: options.ttl,
            cleanup_interval: options.cleanup_interval,
            on_evict: options.on_evict,
            on_expire: options.on_expire,
        }
    }

    /// Creates a cache bounded to `max_size` entries, without TTL.
    pub fn with_max_size(max_size: usize) -> Self {
        Self::new(CacheOptions::new().max_size(max_size))
    }

    // == Set ==
    /// Stores a value at the most-recent position with a fresh expiry.
    ///
    /// Overwriting an existing key is never an eviction. Inserting a new key
    /// into a full cache evicts the least recently used entry and reports it
    /// to `on_evict` before the new entry goes in.
    pub fn set(&mut self, key: K, value: V) {
        if let Some(handle) = self.index.remove(&key) {
            self.order.remove(handle);
        } else if let Some(max) = self.max_size {
            if self.order.len() >= max {
                self.evict_oldest();
            }
        }

        let entry = CacheEntry::new(value, self.ttl);
        let handle = self.order.push_back(Slot {
            key: key.clone(),
            entry,
        });
        self.index.insert(key, handle);
    }

    // == Get ==
    /// Returns the live value and marks it most recently used.
    ///
    /// An expired entry is removed, reported to `on_expire` and read as absent.
    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let Some(handle) = self.live_handle(key) else {
            self.stats.record_miss();
            return None;
        };

        self.stats.record_hit();
        self.order.move_to_back(handle);
        self.order.get(handle).map(|slot| &slot.entry.value)
    }

    // == Has ==
    /// Existence check with lazy expiration but no recency touch.
    pub fn has<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.live_handle(key).is_some()
    }

    // == Peek ==
    /// Reads a live value without touching recency or removing anything.
    pub fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let handle = *self.index.get(key)?;
        self.order
            .get(handle)
            .filter(|slot| !slot.entry.is_expired())
            .map(|slot| &slot.entry.value)
    }

    // == Delete ==
    /// Removes an entry without expiry check or callback.
    ///
    /// Returns whether the key was stored.
    pub fn delete<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        match self.index.remove(key) {
            Some(handle) => self.order.remove(handle).is_some(),
            None => false,
        }
    }

    // == Clear ==
    /// Drops every entry. No callbacks fire.
    pub fn clear(&mut self) {
        self.index.clear();
        self.order.clear();
    }

    // == Size ==
    /// Sweeps expired entries, then returns the live count.
    pub fn size(&mut self) -> usize {
        self.sweep_expired();
        self.order.len()
    }

    /// Stored entries, including expired entries not yet swept.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    // == Sweep Expired ==
    /// Removes every expired entry, oldest first, reporting each to `on_expire`.
    ///
    /// Returns the number of entries removed.
    pub fn sweep_expired(&mut self) -> usize {
        let now = current_timestamp_ms();
        let expired: Vec<Handle> = self
            .order
            .iter_handles()
            .filter(|(_, slot)| slot.entry.is_expired_at(now))
            .map(|(handle, _)| handle)
            .collect();

        let count = expired.len();
        for handle in expired {
            self.expire(handle);
        }
        count
    }

    // == Enumeration ==
    /// Keys oldest first, including expired entries not yet swept.
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys::new(self.order.iter())
    }

    /// Live values oldest first.
    pub fn values(&self) -> Values<'_, K, V> {
        Values::new(self.order.iter())
    }

    /// Live key/value pairs oldest first.
    pub fn entries(&self) -> Entries<'_, K, V> {
        Entries::new(self.order.iter())
    }

    pub fn iter(&self) -> Entries<'_, K, V> {
        self.entries()
    }

    /// Calls `f` for each live entry, oldest first.
    pub fn for_each<F>(&self, mut f: F)
    where
        F: FnMut(&K, &V),
    {
        for (key, value) in self.entries() {
            f(key, value);
        }
    }

    // == Stats ==
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.order.len());
        stats
    }

    // == Accessors ==
    /// Capacity bound, None when unbounded.
    pub fn max_size(&self) -> Option<usize> {
        self.max_size
    }

    /// Entry lifetime, zero when expiration is disabled.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn cleanup_interval(&self) -> Duration {
        self.cleanup_interval
    }

    /// Looks up a key, expiring it on the spot if its TTL has passed.
    fn live_handle<Q>(&mut self, key: &Q) -> Option<Handle>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let handle = *self.index.get(key)?;
        let expired = self
            .order
            .get(handle)
            .map_or(true, |slot| slot.entry.is_expired());

        if expired {
            self.expire(handle);
            return None;
        }
        Some(handle)
    }

    fn evict_oldest(&mut self) {
        let Some(slot) = self.order.pop_front() else {
            return;
        };
        self.index.remove(&slot.key);
        self.stats.record_eviction();
        debug!(entries = self.order.len(), "evicted least recently used entry");

        if let Some(on_evict) = self.on_evict.as_mut() {
            on_evict(&slot.key, &slot.entry.value);
        }
    }

    fn expire(&mut self, handle: Handle) {
        let Some(slot) = self.order.remove(handle) else {
            return;
        };
        self.index.remove(&slot.key);
        self.stats.record_expiration();
        debug!(entries = self.order.len(), "removed expired entry");

        if let Some(on_expire) = self.on_expire.as_mut() {
            on_expire(&slot.key, &slot.entry.value);
        }
    }
}

impl<K, V> Default for Cache<K, V>
where
    K: Hash + Eq + Clone,
{
    fn default() -> Self {
        Self::new(CacheOptions::new())
    }
}

impl<'a, K, V> IntoIterator for &'a Cache<K, V>
where
    K: Hash + Eq + Clone,
{
    type Item = (&'a K, &'a V);
    type IntoIter = Entries<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries()
    }
}

impl<K, V> fmt::Debug for Cache<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cache")
            .field("len", &self.order.len())
            .field("max_size", &self.max_size)
            .field("ttl", &self.ttl)
            .field("stats", &self.stats)
            .finish()
    }
}
