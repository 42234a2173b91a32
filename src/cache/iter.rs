//! Enumeration Views
//!
//! Read-only iterators over a [`Cache`](super::Cache). None of them remove
//! expired entries or fire observers.

use std::iter::FusedIterator;

use crate::cache::entry::current_timestamp_ms;
use crate::cache::lru;
use crate::cache::store::Slot;

/// All stored keys oldest first, expired or not.
pub struct Keys<'a, K, V> {
    inner: lru::Iter<'a, Slot<K, V>>,
}

impl<'a, K, V> Keys<'a, K, V> {
    pub(crate) fn new(inner: lru::Iter<'a, Slot<K, V>>) -> Self {
        Self { inner }
    }
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|slot| &slot.key)
    }
}

impl<K, V> FusedIterator for Keys<'_, K, V> {}

/// Live key/value pairs oldest first.
///
/// Expiry is checked against the clock as each item is reached.
pub struct Entries<'a, K, V> {
    inner: lru::Iter<'a, Slot<K, V>>,
}

impl<'a, K, V> Entries<'a, K, V> {
    pub(crate) fn new(inner: lru::Iter<'a, Slot<K, V>>) -> Self {
        Self { inner }
    }
}

impl<'a, K, V> Iterator for Entries<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner
            .by_ref()
            .find(|slot| !slot.entry.is_expired_at(current_timestamp_ms()))
            .map(|slot| (&slot.key, &slot.entry.value))
    }
}

impl<K, V> FusedIterator for Entries<'_, K, V> {}

/// Live values oldest first.
pub struct Values<'a, K, V> {
    inner: Entries<'a, K, V>,
}

impl<'a, K, V> Values<'a, K, V> {
    pub(crate) fn new(inner: lru::Iter<'a, Slot<K, V>>) -> Self {
        Self {
            inner: Entries::new(inner),
        }
    }
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, value)| value)
    }
}

impl<K, V> FusedIterator for Values<'_, K, V> {}
