//! Shared Cache
//!
//! Thread-safe handle around [`Cache`] that owns the active sweep timer.

use std::borrow::Borrow;
use std::hash::Hash;
use std::sync::{Arc, Weak};
use std::time::Duration;

use tokio::sync::{Mutex, MutexGuard};
use tracing::warn;

use super::cleanup::{spawn_cleanup_task, CleanupHandle, CleanupTimer};
use crate::cache::{Cache, CacheOptions, CacheStats};

/// Engine plus timer, shared by every [`SharedCache`] clone.
pub(crate) struct SharedState<K, V> {
    pub(crate) cache: Mutex<Cache<K, V>>,
    timer: Arc<CleanupTimer>,
}

// == Shared Cache ==
/// Cloneable, `Send + Sync` cache handle.
///
/// One mutex guards the whole engine. Observers run while that lock is held,
/// so they must not call back into the entry operations; stopping the timer
/// through [`CleanupHandle`] is fine.
pub struct SharedCache<K, V> {
    state: Arc<SharedState<K, V>>,
}

impl<K, V> Drop for SharedState<K, V> {
    fn drop(&mut self) {
        self.timer.stop();
    }
}

impl<K, V> Clone for SharedCache<K, V> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
        }
    }
}

impl<K, V> SharedCache<K, V>
where
    K: Hash + Eq + Clone + Send + 'static,
    V: Clone + Send + 'static,
{
    // == Constructor ==
    /// Builds the cache and, when a TTL is configured, starts the sweep timer
    /// at the configured cleanup interval.
    pub fn new(options: CacheOptions<K, V>) -> Self {
        let cache = Cache::new(options);
        let auto_cleanup = (!cache.ttl().is_zero()).then(|| cache.cleanup_interval());

        let shared = Self {
            state: Arc::new(SharedState {
                cache: Mutex::new(cache),
                timer: Arc::new(CleanupTimer::default()),
            }),
        };

        if let Some(interval) = auto_cleanup {
            shared.start_auto_cleanup(interval);
        }
        shared
    }

    // == Entry Operations ==
    pub async fn set(&self, key: K, value: V) {
        self.state.cache.lock().await.set(key, value);
    }

    pub async fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.state.cache.lock().await.get(key).cloned()
    }

    pub async fn has<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.state.cache.lock().await.has(key)
    }

    pub async fn peek<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.state.cache.lock().await.peek(key).cloned()
    }

    pub async fn delete<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.state.cache.lock().await.delete(key)
    }

    pub async fn clear(&self) {
        self.state.cache.lock().await.clear();
    }

    /// Live entry count, after sweeping expired entries.
    pub async fn size(&self) -> usize {
        self.state.cache.lock().await.size()
    }

    /// Stored entry count, without sweeping.
    pub async fn len(&self) -> usize {
        self.state.cache.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.state.cache.lock().await.is_empty()
    }

    pub async fn sweep_expired(&self) -> usize {
        self.state.cache.lock().await.sweep_expired()
    }

    // == Snapshots ==
    /// Stored keys oldest first, including expired entries not yet swept.
    pub async fn keys(&self) -> Vec<K> {
        self.state.cache.lock().await.keys().cloned().collect()
    }

    pub async fn values(&self) -> Vec<V> {
        self.state.cache.lock().await.values().cloned().collect()
    }

    pub async fn entries(&self) -> Vec<(K, V)> {
        self.state
            .cache
            .lock()
            .await
            .entries()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Runs `f` over live entries while holding the lock.
    pub async fn for_each<F>(&self, f: F)
    where
        F: FnMut(&K, &V),
    {
        self.state.cache.lock().await.for_each(f);
    }

    pub async fn stats(&self) -> CacheStats {
        self.state.cache.lock().await.stats()
    }

    /// Direct access to the engine for multi-step operations.
    pub async fn lock(&self) -> MutexGuard<'_, Cache<K, V>> {
        self.state.cache.lock().await
    }

    // == Auto Cleanup ==
    /// Starts the periodic sweep. No-op if it is already running.
    ///
    /// Returns whether a new timer was started. Outside a tokio runtime nothing
    /// is started and a warning is logged.
    pub fn start_auto_cleanup(&self, interval: Duration) -> bool {
        if tokio::runtime::Handle::try_current().is_err() {
            warn!("No tokio runtime available, TTL cleanup task not started");
            return false;
        }

        let weak: Weak<SharedState<K, V>> = Arc::downgrade(&self.state);
        self.state
            .timer
            .start_with(|| spawn_cleanup_task(weak, interval))
    }

    /// Cancels the periodic sweep. Safe to call when it is not running.
    pub fn stop_auto_cleanup(&self) -> bool {
        self.state.timer.stop()
    }

    pub fn is_auto_cleanup_running(&self) -> bool {
        self.state.timer.is_running()
    }

    /// Timer control that does not keep the cache alive.
    pub fn cleanup_handle(&self) -> CleanupHandle {
        CleanupHandle {
            timer: Arc::clone(&self.state.timer),
        }
    }

    // == Teardown ==
    /// Stops the sweep timer and drops every entry.
    pub async fn destroy(&self) {
        self.stop_auto_cleanup();
        self.clear().await;
    }
}

impl<K, V> Default for SharedCache<K, V>
where
    K: Hash + Eq + Clone + Send + 'static,
    V: Clone + Send + 'static,
{
    fn default() -> Self {
        Self::new(CacheOptions::new())
    }
}
