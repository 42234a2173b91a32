//! TTL Cleanup Task
//!
//! Background task that periodically sweeps expired entries out of a shared cache.

use std::hash::Hash;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use super::shared::SharedState;

/// Shortest accepted tick interval.
const MIN_INTERVAL: Duration = Duration::from_millis(1);

// == Cleanup Timer ==
/// Slot holding the running sweep task, if any.
///
/// Lives outside the cache lock so it can be stopped from inside an observer.
/// Dropping the owning cache stops it.
#[derive(Debug, Default)]
pub(crate) struct CleanupTimer {
    handle: Mutex<Option<JoinHandle<()>>>,
}

impl CleanupTimer {
    fn slot(&self) -> MutexGuard<'_, Option<JoinHandle<()>>> {
        self.handle.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Stores `spawn()`'s task unless one is already running.
    pub(crate) fn start_with<F>(&self, spawn: F) -> bool
    where
        F: FnOnce() -> JoinHandle<()>,
    {
        let mut slot = self.slot();
        if slot.as_ref().is_some_and(|h| !h.is_finished()) {
            return false;
        }
        *slot = Some(spawn());
        true
    }

    /// Aborts the running task. Returns whether one was running.
    pub(crate) fn stop(&self) -> bool {
        match self.slot().take() {
            Some(handle) => {
                handle.abort();
                true
            }
            None => false,
        }
    }

    pub(crate) fn is_running(&self) -> bool {
        self.slot().as_ref().is_some_and(|h| !h.is_finished())
    }
}

// == Cleanup Handle ==
/// Detached control over a shared cache's sweep timer.
///
/// Can be captured by an observer to stop the sweep from inside a callback.
#[derive(Debug, Clone)]
pub struct CleanupHandle {
    pub(crate) timer: Arc<CleanupTimer>,
}

impl CleanupHandle {
    /// Cancels the sweep timer. Safe to call when it is not running.
    pub fn stop(&self) -> bool {
        self.timer.stop()
    }

    pub fn is_running(&self) -> bool {
        self.timer.is_running()
    }
}

/// Spawns a task that sweeps expired entries every `interval`.
///
/// The task only holds a weak reference and ends on its own once the cache is
/// dropped. Must be called from within a tokio runtime.
pub(crate) fn spawn_cleanup_task<K, V>(
    state: Weak<SharedState<K, V>>,
    interval: Duration,
) -> JoinHandle<()>
where
    K: Hash + Eq + Clone + Send + 'static,
    V: Send + 'static,
{
    let interval = interval.max(MIN_INTERVAL);

    tokio::spawn(async move {
        info!(
            "Starting TTL cleanup task with interval of {} ms",
            interval.as_millis()
        );

        loop {
            tokio::time::sleep(interval).await;

            let Some(state) = state.upgrade() else {
                debug!("cache dropped, TTL cleanup task exiting");
                break;
            };

            let removed = state.cache.lock().await.sweep_expired();
            drop(state);

            if removed > 0 {
                info!("TTL cleanup: removed {} expired entries", removed);
            } else {
                debug!("TTL cleanup: no expired entries found");
            }
        }
    })
}
