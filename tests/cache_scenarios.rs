//! Cache Scenario Tests
//!
//! End-to-end eviction and expiration scenarios through the public API.

use std::sync::{Arc, Mutex};
use std::thread::sleep;
use std::time::Duration;

use preset_cache::{Cache, CacheOptions, SharedCache};

type Log = Arc<Mutex<Vec<(&'static str, i32)>>>;

fn log() -> Log {
    Arc::new(Mutex::new(Vec::new()))
}

fn live_keys(cache: &Cache<&'static str, i32>) -> Vec<&'static str> {
    cache.entries().map(|(k, _)| *k).collect()
}

#[test]
fn scenario_capacity_two_evicts_first_insert() {
    let evicted = log();
    let sink = evicted.clone();
    let mut cache = Cache::new(
        CacheOptions::new()
            .max_size(2)
            .on_evict(move |k: &&'static str, v: &i32| sink.lock().unwrap().push((*k, *v))),
    );

    cache.set("a", 1);
    cache.set("b", 2);
    cache.set("c", 3);

    assert_eq!(cache.size(), 2);
    assert_eq!(live_keys(&cache), vec!["b", "c"]);
    assert_eq!(*evicted.lock().unwrap(), vec![("a", 1)]);
}

#[test]
fn scenario_ttl_expires_on_read() {
    let expired = log();
    let sink = expired.clone();
    let mut cache = Cache::new(
        CacheOptions::new()
            .ttl(Duration::from_millis(50))
            .on_expire(move |k: &&'static str, v: &i32| sink.lock().unwrap().push((*k, *v))),
    );

    cache.set("x", 1);
    sleep(Duration::from_millis(60));

    assert_eq!(cache.get("x"), None);
    assert_eq!(*expired.lock().unwrap(), vec![("x", 1)]);
}

#[test]
fn scenario_read_reranks_before_eviction() {
    let evicted = log();
    let sink = evicted.clone();
    let mut cache = Cache::new(
        CacheOptions::new()
            .max_size(3)
            .on_evict(move |k: &&'static str, v: &i32| sink.lock().unwrap().push((*k, *v))),
    );

    cache.set("a", 1);
    cache.set("b", 2);
    cache.set("c", 3);
    cache.get("a");
    cache.set("d", 4);

    assert_eq!(*evicted.lock().unwrap(), vec![("b", 2)]);
    assert_eq!(live_keys(&cache), vec!["c", "a", "d"]);
}

#[test]
fn size_accessor_sweeps_but_views_do_not() {
    let mut cache = Cache::new(CacheOptions::new().ttl(Duration::from_millis(20)));
    cache.set("a", 1);
    cache.set("b", 2);
    sleep(Duration::from_millis(40));
    cache.set("c", 3);

    assert_eq!(cache.values().copied().collect::<Vec<_>>(), vec![3]);
    assert_eq!(cache.len(), 3);
    assert_eq!(cache.keys().count(), 3);

    assert_eq!(cache.size(), 1);
    assert_eq!(cache.len(), 1);
}

#[tokio::test]
async fn shared_cache_sweeps_in_background() {
    let expired = log();
    let sink = expired.clone();
    let cache = SharedCache::new(
        CacheOptions::new()
            .ttl(Duration::from_millis(20))
            .cleanup_interval(Duration::from_millis(15))
            .on_expire(move |k: &&'static str, v: &i32| sink.lock().unwrap().push((*k, *v))),
    );

    cache.set("a", 1).await;
    cache.set("b", 2).await;
    tokio::time::sleep(Duration::from_millis(150)).await;

    assert!(cache.is_empty().await);
    let mut reported = expired.lock().unwrap().clone();
    reported.sort();
    assert_eq!(reported, vec![("a", 1), ("b", 2)]);

    cache.destroy().await;
    assert!(!cache.is_auto_cleanup_running());
}
