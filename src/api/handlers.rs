//! API Handlers
//!
//! HTTP request handlers for the preset server endpoints.

use axum::{
    extract::{Path, State},
    Json,
};
use tracing::{debug, warn};

use crate::cache::CacheOptions;
use crate::config::Config;
use crate::error::{CacheError, Result};
use crate::models::{HealthResponse, StatsResponse};
use crate::presets::{validate_name, FilterPreset, PresetSource};
use crate::tasks::SharedCache;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Presets memoized by name
    pub cache: SharedCache<String, FilterPreset>,
    /// Where presets are loaded from on a miss
    pub source: PresetSource,
}

impl AppState {
    /// Creates a new AppState from an existing cache and preset source.
    pub fn new(cache: SharedCache<String, FilterPreset>, source: PresetSource) -> Self {
        Self { cache, source }
    }

    /// Creates a new AppState from configuration.
    ///
    /// With a non-zero TTL this starts the background sweep, so it must run
    /// inside the tokio runtime.
    pub fn from_config(config: &Config) -> Self {
        let options = CacheOptions::new()
            .max_size(config.max_entries)
            .ttl(config.ttl())
            .cleanup_interval(config.cleanup_interval())
            .on_evict(|name: &String, _: &FilterPreset| {
                debug!(preset = %name, "preset evicted from cache");
            })
            .on_expire(|name: &String, _: &FilterPreset| {
                debug!(preset = %name, "preset expired from cache");
            });

        Self::new(
            SharedCache::new(options),
            PresetSource::new(&config.presets_path),
        )
    }

    /// Reloads the presets file and stores every preset in the cache.
    pub async fn refresh(&self) -> Result<Vec<FilterPreset>> {
        let presets = self.source.load().await?;

        let mut cache = self.cache.lock().await;
        for preset in &presets {
            cache.set(preset.name.clone(), preset.clone());
        }

        Ok(presets)
    }
}

/// Handler for GET /filter/presets
///
/// Returns every preset in the file. An unreadable file yields an empty list.
pub async fn list_presets_handler(State(state): State<AppState>) -> Json<Vec<FilterPreset>> {
    match state.refresh().await {
        Ok(presets) => Json(presets),
        Err(err) => {
            warn!(
                path = %state.source.path().display(),
                "Error reading the presets file: {}",
                err
            );
            Json(Vec::new())
        }
    }
}

/// Handler for GET /filter/presets/:name
///
/// Serves from the cache and reloads the file on a miss.
pub async fn get_preset_handler(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<FilterPreset>> {
    validate_name(&name)?;

    if let Some(preset) = state.cache.get(&name).await {
        return Ok(Json(preset));
    }

    debug!(preset = %name, "cache miss, reloading presets");
    let presets = state.refresh().await?;
    presets
        .into_iter()
        .find(|p| p.name == name)
        .map(Json)
        .ok_or(CacheError::NotFound(name))
}

/// Handler for POST /filter/presets
pub async fn create_preset_handler() -> Result<Json<FilterPreset>> {
    Err(CacheError::NotImplemented("POST"))
}

/// Handler for PUT /filter/presets/:name
pub async fn update_preset_handler(Path(_name): Path<String>) -> Result<Json<FilterPreset>> {
    Err(CacheError::NotImplemented("PUT"))
}

/// Handler for DELETE /filter/presets/:name
pub async fn delete_preset_handler(Path(_name): Path<String>) -> Result<Json<FilterPreset>> {
    Err(CacheError::NotImplemented("DELETE"))
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(state.cache.stats().await.into())
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn presets_file(name: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "preset_cache_handlers_{}_{}.json",
            name,
            std::process::id()
        ));
        std::fs::write(
            &path,
            r#"[{"name":"warm","levels":{"gBlur":0.3}},{"name":"noir","filters":{"bw":true}}]"#,
        )
        .unwrap();
        path
    }

    fn state_for(path: &PathBuf) -> AppState {
        AppState::new(SharedCache::default(), PresetSource::new(path))
    }

    #[tokio::test]
    async fn test_list_fills_cache() {
        let path = presets_file("list");
        let state = state_for(&path);

        let Json(presets) = list_presets_handler(State(state.clone())).await;

        assert_eq!(presets.len(), 2);
        assert_eq!(state.cache.keys().await, vec!["warm", "noir"]);
        std::fs::remove_file(path).ok();
    }

    #[tokio::test]
    async fn test_list_missing_file_is_empty() {
        let state = state_for(&PathBuf::from("/nonexistent/presets.json"));

        let Json(presets) = list_presets_handler(State(state)).await;
        assert!(presets.is_empty());
    }

    #[tokio::test]
    async fn test_get_preset_hits_cache() {
        let state = state_for(&PathBuf::from("/nonexistent/presets.json"));
        state
            .cache
            .set("cached".to_string(), FilterPreset::new("cached"))
            .await;

        let result = get_preset_handler(State(state.clone()), Path("cached".to_string())).await;

        assert_eq!(result.unwrap().name, "cached");
        assert_eq!(state.cache.stats().await.hits, 1);
    }

    #[tokio::test]
    async fn test_get_preset_reloads_on_miss() {
        let path = presets_file("miss");
        let state = state_for(&path);

        let Json(preset) = get_preset_handler(State(state.clone()), Path("noir".to_string()))
            .await
            .unwrap();

        assert_eq!(preset.name, "noir");
        assert!(state.cache.has("warm").await);
        std::fs::remove_file(path).ok();
    }

    #[tokio::test]
    async fn test_get_unknown_preset() {
        let path = presets_file("unknown");
        let state = state_for(&path);

        let result = get_preset_handler(State(state), Path("sepia".to_string())).await;

        assert!(matches!(result, Err(CacheError::NotFound(_))));
        std::fs::remove_file(path).ok();
    }

    #[tokio::test]
    async fn test_write_endpoints_not_implemented() {
        assert!(matches!(
            create_preset_handler().await,
            Err(CacheError::NotImplemented("POST"))
        ));
        assert!(matches!(
            update_preset_handler(Path("x".to_string())).await,
            Err(CacheError::NotImplemented("PUT"))
        ));
        assert!(matches!(
            delete_preset_handler(Path("x".to_string())).await,
            Err(CacheError::NotImplemented("DELETE"))
        ));
    }

    #[tokio::test]
    async fn test_from_config_starts_sweep_only_with_ttl() {
        let state = AppState::from_config(&Config::default());
        assert!(!state.cache.is_auto_cleanup_running());

        let config = Config {
            max_entries: 2,
            ttl_ms: 1_000,
            ..Config::default()
        };
        let state = AppState::from_config(&config);
        assert!(state.cache.is_auto_cleanup_running());
        assert_eq!(state.cache.lock().await.max_size(), Some(2));
        state.cache.destroy().await;
    }

    #[tokio::test]
    async fn test_health_handler() {
        let response = health_handler().await;
        assert_eq!(response.status, "healthy");
    }
}
