//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Maximum number of cached presets, 0 = unbounded
    pub max_entries: usize,
    /// Preset lifetime in milliseconds, 0 = never expire
    pub ttl_ms: u64,
    /// Active sweep interval in milliseconds
    pub cleanup_interval_ms: u64,
    /// HTTP server port
    pub server_port: u16,
    /// JSON file holding the filter presets
    pub presets_path: PathBuf,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `MAX_ENTRIES` - Maximum cached presets (default: 0, unbounded)
    /// - `CACHE_TTL_MS` - Preset TTL in milliseconds (default: 0, disabled)
    /// - `CLEANUP_INTERVAL_MS` - Sweep frequency in milliseconds (default: 60000)
    /// - `PORT` - HTTP server port (default: 5000)
    /// - `PRESETS_PATH` - Presets file (default: assets/filterPresets.json)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            max_entries: parse_var("MAX_ENTRIES").unwrap_or(defaults.max_entries),
            ttl_ms: parse_var("CACHE_TTL_MS").unwrap_or(defaults.ttl_ms),
            cleanup_interval_ms: parse_var("CLEANUP_INTERVAL_MS")
                .unwrap_or(defaults.cleanup_interval_ms),
            server_port: parse_var("PORT").unwrap_or(defaults.server_port),
            presets_path: env::var("PRESETS_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.presets_path),
        }
    }

    pub fn ttl(&self) -> Duration {
        Duration::from_millis(self.ttl_ms)
    }

    pub fn cleanup_interval(&self) -> Duration {
        Duration::from_millis(self.cleanup_interval_ms)
    }
}

fn parse_var<T: FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_entries: 0,
            ttl_ms: 0,
            cleanup_interval_ms: 60_000,
            server_port: 5000,
            presets_path: PathBuf::from("assets/filterPresets.json"),
        }
    }
}
