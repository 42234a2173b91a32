//! Filter Presets
//!
//! Named filter settings read from a JSON file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{CacheError, Result};

/// Longest accepted preset name, in bytes.
pub const MAX_NAME_LENGTH: usize = 256;

/// Rejects names that cannot identify a preset.
pub fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(CacheError::InvalidRequest(
            "Preset name cannot be empty".to_string(),
        ));
    }
    if name.len() > MAX_NAME_LENGTH {
        return Err(CacheError::InvalidRequest(format!(
            "Preset name exceeds maximum length of {} bytes",
            MAX_NAME_LENGTH
        )));
    }
    Ok(())
}

// == Filter Preset ==
/// A named bundle of filter settings.
///
/// Only `name` is interpreted; every other field is kept as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterPreset {
    pub name: String,
    #[serde(flatten)]
    pub settings: Map<String, Value>,
}

impl FilterPreset {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            settings: Map::new(),
        }
    }
}

// == Preset Source ==
/// Reads presets from a JSON array on disk.
#[derive(Debug, Clone)]
pub struct PresetSource {
    path: PathBuf,
}

impl PresetSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads and parses the whole file.
    pub async fn load(&self) -> Result<Vec<FilterPreset>> {
        let data = tokio::fs::read_to_string(&self.path).await?;
        let presets: Vec<FilterPreset> = serde_json::from_str(&data)?;
        debug!(count = presets.len(), path = %self.path.display(), "loaded presets");
        Ok(presets)
    }
}
