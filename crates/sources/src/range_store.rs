//! Editable per-sensor range configuration

use log::{info, warn};
use sensor_deck_core::RangeConfigSource;
use sensor_deck_types::RangeConfig;
use std::collections::HashMap;
use std::path::Path;

use crate::error::SourceError;

/// Range configs keyed by sensor id.
///
/// Sensors without an entry use the built-in default bands. The file format
/// is a JSON object mapping sensor ids to partial or full range configs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RangeStore {
    configs: HashMap<String, RangeConfig>,
}

impl RangeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_map(configs: HashMap<String, RangeConfig>) -> Self {
        Self { configs }
    }

    /// Load from a JSON file; a missing file yields an empty store
    pub fn load_from_path(path: &Path) -> Result<Self, SourceError> {
        if !path.exists() {
            warn!("Range file {} not found, using defaults", path.display());
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path).map_err(|source| SourceError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let configs: HashMap<String, RangeConfig> =
            serde_json::from_str(&content).map_err(|source| SourceError::Json {
                path: path.to_path_buf(),
                source,
            })?;
        info!("Loaded range configs for {} sensors", configs.len());
        Ok(Self { configs })
    }

    /// Write the store as pretty JSON, creating parent directories
    pub fn save_to_path(&self, path: &Path) -> Result<(), SourceError> {
        let io_error = |source| SourceError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(io_error)?;
        }
        let content =
            serde_json::to_string_pretty(&self.configs).map_err(|source| SourceError::Json {
                path: path.to_path_buf(),
                source,
            })?;
        std::fs::write(path, content).map_err(io_error)
    }

    /// Set or replace the config for a sensor
    pub fn set(&mut self, sensor_id: impl Into<String>, config: RangeConfig) {
        self.configs.insert(sensor_id.into(), config);
    }

    /// Drop a sensor's entry.
    ///
    /// The registry keeps the last config it was given, so this only affects
    /// sensors seen for the first time afterwards.
    pub fn remove(&mut self, sensor_id: &str) -> Option<RangeConfig> {
        self.configs.remove(sensor_id)
    }

    /// Layer `other` over this store; its entries win
    pub fn merge(&mut self, other: RangeStore) {
        self.configs.extend(other.configs);
    }

    pub fn get(&self, sensor_id: &str) -> Option<&RangeConfig> {
        self.configs.get(sensor_id)
    }

    pub fn len(&self) -> usize {
        self.configs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.configs.is_empty()
    }
}

impl RangeConfigSource for RangeStore {
    fn range_config(&self, sensor_id: &str) -> Option<RangeConfig> {
        self.configs.get(sensor_id).copied()
    }
}
