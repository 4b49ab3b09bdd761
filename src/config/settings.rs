//! Application configuration

use anyhow::{anyhow, Context, Result};
use log::{debug, info};
use sensor_deck_sources::{LocalTimeFormatter, RangeStore};
use sensor_deck_types::{FilterState, RangeConfig};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Current config format version
pub const CONFIG_VERSION: u32 = 1;

fn default_version() -> u32 {
    CONFIG_VERSION
}

fn default_poll_interval_secs() -> u64 {
    10
}

/// Application-wide configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Version of the config format
    #[serde(default = "default_version")]
    pub version: u32,
    /// Card size and spacing
    #[serde(default)]
    pub layout: LayoutConfig,
    /// Filters applied at startup
    #[serde(default)]
    pub filter: FilterState,
    /// Sensors marked favorite at startup, first entry shown first
    #[serde(default)]
    pub favorites: Vec<String>,
    /// Per-sensor good bands; sensors not listed use the defaults
    #[serde(default)]
    pub ranges: HashMap<String, RangeConfig>,
    /// IANA zone for card timestamps (machine local time when unset)
    #[serde(default)]
    pub timezone: Option<String>,
    /// Seconds between polls in watch mode
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,
}

impl AppConfig {
    /// Load configuration from disk
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            debug!("No config at {}, using defaults", config_path.display());
            return Ok(Self::default());
        }

        Self::load_from_path(&config_path)
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;
        self.save_to_path(&config_path)
    }

    /// Get the configuration file path
    pub fn config_path() -> Result<PathBuf> {
        let dirs = directories::ProjectDirs::from("org", "sensor-deck", "sensor-deck")
            .ok_or_else(|| anyhow!("Could not determine config directory"))?;

        Ok(dirs.config_dir().join("config.json"))
    }

    /// Load configuration from a specific file path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config {}", path.display()))?;
        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Save configuration to a specific file path
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs.max(1))
    }

    /// The configured ranges as a range source
    pub fn range_store(&self) -> RangeStore {
        RangeStore::from_map(self.ranges.clone())
    }

    /// Timestamp formatter for the configured zone
    pub fn timestamp_formatter(&self) -> Result<LocalTimeFormatter> {
        match &self.timezone {
            Some(name) => Ok(LocalTimeFormatter::from_zone_name(name)?),
            None => Ok(LocalTimeFormatter::local()),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            layout: LayoutConfig::default(),
            filter: FilterState::default(),
            favorites: Vec::new(),
            ranges: HashMap::new(),
            timezone: None,
            poll_interval_secs: default_poll_interval_secs(),
        }
    }
}

/// How visible cards are arranged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LayoutMode {
    /// Wrap cards into rows that fit the container width
    #[default]
    Flow,
    /// Fixed number of cards per row
    Grid {
        #[serde(default = "default_grid_columns")]
        columns: u32,
    },
}

/// Card geometry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutConfig {
    #[serde(default = "default_spacing")]
    pub spacing: i32,
    #[serde(default = "default_margin")]
    pub margin: i32,
    #[serde(default = "default_card_width")]
    pub card_width: i32,
    #[serde(default = "default_card_height")]
    pub card_height: i32,
    #[serde(default)]
    pub mode: LayoutMode,
}

fn default_grid_columns() -> u32 {
    3
}

fn default_spacing() -> i32 {
    10
}

fn default_margin() -> i32 {
    10
}

fn default_card_width() -> i32 {
    360
}

fn default_card_height() -> i32 {
    240
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            spacing: default_spacing(),
            margin: default_margin(),
            card_width: default_card_width(),
            card_height: default_card_height(),
            mode: LayoutMode::default(),
        }
    }
}
