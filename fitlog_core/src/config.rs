//! Configuration file support for fitlog.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/fitlog/config.toml`.

use crate::aggregate::WEEKDAY_LABELS;
use crate::dates::DEFAULT_WINDOW_DAYS;
use crate::smoothing::DEFAULT_SMOOTHING_WINDOW;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub stats: StatsConfig,
}

/// Data storage configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

/// Dashboard statistics parameters
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct StatsConfig {
    #[serde(default = "default_window_days")]
    pub window_days: usize,

    #[serde(default = "default_smoothing_window")]
    pub smoothing_window: usize,

    #[serde(default = "default_weekday_labels")]
    pub weekday_labels: Vec<String>,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            window_days: default_window_days(),
            smoothing_window: default_smoothing_window(),
            weekday_labels: default_weekday_labels(),
        }
    }
}

// Default value functions
fn default_data_dir() -> PathBuf {
    let base = dirs::data_local_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join(".local/share")))
        .unwrap_or_else(|| PathBuf::from("."));
    base.join("fitlog")
}

fn default_window_days() -> usize {
    DEFAULT_WINDOW_DAYS
}

fn default_smoothing_window() -> usize {
    DEFAULT_SMOOTHING_WINDOW
}

fn default_weekday_labels() -> Vec<String> {
    WEEKDAY_LABELS.iter().map(|l| l.to_string()).collect()
}

impl StatsConfig {
    /// Check value ranges that serde cannot express
    pub fn validate(&self) -> Result<()> {
        if self.window_days == 0 {
            return Err(Error::Config("stats.window_days must be at least 1".into()));
        }
        if self.smoothing_window == 0 {
            return Err(Error::Config(
                "stats.smoothing_window must be at least 1".into(),
            ));
        }
        if self.weekday_labels.len() != 7 {
            return Err(Error::Config(format!(
                "stats.weekday_labels needs 7 entries, got {}",
                self.weekday_labels.len()
            )));
        }
        Ok(())
    }
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::info!(
                "No config file found at {:?}, using defaults",
                config_path
            );
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    ///
    /// Only parses. Ranges are checked by [`StatsConfig::validate`] where the
    /// stats settings are actually used.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        let base = dirs::config_dir()
            .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
            .unwrap_or_else(|| PathBuf::from("."));
        base.join("fitlog").join("config.toml")
    }
}
