//! Application configuration system with TOML persistence.
//!
//! Supports loading from file with fallback to sensible defaults.

use crate::error::{ConfigError, Result};
use crate::export::ExportFormat;
use crate::presets::{find_preset, DEFAULT_PRESET};
use crate::splits::Strategy;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Race defaults
    pub race: RaceConfig,

    /// Screen and print row policy
    pub display: DisplayConfig,

    /// Export defaults
    pub export: ExportConfig,
}

/// Race used when the command line does not name one
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RaceConfig {
    /// Preset label (see `sprix presets`)
    pub default_preset: String,

    /// Pacing strategy
    pub default_strategy: Strategy,
}

/// Row policy for the screen table and the printed band
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Races longer than this start collapsed to the summary rows
    pub summary_threshold_km: f64,

    /// Rows that fit on one A4 band with header and footer
    pub max_printable_rows: usize,
}

/// Export configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Output format when `--format` is not given
    pub default_format: ExportFormat,
}

impl Default for RaceConfig {
    fn default() -> Self {
        Self {
            default_preset: DEFAULT_PRESET.to_string(),
            default_strategy: Strategy::Even,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            summary_threshold_km: 15.0,
            max_printable_rows: 44,
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            default_format: ExportFormat::Text,
        }
    }
}

impl AppConfig {
    /// Load configuration from TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            source,
        })?;

        let config: Self = toml::from_str(&contents).map_err(|source| ConfigError::InvalidFormat {
            path: path.to_path_buf(),
            source,
        })?;

        config.validate()?;
        tracing::debug!(path = %path.display(), "Loaded config");
        Ok(config)
    }

    /// Load configuration with fallback to defaults
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        Self::load_from_file(path).unwrap_or_else(|e| {
            tracing::warn!("Failed to load config, using defaults: {}", e);
            Self::default()
        })
    }

    /// Save configuration to TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| ConfigError::SaveFailed {
                path: path.to_path_buf(),
                source,
            })?;
        }

        let contents = self.to_toml()?;

        std::fs::write(path, contents).map_err(|source| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::info!(path = %path.display(), "Config saved");
        Ok(())
    }

    /// Render as pretty TOML
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|source| ConfigError::SerializationFailed { source })
    }

    /// Get default config file path
    pub fn default_path() -> PathBuf {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("sprix");

        config_dir.join("config.toml")
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if find_preset(&self.race.default_preset).is_none() {
            return Err(ConfigError::ValidationFailed {
                reason: format!("Unknown default preset '{}'", self.race.default_preset),
            });
        }

        let threshold = self.display.summary_threshold_km;
        if threshold.is_nan() || threshold <= 0.0 {
            return Err(ConfigError::ValidationFailed {
                reason: format!("Summary threshold {} km must be > 0", threshold),
            });
        }

        if self.display.max_printable_rows == 0 {
            return Err(ConfigError::ValidationFailed {
                reason: "Printable rows must be > 0".to_string(),
            });
        }

        Ok(())
    }
}

mod dirs {
    use std::path::PathBuf;

    pub fn config_dir() -> Option<PathBuf> {
        #[cfg(target_os = "linux")]
        {
            std::env::var("XDG_CONFIG_HOME")
                .ok()
                .map(PathBuf::from)
                .or_else(|| {
                    std::env::var("HOME")
                        .ok()
                        .map(|h| PathBuf::from(h).join(".config"))
                })
        }

        #[cfg(target_os = "macos")]
        {
            std::env::var("HOME")
                .ok()
                .map(|h| PathBuf::from(h).join("Library/Application Support"))
        }

        #[cfg(target_os = "windows")]
        {
            std::env::var("APPDATA").ok().map(PathBuf::from)
        }

        #[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
        {
            None
        }
    }
}
