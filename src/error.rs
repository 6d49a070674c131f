//! Error types for the Sprix pacing tools.
//!
//! The split calculator itself never fails; these cover the edges around it:
//! configuration files, command-line input and exports.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for all Sprix operations.
#[derive(Error, Debug)]
pub enum SprixError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Command-line or race file input errors
    #[error("Input error: {0}")]
    Input(#[from] InputError),

    /// Plan export errors
    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Race input errors
#[derive(Error, Debug)]
pub enum InputError {
    #[error("Unknown preset '{name}'")]
    UnknownPreset { name: String },

    #[error("Invalid goal time '{text}': expected H:MM:SS or M:SS")]
    InvalidGoalTime { text: String },

    #[error("Distance must be positive, got {distance_km} km")]
    NonPositiveDistance { distance_km: f64 },

    #[error("Distance {distance_km} km is beyond the {max_km} km limit")]
    DistanceTooLong { distance_km: f64, max_km: f64 },

    #[error("No distance given and no preset to take one from")]
    MissingDistance,

    #[error("No goal time given and no preset to take one from")]
    MissingGoal,
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load config file '{path}': {source}")]
    LoadFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid config format in '{path}': {source}")]
    InvalidFormat {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Config validation failed: {reason}")]
    ValidationFailed { reason: String },

    #[error("Failed to save config to '{path}': {source}")]
    SaveFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Config serialization failed: {source}")]
    SerializationFailed { source: toml::ser::Error },
}

/// Export errors
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Failed to write '{path}': {source}")]
    WriteFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("CSV encoding failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON encoding failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Text formatting failed: {0}")]
    Format(#[from] std::fmt::Error),
}

/// Result type alias for Sprix operations
pub type Result<T, E = SprixError> = std::result::Result<T, E>;

impl InputError {
    /// Get user-friendly message
    pub fn user_message(&self) -> String {
        match self {
            InputError::UnknownPreset { name } => {
                format!("There is no race preset called '{}'", name)
            }
            InputError::InvalidGoalTime { text } => {
                format!("'{}' is not a finish time", text)
            }
            InputError::NonPositiveDistance { .. } => "Race distance must be above zero".to_string(),
            InputError::DistanceTooLong { max_km, .. } => {
                format!("Race distance must be at most {} km", max_km)
            }
            InputError::MissingDistance => "Choose a race distance first".to_string(),
            InputError::MissingGoal => "Choose a goal finish time first".to_string(),
        }
    }

    /// Get suggested recovery action
    pub fn recovery_hint(&self) -> Option<&str> {
        match self {
            InputError::UnknownPreset { .. } => Some("Run `sprix presets` to list available races"),
            InputError::InvalidGoalTime { .. } => Some("Write the goal like 3:59:59 or 24:30"),
            InputError::NonPositiveDistance { .. }
            | InputError::DistanceTooLong { .. }
            | InputError::MissingDistance => {
                Some("Pass a distance in km, e.g. 21.0975, or --preset half")
            }
            InputError::MissingGoal => Some("Pass --goal, e.g. --goal 1:45:00"),
        }
    }
}

impl ExportError {
    /// Check if retrying the export could succeed
    pub fn is_recoverable(&self) -> bool {
        matches!(self, ExportError::WriteFailed { .. })
    }
}
