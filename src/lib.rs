// Library interface for Sprix race pacing

pub mod batch;
pub mod config;
pub mod error;
pub mod export;
pub mod goal;
pub mod kick;
pub mod kit;
pub mod plan;
pub mod presets;
pub mod request;
pub mod splits;
pub mod time_codec;

// Re-export commonly used types
pub use config::AppConfig;
pub use error::{ConfigError, ExportError, InputError, Result, SprixError};
pub use goal::GoalTime;
pub use kick::kick_distance;
pub use plan::RacePlan;
pub use request::{RaceRequest, ResolvedRace};
pub use splits::{calculate_splits, compute_splits, RaceInput, Split, Strategy};
pub use time_codec::{seconds_to_time, time_to_seconds};
