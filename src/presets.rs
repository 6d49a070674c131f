//! Standard race presets.
//!
//! Each preset pairs a common race distance with a typical goal time, so a
//! plan can be started with a single name.

use crate::goal::GoalTime;

/// A named race distance with a default goal time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RacePreset {
    /// Short label shown on buttons and the command line
    pub label: &'static str,
    /// Distance in kilometers
    pub distance_km: f64,
    /// Goal filled in when the preset is chosen
    pub default_goal: GoalTime,
}

/// Standard road race presets, shortest first
pub const PRESETS: &[RacePreset] = &[
    RacePreset {
        label: "5k",
        distance_km: 5.0,
        default_goal: GoalTime::new(0, 25, 0),
    },
    RacePreset {
        label: "10k",
        distance_km: 10.0,
        default_goal: GoalTime::new(0, 50, 0),
    },
    RacePreset {
        label: "Half",
        distance_km: 21.0975,
        default_goal: GoalTime::new(1, 50, 0),
    },
    RacePreset {
        label: "Marathon",
        distance_km: 42.195,
        default_goal: GoalTime::new(4, 0, 0),
    },
];

/// Label of the preset selected when nothing else is configured
pub const DEFAULT_PRESET: &str = "Marathon";

/// Find a preset by label, ignoring case
pub fn find_preset(label: &str) -> Option<&'static RacePreset> {
    PRESETS
        .iter()
        .find(|p| p.label.eq_ignore_ascii_case(label.trim()))
}

/// Check if a distance matches any preset
pub fn matches_preset(distance_km: f64) -> Option<&'static str> {
    PRESETS.iter().find_map(|preset| {
        if distance_equal(preset.distance_km, distance_km) {
            Some(preset.label)
        } else {
            None
        }
    })
}

/// Compare two distances with a tolerance of one meter
fn distance_equal(a: f64, b: f64) -> bool {
    const EPSILON_KM: f64 = 0.001;
    (a - b).abs() < EPSILON_KM
}
