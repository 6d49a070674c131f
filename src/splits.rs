//! Per-kilometer split calculation.
//!
//! A plan is recomputed in full from an immutable [`RaceInput`]; nothing is
//! cached between calls.

use crate::time_codec::{seconds_to_time, time_to_seconds};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Remainders at or below this many kilometers are treated as float noise.
pub const PARTIAL_SEGMENT_MIN_KM: f64 = 0.01;

/// Every n-th whole kilometer is a major marker.
pub const MAJOR_MARKER_INTERVAL: u32 = 5;

/// Negative-split start pace as a fraction of the average pace.
pub const NEGATIVE_START_FACTOR: f64 = 1.03;

/// Negative-split end pace as a fraction of the average pace.
pub const NEGATIVE_END_FACTOR: f64 = 0.97;

/// Longest distance a plan is computed for.
pub const MAX_DISTANCE_KM: f64 = 10_000.0;

/// Pacing strategy across the race
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Same pace for every kilometer
    #[default]
    Even,
    /// Pace speeds up linearly from 3% slower to 3% faster than average
    Negative,
}

impl Strategy {
    /// Label used on the printed band
    pub fn label(&self) -> &'static str {
        match self {
            Strategy::Even => "Even Pace",
            Strategy::Negative => "Negative Split",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Even => f.write_str("even"),
            Strategy::Negative => f.write_str("negative"),
        }
    }
}

/// One row of the pacing table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Split {
    /// Kilometers at which this split ends
    pub distance: f64,
    /// Time for this kilometer (or the pace of the final partial segment)
    pub split_time: String,
    /// Cumulative time from the start, always with hours
    pub elapsed_time: String,
    /// Every fifth kilometer and the final distance
    pub is_major_marker: bool,
}

/// Inputs that fully determine a pacing plan.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RaceInput {
    pub distance_km: f64,
    pub goal_seconds: f64,
    pub strategy: Strategy,
}

impl RaceInput {
    pub fn new(distance_km: f64, goal_seconds: f64, strategy: Strategy) -> Self {
        Self {
            distance_km,
            goal_seconds,
            strategy,
        }
    }

    /// Build from a clock string such as `"4:00:00"`.
    pub fn from_goal_text(distance_km: f64, goal_text: &str, strategy: Strategy) -> Self {
        Self::new(distance_km, time_to_seconds(goal_text), strategy)
    }

    /// False for a non-positive or non-finite goal time, and for a distance
    /// outside `(0, MAX_DISTANCE_KM]`.
    pub fn is_valid(&self) -> bool {
        self.distance_km > 0.0
            && self.distance_km <= MAX_DISTANCE_KM
            && self.goal_seconds > 0.0
            && self.goal_seconds.is_finite()
    }

    /// Average seconds per kilometer, if the input is valid.
    pub fn average_pace_seconds(&self) -> Option<f64> {
        self.is_valid()
            .then(|| self.goal_seconds / self.distance_km)
    }

    /// Compute the full split sequence.
    pub fn splits(&self) -> Vec<Split> {
        compute_splits(self)
    }
}

/// Linear pace model over the race distance.
#[derive(Debug, Clone, Copy)]
struct PaceModel {
    average: f64,
    start: f64,
    step: f64,
    strategy: Strategy,
}

impl PaceModel {
    fn new(input: &RaceInput) -> Self {
        let average = input.goal_seconds / input.distance_km;
        let (start, end) = match input.strategy {
            Strategy::Even => (average, average),
            Strategy::Negative => (average * NEGATIVE_START_FACTOR, average * NEGATIVE_END_FACTOR),
        };
        Self {
            average,
            start,
            step: (end - start) / input.distance_km,
            strategy: input.strategy,
        }
    }

    /// Pace for kilometer `km`, sampled at its midpoint.
    fn km_pace(&self, km: u32) -> f64 {
        match self.strategy {
            Strategy::Even => self.average,
            Strategy::Negative => self.start + self.step * (f64::from(km) - 0.5),
        }
    }
}

/// Compute the split sequence for `input`.
///
/// Returns an empty sequence for an input that fails [`RaceInput::is_valid`]. Whole
/// kilometers accumulate their own paces; a trailing partial segment absorbs
/// whatever is left so that its elapsed time is exactly the goal.
pub fn compute_splits(input: &RaceInput) -> Vec<Split> {
    if !input.is_valid() {
        tracing::debug!(
            distance_km = input.distance_km,
            goal_seconds = input.goal_seconds,
            "Degenerate race input, no splits"
        );
        return Vec::new();
    }

    let model = PaceModel::new(input);
    let whole_km = input.distance_km.floor() as u32;
    let mut splits = Vec::with_capacity(whole_km as usize + 1);
    let mut elapsed = 0.0;

    for km in 1..=whole_km {
        let pace = model.km_pace(km);
        elapsed += pace;

        splits.push(Split {
            distance: f64::from(km),
            split_time: seconds_to_time(pace, false),
            elapsed_time: seconds_to_time(elapsed, true),
            is_major_marker: km % MAJOR_MARKER_INTERVAL == 0,
        });
    }

    let remainder = input.distance_km % 1.0;
    if remainder > PARTIAL_SEGMENT_MIN_KM {
        let segment_seconds = input.goal_seconds - elapsed;
        splits.push(Split {
            distance: input.distance_km,
            split_time: seconds_to_time(segment_seconds / remainder, false),
            elapsed_time: seconds_to_time(input.goal_seconds, true),
            is_major_marker: true,
        });
    }

    tracing::debug!(
        distance_km = input.distance_km,
        goal_seconds = input.goal_seconds,
        strategy = %input.strategy,
        rows = splits.len(),
        "Computed splits"
    );

    splits
}

/// Compute splits from a distance, a clock-string goal and a strategy.
pub fn calculate_splits(total_distance_km: f64, goal_time: &str, strategy: Strategy) -> Vec<Split> {
    compute_splits(&RaceInput::from_goal_text(total_distance_km, goal_time, strategy))
}
