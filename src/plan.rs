//! A computed race plan and the row policies used to show and print it.

use crate::config::DisplayConfig;
use crate::kick::kick_distance;
use crate::splits::{RaceInput, Split, Strategy};
use crate::time_codec::seconds_to_time;
use serde::Serialize;

/// Shown when there is no valid pace to report
pub const EMPTY_PACE: &str = "0:00";

/// Splits plus the scalars shown alongside them.
#[derive(Debug, Clone, Serialize)]
pub struct RacePlan {
    pub input: RaceInput,
    pub splits: Vec<Split>,
    /// Average pace per km, `M:SS`
    pub avg_pace: String,
    /// Where the closing kick starts, e.g. "final 5km"
    pub kick: &'static str,
}

impl RacePlan {
    pub fn new(input: RaceInput) -> Self {
        let splits = input.splits();
        let avg_pace = avg_pace(&input).unwrap_or_else(|| EMPTY_PACE.to_string());
        Self {
            input,
            splits,
            avg_pace,
            kick: kick_distance(input.distance_km),
        }
    }

    pub fn strategy(&self) -> Strategy {
        self.input.strategy
    }

    /// Whether the screen shows every row before the user toggles it.
    pub fn default_show_all(&self, display: &DisplayConfig) -> bool {
        self.input.distance_km <= display.summary_threshold_km
    }

    /// Rows for the on-screen table.
    ///
    /// Long races collapse to the summary rows unless `show_all` is set.
    pub fn visible_splits(&self, display: &DisplayConfig, show_all: bool) -> Vec<&Split> {
        if self.input.distance_km > display.summary_threshold_km && !show_all {
            self.summary_splits()
        } else {
            self.splits.iter().collect()
        }
    }

    /// Rows for the printed band; falls back to the summary when the
    /// visible rows would not fit on the page.
    pub fn printable_splits(&self, display: &DisplayConfig, show_all: bool) -> Vec<&Split> {
        let visible = self.visible_splits(display, show_all);
        let max_rows = display.max_printable_rows;
        if visible.len() > max_rows {
            tracing::debug!(
                rows = visible.len(),
                max = max_rows,
                "Too many rows to print, using summary"
            );
            self.summary_splits()
        } else {
            visible
        }
    }

    /// Major markers and the finish row.
    pub fn summary_splits(&self) -> Vec<&Split> {
        self.splits
            .iter()
            .filter(|s| s.is_major_marker || s.distance == self.input.distance_km)
            .collect()
    }
}

/// Average pace as `M:SS` (or `H:MM:SS` for very slow paces).
pub fn avg_pace(input: &RaceInput) -> Option<String> {
    input
        .average_pace_seconds()
        .map(|pace| seconds_to_time(pace, false))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time_codec::time_to_seconds;

    fn plan(distance_km: f64, goal: &str, strategy: Strategy) -> RacePlan {
        RacePlan::new(RaceInput::new(distance_km, time_to_seconds(goal), strategy))
    }

    #[test]
    fn test_avg_pace() {
        assert_eq!(plan(10.0, "0:50:00", Strategy::Even).avg_pace, "5:00");
        assert_eq!(plan(42.195, "4:00:00", Strategy::Even).avg_pace, "5:41");
        assert_eq!(plan(0.0, "4:00:00", Strategy::Even).avg_pace, EMPTY_PACE);
    }

    #[test]
    fn test_kick_follows_distance() {
        assert_eq!(plan(21.0975, "1:50:00", Strategy::Even).kick, "final 5km");
    }

    #[test]
    fn test_short_race_shows_everything() {
        let display = DisplayConfig::default();
        let p = plan(10.0, "0:50:00", Strategy::Even);
        assert!(p.default_show_all(&display));
        assert_eq!(p.visible_splits(&display, false).len(), 10);
    }

    #[test]
    fn test_long_race_collapses_to_summary() {
        let display = DisplayConfig::default();
        let p = plan(21.0975, "1:50:00", Strategy::Even);
        assert!(!p.default_show_all(&display));

        let visible = p.visible_splits(&display, false);
        let distances: Vec<f64> = visible.iter().map(|s| s.distance).collect();
        assert_eq!(distances, vec![5.0, 10.0, 15.0, 20.0, 21.0975]);

        assert_eq!(p.visible_splits(&display, true).len(), 22);
    }

    #[test]
    fn test_summary_keeps_whole_finish() {
        let display = DisplayConfig::default();
        let p = plan(17.0, "1:25:00", Strategy::Even);
        let distances: Vec<f64> = p
            .visible_splits(&display, false)
            .iter()
            .map(|s| s.distance)
            .collect();
        assert_eq!(distances, vec![5.0, 10.0, 15.0, 17.0]);
    }

    #[test]
    fn test_marathon_print_falls_back_to_summary() {
        let display = DisplayConfig::default();
        let p = plan(42.195, "4:00:00", Strategy::Negative);
        assert_eq!(p.splits.len(), 43);
        assert_eq!(p.visible_splits(&display, true).len(), 43);
        assert_eq!(p.printable_splits(&display, true).len(), 43);

        let tight = DisplayConfig {
            max_printable_rows: 30,
            ..DisplayConfig::default()
        };
        assert_eq!(p.printable_splits(&tight, true).len(), 9);
    }

    #[test]
    fn test_empty_plan() {
        let display = DisplayConfig::default();
        let p = plan(10.0, "0:00:00", Strategy::Even);
        assert!(p.splits.is_empty());
        assert!(p.printable_splits(&display, true).is_empty());
    }
}
