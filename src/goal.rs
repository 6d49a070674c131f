//! Goal finish time as three independent clock fields.

use crate::error::InputError;
use crate::time_codec::{SECONDS_PER_HOUR, SECONDS_PER_MINUTE};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Goal time entered as hours, minutes and seconds.
///
/// Minutes and seconds are conventionally 0-59 but not checked; the clock
/// string simply carries whatever was entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GoalTime {
    pub hours: u32,
    pub minutes: u32,
    pub seconds: u32,
}

impl GoalTime {
    pub const fn new(hours: u32, minutes: u32, seconds: u32) -> Self {
        Self {
            hours,
            minutes,
            seconds,
        }
    }

    pub fn total_seconds(&self) -> f64 {
        f64::from(self.hours) * SECONDS_PER_HOUR
            + f64::from(self.minutes) * SECONDS_PER_MINUTE
            + f64::from(self.seconds)
    }
}

impl fmt::Display for GoalTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{:02}:{:02}", self.hours, self.minutes, self.seconds)
    }
}

/// Strict parse of `H:MM:SS` or `M:SS`.
///
/// Unlike [`crate::time_codec::time_to_seconds`], every part must be a whole number.
impl FromStr for GoalTime {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || InputError::InvalidGoalTime {
            text: s.to_string(),
        };

        let parts = s
            .trim()
            .split(':')
            .map(|p| p.trim().parse::<u32>().map_err(|_| invalid()))
            .collect::<Result<Vec<_>, _>>()?;

        let goal = match parts.as_slice() {
            [h, m, s] => GoalTime::new(*h, *m, *s),
            [m, s] => GoalTime::new(0, *m, *s),
            _ => return Err(invalid()),
        };
        Ok(goal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time_codec::time_to_seconds;

    #[test]
    fn test_clock_string_padding() {
        assert_eq!(GoalTime::new(4, 0, 0).to_string(), "4:00:00");
        assert_eq!(GoalTime::new(0, 5, 7).to_string(), "0:05:07");
        assert_eq!(GoalTime::new(12, 30, 45).to_string(), "12:30:45");
    }

    #[test]
    fn test_unchecked_minutes_pass_through() {
        let goal = GoalTime::new(0, 75, 0);
        assert_eq!(goal.to_string(), "0:75:00");
        assert_eq!(time_to_seconds(&goal.to_string()), 4_500.0);
    }

    #[test]
    fn test_total_seconds_matches_codec() {
        let goal = GoalTime::new(1, 50, 0);
        assert_eq!(goal.total_seconds(), 6_600.0);
        assert_eq!(goal.total_seconds(), time_to_seconds(&goal.to_string()));
    }

    #[test]
    fn test_parse_accepts_both_shapes() {
        assert_eq!("3:59:59".parse::<GoalTime>().unwrap(), GoalTime::new(3, 59, 59));
        assert_eq!("24:30".parse::<GoalTime>().unwrap(), GoalTime::new(0, 24, 30));
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!("4h".parse::<GoalTime>().is_err());
        assert!("1:2:3:4".parse::<GoalTime>().is_err());
        assert!("1:-5:00".parse::<GoalTime>().is_err());
        assert!("".parse::<GoalTime>().is_err());
    }
}
