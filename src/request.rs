//! Turning loosely specified race choices into a [`RaceInput`].

use crate::error::InputError;
use crate::goal::GoalTime;
use crate::presets::{find_preset, matches_preset, RacePreset};
use crate::splits::{RaceInput, Strategy, MAX_DISTANCE_KM};

/// Race as chosen on the command line or in a race file.
///
/// An explicit distance wins over a preset. The goal falls back to the
/// preset's default, including a preset recognised from the distance alone.
#[derive(Debug, Clone, Default)]
pub struct RaceRequest {
    pub distance_km: Option<f64>,
    pub preset: Option<String>,
    pub goal: Option<String>,
    pub strategy: Option<Strategy>,
}

/// A fully resolved race.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedRace {
    pub input: RaceInput,
    pub goal: GoalTime,
}

impl RaceRequest {
    /// Resolve against an optional fallback preset and strategy.
    pub fn resolve(
        &self,
        fallback_preset: Option<&str>,
        fallback_strategy: Strategy,
    ) -> Result<ResolvedRace, InputError> {
        let named = match self.preset.as_deref() {
            Some(label) => Some(lookup(label)?),
            None => None,
        };

        let preset = match (named, self.distance_km) {
            (Some(p), _) => Some(p),
            (None, Some(km)) => matches_preset(km).and_then(find_preset),
            (None, None) => fallback_preset.map(lookup).transpose()?,
        };

        let distance_km = self
            .distance_km
            .or(preset.map(|p| p.distance_km))
            .ok_or(InputError::MissingDistance)?;
        if distance_km.is_nan() || distance_km <= 0.0 {
            return Err(InputError::NonPositiveDistance { distance_km });
        }
        if distance_km > MAX_DISTANCE_KM {
            return Err(InputError::DistanceTooLong {
                distance_km,
                max_km: MAX_DISTANCE_KM,
            });
        }

        let goal = match (self.goal.as_deref(), preset) {
            (Some(text), _) => text.parse::<GoalTime>()?,
            (None, Some(p)) => p.default_goal,
            (None, None) => return Err(InputError::MissingGoal),
        };

        let strategy = self.strategy.unwrap_or(fallback_strategy);
        Ok(ResolvedRace {
            input: RaceInput::new(distance_km, goal.total_seconds(), strategy),
            goal,
        })
    }
}

fn lookup(label: &str) -> Result<&'static RacePreset, InputError> {
    find_preset(label).ok_or_else(|| InputError::UnknownPreset {
        name: label.to_string(),
    })
}
