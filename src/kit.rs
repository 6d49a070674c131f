//! Race-day kit: the pace band plus the notes printed beside it.

use crate::config::DisplayConfig;
use crate::plan::RacePlan;
use crate::splits::{Split, Strategy};
use serde::Serialize;

/// Wristband preparation steps, as (title, body)
pub const INSTRUCTIONS: &[(&str, &str)] = &[
    (
        "Print & Cut",
        "Cut out the pace band along the dashed lines. Trim the width if needed to fit your arm.",
    ),
    (
        "Waterproof",
        "Cover the strip completely with clear packing tape (front and back) to protect it from sweat and rain.",
    ),
    (
        "Wear",
        "Loop it around your wrist and tape the ends together. It should be loose enough to be comfortable but tight enough not to slip.",
    ),
];

/// Race morning checklist
pub const CHECKLIST: &[&str] = &[
    "Running Shoes (Double Knotted)",
    "Race Bib & Safety Pins",
    "Timing Chip",
    "GPS Watch (Charged)",
    "Gels / Nutrition",
    "Anti-Chafe Balm",
    "Sunscreen / Hat",
    "Post-Race Warm Clothes",
];

/// Everything printed on the race-day page.
#[derive(Debug, Clone, Serialize)]
pub struct RaceKit {
    /// Goal as entered, `H:MM:SS`
    pub goal: String,
    pub distance_km: f64,
    pub strategy: Strategy,
    /// "Even Pace" or "Negative Split"
    pub strategy_label: &'static str,
    pub avg_pace: String,
    /// Rows that go on the band
    pub band: Vec<Split>,
    pub strategy_note: String,
    pub instructions: Vec<Instruction>,
    pub checklist: Vec<&'static str>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Instruction {
    pub title: &'static str,
    pub body: &'static str,
}

impl RaceKit {
    /// Assemble the kit for `plan`, choosing band rows with the print policy.
    pub fn new(plan: &RacePlan, goal: &str, display: &DisplayConfig, show_all: bool) -> Self {
        let band = plan
            .printable_splits(display, show_all)
            .into_iter()
            .cloned()
            .collect();

        Self {
            goal: goal.to_string(),
            distance_km: plan.input.distance_km,
            strategy: plan.strategy(),
            strategy_label: plan.strategy().label(),
            avg_pace: plan.avg_pace.clone(),
            band,
            strategy_note: strategy_note(plan.strategy(), plan.kick),
            instructions: INSTRUCTIONS
                .iter()
                .map(|&(title, body)| Instruction { title, body })
                .collect(),
            checklist: CHECKLIST.to_vec(),
        }
    }
}

/// Advice printed under the band for the chosen strategy.
pub fn strategy_note(strategy: Strategy, kick: &str) -> String {
    match strategy {
        Strategy::Negative => format!(
            "You are running a NEGATIVE SPLIT strategy. This means starting conservatively. \
             It will feel 'too slow' at the start, so trust the plan. Save your energy for the \
             {} where you will overtake fading runners.",
            kick
        ),
        Strategy::Even => "You are running an EVEN PACE strategy. Consistency is key. Avoid the \
             temptation to sprint the first few kilometers. Lock into your target pace early and \
             hold it as steady as a metronome."
            .to_string(),
    }
}
