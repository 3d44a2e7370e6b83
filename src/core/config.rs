//! Combat configuration with documented constants
//!
//! All tunable scoring values are collected here with explanations of
//! their purpose and how they interact with each other.

use serde::{Deserialize, Serialize};

/// Tunable constants for round scoring, casualties, and conquest
///
/// These values have been tuned so that a three-round engagement between
/// comparable rosters produces meaningful but rarely total casualties.
/// Changing them affects combat pacing, not the resolution rules.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatConfig {
    // === ROUND SCORING ===
    /// Weight applied to composite roster strength in a round score
    ///
    /// A card's printed strength is on a ~10-25 scale; rosters sum to
    /// tens of points. At 0.5, unit quality matters roughly as much as
    /// card choice without drowning it out.
    pub unit_strength_weight: f32,

    /// Flat bonus added to a side's score when its card has affinity
    /// with the defending terrain
    ///
    /// Comparable to one card tier, so terrain choice can flip a close
    /// round but never overrides a counter.
    pub terrain_bonus: f32,

    // === CASUALTIES (per round, percent of the side's force) ===
    /// Scale factor from normalized score gap to loser casualties
    pub casualty_scale: f32,

    /// Floor for the losing side's casualties
    ///
    /// Must be above zero or a hopeless defender could stall forever.
    pub min_casualty: f32,

    /// Ceiling for the losing side's casualties in a single round
    pub max_casualty: f32,

    /// Winner casualties as a fraction of loser casualties
    ///
    /// Winners always bleed at least 1 percent per round.
    pub winner_casualty_ratio: f32,

    /// Casualties taken by both sides in a drawn round
    pub draw_casualty: f32,

    // === CONQUEST ===
    /// Base territory-control gain per round of win margin
    ///
    /// At 20.0, a clean 3-0 sweep with light casualties yields close to
    /// 60 control, so conquering a fresh territory takes about two
    /// decisive victories.
    pub control_base: f32,

    // === SESSION ===
    /// Number of rounds in a combat session
    pub total_rounds: u32,
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self {
            unit_strength_weight: 0.5,
            terrain_bonus: 10.0,
            casualty_scale: 0.9,
            min_casualty: 5.0,
            max_casualty: 60.0,
            winner_casualty_ratio: 0.25,
            draw_casualty: 3.0,
            control_base: 20.0,
            total_rounds: 3,
        }
    }
}

impl CombatConfig {
    /// Load a configuration from TOML, falling back to defaults for
    /// any field not present.
    pub fn from_toml_str(s: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(s)
    }
}
