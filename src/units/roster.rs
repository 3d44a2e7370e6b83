//! Unit records and per-territory roster storage
//!
//! Rosters are keyed by territory. The combat engine only reads them
//! through the `RosterStore` trait; casualty application is a caller
//! concern after a session concludes.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::core::types::{TerritoryId, UnitId};
use crate::units::unit_type::UnitType;

/// Per-level combat strength gain
const COMBAT_LEVEL_FACTOR: f32 = 0.10;
/// Per-level movement gain
const MOVEMENT_LEVEL_FACTOR: f32 = 0.05;

/// A single military unit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Unit {
    pub id: UnitId,
    pub unit_type: UnitType,
    /// Veterancy level, 1-based
    pub level: u8,
    /// Experience toward the next level, 0-100
    pub experience: u8,
    /// Health percentage, 0-100; a unit at 0 is removed from its roster
    pub health: f32,
    pub moves_left: u8,
    pub territory: TerritoryId,
}

impl Unit {
    pub fn new(unit_type: UnitType, territory: TerritoryId) -> Self {
        Self {
            id: UnitId::new(),
            unit_type,
            level: 1,
            experience: 0,
            health: 100.0,
            moves_left: unit_type.base_moves(),
            territory,
        }
    }

    /// Combat strength: base strength scaled by veterancy and health
    pub fn effective_strength(&self) -> f32 {
        let level_bonus = 1.0 + COMBAT_LEVEL_FACTOR * (self.level.saturating_sub(1)) as f32;
        self.unit_type.base_strength() * level_bonus * (self.health / 100.0)
    }

    /// Movement allowance: base moves scaled by veterancy
    pub fn movement_allowance(&self) -> f32 {
        let level_bonus = 1.0 + MOVEMENT_LEVEL_FACTOR * (self.level.saturating_sub(1)) as f32;
        self.unit_type.base_moves() as f32 * level_bonus
    }

    /// Reduce health by a percentage of the current value, clamped to [0, 100]
    pub fn take_casualties(&mut self, percent: f32) {
        let remaining = self.health * (1.0 - percent / 100.0);
        self.health = remaining.clamp(0.0, 100.0);
    }

    /// Grant experience; at 100 the unit levels up and experience resets
    pub fn gain_experience(&mut self, amount: u8) {
        let total = self.experience as u16 + amount as u16;
        if total >= 100 {
            self.level = self.level.saturating_add(1);
            self.experience = 0;
        } else {
            self.experience = total as u8;
        }
    }
}

/// Composite strength of a unit collection
pub fn composite_strength(units: &[Unit]) -> f32 {
    units.iter().map(Unit::effective_strength).sum()
}

/// Read boundary the combat engine uses to snapshot rosters
pub trait RosterStore {
    fn units_in(&self, territory: TerritoryId) -> Vec<Unit>;
}

/// In-memory roster store keyed by territory
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RosterMap {
    units: AHashMap<TerritoryId, Vec<Unit>>,
}

impl RosterMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_unit(&mut self, unit: Unit) {
        self.units.entry(unit.territory).or_default().push(unit);
    }

    /// Spawn a fresh unit of the given type in a territory
    pub fn spawn(&mut self, unit_type: UnitType, territory: TerritoryId) -> UnitId {
        let unit = Unit::new(unit_type, territory);
        let id = unit.id;
        self.add_unit(unit);
        id
    }

    /// Apply a casualty percentage to every unit in a territory.
    /// Units driven to 0 health are removed immediately.
    pub fn apply_casualties(&mut self, territory: TerritoryId, percent: f32) {
        if let Some(units) = self.units.get_mut(&territory) {
            for unit in units.iter_mut() {
                unit.take_casualties(percent);
            }
            units.retain(|u| u.health > 0.0);
        }
    }

    pub fn total_strength(&self, territory: TerritoryId) -> f32 {
        self.units
            .get(&territory)
            .map(|units| composite_strength(units))
            .unwrap_or(0.0)
    }
}

impl RosterStore for RosterMap {
    fn units_in(&self, territory: TerritoryId) -> Vec<Unit> {
        self.units.get(&territory).cloned().unwrap_or_default()
    }
}
