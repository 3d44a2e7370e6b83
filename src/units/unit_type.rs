//! Unit types and their base statistics

use serde::{Deserialize, Serialize};

/// Type of military unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitType {
    Militia,   // Cheap, weak garrison troops
    Infantry,  // Standard foot soldiers
    Archers,   // Ranged support
    Cavalry,   // Fast, strong in the open
    Siege,     // Slow, strong against fortifications
}

impl UnitType {
    /// Base combat strength before level scaling
    pub fn base_strength(&self) -> f32 {
        match self {
            UnitType::Militia => 4.0,
            UnitType::Infantry => 8.0,
            UnitType::Archers => 6.0,
            UnitType::Cavalry => 10.0,
            UnitType::Siege => 12.0,
        }
    }

    /// Base movement points per turn
    pub fn base_moves(&self) -> u8 {
        match self {
            UnitType::Militia => 1,
            UnitType::Infantry => 2,
            UnitType::Archers => 2,
            UnitType::Cavalry => 4,
            UnitType::Siege => 1,
        }
    }

    /// Is this a mounted unit?
    pub fn is_mounted(&self) -> bool {
        matches!(self, UnitType::Cavalry)
    }

    /// Is this a ranged unit?
    pub fn is_ranged(&self) -> bool {
        matches!(self, UnitType::Archers)
    }
}
