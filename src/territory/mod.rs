//! Territories, terrain, and the ownership/control store
//!
//! Territory control is a 0-100 accumulator toward conquest. It lives
//! here, not in the combat session: sessions are destroyed after each
//! battle, while partial-conquest progress persists across them.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::core::types::{PlayerId, TerritoryId};

/// Terrain of a campaign territory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Terrain {
    #[default]
    Plains,
    Forest,
    Hills,
    Mountains,
    Desert,
    Swamp,
}

impl Terrain {
    /// Is this terrain open enough for massed mounted maneuvers?
    pub fn is_open(&self) -> bool {
        matches!(self, Terrain::Plains | Terrain::Desert)
    }
}

/// A campaign territory
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Territory {
    pub terrain: Terrain,
    pub is_capital: bool,
    pub owner: Option<PlayerId>,
    /// Conquest progress by attackers, 0-100; at 100 ownership transfers
    pub control: f32,
}

impl Territory {
    pub fn new(terrain: Terrain) -> Self {
        Self {
            terrain,
            is_capital: false,
            owner: None,
            control: 0.0,
        }
    }

    pub fn owned_by(mut self, owner: PlayerId) -> Self {
        self.owner = Some(owner);
        self
    }

    pub fn capital(mut self) -> Self {
        self.is_capital = true;
        self
    }

    pub fn is_owned(&self) -> bool {
        self.owner.is_some()
    }
}

/// Ownership/control boundary the combat engine reads and, at
/// `end_combat`, writes through
pub trait TerritoryStore {
    fn territory(&self, id: TerritoryId) -> Option<&Territory>;
    fn set_owner(&mut self, id: TerritoryId, owner: PlayerId);
    fn set_control(&mut self, id: TerritoryId, value: f32);
}

/// In-memory territory store
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TerritoryMap {
    territories: AHashMap<TerritoryId, Territory>,
}

impl TerritoryMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: TerritoryId, territory: Territory) {
        self.territories.insert(id, territory);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&TerritoryId, &Territory)> {
        self.territories.iter()
    }

    pub fn len(&self) -> usize {
        self.territories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.territories.is_empty()
    }
}

impl TerritoryStore for TerritoryMap {
    fn territory(&self, id: TerritoryId) -> Option<&Territory> {
        self.territories.get(&id)
    }

    fn set_owner(&mut self, id: TerritoryId, owner: PlayerId) {
        if let Some(t) = self.territories.get_mut(&id) {
            t.owner = Some(owner);
        }
    }

    fn set_control(&mut self, id: TerritoryId, value: f32) {
        if let Some(t) = self.territories.get_mut(&id) {
            t.control = value.clamp(0.0, 100.0);
        }
    }
}
