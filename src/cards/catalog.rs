//! Static tactical card catalog
//!
//! Each card archetype carries a base strength, an optional defensive
//! posture, a counter list (auto-advantage against those cards), and
//! terrain affinities. Counters form rock-paper-scissors triangles
//! within each tier plus a few cross-tier answers.

use serde::{Deserialize, Serialize};

use crate::territory::Terrain;

/// Card tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CardCategory {
    Basic,
    Intermediate,
    Advanced,
}

/// Tactical card archetype
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CardKind {
    // Basic
    Charge,
    ShieldWall,
    Volley,

    // Intermediate
    Flank,
    Fortify,
    Skirmish,

    // Advanced
    Encirclement,
    FeignedRetreat,
    SiegeAssault,
}

/// Immutable catalog entry for a card archetype
#[derive(Debug, Clone, Copy, Serialize)]
pub struct CardSpec {
    pub category: CardCategory,
    pub strength: f32,
    pub defensive: bool,
    pub counters: &'static [CardKind],
    pub terrain_affinity: &'static [Terrain],
}

impl CardKind {
    /// Every card archetype, in catalog order
    pub const ALL: [CardKind; 9] = [
        CardKind::Charge,
        CardKind::ShieldWall,
        CardKind::Volley,
        CardKind::Flank,
        CardKind::Fortify,
        CardKind::Skirmish,
        CardKind::Encirclement,
        CardKind::FeignedRetreat,
        CardKind::SiegeAssault,
    ];

    /// Static catalog entry for this archetype
    pub fn spec(&self) -> CardSpec {
        match self {
            CardKind::Charge => CardSpec {
                category: CardCategory::Basic,
                strength: 12.0,
                defensive: false,
                counters: &[CardKind::Volley],
                terrain_affinity: &[Terrain::Plains, Terrain::Desert],
            },

            CardKind::ShieldWall => CardSpec {
                category: CardCategory::Basic,
                strength: 10.0,
                defensive: true,
                counters: &[CardKind::Charge],
                terrain_affinity: &[Terrain::Hills],
            },

            CardKind::Volley => CardSpec {
                category: CardCategory::Basic,
                strength: 11.0,
                defensive: false,
                counters: &[CardKind::ShieldWall],
                terrain_affinity: &[Terrain::Forest, Terrain::Hills],
            },

            CardKind::Flank => CardSpec {
                category: CardCategory::Intermediate,
                strength: 16.0,
                defensive: false,
                counters: &[CardKind::Fortify, CardKind::ShieldWall],
                terrain_affinity: &[Terrain::Plains, Terrain::Forest],
            },

            CardKind::Fortify => CardSpec {
                category: CardCategory::Intermediate,
                strength: 15.0,
                defensive: true,
                counters: &[CardKind::Skirmish],
                terrain_affinity: &[Terrain::Hills, Terrain::Mountains],
            },

            CardKind::Skirmish => CardSpec {
                category: CardCategory::Intermediate,
                strength: 14.0,
                defensive: false,
                counters: &[CardKind::Flank],
                terrain_affinity: &[Terrain::Forest, Terrain::Swamp],
            },

            CardKind::Encirclement => CardSpec {
                category: CardCategory::Advanced,
                strength: 22.0,
                defensive: false,
                counters: &[CardKind::FeignedRetreat],
                terrain_affinity: &[Terrain::Plains],
            },

            CardKind::FeignedRetreat => CardSpec {
                category: CardCategory::Advanced,
                strength: 20.0,
                defensive: false,
                counters: &[CardKind::SiegeAssault, CardKind::Charge],
                terrain_affinity: &[Terrain::Desert, Terrain::Plains],
            },

            CardKind::SiegeAssault => CardSpec {
                category: CardCategory::Advanced,
                strength: 24.0,
                defensive: false,
                counters: &[CardKind::Encirclement, CardKind::Fortify],
                terrain_affinity: &[Terrain::Mountains, Terrain::Hills],
            },
        }
    }

    /// Does this card hold an auto-advantage over the other?
    pub fn counters(&self, other: CardKind) -> bool {
        self.spec().counters.contains(&other)
    }

    /// Does this card benefit from the given defending terrain?
    pub fn favors_terrain(&self, terrain: Terrain) -> bool {
        self.spec().terrain_affinity.contains(&terrain)
    }
}
