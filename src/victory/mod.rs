//! Victory progress aggregation
//!
//! Recomputed once per turn from aggregate world state, after any
//! conquest deltas have been applied. The engine never calls this; it
//! is the consumer of the conquest resolver's output.

use serde::{Deserialize, Serialize};

use crate::core::types::PlayerId;
use crate::territory::Territory;

/// Progress toward each victory track, 0.0-1.0
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct VictoryProgress {
    /// Fraction of territories owned
    pub military: f32,
    /// Fraction of the cultural threshold accumulated
    pub cultural: f32,
    /// Fraction of wonder stages completed
    pub wonder: f32,
}

/// How a game can be won
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VictoryKind {
    Military,
    Cultural,
    Wonder,
}

impl VictoryProgress {
    /// Recompute progress from world state.
    ///
    /// `culture_points`/`culture_threshold` and `wonder_stages`/
    /// `wonder_total` are supplied by the economy and construction
    /// layers; this aggregator only normalizes them.
    pub fn recompute<'a>(
        player: PlayerId,
        territories: impl Iterator<Item = &'a Territory>,
        culture_points: f32,
        culture_threshold: f32,
        wonder_stages: u32,
        wonder_total: u32,
    ) -> Self {
        let mut owned = 0usize;
        let mut total = 0usize;
        for territory in territories {
            total += 1;
            if territory.owner == Some(player) {
                owned += 1;
            }
        }

        let military = if total > 0 {
            owned as f32 / total as f32
        } else {
            0.0
        };
        let cultural = if culture_threshold > 0.0 {
            (culture_points / culture_threshold).clamp(0.0, 1.0)
        } else {
            0.0
        };
        let wonder = if wonder_total > 0 {
            (wonder_stages as f32 / wonder_total as f32).clamp(0.0, 1.0)
        } else {
            0.0
        };

        Self {
            military,
            cultural,
            wonder,
        }
    }

    /// First victory track at 100%, if any
    pub fn achieved(&self) -> Option<VictoryKind> {
        if self.military >= 1.0 {
            Some(VictoryKind::Military)
        } else if self.cultural >= 1.0 {
            Some(VictoryKind::Cultural)
        } else if self.wonder >= 1.0 {
            Some(VictoryKind::Wonder)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::territory::Terrain;

    #[test]
    fn test_military_progress_counts_owned_share() {
        let player = PlayerId(1);
        let territories = vec![
            Territory::new(Terrain::Plains).owned_by(player),
            Territory::new(Terrain::Hills).owned_by(PlayerId(2)),
            Territory::new(Terrain::Forest).owned_by(player),
            Territory::new(Terrain::Desert),
        ];
        let progress =
            VictoryProgress::recompute(player, territories.iter(), 0.0, 100.0, 0, 4);
        assert_eq!(progress.military, 0.5);
        assert!(progress.achieved().is_none());
    }

    #[test]
    fn test_full_ownership_is_military_victory() {
        let player = PlayerId(1);
        let territories = vec![
            Territory::new(Terrain::Plains).owned_by(player),
            Territory::new(Terrain::Hills).owned_by(player),
        ];
        let progress =
            VictoryProgress::recompute(player, territories.iter(), 10.0, 100.0, 1, 4);
        assert_eq!(progress.achieved(), Some(VictoryKind::Military));
    }

    #[test]
    fn test_cultural_progress_clamped() {
        let progress =
            VictoryProgress::recompute(PlayerId(1), std::iter::empty(), 250.0, 100.0, 0, 4);
        assert_eq!(progress.cultural, 1.0);
        assert_eq!(progress.achieved(), Some(VictoryKind::Cultural));
    }
}
