//! Conquest resolution: round tally to territory-control delta
//!
//! A victory earns control proportional to the round-win margin and
//! the attacker's remaining strength; a defeat or draw earns nothing.
//! Control accumulates on the territory across sessions, so repeated
//! partial victories eventually conquer. At 100 the territory changes
//! hands and the accumulator resets.

use serde::{Deserialize, Serialize};

use crate::combat::session::CombatSession;
use crate::core::config::CombatConfig;
use crate::core::types::CombatResult;

/// Territory-control consequence of a concluded session
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConquestOutcome {
    /// Control gained this session, 0-100; never negative
    pub delta: f32,
    /// Value to store on the territory: accumulated control, or 0
    /// after a full conquest resets the accumulator
    pub control_after: f32,
    /// True when accumulated control reached 100 and ownership transfers
    pub full_conquest: bool,
}

/// Convert a concluded session's tally into a control outcome.
///
/// Sessions without a result yet (still active) yield a zero outcome.
pub fn resolve_conquest(session: &CombatSession, config: &CombatConfig) -> ConquestOutcome {
    let delta = match session.result {
        Some(CombatResult::Victory) => {
            let margin = (session.attacker_round_wins - session.defender_round_wins) as f32;
            let remaining = 1.0 - session.attacker_casualties / 100.0;
            (config.control_base * margin * (0.5 + 0.5 * remaining)).clamp(0.0, 100.0)
        }
        _ => 0.0,
    };

    let accumulated = (session.prior_control + delta).min(100.0);
    let full_conquest = accumulated >= 100.0;
    ConquestOutcome {
        delta,
        control_after: if full_conquest { 0.0 } else { accumulated },
        full_conquest,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{PlayerId, Side, TerritoryId};
    use crate::cards::{CardInventory, CardKind};
    use crate::combat::session::CombatEngine;
    use crate::territory::{Terrain, Territory, TerritoryMap, TerritoryStore};
    use crate::units::{RosterMap, UnitType};

    /// Drive a session to conclusion with the given per-round cards
    fn concluded_session(
        prior_control: f32,
        rounds: &[(CardKind, CardKind)],
    ) -> (CombatEngine, TerritoryMap) {
        let mut engine = CombatEngine::new(CombatConfig::default());
        let mut inventory = CardInventory::new();
        for (player_card, _) in rounds {
            inventory.add(*player_card, 1);
        }
        engine.set_inventory(PlayerId(1), inventory);

        let mut territories = TerritoryMap::new();
        territories.insert(
            TerritoryId(1),
            Territory::new(Terrain::Plains).owned_by(PlayerId(1)),
        );
        let mut target = Territory::new(Terrain::Plains).owned_by(PlayerId(2));
        target.control = prior_control;
        territories.insert(TerritoryId(2), target);

        let mut rosters = RosterMap::new();
        rosters.spawn(UnitType::Cavalry, TerritoryId(1));
        rosters.spawn(UnitType::Militia, TerritoryId(2));

        engine
            .start_combat(TerritoryId(1), TerritoryId(2), &territories, &rosters)
            .unwrap();
        for (player_card, opponent_card) in rounds {
            engine.select_card(*player_card, Side::Player).unwrap();
            engine.select_card(*opponent_card, Side::Opponent).unwrap();
            if !engine.next_round().unwrap() {
                break;
            }
        }
        (engine, territories)
    }

    // Attacker plays counters, so these rounds are forced wins
    const SWEEP: &[(CardKind, CardKind)] = &[
        (CardKind::Charge, CardKind::Volley),
        (CardKind::ShieldWall, CardKind::Charge),
    ];

    #[test]
    fn test_victory_delta_positive() {
        let (engine, _) = concluded_session(0.0, SWEEP);
        let session = engine.session().unwrap();
        let outcome = resolve_conquest(session, engine.config());
        assert!(outcome.delta > 0.0);
        assert!(!outcome.full_conquest);
        assert_eq!(outcome.control_after, outcome.delta);
    }

    #[test]
    fn test_defeat_delta_zero() {
        // Defender counters both rounds
        let rounds = &[
            (CardKind::Volley, CardKind::Charge),
            (CardKind::Charge, CardKind::ShieldWall),
        ];
        let (engine, _) = concluded_session(40.0, rounds);
        let session = engine.session().unwrap();
        assert_eq!(session.result, Some(CombatResult::Defeat));

        let outcome = resolve_conquest(session, engine.config());
        assert_eq!(outcome.delta, 0.0);
        assert_eq!(outcome.control_after, 40.0);
        assert!(!outcome.full_conquest);
    }

    #[test]
    fn test_accumulation_reaches_full_conquest() {
        let (mut engine, mut territories) = concluded_session(80.0, SWEEP);
        let result = engine.end_combat_into(&mut territories).unwrap();
        assert_eq!(result, CombatResult::Victory);

        let target = territories.territory(TerritoryId(2)).unwrap();
        assert_eq!(target.owner, Some(PlayerId(1)));
        assert_eq!(target.control, 0.0);
    }

    #[test]
    fn test_partial_conquest_persists_on_territory() {
        let (mut engine, mut territories) = concluded_session(0.0, SWEEP);
        let delta = engine.session().unwrap().territory_control_delta;
        assert!(delta > 0.0 && delta < 100.0);

        engine.end_combat_into(&mut territories).unwrap();
        let target = territories.territory(TerritoryId(2)).unwrap();
        assert_eq!(target.owner, Some(PlayerId(2)));
        assert_eq!(target.control, delta);
    }

    #[test]
    fn test_delta_monotone_in_margin() {
        let cfg = CombatConfig::default();
        // Clean sweep vs narrow win, same casualties
        let (engine_sweep, _) = concluded_session(0.0, SWEEP);
        let sweep = resolve_conquest(engine_sweep.session().unwrap(), &cfg);

        let narrow_rounds = &[
            (CardKind::Charge, CardKind::Volley),
            (CardKind::Volley, CardKind::Charge),
            (CardKind::ShieldWall, CardKind::Charge),
        ];
        let (engine_narrow, _) = concluded_session(0.0, narrow_rounds);
        let narrow = resolve_conquest(engine_narrow.session().unwrap(), &cfg);

        assert!(sweep.delta > narrow.delta);
    }
}
