//! Combat session state machine and engine facade
//!
//! At most one session is active at a time. Every operation is
//! synchronous and completes before returning; rejected actions are
//! no-ops so the caller can always retry.

use serde::{Deserialize, Serialize};

use crate::cards::{CardInventory, CardKind, CardWithCount};
use crate::combat::conquest::resolve_conquest;
use crate::combat::log::{BattleLog, RoundEntry, RoundMarker};
use crate::combat::resolver::resolve_round;
use crate::core::config::CombatConfig;
use crate::core::error::{EngineError, Result};
use crate::core::types::{CombatResult, PlayerId, Side, TerritoryId};
use crate::territory::{Terrain, TerritoryStore};
use crate::units::{composite_strength, RosterStore, Unit};

/// One attacker-vs-defender engagement across a fixed number of rounds
///
/// Unit lists are snapshots taken at session start; the live rosters
/// are only touched by the caller after the session concludes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombatSession {
    pub attacker_territory: TerritoryId,
    pub defender_territory: TerritoryId,
    pub attacker: PlayerId,
    pub defending_terrain: Terrain,
    /// Defender territory control accumulated before this session
    pub prior_control: f32,

    pub attacking_units: Vec<Unit>,
    pub defending_units: Vec<Unit>,
    initial_attacker_strength: f32,
    initial_defender_strength: f32,

    /// 1-based round counter
    pub current_round: u32,
    pub total_rounds: u32,
    /// Selected cards per round, indexed by round - 1
    pub player_cards: Vec<Option<CardKind>>,
    pub opponent_cards: Vec<Option<CardKind>>,

    pub log: BattleLog,
    /// Cumulative casualty percentages, clamped to 100
    pub attacker_casualties: f32,
    pub defender_casualties: f32,
    pub attacker_round_wins: u32,
    pub defender_round_wins: u32,
    pub drawn_rounds: u32,

    /// Control delta computed at conclusion; 0 until then
    pub territory_control_delta: f32,
    pub active: bool,
    pub result: Option<CombatResult>,
}

impl CombatSession {
    fn new(
        attacker_territory: TerritoryId,
        defender_territory: TerritoryId,
        attacker: PlayerId,
        defending_terrain: Terrain,
        prior_control: f32,
        attacking_units: Vec<Unit>,
        defending_units: Vec<Unit>,
        total_rounds: u32,
    ) -> Self {
        let initial_attacker_strength = composite_strength(&attacking_units);
        let initial_defender_strength = composite_strength(&defending_units);
        let mut log = BattleLog::new();
        log.push(RoundEntry::start(format!(
            "Attack launched from territory {} against territory {}",
            attacker_territory.0, defender_territory.0
        )));

        Self {
            attacker_territory,
            defender_territory,
            attacker,
            defending_terrain,
            prior_control,
            attacking_units,
            defending_units,
            initial_attacker_strength,
            initial_defender_strength,
            current_round: 1,
            total_rounds,
            player_cards: vec![None; total_rounds as usize],
            opponent_cards: vec![None; total_rounds as usize],
            log,
            attacker_casualties: 0.0,
            defender_casualties: 0.0,
            attacker_round_wins: 0,
            defender_round_wins: 0,
            drawn_rounds: 0,
            territory_control_delta: 0.0,
            active: true,
            result: None,
        }
    }

    /// Attacker strength degraded by casualties so far
    pub fn attacker_strength(&self) -> f32 {
        self.initial_attacker_strength * (1.0 - self.attacker_casualties / 100.0)
    }

    /// Defender strength degraded by casualties so far
    pub fn defender_strength(&self) -> f32 {
        self.initial_defender_strength * (1.0 - self.defender_casualties / 100.0)
    }

    /// Round wins needed to settle the session outright
    fn majority(&self) -> u32 {
        self.total_rounds / 2 + 1
    }

    fn selected(&self, side: Side, round: u32) -> Option<CardKind> {
        let idx = (round - 1) as usize;
        match side {
            Side::Player => self.player_cards.get(idx).copied().flatten(),
            Side::Opponent => self.opponent_cards.get(idx).copied().flatten(),
        }
    }
}

/// The engine facade the UI/orchestration layer drives
///
/// Holds the single optional active session, per-player card
/// inventories, and the tunable configuration. Collaborator stores are
/// injected per call, never held.
#[derive(Debug, Clone, Default)]
pub struct CombatEngine {
    config: CombatConfig,
    inventories: ahash::AHashMap<PlayerId, CardInventory>,
    session: Option<CombatSession>,
}

impl CombatEngine {
    pub fn new(config: CombatConfig) -> Self {
        Self {
            config,
            inventories: ahash::AHashMap::new(),
            session: None,
        }
    }

    pub fn config(&self) -> &CombatConfig {
        &self.config
    }

    /// Read-only snapshot of the current session for rendering
    pub fn session(&self) -> Option<&CombatSession> {
        self.session.as_ref()
    }

    /// Give a player a starting inventory (replaces any existing one)
    pub fn set_inventory(&mut self, player: PlayerId, inventory: CardInventory) {
        self.inventories.insert(player, inventory);
    }

    /// Acquisition flow: add card uses to a player's inventory
    pub fn grant_cards(&mut self, player: PlayerId, kind: CardKind, amount: u32) {
        self.inventories.entry(player).or_default().add(kind, amount);
    }

    /// Catalog entries the player still holds uses of
    pub fn available_cards(&self, player: PlayerId) -> Vec<CardWithCount> {
        self.inventories
            .get(&player)
            .map(CardInventory::available)
            .unwrap_or_default()
    }

    /// Open a combat session.
    ///
    /// Rejected with `AlreadyActive` while any session exists (active or
    /// awaiting `end_combat`), and with `InvalidTarget` when either
    /// territory is unresolvable, the attacker territory is unowned, or
    /// the attacking roster is empty. On rejection no state is created.
    pub fn start_combat(
        &mut self,
        attacker_territory: TerritoryId,
        defender_territory: TerritoryId,
        territories: &impl TerritoryStore,
        rosters: &impl RosterStore,
    ) -> Result<()> {
        if self.session.is_some() {
            tracing::debug!("start_combat rejected: session already exists");
            return Err(EngineError::AlreadyActive);
        }

        let source = territories
            .territory(attacker_territory)
            .ok_or(EngineError::InvalidTarget)?;
        let attacker = source.owner.ok_or(EngineError::InvalidTarget)?;
        let target = territories
            .territory(defender_territory)
            .ok_or(EngineError::InvalidTarget)?;

        let attacking_units = rosters.units_in(attacker_territory);
        if attacking_units.is_empty() {
            tracing::debug!(
                territory = attacker_territory.0,
                "start_combat rejected: no attacking units"
            );
            return Err(EngineError::InvalidTarget);
        }
        let defending_units = rosters.units_in(defender_territory);

        let session = CombatSession::new(
            attacker_territory,
            defender_territory,
            attacker,
            target.terrain,
            target.control,
            attacking_units,
            defending_units,
            self.config.total_rounds.max(1),
        );
        tracing::info!(
            attacker = attacker_territory.0,
            defender = defender_territory.0,
            rounds = session.total_rounds,
            "combat session started"
        );
        self.session = Some(session);
        Ok(())
    }

    /// Record a card for the current round.
    ///
    /// Player-side selections are validated against and consume the
    /// attacker's inventory; opponent-side cards come from the external
    /// strategy source and are recorded unvalidated. Re-selecting in
    /// the same round is rejected without consuming anything.
    pub fn select_card(&mut self, kind: CardKind, side: Side) -> Result<()> {
        let session = self
            .session
            .as_mut()
            .filter(|s| s.active)
            .ok_or(EngineError::NoActiveCombat)?;

        let idx = (session.current_round - 1) as usize;
        let slot = match side {
            Side::Player => &mut session.player_cards[idx],
            Side::Opponent => &mut session.opponent_cards[idx],
        };
        if slot.is_some() {
            tracing::debug!(?side, round = session.current_round, "card already selected");
            return Err(EngineError::CardUnavailable);
        }

        if side == Side::Player {
            let attacker = session.attacker;
            let consumed = self
                .inventories
                .get_mut(&attacker)
                .is_some_and(|inv| inv.consume(kind));
            if !consumed {
                tracing::debug!(?kind, "card selection rejected: none remaining");
                return Err(EngineError::CardUnavailable);
            }
            // Re-borrow after the inventory lookup
            if let Some(session) = self.session.as_mut() {
                session.player_cards[idx] = Some(kind);
            }
        } else {
            *slot = Some(kind);
        }
        Ok(())
    }

    /// Resolve the current round and advance.
    ///
    /// Returns `Ok(true)` while the session stays active and `Ok(false)`
    /// exactly once, on conclusion. The session concludes early as soon
    /// as one side's round wins reach a majority of `total_rounds`;
    /// otherwise it concludes after the last round, with the result
    /// decided by the round tally (equal tallies draw).
    pub fn next_round(&mut self) -> Result<bool> {
        let config = self.config.clone();
        let session = self
            .session
            .as_mut()
            .filter(|s| s.active)
            .ok_or(EngineError::NoActiveCombat)?;

        let round = session.current_round;
        let (player_card, opponent_card) = match (
            session.selected(Side::Player, round),
            session.selected(Side::Opponent, round),
        ) {
            (Some(p), Some(o)) => (p, o),
            _ => {
                tracing::debug!(round, "next_round rejected: missing card selection");
                return Err(EngineError::RoundNotReady);
            }
        };

        let outcome = resolve_round(
            player_card,
            opponent_card,
            session.attacker_strength(),
            session.defender_strength(),
            session.defending_terrain,
            &config,
        );

        session.attacker_casualties =
            (session.attacker_casualties + outcome.attacker_casualties).min(100.0);
        session.defender_casualties =
            (session.defender_casualties + outcome.defender_casualties).min(100.0);
        match outcome.winner {
            Some(Side::Player) => session.attacker_round_wins += 1,
            Some(Side::Opponent) => session.defender_round_wins += 1,
            None => session.drawn_rounds += 1,
        }

        session.log.push(RoundEntry {
            marker: RoundMarker::Round(round),
            winner: outcome.winner,
            player_card: Some(player_card),
            opponent_card: Some(opponent_card),
            player_score: outcome.player_score,
            opponent_score: outcome.opponent_score,
            attacker_casualties: outcome.attacker_casualties,
            defender_casualties: outcome.defender_casualties,
            message: outcome.message,
        });

        let majority = session.majority();
        let settled = session.attacker_round_wins >= majority
            || session.defender_round_wins >= majority;
        let exhausted = round >= session.total_rounds;

        if settled || exhausted {
            let result = if session.attacker_round_wins > session.defender_round_wins {
                CombatResult::Victory
            } else if session.defender_round_wins > session.attacker_round_wins {
                CombatResult::Defeat
            } else {
                CombatResult::Draw
            };
            session.active = false;
            session.result = Some(result);
            let delta = resolve_conquest(session, &config).delta;
            session.territory_control_delta = delta;
            session.log.push(RoundEntry::final_entry(format!(
                "Combat concluded after round {}: {:?} ({}-{}, {} drawn)",
                round,
                result,
                session.attacker_round_wins,
                session.defender_round_wins,
                session.drawn_rounds,
            )));
            tracing::info!(?result, round, "combat session concluded");
            return Ok(false);
        }

        session.current_round += 1;
        Ok(true)
    }

    /// Consume a concluded session.
    ///
    /// Invokes `on_resolved(target, source, is_full_conquest,
    /// control_value)` exactly once so the caller can apply the
    /// territory delta, then clears the engine back to idle. Rejected
    /// with `RoundNotReady` while the session is still active and
    /// `NoActiveCombat` when there is no session at all. This is the
    /// single point where combat output crosses into territory state.
    pub fn end_combat(
        &mut self,
        mut on_resolved: impl FnMut(TerritoryId, TerritoryId, bool, f32),
    ) -> Result<CombatResult> {
        let session = self.session.as_ref().ok_or(EngineError::NoActiveCombat)?;
        if session.active {
            tracing::debug!("end_combat rejected: session still active");
            return Err(EngineError::RoundNotReady);
        }
        let result = session.result.ok_or(EngineError::NoActiveCombat)?;

        let conquest = resolve_conquest(session, &self.config);
        on_resolved(
            session.defender_territory,
            session.attacker_territory,
            conquest.full_conquest,
            conquest.control_after,
        );
        tracing::info!(
            target = session.defender_territory.0,
            full = conquest.full_conquest,
            control = conquest.control_after,
            "combat session consumed"
        );
        self.session = None;
        Ok(result)
    }

    /// Consume a concluded session, writing the territory delta
    /// straight into the given store.
    pub fn end_combat_into(
        &mut self,
        territories: &mut impl TerritoryStore,
    ) -> Result<CombatResult> {
        let attacker = self.session.as_ref().map(|s| s.attacker);
        self.end_combat(|target, _source, full_conquest, control_value| {
            if full_conquest {
                if let Some(attacker) = attacker {
                    territories.set_owner(target, attacker);
                }
            }
            territories.set_control(target, control_value);
        })
    }

    /// Abandon the current session without consuming further inventory
    pub fn abandon(&mut self) {
        if self.session.take().is_some() {
            tracing::debug!("combat session abandoned");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::territory::{Territory, TerritoryMap};
    use crate::units::{RosterMap, UnitType};

    fn setup() -> (CombatEngine, TerritoryMap, RosterMap) {
        let mut engine = CombatEngine::new(CombatConfig::default());
        engine.set_inventory(PlayerId(1), CardInventory::standard());

        let mut territories = TerritoryMap::new();
        territories.insert(
            TerritoryId(1),
            Territory::new(Terrain::Plains).owned_by(PlayerId(1)),
        );
        territories.insert(
            TerritoryId(2),
            Territory::new(Terrain::Hills).owned_by(PlayerId(2)),
        );

        let mut rosters = RosterMap::new();
        rosters.spawn(UnitType::Infantry, TerritoryId(1));
        rosters.spawn(UnitType::Cavalry, TerritoryId(1));
        rosters.spawn(UnitType::Militia, TerritoryId(2));

        (engine, territories, rosters)
    }

    #[test]
    fn test_start_creates_round_one_active_session() {
        let (mut engine, territories, rosters) = setup();
        engine
            .start_combat(TerritoryId(1), TerritoryId(2), &territories, &rosters)
            .unwrap();

        let session = engine.session().unwrap();
        assert_eq!(session.current_round, 1);
        assert!(session.active);
        assert_eq!(session.log.entries()[0].marker, RoundMarker::Start);
        assert_eq!(session.attacking_units.len(), 2);
    }

    #[test]
    fn test_start_rejects_empty_attacking_roster() {
        let (mut engine, territories, _) = setup();
        let empty = RosterMap::new();
        let err = engine
            .start_combat(TerritoryId(1), TerritoryId(2), &territories, &empty)
            .unwrap_err();
        assert_eq!(err, EngineError::InvalidTarget);
        assert!(engine.session().is_none());
    }

    #[test]
    fn test_start_rejects_unknown_territory() {
        let (mut engine, territories, rosters) = setup();
        let err = engine
            .start_combat(TerritoryId(1), TerritoryId(99), &territories, &rosters)
            .unwrap_err();
        assert_eq!(err, EngineError::InvalidTarget);
        assert!(engine.session().is_none());
    }

    #[test]
    fn test_second_session_rejected() {
        let (mut engine, territories, rosters) = setup();
        engine
            .start_combat(TerritoryId(1), TerritoryId(2), &territories, &rosters)
            .unwrap();
        let err = engine
            .start_combat(TerritoryId(1), TerritoryId(2), &territories, &rosters)
            .unwrap_err();
        assert_eq!(err, EngineError::AlreadyActive);
    }

    #[test]
    fn test_select_unowned_card_leaves_state_unchanged() {
        let (mut engine, territories, rosters) = setup();
        engine.set_inventory(PlayerId(1), CardInventory::new());
        engine
            .start_combat(TerritoryId(1), TerritoryId(2), &territories, &rosters)
            .unwrap();

        let err = engine.select_card(CardKind::Charge, Side::Player).unwrap_err();
        assert_eq!(err, EngineError::CardUnavailable);
        assert!(engine.session().unwrap().player_cards[0].is_none());
    }

    #[test]
    fn test_select_consumes_inventory_once() {
        let (mut engine, territories, rosters) = setup();
        engine
            .start_combat(TerritoryId(1), TerritoryId(2), &territories, &rosters)
            .unwrap();

        let before = engine.available_cards(PlayerId(1));
        let charge_before = before.iter().find(|c| c.kind == CardKind::Charge).unwrap().count;

        engine.select_card(CardKind::Charge, Side::Player).unwrap();
        let after = engine.available_cards(PlayerId(1));
        let charge_after = after.iter().find(|c| c.kind == CardKind::Charge).unwrap().count;
        assert_eq!(charge_after, charge_before - 1);

        // Second selection in the same round is rejected and consumes nothing
        let err = engine.select_card(CardKind::Volley, Side::Player).unwrap_err();
        assert_eq!(err, EngineError::CardUnavailable);
        let again = engine.available_cards(PlayerId(1));
        let volley = again.iter().find(|c| c.kind == CardKind::Volley).unwrap().count;
        assert_eq!(volley, 4);
    }

    #[test]
    fn test_advance_without_both_cards_rejected() {
        let (mut engine, territories, rosters) = setup();
        engine
            .start_combat(TerritoryId(1), TerritoryId(2), &territories, &rosters)
            .unwrap();
        engine.select_card(CardKind::Charge, Side::Player).unwrap();

        let err = engine.next_round().unwrap_err();
        assert_eq!(err, EngineError::RoundNotReady);
        assert_eq!(engine.session().unwrap().current_round, 1);
    }

    #[test]
    fn test_operations_rejected_when_idle() {
        let mut engine = CombatEngine::new(CombatConfig::default());
        assert_eq!(
            engine.select_card(CardKind::Charge, Side::Player).unwrap_err(),
            EngineError::NoActiveCombat
        );
        assert_eq!(engine.next_round().unwrap_err(), EngineError::NoActiveCombat);
        assert_eq!(
            engine.end_combat(|_, _, _, _| {}).unwrap_err(),
            EngineError::NoActiveCombat
        );
    }

    #[test]
    fn test_end_combat_rejected_while_active() {
        let (mut engine, territories, rosters) = setup();
        engine
            .start_combat(TerritoryId(1), TerritoryId(2), &territories, &rosters)
            .unwrap();
        assert_eq!(
            engine.end_combat(|_, _, _, _| {}).unwrap_err(),
            EngineError::RoundNotReady
        );
        // Session untouched by the rejection
        assert!(engine.session().unwrap().active);
    }

    #[test]
    fn test_abandon_returns_to_idle() {
        let (mut engine, territories, rosters) = setup();
        engine
            .start_combat(TerritoryId(1), TerritoryId(2), &territories, &rosters)
            .unwrap();
        engine.abandon();
        assert!(engine.session().is_none());
        // A new session can start immediately
        engine
            .start_combat(TerritoryId(1), TerritoryId(2), &territories, &rosters)
            .unwrap();
    }
}
