//! Pure round scoring
//!
//! No RNG and no side effects: identical inputs always produce
//! identical outcomes, so the resolver is independently testable.

use serde::{Deserialize, Serialize};

use crate::cards::CardKind;
use crate::core::config::CombatConfig;
use crate::core::types::Side;
use crate::territory::Terrain;

/// Outcome of a single resolved round
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundOutcome {
    /// Round winner; `None` on an exact score tie
    pub winner: Option<Side>,
    pub player_score: f32,
    pub opponent_score: f32,
    /// Casualty percentage for the attacking side this round
    pub attacker_casualties: f32,
    /// Casualty percentage for the defending side this round
    pub defender_casualties: f32,
    pub message: String,
}

/// Score one side: card strength, weighted roster strength, terrain bonus
fn side_score(card: CardKind, unit_strength: f32, terrain: Terrain, config: &CombatConfig) -> f32 {
    let mut score = card.spec().strength + unit_strength * config.unit_strength_weight;
    if card.favors_terrain(terrain) {
        score += config.terrain_bonus;
    }
    score
}

/// Resolve one combat round.
///
/// A card that counters the opponent's card wins the round outright,
/// regardless of scores; mutual counters cancel and the round falls
/// back to score comparison. Casualties are proportional to the score
/// gap, clamped so the loser always bleeds and the winner always pays
/// a smaller but nonzero price.
pub fn resolve_round(
    player_card: CardKind,
    opponent_card: CardKind,
    attacker_strength: f32,
    defender_strength: f32,
    defending_terrain: Terrain,
    config: &CombatConfig,
) -> RoundOutcome {
    let player_score = side_score(player_card, attacker_strength, defending_terrain, config);
    let opponent_score = side_score(opponent_card, defender_strength, defending_terrain, config);

    let player_counters = player_card.counters(opponent_card);
    let opponent_counters = opponent_card.counters(player_card);

    let winner = match (player_counters, opponent_counters) {
        (true, false) => Some(Side::Player),
        (false, true) => Some(Side::Opponent),
        // Mutual counters cancel; no counter at all also compares scores
        _ => {
            if player_score > opponent_score {
                Some(Side::Player)
            } else if opponent_score > player_score {
                Some(Side::Opponent)
            } else {
                None
            }
        }
    };

    let max_score = player_score.max(opponent_score).max(1.0);
    let gap = (player_score - opponent_score).abs();
    let loser_casualties =
        (config.casualty_scale * (gap / max_score) * 100.0).clamp(config.min_casualty, config.max_casualty);
    let winner_casualties = (loser_casualties * config.winner_casualty_ratio).max(1.0);

    let (attacker_casualties, defender_casualties, message) = match winner {
        Some(Side::Player) => (
            winner_casualties,
            loser_casualties,
            format!(
                "{:?} overcomes {:?}: attacker wins the round",
                player_card, opponent_card
            ),
        ),
        Some(Side::Opponent) => (
            loser_casualties,
            winner_casualties,
            format!(
                "{:?} overcomes {:?}: defender wins the round",
                opponent_card, player_card
            ),
        ),
        None => (
            config.draw_casualty,
            config.draw_casualty,
            format!("{:?} matches {:?}: the round is drawn", player_card, opponent_card),
        ),
    };

    RoundOutcome {
        winner,
        player_score,
        opponent_score,
        attacker_casualties,
        defender_casualties,
        message,
    }
}
