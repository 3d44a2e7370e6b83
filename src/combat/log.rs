//! Append-only battle log
//!
//! A session log always begins with a synthetic Start entry (round 0)
//! and, once concluded, ends with a synthetic Final entry carrying the
//! overall result.

use serde::{Deserialize, Serialize};

use crate::cards::CardKind;
use crate::core::types::Side;

/// Position of a log entry in the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundMarker {
    Start,
    Round(u32),
    Final,
}

/// One battle log entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoundEntry {
    pub marker: RoundMarker,
    pub winner: Option<Side>,
    pub player_card: Option<CardKind>,
    pub opponent_card: Option<CardKind>,
    pub player_score: f32,
    pub opponent_score: f32,
    pub attacker_casualties: f32,
    pub defender_casualties: f32,
    pub message: String,
}

impl RoundEntry {
    /// Synthetic entry marking session start
    pub fn start(message: String) -> Self {
        Self {
            marker: RoundMarker::Start,
            winner: None,
            player_card: None,
            opponent_card: None,
            player_score: 0.0,
            opponent_score: 0.0,
            attacker_casualties: 0.0,
            defender_casualties: 0.0,
            message,
        }
    }

    /// Synthetic entry marking session conclusion
    pub fn final_entry(message: String) -> Self {
        Self {
            marker: RoundMarker::Final,
            ..Self::start(message)
        }
    }
}

/// Ordered, append-only log of a combat session
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BattleLog {
    entries: Vec<RoundEntry>,
}

impl BattleLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: RoundEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[RoundEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
