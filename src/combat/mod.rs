//! Combat resolution engine
//!
//! A session runs one attacker-vs-defender engagement across a fixed
//! number of rounds. Each round both sides play a tactical card; the
//! pure resolver scores the round, the session tallies wins and
//! casualties, and the conquest resolver converts the final tally into
//! a territory-control delta when the session concludes.

pub mod conquest;
pub mod log;
pub mod resolver;
pub mod session;

pub use conquest::{resolve_conquest, ConquestOutcome};
pub use log::{BattleLog, RoundEntry, RoundMarker};
pub use resolver::{resolve_round, RoundOutcome};
pub use session::{CombatEngine, CombatSession};
