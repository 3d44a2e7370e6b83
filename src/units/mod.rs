//! Military units and per-territory rosters

pub mod roster;
pub mod unit_type;

pub use roster::{composite_strength, RosterMap, RosterStore, Unit};
pub use unit_type::UnitType;
