//! Tactical cards: static catalog and per-player consumable inventory

pub mod catalog;
pub mod inventory;

pub use catalog::{CardCategory, CardKind, CardSpec};
pub use inventory::{CardInventory, CardWithCount};
