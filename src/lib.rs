//! Hexhold - Turn-Based Strategy Combat Engine

pub mod cards;
pub mod combat;
pub mod core;
pub mod territory;
pub mod units;
pub mod victory;
