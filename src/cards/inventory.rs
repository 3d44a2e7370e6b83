//! Per-player consumable card inventory
//!
//! Counts never go negative: a successful `consume` decrements by
//! exactly one, and consuming an exhausted card is rejected.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::cards::catalog::{CardKind, CardSpec};

/// Catalog entry paired with the remaining count in an inventory
#[derive(Debug, Clone, Copy, Serialize)]
pub struct CardWithCount {
    pub kind: CardKind,
    pub spec: CardSpec,
    pub count: u32,
}

/// A player's remaining tactical cards
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CardInventory {
    counts: AHashMap<CardKind, u32>,
}

impl CardInventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Standard starting inventory: a thick basic tier, a few
    /// intermediate plays, one advanced card of each kind.
    pub fn standard() -> Self {
        let mut inv = Self::new();
        for kind in CardKind::ALL {
            let count = match kind.spec().category {
                crate::cards::CardCategory::Basic => 4,
                crate::cards::CardCategory::Intermediate => 2,
                crate::cards::CardCategory::Advanced => 1,
            };
            inv.add(kind, count);
        }
        inv
    }

    /// Remaining count for a card kind
    pub fn count(&self, kind: CardKind) -> u32 {
        self.counts.get(&kind).copied().unwrap_or(0)
    }

    /// Catalog entries with a positive remaining count, in catalog order.
    /// Never mutates state.
    pub fn available(&self) -> Vec<CardWithCount> {
        CardKind::ALL
            .into_iter()
            .filter_map(|kind| {
                let count = self.count(kind);
                (count > 0).then(|| CardWithCount {
                    kind,
                    spec: kind.spec(),
                    count,
                })
            })
            .collect()
    }

    /// Consume one use of a card. Returns false, leaving the inventory
    /// untouched, when no uses remain.
    pub fn consume(&mut self, kind: CardKind) -> bool {
        match self.counts.get_mut(&kind) {
            Some(count) if *count > 0 => {
                *count -= 1;
                true
            }
            _ => false,
        }
    }

    /// Add uses of a card (acquisition flows)
    pub fn add(&mut self, kind: CardKind, amount: u32) {
        *self.counts.entry(kind).or_insert(0) += amount;
    }
}
