//! Player progress.
//!
//! [`UserProgress`] is the only mutable state in the game. The engine reads it
//! by reference and never changes it; the host applies the engine's
//! decisions through the methods here, which keep the invariants
//! (discoveries never shrink, the era never goes back).

use crate::engine::FusionOutcome;
use crate::id::{Era, ItemId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A snapshot of one player's progress.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProgress {
    /// Every item the player has produced or started with.
    #[serde(alias = "discoveredItems")]
    pub discovered_items: BTreeSet<ItemId>,

    /// The era the player currently occupies.
    #[serde(alias = "currentEra")]
    pub current_era: Era,

    /// Items available to place on the workspace, in deck order. May hold
    /// the same id more than once.
    #[serde(default)]
    pub inventory: Vec<ItemId>,
}

impl UserProgress {
    /// Fresh progress at era 0 with `starting_items` discovered and in the
    /// inventory.
    pub fn new<I, S>(starting_items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<ItemId>,
    {
        let inventory: Vec<ItemId> = starting_items.into_iter().map(Into::into).collect();
        Self {
            discovered_items: inventory.iter().cloned().collect(),
            current_era: 0,
            inventory,
        }
    }

    pub fn at_era(mut self, era: Era) -> Self {
        self.current_era = era;
        self
    }

    pub fn is_discovered(&self, id: &str) -> bool {
        self.discovered_items.contains(id)
    }

    pub fn in_inventory(&self, id: &str) -> bool {
        self.inventory.iter().any(|i| i == id)
    }

    /// Mark an item as discovered and place it in the inventory. Returns
    /// false if it was already discovered, in which case nothing changes.
    pub fn discover(&mut self, id: impl Into<ItemId>) -> bool {
        let id = id.into();
        if self.discovered_items.contains(&id) {
            return false;
        }
        self.discovered_items.insert(id.clone());
        self.inventory.push(id);
        true
    }

    /// Apply a successful fusion: record the product if it is new, then
    /// drop every inventory copy of the consumed ingredients.
    pub fn apply_fusion(&mut self, outcome: &FusionOutcome) {
        if outcome.newly_discovered {
            self.discover(outcome.produced.clone());
        }
        if !outcome.consumed.is_empty() {
            self.inventory
                .retain(|id| !outcome.consumed.iter().any(|c| c == id));
        }
    }

    /// Move to the next era. The caller is expected to have checked
    /// [`Engine::can_advance_era`](crate::engine::Engine::can_advance_era).
    pub fn enter_next_era(&mut self) -> Era {
        self.current_era = self.current_era.saturating_add(1);
        self.current_era
    }
}
