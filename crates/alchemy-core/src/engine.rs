//! The resolution engine.
//!
//! [`Engine`] answers the game's questions against a shared, immutable
//! [`Catalog`]: what a pair of items fuses into, how an item should be shown,
//! and whether the player may leave the current era. Progress is always an
//! argument; the engine keeps no per-player state, so one engine can serve
//! any number of players.
//!
//! Negative game outcomes (no recipe, a recipe from a later era, an era gate
//! that is still closed) are ordinary return values. Only an identifier that
//! is missing from the catalog is an error.

use crate::catalog::{Catalog, CatalogError};
use crate::id::{Era, ItemId, ItemKey};
use crate::item::{Dimension, Item};
use crate::progress::UserProgress;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;

// ---------------------------------------------------------------------------
// Query results
// ---------------------------------------------------------------------------

/// How an item is presented for a given progress snapshot.
///
/// Along a forward trajectory (era never decreases, discoveries never
/// shrink) an item only ever moves `Locked -> Usable -> Exhausted`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemState {
    /// Not usable yet: its era has not been reached, or it has not been
    /// discovered.
    Locked,
    /// Discovered and still an ingredient of something undiscovered.
    Usable,
    /// Discovered, but everything it helps produce is already discovered.
    Exhausted,
}

/// Errors returned by engine queries.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("item not found: {0}")]
    ItemNotFound(ItemId),
}

/// The decision a host applies after a successful fusion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FusionOutcome {
    pub produced: ItemId,

    /// The product was not yet in `discovered_items`.
    pub newly_discovered: bool,

    /// Ephemeral ingredients to drop from the inventory. No repeats.
    pub consumed: Vec<ItemId>,
}

/// Discovery count for the player's current era.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EraProgress {
    pub era: Era,
    pub discovered: usize,
    pub total: usize,
}

impl EraProgress {
    pub fn is_complete(&self) -> bool {
        self.discovered >= self.total
    }
}

/// Which inventory entries [`Engine::deck`] returns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DeckFilter {
    #[default]
    All,
    Dimension(Dimension),
}

impl DeckFilter {
    fn accepts(self, item: &Item) -> bool {
        match self {
            DeckFilter::All => true,
            DeckFilter::Dimension(d) => item.dimension == d,
        }
    }
}

/// One visible card in the player's deck.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeckEntry<'a> {
    pub item: &'a Item,
    pub state: ItemState,
}

impl DeckEntry<'_> {
    /// Locked cards are shown but cannot be dragged onto the workspace.
    pub fn is_draggable(&self) -> bool {
        self.state != ItemState::Locked
    }
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// Stateless query front-end over a shared catalog. Cheap to clone.
#[derive(Debug, Clone)]
pub struct Engine {
    catalog: Arc<Catalog>,
}

impl Engine {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }

    /// Index `items` and wrap the result in an engine.
    pub fn from_items(items: impl IntoIterator<Item = Item>) -> Result<Self, CatalogError> {
        Ok(Self::new(Arc::new(Catalog::from_items(items)?)))
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Shared handle to the catalog, for hosts that hold it elsewhere.
    pub fn shared_catalog(&self) -> Arc<Catalog> {
        Arc::clone(&self.catalog)
    }

    // -- Core queries --

    /// The item produced by fusing `a` with `b`, in either order.
    ///
    /// Returns `None` when no recipe matches, when either identifier is not
    /// in the catalog, and when the product belongs to an era the player has
    /// not reached. The last two cases are indistinguishable
    /// from a wrong combination.
    pub fn fuse(&self, a: &str, b: &str, progress: &UserProgress) -> Option<&Item> {
        let a = self.catalog.key_of(a)?;
        let b = self.catalog.key_of(b)?;
        let produced = self.catalog.item(self.catalog.produced_by(a, b)?);
        (produced.era_unlock <= progress.current_era).then_some(produced)
    }

    /// Classify one item for `progress`.
    ///
    /// An item that is unlocked but not discovered is reported as
    /// [`ItemState::Locked`]; hosts only show discovered items, so this is
    /// a convention for an otherwise unreachable query.
    pub fn classify(&self, id: &str, progress: &UserProgress) -> Result<ItemState, EngineError> {
        let key = self
            .catalog
            .key_of(id)
            .ok_or_else(|| EngineError::ItemNotFound(ItemId::from(id)))?;
        Ok(self.classify_key(key, progress))
    }

    /// Whether every pivot of the current era has been discovered. An era
    /// without pivots never blocks.
    pub fn can_advance_era(&self, progress: &UserProgress) -> bool {
        self.catalog
            .pivots_in_era(progress.current_era)
            .iter()
            .all(|&pivot| self.is_discovered(pivot, progress))
    }

    // -- Derived queries --

    /// [`fuse`](Self::fuse), plus the bookkeeping the host must apply.
    pub fn resolve_fusion(
        &self,
        a: &str,
        b: &str,
        progress: &UserProgress,
    ) -> Option<FusionOutcome> {
        let produced = self.fuse(a, b, progress)?;

        let mut consumed: Vec<ItemId> = Vec::new();
        for id in [a, b] {
            if let Some(ingredient) = self.catalog.get(id)
                && ingredient.is_ephemeral
                && !consumed.contains(&ingredient.id)
            {
                consumed.push(ingredient.id.clone());
            }
        }

        Some(FusionOutcome {
            produced: produced.id.clone(),
            newly_discovered: !progress.is_discovered(produced.id.as_str()),
            consumed,
        })
    }

    /// Pivots of the current era that are still undiscovered, in catalog
    /// order. Empty exactly when [`can_advance_era`](Self::can_advance_era)
    /// is true.
    pub fn missing_pivots(&self, progress: &UserProgress) -> Vec<&Item> {
        self.catalog
            .pivots_in_era(progress.current_era)
            .iter()
            .filter(|&&pivot| !self.is_discovered(pivot, progress))
            .map(|&pivot| self.catalog.item(pivot))
            .collect()
    }

    /// How many of the current era's items have been discovered.
    pub fn era_progress(&self, progress: &UserProgress) -> EraProgress {
        let mut discovered = 0;
        let mut total = 0;
        for item in self.catalog.items_in_era(progress.current_era) {
            total += 1;
            if progress.is_discovered(item.id.as_str()) {
                discovered += 1;
            }
        }
        EraProgress {
            era: progress.current_era,
            discovered,
            total,
        }
    }

    /// The inventory as the deck shows it: inventory order, one entry per
    /// distinct item, exhausted items hidden. Ids missing from the catalog
    /// are skipped.
    pub fn deck(&self, progress: &UserProgress, filter: DeckFilter) -> Vec<DeckEntry<'_>> {
        let mut seen: HashSet<ItemKey> = HashSet::new();
        let mut deck = Vec::new();

        for id in &progress.inventory {
            let Some(key) = self.catalog.key_of(id.as_str()) else {
                continue;
            };
            if !seen.insert(key) {
                continue;
            }
            let item = self.catalog.item(key);
            if !filter.accepts(item) {
                continue;
            }
            let state = self.classify_key(key, progress);
            if state != ItemState::Exhausted {
                deck.push(DeckEntry { item, state });
            }
        }

        deck
    }

    /// Undiscovered items the player could produce right now: unlocked, and
    /// reachable through a pair recipe whose ingredients are both
    /// discovered. Catalog order. Linear in the size of the catalog.
    pub fn discoverable(&self, progress: &UserProgress) -> Vec<&Item> {
        let mut found: HashSet<ItemKey> = HashSet::new();

        for (a, b, result) in self.catalog.pair_recipes() {
            let item = self.catalog.item(result);
            if item.era_unlock <= progress.current_era
                && !progress.is_discovered(item.id.as_str())
                && self.is_discovered(a, progress)
                && self.is_discovered(b, progress)
            {
                found.insert(result);
            }
        }

        let mut keys: Vec<ItemKey> = found.into_iter().collect();
        keys.sort_unstable();
        keys.into_iter().map(|k| self.catalog.item(k)).collect()
    }

    // -- Internal helpers --

    fn is_discovered(&self, key: ItemKey, progress: &UserProgress) -> bool {
        progress.is_discovered(self.catalog.item(key).id.as_str())
    }

    fn classify_key(&self, key: ItemKey, progress: &UserProgress) -> ItemState {
        let item = self.catalog.item(key);

        if item.era_unlock > progress.current_era {
            return ItemState::Locked;
        }
        if !progress.is_discovered(item.id.as_str()) {
            return ItemState::Locked;
        }

        let exhausted = self
            .catalog
            .consumers_of(key)
            .iter()
            .all(|&result| self.is_discovered(result, progress));

        if exhausted {
            ItemState::Exhausted
        } else {
            ItemState::Usable
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
