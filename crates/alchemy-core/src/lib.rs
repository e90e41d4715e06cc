//! Alchemy Core -- the combination-resolution engine for combine-the-elements
//! games.
//!
//! Players fuse pairs of discovered items to discover new ones. Recipes are
//! gated by eras, and each era may name *pivot* items that must be discovered
//! before the player can move on.
//!
//! # Lifecycle
//!
//! ```rust,ignore
//! let engine = Engine::from_items(items)?;            // index once
//! let outcome = engine.resolve_fusion("terre", "eau", &progress);
//! if let Some(outcome) = outcome {
//!     progress.apply_fusion(&outcome);                // host owns progress
//! }
//! if engine.can_advance_era(&progress) {
//!     progress.enter_next_era();
//! }
//! ```
//!
//! # Key Types
//!
//! - [`catalog::Catalog`] -- Immutable item catalog with the pair index and
//!   the consumer (reverse ingredient) index, built once per catalog load.
//! - [`engine::Engine`] -- Stateless queries: `fuse`, `classify`,
//!   `can_advance_era`, and the deck/era helpers built on them.
//! - [`progress::UserProgress`] -- The player's discoveries, era and
//!   inventory. The only mutable state; owned by the host.
//! - [`validation`] -- Whole-catalog checks for content tooling.

pub mod catalog;
pub mod engine;
pub mod id;
pub mod item;
pub mod progress;
pub mod validation;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use catalog::{Catalog, CatalogBuilder, CatalogDiagnostic, CatalogError};
pub use engine::{
    DeckEntry, DeckFilter, Engine, EngineError, EraProgress, FusionOutcome, ItemState,
};
pub use id::{Era, ItemId, ItemKey};
pub use item::{Dimension, Item, Recipe};
pub use progress::UserProgress;
