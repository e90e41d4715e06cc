//! Shared test helpers for unit tests, integration tests and benchmarks.
//!
//! Gated behind `#[cfg(any(test, feature = "test-utils"))]`.

use crate::engine::Engine;
use crate::id::Era;
use crate::item::{Dimension, Item};
use crate::progress::UserProgress;

// ===========================================================================
// Starter catalog
// ===========================================================================

/// The four elements every player starts with.
pub const STARTING_ITEMS: [&str; 4] = ["terre", "eau", "feu", "air"];

/// A small hand-written catalog:
///
/// | item | recipe | era | flags |
/// |---|---|---|---|
/// | terre, eau, feu, air | - | 0 | |
/// | boue | terre + eau | 0 | |
/// | vapeur | eau + feu | 0 | |
/// | energie | vapeur + feu | 0 | ephemeral, concept |
/// | outil_pierre | terre + feu | 0 | pivot |
/// | brique | boue + feu | 1 | |
/// | plasma | energie + feu | 0 | |
/// | eclair | energie + energie | 0 | |
pub fn starter_items() -> Vec<Item> {
    vec![
        Item::new("terre").named("Terre", "🌍"),
        Item::new("eau").named("Eau", "💧"),
        Item::new("feu").named("Feu", "🔥"),
        Item::new("air").named("Air", "💨"),
        Item::new("boue").named("Boue", "🟤").from_pair("terre", "eau"),
        Item::new("vapeur").named("Vapeur", "♨️").from_pair("eau", "feu"),
        Item::new("energie")
            .named("Énergie", "⚡")
            .in_dimension(Dimension::Concept)
            .ephemeral()
            .from_pair("vapeur", "feu"),
        Item::new("outil_pierre")
            .named("Outil en Pierre", "🪨")
            .pivot()
            .from_pair("terre", "feu"),
        Item::new("brique").named("Brique", "🧱").in_era(1).from_pair("boue", "feu"),
        Item::new("plasma").named("Plasma", "🌀").from_pair("energie", "feu"),
        Item::new("eclair").named("Éclair", "🌩️").from_pair("energie", "energie"),
    ]
}

pub fn starter_engine() -> Engine {
    Engine::from_items(starter_items()).expect("starter catalog is valid")
}

/// Era 0, the four elements discovered and in the inventory.
pub fn starter_progress() -> UserProgress {
    UserProgress::new(STARTING_ITEMS)
}

// ===========================================================================
// Generated catalogs
// ===========================================================================

/// SplitMix64. Deterministic across platforms, so generated catalogs are
/// reproducible from their seed.
#[derive(Debug, Clone)]
pub struct CatalogRng {
    state: u64,
}

impl CatalogRng {
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    pub fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    /// Uniform-ish value in `0..bound`. `bound` must be non-zero.
    pub fn below(&mut self, bound: usize) -> usize {
        (self.next_u64() % bound as u64) as usize
    }
}

/// Generate a catalog of `count` items spread over `eras` eras, in the
/// shape the content pipeline produces: the four starting elements, then
/// items `item_4..` each with one recipe drawn from earlier items. Every
/// 300th item is a pivot and roughly one in five is ephemeral.
pub fn generated_items(count: usize, eras: Era, seed: u64) -> Vec<Item> {
    let mut rng = CatalogRng::new(seed);
    let mut items: Vec<Item> = STARTING_ITEMS.iter().map(|id| Item::new(*id)).collect();

    for i in items.len()..count {
        let era = ((i as u64 * eras as u64) / count as u64) as Era;
        let a = items[rng.below(i)].id.clone();
        let b = items[rng.below(i)].id.clone();
        let mut item = Item::new(format!("item_{i}"))
            .named(format!("Objet {i}"), "✨")
            .in_era(era)
            .in_dimension(Dimension::ALL[i % Dimension::ALL.len()])
            .from_pair(a, b);
        if i % 300 == 0 {
            item = item.pivot();
        }
        if rng.below(5) == 0 {
            item = item.ephemeral();
        }
        items.push(item);
    }

    items
}
