//! The catalog index.
//!
//! A [`Catalog`] owns every [`Item`] and the indexes the engine queries:
//!
//! - the **pair index**, mapping an unordered pair of ingredients to the item
//!   it produces;
//! - the **consumer index**, mapping each ingredient to the set of items it
//!   appears in a recipe for;
//! - item keys and pivot keys grouped by unlock era.
//!
//! Everything is built in a single pass by [`CatalogBuilder::build`] and is
//! immutable afterwards. Items are addressed internally by dense
//! [`ItemKey`]s, so an identifier is hashed once per query and the indexes
//! work on integers.
//!
//! Catalog defects that do not prevent indexing (the same pair declared by two
//! items, recipes naming unknown ingredients, recipes with an arity other than
//! two) are tolerated and recorded as [`CatalogDiagnostic`]s.

use crate::id::{Era, ItemId, ItemKey};
use crate::item::Item;
use std::collections::{BTreeMap, HashMap};

// ---------------------------------------------------------------------------
// Errors and diagnostics
// ---------------------------------------------------------------------------

/// Errors that prevent a catalog from being built.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("duplicate item id: {0}")]
    DuplicateItem(ItemId),
}

/// A non-fatal defect found while indexing the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogDiagnostic {
    /// Two items declare the same ingredient pair. The later item in catalog
    /// order (`replacement`) is the one fusion produces.
    DuplicatePair {
        pair: (ItemId, ItemId),
        previous: ItemId,
        replacement: ItemId,
    },

    /// A recipe of `item` names an ingredient that is not in the catalog.
    /// The recipe can never be fused.
    DanglingIngredient { item: ItemId, ingredient: ItemId },

    /// A recipe of `item` does not have exactly two ingredients and is
    /// skipped for fusion.
    IgnoredRecipe { item: ItemId, arity: usize },
}

impl std::fmt::Display for CatalogDiagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogDiagnostic::DuplicatePair {
                pair: (a, b),
                previous,
                replacement,
            } => write!(
                f,
                "{a} + {b} is declared by both '{previous}' and '{replacement}'; '{replacement}' wins"
            ),
            CatalogDiagnostic::DanglingIngredient { item, ingredient } => {
                write!(f, "recipe of '{item}' uses unknown ingredient '{ingredient}'")
            }
            CatalogDiagnostic::IgnoredRecipe { item, arity } => {
                write!(f, "recipe of '{item}' has {arity} ingredients and never fuses")
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Pair canonicalization
// ---------------------------------------------------------------------------

/// Order-independent key for two ingredients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PairKey(ItemKey, ItemKey);

impl PairKey {
    pub fn new(a: ItemKey, b: ItemKey) -> Self {
        if a <= b { Self(a, b) } else { Self(b, a) }
    }

    pub fn keys(self) -> (ItemKey, ItemKey) {
        (self.0, self.1)
    }
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

/// Collects items, then indexes them into an immutable [`Catalog`].
#[derive(Debug, Default)]
pub struct CatalogBuilder {
    items: Vec<Item>,
}

impl CatalogBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an item. Catalog order matters: on duplicate ingredient pairs
    /// the item registered last wins.
    pub fn register(&mut self, item: Item) -> &mut Self {
        self.items.push(item);
        self
    }

    pub fn extend(&mut self, items: impl IntoIterator<Item = Item>) -> &mut Self {
        self.items.extend(items);
        self
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Build every index in one pass over all recipes.
    pub fn build(self) -> Result<Catalog, CatalogError> {
        let items = self.items;

        let mut keys: HashMap<ItemId, ItemKey> = HashMap::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            let key = ItemKey(index as u32);
            if keys.insert(item.id.clone(), key).is_some() {
                return Err(CatalogError::DuplicateItem(item.id.clone()));
            }
        }

        let mut pairs: HashMap<PairKey, ItemKey> = HashMap::new();
        let mut consumers: Vec<Vec<ItemKey>> = vec![Vec::new(); items.len()];
        let mut pivots: BTreeMap<Era, Vec<ItemKey>> = BTreeMap::new();
        let mut eras: BTreeMap<Era, Vec<ItemKey>> = BTreeMap::new();
        let mut diagnostics = Vec::new();

        for (index, item) in items.iter().enumerate() {
            let result = ItemKey(index as u32);

            eras.entry(item.era_unlock).or_default().push(result);
            if item.is_pivot {
                pivots.entry(item.era_unlock).or_default().push(result);
            }

            for recipe in &item.recipes {
                let mut resolved = Vec::with_capacity(recipe.len());
                for ingredient in recipe {
                    match keys.get(ingredient.as_str()) {
                        Some(&key) => {
                            consumers[key.index()].push(result);
                            resolved.push(key);
                        }
                        None => {
                            tracing::warn!(
                                item = %item.id,
                                ingredient = %ingredient,
                                "recipe references an unknown ingredient"
                            );
                            diagnostics.push(CatalogDiagnostic::DanglingIngredient {
                                item: item.id.clone(),
                                ingredient: ingredient.clone(),
                            });
                        }
                    }
                }

                if recipe.len() != 2 {
                    tracing::debug!(
                        item = %item.id,
                        arity = recipe.len(),
                        "recipe skipped for fusion"
                    );
                    diagnostics.push(CatalogDiagnostic::IgnoredRecipe {
                        item: item.id.clone(),
                        arity: recipe.len(),
                    });
                    continue;
                }
                let &[a, b] = resolved.as_slice() else {
                    // An ingredient is dangling; already reported.
                    continue;
                };

                let pair = PairKey::new(a, b);
                if let Some(previous) = pairs.insert(pair, result)
                    && previous != result
                {
                    let (x, y) = pair.keys();
                    let pair_ids = (items[x.index()].id.clone(), items[y.index()].id.clone());
                    tracing::warn!(
                        pair = ?pair_ids,
                        previous = %items[previous.index()].id,
                        replacement = %item.id,
                        "ingredient pair declared by two items, later one wins"
                    );
                    diagnostics.push(CatalogDiagnostic::DuplicatePair {
                        pair: pair_ids,
                        previous: items[previous.index()].id.clone(),
                        replacement: item.id.clone(),
                    });
                }
            }
        }

        for set in &mut consumers {
            set.sort_unstable();
            set.dedup();
        }

        let max_era = items.iter().map(|i| i.era_unlock).max();

        tracing::info!(
            items = items.len(),
            pair_recipes = pairs.len(),
            eras = max_era.map_or(0, |e| e + 1),
            diagnostics = diagnostics.len(),
            "catalog indexed"
        );

        Ok(Catalog {
            items,
            keys,
            pairs,
            consumers,
            pivots,
            eras,
            max_era,
            diagnostics,
        })
    }
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

/// Immutable, indexed item catalog. Frozen after build; safe to share
/// between threads.
#[derive(Debug)]
pub struct Catalog {
    items: Vec<Item>,
    keys: HashMap<ItemId, ItemKey>,
    pairs: HashMap<PairKey, ItemKey>,
    /// Indexed by ingredient key; sorted, deduplicated result keys.
    consumers: Vec<Vec<ItemKey>>,
    pivots: BTreeMap<Era, Vec<ItemKey>>,
    /// Every item key grouped by unlock era, catalog order within an era.
    eras: BTreeMap<Era, Vec<ItemKey>>,
    max_era: Option<Era>,
    diagnostics: Vec<CatalogDiagnostic>,
}

impl Catalog {
    /// Build a catalog from items in catalog order.
    pub fn from_items(items: impl IntoIterator<Item = Item>) -> Result<Self, CatalogError> {
        let mut builder = CatalogBuilder::new();
        builder.extend(items);
        builder.build()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn key_of(&self, id: &str) -> Option<ItemKey> {
        self.keys.get(id).copied()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.keys.contains_key(id)
    }

    /// Look up an item by identifier.
    pub fn get(&self, id: &str) -> Option<&Item> {
        self.key_of(id).map(|key| self.item(key))
    }

    /// Look up an item by key. Keys come from this catalog, so this does not
    /// fail for them.
    pub fn item(&self, key: ItemKey) -> &Item {
        &self.items[key.index()]
    }

    /// All items in catalog order.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// The item a pair of ingredients produces, ignoring eras.
    pub fn produced_by(&self, a: ItemKey, b: ItemKey) -> Option<ItemKey> {
        self.pairs.get(&PairKey::new(a, b)).copied()
    }

    /// Every `(ingredients, result)` entry of the pair index.
    pub fn pair_recipes(&self) -> impl Iterator<Item = (ItemKey, ItemKey, ItemKey)> + '_ {
        self.pairs.iter().map(|(pair, result)| {
            let (a, b) = pair.keys();
            (a, b, *result)
        })
    }

    pub fn pair_recipe_count(&self) -> usize {
        self.pairs.len()
    }

    /// Items that `ingredient` appears in a recipe for, sorted by key.
    pub fn consumers_of(&self, ingredient: ItemKey) -> &[ItemKey] {
        &self.consumers[ingredient.index()]
    }

    /// Pivot items whose unlock era is `era`.
    pub fn pivots_in_era(&self, era: Era) -> &[ItemKey] {
        self.pivots.get(&era).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Keys of the items whose unlock era is `era`, in catalog order.
    pub fn keys_in_era(&self, era: Era) -> &[ItemKey] {
        self.eras.get(&era).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Items whose unlock era is `era`, in catalog order.
    pub fn items_in_era(&self, era: Era) -> impl Iterator<Item = &Item> + '_ {
        self.keys_in_era(era).iter().map(|&key| self.item(key))
    }

    /// Highest unlock era of any item, or `None` for an empty catalog.
    pub fn max_era(&self) -> Option<Era> {
        self.max_era
    }

    /// Defects found while indexing.
    pub fn diagnostics(&self) -> &[CatalogDiagnostic] {
        &self.diagnostics
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
