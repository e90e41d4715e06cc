//! Serde data file structs for catalog content.
//!
//! These structs define the on-disk format for items. They are deserialized
//! from RON, JSON, or TOML data files and then converted into
//! [`alchemy_core::Item`]s by the loader.
//!
//! Field names accept both `snake_case` and the camelCase spelling used by
//! exported catalogs (`eraUnlock`, `isPivot`, ...).

use alchemy_core::{Dimension, Era, Item, ItemId, Recipe};
use serde::Deserialize;

// ===========================================================================
// Items
// ===========================================================================

/// An item definition in a data file.
#[derive(Debug, Clone, Deserialize)]
pub struct ItemData {
    pub id: String,

    /// Empty or absent means the id is shown.
    #[serde(default, alias = "name", alias = "displayName")]
    pub display_name: String,

    #[serde(default, alias = "emoji")]
    pub glyph: String,

    #[serde(default, alias = "eraUnlock")]
    pub era_unlock: Era,

    #[serde(default, alias = "isPivot")]
    pub is_pivot: bool,

    #[serde(default, alias = "isEphemeral")]
    pub is_ephemeral: bool,

    #[serde(default)]
    pub dimension: Dimension,

    #[serde(default)]
    pub recipes: Vec<RecipeData>,
}

impl ItemData {
    pub fn into_item(self) -> Item {
        let mut item = Item::new(self.id)
            .in_era(self.era_unlock)
            .in_dimension(self.dimension);
        if !self.display_name.is_empty() {
            item.display_name = self.display_name;
        }
        item.glyph = self.glyph;
        item.is_pivot = self.is_pivot;
        item.is_ephemeral = self.is_ephemeral;
        item.recipes = self.recipes.iter().map(RecipeData::ingredients).collect();
        item
    }
}

// ===========================================================================
// Recipes
// ===========================================================================

/// A recipe entry, either as a list of ingredient ids or as a single
/// `+`-joined string.
///
/// ```ron
/// recipes: [["terre", "eau"], "terre+feu"]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum RecipeData {
    Ingredients(Vec<String>),
    Joined(String),
}

impl RecipeData {
    /// Ingredient ids in authoring order. Blank segments of a joined string
    /// are dropped.
    pub fn ingredients(&self) -> Recipe {
        match self {
            RecipeData::Ingredients(ids) => ids.iter().map(|id| ItemId::from(id.as_str())).collect(),
            RecipeData::Joined(joined) => joined
                .split('+')
                .map(str::trim)
                .filter(|part| !part.is_empty())
                .map(ItemId::from)
                .collect(),
        }
    }
}
