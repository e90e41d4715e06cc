//! Catalog entries.
//!
//! An [`Item`] is immutable once it has been handed to a
//! [`CatalogBuilder`](crate::catalog::CatalogBuilder). Presentation fields
//! (`display_name`, `glyph`, `dimension`) are carried for the host and are
//! never consulted by the resolution engine.

use crate::id::{Era, ItemId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Category tag used by the deck to group items. Closed set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dimension {
    #[default]
    Matiere,
    Concept,
    Micro,
    Macro,
    Imaginaire,
}

impl Dimension {
    pub const ALL: [Dimension; 5] = [
        Dimension::Matiere,
        Dimension::Concept,
        Dimension::Micro,
        Dimension::Macro,
        Dimension::Imaginaire,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Dimension::Matiere => "matiere",
            Dimension::Concept => "concept",
            Dimension::Micro => "micro",
            Dimension::Macro => "macro",
            Dimension::Imaginaire => "imaginaire",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One way to produce an item: the ingredients fused together.
///
/// Only two-ingredient recipes take part in fusion. Other arities are kept
/// so that catalogs round-trip, and still count as ingredient uses when
/// deciding whether an item is exhausted.
pub type Recipe = Vec<ItemId>;

/// A catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Unique identifier (primary key within the catalog).
    pub id: ItemId,

    /// Human-readable name.
    pub display_name: String,

    /// Emoji or icon key shown by the host.
    pub glyph: String,

    /// First era in which the item can be produced.
    pub era_unlock: Era,

    /// Must be discovered before leaving `era_unlock`.
    pub is_pivot: bool,

    /// Removed from the inventory after being used as an ingredient.
    pub is_ephemeral: bool,

    pub dimension: Dimension,

    /// Ingredient lists that produce this item, in authoring order.
    pub recipes: Vec<Recipe>,
}

impl Item {
    /// A plain era-0 item with no recipes. The display name defaults to the id.
    pub fn new(id: impl Into<ItemId>) -> Self {
        let id = id.into();
        Self {
            display_name: id.to_string(),
            id,
            glyph: String::new(),
            era_unlock: 0,
            is_pivot: false,
            is_ephemeral: false,
            dimension: Dimension::default(),
            recipes: Vec::new(),
        }
    }

    pub fn named(mut self, display_name: impl Into<String>, glyph: impl Into<String>) -> Self {
        self.display_name = display_name.into();
        self.glyph = glyph.into();
        self
    }

    pub fn in_era(mut self, era: Era) -> Self {
        self.era_unlock = era;
        self
    }

    pub fn in_dimension(mut self, dimension: Dimension) -> Self {
        self.dimension = dimension;
        self
    }

    pub fn pivot(mut self) -> Self {
        self.is_pivot = true;
        self
    }

    pub fn ephemeral(mut self) -> Self {
        self.is_ephemeral = true;
        self
    }

    /// Add a two-ingredient recipe.
    pub fn from_pair(mut self, a: impl Into<ItemId>, b: impl Into<ItemId>) -> Self {
        self.recipes.push(vec![a.into(), b.into()]);
        self
    }

    /// Add a recipe of arbitrary arity.
    pub fn from_recipe(mut self, ingredients: impl IntoIterator<Item = impl Into<ItemId>>) -> Self {
        self.recipes
            .push(ingredients.into_iter().map(Into::into).collect());
        self
    }

    /// Whether `ingredient` appears in any of this item's recipes.
    pub fn uses(&self, ingredient: &str) -> bool {
        self.recipes
            .iter()
            .any(|recipe| recipe.iter().any(|i| i == ingredient))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_sets_fields() {
        let item = Item::new("outil_pierre")
            .named("Outil en Pierre", "🪨")
            .in_era(0)
            .pivot()
            .from_pair("terre", "feu");

        assert_eq!(item.id, "outil_pierre");
        assert_eq!(item.display_name, "Outil en Pierre");
        assert!(item.is_pivot);
        assert!(!item.is_ephemeral);
        assert_eq!(item.recipes, vec![vec![ItemId::from("terre"), ItemId::from("feu")]]);
    }

    #[test]
    fn display_name_defaults_to_id() {
        assert_eq!(Item::new("eau").display_name, "eau");
    }

    #[test]
    fn uses_checks_every_recipe() {
        let item = Item::new("x")
            .from_pair("a", "b")
            .from_recipe(["c", "d", "e"]);
        assert!(item.uses("b"));
        assert!(item.uses("e"));
        assert!(!item.uses("x"));
    }

    #[test]
    fn dimension_serde_names() {
        let json = serde_json::to_string(&Dimension::Imaginaire).unwrap();
        assert_eq!(json, "\"imaginaire\"");
        let d: Dimension = serde_json::from_str("\"macro\"").unwrap();
        assert_eq!(d, Dimension::Macro);
        for d in Dimension::ALL {
            assert_eq!(serde_json::to_string(&d).unwrap(), format!("\"{d}\""));
        }
    }
}
