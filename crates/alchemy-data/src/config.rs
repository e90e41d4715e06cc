//! Game-level configuration: era names and starting items.
//!
//! Read from an optional `game.{ron,toml,json}` next to the item catalog.
//! Every field may be omitted.

use alchemy_core::{Era, ItemId};
use serde::{Deserialize, Serialize};

/// Era names used when a data directory does not provide its own.
pub const DEFAULT_ERAS: [&str; 15] = [
    "Préhistoire",
    "Antiquité",
    "Moyen-Âge",
    "Renaissance",
    "Révolution Industrielle",
    "Âge Atomique",
    "Ère Numérique",
    "Âge Spatial",
    "Ère de l'IA",
    "Bio-Ingénierie",
    "Nano-Ère",
    "Ère Quantique",
    "Ère Galactique",
    "Ère Post-Humaine",
    "La Singularité",
];

/// Items every new player starts with, unless configured otherwise.
pub const DEFAULT_STARTING_ITEMS: [&str; 4] = ["terre", "eau", "feu", "air"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Display names of the eras, indexed by era number.
    pub eras: Vec<String>,

    #[serde(alias = "startingItems")]
    pub starting_items: Vec<ItemId>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            eras: DEFAULT_ERAS.iter().map(|name| name.to_string()).collect(),
            starting_items: DEFAULT_STARTING_ITEMS.iter().map(|id| ItemId::from(*id)).collect(),
        }
    }
}

impl GameConfig {
    pub fn era_count(&self) -> usize {
        self.eras.len()
    }

    /// The last era a player can reach, or `None` when no eras are named.
    pub fn last_era(&self) -> Option<Era> {
        self.eras.len().checked_sub(1).map(|last| last as Era)
    }

    pub fn era_name(&self, era: Era) -> Option<&str> {
        self.eras.get(era as usize).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_have_fifteen_eras() {
        let config = GameConfig::default();
        assert_eq!(config.era_count(), 15);
        assert_eq!(config.last_era(), Some(14));
        assert_eq!(config.era_name(0), Some("Préhistoire"));
        assert_eq!(config.era_name(14), Some("La Singularité"));
        assert_eq!(config.era_name(15), None);
    }

    #[test]
    fn missing_fields_use_defaults() {
        let config: GameConfig = ron::from_str(r#"(eras: ["Aube", "Midi"])"#).unwrap();
        assert_eq!(config.era_count(), 2);
        assert_eq!(config.starting_items, GameConfig::default().starting_items);
    }

    #[test]
    fn camel_case_starting_items() {
        let config: GameConfig =
            serde_json::from_str(r#"{"startingItems": ["terre", "air"]}"#).unwrap();
        assert_eq!(config.starting_items, vec![ItemId::from("terre"), ItemId::from("air")]);
        assert_eq!(config.era_count(), 15);
    }

    #[test]
    fn empty_era_list_has_no_last_era() {
        let config = GameConfig {
            eras: Vec::new(),
            ..GameConfig::default()
        };
        assert_eq!(config.last_era(), None);
    }
}
