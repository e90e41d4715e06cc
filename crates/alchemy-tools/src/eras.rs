//! Per-era catalog summaries.

use alchemy_core::Era;
use alchemy_data::GameData;

/// Item counts for one era.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EraSummary {
    pub era: Era,
    /// `None` for eras past the configured list.
    pub name: Option<String>,
    pub items: usize,
    pub pivots: Vec<String>,
}

/// Summaries for every configured era, plus any later era items unlock in.
pub fn era_summaries(data: &GameData) -> Vec<EraSummary> {
    let configured = data.config.era_count() as Era;
    let last = data
        .catalog
        .max_era()
        .map_or(configured, |max| configured.max(max + 1));

    (0..last)
        .map(|era| EraSummary {
            era,
            name: data.era_name(era).map(str::to_string),
            items: data.catalog.items_in_era(era).count(),
            pivots: data
                .catalog
                .pivots_in_era(era)
                .iter()
                .map(|&key| data.catalog.item(key).display_name.clone())
                .collect(),
        })
        .collect()
}
