//! Data validation utilities.

use crate::ToolsError;
use alchemy_data::{GameDataReport, load_game_data};
use std::path::Path;

/// One line per problem in `report`, in a stable order.
pub fn describe_problems(report: &GameDataReport) -> Vec<String> {
    let catalog = &report.catalog;
    let mut problems: Vec<String> = catalog.diagnostics.iter().map(ToString::to_string).collect();

    problems.extend(
        catalog
            .unknown_starting_items
            .iter()
            .map(|id| format!("starting item '{id}' is not in the catalog")),
    );
    problems.extend(catalog.unreachable.iter().map(|id| {
        if catalog.unreachable_pivots.contains(id) {
            format!("pivot '{id}' can never be produced; its era can never be left")
        } else {
            format!("'{id}' can never be produced from the starting items")
        }
    }));
    problems.extend(
        report
            .beyond_last_era
            .iter()
            .map(|id| format!("'{id}' unlocks after the last configured era")),
    );

    problems
}

/// Load and check a data directory, logging every problem found.
///
/// # Errors
///
/// Returns an error if the directory does not load, or
/// [`ToolsError::Invalid`] if it loads with problems.
pub fn validate_data_directory(path: &Path) -> Result<GameDataReport, ToolsError> {
    let data = load_game_data(path)?;
    let report = data.validate();

    let problems = describe_problems(&report);
    for problem in &problems {
        tracing::warn!("{problem}");
    }

    if problems.is_empty() {
        tracing::info!(
            items = data.catalog.len(),
            pair_recipes = data.catalog.pair_recipe_count(),
            eras = data.config.era_count(),
            "data directory is clean"
        );
        Ok(report)
    } else {
        Err(ToolsError::Invalid {
            problems: problems.len(),
        })
    }
}
