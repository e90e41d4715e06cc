//! Catalog quality checks for content tooling.
//!
//! The engine tolerates imperfect catalogs; this module reports what it
//! tolerated, plus problems that only show up when the catalog is viewed as
//! a whole (items no sequence of fusions can ever produce).

use crate::catalog::{Catalog, CatalogDiagnostic};
use crate::id::{ItemId, ItemKey};

/// Everything found by [`validate_catalog`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    /// Defects recorded while the catalog was indexed.
    pub diagnostics: Vec<CatalogDiagnostic>,

    /// Starting items that are not in the catalog.
    pub unknown_starting_items: Vec<ItemId>,

    /// Items that cannot be produced from the starting items by any
    /// sequence of pair fusions, eras ignored. Catalog order.
    pub unreachable: Vec<ItemId>,

    /// The pivots among `unreachable`. A non-empty list means some era can
    /// never be left.
    pub unreachable_pivots: Vec<ItemId>,
}

impl ValidationReport {
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
            && self.unknown_starting_items.is_empty()
            && self.unreachable.is_empty()
    }

    pub fn duplicate_pairs(&self) -> impl Iterator<Item = &CatalogDiagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| matches!(d, CatalogDiagnostic::DuplicatePair { .. }))
    }

    pub fn dangling_ingredients(&self) -> impl Iterator<Item = &CatalogDiagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| matches!(d, CatalogDiagnostic::DanglingIngredient { .. }))
    }
}

/// Check `catalog` for defects, treating `starting_items` as discovered at
/// the start of a game.
pub fn validate_catalog<S: AsRef<str>>(catalog: &Catalog, starting_items: &[S]) -> ValidationReport {
    let mut unknown_starting_items = Vec::new();
    let mut start = Vec::new();
    for id in starting_items {
        match catalog.key_of(id.as_ref()) {
            Some(key) => start.push(key),
            None => unknown_starting_items.push(ItemId::from(id.as_ref())),
        }
    }

    let reached = reachable_from(catalog, &start);

    let mut unreachable = Vec::new();
    let mut unreachable_pivots = Vec::new();
    for (index, item) in catalog.items().iter().enumerate() {
        if reached[index] {
            continue;
        }
        unreachable.push(item.id.clone());
        if item.is_pivot {
            unreachable_pivots.push(item.id.clone());
        }
    }

    let report = ValidationReport {
        diagnostics: catalog.diagnostics().to_vec(),
        unknown_starting_items,
        unreachable,
        unreachable_pivots,
    };

    tracing::debug!(
        diagnostics = report.diagnostics.len(),
        unreachable = report.unreachable.len(),
        unreachable_pivots = report.unreachable_pivots.len(),
        "catalog validated"
    );

    report
}

/// Fixpoint of the pair index from `start`. Each item is expanded once; an
/// item is produced when one of its pair recipes has both ingredients
/// reached and the pair index still maps that pair to it.
fn reachable_from(catalog: &Catalog, start: &[ItemKey]) -> Vec<bool> {
    let mut reached = vec![false; catalog.len()];
    let mut queue: Vec<ItemKey> = Vec::new();

    for &key in start {
        if !reached[key.index()] {
            reached[key.index()] = true;
            queue.push(key);
        }
    }

    while let Some(ingredient) = queue.pop() {
        for &result in catalog.consumers_of(ingredient) {
            if reached[result.index()] {
                continue;
            }
            let producible = catalog.item(result).recipes.iter().any(|recipe| {
                let [a, b] = recipe.as_slice() else {
                    return false;
                };
                match (catalog.key_of(a.as_str()), catalog.key_of(b.as_str())) {
                    (Some(a), Some(b)) => {
                        reached[a.index()]
                            && reached[b.index()]
                            && catalog.produced_by(a, b) == Some(result)
                    }
                    _ => false,
                }
            });
            if producible {
                reached[result.index()] = true;
                queue.push(result);
            }
        }
    }

    reached
}
