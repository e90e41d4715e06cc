//! Criterion benchmarks for the resolution engine.
//!
//! Two benchmark groups on a generated 5000-item, 15-era catalog:
//! - `catalog_build`: indexing the catalog from scratch
//! - `queries`: fuse / classify / can_advance_era against a mid-game progress

use std::hint::black_box;

use alchemy_core::test_utils::*;
use alchemy_core::*;
use criterion::{Criterion, criterion_group, criterion_main};

const ITEM_COUNT: usize = 5000;
const ERAS: Era = 15;
const SEED: u64 = 0xA1C4_E3F5;

// ===========================================================================
// Fixtures
// ===========================================================================

/// Era 7, every item up to that era discovered.
fn mid_game_progress(catalog: &Catalog) -> UserProgress {
    let mut progress = UserProgress::new(STARTING_ITEMS).at_era(7);
    for item in catalog.items().iter().filter(|i| i.era_unlock <= 7) {
        progress.discover(item.id.clone());
    }
    progress
}

// ===========================================================================
// Benchmarks
// ===========================================================================

fn bench_catalog_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("catalog_build");
    group.sample_size(20);

    let items = generated_items(ITEM_COUNT, ERAS, SEED);

    group.bench_function("5000_items_15_eras", |b| {
        b.iter_batched(
            || items.clone(),
            |items| Catalog::from_items(items).unwrap(),
            criterion::BatchSize::LargeInput,
        );
    });

    group.finish();
}

fn bench_queries(c: &mut Criterion) {
    let mut group = c.benchmark_group("queries");

    let engine = Engine::from_items(generated_items(ITEM_COUNT, ERAS, SEED)).unwrap();
    let catalog = engine.catalog();
    let progress = mid_game_progress(catalog);

    let pairs: Vec<(String, String)> = catalog
        .pair_recipes()
        .take(1000)
        .map(|(a, b, _)| {
            (
                catalog.item(a).id.to_string(),
                catalog.item(b).id.to_string(),
            )
        })
        .collect();

    group.bench_function("fuse_1000_pairs", |b| {
        b.iter(|| {
            for (x, y) in &pairs {
                black_box(engine.fuse(x, y, &progress));
            }
        });
    });

    group.bench_function("classify_all_5000", |b| {
        b.iter(|| {
            for item in catalog.items() {
                black_box(engine.classify(item.id.as_str(), &progress).unwrap());
            }
        });
    });

    group.bench_function("can_advance_era", |b| {
        b.iter(|| black_box(engine.can_advance_era(&progress)));
    });

    group.bench_function("deck_all", |b| {
        b.iter(|| black_box(engine.deck(&progress, DeckFilter::All).len()));
    });

    group.finish();
}

criterion_group!(benches, bench_catalog_build, bench_queries);
criterion_main!(benches);
