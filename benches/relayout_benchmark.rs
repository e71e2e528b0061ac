//! Layout performance benchmarks.
//!
//! Measures the final pass over large item counts and a full paginated
//! simulation, the two paths that scale with the number of placed items.
//!
//! Run with: cargo bench

#![allow(missing_docs)] // criterion macros generate undocumented items

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use mosaic::config::GalleryConfig;
use mosaic::layout::ColumnBalancer;
use mosaic::simulate::{simulate, SimulationOptions};

/// Deterministic spread of heights between 120 and 900 pixels.
fn generate_heights(count: usize) -> Vec<u32> {
    (0..count as u32).map(|i| 120 + (i * 7919) % 780).collect()
}

fn bench_relayout(c: &mut Criterion) {
    let mut group = c.benchmark_group("relayout");
    let config = GalleryConfig::default();

    for count in [1_000, 10_000, 100_000] {
        let heights = generate_heights(count);
        group.bench_with_input(BenchmarkId::from_parameter(count), &heights, |b, heights| {
            let mut balancer = ColumnBalancer::new(&config, 2400);
            b.iter(|| balancer.relayout(black_box(heights.iter().copied())));
        });
    }
    group.finish();
}

fn bench_simulation(c: &mut Criterion) {
    let heights = generate_heights(5_000);
    let config = GalleryConfig {
        batch_size: 50,
        ..GalleryConfig::default()
    };

    c.bench_function("simulate_5000_items", |b| {
        b.iter(|| {
            simulate(
                config.clone(),
                black_box(1800),
                black_box(&heights),
                SimulationOptions::default(),
            )
        })
    });
}

criterion_group!(benches, bench_relayout, bench_simulation);
criterion_main!(benches);
