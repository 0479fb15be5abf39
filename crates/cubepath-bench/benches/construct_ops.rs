//! Criterion benchmarks for the path constructors and the full pipeline.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use cubepath_bench::{bench_options, reference_grid, sample_starts, small_grid};
use cubepath_engine::{generate, EngineConfig};
use cubepath_search::{Backtracking, CancelToken, Greedy, Mode, SearchContext, Snake, Strategy};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn bench_strategy(
    c: &mut Criterion,
    label: &str,
    strategy: &dyn Strategy,
    grid: &cubepath_grid::Grid,
    mode: Mode,
) {
    let options = bench_options();
    let cancel = CancelToken::new();
    let starts = sample_starts(grid, 8, 42);

    c.bench_function(label, |b| {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        b.iter(|| {
            for &start in &starts {
                let ctx = SearchContext::new(grid, start, mode, &options, &cancel);
                black_box(strategy.construct(&ctx, &mut rng));
            }
        });
    });
}

/// Benchmark: snake sweep on 8×8×8 from 8 starts.
fn bench_snake_reference(c: &mut Criterion) {
    let grid = reference_grid().unwrap();
    bench_strategy(c, "snake_8x8x8", &Snake, &grid, Mode::Complete);
}

/// Benchmark: greedy random walks on 8×8×8 from 8 starts.
fn bench_greedy_random_reference(c: &mut Criterion) {
    let grid = reference_grid().unwrap();
    bench_strategy(c, "greedy_random_8x8x8", &Greedy, &grid, Mode::Random);
}

/// Benchmark: greedy complete-mode with repair on 8×8×8.
fn bench_greedy_complete_reference(c: &mut Criterion) {
    let grid = reference_grid().unwrap();
    bench_strategy(c, "greedy_complete_8x8x8", &Greedy, &grid, Mode::Complete);
}

/// Benchmark: pruned backtracking on 4×4×4.
fn bench_backtracking_small(c: &mut Criterion) {
    let grid = small_grid().unwrap();
    bench_strategy(c, "backtracking_4x4x4", &Backtracking, &grid, Mode::Complete);
}

/// Benchmark: the whole pipeline, analysis and validation included.
fn bench_pipeline_reference(c: &mut Criterion) {
    let grid = reference_grid().unwrap();
    let config = EngineConfig {
        search: bench_options(),
        ..Default::default()
    };
    let cancel = CancelToken::new();
    let starts = sample_starts(&grid, 8, 42);

    c.bench_function("pipeline_complete_8x8x8", |b| {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        b.iter(|| {
            for &start in &starts {
                let out = generate(&grid, start, Mode::Complete, &config, &mut rng, &cancel);
                black_box(out.map(|g| g.coverage));
            }
        });
    });
}

criterion_group!(
    benches,
    bench_snake_reference,
    bench_greedy_random_reference,
    bench_greedy_complete_reference,
    bench_backtracking_small,
    bench_pipeline_reference
);
criterion_main!(benches);
