//! Criterion micro-benchmarks for grid construction and queries.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use cubepath_bench::reference_grid;
use cubepath_core::Dims;
use cubepath_grid::Grid;
use cubepath_search::analyze;

/// Benchmark: build the 8×8×8 grid, neighbour table included.
fn bench_build_reference(c: &mut Criterion) {
    c.bench_function("grid_build_8x8x8", |b| {
        b.iter(|| {
            let grid = Grid::new(black_box(Dims::cube(8))).unwrap();
            black_box(grid);
        });
    });
}

/// Benchmark: neighbour lookup for all 512 cells.
fn bench_neighbours_all(c: &mut Criterion) {
    let grid = reference_grid().unwrap();

    c.bench_function("neighbours_8x8x8", |b| {
        b.iter(|| {
            for cell in grid.cells() {
                let n = grid.neighbours(&cell);
                black_box(&n);
            }
        });
    });
}

/// Benchmark: rank-level neighbour lookup, the form the searches use.
fn bench_neighbour_ranks_all(c: &mut Criterion) {
    let grid = reference_grid().unwrap();

    c.bench_function("neighbour_ranks_8x8x8", |b| {
        b.iter(|| {
            let mut total = 0usize;
            for rank in 0..grid.cell_count() {
                total += grid.neighbour_ranks(rank).len();
            }
            black_box(total);
        });
    });
}

/// Benchmark: parity verdict for every start.
fn bench_analyze_all(c: &mut Criterion) {
    let grid = reference_grid().unwrap();

    c.bench_function("analyze_all_starts_8x8x8", |b| {
        b.iter(|| {
            for cell in grid.cells() {
                black_box(analyze(&grid, &cell));
            }
        });
    });
}

criterion_group!(
    benches,
    bench_build_reference,
    bench_neighbours_all,
    bench_neighbour_ranks_all,
    bench_analyze_all
);
criterion_main!(benches);
