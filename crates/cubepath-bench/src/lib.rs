//! Benchmark profiles for the Cubepath lattice path engine.
//!
//! - [`reference_grid`]: 8×8×8 (512 cells), the largest supported cube
//! - [`small_grid`]: 4×4×4, the largest cube the backtracking search
//!   attempts by default
//! - [`sample_starts`]: deterministic majority-color starts via seed

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use cubepath_core::Cell;
use cubepath_grid::{Grid, GridError};
use cubepath_search::{analyze, SearchOptions};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// The 8×8×8 reference grid.
pub fn reference_grid() -> Result<Grid, GridError> {
    Grid::build(8, 8, 8)
}

/// The 4×4×4 grid.
pub fn small_grid() -> Result<Grid, GridError> {
    Grid::build(4, 4, 4)
}

/// Default search options with a 250 ms backtracking budget.
pub fn bench_options() -> SearchOptions {
    SearchOptions::default().with_backtrack_timeout(std::time::Duration::from_millis(250))
}

/// `count` distinct starts on which a complete path is not ruled out,
/// chosen deterministically from `seed`.
pub fn sample_starts(grid: &Grid, count: usize, seed: u64) -> Vec<Cell> {
    let mut starts: Vec<Cell> = grid
        .cells()
        .filter(|c| analyze(grid, c).can_generate)
        .collect();
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    starts.shuffle(&mut rng);
    starts.truncate(count);
    starts
}
