//! Test utilities for Cubepath development.
//!
//! Grid fixtures, start-cell enumerations and path assertions shared by
//! the search, playback and engine test suites.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

pub use fixtures::*;

use cubepath_core::Cell;
use cubepath_grid::Grid;
use std::collections::HashSet;

/// Assert `cells` is a non-empty simple path inside `grid` starting at `start`.
///
/// Panics with the first offending index on failure.
pub fn assert_simple_path(grid: &Grid, start: Cell, cells: &[Cell]) {
    assert!(!cells.is_empty(), "path is empty");
    assert_eq!(cells[0], start, "path does not begin at the start cell");
    let mut seen = HashSet::with_capacity(cells.len());
    for (i, cell) in cells.iter().enumerate() {
        assert!(grid.contains(cell), "cell {cell} at index {i} out of bounds");
        assert!(seen.insert(*cell), "cell {cell} repeated at index {i}");
        if i > 0 {
            assert!(
                cells[i - 1].is_adjacent(cell),
                "{} -> {cell} at index {i} is not a unit step",
                cells[i - 1]
            );
        }
    }
}

/// Assert `cells` is a Hamiltonian path of `grid` from `start`.
pub fn assert_full_cover(grid: &Grid, start: Cell, cells: &[Cell]) {
    assert_simple_path(grid, start, cells);
    assert_eq!(
        cells.len(),
        grid.cell_count(),
        "covered {}/{} cells",
        cells.len(),
        grid.cell_count()
    );
}
