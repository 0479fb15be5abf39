//! Grid invariant test helpers.
//!
//! These functions verify that a [`Grid`] satisfies the invariants the
//! search crates rely on. Reused across the grid test modules.

use crate::grid::Grid;
use indexmap::IndexSet;

/// Assert exactly one cell per index triple, `width * height * depth` in total.
pub fn assert_cells_complete(grid: &Grid) {
    let cells: Vec<_> = grid.cells().collect();
    assert_eq!(
        cells.len(),
        grid.dims().cell_count(),
        "cells() length ({}) != width*height*depth ({})",
        cells.len(),
        grid.dims().cell_count()
    );
    let unique: IndexSet<_> = cells.iter().collect();
    assert_eq!(unique.len(), cells.len(), "cells() has duplicates");
}

/// Assert that `rank` and `cell` are inverse over the whole grid.
pub fn assert_rank_roundtrip(grid: &Grid) {
    for (i, cell) in grid.cells().enumerate() {
        assert_eq!(grid.rank(&cell), Some(i), "rank({cell}) should be {i}");
        assert_eq!(grid.cell(i), Some(cell));
    }
    assert_eq!(grid.cell(grid.cell_count()), None);
}

/// Assert that `b in neighbours(a)` implies `a in neighbours(b)`.
pub fn assert_neighbours_symmetric(grid: &Grid) {
    for cell in grid.cells() {
        for nb in grid.neighbours(&cell) {
            assert!(
                grid.neighbours(&nb).contains(&cell),
                "neighbour symmetry violated: {nb} in N({cell}) but {cell} not in N({nb})"
            );
        }
    }
}

/// Assert neighbours are exactly the in-bounds cells at Manhattan distance 1.
pub fn assert_neighbours_exact(grid: &Grid) {
    let all: Vec<_> = grid.cells().collect();
    for cell in &all {
        let expected: IndexSet<_> = all.iter().filter(|o| cell.is_adjacent(o)).collect();
        let actual = grid.neighbours(cell);
        assert_eq!(
            actual.len(),
            expected.len(),
            "neighbour count mismatch at {cell}"
        );
        for n in &actual {
            assert!(expected.contains(n), "unexpected neighbour {n} of {cell}");
        }
    }
}

/// Assert the checkerboard coloring is proper: neighbours differ in parity.
pub fn assert_parity_proper(grid: &Grid) {
    for cell in grid.cells() {
        for nb in grid.neighbours(&cell) {
            assert_ne!(cell.parity(), nb.parity(), "{cell} and {nb} share a color");
        }
    }
}

/// Run all compliance checks on a grid.
pub fn run_full_compliance(grid: &Grid) {
    assert_cells_complete(grid);
    assert_rank_roundtrip(grid);
    assert_neighbours_symmetric(grid);
    assert_neighbours_exact(grid);
    assert_parity_proper(grid);
}
