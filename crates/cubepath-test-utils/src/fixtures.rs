//! Reusable grid fixtures.

use cubepath_core::{Cell, Dims};
use cubepath_grid::Grid;

/// Build a grid, panicking on invalid dimensions.
pub fn grid(width: u32, height: u32, depth: u32) -> Grid {
    Grid::build(width, height, depth)
        .unwrap_or_else(|e| panic!("fixture grid {width}x{height}x{depth}: {e}"))
}

/// A cube grid of extent `size`.
pub fn cube(size: u32) -> Grid {
    grid(size, size, size)
}

/// The eight corner cells of `grid`.
pub fn corners(grid: &Grid) -> Vec<Cell> {
    let Dims {
        width,
        height,
        depth,
    } = grid.dims();
    let mut out = Vec::with_capacity(8);
    for z in [0, depth as i32 - 1] {
        for y in [0, height as i32 - 1] {
            for x in [0, width as i32 - 1] {
                out.push(Cell::new(x, y, z));
            }
        }
    }
    out
}

/// Every cell of `grid`, usable as a start.
pub fn all_starts(grid: &Grid) -> Vec<Cell> {
    grid.cells().collect()
}

/// Cells of the majority checkerboard color (both colors when balanced).
pub fn majority_starts(grid: &Grid) -> Vec<Cell> {
    let (even, odd) = grid.parity_counts();
    grid.cells()
        .filter(|c| even == odd || (c.parity() == 0) == (even > odd))
        .collect()
}

/// Every dimension triple with each extent in `lo..=hi`.
pub fn dims_range(lo: u32, hi: u32) -> Vec<Dims> {
    let mut out = Vec::new();
    for w in lo..=hi {
        for h in lo..=hi {
            for d in lo..=hi {
                out.push(Dims::new(w, h, d));
            }
        }
    }
    out
}
