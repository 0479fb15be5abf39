//! The immutable lattice grid.
//!
//! # Coordinate System
//!
//! Integer triples `(x, y, z)` with `0 <= x < width`, `0 <= y < height`
//! and `0 <= z < depth`. Canonical ordering is z-then-y-then-x; the
//! position of a cell in that ordering is its *rank*, and all per-cell
//! tables are dense arrays indexed by rank.
//!
//! # Positions
//!
//! A cell's continuous position is `index * spacing` shifted so the whole
//! box is centred on the origin.

use crate::class::CellClass;
use crate::direction::Direction;
use crate::error::GridError;
use crate::position::Position;
use cubepath_core::{Cell, Dims};
use smallvec::SmallVec;

/// Neighbour ranks of one cell. Six covers every interior cell.
pub type Neighbours = SmallVec<[usize; 6]>;

/// A `width × height × depth` box of unit cells with 6-connectivity.
///
/// Immutable once built. Changing dimensions means building a new grid;
/// paths built against the old one are not valid for it.
#[derive(Debug, Clone)]
pub struct Grid {
    dims: Dims,
    spacing: f64,
    /// `neighbours[rank]` in [`Direction::ALL`] order, out-of-bounds moves omitted.
    neighbours: Vec<Neighbours>,
}

impl Grid {
    /// Smallest supported extent on any axis.
    pub const MIN_DIM: u32 = 2;
    /// Largest supported extent on any axis.
    pub const MAX_DIM: u32 = 8;
    /// Distance between neighbouring cell centres unless overridden.
    pub const DEFAULT_SPACING: f64 = 1.5;

    /// Build a grid for `dims` with the default spacing.
    ///
    /// Returns `Err(GridError::InvalidDimension)` if any extent lies
    /// outside `[MIN_DIM, MAX_DIM]`.
    pub fn new(dims: Dims) -> Result<Self, GridError> {
        Self::with_spacing(dims, Self::DEFAULT_SPACING)
    }

    /// Shorthand for `Grid::new(Dims::new(width, height, depth))`.
    pub fn build(width: u32, height: u32, depth: u32) -> Result<Self, GridError> {
        Self::new(Dims::new(width, height, depth))
    }

    /// Build a grid with an explicit cell spacing.
    pub fn with_spacing(dims: Dims, spacing: f64) -> Result<Self, GridError> {
        for (axis, value) in [
            ("width", dims.width),
            ("height", dims.height),
            ("depth", dims.depth),
        ] {
            if !(Self::MIN_DIM..=Self::MAX_DIM).contains(&value) {
                return Err(GridError::InvalidDimension {
                    axis,
                    value,
                    min: Self::MIN_DIM,
                    max: Self::MAX_DIM,
                });
            }
        }

        let count = dims.cell_count();
        let mut neighbours = Vec::with_capacity(count);
        for rank in 0..count {
            let mut list = Neighbours::new();
            if let Some(cell) = dims.cell_of(rank) {
                for dir in Direction::ALL {
                    let (dx, dy, dz) = dir.offset();
                    if let Some(n) = dims.rank(&cell.offset(dx, dy, dz)) {
                        list.push(n);
                    }
                }
            }
            neighbours.push(list);
        }

        Ok(Self {
            dims,
            spacing,
            neighbours,
        })
    }

    /// Grid dimensions.
    pub fn dims(&self) -> Dims {
        self.dims
    }

    /// Distance between neighbouring cell centres.
    pub fn spacing(&self) -> f64 {
        self.spacing
    }

    /// Total number of cells.
    pub fn cell_count(&self) -> usize {
        self.neighbours.len()
    }

    /// Largest extent over the three axes.
    pub fn max_dim(&self) -> u32 {
        self.dims.max_dim()
    }

    /// Whether `cell` lies inside the grid.
    pub fn contains(&self, cell: &Cell) -> bool {
        self.dims.contains(cell)
    }

    /// The cell at `(x, y, z)`, or `None` if any coordinate is out of range.
    pub fn cell_at(&self, x: i32, y: i32, z: i32) -> Option<Cell> {
        let cell = Cell::new(x, y, z);
        self.contains(&cell).then_some(cell)
    }

    /// Check that `cell` is inside the grid.
    pub fn check(&self, cell: &Cell) -> Result<(), GridError> {
        if self.contains(cell) {
            Ok(())
        } else {
            Err(GridError::CellOutOfBounds {
                cell: *cell,
                dims: self.dims,
            })
        }
    }

    /// Dense index of `cell`, or `None` if out of bounds.
    pub fn rank(&self, cell: &Cell) -> Option<usize> {
        self.dims.rank(cell)
    }

    /// Cell at dense index `rank`.
    pub fn cell(&self, rank: usize) -> Option<Cell> {
        self.dims.cell_of(rank)
    }

    /// All cells in canonical (z, y, x) order.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.cell_count()).filter_map(move |r| self.dims.cell_of(r))
    }

    /// All cells of Z-layer `z`, in (y, x) order. Empty if `z` is out of range.
    pub fn layer(&self, z: i32) -> Vec<Cell> {
        if z < 0 || z as u32 >= self.dims.depth {
            return Vec::new();
        }
        let mut out = Vec::with_capacity((self.dims.width * self.dims.height) as usize);
        for y in 0..self.dims.height as i32 {
            for x in 0..self.dims.width as i32 {
                out.push(Cell::new(x, y, z));
            }
        }
        out
    }

    /// Neighbour ranks of the cell at `rank`, in [`Direction::ALL`] order.
    ///
    /// Returns an empty slice for an out-of-range rank.
    pub fn neighbour_ranks(&self, rank: usize) -> &[usize] {
        self.neighbours.get(rank).map(|n| n.as_slice()).unwrap_or(&[])
    }

    /// In-bounds 6-connected neighbours of `cell`.
    pub fn neighbours(&self, cell: &Cell) -> SmallVec<[Cell; 6]> {
        match self.rank(cell) {
            Some(rank) => self.neighbours[rank]
                .iter()
                .filter_map(|&n| self.dims.cell_of(n))
                .collect(),
            None => SmallVec::new(),
        }
    }

    /// Number of in-bounds neighbours of `cell`.
    pub fn degree(&self, cell: &Cell) -> usize {
        self.rank(cell)
            .map(|r| self.neighbours[r].len())
            .unwrap_or(0)
    }

    /// The cell one step from `cell` in `dir`, if inside the grid.
    pub fn step(&self, cell: &Cell, dir: Direction) -> Option<Cell> {
        let (dx, dy, dz) = dir.offset();
        let next = cell.offset(dx, dy, dz);
        self.contains(&next).then_some(next)
    }

    /// Rank-level [`step`](Self::step).
    pub fn step_rank(&self, rank: usize, dir: Direction) -> Option<usize> {
        let cell = self.dims.cell_of(rank)?;
        let (dx, dy, dz) = dir.offset();
        self.dims.rank(&cell.offset(dx, dy, dz))
    }

    /// Whether two cells are both inside the grid and adjacent.
    pub fn are_adjacent(&self, a: &Cell, b: &Cell) -> bool {
        self.contains(a) && self.contains(b) && a.is_adjacent(b)
    }

    /// Centred continuous position of `cell`.
    pub fn position(&self, cell: &Cell) -> Position {
        let axis = |index: i32, extent: u32| {
            index as f64 * self.spacing - (extent as f64 - 1.0) / 2.0 * self.spacing
        };
        Position::new(
            axis(cell.x, self.dims.width),
            axis(cell.y, self.dims.height),
            axis(cell.z, self.dims.depth),
        )
    }

    /// Structural class of `cell`, counting boundary contact per axis.
    pub fn class_of(&self, cell: &Cell) -> CellClass {
        let on_boundary = |v: i32, extent: u32| v == 0 || v == extent as i32 - 1;
        let count = on_boundary(cell.x, self.dims.width) as u8
            + on_boundary(cell.y, self.dims.height) as u8
            + on_boundary(cell.z, self.dims.depth) as u8;
        CellClass::from_boundary_axes(count)
    }

    /// Whether `cell` is one of the eight box corners.
    pub fn is_corner(&self, cell: &Cell) -> bool {
        self.contains(cell) && self.class_of(cell) == CellClass::Corner
    }

    /// Cells with even and odd checkerboard parity: `(even, odd)`.
    pub fn parity_counts(&self) -> (usize, usize) {
        let even = self.cells().filter(|c| c.parity() == 0).count();
        (even, self.cell_count() - even)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compliance;
    use proptest::prelude::*;

    fn c(x: i32, y: i32, z: i32) -> Cell {
        Cell::new(x, y, z)
    }

    // ── Constructor tests ─────────────────────────────────────────

    #[test]
    fn build_rejects_out_of_range() {
        assert!(matches!(
            Grid::build(1, 3, 3),
            Err(GridError::InvalidDimension {
                axis: "width",
                value: 1,
                ..
            })
        ));
        assert!(matches!(
            Grid::build(3, 9, 3),
            Err(GridError::InvalidDimension { axis: "height", .. })
        ));
        assert!(matches!(
            Grid::build(3, 3, 0),
            Err(GridError::InvalidDimension { axis: "depth", .. })
        ));
    }

    #[test]
    fn build_accepts_bounds() {
        assert_eq!(Grid::build(2, 2, 2).unwrap().cell_count(), 8);
        assert_eq!(Grid::build(8, 8, 8).unwrap().cell_count(), 512);
        assert_eq!(Grid::build(2, 3, 4).unwrap().cell_count(), 24);
    }

    // ── Lookup tests ──────────────────────────────────────────────

    #[test]
    fn cell_at_out_of_range_is_none() {
        let g = Grid::build(3, 4, 5).unwrap();
        assert_eq!(g.cell_at(2, 3, 4), Some(c(2, 3, 4)));
        assert_eq!(g.cell_at(3, 0, 0), None);
        assert_eq!(g.cell_at(0, 4, 0), None);
        assert_eq!(g.cell_at(0, 0, 5), None);
        assert_eq!(g.cell_at(-1, 0, 0), None);
    }

    #[test]
    fn check_reports_out_of_bounds() {
        let g = Grid::build(2, 2, 2).unwrap();
        assert!(g.check(&c(1, 1, 1)).is_ok());
        assert!(matches!(
            g.check(&c(2, 0, 0)),
            Err(GridError::CellOutOfBounds { .. })
        ));
    }

    #[test]
    fn layer_lists_one_slice() {
        let g = Grid::build(3, 2, 4).unwrap();
        let layer = g.layer(2);
        assert_eq!(layer.len(), 6);
        assert!(layer.iter().all(|cell| cell.z == 2));
        assert!(g.layer(4).is_empty());
    }

    // ── Neighbour tests ───────────────────────────────────────────

    #[test]
    fn neighbours_by_class() {
        let g = Grid::build(4, 4, 4).unwrap();
        assert_eq!(g.degree(&c(0, 0, 0)), 3);
        assert_eq!(g.degree(&c(1, 0, 0)), 4);
        assert_eq!(g.degree(&c(1, 1, 0)), 5);
        assert_eq!(g.degree(&c(1, 1, 1)), 6);
        assert_eq!(g.degree(&c(9, 9, 9)), 0);
    }

    #[test]
    fn neighbours_follow_direction_order() {
        let g = Grid::build(3, 3, 3).unwrap();
        let n = g.neighbours(&c(1, 1, 1));
        assert_eq!(
            n.as_slice(),
            &[
                c(2, 1, 1),
                c(0, 1, 1),
                c(1, 2, 1),
                c(1, 0, 1),
                c(1, 1, 2),
                c(1, 1, 0)
            ]
        );
    }

    #[test]
    fn step_respects_bounds() {
        let g = Grid::build(2, 3, 2).unwrap();
        assert_eq!(g.step(&c(0, 0, 0), Direction::XPos), Some(c(1, 0, 0)));
        assert_eq!(g.step(&c(0, 0, 0), Direction::XNeg), None);
        assert_eq!(g.step(&c(0, 2, 0), Direction::YPos), None);
        let r = g.rank(&c(0, 1, 0)).unwrap();
        assert_eq!(
            g.step_rank(r, Direction::ZPos),
            g.rank(&c(0, 1, 1))
        );
    }

    // ── Geometry tests ────────────────────────────────────────────

    #[test]
    fn positions_are_centred() {
        let g = Grid::build(3, 3, 3).unwrap();
        assert_eq!(g.position(&c(1, 1, 1)), Position::new(0.0, 0.0, 0.0));
        assert_eq!(g.position(&c(0, 0, 0)), Position::new(-1.5, -1.5, -1.5));
        assert_eq!(g.position(&c(2, 0, 1)), Position::new(1.5, -1.5, 0.0));

        let even = Grid::build(2, 4, 2).unwrap();
        assert_eq!(even.position(&c(0, 0, 0)), Position::new(-0.75, -2.25, -0.75));
    }

    #[test]
    fn neighbour_positions_one_spacing_apart() {
        let g = Grid::with_spacing(Dims::cube(3), 2.0).unwrap();
        let a = g.position(&c(0, 1, 2));
        for n in g.neighbours(&c(0, 1, 2)) {
            assert!((a.distance(&g.position(&n)) - 2.0).abs() < 1e-12);
        }
    }

    #[test]
    fn class_is_per_axis() {
        let g = Grid::build(4, 3, 5).unwrap();
        assert_eq!(g.class_of(&c(0, 0, 0)), CellClass::Corner);
        assert_eq!(g.class_of(&c(3, 2, 4)), CellClass::Corner);
        assert_eq!(g.class_of(&c(1, 0, 0)), CellClass::Edge);
        assert_eq!(g.class_of(&c(1, 1, 0)), CellClass::Face);
        assert_eq!(g.class_of(&c(1, 1, 1)), CellClass::Interior);
        // y extent 3: y = 2 is a boundary, not interior.
        assert_eq!(g.class_of(&c(1, 2, 2)), CellClass::Face);
    }

    #[test]
    fn every_cell_of_2x2x2_is_corner() {
        let g = Grid::build(2, 2, 2).unwrap();
        assert!(g.cells().all(|cell| g.is_corner(&cell)));
    }

    #[test]
    fn parity_counts_odd_total() {
        let g = Grid::build(3, 3, 3).unwrap();
        assert_eq!(g.parity_counts(), (14, 13));
        let g = Grid::build(2, 2, 3).unwrap();
        assert_eq!(g.parity_counts(), (6, 6));
    }

    // ── Compliance suites ─────────────────────────────────────────

    #[test]
    fn compliance_2x2x2() {
        compliance::run_full_compliance(&Grid::build(2, 2, 2).unwrap());
    }

    #[test]
    fn compliance_3x4x5() {
        compliance::run_full_compliance(&Grid::build(3, 4, 5).unwrap());
    }

    #[test]
    fn compliance_8x8x8() {
        compliance::run_full_compliance(&Grid::build(8, 8, 8).unwrap());
    }

    // ── Property tests ────────────────────────────────────────────

    proptest! {
        #[test]
        fn grid_compliance(w in 2u32..7, h in 2u32..7, d in 2u32..7) {
            let g = Grid::build(w, h, d).unwrap();
            prop_assert_eq!(g.cell_count(), (w * h * d) as usize);
            compliance::run_full_compliance(&g);
        }

        #[test]
        fn neighbours_are_adjacent_and_in_bounds(
            w in 2u32..7, h in 2u32..7, d in 2u32..7,
            x in 0i32..7, y in 0i32..7, z in 0i32..7,
        ) {
            let g = Grid::build(w, h, d).unwrap();
            let cell = c(x % w as i32, y % h as i32, z % d as i32);
            for n in g.neighbours(&cell) {
                prop_assert!(g.contains(&n));
                prop_assert!(cell.is_adjacent(&n));
            }
        }
    }
}
