//! The ordered, simple, adjacency-continuous [`Path`].

use crate::error::{PathViolation, ViolationReason};
use crate::id::Cell;
use crate::validate::validate;
use std::ops::Index;

/// A non-empty sequence of pairwise-adjacent, non-repeating cells.
///
/// The first cell is the designated start; the last is the head.
/// Every constructor checks both invariants, so a `Path` value is always
/// valid. Paths are grown one cell at a time in manual mode or replaced
/// wholesale by a search strategy.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Path {
    cells: Vec<Cell>,
}

impl Path {
    /// A path consisting of `start` alone.
    pub fn new(start: Cell) -> Self {
        Self { cells: vec![start] }
    }

    /// Build a path from a cell sequence, rejecting any invariant violation.
    pub fn from_cells(cells: Vec<Cell>) -> Result<Self, PathViolation> {
        validate(&cells)?;
        Ok(Self { cells })
    }

    /// The start cell.
    pub fn start(&self) -> Cell {
        self.cells[0]
    }

    /// The most recently added cell.
    pub fn head(&self) -> Cell {
        self.cells[self.cells.len() - 1]
    }

    /// Number of cells on the path. Always at least 1.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always `false`: a path holds at least its start.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Number of segments (edges), `len() - 1`.
    pub fn segment_count(&self) -> usize {
        self.cells.len() - 1
    }

    /// The cells in path order.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Consume the path, returning its cells.
    pub fn into_cells(self) -> Vec<Cell> {
        self.cells
    }

    /// Whether `cell` is already on the path.
    pub fn contains(&self, cell: &Cell) -> bool {
        self.cells.contains(cell)
    }

    /// Append `cell` after the head.
    ///
    /// Fails without modifying the path when `cell` is not adjacent to
    /// the head or is already on the path.
    pub fn push(&mut self, cell: Cell) -> Result<(), PathViolation> {
        let index = self.cells.len();
        let prev = self.head();
        let distance = prev.manhattan(&cell);
        if distance != 1 {
            return Err(PathViolation {
                index,
                reason: ViolationReason::Discontinuous {
                    prev,
                    cell,
                    distance,
                },
            });
        }
        if let Some(first_index) = self.cells.iter().position(|c| *c == cell) {
            return Err(PathViolation {
                index,
                reason: ViolationReason::DuplicateCell { cell, first_index },
            });
        }
        self.cells.push(cell);
        Ok(())
    }

    /// Remove and return the head. The start is never removed.
    pub fn pop(&mut self) -> Option<Cell> {
        if self.cells.len() > 1 {
            self.cells.pop()
        } else {
            None
        }
    }

    /// Drop everything but the start.
    pub fn reset(&mut self) {
        self.cells.truncate(1);
    }

    /// Consecutive `(from, to)` cell pairs.
    pub fn segments(&self) -> impl Iterator<Item = (Cell, Cell)> + '_ {
        self.cells.windows(2).map(|w| (w[0], w[1]))
    }
}

impl Index<usize> for Path {
    type Output = Cell;

    fn index(&self, index: usize) -> &Cell {
        &self.cells[index]
    }
}

impl AsRef<[Cell]> for Path {
    fn as_ref(&self) -> &[Cell] {
        &self.cells
    }
}
