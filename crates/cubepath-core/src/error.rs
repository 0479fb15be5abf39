//! Path invariant violations.
//!
//! A [`PathViolation`] is what the validator reports: the index of the
//! first offending cell and why it breaks the path. Violations are
//! recoverable by truncating the path just before `index`.

use crate::id::{Cell, Dims};
use std::error::Error;
use std::fmt;

/// Why a cell sequence is not a valid path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ViolationReason {
    /// The sequence has no cells at all.
    Empty,
    /// The cell is not adjacent to its predecessor.
    Discontinuous {
        /// The predecessor.
        prev: Cell,
        /// The offending cell.
        cell: Cell,
        /// Manhattan distance between the two (anything but 1).
        distance: u32,
    },
    /// The cell already appears earlier in the sequence.
    DuplicateCell {
        /// The repeated cell.
        cell: Cell,
        /// Index of its first occurrence.
        first_index: usize,
    },
    /// The cell lies outside the grid dimensions.
    OutOfBounds {
        /// The offending cell.
        cell: Cell,
        /// The dimensions it was checked against.
        dims: Dims,
    },
}

/// The first position at which a cell sequence breaks a path invariant.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PathViolation {
    /// Index of the offending cell. Everything before it is a valid path.
    pub index: usize,
    /// What went wrong.
    pub reason: ViolationReason,
}

impl fmt::Display for PathViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.reason {
            ViolationReason::Empty => write!(f, "path is empty"),
            ViolationReason::Discontinuous {
                prev,
                cell,
                distance,
            } => write!(
                f,
                "discontinuous at index {}: {prev} -> {cell} has distance {distance}",
                self.index
            ),
            ViolationReason::DuplicateCell { cell, first_index } => write!(
                f,
                "duplicate cell {cell} at index {} (first seen at {first_index})",
                self.index
            ),
            ViolationReason::OutOfBounds { cell, dims } => write!(
                f,
                "cell {cell} at index {} is outside {dims}",
                self.index
            ),
        }
    }
}

impl Error for PathViolation {}
