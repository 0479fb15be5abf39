//! Error types for grid construction and lookups.

use cubepath_core::{Cell, Dims};
use std::fmt;

/// Errors arising from grid construction or cell lookups.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GridError {
    /// A dimension is outside the supported range.
    InvalidDimension {
        /// Axis name: `"width"`, `"height"` or `"depth"`.
        axis: &'static str,
        /// The rejected value.
        value: u32,
        /// Smallest accepted value.
        min: u32,
        /// Largest accepted value.
        max: u32,
    },
    /// A cell lies outside the grid.
    CellOutOfBounds {
        /// The offending cell.
        cell: Cell,
        /// The grid dimensions.
        dims: Dims,
    },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDimension {
                axis,
                value,
                min,
                max,
            } => write!(f, "{axis} {value} outside supported range [{min}, {max}]"),
            Self::CellOutOfBounds { cell, dims } => {
                write!(f, "cell {cell} out of bounds for {dims} grid")
            }
        }
    }
}

impl std::error::Error for GridError {}
