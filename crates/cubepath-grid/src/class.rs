//! Structural classification of cells within the box.

use std::fmt;

/// Where a cell sits relative to the faces of the box.
///
/// Counted per axis: an axis is "on the boundary" when the coordinate is
/// `0` or `dim - 1`. Three boundary axes make a corner, two an edge, one
/// a face and none the interior. On an axis of extent 2 every coordinate
/// is on the boundary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CellClass {
    /// On the boundary of all three axes.
    Corner,
    /// On the boundary of exactly two axes.
    Edge,
    /// On the boundary of exactly one axis.
    Face,
    /// Strictly inside on every axis.
    Interior,
}

impl CellClass {
    /// Class from the number of axes on which the cell touches the boundary.
    pub fn from_boundary_axes(count: u8) -> CellClass {
        match count {
            3 => CellClass::Corner,
            2 => CellClass::Edge,
            1 => CellClass::Face,
            _ => CellClass::Interior,
        }
    }
}

impl fmt::Display for CellClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CellClass::Corner => "corner",
            CellClass::Edge => "edge",
            CellClass::Face => "face",
            CellClass::Interior => "interior",
        };
        f.write_str(name)
    }
}
