//! Bounded 3D lattice grid model.
//!
//! This crate defines [`Grid`], the immutable enumeration of unit cells
//! for a `width × height × depth` box, together with the 6-connected
//! adjacency relation, continuous cell positions, and the structural
//! classification (corner, edge, face, interior) the search heuristics
//! key on.
//!
//! Neighbour lists are memoized per cell in a dense array indexed by
//! the flattened cell rank, so neighbour queries are O(1).

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod class;
pub mod direction;
pub mod error;
pub mod grid;
pub mod position;

#[cfg(test)]
pub(crate) mod compliance;

pub use class::CellClass;
pub use direction::Direction;
pub use error::GridError;
pub use grid::Grid;
pub use position::Position;
