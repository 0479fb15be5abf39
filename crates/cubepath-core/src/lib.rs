//! Core types for the Cubepath lattice path engine.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the value types every other crate exchanges: lattice [`Cell`]s,
//! grid [`Dims`], the ordered [`Path`] and the validator that enforces
//! its two invariants (adjacency and simplicity).

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod id;
pub mod path;
pub mod validate;

pub use error::{PathViolation, ViolationReason};
pub use id::{Cell, Dims};
pub use path::Path;
pub use validate::{truncate_at_violation, validate, validate_within};
