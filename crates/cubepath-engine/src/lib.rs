//! Session orchestration and background path generation.
//!
//! Ties the grid, search and playback crates together:
//!
//! - [`EngineConfig`]: validated configuration for everything below.
//! - [`generate()`]: the analyze → construct → validate pipeline,
//!   returning a [`Generation`] with coverage and diagnostics.
//! - [`Session`]: one grid, one start, one path; manual drawing,
//!   synchronous generation, reveal and playback.
//! - [`GenerationWorker`]: the same pipeline on a background thread with
//!   cancel-on-resubmit semantics.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod pipeline;
pub mod session;
pub mod worker;

pub use config::{ConfigError, EngineConfig};
pub use error::EngineError;
pub use pipeline::{generate, Coverage, Generation};
pub use session::{PathOrigin, Session};
pub use worker::{GenerationResult, GenerationWorker, Ticket};
