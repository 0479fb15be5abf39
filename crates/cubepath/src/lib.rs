//! Cubepath: self-avoiding walks and Hamiltonian paths on bounded 3D
//! lattices.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all Cubepath sub-crates. For most users, adding `cubepath` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use cubepath::prelude::*;
//!
//! let mut session = Session::new(EngineConfig {
//!     dims: Dims::new(3, 3, 3),
//!     seed: Some(42),
//!     ..Default::default()
//! })
//! .unwrap();
//!
//! // Corners of an odd cube are on the majority color.
//! let verdict = session.select_start(Cell::new(0, 0, 0)).unwrap();
//! assert!(verdict.can_generate);
//!
//! let generation = session.generate(Mode::Complete).unwrap();
//! assert_eq!(generation.coverage.covered, 27);
//! assert_eq!(session.path().len(), 27);
//!
//! // An edge midpoint is on the minority color: no search is attempted.
//! let verdict = session.select_start(Cell::new(1, 0, 0)).unwrap();
//! assert!(!verdict.can_generate);
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `cubepath-core` | `Cell`, `Dims`, `Path`, path validation |
//! | [`grid`] | `cubepath-grid` | Grid model, adjacency, positions, cell classes |
//! | [`search`] | `cubepath-search` | Parity analysis, constructors, repair |
//! | [`playback`] | `cubepath-playback` | Marker playback and reveal schedule |
//! | [`engine`] | `cubepath-engine` | Configuration, sessions, background worker |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core value types and path validation (`cubepath-core`).
pub use cubepath_core as types;

/// The bounded lattice grid (`cubepath-grid`).
///
/// [`grid::Grid`] enumerates cells and answers neighbour, position and
/// class queries.
pub use cubepath_grid as grid;

/// Feasibility analysis and path construction (`cubepath-search`).
///
/// [`search::analyze`] applies the parity rules; the
/// [`search::Strategy`] implementations build paths.
pub use cubepath_search as search;

/// Path playback (`cubepath-playback`).
pub use cubepath_playback as playback;

/// Orchestration (`cubepath-engine`).
///
/// [`engine::Session`] for interactive use, [`engine::GenerationWorker`]
/// for background generation.
pub use cubepath_engine as engine;

/// Common imports for typical Cubepath usage.
///
/// ```rust
/// use cubepath::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use cubepath_core::{Cell, Dims, Path, PathViolation};

    // Grid
    pub use cubepath_grid::{Direction, Grid, GridError, Position};

    // Search
    pub use cubepath_search::{
        analyze, CancelToken, CompleteStrategy, Diagnostic, Mode, SearchOptions, Verdict,
    };

    // Playback
    pub use cubepath_playback::{PlaybackConfig, PlaybackEvent, PlaybackPhase, Speed};

    // Engine
    pub use cubepath_engine::{
        generate, EngineConfig, EngineError, Generation, GenerationWorker, Session,
    };
}
