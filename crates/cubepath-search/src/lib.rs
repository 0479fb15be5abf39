//! Feasibility analysis and path construction for 3D lattice grids.
//!
//! # Pieces
//!
//! - [`feasibility`]: the checkerboard-parity pre-filter that rules out
//!   impossible starts before any search runs.
//! - [`Strategy`] and its three implementations:
//!   - [`Backtracking`]: bounded DFS with class-tuned move orders,
//!     dead-end pruning and a wall-clock deadline.
//!   - [`Greedy`]: randomized walk plus a depth-limited DFS pass.
//!   - [`Snake`]: seeded Hamiltonian sheet order with BFS bridging.
//! - [`repair`]: tail extension, splice and tail rotation, shared by all
//!   three.
//! - [`Deadline`] and [`CancelToken`] for cooperative interruption.
//!
//! Every construction is self-contained: visited sets, path buffers and
//! the random generator are owned by the call. Nothing here holds
//! global state.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod backtrack;
pub mod bfs;
pub mod control;
pub mod diagnostics;
pub mod feasibility;
pub mod greedy;
pub mod metrics;
pub mod options;
pub mod repair;
pub mod snake;
pub mod strategy;
pub mod visited;

pub use backtrack::Backtracking;
pub use control::{CancelToken, Deadline, Interrupt};
pub use diagnostics::Diagnostic;
pub use feasibility::{analyze, analyze_dims, Color, ColorCounts, Verdict, VerdictReason};
pub use greedy::Greedy;
pub use metrics::ConstructionMetrics;
pub use options::{CompleteStrategy, SearchOptions};
pub use snake::Snake;
pub use strategy::{select, Construction, Mode, SearchContext, Strategy};
pub use visited::VisitedSet;
