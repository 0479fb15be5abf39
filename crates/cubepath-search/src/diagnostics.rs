//! Advisory outcomes attached to a construction.
//!
//! None of these are errors. Every construction yields a valid path;
//! diagnostics explain how far short of the request it fell and which
//! recoveries ran along the way.

use cubepath_core::{Cell, PathViolation};
use std::fmt;

/// One advisory outcome of path generation.
#[derive(Clone, Debug, PartialEq)]
pub enum Diagnostic {
    /// The parity check rejects `start` for a complete path.
    InfeasibleStart {
        /// The rejected start.
        start: Cell,
        /// Verdict message.
        message: String,
    },
    /// A complete path was requested but not every cell is covered.
    IncompletePath {
        /// Cells on the path.
        covered: usize,
        /// Cells in the grid.
        total: usize,
    },
    /// Constructor output broke a path invariant and was truncated.
    PathTruncated(PathViolation),
    /// A search hit its deadline; the best partial result was kept.
    TimedOut {
        /// Strategy that timed out.
        strategy: &'static str,
    },
    /// A search observed cancellation.
    Cancelled {
        /// Strategy that was cancelled.
        strategy: &'static str,
    },
    /// A short random path triggered one retry with a fresh seed.
    RandomRetried {
        /// Length of the first attempt.
        first_len: usize,
        /// Length of the path kept.
        kept_len: usize,
    },
    /// One strategy delegated to another.
    FellBack {
        /// Strategy that gave up.
        from: &'static str,
        /// Strategy that took over.
        to: &'static str,
    },
}

impl Diagnostic {
    /// Whether this diagnostic means the request was not fully met.
    pub fn is_shortfall(&self) -> bool {
        matches!(
            self,
            Diagnostic::InfeasibleStart { .. }
                | Diagnostic::IncompletePath { .. }
                | Diagnostic::PathTruncated(_)
        )
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InfeasibleStart { start, message } => {
                write!(f, "infeasible start {start}: {message}")
            }
            Self::IncompletePath { covered, total } => {
                write!(f, "incomplete path: covered {covered}/{total}")
            }
            Self::PathTruncated(v) => write!(f, "path truncated: {v}"),
            Self::TimedOut { strategy } => write!(f, "{strategy} search timed out"),
            Self::Cancelled { strategy } => write!(f, "{strategy} search cancelled"),
            Self::RandomRetried {
                first_len,
                kept_len,
            } => write!(
                f,
                "random path of {first_len} cells retried, kept {kept_len}"
            ),
            Self::FellBack { from, to } => write!(f, "{from} fell back to {to}"),
        }
    }
}
