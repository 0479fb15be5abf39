//! The [`Strategy`] trait and the shared construction contract.
//!
//! Every constructor takes a grid, a start cell and a [`Mode`] and
//! returns a [`Construction`]: a valid simple path from the start plus
//! the metrics and diagnostics gathered on the way. Constructors never
//! fail. The worst outcome is the single-cell path `[start]`.

use crate::control::CancelToken;
use crate::diagnostics::Diagnostic;
use crate::metrics::ConstructionMetrics;
use crate::options::{CompleteStrategy, SearchOptions};
use crate::{backtrack::Backtracking, greedy::Greedy, snake::Snake};
use cubepath_core::{validate_within, Cell};
use cubepath_grid::Grid;
use rand_chacha::ChaCha8Rng;
use std::fmt;
use std::time::Instant;

/// What a caller is asking a constructor for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Any simple path. Never claims to cover the grid.
    Random,
    /// Attempt a Hamiltonian path; coverage is reported, not assumed.
    Complete,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Random => f.write_str("random"),
            Mode::Complete => f.write_str("complete"),
        }
    }
}

/// Inputs shared by every constructor call.
#[derive(Clone, Copy, Debug)]
pub struct SearchContext<'a> {
    /// The grid to walk.
    pub grid: &'a Grid,
    /// First cell of the path.
    pub start: Cell,
    /// Requested mode.
    pub mode: Mode,
    /// Limits and heuristics.
    pub options: &'a SearchOptions,
    /// Cooperative cancellation, polled by long-running searches.
    pub cancel: &'a CancelToken,
}

impl<'a> SearchContext<'a> {
    /// Context for `start` on `grid`.
    pub fn new(
        grid: &'a Grid,
        start: Cell,
        mode: Mode,
        options: &'a SearchOptions,
        cancel: &'a CancelToken,
    ) -> Self {
        Self {
            grid,
            start,
            mode,
            options,
            cancel,
        }
    }

    /// The same context with a different mode.
    pub fn with_mode(self, mode: Mode) -> Self {
        Self { mode, ..self }
    }
}

/// Result of one constructor call.
#[derive(Clone, Debug, PartialEq)]
pub struct Construction {
    /// A valid simple path beginning at the start cell.
    pub cells: Vec<Cell>,
    /// Counters for this call, nested calls included.
    pub metrics: ConstructionMetrics,
    /// Advisory outcomes.
    pub diagnostics: Vec<Diagnostic>,
}

impl Construction {
    /// The degenerate single-cell path.
    pub fn degenerate(start: Cell) -> Self {
        Self {
            cells: vec![start],
            metrics: ConstructionMetrics::default(),
            diagnostics: Vec::new(),
        }
    }

    /// Number of cells on the path.
    pub fn covered(&self) -> usize {
        self.cells.len()
    }

    /// Whether the path covers every cell of `grid`.
    pub fn is_complete(&self, grid: &Grid) -> bool {
        self.cells.len() == grid.cell_count()
    }
}

/// A path construction algorithm.
///
/// # Contract
///
/// - The returned path starts at `ctx.start` and satisfies both path
///   invariants (adjacency and simplicity) within the grid bounds.
/// - All randomness comes from `rng`; the same seed and inputs give the
///   same path, deadlines aside.
/// - Implementations poll `ctx.cancel` and return their best partial
///   result promptly once it fires.
///
/// This trait is object-safe; [`select`] hands out boxed strategies.
pub trait Strategy: Send + Sync {
    /// Short name used in logs and diagnostics.
    fn name(&self) -> &'static str;

    /// Build a path.
    fn construct(&self, ctx: &SearchContext<'_>, rng: &mut ChaCha8Rng) -> Construction;
}

/// The constructor that serves `mode` under `options`.
///
/// Random requests always go to [`Greedy`]. Complete requests follow
/// [`SearchOptions::complete_strategy`].
pub fn select(mode: Mode, options: &SearchOptions) -> Box<dyn Strategy> {
    match (mode, options.complete_strategy) {
        (Mode::Random, _) => Box::new(Greedy),
        (Mode::Complete, CompleteStrategy::Snake) => Box::new(Snake),
        (Mode::Complete, CompleteStrategy::Backtracking) => Box::new(Backtracking),
        (Mode::Complete, CompleteStrategy::Greedy) => Box::new(Greedy),
    }
}

/// Convert a rank path into a checked [`Construction`].
///
/// A sequence that does not start at `ctx.start` or breaks a path
/// invariant is replaced by `[start]`.
pub(crate) fn finish(
    ctx: &SearchContext<'_>,
    strategy: &'static str,
    ranks: &[usize],
    mut metrics: ConstructionMetrics,
    diagnostics: Vec<Diagnostic>,
    started: Instant,
) -> Construction {
    metrics.elapsed_us = started.elapsed().as_micros() as u64;
    let cells: Vec<Cell> = ranks.iter().filter_map(|&r| ctx.grid.cell(r)).collect();

    let checked = if cells.len() != ranks.len() || cells.first() != Some(&ctx.start) {
        tracing::warn!(strategy, "constructor output does not begin at the start cell");
        None
    } else if let Err(violation) = validate_within(&cells, &ctx.grid.dims()) {
        tracing::warn!(strategy, %violation, "constructor output rejected");
        None
    } else {
        Some(cells)
    };

    Construction {
        cells: checked.unwrap_or_else(|| vec![ctx.start]),
        metrics,
        diagnostics,
    }
}
