//! The generation pipeline.
//!
//! [`generate()`] is the single entry point the session and the
//! background worker share:
//!
//! 1. Parity analysis of the start cell.
//! 2. Strategy selection for the requested [`Mode`].
//! 3. Construction, with one retry for very short random paths.
//! 4. Validation of the constructor output; a violation truncates the
//!    path at the last good cell.
//! 5. Coverage accounting and a summary log line.

use std::time::Instant;

use cubepath_core::{truncate_at_violation, Cell, Path};
use cubepath_grid::{Grid, GridError};
use cubepath_search::{
    analyze, select, CancelToken, Construction, ConstructionMetrics, Diagnostic, Mode,
    SearchContext, Verdict,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::config::EngineConfig;

/// Cells covered against cells in the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Coverage {
    /// Cells on the path.
    pub covered: usize,
    /// Cells in the grid.
    pub total: usize,
}

impl Coverage {
    /// Covered fraction in `[0, 1]`.
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.covered as f64 / self.total as f64
        }
    }

    /// Whether every cell is covered.
    pub fn is_complete(&self) -> bool {
        self.covered == self.total
    }
}

/// Outcome of one [`generate()`] call.
#[derive(Clone, Debug, PartialEq)]
pub struct Generation {
    /// The resulting simple path, starting at the requested start.
    pub path: Path,
    /// Parity verdict for the start.
    pub verdict: Verdict,
    /// Requested mode.
    pub mode: Mode,
    /// Name of the strategy that ran, `"none"` when search was skipped.
    pub strategy: &'static str,
    /// Coverage of the returned path.
    pub coverage: Coverage,
    /// Advisory outcomes, in the order they arose.
    pub diagnostics: Vec<Diagnostic>,
    /// Search counters, retries included.
    pub metrics: ConstructionMetrics,
}

impl Generation {
    /// Whether the result fell short of the request.
    pub fn has_shortfall(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_shortfall)
    }
}

/// Run the full pipeline for `start` on `grid`.
///
/// Fails only when `start` is not a cell of `grid`. Every other outcome,
/// infeasible starts and partial coverage included, is a [`Generation`]
/// whose diagnostics say what happened.
pub fn generate(
    grid: &Grid,
    start: Cell,
    mode: Mode,
    config: &EngineConfig,
    rng: &mut ChaCha8Rng,
    cancel: &CancelToken,
) -> Result<Generation, GridError> {
    grid.check(&start)?;
    let started = Instant::now();
    let total = grid.cell_count();
    let verdict = analyze(grid, &start);

    if mode == Mode::Complete && !verdict.can_generate {
        tracing::info!(%start, reason = ?verdict.reason, "complete path ruled out by parity");
        let diagnostics = vec![
            Diagnostic::InfeasibleStart {
                start,
                message: verdict.message.clone(),
            },
            Diagnostic::IncompletePath { covered: 1, total },
        ];
        return Ok(Generation {
            path: Path::new(start),
            verdict,
            mode,
            strategy: "none",
            coverage: Coverage { covered: 1, total },
            diagnostics,
            metrics: ConstructionMetrics::default(),
        });
    }

    let strategy = select(mode, &config.search);
    let ctx = SearchContext::new(grid, start, mode, &config.search, cancel);
    tracing::debug!(strategy = strategy.name(), %mode, dims = %grid.dims(), %start, "constructing");
    let mut construction = strategy.construct(&ctx, rng);
    let mut metrics = construction.metrics.clone();

    if mode == Mode::Random && !cancel.is_cancelled() {
        let floor = retry_floor(total, config.random_retry_fraction);
        if construction.covered() < floor {
            let first_len = construction.covered();
            let mut retry_rng = ChaCha8Rng::seed_from_u64(rng.random());
            let second = strategy.construct(&ctx, &mut retry_rng);
            metrics.absorb(&second.metrics);
            construction = keep_longer(construction, second);
            construction.diagnostics.push(Diagnostic::RandomRetried {
                first_len,
                kept_len: construction.covered(),
            });
            tracing::debug!(
                first_len,
                kept_len = construction.covered(),
                floor,
                "short random path retried"
            );
        }
    }

    let Construction {
        mut cells,
        mut diagnostics,
        ..
    } = construction;

    if let Some(violation) = truncate_at_violation(&mut cells, Some(&grid.dims())) {
        tracing::warn!(%violation, kept = cells.len(), "constructor output truncated");
        diagnostics.push(Diagnostic::PathTruncated(violation));
    }
    let path = match cells.first() {
        Some(first) if *first == start => {
            Path::from_cells(cells).unwrap_or_else(|_| Path::new(start))
        }
        _ => Path::new(start),
    };

    let coverage = Coverage {
        covered: path.len(),
        total,
    };
    if mode == Mode::Complete && !coverage.is_complete() {
        tracing::warn!(covered = coverage.covered, total, %start, "complete path fell short");
        diagnostics.push(Diagnostic::IncompletePath {
            covered: coverage.covered,
            total,
        });
    }

    metrics.elapsed_us = started.elapsed().as_micros() as u64;
    tracing::info!(
        strategy = strategy.name(),
        %mode,
        dims = %grid.dims(),
        covered = coverage.covered,
        total,
        elapsed_us = metrics.elapsed_us,
        diagnostics = diagnostics.len(),
        "path generated"
    );

    Ok(Generation {
        path,
        verdict,
        mode,
        strategy: strategy.name(),
        coverage,
        diagnostics,
        metrics,
    })
}

/// Random paths shorter than this are retried once.
fn retry_floor(total: usize, fraction: f64) -> usize {
    ((total as f64 * fraction).ceil() as usize).max(2)
}

fn keep_longer(first: Construction, second: Construction) -> Construction {
    if second.covered() > first.covered() {
        second
    } else {
        first
    }
}
