//! Randomized greedy walk with a depth-limited DFS second pass.
//!
//! The walk shuffles the head's unvisited neighbours and steps to the
//! first, for at most `greedy_step_factor × cells` steps. In random mode
//! it stops when stuck. In complete mode a stuck walk wanders onto a
//! random visited neighbour and keeps going; the walk is then reduced to
//! a simple path by [`simplify_walk`].
//!
//! If the result covers less than `repair_threshold` of the grid, a
//! randomized DFS capped at `min(dfs_depth_cap, cells)` cells runs from
//! the start and the longer of the two paths wins. Complete mode finally
//! hands the path to the repairer.

use crate::backtrack::{search, DfsLimits, MoveOrder};
use crate::control::{Deadline, Interrupt};
use crate::diagnostics::Diagnostic;
use crate::metrics::ConstructionMetrics;
use crate::repair::{repair, simplify_walk};
use crate::strategy::{finish, Construction, Mode, SearchContext, Strategy};
use crate::visited::VisitedSet;
use crate::CancelToken;
use cubepath_grid::Grid;
use rand::seq::SliceRandom;
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use smallvec::SmallVec;
use std::time::Instant;

/// Greedy constructor, used for random mode and as the large-grid
/// fallback of complete mode.
#[derive(Clone, Copy, Debug, Default)]
pub struct Greedy;

impl Greedy {
    const NAME: &'static str = "greedy";
}

/// Random walk from `start`. Self-avoiding until stuck; in complete mode
/// it then revisits cells.
fn walk(
    grid: &Grid,
    start: usize,
    budget: usize,
    mode: Mode,
    cancel: &CancelToken,
    rng: &mut ChaCha8Rng,
    metrics: &mut ConstructionMetrics,
) -> (Vec<usize>, bool) {
    let mut visited = VisitedSet::new(grid.cell_count());
    visited.insert(start);
    let mut head = start;
    let mut steps = vec![start];

    for _ in 0..budget {
        if cancel.is_cancelled() {
            return (steps, true);
        }
        if visited.is_full() {
            break;
        }
        let mut open: SmallVec<[usize; 6]> = grid
            .neighbour_ranks(head)
            .iter()
            .copied()
            .filter(|&r| !visited.contains(r))
            .collect();
        if open.is_empty() {
            let all = grid.neighbour_ranks(head);
            if mode == Mode::Random || all.is_empty() {
                break;
            }
            head = all[rng.random_range(0..all.len())];
            steps.push(head);
            continue;
        }
        open.shuffle(rng);
        head = open[0];
        visited.insert(head);
        steps.push(head);
        metrics.nodes_expanded += 1;
    }
    (steps, false)
}

impl Strategy for Greedy {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn construct(&self, ctx: &SearchContext<'_>, rng: &mut ChaCha8Rng) -> Construction {
        let started = Instant::now();
        let grid = ctx.grid;
        let options = ctx.options;
        let Some(start) = grid.rank(&ctx.start) else {
            return Construction::degenerate(ctx.start);
        };
        let n = grid.cell_count();
        let mut metrics = ConstructionMetrics::default();
        let mut diagnostics = Vec::new();

        let budget = options.greedy_step_factor.saturating_mul(n).max(1);
        let (steps, cancelled) = walk(grid, start, budget, ctx.mode, ctx.cancel, rng, &mut metrics);
        let mut path = match ctx.mode {
            Mode::Random => steps,
            Mode::Complete => simplify_walk(grid, &steps),
        };
        metrics.cancelled = cancelled;

        let coverage = path.len() as f64 / n as f64;
        if coverage < options.repair_threshold && !cancelled {
            let cap = options.dfs_depth_cap.min(n).max(1);
            let limits = DfsLimits {
                max_len: cap,
                max_expansions: Some(options.dfs_expansion_factor.saturating_mul(n) as u64),
                deadline: Deadline::after(options.backtrack_timeout),
                prune: options.prune_dead_ends && cap == n,
                order: MoveOrder::Shuffled,
            };
            let outcome = search(grid, start, &limits, ctx.cancel, rng, &mut metrics);
            tracing::debug!(
                walk = path.len(),
                dfs = outcome.best.len(),
                cap,
                "greedy coverage below threshold, ran DFS pass"
            );
            match outcome.interrupt {
                Some(Interrupt::Cancelled) => metrics.cancelled = true,
                Some(Interrupt::TimedOut) => {
                    metrics.timed_out = true;
                    diagnostics.push(Diagnostic::TimedOut {
                        strategy: Self::NAME,
                    });
                }
                None => {}
            }
            if outcome.best.len() > path.len() {
                path = outcome.best;
            }
        }

        if metrics.cancelled {
            diagnostics.push(Diagnostic::Cancelled {
                strategy: Self::NAME,
            });
        } else if ctx.mode == Mode::Complete && path.len() < n {
            let mut visited = VisitedSet::from_ranks(n, &path);
            repair(grid, &mut path, &mut visited, ctx.cancel, &mut metrics);
        }

        tracing::debug!(mode = %ctx.mode, covered = path.len(), total = n, "greedy finished");
        finish(ctx, Self::NAME, &path, metrics, diagnostics, started)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::SearchOptions;
    use cubepath_core::Cell;
    use cubepath_test_utils::{assert_simple_path, cube, grid};
    use proptest::prelude::*;
    use rand::SeedableRng;

    fn run(g: &Grid, start: Cell, mode: Mode, seed: u64) -> Construction {
        let opts = SearchOptions::default();
        let cancel = CancelToken::new();
        let ctx = SearchContext::new(g, start, mode, &opts, &cancel);
        Greedy.construct(&ctx, &mut ChaCha8Rng::seed_from_u64(seed))
    }

    #[test]
    fn same_seed_same_path() {
        let g = cube(4);
        let start = Cell::new(1, 2, 3);
        let a = run(&g, start, Mode::Random, 99);
        let b = run(&g, start, Mode::Random, 99);
        assert_eq!(a.cells, b.cells);
    }

    #[test]
    fn random_walk_is_self_avoiding_prefix() {
        let g = cube(3);
        let mut m = ConstructionMetrics::default();
        let (steps, cancelled) = walk(
            &g,
            0,
            1000,
            Mode::Random,
            &CancelToken::new(),
            &mut ChaCha8Rng::seed_from_u64(4),
            &mut m,
        );
        assert!(!cancelled);
        let cells: Vec<Cell> = steps.iter().map(|&r| g.cell(r).unwrap()).collect();
        assert_simple_path(&g, Cell::new(0, 0, 0), &cells);
        assert_eq!(m.nodes_expanded as usize, steps.len() - 1);
    }

    #[test]
    fn complete_walk_wanders_within_budget() {
        let g = cube(3);
        let (steps, _) = walk(
            &g,
            0,
            81,
            Mode::Complete,
            &CancelToken::new(),
            &mut ChaCha8Rng::seed_from_u64(8),
            &mut ConstructionMetrics::default(),
        );
        assert!(steps.len() <= 82);
        for w in steps.windows(2) {
            assert!(g.cell(w[0]).unwrap().is_adjacent(&g.cell(w[1]).unwrap()));
        }
    }

    #[test]
    fn complete_mode_is_repaired() {
        let g = grid(4, 4, 5);
        let start = Cell::new(0, 0, 0);
        let out = run(&g, start, Mode::Complete, 21);
        assert_simple_path(&g, start, &out.cells);
        assert!(out.cells.len() * 10 >= g.cell_count() * 7);
    }

    #[test]
    fn cancelled_before_walk() {
        let g = cube(3);
        let opts = SearchOptions::default();
        let cancel = CancelToken::new();
        cancel.cancel();
        let start = Cell::new(2, 2, 2);
        let ctx = SearchContext::new(&g, start, Mode::Complete, &opts, &cancel);
        let out = Greedy.construct(&ctx, &mut ChaCha8Rng::seed_from_u64(0));
        assert_eq!(out.cells, vec![start]);
        assert!(out
            .diagnostics
            .contains(&Diagnostic::Cancelled { strategy: "greedy" }));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn greedy_paths_are_simple(
            w in 2u32..7, h in 2u32..7, d in 2u32..7,
            x in 0i32..6, y in 0i32..6, z in 0i32..6,
            seed in any::<u64>(),
            complete in any::<bool>(),
        ) {
            let g = grid(w, h, d);
            let start = Cell::new(x % w as i32, y % h as i32, z % d as i32);
            let mode = if complete { Mode::Complete } else { Mode::Random };
            let out = run(&g, start, mode, seed);
            assert_simple_path(&g, start, &out.cells);
        }
    }
}
