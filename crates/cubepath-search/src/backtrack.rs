//! Bounded depth-first search for Hamiltonian paths.
//!
//! # Search
//!
//! Iterative DFS over an explicit frame stack, one frame per path cell,
//! so depth is bounded by the heap rather than the call stack. Each
//! frame holds its candidate moves in one of three hand-tuned direction
//! orders for the frame cell's structural class, picked at random per
//! frame. Grids no larger than 2 on every axis use a fully shuffled
//! order instead.
//!
//! # Pruning
//!
//! After each step the unvisited region is checked for two dead ends:
//! an unvisited cell with no unvisited neighbours that the head cannot
//! reach next, and more than one unvisited cell with a single unvisited
//! neighbour (each of those must be the final endpoint). Either means no
//! completion covers every cell.
//!
//! # Limits
//!
//! A wall-clock [`Deadline`] and the [`CancelToken`](crate::CancelToken)
//! are polled before every expansion. When the space is exhausted, the
//! longest path seen is handed to the repairer. On timeout it is repaired
//! only if it covers more than half the grid; otherwise [`Greedy`] starts
//! over and the longer of the two paths is kept.

use crate::control::{poll, Deadline, Interrupt};
use crate::diagnostics::Diagnostic;
use crate::greedy::Greedy;
use crate::metrics::ConstructionMetrics;
use crate::repair::{free_degree, repair};
use crate::strategy::{finish, Construction, Mode, SearchContext, Strategy};
use crate::visited::VisitedSet;
use crate::CancelToken;
use cubepath_grid::{CellClass, Direction, Grid};
use rand::seq::SliceRandom;
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use smallvec::SmallVec;
use std::time::Instant;

/// Direction orders (indices into [`Direction::ALL`]) per cell class.
const CLASS_ORDERS: [[[usize; 6]; 3]; 4] = [
    // corner
    [[0, 1, 2, 3, 4, 5], [1, 0, 3, 2, 5, 4], [2, 3, 0, 1, 4, 5]],
    // edge
    [[0, 1, 2, 3, 4, 5], [4, 5, 0, 1, 2, 3], [2, 3, 4, 5, 0, 1]],
    // face
    [[0, 1, 2, 3, 4, 5], [2, 3, 0, 1, 4, 5], [0, 1, 4, 5, 2, 3]],
    // interior
    [[0, 1, 2, 3, 4, 5], [4, 5, 2, 3, 0, 1], [3, 2, 0, 1, 5, 4]],
];

/// The three direction orders tried for cells of `class`.
pub fn class_orders(class: CellClass) -> &'static [[usize; 6]; 3] {
    match class {
        CellClass::Corner => &CLASS_ORDERS[0],
        CellClass::Edge => &CLASS_ORDERS[1],
        CellClass::Face => &CLASS_ORDERS[2],
        CellClass::Interior => &CLASS_ORDERS[3],
    }
}

/// How a frame orders its candidate moves.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum MoveOrder {
    /// One of the class-tuned permutations, chosen per frame.
    ClassTuned,
    /// A uniformly shuffled permutation per frame.
    Shuffled,
}

/// Limits for one DFS run.
#[derive(Clone, Copy, Debug)]
pub(crate) struct DfsLimits {
    /// Stop once the path has this many cells.
    pub max_len: usize,
    /// Stop after this many expansions.
    pub max_expansions: Option<u64>,
    pub deadline: Deadline,
    /// Dead-end pruning; only sound when `max_len` is the cell count.
    pub prune: bool,
    pub order: MoveOrder,
}

#[derive(Debug)]
pub(crate) struct DfsOutcome {
    /// Longest path seen.
    pub best: Vec<usize>,
    /// Whether `best` reached `max_len`.
    pub reached: bool,
    pub interrupt: Option<Interrupt>,
}

struct Frame {
    candidates: SmallVec<[usize; 6]>,
    next: usize,
}

impl Frame {
    fn new(candidates: SmallVec<[usize; 6]>) -> Self {
        Self {
            candidates,
            next: 0,
        }
    }

    fn advance(&mut self, visited: &VisitedSet) -> Option<usize> {
        while let Some(&c) = self.candidates.get(self.next) {
            self.next += 1;
            if !visited.contains(c) {
                return Some(c);
            }
        }
        None
    }
}

fn candidates(
    grid: &Grid,
    rank: usize,
    order: MoveOrder,
    rng: &mut ChaCha8Rng,
) -> SmallVec<[usize; 6]> {
    let dirs = match order {
        MoveOrder::Shuffled => {
            let mut d = [0, 1, 2, 3, 4, 5];
            d.shuffle(rng);
            d
        }
        MoveOrder::ClassTuned => {
            let class = grid
                .cell(rank)
                .map(|c| grid.class_of(&c))
                .unwrap_or(CellClass::Interior);
            class_orders(class)[rng.random_range(0..3)]
        }
    };
    dirs.iter()
        .filter_map(|&i| Direction::from_index(i).and_then(|d| grid.step_rank(rank, d)))
        .collect()
}

/// Whether the unvisited region rules out a full cover from `path`.
pub(crate) fn is_dead_end(grid: &Grid, path: &[usize], visited: &VisitedSet) -> bool {
    let Some(&head) = path.last() else {
        return false;
    };
    let remaining = visited.remaining();
    let head_neighbours = grid.neighbour_ranks(head);
    let mut forced_ends = 0;
    for u in visited.unvisited() {
        let touches_head = head_neighbours.contains(&u);
        match (free_degree(grid, u, visited), touches_head) {
            (0, false) => return true,
            (0, true) if remaining > 1 => return true,
            (1, false) => {
                forced_ends += 1;
                if forced_ends > 1 {
                    return true;
                }
            }
            _ => {}
        }
    }
    false
}

/// Run a DFS from `start` within `limits`.
pub(crate) fn search(
    grid: &Grid,
    start: usize,
    limits: &DfsLimits,
    cancel: &CancelToken,
    rng: &mut ChaCha8Rng,
    metrics: &mut ConstructionMetrics,
) -> DfsOutcome {
    let mut visited = VisitedSet::new(grid.cell_count());
    visited.insert(start);
    let mut path = vec![start];
    let mut best = path.clone();
    let mut stack = vec![Frame::new(candidates(grid, start, limits.order, rng))];
    let mut expansions = 0u64;
    let mut interrupt = None;

    // Invariant: stack.len() == path.len().
    while path.len() < limits.max_len {
        if let Some(i) = poll(&limits.deadline, cancel) {
            interrupt = Some(i);
            break;
        }
        if limits.max_expansions.is_some_and(|m| expansions >= m) {
            break;
        }
        let Some(frame) = stack.last_mut() else {
            break;
        };
        match frame.advance(&visited) {
            Some(next) => {
                visited.insert(next);
                path.push(next);
                expansions += 1;
                metrics.nodes_expanded += 1;
                if path.len() > best.len() {
                    best.clone_from(&path);
                }
                if limits.prune && is_dead_end(grid, &path, &visited) {
                    metrics.pruned += 1;
                    path.pop();
                    visited.remove(next);
                    continue;
                }
                stack.push(Frame::new(candidates(grid, next, limits.order, rng)));
            }
            None => {
                stack.pop();
                if stack.is_empty() {
                    break;
                }
                if let Some(r) = path.pop() {
                    visited.remove(r);
                }
                metrics.backtracks += 1;
            }
        }
    }

    DfsOutcome {
        reached: best.len() >= limits.max_len,
        best,
        interrupt,
    }
}

/// Whether a timed-out partial of `best` cells is kept and repaired.
fn worth_repairing(best: usize, total: usize) -> bool {
    best * 2 > total
}

/// Bounded backtracking constructor.
///
/// Always targets full coverage regardless of [`Mode`]. Grids whose
/// largest extent exceeds [`SearchOptions::backtrack_max_dim`] are
/// delegated to [`Greedy`] in complete mode.
///
/// [`SearchOptions::backtrack_max_dim`]: crate::SearchOptions::backtrack_max_dim
#[derive(Clone, Copy, Debug, Default)]
pub struct Backtracking;

impl Backtracking {
    const NAME: &'static str = "backtracking";
}

impl Strategy for Backtracking {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn construct(&self, ctx: &SearchContext<'_>, rng: &mut ChaCha8Rng) -> Construction {
        let started = Instant::now();
        let grid = ctx.grid;
        let options = ctx.options;

        if grid.max_dim() > options.backtrack_max_dim {
            tracing::debug!(
                dims = %grid.dims(),
                limit = options.backtrack_max_dim,
                "grid too large for backtracking, using greedy"
            );
            let mut out = Greedy.construct(&ctx.with_mode(Mode::Complete), rng);
            out.diagnostics.insert(
                0,
                Diagnostic::FellBack {
                    from: Self::NAME,
                    to: Greedy.name(),
                },
            );
            return out;
        }
        let Some(start) = grid.rank(&ctx.start) else {
            return Construction::degenerate(ctx.start);
        };

        let n = grid.cell_count();
        let mut metrics = ConstructionMetrics::default();
        let mut diagnostics = Vec::new();
        let limits = DfsLimits {
            max_len: n,
            max_expansions: None,
            deadline: Deadline::after(options.backtrack_timeout),
            prune: options.prune_dead_ends,
            order: if grid.max_dim() <= 2 {
                MoveOrder::Shuffled
            } else {
                MoveOrder::ClassTuned
            },
        };
        let outcome = search(grid, start, &limits, ctx.cancel, rng, &mut metrics);

        match outcome.interrupt {
            Some(Interrupt::TimedOut) => {
                metrics.timed_out = true;
                tracing::warn!(
                    best = outcome.best.len(),
                    total = n,
                    "backtracking deadline reached"
                );
                diagnostics.push(Diagnostic::TimedOut {
                    strategy: Self::NAME,
                });
            }
            Some(Interrupt::Cancelled) => {
                metrics.cancelled = true;
                diagnostics.push(Diagnostic::Cancelled {
                    strategy: Self::NAME,
                });
            }
            None => {}
        }

        let mut path = outcome.best;
        if metrics.timed_out && !worth_repairing(path.len(), n) {
            diagnostics.push(Diagnostic::FellBack {
                from: Self::NAME,
                to: Greedy.name(),
            });
            let fallback = Greedy.construct(&ctx.with_mode(Mode::Complete), rng);
            metrics.absorb(&fallback.metrics);
            diagnostics.extend(fallback.diagnostics);
            if fallback.cells.len() > path.len() {
                path = fallback
                    .cells
                    .iter()
                    .filter_map(|c| grid.rank(c))
                    .collect();
            }
        } else if !outcome.reached && !metrics.cancelled {
            let mut visited = VisitedSet::from_ranks(n, &path);
            repair(grid, &mut path, &mut visited, ctx.cancel, &mut metrics);
        }
        tracing::debug!(
            covered = path.len(),
            total = n,
            nodes = metrics.nodes_expanded,
            backtracks = metrics.backtracks,
            pruned = metrics.pruned,
            "backtracking finished"
        );
        finish(ctx, Self::NAME, &path, metrics, diagnostics, started)
    }
}
