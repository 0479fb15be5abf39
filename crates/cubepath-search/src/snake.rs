//! Sheet-based Hamiltonian orders with BFS bridging.
//!
//! The grid is flattened onto a `W x M` sheet. Lanes along a randomly
//! chosen run axis become sheet columns, and the `M = H * D` lanes are
//! stacked in boustrophedon order over the two cross axes, so
//! neighbouring sheet cells are neighbouring grid cells and sheet parity
//! equals grid parity. A random axis permutation and per-axis reflections
//! vary the result between seeds.
//!
//! On an even sheet the order is a Hamiltonian cycle rotated to begin at
//! the start, walked in a random direction. On an odd sheet it grows from
//! a 3x3 block around the start by absorbing two-line strips, first
//! across rows, then across columns; this covers every majority-color
//! start. Starts the parity rule excludes fall back to a layer sweep
//! oriented away from the start.
//!
//! The constructor follows the order from the start to the end, then the
//! part before the start in reverse. A target the head cannot step to is
//! reached by a BFS route through unvisited cells, or skipped if none
//! exists. Leftover cells go to the repairer, and on grids within the
//! backtracking limit to [`Backtracking`].

use crate::backtrack::Backtracking;
use crate::bfs;
use crate::diagnostics::Diagnostic;
use crate::metrics::ConstructionMetrics;
use crate::repair::repair;
use crate::strategy::{finish, Construction, Mode, SearchContext, Strategy};
use crate::visited::VisitedSet;
use cubepath_core::{Cell, Dims};
use cubepath_grid::Grid;
use rand::seq::SliceRandom;
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use std::time::Instant;

/// Sheet-order constructor.
#[derive(Clone, Copy, Debug, Default)]
pub struct Snake;

impl Snake {
    const NAME: &'static str = "snake";
}

// ── Sheet ──

/// Sheet coordinates `(column, lane)`.
type Spot = (i32, i32);

const CENTRE_BLOCK: [Spot; 9] = [
    (1, 1), (1, 0), (0, 0), (0, 1), (0, 2), (1, 2), (2, 2), (2, 1), (2, 0),
];
const CORNER_BLOCK: [Spot; 9] = [
    (0, 0), (1, 0), (2, 0), (2, 1), (1, 1), (0, 1), (0, 2), (1, 2), (2, 2),
];

fn transpose(path: Vec<Spot>) -> Vec<Spot> {
    path.into_iter().map(|(a, b)| (b, a)).collect()
}

/// Hamiltonian cycle on a sheet with an even number of lanes.
///
/// Lane 0 left to right, a comb over columns `1..cols` on the remaining
/// lanes, then home along column 0.
fn comb(cols: i32, lanes: i32) -> Vec<Spot> {
    let mut out: Vec<Spot> = (0..cols).map(|a| (a, 0)).collect();
    for b in 1..lanes {
        if b % 2 == 1 {
            out.extend((1..cols).rev().map(|a| (a, b)));
        } else {
            out.extend((1..cols).map(|a| (a, b)));
        }
    }
    out.extend((1..lanes).rev().map(|b| (0, b)));
    out
}

fn sheet_cycle(cols: i32, lanes: i32) -> Vec<Spot> {
    if lanes % 2 == 0 {
        comb(cols, lanes)
    } else {
        transpose(comb(lanes, cols))
    }
}

/// The 3x3 block path from a corner or the centre, in local coordinates.
fn block_from(local: Spot) -> Option<[Spot; 9]> {
    match local {
        (1, 1) => Some(CENTRE_BLOCK),
        (0 | 2, 0 | 2) => {
            let (flip_a, flip_b) = (local.0 == 2, local.1 == 2);
            Some(CORNER_BLOCK.map(|(a, b)| {
                (if flip_a { 2 - a } else { a }, if flip_b { 2 - b } else { b })
            }))
        }
        _ => None,
    }
}

/// Pull the two lanes beyond `lane` into the path, over columns `lo..=hi`.
///
/// An edge of the path running along `lane` is replaced by a detour that
/// leaves sideways, sweeps the near lane to one end, returns along the far
/// lane and rejoins through the near lane.
fn absorb(path: &mut Vec<Spot>, lane: i32, outward: i32, (lo, hi): (i32, i32)) -> Option<()> {
    let i = path
        .windows(2)
        .position(|w| w[0].1 == lane && w[1].1 == lane)?;
    let (u, v) = (path[i].0, path[i + 1].0);
    let near = lane + outward;
    let far = near + outward;
    let detour: Vec<Spot> = if u < v {
        (lo..=u)
            .rev()
            .map(|a| (a, near))
            .chain((lo..=hi).map(|a| (a, far)))
            .chain((v..=hi).rev().map(|a| (a, near)))
            .collect()
    } else {
        (u..=hi)
            .map(|a| (a, near))
            .chain((lo..=hi).rev().map(|a| (a, far)))
            .chain((lo..=v).map(|a| (a, near)))
            .collect()
    };
    path.splice(i + 1..i + 1, detour);
    Some(())
}

/// Hamiltonian path over an odd sheet from an even spot.
fn odd_sheet(cols: i32, lanes: i32, (a, b): Spot) -> Option<Vec<Spot>> {
    let a0 = (a - a % 2).min(cols - 3);
    let b0 = (b - b % 2).min(lanes - 3);
    let mut path: Vec<Spot> = block_from((a - a0, b - b0))?
        .iter()
        .map(|&(da, db)| (a0 + da, b0 + db))
        .collect();

    let (mut lo, mut hi) = (b0, b0 + 2);
    while lo > 0 {
        absorb(&mut path, lo, -1, (a0, a0 + 2))?;
        lo -= 2;
    }
    while hi < lanes - 1 {
        absorb(&mut path, hi, 1, (a0, a0 + 2))?;
        hi += 2;
    }

    let mut path = transpose(path);
    let (mut lo, mut hi) = (a0, a0 + 2);
    while lo > 0 {
        absorb(&mut path, lo, -1, (0, lanes - 1))?;
        lo -= 2;
    }
    while hi < cols - 1 {
        absorb(&mut path, hi, 1, (0, lanes - 1))?;
        hi += 2;
    }
    Some(transpose(path))
}

/// Hamiltonian path over a `cols x lanes` sheet starting at `start`.
///
/// `None` when the sheet is a line or when `start` is on the minority
/// color of an odd sheet.
fn sheet_path(cols: i32, lanes: i32, start: Spot, reverse: bool) -> Option<Vec<Spot>> {
    if cols < 2 || lanes < 2 {
        return None;
    }
    if (cols * lanes) % 2 == 0 {
        let mut cycle = sheet_cycle(cols, lanes);
        let pos = cycle.iter().position(|&s| s == start)?;
        cycle.rotate_left(pos);
        if reverse {
            cycle[1..].reverse();
        }
        return Some(cycle);
    }
    if (start.0 + start.1) % 2 != 0 {
        return None;
    }
    odd_sheet(cols, lanes, start)
}

// ── Frame ──

/// A random symmetry of the box, mapping grid cells to sheet spots.
struct Frame {
    axes: [usize; 3],
    flip: [bool; 3],
    ext: [i32; 3],
}

impl Frame {
    fn random(dims: &Dims, rng: &mut ChaCha8Rng) -> Self {
        let extents = dims.as_array();
        let mut axes = [0, 1, 2];
        axes.shuffle(rng);
        let flip = [rng.random_bool(0.5), rng.random_bool(0.5), rng.random_bool(0.5)];
        Self {
            axes,
            flip,
            ext: axes.map(|k| extents[k] as i32),
        }
    }

    fn reflect(&self, k: usize, v: i32) -> i32 {
        if self.flip[k] {
            self.ext[k] - 1 - v
        } else {
            v
        }
    }

    fn spot(&self, cell: &Cell) -> Spot {
        let coords = [cell.x, cell.y, cell.z];
        let [l0, l1, l2]: [i32; 3] =
            std::array::from_fn(|k| self.reflect(k, coords[self.axes[k]]));
        let row = if l2 % 2 == 0 { l1 } else { self.ext[1] - 1 - l1 };
        (l0, l2 * self.ext[1] + row)
    }

    fn cell(&self, (a, b): Spot) -> Cell {
        let l2 = b / self.ext[1];
        let row = b % self.ext[1];
        let l1 = if l2 % 2 == 0 { row } else { self.ext[1] - 1 - row };
        let local = [a, l1, l2];
        let mut coords = [0i32; 3];
        for k in 0..3 {
            coords[self.axes[k]] = self.reflect(k, local[k]);
        }
        Cell::new(coords[0], coords[1], coords[2])
    }
}

/// A Hamiltonian order beginning at `start`, as ranks.
///
/// `None` when `start` is excluded by the parity rule, or the order does
/// not map back onto the grid.
pub fn hamiltonian_order(grid: &Grid, start: &Cell, rng: &mut ChaCha8Rng) -> Option<Vec<usize>> {
    let frame = Frame::random(&grid.dims(), rng);
    let [cols, e1, e2] = frame.ext;
    let sheet = sheet_path(cols, e1 * e2, frame.spot(start), rng.random_bool(0.5))?;
    sheet
        .into_iter()
        .map(|spot| grid.rank(&frame.cell(spot)))
        .collect()
}

// ── Layer sweep ──

fn orient(coord: i32, extent: u32, rng: &mut ChaCha8Rng) -> bool {
    if coord <= 0 {
        true
    } else if coord >= extent as i32 - 1 {
        false
    } else {
        rng.random_bool(0.5)
    }
}

fn axis(extent: u32, ascending: bool) -> Vec<i32> {
    let e = extent as i32;
    (0..e).map(|i| if ascending { i } else { e - 1 - i }).collect()
}

/// Layer-sweep order oriented away from `start`, as ranks.
///
/// Hamiltonian when `start` is a corner; otherwise the constructor
/// bridges around the cells it strands.
pub fn sweep_order(grid: &Grid, start: &Cell, rng: &mut ChaCha8Rng) -> Vec<usize> {
    let dims = grid.dims();
    let x_asc = orient(start.x, dims.width, rng);
    let y_asc = orient(start.y, dims.height, rng);
    let z_asc = orient(start.z, dims.depth, rng);
    let run_is_x = rng.random_bool(0.5);

    let (runs, crosses) = if run_is_x {
        (axis(dims.width, x_asc), axis(dims.height, y_asc))
    } else {
        (axis(dims.height, y_asc), axis(dims.width, x_asc))
    };
    let layers = axis(dims.depth, z_asc);

    let mut order = Vec::with_capacity(grid.cell_count());
    let mut row = 0usize;
    for (li, &z) in layers.iter().enumerate() {
        let cross_seq: Box<dyn Iterator<Item = &i32>> = if li % 2 == 0 {
            Box::new(crosses.iter())
        } else {
            Box::new(crosses.iter().rev())
        };
        for &c in cross_seq {
            let run_seq: Box<dyn Iterator<Item = &i32>> = if row % 2 == 0 {
                Box::new(runs.iter())
            } else {
                Box::new(runs.iter().rev())
            };
            for &r in run_seq {
                let cell = if run_is_x {
                    Cell::new(r, c, z)
                } else {
                    Cell::new(c, r, z)
                };
                if let Some(rank) = grid.rank(&cell) {
                    order.push(rank);
                }
            }
            row += 1;
        }
    }
    order
}

impl Strategy for Snake {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn construct(&self, ctx: &SearchContext<'_>, rng: &mut ChaCha8Rng) -> Construction {
        let started = Instant::now();
        let grid = ctx.grid;

        if grid.max_dim() <= 2 {
            tracing::debug!("grid within 2 on every axis, sweeping by DFS");
            return Backtracking.construct(&ctx.with_mode(Mode::Complete), rng);
        }
        let Some(start) = grid.rank(&ctx.start) else {
            return Construction::degenerate(ctx.start);
        };

        let n = grid.cell_count();
        let mut metrics = ConstructionMetrics::default();
        let mut diagnostics = Vec::new();
        let order = match hamiltonian_order(grid, &ctx.start, rng) {
            Some(order) => order,
            None => {
                tracing::debug!(start = %ctx.start, "no sheet order, using the layer sweep");
                sweep_order(grid, &ctx.start, rng)
            }
        };
        let Some(pos) = order.iter().position(|&r| r == start) else {
            return Construction::degenerate(ctx.start);
        };

        let mut path = vec![start];
        let mut visited = VisitedSet::new(n);
        visited.insert(start);
        let mut skipped = 0usize;
        let targets = order[pos + 1..].iter().chain(order[..pos].iter().rev());
        for &target in targets {
            if visited.contains(target) {
                continue;
            }
            if ctx.cancel.is_cancelled() {
                metrics.cancelled = true;
                break;
            }
            let head = path[path.len() - 1];
            if grid.neighbour_ranks(head).contains(&target) {
                visited.insert(target);
                path.push(target);
                metrics.nodes_expanded += 1;
                continue;
            }
            match bfs::bridge(grid, head, target, &visited) {
                Some(route) => {
                    metrics.bridges += 1;
                    metrics.bridged_cells += route.len() as u32;
                    metrics.nodes_expanded += route.len() as u64;
                    for r in route {
                        visited.insert(r);
                        path.push(r);
                    }
                }
                None => skipped += 1,
            }
        }
        tracing::debug!(
            covered = path.len(),
            total = n,
            bridges = metrics.bridges,
            skipped,
            "snake sweep done"
        );

        if metrics.cancelled {
            diagnostics.push(Diagnostic::Cancelled {
                strategy: Self::NAME,
            });
            return finish(ctx, Self::NAME, &path, metrics, diagnostics, started);
        }

        if path.len() < n {
            repair(grid, &mut path, &mut visited, ctx.cancel, &mut metrics);
        }

        if path.len() < n && grid.max_dim() <= ctx.options.backtrack_max_dim {
            diagnostics.push(Diagnostic::FellBack {
                from: Self::NAME,
                to: Backtracking.name(),
            });
            let fallback = Backtracking.construct(&ctx.with_mode(Mode::Complete), rng);
            metrics.absorb(&fallback.metrics);
            diagnostics.extend(fallback.diagnostics);
            if fallback.cells.len() > path.len() {
                path = fallback
                    .cells
                    .iter()
                    .filter_map(|c| grid.rank(c))
                    .collect();
            }
        }

        if path.len() < n {
            tracing::warn!(covered = path.len(), total = n, "snake left cells unvisited");
        }
        finish(ctx, Self::NAME, &path, metrics, diagnostics, started)
    }
}
