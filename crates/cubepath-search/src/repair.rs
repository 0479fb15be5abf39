//! Grafting unvisited cells onto an existing simple path.
//!
//! Three moves, each preserving adjacency and simplicity:
//!
//! - **Tail extension**: step from the tail to an unvisited neighbour,
//!   preferring the neighbour with the fewest unvisited neighbours of its
//!   own.
//! - **Splice**: between consecutive cells `a, b`, insert a route of
//!   unvisited cells that starts next to `a` and ends next to `b`. The
//!   shortest such route is found by BFS; the minimal case is a pair
//!   `u, v` with `a ~ u ~ v ~ b`.
//! - **Tail rotation**: if the tail `t` is adjacent to an earlier cell
//!   `p[i]`, reversing `p[i+1..]` makes `p[i+1]` the new tail. Applied
//!   only when the new tail can be extended.
//!
//! The start cell is never moved.

use crate::bfs;
use crate::control::CancelToken;
use crate::metrics::ConstructionMetrics;
use crate::visited::VisitedSet;
use cubepath_grid::Grid;

/// Reduce a walk with revisits to a simple path.
///
/// Keeps a cell when it has not been kept before and is adjacent to the
/// last kept cell. The first cell is always kept.
pub fn simplify_walk(grid: &Grid, walk: &[usize]) -> Vec<usize> {
    let Some(&first) = walk.first() else {
        return Vec::new();
    };
    let mut kept = VisitedSet::new(grid.cell_count());
    kept.insert(first);
    let mut out = vec![first];
    for &r in &walk[1..] {
        if kept.contains(r) {
            continue;
        }
        let last = out[out.len() - 1];
        if grid.neighbour_ranks(last).contains(&r) {
            kept.insert(r);
            out.push(r);
        }
    }
    out
}

/// Graft as many unvisited cells onto `path` as the three moves allow.
///
/// `visited` must hold exactly the cells of `path`; both are updated in
/// place. Returns the number of cells added.
pub fn repair(
    grid: &Grid,
    path: &mut Vec<usize>,
    visited: &mut VisitedSet,
    cancel: &CancelToken,
    metrics: &mut ConstructionMetrics,
) -> usize {
    let before = path.len();
    if path.is_empty() {
        return 0;
    }
    while !visited.is_full() && !cancel.is_cancelled() {
        let mut progressed = extend_tail(grid, path, visited) > 0;
        if visited.is_full() {
            break;
        }
        progressed |= splice(grid, path, visited, metrics) > 0;
        if !progressed {
            progressed = rotate_tail(grid, path, visited);
        }
        if !progressed {
            break;
        }
    }
    let added = path.len() - before;
    metrics.repaired_cells += added as u32;
    if added > 0 {
        tracing::debug!(added, covered = path.len(), "repair grafted cells");
    }
    added
}

/// Extend from the tail while it has unvisited neighbours.
pub fn extend_tail(grid: &Grid, path: &mut Vec<usize>, visited: &mut VisitedSet) -> usize {
    let mut added = 0;
    while let Some(&tail) = path.last() {
        let next = grid
            .neighbour_ranks(tail)
            .iter()
            .copied()
            .filter(|&r| !visited.contains(r))
            .min_by_key(|&r| free_degree(grid, r, visited));
        let Some(next) = next else { break };
        visited.insert(next);
        path.push(next);
        added += 1;
    }
    added
}

/// One pass of detour insertion along the whole path.
pub fn splice(
    grid: &Grid,
    path: &mut Vec<usize>,
    visited: &mut VisitedSet,
    metrics: &mut ConstructionMetrics,
) -> usize {
    let mut added = 0;
    let mut i = 0;
    while i + 1 < path.len() && !visited.is_full() {
        let (a, b) = (path[i], path[i + 1]);
        let sources: Vec<usize> = grid
            .neighbour_ranks(a)
            .iter()
            .copied()
            .filter(|&r| !visited.contains(r))
            .collect();
        if sources.is_empty() {
            i += 1;
            continue;
        }
        let b_neighbours = grid.neighbour_ranks(b);
        let detour = bfs::route(
            grid,
            &sources,
            |r| !visited.contains(r),
            |r| b_neighbours.contains(&r),
        );
        match detour {
            Some(detour) => {
                for &r in &detour {
                    visited.insert(r);
                }
                added += detour.len();
                metrics.bridges += 1;
                metrics.bridged_cells += detour.len() as u32;
                path.splice(i + 1..i + 1, detour);
                // Re-examine the new segment starting at `a`.
            }
            None => i += 1,
        }
    }
    added
}

/// Rotate the tail onto a cell that can be extended. Returns whether a
/// rotation was applied.
pub fn rotate_tail(grid: &Grid, path: &mut [usize], visited: &VisitedSet) -> bool {
    let last = match path.len() {
        0..=2 => return false,
        n => n - 1,
    };
    let tail = path[last];
    for i in 0..last - 1 {
        if !grid.neighbour_ranks(tail).contains(&path[i]) {
            continue;
        }
        let pivot = path[i + 1];
        if free_degree(grid, pivot, visited) > 0 {
            path[i + 1..].reverse();
            return true;
        }
    }
    false
}

/// Unvisited neighbours of `rank`.
pub(crate) fn free_degree(grid: &Grid, rank: usize, visited: &VisitedSet) -> usize {
    grid.neighbour_ranks(rank)
        .iter()
        .filter(|&&r| !visited.contains(r))
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use cubepath_core::{validate, Cell};
    use cubepath_test_utils::{cube, grid};

    fn ranks(g: &Grid, cells: &[(i32, i32, i32)]) -> Vec<usize> {
        cells
            .iter()
            .map(|&(x, y, z)| g.rank(&Cell::new(x, y, z)).unwrap())
            .collect()
    }

    fn cells(g: &Grid, path: &[usize]) -> Vec<Cell> {
        path.iter().map(|&r| g.cell(r).unwrap()).collect()
    }

    #[test]
    fn simplify_drops_revisits_and_jumps() {
        let g = cube(3);
        let walk = ranks(
            &g,
            &[(0, 0, 0), (1, 0, 0), (0, 0, 0), (1, 0, 0), (1, 1, 0), (2, 2, 0)],
        );
        let simple = simplify_walk(&g, &walk);
        assert_eq!(simple, ranks(&g, &[(0, 0, 0), (1, 0, 0), (1, 1, 0)]));
        assert!(simplify_walk(&g, &[]).is_empty());
    }

    #[test]
    fn splice_inserts_pair_between_neighbours() {
        // 2x2x2: path (0,0,0)->(1,0,0); (0,1,0),(1,1,0) form the detour.
        let g = grid(2, 2, 2);
        let mut path = ranks(&g, &[(0, 0, 0), (1, 0, 0)]);
        let mut visited = VisitedSet::from_ranks(g.cell_count(), &path);
        let mut m = ConstructionMetrics::default();
        let added = splice(&g, &mut path, &mut visited, &mut m);
        assert!(added >= 2);
        assert_eq!(path[0], ranks(&g, &[(0, 0, 0)])[0]);
        validate(&cells(&g, &path)).unwrap();
        assert_eq!(visited.count(), path.len());
        assert!(m.bridges >= 1);
    }

    #[test]
    fn rotation_moves_tail_to_extendable_cell() {
        let g = grid(3, 3, 2);
        let mut path = ranks(
            &g,
            &[
                (0, 0, 0),
                (1, 0, 0),
                (2, 0, 0),
                (2, 1, 0),
                (1, 1, 0),
                (0, 1, 0),
            ],
        );
        let visited = VisitedSet::from_ranks(g.cell_count(), &path);
        // Tail (0,1,0) touches the start, so (1,0,0) becomes the tail.
        assert!(rotate_tail(&g, &mut path, &visited));
        assert_eq!(path[0], ranks(&g, &[(0, 0, 0)])[0]);
        assert_eq!(*path.last().unwrap(), ranks(&g, &[(1, 0, 0)])[0]);
        validate(&cells(&g, &path)).unwrap();
    }

    #[test]
    fn rotation_needs_three_cells() {
        let g = cube(2);
        let mut path = ranks(&g, &[(0, 0, 0), (1, 0, 0)]);
        let visited = VisitedSet::from_ranks(g.cell_count(), &path);
        assert!(!rotate_tail(&g, &mut path, &visited));
    }

    #[test]
    fn repair_completes_a_short_prefix() {
        let g = cube(3);
        let mut path = ranks(&g, &[(0, 0, 0), (1, 0, 0)]);
        let mut visited = VisitedSet::from_ranks(g.cell_count(), &path);
        let mut m = ConstructionMetrics::default();
        let added = repair(&g, &mut path, &mut visited, &CancelToken::new(), &mut m);
        assert_eq!(path.len(), 2 + added);
        assert_eq!(m.repaired_cells as usize, added);
        assert_eq!(visited.count(), path.len());
        validate(&cells(&g, &path)).unwrap();
        assert!(path.len() >= 14);
    }

    #[test]
    fn repair_respects_cancellation() {
        let g = cube(3);
        let mut path = ranks(&g, &[(0, 0, 0)]);
        let mut visited = VisitedSet::from_ranks(g.cell_count(), &path);
        let cancel = CancelToken::new();
        cancel.cancel();
        let added = repair(
            &g,
            &mut path,
            &mut visited,
            &cancel,
            &mut ConstructionMetrics::default(),
        );
        assert_eq!(added, 0);
    }
}
