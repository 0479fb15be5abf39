//! Breadth-first routing through unvisited cells.
//!
//! Used to bridge a path head to a cell it cannot step to directly, and
//! to find detours for splice repair. Routes only ever pass through
//! cells the caller marks passable, so splicing a route into a path
//! keeps it simple.

use crate::visited::VisitedSet;
use cubepath_grid::Grid;
use std::collections::VecDeque;

const NONE: usize = usize::MAX;

/// Shortest route from any of `sources` to the first cell satisfying
/// `is_target`, moving only through cells satisfying `passable`.
///
/// The route includes both its source and its target. Sources are
/// assumed passable. Returns `None` when no target is reachable.
pub fn route(
    grid: &Grid,
    sources: &[usize],
    passable: impl Fn(usize) -> bool,
    is_target: impl Fn(usize) -> bool,
) -> Option<Vec<usize>> {
    let n = grid.cell_count();
    let mut prev = vec![NONE; n];
    let mut seen = VisitedSet::new(n);
    let mut queue = VecDeque::new();

    for &s in sources {
        if seen.insert(s) {
            queue.push_back(s);
        }
    }

    while let Some(current) = queue.pop_front() {
        if is_target(current) {
            let mut out = vec![current];
            let mut at = current;
            while prev[at] != NONE {
                at = prev[at];
                out.push(at);
            }
            out.reverse();
            return Some(out);
        }
        for &next in grid.neighbour_ranks(current) {
            if passable(next) && seen.insert(next) {
                prev[next] = current;
                queue.push_back(next);
            }
        }
    }
    None
}

/// Route from the head `from` to `to` through unvisited cells.
///
/// The returned cells exclude `from` and end with `to`. `to` must itself
/// be unvisited.
pub fn bridge(grid: &Grid, from: usize, to: usize, visited: &VisitedSet) -> Option<Vec<usize>> {
    if visited.contains(to) {
        return None;
    }
    let sources: Vec<usize> = grid
        .neighbour_ranks(from)
        .iter()
        .copied()
        .filter(|&r| !visited.contains(r))
        .collect();
    route(grid, &sources, |r| !visited.contains(r), |r| r == to)
}
