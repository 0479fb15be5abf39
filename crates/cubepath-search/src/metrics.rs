//! Per-construction search metrics.
//!
//! [`ConstructionMetrics`] records what a single constructor call did,
//! for logging and profiling. Nested constructor calls (fallbacks) are
//! folded in with [`ConstructionMetrics::absorb`].

/// Counters collected during one path construction.
///
/// Durations are in microseconds.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ConstructionMetrics {
    /// Wall-clock time for the construction, in microseconds.
    pub elapsed_us: u64,
    /// Cells pushed onto a search path (DFS expansions and greedy steps).
    pub nodes_expanded: u64,
    /// Cells popped off a DFS path.
    pub backtracks: u64,
    /// DFS branches cut by the dead-end check.
    pub pruned: u64,
    /// BFS bridges spliced into a path.
    pub bridges: u32,
    /// Cells added through BFS bridges.
    pub bridged_cells: u32,
    /// Cells attached by the repair pass.
    pub repaired_cells: u32,
    /// Whether a search hit its deadline.
    pub timed_out: bool,
    /// Whether a search observed cancellation.
    pub cancelled: bool,
}

impl ConstructionMetrics {
    /// Fold the counters of a nested construction into `self`.
    ///
    /// `elapsed_us` is not summed; the outer call measures its own.
    pub fn absorb(&mut self, other: &ConstructionMetrics) {
        self.nodes_expanded += other.nodes_expanded;
        self.backtracks += other.backtracks;
        self.pruned += other.pruned;
        self.bridges += other.bridges;
        self.bridged_cells += other.bridged_cells;
        self.repaired_cells += other.repaired_cells;
        self.timed_out |= other.timed_out;
        self.cancelled |= other.cancelled;
    }
}
