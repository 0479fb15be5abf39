//! Tuning knobs for the path constructors.

use std::time::Duration;

/// Which constructor serves complete-coverage requests.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum CompleteStrategy {
    /// Seeded Hamiltonian sheet order with BFS bridging.
    #[default]
    Snake,
    /// Bounded backtracking; grids above the size limit use greedy.
    Backtracking,
    /// Randomized greedy walk with repair.
    Greedy,
}

/// Search limits and heuristics shared by all constructors.
///
/// Build with [`SearchOptions::default`] and adjust with the `with_*`
/// setters.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchOptions {
    /// Wall-clock budget for one backtracking search.
    pub backtrack_timeout: Duration,
    /// Largest `max(dims)` the backtracking search is attempted on.
    pub backtrack_max_dim: u32,
    /// Greedy step budget as a multiple of the cell count.
    pub greedy_step_factor: usize,
    /// Coverage fraction below which greedy runs its DFS second pass.
    pub repair_threshold: f64,
    /// Depth cap of the greedy DFS second pass (also capped by cell count).
    pub dfs_depth_cap: usize,
    /// Expansion budget of the greedy DFS pass as a multiple of the cell count.
    pub dfs_expansion_factor: usize,
    /// Constructor for complete-coverage requests.
    pub complete_strategy: CompleteStrategy,
    /// Enable dead-end pruning in the backtracking search.
    pub prune_dead_ends: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            backtrack_timeout: Duration::from_secs(5),
            backtrack_max_dim: 4,
            greedy_step_factor: 3,
            repair_threshold: 0.7,
            dfs_depth_cap: 100,
            dfs_expansion_factor: 64,
            complete_strategy: CompleteStrategy::Snake,
            prune_dead_ends: true,
        }
    }
}

impl SearchOptions {
    /// Set the backtracking wall-clock budget.
    pub fn with_backtrack_timeout(mut self, timeout: Duration) -> Self {
        self.backtrack_timeout = timeout;
        self
    }

    /// Set the backtracking size limit.
    pub fn with_backtrack_max_dim(mut self, max_dim: u32) -> Self {
        self.backtrack_max_dim = max_dim;
        self
    }

    /// Set the greedy step factor.
    pub fn with_greedy_step_factor(mut self, factor: usize) -> Self {
        self.greedy_step_factor = factor;
        self
    }

    /// Set the coverage threshold for the greedy DFS pass.
    pub fn with_repair_threshold(mut self, threshold: f64) -> Self {
        self.repair_threshold = threshold;
        self
    }

    /// Set the greedy DFS depth cap.
    pub fn with_dfs_depth_cap(mut self, cap: usize) -> Self {
        self.dfs_depth_cap = cap;
        self
    }

    /// Set the greedy DFS expansion factor.
    pub fn with_dfs_expansion_factor(mut self, factor: usize) -> Self {
        self.dfs_expansion_factor = factor;
        self
    }

    /// Select the complete-mode constructor.
    pub fn with_complete_strategy(mut self, strategy: CompleteStrategy) -> Self {
        self.complete_strategy = strategy;
        self
    }

    /// Toggle dead-end pruning.
    pub fn with_pruning(mut self, enabled: bool) -> Self {
        self.prune_dead_ends = enabled;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let o = SearchOptions::default();
        assert_eq!(o.backtrack_timeout, Duration::from_secs(5));
        assert_eq!(o.backtrack_max_dim, 4);
        assert_eq!(o.greedy_step_factor, 3);
        assert_eq!(o.dfs_depth_cap, 100);
        assert_eq!(o.complete_strategy, CompleteStrategy::Snake);
        assert!(o.prune_dead_ends);
    }

    #[test]
    fn setters_chain() {
        let o = SearchOptions::default()
            .with_backtrack_timeout(Duration::from_millis(50))
            .with_complete_strategy(CompleteStrategy::Greedy)
            .with_pruning(false)
            .with_repair_threshold(0.5);
        assert_eq!(o.backtrack_timeout, Duration::from_millis(50));
        assert_eq!(o.complete_strategy, CompleteStrategy::Greedy);
        assert!(!o.prune_dead_ends);
        assert_eq!(o.repair_threshold, 0.5);
    }
}
