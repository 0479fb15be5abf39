//! Progressive reveal of a freshly generated path.
//!
//! The path appears one cell at a time. The first step already shows two
//! cells; each further interval adds one. The interval shrinks for long
//! paths so the reveal takes roughly 200 ms of steps, clamped to
//! `[5 ms, 30 ms]` per cell.

use std::time::Duration;

const BUDGET_MS: f64 = 200.0;
const MIN_INTERVAL: Duration = Duration::from_millis(5);
const MAX_INTERVAL: Duration = Duration::from_millis(30);

/// Time-driven count of visible path cells.
#[derive(Clone, Debug, PartialEq)]
pub struct Reveal {
    len: usize,
    interval: Duration,
    pending: Duration,
    visible: usize,
}

impl Reveal {
    /// Per-cell interval for a path of `len` cells.
    pub fn interval_for(len: usize) -> Duration {
        if len == 0 {
            return MAX_INTERVAL;
        }
        Duration::from_secs_f64(BUDGET_MS / len as f64 / 1000.0).clamp(MIN_INTERVAL, MAX_INTERVAL)
    }

    /// Begin revealing a path of `len` cells.
    pub fn new(len: usize) -> Self {
        Self {
            len,
            interval: Self::interval_for(len),
            pending: Duration::ZERO,
            visible: len.min(2),
        }
    }

    /// Account for `elapsed` time. Returns the visible prefix length.
    pub fn advance(&mut self, elapsed: Duration) -> usize {
        self.pending += elapsed;
        while self.visible < self.len && self.pending >= self.interval {
            self.pending -= self.interval;
            self.visible += 1;
        }
        if self.is_complete() {
            self.pending = Duration::ZERO;
        }
        self.visible
    }

    /// Show everything now.
    pub fn finish(&mut self) {
        self.visible = self.len;
        self.pending = Duration::ZERO;
    }

    /// Cells currently visible.
    pub fn visible(&self) -> usize {
        self.visible
    }

    /// Per-cell interval.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Whether the whole path is visible.
    pub fn is_complete(&self) -> bool {
        self.visible >= self.len
    }
}
