//! Wall-clock deadlines and cooperative cancellation for searches.
//!
//! Long-running constructors poll both on every expansion. Neither
//! interrupts anything on its own: the search observes the flag and
//! returns its best partial result.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// A point in wall-clock time after which a search must stop.
#[derive(Clone, Copy, Debug)]
pub struct Deadline {
    at: Option<Instant>,
}

impl Deadline {
    /// A deadline `budget` from now.
    pub fn after(budget: Duration) -> Self {
        Self {
            at: Instant::now().checked_add(budget),
        }
    }

    /// A deadline that never expires.
    pub fn never() -> Self {
        Self { at: None }
    }

    /// Whether the deadline has passed.
    pub fn expired(&self) -> bool {
        self.at.is_some_and(|at| Instant::now() >= at)
    }

    /// Time left, or `None` for an unbounded deadline.
    pub fn remaining(&self) -> Option<Duration> {
        self.at.map(|at| at.saturating_duration_since(Instant::now()))
    }
}

/// Shared cancellation flag.
///
/// Clones observe the same flag. Once cancelled a token stays cancelled;
/// callers wanting a fresh search create a new token.
#[derive(Clone, Debug, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    /// A token that is not cancelled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Release);
    }

    /// Whether cancellation was requested.
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Acquire)
    }
}

/// Why a search stopped before exhausting its space.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Interrupt {
    /// The wall-clock deadline passed.
    TimedOut,
    /// The cancel token fired.
    Cancelled,
}

/// Poll cancellation first, then the deadline.
pub fn poll(deadline: &Deadline, cancel: &CancelToken) -> Option<Interrupt> {
    if cancel.is_cancelled() {
        Some(Interrupt::Cancelled)
    } else if deadline.expired() {
        Some(Interrupt::TimedOut)
    } else {
        None
    }
}
