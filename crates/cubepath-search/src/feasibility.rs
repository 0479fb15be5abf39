//! Checkerboard-parity feasibility pre-filter.
//!
//! Color every cell by `(x + y + z) mod 2`. Adjacent cells always differ
//! in color, so any simple path alternates colors. A path covering every
//! cell therefore needs the two color classes to differ by at most one,
//! and when they differ by exactly one it must start (and end) on the
//! majority color.
//!
//! The check only rules starts out. A favourable [`Verdict`] is not a
//! proof that a covering path exists.

use cubepath_core::{Cell, Dims};
use cubepath_grid::Grid;
use std::fmt;

/// One of the two checkerboard color classes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    /// `(x + y + z)` even. The origin is even.
    Even,
    /// `(x + y + z)` odd.
    Odd,
}

impl Color {
    /// Color of `cell`.
    pub fn of(cell: &Cell) -> Color {
        if cell.parity() == 0 {
            Color::Even
        } else {
            Color::Odd
        }
    }

    /// The other color.
    pub fn other(self) -> Color {
        match self {
            Color::Even => Color::Odd,
            Color::Odd => Color::Even,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Even => f.write_str("even"),
            Color::Odd => f.write_str("odd"),
        }
    }
}

/// Number of cells of each color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct ColorCounts {
    /// Cells with even parity.
    pub even: usize,
    /// Cells with odd parity.
    pub odd: usize,
}

impl ColorCounts {
    /// Counts for a box with one corner at the origin.
    ///
    /// The origin is even, so the even class takes the extra cell when
    /// the total is odd.
    pub fn for_dims(dims: &Dims) -> Self {
        let total = dims.cell_count();
        Self {
            even: total.div_ceil(2),
            odd: total / 2,
        }
    }

    /// Total cells.
    pub fn total(&self) -> usize {
        self.even + self.odd
    }

    /// The larger class, or `None` when balanced.
    pub fn majority(&self) -> Option<Color> {
        match self.even.cmp(&self.odd) {
            std::cmp::Ordering::Greater => Some(Color::Even),
            std::cmp::Ordering::Less => Some(Color::Odd),
            std::cmp::Ordering::Equal => None,
        }
    }

    /// Absolute difference between the classes.
    pub fn imbalance(&self) -> usize {
        self.even.abs_diff(self.odd)
    }
}

/// Which rule decided a [`Verdict`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VerdictReason {
    /// Equal color counts: every start is allowed.
    Balanced,
    /// Counts differ by one and the start is on the majority color.
    MajorityStart,
    /// Counts differ by one and the start is on the minority color.
    MinorityStart,
    /// Counts differ by more than one.
    Imbalanced,
    /// A size-1 axis together with an odd-sized axis.
    DegenerateSlab,
    /// The grid has no cells.
    EmptyGrid,
    /// The start is not a cell of the grid.
    StartOutOfBounds,
}

/// Outcome of the parity pre-filter for one start cell.
///
/// Pure function of the dimensions and the start; computing it has no
/// effect on grid or path state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Verdict {
    /// Whether a complete path from `start` is not ruled out.
    pub can_generate: bool,
    /// Human-readable explanation.
    pub message: String,
    /// Cells per color.
    pub color_counts: ColorCounts,
    /// Color of the start cell.
    pub start_color: Color,
    /// Majority color, `None` when balanced.
    pub majority: Option<Color>,
    /// The deciding rule.
    pub reason: VerdictReason,
}

/// Analyze `start` on a built grid.
pub fn analyze(grid: &Grid, start: &Cell) -> Verdict {
    analyze_dims(&grid.dims(), start)
}

/// Analyze `start` against bare dimensions.
///
/// Accepts extents a [`Grid`] would reject (including size 1) so the
/// slab rule can be evaluated on its own.
pub fn analyze_dims(dims: &Dims, start: &Cell) -> Verdict {
    let counts = ColorCounts::for_dims(dims);
    let start_color = Color::of(start);
    let verdict = |can_generate: bool, reason: VerdictReason, message: String| Verdict {
        can_generate,
        message,
        color_counts: counts,
        start_color,
        majority: counts.majority(),
        reason,
    };

    if counts.total() == 0 {
        return verdict(false, VerdictReason::EmptyGrid, format!("{dims} grid has no cells"));
    }
    if !dims.contains(start) {
        return verdict(
            false,
            VerdictReason::StartOutOfBounds,
            format!("start {start} is outside the {dims} grid"),
        );
    }
    if is_degenerate_slab(dims) {
        return verdict(
            false,
            VerdictReason::DegenerateSlab,
            format!("a {dims} slab with an odd side cannot be covered by one path"),
        );
    }
    let (can_generate, reason) = classify(&counts, start_color);
    let message = match reason {
        VerdictReason::Balanced => "any cell may start".to_string(),
        VerdictReason::MajorityStart => format!(
            "start is on the majority color ({start_color}, {} vs {})",
            counts.even.max(counts.odd),
            counts.even.min(counts.odd)
        ),
        VerdictReason::MinorityStart => format!(
            "a complete path must start on a {} cell; {start} is {start_color}",
            start_color.other()
        ),
        _ => format!(
            "color counts {} vs {} differ by more than one; no complete path exists",
            counts.even, counts.odd
        ),
    };
    verdict(can_generate, reason, message)
}

/// Apply the parity rule to raw counts.
pub fn classify(counts: &ColorCounts, start_color: Color) -> (bool, VerdictReason) {
    match (counts.imbalance(), counts.majority()) {
        (0, _) => (true, VerdictReason::Balanced),
        (1, Some(major)) if major == start_color => (true, VerdictReason::MajorityStart),
        (1, _) => (false, VerdictReason::MinorityStart),
        _ => (false, VerdictReason::Imbalanced),
    }
}

fn is_degenerate_slab(dims: &Dims) -> bool {
    let axes = dims.as_array();
    (0..3).any(|i| axes[i] == 1 && (0..3).any(|j| j != i && axes[j] % 2 == 1))
}
