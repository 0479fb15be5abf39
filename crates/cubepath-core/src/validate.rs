//! Path validation and truncation.
//!
//! [`validate`] walks consecutive pairs and stops at the first index
//! that breaks adjacency or simplicity. It never mutates its input.
//! [`truncate_at_violation`] is the recovery used by the orchestration
//! layer: keep the valid prefix instead of rejecting the whole path.

use crate::error::{PathViolation, ViolationReason};
use crate::id::{Cell, Dims};
use std::collections::HashMap;

/// Check that `cells` is a non-empty simple path of adjacent cells.
///
/// Returns the first violation found, scanning front to back.
pub fn validate(cells: &[Cell]) -> Result<(), PathViolation> {
    check(cells, None)
}

/// Like [`validate`], additionally requiring every cell to lie in `dims`.
pub fn validate_within(cells: &[Cell], dims: &Dims) -> Result<(), PathViolation> {
    check(cells, Some(dims))
}

/// Truncate `cells` just before its first violation.
///
/// Returns the violation that caused the truncation, if any. An empty
/// input is left empty and reported as [`ViolationReason::Empty`].
pub fn truncate_at_violation(cells: &mut Vec<Cell>, dims: Option<&Dims>) -> Option<PathViolation> {
    match check(cells, dims) {
        Ok(()) => None,
        Err(violation) => {
            cells.truncate(violation.index);
            Some(violation)
        }
    }
}

fn check(cells: &[Cell], dims: Option<&Dims>) -> Result<(), PathViolation> {
    if cells.is_empty() {
        return Err(PathViolation {
            index: 0,
            reason: ViolationReason::Empty,
        });
    }
    // Cell -> index of its first occurrence.
    let mut seen: HashMap<Cell, usize> = HashMap::with_capacity(cells.len());
    for (index, cell) in cells.iter().enumerate() {
        if let Some(dims) = dims {
            if !dims.contains(cell) {
                return Err(PathViolation {
                    index,
                    reason: ViolationReason::OutOfBounds { cell: *cell, dims: *dims },
                });
            }
        }
        if index > 0 {
            let prev = cells[index - 1];
            let distance = prev.manhattan(cell);
            if distance != 1 {
                return Err(PathViolation {
                    index,
                    reason: ViolationReason::Discontinuous {
                        prev,
                        cell: *cell,
                        distance,
                    },
                });
            }
        }
        if let Some(&first_index) = seen.get(cell) {
            return Err(PathViolation {
                index,
                reason: ViolationReason::DuplicateCell {
                    cell: *cell,
                    first_index,
                },
            });
        }
        seen.insert(*cell, index);
    }
    Ok(())
}
