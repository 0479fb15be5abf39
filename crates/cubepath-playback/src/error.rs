//! Playback errors.

use std::fmt;

/// Errors from playback control.
#[derive(Clone, Debug, PartialEq)]
pub enum PlaybackError {
    /// Playback needs at least one segment.
    PathTooShort {
        /// Cells in the loaded path.
        len: usize,
    },
    /// A configuration value is out of range.
    InvalidConfig {
        /// Offending field.
        field: &'static str,
        /// The rejected value.
        value: f64,
    },
}

impl fmt::Display for PlaybackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PathTooShort { len } => {
                write!(f, "playback needs at least 2 cells, path has {len}")
            }
            Self::InvalidConfig { field, value } => {
                write!(f, "invalid playback {field}: {value}")
            }
        }
    }
}

impl std::error::Error for PlaybackError {}
