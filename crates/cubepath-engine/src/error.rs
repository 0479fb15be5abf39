//! Engine-level error type.

use std::error::Error;
use std::fmt;

use crate::config::ConfigError;
use cubepath_core::PathViolation;
use cubepath_grid::GridError;
use cubepath_playback::PlaybackError;

/// Errors from session and worker operations.
///
/// Search shortfalls are never errors; they arrive as
/// [`Diagnostic`](cubepath_search::Diagnostic)s on a
/// [`Generation`](crate::Generation).
#[derive(Clone, Debug, PartialEq)]
pub enum EngineError {
    /// Configuration failed validation.
    Config(ConfigError),
    /// Grid construction or a cell lookup failed.
    Grid(GridError),
    /// The operation needs a start cell and none is selected.
    NoStartCell,
    /// A manually drawn path is in progress; reset it before moving the start.
    StartLocked {
        /// Cells on the current path.
        len: usize,
    },
    /// A manual step would break a path invariant.
    InvalidStep(PathViolation),
    /// A generation result no longer matches the session's grid or start.
    StaleGeneration,
    /// Playback control failed.
    Playback(PlaybackError),
    /// The background worker has stopped.
    WorkerShutdown,
    /// A background thread could not be spawned.
    ThreadSpawnFailed {
        /// OS error text.
        reason: String,
    },
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "config: {e}"),
            Self::Grid(e) => write!(f, "grid: {e}"),
            Self::NoStartCell => write!(f, "no start cell selected"),
            Self::StartLocked { len } => {
                write!(f, "start is locked while a {len}-cell path is drawn")
            }
            Self::InvalidStep(v) => write!(f, "invalid step: {v}"),
            Self::StaleGeneration => {
                write!(f, "generation result does not match the current grid and start")
            }
            Self::Playback(e) => write!(f, "playback: {e}"),
            Self::WorkerShutdown => write!(f, "generation worker has shut down"),
            Self::ThreadSpawnFailed { reason } => write!(f, "thread spawn failed: {reason}"),
        }
    }
}

impl Error for EngineError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::Grid(e) => Some(e),
            Self::InvalidStep(e) => Some(e),
            Self::Playback(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigError> for EngineError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<GridError> for EngineError {
    fn from(e: GridError) -> Self {
        Self::Grid(e)
    }
}

impl From<PathViolation> for EngineError {
    fn from(e: PathViolation) -> Self {
        Self::InvalidStep(e)
    }
}

impl From<PlaybackError> for EngineError {
    fn from(e: PlaybackError) -> Self {
        Self::Playback(e)
    }
}
