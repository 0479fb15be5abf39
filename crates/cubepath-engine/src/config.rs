//! Engine configuration, validation, and error types.
//!
//! [`EngineConfig`] gathers everything a [`Session`](crate::Session) or
//! [`GenerationWorker`](crate::GenerationWorker) needs: grid shape, cell
//! spacing, the random seed, the constructor options and the playback
//! speed. [`validate()`](EngineConfig::validate) checks every value up
//! front so later operations can assume them.

use std::error::Error;
use std::fmt;

use cubepath_core::Dims;
use cubepath_grid::{Grid, GridError};
use cubepath_playback::{PlaybackConfig, PlaybackError};
use cubepath_search::SearchOptions;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected during [`EngineConfig::validate()`].
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// Grid dimensions are out of range.
    Grid(GridError),
    /// Playback settings are unusable.
    Playback(PlaybackError),
    /// Cell spacing is NaN, infinite, zero, or negative.
    InvalidSpacing {
        /// The invalid value.
        value: f64,
    },
    /// Random-mode retry fraction is outside `[0.0, 1.0]`.
    InvalidRetryFraction {
        /// The invalid value.
        value: f64,
    },
    /// A search option is out of range.
    InvalidSearch {
        /// Description of which option was rejected.
        reason: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Grid(e) => write!(f, "grid: {e}"),
            Self::Playback(e) => write!(f, "playback: {e}"),
            Self::InvalidSpacing { value } => {
                write!(f, "spacing must be finite and positive, got {value}")
            }
            Self::InvalidRetryFraction { value } => {
                write!(f, "random_retry_fraction must be in [0.0, 1.0], got {value}")
            }
            Self::InvalidSearch { reason } => write!(f, "invalid search options: {reason}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Grid(e) => Some(e),
            Self::Playback(e) => Some(e),
            _ => None,
        }
    }
}

impl From<GridError> for ConfigError {
    fn from(e: GridError) -> Self {
        Self::Grid(e)
    }
}

impl From<PlaybackError> for ConfigError {
    fn from(e: PlaybackError) -> Self {
        Self::Playback(e)
    }
}

// ── EngineConfig ───────────────────────────────────────────────────

/// Complete configuration for a session or background worker.
#[derive(Clone, Debug, PartialEq)]
pub struct EngineConfig {
    /// Initial grid dimensions. Default: 3×3×3.
    pub dims: Dims,
    /// Distance between neighbouring cell centres. Default: 1.5.
    pub spacing: f64,
    /// RNG seed. `None` seeds from the thread RNG once at construction.
    pub seed: Option<u64>,
    /// Random-mode paths shorter than `max(2, fraction × cells)` are
    /// retried once. Default: 0.10.
    pub random_retry_fraction: f64,
    /// Constructor limits and heuristics.
    pub search: SearchOptions,
    /// Playback speed.
    pub playback: PlaybackConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            dims: Dims::cube(3),
            spacing: Grid::DEFAULT_SPACING,
            seed: None,
            random_retry_fraction: 0.10,
            search: SearchOptions::default(),
            playback: PlaybackConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Validate all values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        // 1. Dimensions within the grid's supported range.
        Grid::with_spacing(self.dims, self.spacing)?;
        // 2. Spacing finite and positive.
        if !self.spacing.is_finite() || self.spacing <= 0.0 {
            return Err(ConfigError::InvalidSpacing {
                value: self.spacing,
            });
        }
        // 3. Retry fraction in [0, 1].
        let f = self.random_retry_fraction;
        if !f.is_finite() || !(0.0..=1.0).contains(&f) {
            return Err(ConfigError::InvalidRetryFraction { value: f });
        }
        // 4. Search options.
        let s = &self.search;
        if s.backtrack_max_dim == 0 {
            return Err(ConfigError::InvalidSearch {
                reason: "backtrack_max_dim must be at least 1".to_string(),
            });
        }
        if s.greedy_step_factor == 0 {
            return Err(ConfigError::InvalidSearch {
                reason: "greedy_step_factor must be at least 1".to_string(),
            });
        }
        if !s.repair_threshold.is_finite() || !(0.0..=1.0).contains(&s.repair_threshold) {
            return Err(ConfigError::InvalidSearch {
                reason: format!(
                    "repair_threshold must be in [0.0, 1.0], got {}",
                    s.repair_threshold
                ),
            });
        }
        if s.dfs_depth_cap == 0 || s.dfs_expansion_factor == 0 {
            return Err(ConfigError::InvalidSearch {
                reason: "dfs_depth_cap and dfs_expansion_factor must be at least 1".to_string(),
            });
        }
        // 5. Playback.
        self.playback.validate()?;
        Ok(())
    }

    /// Build the configured grid.
    pub fn grid(&self) -> Result<Grid, GridError> {
        Grid::with_spacing(self.dims, self.spacing)
    }

    /// A generator seeded from `seed`, or from the thread RNG when unset.
    pub fn rng(&self) -> ChaCha8Rng {
        let seed = self.seed.unwrap_or_else(|| rand::rng().random());
        ChaCha8Rng::seed_from_u64(seed)
    }
}
