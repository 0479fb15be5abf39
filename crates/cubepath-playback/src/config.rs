//! Playback speed configuration.

use crate::error::PlaybackError;
use std::time::Duration;

/// How fast the marker moves.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Speed {
    /// Fixed fraction of a segment per nominal frame. Longer paths take
    /// proportionally longer.
    PerTick(f64),
    /// Whole-path traversal time, independent of path length.
    Traversal(Duration),
}

impl Speed {
    /// Classic per-frame step: fifty frames per segment.
    pub const DEFAULT_PER_TICK: f64 = 0.02;
}

/// Playback settings.
#[derive(Clone, Debug, PartialEq)]
pub struct PlaybackConfig {
    /// Marker speed.
    pub speed: Speed,
    /// Frame rate assumed when converting elapsed time into ticks.
    pub nominal_hz: f64,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            speed: Speed::Traversal(Duration::from_secs(4)),
            nominal_hz: 60.0,
        }
    }
}

impl PlaybackConfig {
    /// Fixed-fraction speed at the default 60 Hz.
    pub fn per_tick(step: f64) -> Self {
        Self {
            speed: Speed::PerTick(step),
            ..Self::default()
        }
    }

    /// Whole-path traversal time at the default 60 Hz.
    pub fn traversal(duration: Duration) -> Self {
        Self {
            speed: Speed::Traversal(duration),
            ..Self::default()
        }
    }

    /// Check that every value is usable.
    pub fn validate(&self) -> Result<(), PlaybackError> {
        if !(self.nominal_hz.is_finite() && self.nominal_hz > 0.0) {
            return Err(PlaybackError::InvalidConfig {
                field: "nominal_hz",
                value: self.nominal_hz,
            });
        }
        match self.speed {
            Speed::PerTick(step) if !(step.is_finite() && step > 0.0) => {
                Err(PlaybackError::InvalidConfig {
                    field: "speed",
                    value: step,
                })
            }
            Speed::Traversal(d) if d.is_zero() => Err(PlaybackError::InvalidConfig {
                field: "speed",
                value: 0.0,
            }),
            _ => Ok(()),
        }
    }

    /// Segment progress added by one nominal frame on a path of
    /// `segments` segments.
    pub fn step_per_tick(&self, segments: usize) -> f64 {
        match self.speed {
            Speed::PerTick(step) => step,
            Speed::Traversal(d) => segments as f64 / (d.as_secs_f64() * self.nominal_hz),
        }
    }

    /// Segment progress for `elapsed` wall-clock time.
    pub fn step_for(&self, elapsed: Duration, segments: usize) -> f64 {
        elapsed.as_secs_f64() * self.nominal_hz * self.step_per_tick(segments)
    }
}
