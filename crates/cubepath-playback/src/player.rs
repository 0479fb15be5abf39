//! The playback state machine.
//!
//! ```text
//! Idle --start--> Playing --pause--> Paused
//!                 ^   |               |
//!                 |   +---complete--> Idle
//!                 +------resume-------+
//! stop: any --> Idle
//! ```
//!
//! While playing, the marker sits between `cells[segment_index]` and
//! `cells[segment_index + 1]` at fraction `segment_progress`. Progress
//! past 1 carries into the next segment; reaching the last cell ends
//! playback with [`PlaybackEvent::Completed`].

use crate::config::PlaybackConfig;
use crate::error::PlaybackError;
use cubepath_core::Cell;
use cubepath_grid::{Grid, Position};
use std::time::Duration;

/// Slack for accumulated floating-point error at segment boundaries.
const EPSILON: f64 = 1e-9;

/// Coarse playback state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum PlaybackPhase {
    /// Not moving.
    #[default]
    Idle,
    /// Advancing on every tick.
    Playing,
    /// Holding position until resumed.
    Paused,
}

/// Where the marker is.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct PlaybackState {
    /// Current phase.
    pub phase: PlaybackPhase,
    /// Index of the segment's first cell.
    pub segment_index: usize,
    /// Fraction of the current segment covered, in `[0, 1)`.
    pub segment_progress: f64,
}

/// The marker at one instant.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Frame {
    /// Interpolated position.
    pub position: Position,
    /// Segment being traversed.
    pub segment_index: usize,
    /// Fraction of that segment covered.
    pub progress: f64,
    /// Segment start.
    pub from: Cell,
    /// Segment end.
    pub to: Cell,
}

/// What one tick produced.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PlaybackEvent {
    /// The marker moved.
    Moved(Frame),
    /// The marker reached the last cell; playback is idle again.
    Completed {
        /// The final cell.
        cell: Cell,
        /// Its position.
        position: Position,
    },
}

/// Marker playback over a loaded path.
#[derive(Clone, Debug, Default)]
pub struct Playback {
    config: PlaybackConfig,
    cells: Vec<Cell>,
    positions: Vec<Position>,
    state: PlaybackState,
}

impl Playback {
    /// An idle player with no path.
    pub fn new(config: PlaybackConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Replace the path. Stops playback.
    ///
    /// Positions are taken from `grid`, so the path must belong to it.
    pub fn load(&mut self, grid: &Grid, cells: &[Cell]) {
        self.stop();
        self.cells = cells.to_vec();
        self.positions = cells.iter().map(|c| grid.position(c)).collect();
    }

    /// Drop the path. Stops playback.
    pub fn unload(&mut self) {
        self.stop();
        self.cells.clear();
        self.positions.clear();
    }

    /// The loaded path.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Current configuration.
    pub fn config(&self) -> &PlaybackConfig {
        &self.config
    }

    /// Replace the configuration. Position is kept.
    pub fn set_config(&mut self, config: PlaybackConfig) {
        self.config = config;
    }

    /// Snapshot of the state.
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Current phase.
    pub fn phase(&self) -> PlaybackPhase {
        self.state.phase
    }

    /// Whether the marker is advancing.
    pub fn is_playing(&self) -> bool {
        self.state.phase == PlaybackPhase::Playing
    }

    fn segments(&self) -> usize {
        self.cells.len().saturating_sub(1)
    }

    /// Begin from the first cell.
    ///
    /// Fails with [`PlaybackError::PathTooShort`] unless the path has at
    /// least two cells.
    pub fn start(&mut self) -> Result<Frame, PlaybackError> {
        if self.cells.len() < 2 {
            return Err(PlaybackError::PathTooShort {
                len: self.cells.len(),
            });
        }
        self.state = PlaybackState {
            phase: PlaybackPhase::Playing,
            segment_index: 0,
            segment_progress: 0.0,
        };
        tracing::debug!(cells = self.cells.len(), "playback started");
        Ok(self.frame())
    }

    /// Hold position. Returns whether the phase changed.
    pub fn pause(&mut self) -> bool {
        if self.state.phase == PlaybackPhase::Playing {
            self.state.phase = PlaybackPhase::Paused;
            true
        } else {
            false
        }
    }

    /// Continue from the paused position. Returns whether the phase changed.
    pub fn resume(&mut self) -> bool {
        if self.state.phase == PlaybackPhase::Paused {
            self.state.phase = PlaybackPhase::Playing;
            true
        } else {
            false
        }
    }

    /// Return to idle from any phase, resetting the marker.
    pub fn stop(&mut self) {
        self.state = PlaybackState::default();
    }

    /// Advance one nominal frame.
    ///
    /// Returns `None` unless playing.
    pub fn tick(&mut self) -> Option<PlaybackEvent> {
        let step = self.config.step_per_tick(self.segments());
        self.advance_by(step)
    }

    /// Advance by real elapsed time.
    ///
    /// Returns `None` unless playing.
    pub fn advance(&mut self, elapsed: Duration) -> Option<PlaybackEvent> {
        let step = self.config.step_for(elapsed, self.segments());
        self.advance_by(step)
    }

    /// Advance by `delta` segments of progress.
    pub fn advance_by(&mut self, delta: f64) -> Option<PlaybackEvent> {
        if self.state.phase != PlaybackPhase::Playing {
            return None;
        }
        let last = self.segments();
        let mut progress = self.state.segment_progress + delta.max(0.0);
        let mut segment = self.state.segment_index;
        while progress >= 1.0 - EPSILON {
            progress = (progress - 1.0).max(0.0);
            segment += 1;
            if segment >= last {
                return Some(self.complete());
            }
        }
        self.state.segment_index = segment;
        self.state.segment_progress = progress;
        Some(PlaybackEvent::Moved(self.frame()))
    }

    fn complete(&mut self) -> PlaybackEvent {
        self.stop();
        let i = self.cells.len() - 1;
        tracing::debug!(cells = self.cells.len(), "playback completed");
        PlaybackEvent::Completed {
            cell: self.cells[i],
            position: self.positions[i],
        }
    }

    /// The marker's current frame.
    ///
    /// While idle this is the start of the first segment. Requires a
    /// loaded path of at least two cells.
    fn frame(&self) -> Frame {
        let i = self.state.segment_index;
        let t = self.state.segment_progress;
        Frame {
            position: self.positions[i].lerp(&self.positions[i + 1], t),
            segment_index: i,
            progress: t,
            from: self.cells[i],
            to: self.cells[i + 1],
        }
    }

    /// Interpolated marker position, if a path of two or more cells is loaded.
    pub fn marker(&self) -> Option<Position> {
        (self.cells.len() >= 2).then(|| self.frame().position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Speed;
    use cubepath_test_utils::cube;
    use proptest::prelude::*;

    fn line(len: i32) -> (Grid, Vec<Cell>) {
        let g = cube(8);
        let cells = (0..len).map(|x| Cell::new(x, 0, 0)).collect();
        (g, cells)
    }

    fn player(step: f64, len: i32) -> Playback {
        let (g, cells) = line(len);
        let mut p = Playback::new(PlaybackConfig::per_tick(step));
        p.load(&g, &cells);
        p
    }

    #[test]
    fn start_requires_two_cells() {
        let mut p = player(0.25, 1);
        assert_eq!(p.start(), Err(PlaybackError::PathTooShort { len: 1 }));
        assert_eq!(p.state().phase, PlaybackPhase::Idle);
        let mut empty = Playback::default();
        assert_eq!(empty.start(), Err(PlaybackError::PathTooShort { len: 0 }));
    }

    #[test]
    fn five_cells_complete_on_sixteenth_tick() {
        let mut p = player(0.25, 5);
        p.start().unwrap();
        for i in 1..16 {
            match p.tick() {
                Some(PlaybackEvent::Moved(f)) => {
                    assert_eq!(f.segment_index, i / 4);
                    assert_eq!(f.progress, (i % 4) as f64 * 0.25);
                }
                other => panic!("tick {i}: unexpected {other:?}"),
            }
        }
        match p.tick() {
            Some(PlaybackEvent::Completed { cell, .. }) => assert_eq!(cell, Cell::new(4, 0, 0)),
            other => panic!("tick 16: unexpected {other:?}"),
        }
        assert_eq!(p.phase(), PlaybackPhase::Idle);
        assert_eq!(p.tick(), None);
    }

    #[test]
    fn pause_holds_and_resume_continues() {
        let mut p = player(0.25, 5);
        p.start().unwrap();
        p.tick();
        p.tick();
        assert!(p.pause());
        let held = p.state();
        assert_eq!(p.tick(), None);
        assert_eq!(p.state().segment_progress, held.segment_progress);
        assert_eq!(p.state().phase, PlaybackPhase::Paused);
        assert!(p.resume());
        match p.tick() {
            Some(PlaybackEvent::Moved(f)) => {
                assert_eq!(f.segment_index, 0);
                assert_eq!(f.progress, 0.75);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn stop_returns_to_idle_from_paused() {
        let mut p = player(0.25, 3);
        p.start().unwrap();
        p.tick();
        p.pause();
        p.stop();
        assert_eq!(p.state(), PlaybackState::default());
        assert!(!p.resume());
    }

    #[test]
    fn frames_interpolate_positions() {
        let mut p = player(0.5, 3);
        p.start().unwrap();
        let g = cube(8);
        let a = g.position(&Cell::new(0, 0, 0));
        let b = g.position(&Cell::new(1, 0, 0));
        match p.tick() {
            Some(PlaybackEvent::Moved(f)) => {
                assert_eq!(f.position, a.lerp(&b, 0.5));
                assert_eq!(f.from, Cell::new(0, 0, 0));
                assert_eq!(f.to, Cell::new(1, 0, 0));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn large_elapsed_carries_across_segments() {
        let mut p = player(0.25, 6);
        p.start().unwrap();
        // 60 Hz * 0.25 per tick = 15 segments per second; 0.1 s = 1.5 segments.
        match p.advance(Duration::from_millis(100)) {
            Some(PlaybackEvent::Moved(f)) => {
                assert_eq!(f.segment_index, 1);
                assert!((f.progress - 0.5).abs() < 1e-9);
            }
            other => panic!("unexpected {other:?}"),
        }
        assert!(matches!(
            p.advance(Duration::from_secs(10)),
            Some(PlaybackEvent::Completed { .. })
        ));
    }

    #[test]
    fn default_speed_fifty_ticks_per_segment() {
        let mut p = player(Speed::DEFAULT_PER_TICK, 2);
        p.start().unwrap();
        for _ in 0..49 {
            assert!(matches!(p.tick(), Some(PlaybackEvent::Moved(_))));
        }
        assert!(matches!(p.tick(), Some(PlaybackEvent::Completed { .. })));
    }

    #[test]
    fn load_stops_playback() {
        let (g, cells) = line(4);
        let mut p = Playback::new(PlaybackConfig::per_tick(0.1));
        p.load(&g, &cells);
        p.start().unwrap();
        p.load(&g, &cells[..2]);
        assert!(!p.is_playing());
        assert_eq!(p.cells().len(), 2);
        p.unload();
        assert_eq!(p.marker(), None);
    }

    proptest! {
        #[test]
        fn state_stays_in_range(
            len in 2i32..9,
            steps in prop::collection::vec(0.0f64..2.5, 1..40),
        ) {
            let mut p = player(0.1, len);
            p.start().unwrap();
            for step in steps {
                match p.advance_by(step) {
                    Some(PlaybackEvent::Moved(f)) => {
                        prop_assert!(f.progress >= 0.0 && f.progress < 1.0);
                        prop_assert!(f.segment_index + 1 < len as usize);
                    }
                    Some(PlaybackEvent::Completed { cell, .. }) => {
                        prop_assert_eq!(cell, Cell::new(len - 1, 0, 0));
                        break;
                    }
                    None => prop_assert!(false, "idle while playing"),
                }
            }
        }
    }
}
