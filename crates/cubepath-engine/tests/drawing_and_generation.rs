//! Integration test: a full interactive session.
//!
//! Draws a path by hand, generates complete paths from every
//! feasible start of several grids, and checks that infeasible starts
//! are refused before any search runs.

use std::time::Duration;

use cubepath_core::{Cell, Dims};
use cubepath_engine::{EngineConfig, EngineError, PathOrigin, Session};
use cubepath_grid::Direction;
use cubepath_playback::{PlaybackEvent, PlaybackPhase};
use cubepath_search::{Diagnostic, Mode};
use cubepath_test_utils::{all_starts, assert_full_cover, assert_simple_path, majority_starts};

fn session(dims: Dims, seed: u64) -> Session {
    Session::new(EngineConfig {
        dims,
        seed: Some(seed),
        ..Default::default()
    })
    .unwrap()
}

// ── Manual drawing ───────────────────────────────────────────────────

#[test]
fn draw_serpentine_by_hand() {
    let mut s = session(Dims::new(2, 2, 2), 0);
    s.select_start(Cell::ORIGIN).unwrap();
    for dir in [
        Direction::XPos,
        Direction::YPos,
        Direction::XNeg,
        Direction::ZPos,
        Direction::XPos,
        Direction::YNeg,
        Direction::XNeg,
    ] {
        s.extend_towards(dir).unwrap();
    }
    assert_full_cover(s.grid(), Cell::ORIGIN, s.path());
    assert!(s.frontier().is_empty());
    assert_eq!(s.origin(), PathOrigin::Manual);
    assert!(matches!(
        s.select_start(Cell::new(1, 1, 1)),
        Err(EngineError::StartLocked { len: 8 })
    ));
}

// ── Generation ───────────────────────────────────────────────────────

#[test]
fn complete_from_every_feasible_start() {
    for dims in [Dims::new(3, 3, 3), Dims::new(2, 3, 3), Dims::new(3, 2, 2)] {
        let mut s = session(dims, 21);
        let starts = majority_starts(s.grid());
        for start in starts {
            s.select_start(start).unwrap();
            let out = s.generate(Mode::Complete).unwrap();
            assert!(out.coverage.is_complete(), "{dims} from {start}: {:?}", out.diagnostics);
            assert_full_cover(s.grid(), start, s.path());
        }
    }
}

#[test]
fn infeasible_starts_are_refused() {
    let mut s = session(Dims::new(3, 3, 3), 4);
    let starts = all_starts(s.grid());
    for start in starts {
        let verdict = s.select_start(start).unwrap();
        let out = s.generate(Mode::Complete).unwrap();
        if verdict.can_generate {
            assert_eq!(out.coverage.covered, 27);
        } else {
            assert_eq!(out.path.len(), 1);
            assert_eq!(out.metrics.nodes_expanded, 0);
            assert!(out
                .diagnostics
                .iter()
                .any(|d| matches!(d, Diagnostic::InfeasibleStart { .. })));
        }
    }
}

#[test]
fn random_paths_are_always_simple() {
    let mut s = session(Dims::new(5, 4, 3), 8);
    let starts = all_starts(s.grid());
    for start in starts {
        s.select_start(start).unwrap();
        s.generate(Mode::Random).unwrap();
        assert_simple_path(s.grid(), start, s.path());
    }
}

// ── Reveal and playback ──────────────────────────────────────────────

#[test]
fn reveal_then_play_to_completion() {
    let mut s = session(Dims::new(3, 3, 3), 13);
    s.select_start(Cell::new(2, 2, 2)).unwrap();
    s.generate(Mode::Complete).unwrap();

    let mut elapsed = Duration::ZERO;
    while s.visible_path().len() < s.path().len() {
        s.advance_reveal(Duration::from_millis(16));
        elapsed += Duration::from_millis(16);
    }
    assert!(elapsed < Duration::from_secs(1));

    s.play().unwrap();
    let mut last = None;
    for _ in 0..1_000 {
        match s.advance(Duration::from_millis(16)) {
            Some(PlaybackEvent::Completed { cell, .. }) => {
                last = Some(cell);
                break;
            }
            Some(PlaybackEvent::Moved(_)) => {}
            None => break,
        }
    }
    assert_eq!(last, s.path().last().copied());
    assert_eq!(s.playback_phase(), PlaybackPhase::Idle);
}
