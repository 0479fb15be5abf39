//! Interactive session state.
//!
//! A [`Session`] owns one grid, at most one start cell, the current path
//! and the playback state. It supports both ways a path comes to exist:
//!
//! - **Manual**: [`select_start`](Session::select_start) then repeated
//!   [`extend`](Session::extend) / [`undo`](Session::undo).
//! - **Automatic**: [`generate`](Session::generate) runs the pipeline
//!   synchronously, or [`adopt`](Session::adopt) installs a result
//!   produced by a [`GenerationWorker`](crate::GenerationWorker).
//!
//! Every mutation keeps the path valid: it always starts at the start
//! cell, steps between adjacent cells and never revisits a cell.

use std::time::Duration;

use cubepath_core::{Cell, Dims, Path};
use cubepath_grid::{Direction, Grid, Position};
use cubepath_playback::{Frame, Playback, PlaybackConfig, PlaybackEvent, PlaybackPhase, Reveal};
use cubepath_search::{analyze, CancelToken, Mode, Verdict};
use rand_chacha::ChaCha8Rng;

use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::pipeline::{self, Generation};

/// How the current path was produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum PathOrigin {
    /// Drawn step by step, or just the start cell.
    #[default]
    Manual,
    /// Produced by the generation pipeline.
    Generated,
}

/// One grid, one path, one playback.
#[derive(Debug)]
pub struct Session {
    config: EngineConfig,
    grid: Grid,
    path: Option<Path>,
    origin: PathOrigin,
    last: Option<Generation>,
    playback: Playback,
    reveal: Option<Reveal>,
    rng: ChaCha8Rng,
}

impl Session {
    /// Validate `config` and build its grid.
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        config.validate()?;
        let grid = config.grid()?;
        let rng = config.rng();
        let playback = Playback::new(config.playback.clone());
        Ok(Self {
            config,
            grid,
            path: None,
            origin: PathOrigin::Manual,
            last: None,
            playback,
            reveal: None,
            rng,
        })
    }

    // ── Accessors ──────────────────────────────────────────────────

    /// The configuration this session was built from.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The current grid.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// The current grid's dimensions.
    pub fn dims(&self) -> Dims {
        self.grid.dims()
    }

    /// The selected start cell.
    pub fn start(&self) -> Option<Cell> {
        self.path.as_ref().map(Path::start)
    }

    /// The current path; empty when no start is selected.
    pub fn path(&self) -> &[Cell] {
        self.path.as_ref().map_or(&[][..], Path::cells)
    }

    /// How the current path was produced.
    pub fn origin(&self) -> PathOrigin {
        self.origin
    }

    /// The generation that produced the current path, if any.
    pub fn last_generation(&self) -> Option<&Generation> {
        self.last.as_ref()
    }

    /// Playback state.
    pub fn playback(&self) -> &Playback {
        &self.playback
    }

    /// Reveal schedule of the last generated path.
    pub fn reveal(&self) -> Option<&Reveal> {
        self.reveal.as_ref()
    }

    // ── Grid and start ─────────────────────────────────────────────

    /// Replace the grid. Start, path and playback are cleared.
    pub fn resize(&mut self, dims: Dims) -> Result<(), EngineError> {
        let grid = Grid::with_spacing(dims, self.config.spacing)?;
        tracing::debug!(from = %self.grid.dims(), to = %dims, "grid resized");
        self.grid = grid;
        self.config.dims = dims;
        self.clear();
        Ok(())
    }

    /// Choose a new start cell. The path becomes `[cell]`.
    ///
    /// Rejected with [`EngineError::StartLocked`] while a manually drawn
    /// path has more than one cell.
    pub fn select_start(&mut self, cell: Cell) -> Result<Verdict, EngineError> {
        self.grid.check(&cell)?;
        if self.origin == PathOrigin::Manual {
            let len = self.path().len();
            if len > 1 {
                return Err(EngineError::StartLocked { len });
            }
        }
        self.path = Some(Path::new(cell));
        self.refresh(PathOrigin::Manual);
        Ok(analyze(&self.grid, &cell))
    }

    /// Parity verdict for the selected start.
    pub fn analyze(&self) -> Result<Verdict, EngineError> {
        let start = self.start().ok_or(EngineError::NoStartCell)?;
        Ok(analyze(&self.grid, &start))
    }

    // ── Manual drawing ─────────────────────────────────────────────

    /// Append `cell` to the path.
    ///
    /// The cell must lie in the grid, be adjacent to the head and not be
    /// on the path yet.
    pub fn extend(&mut self, cell: Cell) -> Result<(), EngineError> {
        self.grid.check(&cell)?;
        let path = self.path.as_mut().ok_or(EngineError::NoStartCell)?;
        path.push(cell)?;
        self.refresh(PathOrigin::Manual);
        Ok(())
    }

    /// Step from the head in `dir`. Returns the new head.
    pub fn extend_towards(&mut self, dir: Direction) -> Result<Cell, EngineError> {
        let head = self
            .path
            .as_ref()
            .map(Path::head)
            .ok_or(EngineError::NoStartCell)?;
        let (dx, dy, dz) = dir.offset();
        let next = head.offset(dx, dy, dz);
        self.extend(next)?;
        Ok(next)
    }

    /// Moves available from the head: in bounds and not yet visited.
    pub fn frontier(&self) -> Vec<(Direction, Cell)> {
        let Some(path) = &self.path else {
            return Vec::new();
        };
        let head = path.head();
        Direction::ALL
            .iter()
            .filter_map(|&dir| self.grid.step(&head, dir).map(|cell| (dir, cell)))
            .filter(|(_, cell)| !path.contains(cell))
            .collect()
    }

    /// Remove the head. The start cell is never removed.
    pub fn undo(&mut self) -> Option<Cell> {
        let removed = self.path.as_mut()?.pop()?;
        self.refresh(PathOrigin::Manual);
        Some(removed)
    }

    /// Shrink the path back to its start cell.
    pub fn reset(&mut self) {
        if let Some(path) = &mut self.path {
            path.reset();
            self.refresh(PathOrigin::Manual);
        }
    }

    /// Forget the start cell and the path.
    pub fn clear(&mut self) {
        self.path = None;
        self.origin = PathOrigin::Manual;
        self.last = None;
        self.reveal = None;
        self.playback.unload();
    }

    // ── Automatic generation ───────────────────────────────────────

    /// Run the generation pipeline from the selected start and install
    /// the result.
    pub fn generate(&mut self, mode: Mode) -> Result<&Generation, EngineError> {
        let start = self.start().ok_or(EngineError::NoStartCell)?;
        let generation = pipeline::generate(
            &self.grid,
            start,
            mode,
            &self.config,
            &mut self.rng,
            &CancelToken::new(),
        )?;
        self.adopt(generation)
    }

    /// Install a generation produced elsewhere.
    ///
    /// Fails with [`EngineError::StaleGeneration`] if it does not start at
    /// the selected start cell or leaves the current grid.
    pub fn adopt(&mut self, generation: Generation) -> Result<&Generation, EngineError> {
        let start = self.start().ok_or(EngineError::NoStartCell)?;
        let fits = generation.path.start() == start
            && generation.coverage.total == self.grid.cell_count()
            && generation.path.cells().iter().all(|c| self.grid.contains(c));
        if !fits {
            return Err(EngineError::StaleGeneration);
        }
        self.path = Some(generation.path.clone());
        self.refresh(PathOrigin::Generated);
        self.reveal = Some(Reveal::new(generation.path.len()));
        let stored = self.last.insert(generation);
        Ok(&*stored)
    }

    /// Reload playback after a path change.
    fn refresh(&mut self, origin: PathOrigin) {
        let cells = self.path.as_ref().map_or(&[][..], Path::cells);
        self.playback.load(&self.grid, cells);
        self.origin = origin;
        self.last = None;
        self.reveal = None;
    }

    // ── Reveal ─────────────────────────────────────────────────────

    /// Advance the reveal schedule. Returns the visible prefix length.
    pub fn advance_reveal(&mut self, elapsed: Duration) -> usize {
        match &mut self.reveal {
            Some(reveal) => reveal.advance(elapsed),
            None => self.path().len(),
        }
    }

    /// The part of the path currently revealed.
    pub fn visible_path(&self) -> &[Cell] {
        let cells = self.path();
        let shown = self.reveal.as_ref().map_or(cells.len(), Reveal::visible);
        &cells[..shown.min(cells.len())]
    }

    // ── Playback ───────────────────────────────────────────────────

    /// Start playback from the first cell. Finishes any pending reveal.
    pub fn play(&mut self) -> Result<Frame, EngineError> {
        if let Some(reveal) = &mut self.reveal {
            reveal.finish();
        }
        Ok(self.playback.start()?)
    }

    /// Pause playback. Returns whether the phase changed.
    pub fn pause(&mut self) -> bool {
        self.playback.pause()
    }

    /// Resume playback. Returns whether the phase changed.
    pub fn resume(&mut self) -> bool {
        self.playback.resume()
    }

    /// Stop playback and return the marker to the start.
    pub fn stop(&mut self) {
        self.playback.stop();
    }

    /// Current playback phase.
    pub fn playback_phase(&self) -> PlaybackPhase {
        self.playback.phase()
    }

    /// Advance playback by one nominal frame.
    pub fn tick(&mut self) -> Option<PlaybackEvent> {
        self.playback.tick()
    }

    /// Advance playback by real elapsed time.
    pub fn advance(&mut self, elapsed: Duration) -> Option<PlaybackEvent> {
        self.playback.advance(elapsed)
    }

    /// Interpolated marker position while playing or paused.
    pub fn marker(&self) -> Option<Position> {
        self.playback.marker()
    }

    /// Change playback speed. The marker keeps its position.
    pub fn set_playback_config(&mut self, config: PlaybackConfig) -> Result<(), EngineError> {
        config.validate()?;
        self.config.playback = config.clone();
        self.playback.set_config(config);
        Ok(())
    }
}
