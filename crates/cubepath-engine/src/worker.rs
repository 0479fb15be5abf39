//! Background path generation.
//!
//! [`GenerationWorker`] runs the [`generate()`](crate::generate) pipeline
//! on a dedicated thread so a host can keep rendering while a slow
//! complete-mode search runs. Requests go in over a bounded channel and
//! results come back over another, each tagged with a [`Ticket`].
//!
//! Only the newest request matters: submitting cancels the search in
//! flight, results carrying an older ticket are discarded on receipt,
//! and a full result queue evicts its oldest entry to make room. The
//! worker owns its own random generator, so a seeded worker produces the
//! same sequence of paths for the same sequence of requests that run to
//! completion.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, Sender, TryRecvError, TrySendError};
use cubepath_core::Cell;
use cubepath_grid::Grid;
use cubepath_search::{CancelToken, Mode};
use rand_chacha::ChaCha8Rng;

use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::pipeline::{generate, Generation};
use crate::session::Session;

/// Queue depth for both directions.
const CHANNEL_CAPACITY: usize = 4;

/// How long the worker blocks on an empty queue before rechecking the
/// shutdown flag.
const IDLE_POLL: Duration = Duration::from_millis(20);

/// Identifies one submitted request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Ticket(pub u64);

/// A finished request.
#[derive(Clone, Debug, PartialEq)]
pub struct GenerationResult {
    /// The request this answers.
    pub ticket: Ticket,
    /// Pipeline outcome.
    pub outcome: Result<Generation, EngineError>,
}

struct Job {
    ticket: Ticket,
    grid: Arc<Grid>,
    start: Cell,
    mode: Mode,
    cancel: CancelToken,
}

/// Handle to the background generation thread.
///
/// Dropping the handle shuts the thread down and joins it.
pub struct GenerationWorker {
    requests: Option<Sender<Job>>,
    results: Receiver<GenerationResult>,
    in_flight: Option<(Ticket, CancelToken)>,
    next_ticket: u64,
    shutdown_flag: Arc<AtomicBool>,
    thread: Option<JoinHandle<()>>,
}

impl GenerationWorker {
    /// Validate `config` and start the worker thread.
    pub fn spawn(config: EngineConfig) -> Result<Self, EngineError> {
        config.validate()?;
        let (req_tx, req_rx) = bounded::<Job>(CHANNEL_CAPACITY);
        let (res_tx, res_rx) = bounded::<GenerationResult>(CHANNEL_CAPACITY);
        let shutdown_flag = Arc::new(AtomicBool::new(false));
        let rng = config.rng();

        let worker_shutdown = Arc::clone(&shutdown_flag);
        let backlog = res_rx.clone();
        let thread = thread::Builder::new()
            .name("cubepath-generate".into())
            .spawn(move || worker_loop(config, rng, req_rx, res_tx, backlog, worker_shutdown))
            .map_err(|e| EngineError::ThreadSpawnFailed {
                reason: e.to_string(),
            })?;

        Ok(Self {
            requests: Some(req_tx),
            results: res_rx,
            in_flight: None,
            next_ticket: 0,
            shutdown_flag,
            thread: Some(thread),
        })
    }

    /// Queue a request, cancelling the one in flight.
    pub fn submit(
        &mut self,
        grid: Arc<Grid>,
        start: Cell,
        mode: Mode,
    ) -> Result<Ticket, EngineError> {
        let requests = self.requests.as_ref().ok_or(EngineError::WorkerShutdown)?;
        if let Some((_, cancel)) = self.in_flight.take() {
            cancel.cancel();
        }
        let ticket = Ticket(self.next_ticket);
        self.next_ticket += 1;
        let cancel = CancelToken::new();
        let job = Job {
            ticket,
            grid,
            start,
            mode,
            cancel: cancel.clone(),
        };
        // A full queue only holds cancelled jobs; the worker drains them
        // without searching, so a blocking send returns promptly.
        requests
            .send(job)
            .map_err(|_| EngineError::WorkerShutdown)?;
        self.in_flight = Some((ticket, cancel));
        tracing::debug!(ticket = ticket.0, %mode, %start, "generation submitted");
        Ok(ticket)
    }

    /// Queue a request for `session`'s grid and start cell.
    pub fn submit_for(&mut self, session: &Session, mode: Mode) -> Result<Ticket, EngineError> {
        let start = session.start().ok_or(EngineError::NoStartCell)?;
        self.submit(Arc::new(session.grid().clone()), start, mode)
    }

    /// Ticket of the request still awaiting a result.
    pub fn pending(&self) -> Option<Ticket> {
        self.in_flight.as_ref().map(|(t, _)| *t)
    }

    /// Cancel the request in flight. Its result, if any, is discarded.
    pub fn cancel(&mut self) {
        if let Some((ticket, cancel)) = self.in_flight.take() {
            cancel.cancel();
            tracing::debug!(ticket = ticket.0, "generation cancelled");
        }
    }

    /// The current request's result, if it is ready.
    pub fn try_recv(&mut self) -> Option<GenerationResult> {
        loop {
            match self.results.try_recv() {
                Ok(result) => {
                    if let Some(result) = self.accept(result) {
                        return Some(result);
                    }
                }
                Err(TryRecvError::Empty | TryRecvError::Disconnected) => return None,
            }
        }
    }

    /// Wait up to `timeout` for the current request's result.
    pub fn recv_timeout(&mut self, timeout: Duration) -> Option<GenerationResult> {
        let deadline = Instant::now() + timeout;
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match self.results.recv_timeout(remaining) {
                Ok(result) => {
                    if let Some(result) = self.accept(result) {
                        return Some(result);
                    }
                }
                Err(RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected) => return None,
            }
        }
    }

    fn accept(&mut self, result: GenerationResult) -> Option<GenerationResult> {
        match &self.in_flight {
            Some((ticket, _)) if *ticket == result.ticket => {
                self.in_flight = None;
                Some(result)
            }
            _ => {
                tracing::debug!(ticket = result.ticket.0, "stale generation result discarded");
                None
            }
        }
    }

    /// Whether the worker thread is still accepting requests.
    pub fn is_running(&self) -> bool {
        self.requests.is_some() && !self.shutdown_flag.load(Ordering::Acquire)
    }

    /// Stop the worker and join its thread. Idempotent.
    ///
    /// Returns whether the thread was joined cleanly.
    pub fn shutdown(&mut self) -> bool {
        self.shutdown_flag.store(true, Ordering::Release);
        self.cancel();
        self.requests = None;
        match self.thread.take() {
            Some(handle) => {
                let joined = handle.join().is_ok();
                if !joined {
                    tracing::warn!("generation worker panicked");
                }
                joined
            }
            None => true,
        }
    }
}

impl Drop for GenerationWorker {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Queue `result`, evicting older results while the queue is full.
///
/// Returns `false` once the handle is gone.
fn publish(
    results: &Sender<GenerationResult>,
    backlog: &Receiver<GenerationResult>,
    mut result: GenerationResult,
) -> bool {
    loop {
        match results.try_send(result) {
            Ok(()) => return true,
            Err(TrySendError::Full(back)) => {
                // Everything queued answers an older ticket.
                if let Ok(stale) = backlog.try_recv() {
                    tracing::debug!(ticket = stale.ticket.0, "stale result evicted");
                }
                result = back;
            }
            Err(TrySendError::Disconnected(_)) => return false,
        }
    }
}

fn worker_loop(
    config: EngineConfig,
    mut rng: ChaCha8Rng,
    requests: Receiver<Job>,
    results: Sender<GenerationResult>,
    backlog: Receiver<GenerationResult>,
    shutdown_flag: Arc<AtomicBool>,
) {
    while !shutdown_flag.load(Ordering::Acquire) {
        let mut job = match requests.recv_timeout(IDLE_POLL) {
            Ok(job) => job,
            Err(RecvTimeoutError::Timeout) => continue,
            Err(RecvTimeoutError::Disconnected) => break,
        };
        // Skip to the newest queued request.
        while let Ok(newer) = requests.try_recv() {
            job = newer;
        }
        if job.cancel.is_cancelled() {
            continue;
        }

        let outcome = generate(&job.grid, job.start, job.mode, &config, &mut rng, &job.cancel)
            .map_err(EngineError::from);
        if job.cancel.is_cancelled() {
            tracing::debug!(ticket = job.ticket.0, "cancelled generation dropped");
            continue;
        }
        let result = GenerationResult {
            ticket: job.ticket,
            outcome,
        };
        if !publish(&results, &backlog, result) {
            break;
        }
    }
    tracing::debug!("generation worker stopped");
}
