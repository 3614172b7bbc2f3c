//! Coordinator: spawns the workers, merges their reports, and stops them.
//!
//! [`Coordinator::run`] orchestrates the complete search:
//! validation → initial populations → spawn → fan-in loop → shutdown.
//!
//! The fan-in loop blocks on a single [`Select`] built once from the runtime
//! worker count: one receive operation per worker report channel plus one
//! for the deadline timer. Every strict improvement of the global best is
//! forwarded to all workers except the one that found it.

use std::fmt;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crossbeam_channel::{after, bounded, never, Receiver, RecvTimeoutError, Select, Sender};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::instrument;

use super::config::SearchConfig;
use super::worker::{Worker, WorkerChannels, WorkerStats};
use crate::error::{ConfigError, Error, Result};
use crate::ga::Population;
use crate::tsp::{nearest_neighbor_tour, Point, Tour};

/// Why the fan-in loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// The wall-clock deadline elapsed.
    Deadline,
    /// The global best reached the goal length.
    GoalReached,
}

/// Result of a search.
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// The shortest tour seen by the coordinator.
    pub best: Tour,

    /// Worker that reported `best`; `None` if it came from an initial
    /// population and no worker ever improved on it.
    pub best_worker: Option<usize>,

    /// Wall-clock time from start to the last acknowledged stop.
    pub elapsed: Duration,

    /// Why the search ended.
    pub termination: Termination,

    /// The goal length in effect, explicit or derived.
    pub goal: Option<u64>,

    /// Number of global improvements accepted.
    pub improvements: usize,

    /// Per-worker counters, in worker order.
    pub workers: Vec<WorkerStats>,
}

impl fmt::Display for SearchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "final result: {} (worked {} s)",
            self.best.length(),
            self.elapsed.as_secs_f64()
        )
    }
}

/// Runs a concurrent search.
///
/// # Usage
///
/// ```no_run
/// use std::time::Duration;
/// use u_tsp::island::{Coordinator, SearchConfig};
/// use u_tsp::tsp::load_problem;
///
/// let points = load_problem("berlin52.tsp").unwrap();
/// let config = SearchConfig::default()
///     .with_num_workers(4)
///     .with_deadline(Duration::from_secs(30));
/// let result = Coordinator::run(&points, &config).unwrap();
/// println!("{}", result.best);
/// ```
pub struct Coordinator;

impl Coordinator {
    /// Runs the search until the deadline or the goal.
    ///
    /// # Errors
    /// Input and configuration errors are returned before any worker is
    /// spawned. After that only broken coordination is an error: a worker
    /// that vanished, panicked, or did not acknowledge its stop.
    #[instrument(
        level = "info",
        skip_all,
        fields(points = points.len(), workers = config.num_workers)
    )]
    pub fn run(points: &[Point], config: &SearchConfig) -> Result<SearchResult> {
        if points.len() < 2 {
            return Err(Error::TooFewPoints(points.len()));
        }
        config.validate()?;
        let started = Instant::now();

        let mut best: Option<GlobalBest> = None;
        let mut islands = Vec::with_capacity(config.num_workers);
        for index in 0..config.num_workers {
            let mut rng = worker_rng(config.ga.seed, index);
            let population = Population::initialize(points, &config.ga, &mut rng)?;
            let fittest = population.fittest();
            if best.as_ref().is_none_or(|b| fittest.length() < b.tour.length()) {
                best = Some(GlobalBest::initial(fittest.clone()));
            }
            islands.push(Worker::new(index, population, config.ga.clone(), rng));
        }
        let Some(mut best) = best else {
            return Err(Error::Config(ConfigError::NumWorkers));
        };

        let goal = match (config.goal, config.deadline) {
            (Some(goal), _) => Some(goal),
            (None, None) => Some(nearest_neighbor_tour(points).length()),
            (None, Some(_)) => None,
        };
        tracing::info!(
            goal = ?goal,
            deadline = ?config.deadline,
            initial = best.tour.length(),
            "starting search"
        );

        let mut handles = Vec::with_capacity(config.num_workers);
        for worker in islands {
            match spawn_worker(worker, config) {
                Ok(handle) => handles.push(handle),
                Err(err) => {
                    // Stop whatever is already running before bailing out.
                    let _ = shutdown(handles, config.shutdown_timeout, &mut best);
                    return Err(err);
                }
            }
        }

        let outcome = if goal.is_some_and(|g| best.tour.length() <= g) {
            Ok(Termination::GoalReached)
        } else {
            fan_in(&handles, config.deadline, goal, &mut best)
        };

        tracing::debug!("sending stop to all workers");
        let workers = shutdown(handles, config.shutdown_timeout, &mut best);
        let termination = outcome?;
        let workers = workers?;

        let result = SearchResult {
            best: best.tour,
            best_worker: best.worker,
            elapsed: started.elapsed(),
            termination,
            goal,
            improvements: best.improvements,
            workers,
        };
        tracing::info!(
            length = result.best.length(),
            ?termination,
            elapsed = ?result.elapsed,
            "search finished"
        );
        Ok(result)
    }
}

/// Convenience wrapper for [`Coordinator::run`].
pub fn solve(points: &[Point], config: &SearchConfig) -> Result<SearchResult> {
    Coordinator::run(points, config)
}

/// Coordinator-owned running minimum.
struct GlobalBest {
    tour: Tour,
    worker: Option<usize>,
    improvements: usize,
}

impl GlobalBest {
    fn initial(tour: Tour) -> Self {
        Self {
            tour,
            worker: None,
            improvements: 0,
        }
    }

    /// Keeps `tour` if strictly shorter. Returns whether it was kept.
    fn offer(&mut self, tour: &Tour, worker: usize) -> bool {
        if tour.length() >= self.tour.length() {
            return false;
        }
        self.tour = tour.clone();
        self.worker = Some(worker);
        self.improvements += 1;
        true
    }
}

/// Coordinator's ends of one worker's channels.
struct WorkerHandle {
    index: usize,
    improvements: Sender<Tour>,
    reports: Receiver<Tour>,
    stop: Sender<()>,
    ack: Receiver<()>,
    thread: JoinHandle<WorkerStats>,
}

fn worker_rng(seed: Option<u64>, index: usize) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(index as u64)),
        None => StdRng::seed_from_u64(rand::random()),
    }
}

fn spawn_worker(worker: Worker, config: &SearchConfig) -> Result<WorkerHandle> {
    let index = worker.index();
    let (improvements_tx, improvements_rx) = bounded(config.improvement_capacity);
    let (reports_tx, reports_rx) = bounded(config.report_capacity);
    let (stop_tx, stop_rx) = bounded(1);
    let (ack_tx, ack_rx) = bounded(1);

    let channels = WorkerChannels {
        improvements: improvements_rx,
        reports: reports_tx,
        stop: stop_rx,
        ack: ack_tx,
    };
    let thread = thread::Builder::new()
        .name(format!("u-tsp-worker-{index}"))
        .spawn(move || worker.run(channels))
        .map_err(|source| Error::WorkerSpawn {
            worker: index,
            source,
        })?;

    Ok(WorkerHandle {
        index,
        improvements: improvements_tx,
        reports: reports_rx,
        stop: stop_tx,
        ack: ack_rx,
        thread,
    })
}

/// Waits on every report channel and the deadline until a stopping rule fires.
fn fan_in(
    handles: &[WorkerHandle],
    deadline: Option<Duration>,
    goal: Option<u64>,
    best: &mut GlobalBest,
) -> Result<Termination> {
    let timer = match deadline {
        Some(d) => after(d),
        None => never(),
    };

    let mut sel = Select::new();
    for handle in handles {
        sel.recv(&handle.reports);
    }
    let timer_op = sel.recv(&timer);

    loop {
        let oper = sel.select();
        let from = oper.index();
        if from == timer_op {
            let _ = oper.recv(&timer);
            tracing::info!("deadline reached");
            return Ok(Termination::Deadline);
        }

        let tour = oper
            .recv(&handles[from].reports)
            .map_err(|_| Error::WorkerDisconnected(from))?;
        if !best.offer(&tour, from) {
            continue;
        }
        tracing::info!(worker = from, length = tour.length(), "new global best");

        for other in handles.iter().filter(|h| h.index != from) {
            other
                .improvements
                .send(tour.clone())
                .map_err(|_| Error::WorkerDisconnected(other.index))?;
        }

        if goal.is_some_and(|g| tour.length() <= g) {
            tracing::info!(goal = ?goal, "goal reached");
            return Ok(Termination::GoalReached);
        }
    }
}

/// Stops every worker, one after another.
///
/// All workers are asked to stop even if one of them fails; the first
/// failure is returned.
fn shutdown(
    handles: Vec<WorkerHandle>,
    timeout: Duration,
    best: &mut GlobalBest,
) -> Result<Vec<WorkerStats>> {
    let mut stats = Vec::with_capacity(handles.len());
    let mut first_err = None;
    for handle in handles {
        match shutdown_worker(handle, timeout, best) {
            Ok(s) => stats.push(s),
            Err(err) => {
                tracing::warn!(error = %err, "worker shutdown failed");
                first_err.get_or_insert(err);
            }
        }
    }
    match first_err {
        Some(err) => Err(err),
        None => Ok(stats),
    }
}

/// Stops one worker: request, drain, acknowledge, drain to close, join.
fn shutdown_worker(
    handle: WorkerHandle,
    timeout: Duration,
    best: &mut GlobalBest,
) -> Result<WorkerStats> {
    let WorkerHandle {
        index,
        improvements,
        reports,
        stop,
        ack,
        thread,
    } = handle;

    // The stop slot is empty until now, so this only fails if the worker is gone.
    let _ = stop.send(());
    if let Ok(tour) = reports.try_recv() {
        best.offer(&tour, index);
    }

    match ack.recv_timeout(timeout) {
        Ok(()) => {}
        Err(RecvTimeoutError::Timeout) => {
            return Err(Error::ShutdownTimeout {
                worker: index,
                timeout,
            });
        }
        Err(RecvTimeoutError::Disconnected) => {
            return Err(match thread.join() {
                Ok(_) => Error::WorkerDisconnected(index),
                Err(_) => Error::WorkerPanicked(index),
            });
        }
    }

    // The worker closed its report channel before acknowledging.
    for tour in reports.iter() {
        best.offer(&tour, index);
    }
    drop(improvements);

    let stats = thread.join().map_err(|_| Error::WorkerPanicked(index))?;
    tracing::debug!(worker = index, generations = stats.generations, "worker joined");
    Ok(stats)
}

// ============================================================================
// Tests
// ============================================================================
