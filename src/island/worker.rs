//! Worker: one population evolving on its own thread.
//!
//! Each loop iteration does exactly one of, in priority order:
//!
//! 1. stop, if a stop request is pending
//! 2. consider one incoming improvement
//! 3. evolve one generation, reporting the new fittest if it improved
//!
//! Steps 1 and 2 never block. Reporting waits on the report channel, the
//! stop channel, and the improvement channel together, so a full report
//! buffer can delay a worker but never hide a stop request from it.

use crossbeam_channel::{select, Receiver, Sender, TryRecvError};
use rand::rngs::StdRng;
use tracing::instrument;

use crate::ga::{GaConfig, Population};
use crate::tsp::Tour;

/// Counters collected by a worker over its lifetime.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkerStats {
    /// Worker index.
    pub worker: usize,
    /// Generations evolved.
    pub generations: u64,
    /// Local improvements delivered to the coordinator.
    pub reports_sent: u64,
    /// Incoming tours that replaced the local fittest.
    pub improvements_adopted: u64,
    /// Incoming tours that were not shorter than the local fittest.
    pub improvements_ignored: u64,
    /// Length of the local fittest when the worker stopped.
    pub best_length: u64,
}

/// The worker's ends of its four channels.
pub(crate) struct WorkerChannels {
    pub(crate) improvements: Receiver<Tour>,
    pub(crate) reports: Sender<Tour>,
    pub(crate) stop: Receiver<()>,
    pub(crate) ack: Sender<()>,
}

pub(crate) struct Worker {
    index: usize,
    population: Population,
    config: GaConfig,
    rng: StdRng,
    stats: WorkerStats,
}

impl Worker {
    pub(crate) fn new(index: usize, population: Population, config: GaConfig, rng: StdRng) -> Self {
        Self {
            index,
            population,
            config,
            rng,
            stats: WorkerStats {
                worker: index,
                ..WorkerStats::default()
            },
        }
    }

    pub(crate) fn index(&self) -> usize {
        self.index
    }

    /// Runs until stopped, then closes the report channel and acknowledges.
    #[instrument(level = "debug", skip_all, fields(worker = self.index))]
    pub(crate) fn run(mut self, channels: WorkerChannels) -> WorkerStats {
        tracing::debug!(
            fittest = self.population.fittest().length(),
            "worker started"
        );
        loop {
            match channels.stop.try_recv() {
                Ok(()) | Err(TryRecvError::Disconnected) => break,
                Err(TryRecvError::Empty) => {}
            }

            if let Ok(tour) = channels.improvements.try_recv() {
                self.receive(tour);
                continue;
            }

            if self.step() && !self.report(&channels) {
                break;
            }
        }
        self.finish(channels)
    }

    /// Evolves one generation. Returns whether the fittest got shorter.
    fn step(&mut self) -> bool {
        let before = self.population.fittest().length();
        self.population = self.population.evolve(&self.config, &mut self.rng);
        self.stats.generations += 1;
        self.population.fittest().length() < before
    }

    fn receive(&mut self, tour: Tour) {
        let length = tour.length();
        if self.population.adopt(tour) {
            self.stats.improvements_adopted += 1;
            tracing::trace!(length, "adopted improvement");
        } else {
            self.stats.improvements_ignored += 1;
        }
    }

    /// Sends the current fittest to the coordinator.
    ///
    /// Returns `false` if the worker must stop instead.
    fn report(&mut self, channels: &WorkerChannels) -> bool {
        loop {
            select! {
                send(channels.reports, self.population.fittest().clone()) -> res => {
                    if res.is_err() {
                        return false;
                    }
                    self.stats.reports_sent += 1;
                    return true;
                }
                recv(channels.stop) -> _ => return false,
                recv(channels.improvements) -> msg => match msg {
                    Ok(tour) => self.receive(tour),
                    Err(_) => return false,
                },
            }
        }
    }

    fn finish(mut self, channels: WorkerChannels) -> WorkerStats {
        let WorkerChannels { reports, ack, .. } = channels;
        drop(reports);

        self.stats.best_length = self.population.fittest().length();
        tracing::debug!(
            generations = self.stats.generations,
            reports = self.stats.reports_sent,
            adopted = self.stats.improvements_adopted,
            best = self.stats.best_length,
            "worker stopped"
        );
        if ack.send(()).is_err() {
            tracing::debug!("coordinator left before stop was acknowledged");
        }
        self.stats
    }
}
