//! Error types.
//!
//! Input and configuration errors are reported before any worker thread is
//! spawned. The remaining variants describe broken coordination between the
//! coordinator and its workers; they are fatal and never retried.

use std::time::Duration;

use crate::tsp::loader::LoadError;

/// Crate-level result alias.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors returned by the search engine.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("a tour needs at least 2 points, got {0}")]
    TooFewPoints(usize),
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("failed to load problem: {0}")]
    Load(#[from] LoadError),
    #[error("failed to spawn worker {worker}: {source}")]
    WorkerSpawn {
        worker: usize,
        #[source]
        source: std::io::Error,
    },
    #[error("worker {0} disconnected before it was asked to stop")]
    WorkerDisconnected(usize),
    #[error("worker {worker} did not acknowledge stop within {timeout:?}")]
    ShutdownTimeout { worker: usize, timeout: Duration },
    #[error("worker {0} panicked")]
    WorkerPanicked(usize),
}

/// Rejected configuration values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("population_size must be at least 1")]
    PopulationSize,
    #[error("selection_size must be in 1..={population_size}, got {selection_size}")]
    SelectionSize {
        selection_size: usize,
        population_size: usize,
    },
    #[error("mutation_rate must be a percentage in 0..=100, got {0}")]
    MutationRate(u32),
    #[error("num_workers must be at least 1")]
    NumWorkers,
    #[error("deadline must be positive or None")]
    ZeroDeadline,
    #[error("{0} channel capacity must be at least 1")]
    ChannelCapacity(&'static str),
    #[error("shutdown_timeout must be positive")]
    ShutdownTimeout,
}
