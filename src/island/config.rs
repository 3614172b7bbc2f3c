//! Search configuration.
//!
//! [`SearchConfig`] wraps the per-population [`GaConfig`] with the
//! parameters of the multi-worker search: worker count, stopping rules, and
//! channel sizing.

use std::time::Duration;

use crate::error::ConfigError;
use crate::ga::GaConfig;

/// Configuration for a concurrent search.
///
/// # Stopping rules
///
/// - `deadline`: wall-clock limit measured by the coordinator
/// - `goal`: stop as soon as the global best is at or below this length
///
/// With neither set, the goal defaults to the length of the nearest-neighbor
/// tour of the problem.
///
/// ```
/// use std::time::Duration;
/// use u_tsp::ga::GaConfig;
/// use u_tsp::island::SearchConfig;
///
/// let config = SearchConfig::default()
///     .with_ga(GaConfig::default().with_population_size(50))
///     .with_num_workers(4)
///     .with_deadline(Duration::from_secs(10));
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchConfig {
    /// Operator parameters shared by every worker.
    pub ga: GaConfig,

    /// Number of concurrently evolving populations.
    pub num_workers: usize,

    /// Wall-clock limit. `None` disables time-based termination.
    pub deadline: Option<Duration>,

    /// Target length. `None` disables goal-based termination, unless the
    /// deadline is also `None` (see type docs).
    pub goal: Option<u64>,

    /// Buffer size of each worker's report channel.
    pub report_capacity: usize,

    /// Buffer size of each worker's improvement channel.
    pub improvement_capacity: usize,

    /// How long shutdown waits for each worker's acknowledgement.
    pub shutdown_timeout: Duration,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            ga: GaConfig::default(),
            num_workers: 1,
            deadline: None,
            goal: None,
            report_capacity: 50,
            improvement_capacity: 50,
            shutdown_timeout: Duration::from_secs(5),
        }
    }
}

impl SearchConfig {
    /// Sets the population engine configuration.
    pub fn with_ga(mut self, ga: GaConfig) -> Self {
        self.ga = ga;
        self
    }

    /// Sets the number of workers.
    pub fn with_num_workers(mut self, n: usize) -> Self {
        self.num_workers = n;
        self
    }

    /// Sets the wall-clock deadline.
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Sets the target length.
    pub fn with_goal(mut self, goal: u64) -> Self {
        self.goal = Some(goal);
        self
    }

    /// Sets the report channel buffer size.
    pub fn with_report_capacity(mut self, n: usize) -> Self {
        self.report_capacity = n;
        self
    }

    /// Sets the improvement channel buffer size.
    pub fn with_improvement_capacity(mut self, n: usize) -> Self {
        self.improvement_capacity = n;
        self
    }

    /// Sets the per-worker shutdown acknowledgement timeout.
    pub fn with_shutdown_timeout(mut self, timeout: Duration) -> Self {
        self.shutdown_timeout = timeout;
        self
    }

    /// Validates the configuration, including the nested [`GaConfig`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.ga.validate()?;
        if self.num_workers == 0 {
            return Err(ConfigError::NumWorkers);
        }
        if self.deadline == Some(Duration::ZERO) {
            return Err(ConfigError::ZeroDeadline);
        }
        if self.report_capacity == 0 {
            return Err(ConfigError::ChannelCapacity("report"));
        }
        if self.improvement_capacity == 0 {
            return Err(ConfigError::ChannelCapacity("improvement"));
        }
        if self.shutdown_timeout.is_zero() {
            return Err(ConfigError::ShutdownTimeout);
        }
        Ok(())
    }
}
