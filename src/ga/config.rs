//! GA configuration.
//!
//! [`GaConfig`] holds the operator parameters of one population. It is built
//! once per run and shared read-only by every worker.

use crate::error::ConfigError;

/// Configuration for the population engine.
///
/// # Defaults
///
/// ```
/// use u_tsp::ga::GaConfig;
///
/// let config = GaConfig::default();
/// assert_eq!(config.population_size, 20);
/// assert_eq!(config.selection_size, 4);
/// assert_eq!(config.mutation_rate, 2);
/// assert!(config.elitism);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_tsp::ga::GaConfig;
///
/// let config = GaConfig::default()
///     .with_population_size(100)
///     .with_selection_size(7)
///     .with_mutation_rate(3)
///     .with_nearest_neighbor_seed(true);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GaConfig {
    /// Number of tours in the population.
    pub population_size: usize,

    /// Tournament sample size.
    ///
    /// Members are drawn with replacement, so the same tour may appear in a
    /// sample more than once. Must not exceed `population_size`.
    pub selection_size: usize,

    /// Per-position swap probability in percent (0–100).
    ///
    /// Every interior position of a child is visited once and swapped with
    /// a random interior position with this probability.
    pub mutation_rate: u32,

    /// Carry the previous fittest tour unchanged into slot 0.
    pub elitism: bool,

    /// Seed slot 0 of the initial population with the nearest-neighbor tour.
    pub nearest_neighbor_seed: bool,

    /// Whether swap mutation may pick the same position twice (a no-op).
    ///
    /// When `false` the second position is redrawn until it differs.
    pub allow_self_swap: bool,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 20,
            selection_size: 4,
            mutation_rate: 2,
            elitism: true,
            nearest_neighbor_seed: false,
            allow_self_swap: true,
            seed: None,
        }
    }
}

impl GaConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the tournament sample size.
    pub fn with_selection_size(mut self, k: usize) -> Self {
        self.selection_size = k;
        self
    }

    /// Sets the mutation rate in percent.
    pub fn with_mutation_rate(mut self, percent: u32) -> Self {
        self.mutation_rate = percent;
        self
    }

    /// Enables or disables elitism.
    pub fn with_elitism(mut self, elitism: bool) -> Self {
        self.elitism = elitism;
        self
    }

    /// Enables or disables nearest-neighbor seeding.
    pub fn with_nearest_neighbor_seed(mut self, seed: bool) -> Self {
        self.nearest_neighbor_seed = seed;
        self
    }

    /// Allows or forbids self-swaps in mutation.
    pub fn with_allow_self_swap(mut self, allow: bool) -> Self {
        self.allow_self_swap = allow;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.population_size == 0 {
            return Err(ConfigError::PopulationSize);
        }
        if self.selection_size == 0 || self.selection_size > self.population_size {
            return Err(ConfigError::SelectionSize {
                selection_size: self.selection_size,
                population_size: self.population_size,
            });
        }
        if self.mutation_rate > 100 {
            return Err(ConfigError::MutationRate(self.mutation_rate));
        }
        Ok(())
    }
}
