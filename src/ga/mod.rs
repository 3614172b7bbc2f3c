//! Genetic Algorithm population engine for closed tours.
//!
//! One [`Population`] is advanced one generation at a time by
//! [`Population::evolve`]. The engine is single-threaded; concurrency lives
//! in [`crate::island`], which runs one population per worker.
//!
//! # Key Types
//!
//! - [`GaConfig`]: Operator parameters (population size, tournament size,
//!   mutation rate, elitism, seeding)
//! - [`Population`]: Fixed-size set of tours with cached fittest
//!
//! # Submodules
//!
//! - [`operators`]: Fixed-origin ordered crossover and swap mutation
//! - [`selection`]: Tournament selection
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*

mod config;
pub mod operators;
mod population;
pub mod selection;

pub use config::GaConfig;
pub use population::Population;
