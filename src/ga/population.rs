//! Population engine.
//!
//! A [`Population`] is a fixed-size set of tours plus the index of the
//! fittest one. [`Population::evolve`] never edits the current generation;
//! it breeds a complete replacement:
//!
//! elite copy (optional) → tournament selection ×2 → ordered crossover →
//! swap mutation → length evaluation → fittest scan.

use rand::Rng;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::config::GaConfig;
use super::operators::{order_crossover, swap_mutation};
use super::selection::tournament;
use crate::error::{Error, Result};
use crate::tsp::{nearest_neighbor_tour, random_tour, Point, Tour};

/// One generation of candidate tours.
#[derive(Debug, Clone)]
pub struct Population {
    individuals: Vec<Tour>,
    fittest: usize,
}

impl Population {
    /// Builds the initial population.
    ///
    /// With [`GaConfig::nearest_neighbor_seed`] slot 0 holds the
    /// nearest-neighbor tour; every other slot is a random tour.
    ///
    /// # Errors
    /// [`Error::TooFewPoints`] with fewer than 2 points, [`Error::Config`]
    /// if the configuration is invalid (e.g. `population_size == 0`).
    pub fn initialize<R: Rng>(points: &[Point], config: &GaConfig, rng: &mut R) -> Result<Self> {
        if points.len() < 2 {
            return Err(Error::TooFewPoints(points.len()));
        }
        config.validate()?;

        let mut individuals = Vec::with_capacity(config.population_size);
        if config.nearest_neighbor_seed {
            individuals.push(nearest_neighbor_tour(points));
        }
        while individuals.len() < config.population_size {
            individuals.push(random_tour(points, rng));
        }

        Ok(Self::from_tours(individuals))
    }

    /// Wraps an existing set of tours, returning `None` if it is empty.
    pub fn from_individuals(individuals: Vec<Tour>) -> Option<Self> {
        if individuals.is_empty() {
            None
        } else {
            Some(Self::from_tours(individuals))
        }
    }

    fn from_tours(individuals: Vec<Tour>) -> Self {
        let fittest = find_fittest(&individuals);
        Self {
            individuals,
            fittest,
        }
    }

    /// The shortest tour; the earliest slot wins ties.
    pub fn fittest(&self) -> &Tour {
        &self.individuals[self.fittest]
    }

    pub fn individuals(&self) -> &[Tour] {
        &self.individuals
    }

    pub fn len(&self) -> usize {
        self.individuals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }

    /// Breeds the next generation.
    ///
    /// With elitism slot 0 is a copy of the current fittest, and because the
    /// fittest scan prefers earlier slots the fittest length can never grow
    /// from one generation to the next.
    pub fn evolve<R: Rng>(&self, config: &GaConfig, rng: &mut R) -> Population {
        let size = self.individuals.len();
        let elite = usize::from(config.elitism).min(size);

        let routes: Vec<Vec<Point>> = (elite..size)
            .map(|_| {
                let p1 = tournament(&self.individuals, config.selection_size, rng);
                let p2 = tournament(&self.individuals, config.selection_size, rng);
                let mut child = order_crossover(
                    self.individuals[p1].route(),
                    self.individuals[p2].route(),
                    rng,
                );
                swap_mutation(&mut child, config.mutation_rate, config.allow_self_swap, rng);
                child
            })
            .collect();

        let mut individuals = Vec::with_capacity(size);
        if elite > 0 {
            individuals.push(self.fittest().clone());
        }
        individuals.extend(evaluate(routes));

        Self::from_tours(individuals)
    }

    /// Adopts an externally found tour if it beats the current fittest.
    ///
    /// The tour overwrites slot 0 and becomes the fittest. Returns whether it
    /// was adopted; a tour that is not strictly shorter is dropped.
    pub fn adopt(&mut self, tour: Tour) -> bool {
        if tour.length() >= self.fittest().length() {
            return false;
        }
        self.individuals[0] = tour;
        self.fittest = 0;
        true
    }
}

/// Builds tours from bred routes, computing their lengths.
#[cfg(feature = "parallel")]
fn evaluate(routes: Vec<Vec<Point>>) -> Vec<Tour> {
    routes.into_par_iter().map(Tour::new).collect()
}

#[cfg(not(feature = "parallel"))]
fn evaluate(routes: Vec<Vec<Point>>) -> Vec<Tour> {
    routes.into_iter().map(Tour::new).collect()
}

/// Index of the first tour with the minimum length.
fn find_fittest(individuals: &[Tour]) -> usize {
    let mut best = 0;
    for (idx, tour) in individuals.iter().enumerate().skip(1) {
        if tour.length() < individuals[best].length() {
            best = idx;
        }
    }
    best
}

// ============================================================================
// Tests
// ============================================================================
