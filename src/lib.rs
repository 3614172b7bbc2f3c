//! Island-model genetic search for the Euclidean Traveling Salesman Problem.
//!
//! Several independent populations evolve concurrently, each on its own
//! thread. Whenever one of them finds a tour shorter than anything seen so
//! far, the coordinator forwards it to all the others, so weak populations
//! can build on the progress of strong ones.
//!
//! - **[`tsp`]**: Points, closed tours, tour construction, TSPLIB loading.
//! - **[`ga`]**: Population engine with tournament selection, ordered
//!   crossover, swap mutation, and elitism.
//! - **[`island`]**: Workers, coordinator, deadline and goal handling,
//!   two-phase shutdown.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use u_tsp::ga::GaConfig;
//! use u_tsp::island::{solve, SearchConfig};
//! use u_tsp::tsp::Point;
//!
//! let points = vec![
//!     Point::new(1, 0.0, 0.0),
//!     Point::new(2, 10.0, 0.0),
//!     Point::new(3, 10.0, 10.0),
//!     Point::new(4, 0.0, 10.0),
//! ];
//! let config = SearchConfig::default()
//!     .with_ga(GaConfig::default().with_population_size(10))
//!     .with_num_workers(2)
//!     .with_goal(40)
//!     .with_deadline(Duration::from_secs(5));
//!
//! let result = solve(&points, &config).unwrap();
//! assert_eq!(result.best.length(), 40);
//! ```

pub mod error;
pub mod ga;
pub mod island;
pub mod tsp;

pub use error::{ConfigError, Error, Result};
