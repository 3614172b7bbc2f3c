//! Problem representation.
//!
//! - [`Point`] and [`Tour`]: labeled points and closed routes with cached length
//! - [`construct`]: random and nearest-neighbor tour construction
//! - [`loader`]: TSPLIB `EUC_2D` parser

pub mod construct;
pub mod loader;
mod types;

pub use construct::{nearest_neighbor_tour, random_tour};
pub use loader::{load_problem, parse_problem, LoadError};
pub use types::{route_length, Point, Tour, TourError};
