//! Points and closed tours.
//!
//! A [`Tour`] owns its route and caches the route's length. The only way to
//! build one is [`Tour::new`], which computes the length from the route, so
//! the two can never disagree. Operators work on a private `Vec<Point>` and
//! wrap the result in a fresh `Tour` when done.

use std::collections::HashSet;
use std::fmt;

/// A labeled point in the plane.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    /// Unique label, as given in the problem file.
    pub id: u64,
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(id: u64, x: f64, y: f64) -> Self {
        Self { id, x, y }
    }

    /// Euclidean distance, truncated toward zero.
    pub fn distance(&self, other: &Point) -> u64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt() as u64
    }
}

/// Sum of consecutive distances along `route`.
///
/// `route` is expected to end where it starts, so the closing edge is
/// already one of the consecutive pairs. Saturates at `u64::MAX`.
pub fn route_length(route: &[Point]) -> u64 {
    route
        .windows(2)
        .map(|w| w[0].distance(&w[1]))
        .fold(0u64, u64::saturating_add)
}

/// A closed route over all points with its cached length.
///
/// # Examples
///
/// ```
/// use u_tsp::tsp::{Point, Tour};
///
/// let a = Point::new(1, 0.0, 0.0);
/// let b = Point::new(2, 3.0, 4.0);
/// let tour = Tour::new(vec![a, b, a]);
/// assert_eq!(tour.length(), 10);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Tour {
    route: Vec<Point>,
    length: u64,
}

impl Tour {
    /// Wraps a closed route, computing its length.
    pub fn new(route: Vec<Point>) -> Self {
        let length = route_length(&route);
        Self { route, length }
    }

    /// Total length including the closing edge.
    pub fn length(&self) -> u64 {
        self.length
    }

    /// The route, origin first and last.
    pub fn route(&self) -> &[Point] {
        &self.route
    }

    /// Number of distinct points visited.
    pub fn num_points(&self) -> usize {
        self.route.len().saturating_sub(1)
    }

    pub fn origin(&self) -> Option<&Point> {
        self.route.first()
    }

    /// Checks that this tour is a valid closed tour over `points`.
    ///
    /// `points[0]` is the origin. The tour must start and end there, visit
    /// every other point exactly once, and carry the correct length.
    pub fn verify(&self, points: &[Point]) -> Result<(), TourError> {
        let origin = points.first().ok_or(TourError::NoPoints)?;
        if self.route.len() < 2 {
            return Err(TourError::Empty);
        }
        let first = &self.route[0];
        let last = &self.route[self.route.len() - 1];
        if first.id != last.id {
            return Err(TourError::NotClosed {
                first: first.id,
                last: last.id,
            });
        }
        if first.id != origin.id {
            return Err(TourError::WrongOrigin(first.id));
        }

        let mut remaining: HashSet<u64> = points[1..].iter().map(|p| p.id).collect();
        for p in &self.route[1..self.route.len() - 1] {
            if !remaining.remove(&p.id) {
                return Err(TourError::Duplicate(p.id));
            }
        }
        if !remaining.is_empty() {
            let mut missing: Vec<u64> = remaining.into_iter().collect();
            missing.sort_unstable();
            return Err(TourError::Missing(missing));
        }

        let expected = route_length(&self.route);
        if expected != self.length {
            return Err(TourError::WrongLength {
                stored: self.length,
                expected,
            });
        }
        Ok(())
    }
}

impl fmt::Display for Tour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut ids = self.route.iter().map(|p| p.id);
        if let Some(first) = ids.next() {
            write!(f, "{first}")?;
        }
        for id in ids {
            write!(f, " => {id}")?;
        }
        write!(f, "\nTour length: {}", self.length)
    }
}

/// Reasons a tour fails [`Tour::verify`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TourError {
    #[error("no points to verify against")]
    NoPoints,
    #[error("tour is empty")]
    Empty,
    #[error("first point {first} and last point {last} differ")]
    NotClosed { first: u64, last: u64 },
    #[error("tour starts at {0} instead of the origin")]
    WrongOrigin(u64),
    #[error("point {0} visited more than once")]
    Duplicate(u64),
    #[error("points {0:?} not visited")]
    Missing(Vec<u64>),
    #[error("stored length {stored} differs from actual length {expected}")]
    WrongLength { stored: u64, expected: u64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Vec<Point> {
        vec![
            Point::new(1, 0.0, 0.0),
            Point::new(2, 1.0, 0.0),
            Point::new(3, 1.0, 1.0),
            Point::new(4, 0.0, 1.0),
        ]
    }

    fn closed(points: &[Point], order: &[usize]) -> Vec<Point> {
        let mut route: Vec<Point> = order.iter().map(|&i| points[i]).collect();
        route.push(points[order[0]]);
        route
    }

    #[test]
    fn test_distance_truncates() {
        let a = Point::new(1, 0.0, 0.0);
        let b = Point::new(2, 1.0, 1.0);
        assert_eq!(a.distance(&b), 1); // sqrt(2)
        assert_eq!(a.distance(&Point::new(3, 3.0, 4.0)), 5);
        assert_eq!(a.distance(&a), 0);
    }

    #[test]
    fn test_length_includes_closing_edge() {
        let pts = square();
        let tour = Tour::new(closed(&pts, &[0, 1, 2, 3]));
        assert_eq!(tour.length(), 4);
        assert_eq!(tour.num_points(), 4);
        assert_eq!(tour.origin().map(|p| p.id), Some(1));
    }

    #[test]
    fn test_length_saturates_on_huge_coordinates() {
        let pts = vec![
            Point::new(1, 0.0, 0.0),
            Point::new(2, 1e19, 0.0),
            Point::new(3, 1e19, 1e19),
        ];
        let tour = Tour::new(closed(&pts, &[0, 1, 2]));
        assert_eq!(tour.length(), u64::MAX);
        assert_eq!(crate::tsp::nearest_neighbor_tour(&pts).length(), u64::MAX);
        assert!(tour.verify(&pts).is_ok());
    }

    #[test]
    fn test_recompute_is_stable() {
        let pts = vec![
            Point::new(1, 0.0, 0.0),
            Point::new(2, 10.0, 3.5),
            Point::new(3, -4.0, 7.25),
            Point::new(4, 2.0, -9.0),
            Point::new(5, 6.0, 6.0),
        ];
        let tour = Tour::new(closed(&pts, &[0, 3, 1, 4, 2]));
        let again = Tour::new(tour.route().to_vec());
        assert_eq!(tour.length(), again.length());
        assert_eq!(tour.length(), route_length(tour.route()));
    }

    #[test]
    fn test_verify_ok() {
        let pts = square();
        let tour = Tour::new(closed(&pts, &[0, 2, 1, 3]));
        assert_eq!(tour.verify(&pts), Ok(()));
    }

    #[test]
    fn test_verify_rejects_duplicate() {
        let pts = square();
        let tour = Tour::new(closed(&pts, &[0, 1, 1, 3]));
        assert_eq!(tour.verify(&pts), Err(TourError::Duplicate(2)));
    }

    #[test]
    fn test_verify_rejects_missing() {
        let pts = square();
        let tour = Tour::new(closed(&pts, &[0, 1, 2]));
        assert_eq!(tour.verify(&pts), Err(TourError::Missing(vec![4])));
    }

    #[test]
    fn test_verify_rejects_wrong_origin() {
        let pts = square();
        let tour = Tour::new(closed(&pts, &[1, 0, 2, 3]));
        assert_eq!(tour.verify(&pts), Err(TourError::WrongOrigin(2)));
    }

    #[test]
    fn test_verify_rejects_open_route() {
        let pts = square();
        let tour = Tour::new(vec![pts[0], pts[1], pts[2], pts[3], pts[1]]);
        assert_eq!(
            tour.verify(&pts),
            Err(TourError::NotClosed { first: 1, last: 2 })
        );
    }

    #[test]
    fn test_display() {
        let pts = square();
        let tour = Tour::new(closed(&pts, &[0, 1, 2, 3]));
        assert_eq!(tour.to_string(), "1 => 2 => 3 => 4 => 1\nTour length: 4");
    }
}
