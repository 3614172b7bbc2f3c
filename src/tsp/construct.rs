//! Tour construction: random and greedy nearest-neighbor.
//!
//! Both take the full point list with the origin at index 0 and return a
//! closed [`Tour`] starting and ending there.

use rand::seq::SliceRandom;
use rand::Rng;

use super::types::{Point, Tour};

/// Builds a tour that visits the non-origin points in uniformly random order.
///
/// # Panics
/// Panics if `points` is empty.
pub fn random_tour<R: Rng>(points: &[Point], rng: &mut R) -> Tour {
    let origin = points[0];
    let mut route = Vec::with_capacity(points.len() + 1);
    route.push(origin);
    route.extend_from_slice(&points[1..]);
    route[1..].shuffle(rng);
    route.push(origin);
    Tour::new(route)
}

/// Builds a tour with the greedy nearest-neighbor heuristic.
///
/// Starting at the origin, always moves to the closest unvisited point.
/// On equal distances the point with the larger id wins, so the result does
/// not depend on the order of `points[1..]`.
///
/// # Panics
/// Panics if `points` is empty.
pub fn nearest_neighbor_tour(points: &[Point]) -> Tour {
    let origin = points[0];
    let mut unvisited: Vec<Point> = points[1..].to_vec();
    let mut route = Vec::with_capacity(points.len() + 1);
    route.push(origin);

    let mut current = origin;
    while !unvisited.is_empty() {
        let mut best = 0;
        let mut best_dist = current.distance(&unvisited[0]);
        for (idx, candidate) in unvisited.iter().enumerate().skip(1) {
            let d = current.distance(candidate);
            if d < best_dist || (d == best_dist && candidate.id > unvisited[best].id) {
                best = idx;
                best_dist = d;
            }
        }
        current = unvisited.swap_remove(best);
        route.push(current);
    }
    route.push(origin);

    Tour::new(route)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn scattered(n: u64) -> Vec<Point> {
        let mut rng = StdRng::seed_from_u64(7);
        (1..=n)
            .map(|id| Point::new(id, rng.random_range(0.0..100.0), rng.random_range(0.0..100.0)))
            .collect()
    }

    fn visits_all_once(tour: &Tour, points: &[Point]) -> bool {
        let route = tour.route();
        if route.len() != points.len() + 1 {
            return false;
        }
        let ids: HashSet<u64> = route[1..route.len() - 1].iter().map(|p| p.id).collect();
        ids.len() == points.len() - 1 && ids.iter().all(|id| *id != points[0].id)
    }

    #[test]
    fn test_random_tour_is_valid() {
        let pts = scattered(12);
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..50 {
            let tour = random_tour(&pts, &mut rng);
            assert!(tour.verify(&pts).is_ok(), "invalid random tour: {tour}");
        }
    }

    #[test]
    fn test_random_tour_two_points() {
        let pts = vec![Point::new(1, 0.0, 0.0), Point::new(2, 0.0, 5.0)];
        let mut rng = StdRng::seed_from_u64(1);
        let tour = random_tour(&pts, &mut rng);
        assert_eq!(tour.length(), 10);
    }

    #[test]
    fn test_nearest_neighbor_visits_every_point_once() {
        let pts = scattered(30);
        let tour = nearest_neighbor_tour(&pts);
        assert!(visits_all_once(&tour, &pts));
        assert!(tour.verify(&pts).is_ok());
    }

    #[test]
    fn test_nearest_neighbor_follows_closest() {
        let pts = vec![
            Point::new(1, 0.0, 0.0),
            Point::new(2, 10.0, 0.0),
            Point::new(3, 1.0, 0.0),
            Point::new(4, 5.0, 0.0),
        ];
        let tour = nearest_neighbor_tour(&pts);
        let ids: Vec<u64> = tour.route().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 3, 4, 2, 1]);
        assert_eq!(tour.length(), 20);
    }

    #[test]
    fn test_nearest_neighbor_tie_prefers_larger_id() {
        // Points 2 and 3 are both at distance 1 from the origin.
        let pts = vec![
            Point::new(1, 0.0, 0.0),
            Point::new(2, 1.0, 0.0),
            Point::new(3, 0.0, 1.0),
            Point::new(4, 0.0, 5.0),
        ];
        let tour = nearest_neighbor_tour(&pts);
        assert_eq!(tour.route()[1].id, 3);
    }

    #[test]
    fn test_nearest_neighbor_independent_of_input_order() {
        let pts = vec![
            Point::new(1, 0.0, 0.0),
            Point::new(2, 1.0, 0.0),
            Point::new(3, 0.0, 1.0),
            Point::new(4, -1.0, 0.0),
            Point::new(5, 0.0, -1.0),
        ];
        let expected = nearest_neighbor_tour(&pts);

        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..20 {
            let mut shuffled = pts.clone();
            shuffled[1..].shuffle(&mut rng);
            let tour = nearest_neighbor_tour(&shuffled);
            assert_eq!(tour.route(), expected.route());
            assert_eq!(tour.length(), expected.length());
        }
    }
}
