//! Fixed-origin permutation operators.
//!
//! Routes are closed: index 0 and the last index both hold the origin and
//! are never touched. Only the interior `1..=len-2` is recombined or
//! mutated, so every operator maps a valid route to a valid route.
//!
//! - [`order_crossover`] (OX): Davis (1985), preserves relative order
//! - [`swap_mutation`]: per-position swap with a given probability
//!
//! # References
//!
//! - Davis (1985), "Applying Adaptive Algorithms to Epistatic Domains"
//! - Cicirello (2023), "Genetic Operators for Permutation Representation"

use std::collections::HashSet;

use rand::Rng;

use crate::tsp::Point;

// ============================================================================
// Crossover
// ============================================================================

/// Order Crossover (OX) on closed routes.
///
/// Picks cut points with [`random_cuts`] and builds the child with
/// [`crossover_with_cuts`]. Routes with fewer than two interior positions
/// have no valid cut pair; the child is then a copy of `parent1`.
///
/// # Panics
/// Panics if parents have different lengths.
pub fn order_crossover<R: Rng>(parent1: &[Point], parent2: &[Point], rng: &mut R) -> Vec<Point> {
    assert_eq!(
        parent1.len(),
        parent2.len(),
        "parents must have equal length"
    );
    match random_cuts(parent1.len(), rng) {
        Some((start, end)) => crossover_with_cuts(parent1, parent2, start, end),
        None => parent1.to_vec(),
    }
}

/// Builds one OX child from fixed cut points.
///
/// 1. Copy `parent1[start..=end]` to the same positions of the child
/// 2. Fill the other interior positions, left to right, with the interior
///    of `parent2` in its original order, skipping points already copied
/// 3. Keep the origin at both ends
///
/// # Complexity
/// O(n) time, O(n) space
///
/// # Panics
/// Panics if parents differ in length or `1 <= start < end <= len - 2`
/// does not hold.
pub fn crossover_with_cuts(
    parent1: &[Point],
    parent2: &[Point],
    start: usize,
    end: usize,
) -> Vec<Point> {
    let n = parent1.len();
    assert_eq!(n, parent2.len(), "parents must have equal length");
    assert!(
        1 <= start && start < end && end + 2 <= n,
        "cut points {start}..={end} outside interior of length-{n} route"
    );

    let mut child = parent1.to_vec();
    let taken: HashSet<u64> = parent1[start..=end].iter().map(|p| p.id).collect();

    let mut donor = parent2[1..n - 1].iter().filter(|p| !taken.contains(&p.id));
    for pos in (1..start).chain(end + 1..n - 1) {
        // Both interiors hold the same points, so the donor never runs dry.
        if let Some(p) = donor.next() {
            child[pos] = *p;
        }
    }

    child
}

/// Draws cut points `start < end` uniformly from the interior of a
/// length-`len` route, redrawing until ordered.
///
/// Returns `None` when the interior has fewer than two positions.
pub fn random_cuts<R: Rng>(len: usize, rng: &mut R) -> Option<(usize, usize)> {
    if len < 4 {
        return None;
    }
    loop {
        let start = random_interior_index(len, rng);
        let end = random_interior_index(len, rng);
        if start < end {
            return Some((start, end));
        }
    }
}

// ============================================================================
// Mutation
// ============================================================================

/// Swap mutation over the interior of `route`.
///
/// Each interior position is swapped, with probability `rate` percent, with
/// a uniformly drawn interior position. When `allow_self_swap` is false the
/// second position is redrawn until it differs from the first.
///
/// # Complexity
/// O(n) expected
pub fn swap_mutation<R: Rng>(route: &mut [Point], rate: u32, allow_self_swap: bool, rng: &mut R) {
    let n = route.len();
    if n < 3 || rate == 0 {
        return;
    }
    let can_avoid_self = n >= 4;

    for i in 1..n - 1 {
        if rng.random_range(0..100) >= rate {
            continue;
        }
        let mut j = random_interior_index(n, rng);
        if !allow_self_swap && can_avoid_self {
            while j == i {
                j = random_interior_index(n, rng);
            }
        }
        route.swap(i, j);
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// Uniform index in `1..=len-2`.
fn random_interior_index<R: Rng>(len: usize, rng: &mut R) -> usize {
    rng.random_range(1..len - 1)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::seq::SliceRandom;
    use rand::SeedableRng;

    fn points(n: u64) -> Vec<Point> {
        (1..=n).map(|id| Point::new(id, id as f64, (id * id) as f64)).collect()
    }

    fn closed(points: &[Point], order: &[usize]) -> Vec<Point> {
        let mut route: Vec<Point> = order.iter().map(|&i| points[i]).collect();
        route.push(points[order[0]]);
        route
    }

    fn shuffled_route(points: &[Point], rng: &mut StdRng) -> Vec<Point> {
        let mut order: Vec<usize> = (1..points.len()).collect();
        order.shuffle(rng);
        order.insert(0, 0);
        closed(points, &order)
    }

    /// Origin at both ends and every other point exactly once in between.
    fn is_valid_route(route: &[Point], points: &[Point]) -> bool {
        if route.len() != points.len() + 1 {
            return false;
        }
        if route[0].id != points[0].id || route[route.len() - 1].id != points[0].id {
            return false;
        }
        let mut ids: Vec<u64> = route[1..route.len() - 1].iter().map(|p| p.id).collect();
        ids.sort_unstable();
        let expected: Vec<u64> = points[1..].iter().map(|p| p.id).collect();
        ids == expected
    }

    // ---- OX Crossover ----

    #[test]
    fn test_ox_known_child() {
        let pts = points(8);
        let p1 = closed(&pts, &[0, 1, 2, 3, 4, 5, 6, 7]);
        let p2 = closed(&pts, &[0, 7, 6, 5, 4, 3, 2, 1]);

        let child = crossover_with_cuts(&p1, &p2, 3, 5);
        let ids: Vec<u64> = child.iter().map(|p| p.id).collect();
        // [4, 5, 6] kept from p1, rest filled in p2's order: 8, 7, 3, 2.
        assert_eq!(ids, vec![1, 8, 7, 4, 5, 6, 3, 2, 1]);
    }

    #[test]
    fn test_ox_full_interior_copies_parent1() {
        let pts = points(4);
        let p1 = closed(&pts, &[0, 1, 2, 3]);
        let p2 = closed(&pts, &[0, 3, 2, 1]);
        assert_eq!(crossover_with_cuts(&p1, &p2, 1, 3), p1);
    }

    #[test]
    fn test_ox_identical_parents() {
        let pts = points(9);
        let mut rng = StdRng::seed_from_u64(42);
        let p = shuffled_route(&pts, &mut rng);
        for _ in 0..20 {
            assert_eq!(order_crossover(&p, &p, &mut rng), p);
        }
    }

    #[test]
    fn test_ox_two_points_copies_parent1() {
        let pts = points(2);
        let p = closed(&pts, &[0, 1]);
        let mut rng = StdRng::seed_from_u64(42);
        assert_eq!(order_crossover(&p, &p, &mut rng), p);
    }

    #[test]
    #[should_panic(expected = "outside interior")]
    fn test_ox_rejects_origin_cut() {
        let pts = points(5);
        let p = closed(&pts, &[0, 1, 2, 3, 4]);
        crossover_with_cuts(&p, &p, 0, 2);
    }

    proptest! {
        #[test]
        fn prop_ox_preserves_origin_and_point_set(n in 2u64..40, seed in any::<u64>()) {
            let pts = points(n);
            let mut rng = StdRng::seed_from_u64(seed);
            let p1 = shuffled_route(&pts, &mut rng);
            let p2 = shuffled_route(&pts, &mut rng);

            let child = order_crossover(&p1, &p2, &mut rng);
            prop_assert!(is_valid_route(&child, &pts), "invalid child: {:?}", child);
        }

        #[test]
        fn prop_ox_keeps_parent1_segment(n in 4u64..40, seed in any::<u64>()) {
            let pts = points(n);
            let mut rng = StdRng::seed_from_u64(seed);
            let p1 = shuffled_route(&pts, &mut rng);
            let p2 = shuffled_route(&pts, &mut rng);
            let (start, end) = random_cuts(p1.len(), &mut rng).expect("interior has two slots");

            let child = crossover_with_cuts(&p1, &p2, start, end);
            prop_assert_eq!(&child[start..=end], &p1[start..=end]);
            prop_assert!(is_valid_route(&child, &pts));
        }

        #[test]
        fn prop_swap_mutation_preserves_point_set(
            n in 2u64..40,
            rate in 0u32..=100,
            allow_self_swap in any::<bool>(),
            seed in any::<u64>(),
        ) {
            let pts = points(n);
            let mut rng = StdRng::seed_from_u64(seed);
            let mut route = shuffled_route(&pts, &mut rng);

            swap_mutation(&mut route, rate, allow_self_swap, &mut rng);
            prop_assert!(is_valid_route(&route, &pts));
        }
    }

    // ---- Cut points ----

    #[test]
    fn test_random_cuts_bounds() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..1000 {
            let (start, end) = random_cuts(10, &mut rng).expect("len 10 has cuts");
            assert!(1 <= start && start < end && end <= 8);
        }
    }

    #[test]
    fn test_random_cuts_too_short() {
        let mut rng = StdRng::seed_from_u64(42);
        assert_eq!(random_cuts(3, &mut rng), None);
        assert_eq!(random_cuts(4, &mut rng), Some((1, 2)));
    }

    // ---- Swap Mutation ----

    #[test]
    fn test_swap_rate_zero_is_identity() {
        let pts = points(10);
        let mut rng = StdRng::seed_from_u64(42);
        let original = shuffled_route(&pts, &mut rng);
        let mut route = original.clone();
        swap_mutation(&mut route, 0, true, &mut rng);
        assert_eq!(route, original);
    }

    #[test]
    fn test_swap_rate_full_changes_order() {
        let pts = points(20);
        let mut rng = StdRng::seed_from_u64(42);
        let original = closed(&pts, &(0..20).collect::<Vec<_>>());
        let mut route = original.clone();
        swap_mutation(&mut route, 100, false, &mut rng);
        assert_ne!(route, original);
        assert!(is_valid_route(&route, &pts));
    }

    #[test]
    fn test_swap_single_interior_position() {
        let pts = points(2);
        let mut rng = StdRng::seed_from_u64(42);
        let original = closed(&pts, &[0, 1]);
        let mut route = original.clone();
        swap_mutation(&mut route, 100, false, &mut rng);
        assert_eq!(route, original);
    }
}
