//! Intra-route 2-opt improvement.
//!
//! # Algorithm
//!
//! For each pair of positions i < j in the route (depot excluded), let
//! `prev` be the stop before r[i] and `next` the stop after r[j], with the
//! depot standing in at either end. Reversing r[i..=j] replaces the edges
//! (prev, r[i]) and (r[j], next):
//!
//! ```text
//! delta = d(prev, r[j]) + d(r[i], next) - d(prev, r[i]) - d(r[j], next)
//! ```
//!
//! If delta < 0, reverse the segment r[i..=j] and accept the improvement.
//! Passes repeat until one finds no improving move (first-improvement
//! strategy) or the pass cap is reached. Every accepted move strictly
//! shortens the route, so the result is never longer than the input.
//!
//! # Complexity
//!
//! O(n²) per pass; the number of passes is bounded by the cap.
//!
//! # Reference
//!
//! Croes, G.A. (1958). "A method for solving traveling salesman problems",
//! *Operations Research* 6(6), 791-812.

use tracing::warn;

use crate::distance::DistanceMatrix;

/// Moves must shorten the route by more than this to be accepted.
const IMPROVEMENT_EPSILON: f64 = 1e-10;

/// Result of a 2-opt run.
#[derive(Debug, Clone, PartialEq)]
pub struct TwoOptOutcome {
    /// Improved visiting order (depot excluded).
    pub route: Vec<usize>,
    /// Total closed-route distance.
    pub distance: f64,
    /// Full passes run, including the final pass that found nothing.
    pub passes: usize,
}

/// Applies 2-opt improvement to a single route (given as a sequence of location indices).
///
/// The route is assumed to start and end at `depot`. At most `max_passes`
/// full passes are run; hitting the cap is not an error, the best route so
/// far is returned.
///
/// # Arguments
///
/// * `route` — Ordered location indices (excluding depot)
/// * `depot` — Depot location index
/// * `distances` — Distance matrix
/// * `max_passes` — Upper bound on improvement passes
///
/// # Examples
///
/// ```
/// use pickup_routing::models::GeoPoint;
/// use pickup_routing::distance::DistanceMatrix;
/// use pickup_routing::local_search::{route_distance, two_opt_improve};
///
/// let points = vec![
///     GeoPoint::new(0.0, 0.0).unwrap(),
///     GeoPoint::new(0.0, 1.0).unwrap(),
///     GeoPoint::new(0.0, 2.0).unwrap(),
///     GeoPoint::new(0.0, 3.0).unwrap(),
/// ];
/// let dm = DistanceMatrix::from_points(&points);
///
/// // Suboptimal order: 1, 3, 2
/// let outcome = two_opt_improve(&[1, 3, 2], 0, &dm, 100);
/// assert!(outcome.distance <= route_distance(&[1, 3, 2], 0, &dm));
/// assert!((outcome.distance - route_distance(&[1, 2, 3], 0, &dm)).abs() < 1e-9);
/// ```
pub fn two_opt_improve(
    route: &[usize],
    depot: usize,
    distances: &DistanceMatrix,
    max_passes: usize,
) -> TwoOptOutcome {
    if route.len() < 2 {
        return TwoOptOutcome {
            route: route.to_vec(),
            distance: route_distance(route, depot, distances),
            passes: 0,
        };
    }

    let mut current = route.to_vec();
    let mut improved = true;
    let mut passes = 0;

    while improved && passes < max_passes {
        improved = false;
        passes += 1;
        let n = current.len();

        for i in 0..n - 1 {
            for j in i + 1..n {
                let delta = two_opt_delta(&current, depot, distances, i, j);
                if delta < -IMPROVEMENT_EPSILON {
                    // Positions i..=j hold customers; the edges being swapped are
                    // (prev_i, r[i]) and (r[j], next_j).
                    current[i..=j].reverse();
                    improved = true;
                }
            }
        }
    }

    if improved {
        warn!(passes, stops = current.len(), "2-opt stopped at pass cap");
    }

    let distance = route_distance(&current, depot, distances);
    TwoOptOutcome {
        route: current,
        distance,
        passes,
    }
}

/// Computes the distance change from a 2-opt swap of edges at positions i and j.
///
/// Before: ...-prev_i - route[i] - route[i+1] - ... - route[j] - next_j-...
/// After:  ...-prev_i - route[j] - route[j-1] - ... - route[i] - next_j-...
fn two_opt_delta(
    route: &[usize],
    depot: usize,
    distances: &DistanceMatrix,
    i: usize,
    j: usize,
) -> f64 {
    let n = route.len();
    let prev_i = if i == 0 { depot } else { route[i - 1] };
    let next_j = if j == n - 1 { depot } else { route[j + 1] };

    let old_cost = distances.get(prev_i, route[i]) + distances.get(route[j], next_j);
    let new_cost = distances.get(prev_i, route[j]) + distances.get(route[i], next_j);

    new_cost - old_cost
}

/// Computes the total distance of a route: `depot → route[0] → ... → route[n-1] → depot`.
///
/// An empty route has distance zero.
pub fn route_distance(route: &[usize], depot: usize, distances: &DistanceMatrix) -> f64 {
    let (Some(&first), Some(&last)) = (route.first(), route.last()) else {
        return 0.0;
    };
    let inner: f64 = route.windows(2).map(|w| distances.get(w[0], w[1])).sum();
    distances.get(depot, first) + inner + distances.get(last, depot)
}
