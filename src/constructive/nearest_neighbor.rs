//! Nearest-neighbor tour construction.
//!
//! Starting from the depot, always travel to the nearest unvisited location,
//! then return to the depot once every location has been visited.
//!
//! # Complexity
//!
//! O(n²) where n = number of locations.
//!
//! # Reference
//!
//! The simplest TSP construction heuristic. Tours are typically 20-25% above
//! optimal, which is why the result is handed to [`two_opt_improve`] next.
//!
//! [`two_opt_improve`]: crate::local_search::two_opt_improve

use crate::distance::DistanceMatrix;

/// Builds a closed tour over every location except `depot`.
///
/// Returns the visiting order (depot excluded, implicit at both ends). Ties
/// between equally near locations go to the lower index.
///
/// # Examples
///
/// ```
/// use pickup_routing::models::GeoPoint;
/// use pickup_routing::distance::DistanceMatrix;
/// use pickup_routing::constructive::nearest_neighbor_tour;
///
/// let points = vec![
///     GeoPoint::new(0.0, 0.0).unwrap(), // depot
///     GeoPoint::new(0.0, 3.0).unwrap(),
///     GeoPoint::new(0.0, 1.0).unwrap(),
///     GeoPoint::new(0.0, 2.0).unwrap(),
/// ];
/// let dm = DistanceMatrix::from_points(&points);
/// assert_eq!(nearest_neighbor_tour(&dm, 0), vec![2, 3, 1]);
/// ```
pub fn nearest_neighbor_tour(distances: &DistanceMatrix, depot: usize) -> Vec<usize> {
    let n = distances.size();
    if n <= 1 {
        return Vec::new();
    }

    let mut unvisited: Vec<usize> = (0..n).filter(|&i| i != depot).collect();
    let mut tour = Vec::with_capacity(unvisited.len());
    let mut current = depot;

    while let Some(next) = distances.nearest_neighbor(current, &unvisited) {
        unvisited.retain(|&i| i != next);
        tour.push(next);
        current = next;
    }

    tour
}
