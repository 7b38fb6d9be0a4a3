//! Nearest-neighbor + 2-opt tour solver.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::constructive::nearest_neighbor_tour;
use crate::distance::DistanceMatrix;
use crate::local_search::{route_distance, two_opt_improve};
use crate::models::{GeoPoint, Located, Tour};

/// Index of the depot in the solver's distance matrix.
const DEPOT: usize = 0;

/// Tunables for [`TourSolver`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TourConfig {
    /// Average travel speed used for time estimates.
    pub average_speed_kmh: f64,
    /// Minutes spent at each pickup.
    pub service_minutes_per_stop: f64,
    /// Hard cap on 2-opt passes per tour.
    pub max_two_opt_passes: usize,
}

impl Default for TourConfig {
    fn default() -> Self {
        Self {
            average_speed_kmh: 30.0,
            service_minutes_per_stop: 5.0,
            max_two_opt_passes: 1000,
        }
    }
}

/// Solves the closed visiting order for one cluster of pickups.
///
/// # Examples
///
/// ```
/// use pickup_routing::models::{GeoPoint, Pickup};
/// use pickup_routing::tour::TourSolver;
///
/// let depot = GeoPoint::new(0.0, 0.0).unwrap();
/// let pickups = vec![
///     Pickup::new(1, GeoPoint::new(0.0, 0.02).unwrap()),
///     Pickup::new(2, GeoPoint::new(0.0, 0.01).unwrap()),
/// ];
/// let solver = TourSolver::default();
/// let tour = solver.solve(&pickups, depot);
/// assert_eq!(tour.order(), &[1, 0]);
/// assert!(solver.estimated_minutes(&tour) > 10.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct TourSolver {
    config: TourConfig,
}

impl TourSolver {
    /// Creates a solver with the given configuration.
    pub fn new(config: TourConfig) -> Self {
        Self { config }
    }

    /// The solver's configuration.
    pub fn config(&self) -> &TourConfig {
        &self.config
    }

    /// Computes a short closed tour from `depot` through every item and back.
    ///
    /// The tour's order indexes into `items`. An empty slice yields
    /// [`Tour::empty`].
    #[instrument(level = "debug", skip_all, fields(stops = items.len()))]
    pub fn solve<T: Located>(&self, items: &[T], depot: GeoPoint) -> Tour {
        if items.is_empty() {
            return Tour::empty();
        }

        let mut points = Vec::with_capacity(items.len() + 1);
        points.push(depot);
        points.extend(items.iter().map(Located::location));
        let distances = DistanceMatrix::from_points(&points);

        let initial = nearest_neighbor_tour(&distances, DEPOT);
        let construction_km = route_distance(&initial, DEPOT, &distances);
        let improved = two_opt_improve(&initial, DEPOT, &distances, self.config.max_two_opt_passes);

        debug!(
            construction_km,
            improved_km = improved.distance,
            passes = improved.passes,
            "tour solved"
        );

        // Matrix indices are shifted by one for the depot.
        let order = improved.route.iter().map(|&i| i - 1).collect();
        Tour::new(order, construction_km, improved.distance, improved.passes)
    }

    /// Driving time at the average speed plus service time at every stop.
    pub fn estimated_minutes(&self, tour: &Tour) -> f64 {
        let drive = if self.config.average_speed_kmh > 0.0 {
            tour.distance_km() / self.config.average_speed_kmh * 60.0
        } else {
            0.0
        };
        drive + tour.stops() as f64 * self.config.service_minutes_per_stop
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::haversine_km;

    fn pt(lat: f64, lon: f64) -> GeoPoint {
        GeoPoint::new(lat, lon).expect("valid")
    }

    #[test]
    fn test_empty_cluster() {
        let tour = TourSolver::default().solve::<GeoPoint>(&[], pt(0.0, 0.0));
        assert!(tour.is_empty());
        assert_eq!(tour.distance_km(), 0.0);
        assert_eq!(TourSolver::default().estimated_minutes(&tour), 0.0);
    }

    #[test]
    fn test_single_stop_round_trip() {
        let depot = pt(0.0, 0.0);
        let stop = pt(0.0, 1.0);
        let tour = TourSolver::default().solve(&[stop], depot);
        assert_eq!(tour.order(), &[0]);
        assert!((tour.distance_km() - 2.0 * haversine_km(&depot, &stop)).abs() < 1e-9);
    }

    #[test]
    fn test_improves_on_construction() {
        // A zig-zag that nearest neighbor handles poorly.
        let depot = pt(0.0, 0.0);
        let stops = vec![
            pt(0.0, 1.0),
            pt(0.0, -1.1),
            pt(0.0, 2.2),
            pt(0.0, -3.3),
            pt(0.5, 4.0),
        ];
        let tour = TourSolver::default().solve(&stops, depot);
        assert!(tour.distance_km() <= tour.construction_distance_km() + 1e-9);
        let mut order = tour.order().to_vec();
        order.sort_unstable();
        assert_eq!(order, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_estimated_minutes() {
        let solver = TourSolver::new(TourConfig {
            average_speed_kmh: 60.0,
            service_minutes_per_stop: 5.0,
            max_two_opt_passes: 10,
        });
        let tour = Tour::new(vec![0, 1, 2], 30.0, 30.0, 1);
        // 30 km at 60 km/h = 30 min, plus 3 × 5 min
        assert!((solver.estimated_minutes(&tour) - 45.0).abs() < 1e-12);
    }

    #[test]
    fn test_zero_speed_counts_service_only() {
        let solver = TourSolver::new(TourConfig {
            average_speed_kmh: 0.0,
            ..TourConfig::default()
        });
        let tour = Tour::new(vec![0], 10.0, 10.0, 0);
        assert_eq!(solver.estimated_minutes(&tour), 5.0);
    }
}
