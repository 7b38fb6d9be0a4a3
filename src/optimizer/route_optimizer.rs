//! Cluster-first, route-second pickup planning.
//!
//! # Algorithm
//!
//! 1. Validate the depot and pickups, then apply the optional time window.
//! 2. Size the plan: `ceil(pickups / max_pickups_per_route)` routes.
//! 3. Cluster the pickups with K-Means into that many groups.
//! 4. Solve each non-empty group's tour (in parallel) and score its emissions.
//! 5. Compare against the naive baseline of one depot round trip per pickup.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use tracing::{info, instrument};

use super::{OptimizeOptions, OptimizerConfig};
use crate::clustering::KMeans;
use crate::emissions::EmissionsModel;
use crate::error::{Result, RoutingError};
use crate::models::{
    GeoPoint, Located, OptimizationComparison, OptimizationResult, Pickup, PlanSummary, Route,
};
use crate::tour::TourSolver;

/// Plans pickup routes from a depot.
///
/// # Examples
///
/// ```
/// use pickup_routing::models::{GeoPoint, Pickup};
/// use pickup_routing::optimizer::{OptimizeOptions, OptimizerConfig, RouteOptimizer};
///
/// let optimizer = RouteOptimizer::new(OptimizerConfig::default().with_seed(1));
/// let depot = GeoPoint::new(0.0, 0.0).unwrap();
/// let pickups = vec![Pickup::new(1, GeoPoint::new(0.0, 1.0).unwrap())];
///
/// let result = optimizer.optimize(depot, &pickups, &OptimizeOptions::default()).unwrap();
/// assert_eq!(result.routes().len(), 1);
/// assert_eq!(result.summary().total_pickups(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct RouteOptimizer {
    config: OptimizerConfig,
    clusterer: KMeans,
    solver: TourSolver,
    emissions: EmissionsModel,
}

impl RouteOptimizer {
    /// Creates an optimizer from service configuration.
    pub fn new(config: OptimizerConfig) -> Self {
        Self {
            clusterer: KMeans::new(config.kmeans),
            solver: TourSolver::new(config.tour),
            emissions: EmissionsModel::new(config.emission_factors.clone()),
            config,
        }
    }

    /// The optimizer's configuration.
    pub fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    /// Plans routes, drawing clustering randomness from the configured seed
    /// (or OS entropy when none is set).
    pub fn optimize(
        &self,
        depot: GeoPoint,
        pickups: &[Pickup],
        options: &OptimizeOptions,
    ) -> Result<OptimizationResult> {
        let mut rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        self.optimize_with_rng(depot, pickups, options, &mut rng)
    }

    /// Plans routes using the supplied random source for clustering.
    ///
    /// Given the same inputs and an identically seeded `rng`, the result is
    /// identical.
    #[instrument(skip_all, fields(pickups = pickups.len()))]
    pub fn optimize_with_rng<R: Rng + ?Sized>(
        &self,
        depot: GeoPoint,
        pickups: &[Pickup],
        options: &OptimizeOptions,
        rng: &mut R,
    ) -> Result<OptimizationResult> {
        if !depot.is_valid() {
            return Err(RoutingError::InvalidDepot {
                reason: format!("coordinates ({}, {}) out of range", depot.lat(), depot.lon()),
            });
        }
        if let Some(bad) = pickups.iter().find(|p| !p.has_valid_location()) {
            return Err(RoutingError::InvalidPickupLocation { id: bad.id().clone() });
        }

        let max_per_route = options
            .max_pickups_per_route
            .unwrap_or(self.config.max_pickups_per_route);
        if max_per_route == 0 {
            return Err(RoutingError::InvalidMaxPickupsPerRoute);
        }

        let included = filter_by_window(pickups, options)?;
        let vehicle = options.vehicle_class();
        let num_routes = included.len().div_ceil(max_per_route);

        let clustering = self.clusterer.cluster(&included, num_routes, rng);
        let groups: Vec<Vec<Pickup>> = clustering
            .members()
            .into_iter()
            .filter(|members| !members.is_empty())
            .map(|members| members.into_iter().map(|i| included[i].clone()).collect())
            .collect();

        let routes: Vec<Route> = groups
            .par_iter()
            .enumerate()
            .map(|(i, group)| {
                let tour = self.solver.solve(group, depot);
                let minutes = self.solver.estimated_minutes(&tour);
                let emissions = self.emissions.emit(tour.distance_km(), vehicle);
                Route::from_tour(i + 1, depot, group, &tour, minutes, emissions)
            })
            .collect();

        let unoptimized_km = baseline_distance(depot, &included);
        let optimized_km: f64 = routes.iter().map(Route::total_distance_km).sum();
        let savings = self.emissions.savings(unoptimized_km, optimized_km, vehicle);
        let summary = PlanSummary::from_routes(
            &routes,
            OptimizationComparison::new(unoptimized_km, optimized_km, &savings),
        );

        info!(
            routes = summary.total_routes(),
            pickups = summary.total_pickups(),
            distance_km = summary.total_distance_km(),
            saved_km = savings.distance_saved_km(),
            %vehicle,
            "pickup plan ready"
        );

        Ok(OptimizationResult::new(routes, summary))
    }
}

/// Keeps the pickups scheduled within the requested window.
fn filter_by_window<'a>(pickups: &'a [Pickup], options: &OptimizeOptions) -> Result<Vec<&'a Pickup>> {
    if pickups.is_empty() {
        return Err(RoutingError::NoPickups);
    }
    let Some(window) = options.time_window else {
        return Ok(pickups.iter().collect());
    };
    if !window.is_valid() {
        return Err(RoutingError::InvalidTimeWindow {
            start_hour: window.start_hour(),
            end_hour: window.end_hour(),
        });
    }

    let included: Vec<&Pickup> = pickups
        .iter()
        .filter(|p| p.scheduled_hour().is_some_and(|h| window.contains(h)))
        .collect();
    if included.is_empty() {
        return Err(RoutingError::NoPickupsInWindow {
            start_hour: window.start_hour(),
            end_hour: window.end_hour(),
        });
    }
    Ok(included)
}

/// Total distance if every pickup were a separate depot round trip.
fn baseline_distance(depot: GeoPoint, pickups: &[&Pickup]) -> f64 {
    pickups
        .iter()
        .map(|p| 2.0 * depot.distance_to(&p.location()))
        .sum()
}
