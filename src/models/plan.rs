//! Multi-route optimization results.

use serde::Serialize;

use super::{round2, Route};
use crate::emissions::SavingsResult;

/// Optimized plan versus the naive one-round-trip-per-pickup baseline.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizationComparison {
    #[serde(serialize_with = "round2")]
    unoptimized_distance_km: f64,
    #[serde(serialize_with = "round2")]
    optimized_distance_km: f64,
    #[serde(rename = "co2SavedKg", serialize_with = "round2")]
    co2_saved_kg: f64,
    #[serde(serialize_with = "round2")]
    percentage_saved: f64,
    #[serde(serialize_with = "round2")]
    distance_saved_km: f64,
}

impl OptimizationComparison {
    /// Combines the two distances with their computed savings.
    pub fn new(unoptimized_distance_km: f64, optimized_distance_km: f64, savings: &SavingsResult) -> Self {
        Self {
            unoptimized_distance_km,
            optimized_distance_km,
            co2_saved_kg: savings.co2_saved_kg(),
            percentage_saved: savings.percentage_saved(),
            distance_saved_km: savings.distance_saved_km(),
        }
    }

    /// Σ 2·d(depot, pickup) over all included pickups.
    pub fn unoptimized_distance_km(&self) -> f64 {
        self.unoptimized_distance_km
    }

    /// Σ route distances.
    pub fn optimized_distance_km(&self) -> f64 {
        self.optimized_distance_km
    }

    /// CO2 avoided relative to the baseline.
    pub fn co2_saved_kg(&self) -> f64 {
        self.co2_saved_kg
    }

    /// Share of baseline emissions avoided, in percent.
    pub fn percentage_saved(&self) -> f64 {
        self.percentage_saved
    }

    /// Kilometers avoided relative to the baseline.
    pub fn distance_saved_km(&self) -> f64 {
        self.distance_saved_km
    }
}

/// Plan-wide totals.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanSummary {
    total_pickups: usize,
    total_routes: usize,
    #[serde(serialize_with = "round2")]
    total_distance_km: f64,
    #[serde(rename = "totalCO2Kg", serialize_with = "round2")]
    total_co2_kg: f64,
    #[serde(serialize_with = "round2")]
    estimated_total_time_minutes: f64,
    optimization: OptimizationComparison,
}

impl PlanSummary {
    /// Sums the per-route figures and attaches the baseline comparison.
    pub fn from_routes(routes: &[Route], optimization: OptimizationComparison) -> Self {
        Self {
            total_pickups: routes.iter().map(Route::stops).sum(),
            total_routes: routes.len(),
            total_distance_km: routes.iter().map(Route::total_distance_km).sum(),
            total_co2_kg: routes.iter().map(|r| r.emissions().co2_kg()).sum(),
            estimated_total_time_minutes: routes.iter().map(Route::estimated_time_minutes).sum(),
            optimization,
        }
    }

    /// Pickups served across all routes.
    pub fn total_pickups(&self) -> usize {
        self.total_pickups
    }

    /// Number of routes.
    pub fn total_routes(&self) -> usize {
        self.total_routes
    }

    /// Sum of route distances in kilometers.
    pub fn total_distance_km(&self) -> f64 {
        self.total_distance_km
    }

    /// Sum of route emissions in kg CO2.
    pub fn total_co2_kg(&self) -> f64 {
        self.total_co2_kg
    }

    /// Sum of estimated route times in minutes.
    pub fn estimated_total_time_minutes(&self) -> f64 {
        self.estimated_total_time_minutes
    }

    /// Comparison against the one-trip-per-pickup baseline.
    pub fn optimization(&self) -> &OptimizationComparison {
        &self.optimization
    }
}

/// A complete pickup plan: the routes and their summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptimizationResult {
    routes: Vec<Route>,
    summary: PlanSummary,
}

impl OptimizationResult {
    /// Creates a result.
    pub fn new(routes: Vec<Route>, summary: PlanSummary) -> Self {
        Self { routes, summary }
    }

    /// Routes, ordered by route number.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Plan totals.
    pub fn summary(&self) -> &PlanSummary {
        &self.summary
    }

    /// Splits the result into its parts.
    pub fn into_parts(self) -> (Vec<Route>, PlanSummary) {
        (self.routes, self.summary)
    }
}
