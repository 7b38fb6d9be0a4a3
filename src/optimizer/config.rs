//! Optimizer configuration and per-request options.

use serde::{Deserialize, Serialize};

use crate::clustering::KMeansConfig;
use crate::emissions::EmissionFactors;
use crate::error::{Result, RoutingError};
use crate::models::{HourWindow, VehicleClass};
use crate::tour::TourConfig;

/// Service-level settings shared by every optimization call.
///
/// All fields have defaults, so a partial JSON document is enough:
///
/// ```
/// use pickup_routing::optimizer::OptimizerConfig;
///
/// let config = OptimizerConfig::from_json_str(r#"{
///     "maxPickupsPerRoute": 10,
///     "tour": { "averageSpeedKmh": 40.0 },
///     "seed": 7
/// }"#).unwrap();
/// assert_eq!(config.max_pickups_per_route, 10);
/// assert_eq!(config.tour.average_speed_kmh, 40.0);
/// assert_eq!(config.tour.service_minutes_per_stop, 5.0);
/// assert_eq!(config.kmeans.max_iterations, 50);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OptimizerConfig {
    /// Route size used when a request does not set one.
    pub max_pickups_per_route: usize,
    /// Clustering tunables.
    pub kmeans: KMeansConfig,
    /// Tour solving and time estimation tunables.
    pub tour: TourConfig,
    /// kg CO2/km per vehicle class.
    pub emission_factors: EmissionFactors,
    /// Fixed RNG seed; OS entropy when absent.
    pub seed: Option<u64>,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            max_pickups_per_route: 15,
            kmeans: KMeansConfig::default(),
            tour: TourConfig::default(),
            emission_factors: EmissionFactors::default(),
            seed: None,
        }
    }
}

impl OptimizerConfig {
    /// Parses a configuration from JSON, filling omitted fields with defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(RoutingError::InvalidConfig)
    }

    /// Sets the default route size.
    pub fn with_max_pickups_per_route(mut self, max: usize) -> Self {
        self.max_pickups_per_route = max;
        self
    }

    /// Sets the clustering tunables.
    pub fn with_kmeans(mut self, kmeans: KMeansConfig) -> Self {
        self.kmeans = kmeans;
        self
    }

    /// Sets the tour tunables.
    pub fn with_tour(mut self, tour: TourConfig) -> Self {
        self.tour = tour;
        self
    }

    /// Replaces the emission factor table.
    pub fn with_emission_factors(mut self, factors: EmissionFactors) -> Self {
        self.emission_factors = factors;
        self
    }

    /// Fixes the RNG seed, making runs reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// Options supplied with one optimization request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OptimizeOptions {
    /// Vehicle class name; unknown names score as a medium car.
    pub vehicle_type: Option<String>,
    /// Upper bound used to size the number of routes.
    pub max_pickups_per_route: Option<usize>,
    /// Only pickups scheduled within this window are routed.
    pub time_window: Option<HourWindow>,
}

impl OptimizeOptions {
    /// Sets the vehicle class.
    pub fn with_vehicle(mut self, class: VehicleClass) -> Self {
        self.vehicle_type = Some(class.as_str().to_owned());
        self
    }

    /// Sets the route size.
    pub fn with_max_pickups_per_route(mut self, max: usize) -> Self {
        self.max_pickups_per_route = Some(max);
        self
    }

    /// Restricts routing to pickups scheduled within `window`.
    pub fn with_time_window(mut self, window: HourWindow) -> Self {
        self.time_window = Some(window);
        self
    }

    /// Resolved vehicle class.
    pub fn vehicle_class(&self) -> VehicleClass {
        self.vehicle_type
            .as_deref()
            .map(VehicleClass::lenient)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let c = OptimizerConfig::default();
        assert_eq!(c.max_pickups_per_route, 15);
        assert_eq!(c.kmeans.tolerance_km, 0.001);
        assert_eq!(c.tour.max_two_opt_passes, 1000);
        assert!(c.seed.is_none());
    }

    #[test]
    fn test_empty_json_is_default() {
        assert_eq!(OptimizerConfig::from_json_str("{}").expect("parse"), OptimizerConfig::default());
    }

    #[test]
    fn test_invalid_json() {
        let err = OptimizerConfig::from_json_str("{\"seed\": \"x\"}").unwrap_err();
        assert!(matches!(err, RoutingError::InvalidConfig(_)));
    }

    #[test]
    fn test_emission_override_from_json() {
        let c = OptimizerConfig::from_json_str(r#"{"emissionFactors": {"van": 0.4}}"#).expect("parse");
        assert_eq!(c.emission_factors.factor(VehicleClass::Van), 0.4);
    }

    #[test]
    fn test_options_vehicle_class() {
        assert_eq!(OptimizeOptions::default().vehicle_class(), VehicleClass::MediumCar);
        let o = OptimizeOptions::default().with_vehicle(VehicleClass::Truck);
        assert_eq!(o.vehicle_class(), VehicleClass::Truck);
        let o = OptimizeOptions {
            vehicle_type: Some("spaceship".into()),
            ..OptimizeOptions::default()
        };
        assert_eq!(o.vehicle_class(), VehicleClass::MediumCar);
    }

    #[test]
    fn test_options_from_json() {
        let o: OptimizeOptions = serde_json::from_str(
            r#"{"vehicleType": "van", "maxPickupsPerRoute": 5, "timeWindow": {"startHour": 8, "endHour": 12}}"#,
        )
        .expect("parse");
        assert_eq!(o.vehicle_class(), VehicleClass::Van);
        assert_eq!(o.max_pickups_per_route, Some(5));
        assert_eq!(o.time_window, HourWindow::new(8, 12));
    }
}
