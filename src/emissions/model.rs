//! Emission and savings computation.

use serde::Serialize;

use super::EmissionFactors;
use crate::models::{round2, VehicleClass};

/// CO2 emitted over a distance by one vehicle class.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmissionsResult {
    #[serde(serialize_with = "round2")]
    distance_km: f64,
    #[serde(rename = "co2EmittedKg", serialize_with = "round2")]
    co2_kg: f64,
    factor_kg_per_km: f64,
    vehicle_type: VehicleClass,
}

impl EmissionsResult {
    /// Distance the emissions were computed for.
    pub fn distance_km(&self) -> f64 {
        self.distance_km
    }

    /// Kilograms of CO2.
    pub fn co2_kg(&self) -> f64 {
        self.co2_kg
    }

    /// Factor that was applied.
    pub fn factor_kg_per_km(&self) -> f64 {
        self.factor_kg_per_km
    }

    /// Vehicle class that was scored.
    pub fn vehicle_type(&self) -> VehicleClass {
        self.vehicle_type
    }
}

/// Savings of an optimized distance against a baseline.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingsResult {
    #[serde(serialize_with = "round2")]
    distance_saved_km: f64,
    #[serde(rename = "co2SavedKg", serialize_with = "round2")]
    co2_saved_kg: f64,
    #[serde(serialize_with = "round2")]
    percentage_saved: f64,
}

impl SavingsResult {
    /// Baseline minus optimized distance. Negative if the plan is longer.
    pub fn distance_saved_km(&self) -> f64 {
        self.distance_saved_km
    }

    /// CO2 avoided.
    pub fn co2_saved_kg(&self) -> f64 {
        self.co2_saved_kg
    }

    /// Avoided share of baseline emissions in percent; 0 when the baseline is 0.
    pub fn percentage_saved(&self) -> f64 {
        self.percentage_saved
    }
}

/// Applies an [`EmissionFactors`] table to distances.
///
/// # Examples
///
/// ```
/// use pickup_routing::emissions::EmissionsModel;
/// use pickup_routing::models::VehicleClass;
///
/// let model = EmissionsModel::default();
/// let e = model.emit(10.0, VehicleClass::Van);
/// assert!((e.co2_kg() - 2.5).abs() < 1e-12);
///
/// let s = model.savings(100.0, 60.0, VehicleClass::MediumCar);
/// assert!((s.co2_saved_kg() - 6.0).abs() < 1e-12);
/// assert!((s.percentage_saved() - 40.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Default)]
pub struct EmissionsModel {
    factors: EmissionFactors,
}

impl EmissionsModel {
    /// Creates a model over the given factor table.
    pub fn new(factors: EmissionFactors) -> Self {
        Self { factors }
    }

    /// The factor table in use.
    pub fn factors(&self) -> &EmissionFactors {
        &self.factors
    }

    /// CO2 emitted driving `distance_km` with `class`.
    pub fn emit(&self, distance_km: f64, class: VehicleClass) -> EmissionsResult {
        let factor = self.factors.factor(class);
        EmissionsResult {
            distance_km,
            co2_kg: distance_km * factor,
            factor_kg_per_km: factor,
            vehicle_type: class,
        }
    }

    /// Savings of `optimized_km` over `unoptimized_km` for `class`.
    pub fn savings(&self, unoptimized_km: f64, optimized_km: f64, class: VehicleClass) -> SavingsResult {
        let factor = self.factors.factor(class);
        let distance_saved_km = unoptimized_km - optimized_km;
        let co2_saved_kg = distance_saved_km * factor;
        let baseline_kg = unoptimized_km * factor;
        let percentage_saved = if baseline_kg > 0.0 {
            co2_saved_kg / baseline_kg * 100.0
        } else {
            0.0
        };
        SavingsResult {
            distance_saved_km,
            co2_saved_kg,
            percentage_saved,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emit_van_ten_km() {
        let e = EmissionsModel::default().emit(10.0, VehicleClass::Van);
        assert!((e.co2_kg() - 2.5).abs() < 1e-12);
        assert_eq!(e.factor_kg_per_km(), 0.25);
        let v = serde_json::to_value(&e).expect("serialize");
        assert_eq!(v["co2EmittedKg"], 2.5);
        assert_eq!(v["vehicleType"], "van");
    }

    #[test]
    fn test_emit_zero_distance() {
        let e = EmissionsModel::default().emit(0.0, VehicleClass::Truck);
        assert_eq!(e.co2_kg(), 0.0);
    }

    #[test]
    fn test_savings_zero_baseline_is_guarded() {
        let s = EmissionsModel::default().savings(0.0, 0.0, VehicleClass::MediumCar);
        assert_eq!(s.percentage_saved(), 0.0);
        assert_eq!(s.co2_saved_kg(), 0.0);
        assert!(s.percentage_saved().is_finite());
    }

    #[test]
    fn test_savings_zero_factor_is_guarded() {
        let model = EmissionsModel::new(EmissionFactors::default().with_factor(VehicleClass::Electric, 0.0));
        let s = model.savings(50.0, 20.0, VehicleClass::Electric);
        assert_eq!(s.percentage_saved(), 0.0);
        assert!((s.distance_saved_km() - 30.0).abs() < 1e-12);
    }

    #[test]
    fn test_savings_negative_when_longer() {
        let s = EmissionsModel::default().savings(10.0, 12.0, VehicleClass::SmallCar);
        assert!(s.co2_saved_kg() < 0.0);
        assert!((s.distance_saved_km() + 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_custom_factors() {
        let model = EmissionsModel::new(EmissionFactors::default().with_factor(VehicleClass::Van, 0.5));
        assert!((model.emit(4.0, VehicleClass::Van).co2_kg() - 2.0).abs() < 1e-12);
    }
}
