//! Vehicle class emission factors.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::models::VehicleClass;

/// Factor used when neither the requested class nor medium car is in the table.
const FALLBACK_KG_PER_KM: f64 = 0.15;

/// Kilograms of CO2 emitted per kilometer, by vehicle class.
///
/// The default table holds typical fleet averages. Entries can be overridden
/// or removed; lookups for a class missing from the table fall back to the
/// medium-car factor.
///
/// # Examples
///
/// ```
/// use pickup_routing::emissions::EmissionFactors;
/// use pickup_routing::models::VehicleClass;
///
/// let factors = EmissionFactors::default().with_factor(VehicleClass::Van, 0.3);
/// assert_eq!(factors.factor(VehicleClass::Van), 0.3);
/// assert_eq!(factors.factor(VehicleClass::Electric), 0.05);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmissionFactors {
    kg_per_km: HashMap<VehicleClass, f64>,
}

impl Default for EmissionFactors {
    fn default() -> Self {
        let kg_per_km = [
            (VehicleClass::SmallCar, 0.12),
            (VehicleClass::MediumCar, 0.15),
            (VehicleClass::LargeCar, 0.20),
            (VehicleClass::Van, 0.25),
            (VehicleClass::Truck, 0.35),
            (VehicleClass::Electric, 0.05),
        ]
        .into_iter()
        .collect();
        Self { kg_per_km }
    }
}

impl EmissionFactors {
    /// A table with no entries; every lookup uses the built-in fallback.
    pub fn empty() -> Self {
        Self {
            kg_per_km: HashMap::new(),
        }
    }

    /// Sets the factor for one class.
    pub fn with_factor(mut self, class: VehicleClass, kg_per_km: f64) -> Self {
        self.kg_per_km.insert(class, kg_per_km);
        self
    }

    /// Factor for `class`, falling back to medium car, then to 0.15.
    pub fn factor(&self, class: VehicleClass) -> f64 {
        self.kg_per_km
            .get(&class)
            .or_else(|| self.kg_per_km.get(&VehicleClass::MediumCar))
            .copied()
            .unwrap_or(FALLBACK_KG_PER_KM)
    }
}
