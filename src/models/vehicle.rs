//! Vehicle classes used for emission scoring.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::warn;

/// The kind of vehicle driving a route.
///
/// # Examples
///
/// ```
/// use pickup_routing::models::VehicleClass;
///
/// assert_eq!("van".parse::<VehicleClass>(), Ok(VehicleClass::Van));
/// assert_eq!("Medium Car".parse::<VehicleClass>(), Ok(VehicleClass::MediumCar));
/// assert_eq!(VehicleClass::lenient("hovercraft"), VehicleClass::MediumCar);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VehicleClass {
    /// Small petrol/diesel car.
    SmallCar,
    /// Medium petrol/diesel car.
    #[default]
    MediumCar,
    /// Large car or SUV.
    LargeCar,
    /// Light commercial van.
    Van,
    /// Truck.
    Truck,
    /// Battery electric vehicle.
    Electric,
}

impl VehicleClass {
    /// All known classes.
    pub const ALL: [VehicleClass; 6] = [
        VehicleClass::SmallCar,
        VehicleClass::MediumCar,
        VehicleClass::LargeCar,
        VehicleClass::Van,
        VehicleClass::Truck,
        VehicleClass::Electric,
    ];

    /// Canonical snake_case name.
    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleClass::SmallCar => "small_car",
            VehicleClass::MediumCar => "medium_car",
            VehicleClass::LargeCar => "large_car",
            VehicleClass::Van => "van",
            VehicleClass::Truck => "truck",
            VehicleClass::Electric => "electric",
        }
    }

    /// Parses a class name, falling back to [`VehicleClass::MediumCar`] for
    /// unrecognized input.
    pub fn lenient(name: &str) -> VehicleClass {
        name.parse().unwrap_or_else(|_| {
            warn!(vehicle_type = name, "unknown vehicle type, using medium_car");
            VehicleClass::MediumCar
        })
    }
}

impl fmt::Display for VehicleClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a vehicle class name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown vehicle class `{0}`")]
pub struct UnknownVehicleClass(pub String);

impl FromStr for VehicleClass {
    type Err = UnknownVehicleClass;

    /// Accepts `snake_case`, `camelCase`, space- or dash-separated names,
    /// case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .flat_map(char::to_lowercase)
            .collect();
        let class = match normalized.as_str() {
            "smallcar" | "small" => VehicleClass::SmallCar,
            "mediumcar" | "medium" | "car" => VehicleClass::MediumCar,
            "largecar" | "large" | "suv" => VehicleClass::LargeCar,
            "van" => VehicleClass::Van,
            "truck" => VehicleClass::Truck,
            "electric" | "ev" => VehicleClass::Electric,
            _ => return Err(UnknownVehicleClass(s.to_owned())),
        };
        Ok(class)
    }
}
