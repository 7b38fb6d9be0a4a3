//! CO2 emission scoring.
//!
//! An [`EmissionFactors`] table maps each [`VehicleClass`](crate::models::VehicleClass)
//! to kilograms of CO2 per kilometer; [`EmissionsModel`] applies it to route
//! distances and to the savings against an unoptimized baseline.

mod factors;
mod model;

pub use factors::EmissionFactors;
pub use model::{EmissionsModel, EmissionsResult, SavingsResult};
