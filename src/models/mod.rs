//! Domain model types for pickup routing.
//!
//! Geographic points, pickups with their opaque metadata, vehicle classes,
//! tours over one cluster, and the scored routes and plan summary returned to
//! the caller.

mod geo_point;
mod pickup;
mod plan;
mod route;
mod vehicle;

pub use geo_point::{GeoPoint, Located};
pub use pickup::{HourWindow, Pickup, PickupId, SCHEDULED_TIME_KEY};
pub use plan::{OptimizationComparison, OptimizationResult, PlanSummary};
pub use route::{Route, SequenceStop, Tour};
pub use vehicle::{UnknownVehicleClass, VehicleClass};

/// Serializes a float rounded to two decimals.
pub(crate) fn round2<S>(value: &f64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_f64((value * 100.0).round() / 100.0)
}
