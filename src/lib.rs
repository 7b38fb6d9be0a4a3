//! # pickup-routing
//!
//! Pickup route optimization for donated-item collection: partitions scattered
//! pickups into vehicle-sized groups, orders each group into a short closed
//! tour from the depot, and scores the plan's time and CO2 emissions against
//! a naive one-round-trip-per-pickup baseline.
//!
//! ## Modules
//!
//! - [`models`] — Domain types (GeoPoint, Pickup, VehicleClass, Tour, Route, results)
//! - [`distance`] — Haversine distance and distance matrix
//! - [`clustering`] — K-Means with K-Means++ seeding
//! - [`constructive`] — Nearest-neighbor tour construction
//! - [`local_search`] — 2-opt tour improvement
//! - [`tour`] — Per-cluster tour solver and time estimates
//! - [`emissions`] — Emission factor table, emissions and savings
//! - [`optimizer`] — Orchestration and the request/response contract
//! - [`error`] — Validation errors

pub mod clustering;
pub mod constructive;
pub mod distance;
pub mod emissions;
pub mod error;
pub mod local_search;
pub mod models;
pub mod optimizer;
pub mod tour;

pub use error::{Result, RoutingError};
