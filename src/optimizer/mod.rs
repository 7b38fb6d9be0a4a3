//! Route optimization orchestration.
//!
//! - [`RouteOptimizer`] — validate, filter, cluster, solve and score a pickup plan
//! - [`OptimizerConfig`] / [`OptimizeOptions`] — service settings and per-request options
//! - [`OptimizeRequest`] / [`OptimizationResponse`] — JSON contract with the wrapping service

mod config;
mod request;
mod route_optimizer;

pub use config::{OptimizeOptions, OptimizerConfig};
pub use request::{OptimizationResponse, OptimizeRequest};
pub use route_optimizer::RouteOptimizer;
