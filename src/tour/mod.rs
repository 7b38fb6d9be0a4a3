//! Single-vehicle tour solving.
//!
//! Combines [`nearest_neighbor_tour`](crate::constructive::nearest_neighbor_tour)
//! construction with [`two_opt_improve`](crate::local_search::two_opt_improve)
//! refinement, and estimates driving plus service time.

mod solver;

pub use solver::{TourConfig, TourSolver};
