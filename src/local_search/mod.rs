//! Local search operators for improving tours.
//!
//! - [`two_opt_improve`] — Intra-route 2-opt edge reversal, O(n²) per pass

mod two_opt;

pub use two_opt::{route_distance, two_opt_improve, TwoOptOutcome};
