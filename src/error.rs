//! Error types for route optimization.

use thiserror::Error;

use crate::models::PickupId;

/// Convenience alias for results carrying a [`RoutingError`].
pub type Result<T> = std::result::Result<T, RoutingError>;

/// Validation failures that stop an optimization before any routing runs.
///
/// Numeric edge cases (zero sampling weight, zero baseline) and
/// non-convergence are not errors; they are handled where they occur.
#[derive(Debug, Error)]
pub enum RoutingError {
    /// The depot is missing, non-numeric or out of range.
    #[error("invalid depot: {reason}")]
    InvalidDepot {
        /// What was wrong with it.
        reason: String,
    },
    /// A pickup has coordinates outside the valid range.
    #[error("pickup {id} has an invalid location")]
    InvalidPickupLocation {
        /// Identifier of the offending pickup.
        id: PickupId,
    },
    /// `maxPickupsPerRoute` was zero.
    #[error("maxPickupsPerRoute must be at least 1")]
    InvalidMaxPickupsPerRoute,
    /// A time window bound is not an hour of the day.
    #[error("invalid time window {start_hour}..={end_hour}: hours must be 0-23")]
    InvalidTimeWindow {
        /// Requested start hour.
        start_hour: u8,
        /// Requested end hour.
        end_hour: u8,
    },
    /// The request contained no pickups at all.
    #[error("no pickups available for route optimization")]
    NoPickups,
    /// Every pickup was excluded by the time window.
    #[error("no pickups available between {start_hour}:00 and {end_hour}:59")]
    NoPickupsInWindow {
        /// Window start hour.
        start_hour: u8,
        /// Window end hour.
        end_hour: u8,
    },
    /// The request body could not be parsed.
    #[error("malformed optimization request")]
    MalformedRequest(#[source] serde_json::Error),
    /// The optimizer configuration could not be parsed.
    #[error("invalid optimizer configuration")]
    InvalidConfig(#[source] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            RoutingError::NoPickups.to_string(),
            "no pickups available for route optimization"
        );
        assert_eq!(
            RoutingError::NoPickupsInWindow {
                start_hour: 9,
                end_hour: 12
            }
            .to_string(),
            "no pickups available between 9:00 and 12:59"
        );
        assert_eq!(
            RoutingError::InvalidPickupLocation {
                id: PickupId::Text("p-9".into())
            }
            .to_string(),
            "pickup p-9 has an invalid location"
        );
    }

    #[test]
    fn test_source_is_kept() {
        use std::error::Error as _;
        let parse_err = serde_json::from_str::<u8>("x").unwrap_err();
        let err = RoutingError::MalformedRequest(parse_err);
        assert!(err.source().is_some());
    }
}
