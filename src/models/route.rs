//! Tours and the routes built from them.

use serde::Serialize;

use super::{round2, GeoPoint, Located, Pickup, PickupId, VehicleClass};
use crate::emissions::EmissionsResult;

/// A closed visiting order over one cluster's pickups.
///
/// `order` holds indices into the cluster's pickup slice; the depot is
/// implicit at both ends. An empty order is the degenerate tour `[depot]`.
///
/// # Examples
///
/// ```
/// use pickup_routing::models::Tour;
///
/// let tour = Tour::new(vec![2, 0, 1], 12.0, 10.5, 1);
/// assert_eq!(tour.stops(), 3);
/// assert!(tour.distance_km() <= tour.construction_distance_km());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Tour {
    order: Vec<usize>,
    construction_distance_km: f64,
    distance_km: f64,
    two_opt_passes: usize,
}

impl Tour {
    /// Creates a tour.
    pub fn new(
        order: Vec<usize>,
        construction_distance_km: f64,
        distance_km: f64,
        two_opt_passes: usize,
    ) -> Self {
        Self {
            order,
            construction_distance_km,
            distance_km,
            two_opt_passes,
        }
    }

    /// The degenerate tour that never leaves the depot.
    pub fn empty() -> Self {
        Self::new(Vec::new(), 0.0, 0.0, 0)
    }

    /// Visit order as indices into the cluster's pickups.
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    /// Number of pickups visited.
    pub fn stops(&self) -> usize {
        self.order.len()
    }

    /// Returns `true` if the tour visits no pickups.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Length of the nearest-neighbor tour before 2-opt.
    pub fn construction_distance_km(&self) -> f64 {
        self.construction_distance_km
    }

    /// Length of the final tour, depot to depot.
    pub fn distance_km(&self) -> f64 {
        self.distance_km
    }

    /// Number of 2-opt passes that were run.
    pub fn two_opt_passes(&self) -> usize {
        self.two_opt_passes
    }

    /// Expands the tour into its full stop sequence, depot first and last.
    pub fn sequence(&self, depot: GeoPoint, pickups: &[Pickup]) -> Vec<SequenceStop> {
        let mut stops = Vec::with_capacity(self.order.len() + 2);
        stops.push(SequenceStop::depot(depot));
        for &idx in &self.order {
            stops.push(SequenceStop::pickup(&pickups[idx]));
        }
        if !self.order.is_empty() {
            stops.push(SequenceStop::depot(depot));
        }
        stops
    }
}

/// One stop in a rendered route sequence.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum SequenceStop {
    /// The depot (first and last stop).
    Depot {
        /// Latitude.
        lat: f64,
        /// Longitude.
        lon: f64,
    },
    /// A pickup.
    Pickup {
        /// Pickup identifier.
        id: PickupId,
        /// Latitude.
        lat: f64,
        /// Longitude.
        lon: f64,
    },
}

impl SequenceStop {
    fn depot(point: GeoPoint) -> Self {
        SequenceStop::Depot {
            lat: point.lat(),
            lon: point.lon(),
        }
    }

    fn pickup(pickup: &Pickup) -> Self {
        let loc = pickup.location();
        SequenceStop::Pickup {
            id: pickup.id().clone(),
            lat: loc.lat(),
            lon: loc.lon(),
        }
    }

    /// Position of this stop.
    pub fn location(&self) -> GeoPoint {
        match *self {
            SequenceStop::Depot { lat, lon } | SequenceStop::Pickup { lat, lon, .. } => {
                GeoPoint::from_raw(lat, lon)
            }
        }
    }

    /// Returns `true` for the depot stop.
    pub fn is_depot(&self) -> bool {
        matches!(self, SequenceStop::Depot { .. })
    }
}

/// A scored route driven by one vehicle.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    route_number: usize,
    pickups: Vec<Pickup>,
    optimized_sequence: Vec<SequenceStop>,
    #[serde(serialize_with = "round2")]
    total_distance_km: f64,
    #[serde(serialize_with = "round2")]
    estimated_time_minutes: f64,
    stops: usize,
    emissions: EmissionsResult,
    vehicle_type: VehicleClass,
}

impl Route {
    /// Builds a route from a solved tour over `cluster` (pickups in cluster order).
    pub fn from_tour(
        route_number: usize,
        depot: GeoPoint,
        cluster: &[Pickup],
        tour: &Tour,
        estimated_time_minutes: f64,
        emissions: EmissionsResult,
    ) -> Self {
        Self {
            route_number,
            pickups: tour.order().iter().map(|&i| cluster[i].clone()).collect(),
            optimized_sequence: tour.sequence(depot, cluster),
            total_distance_km: tour.distance_km(),
            estimated_time_minutes,
            stops: tour.stops(),
            vehicle_type: emissions.vehicle_type(),
            emissions,
        }
    }

    /// 1-based route number.
    pub fn route_number(&self) -> usize {
        self.route_number
    }

    /// Pickups in visiting order.
    pub fn pickups(&self) -> &[Pickup] {
        &self.pickups
    }

    /// Full stop sequence, starting and ending at the depot.
    pub fn optimized_sequence(&self) -> &[SequenceStop] {
        &self.optimized_sequence
    }

    /// Tour length in kilometers.
    pub fn total_distance_km(&self) -> f64 {
        self.total_distance_km
    }

    /// Driving plus service time in minutes.
    pub fn estimated_time_minutes(&self) -> f64 {
        self.estimated_time_minutes
    }

    /// Number of pickups on this route.
    pub fn stops(&self) -> usize {
        self.stops
    }

    /// Emissions for this route.
    pub fn emissions(&self) -> &EmissionsResult {
        &self.emissions
    }

    /// Vehicle class used for scoring.
    pub fn vehicle_type(&self) -> VehicleClass {
        self.vehicle_type
    }
}
