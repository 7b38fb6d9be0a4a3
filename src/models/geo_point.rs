//! Geographic point type.

use serde::{Deserialize, Serialize};

use crate::distance::haversine_km;

/// A latitude/longitude pair in decimal degrees.
///
/// Latitude lies in `[-90, 90]` and longitude in `[-180, 180]`. Use
/// [`GeoPoint::new`] to build a validated point; deserialized points should be
/// checked with [`GeoPoint::is_valid`] before they reach the distance layer.
///
/// # Examples
///
/// ```
/// use pickup_routing::models::GeoPoint;
///
/// let p = GeoPoint::new(52.52, 13.405).unwrap();
/// assert_eq!(p.lat(), 52.52);
/// assert!(GeoPoint::new(91.0, 0.0).is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    lat: f64,
    #[serde(alias = "lng")]
    lon: f64,
}

impl GeoPoint {
    /// Creates a point.
    ///
    /// Returns `None` if either coordinate is non-finite or out of range.
    pub fn new(lat: f64, lon: f64) -> Option<Self> {
        let point = Self { lat, lon };
        point.is_valid().then_some(point)
    }

    pub(crate) fn from_raw(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Latitude in degrees.
    pub fn lat(&self) -> f64 {
        self.lat
    }

    /// Longitude in degrees.
    pub fn lon(&self) -> f64 {
        self.lon
    }

    /// Returns `true` if both coordinates are finite and within range.
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lon.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lon)
    }

    /// Great-circle distance to another point, in kilometers.
    pub fn distance_to(&self, other: &GeoPoint) -> f64 {
        haversine_km(self, other)
    }

    /// Arithmetic mean of the given points, or `None` if empty.
    pub fn mean<'a, I>(points: I) -> Option<GeoPoint>
    where
        I: IntoIterator<Item = &'a GeoPoint>,
    {
        let (mut lat, mut lon, mut n) = (0.0, 0.0, 0usize);
        for p in points {
            lat += p.lat;
            lon += p.lon;
            n += 1;
        }
        if n == 0 {
            return None;
        }
        Some(Self {
            lat: lat / n as f64,
            lon: lon / n as f64,
        })
    }
}

/// Anything with a geographic position.
///
/// The clusterer works over `Located` items so callers can cluster bare points
/// or full pickups without copying them.
pub trait Located {
    /// Position of this item.
    fn location(&self) -> GeoPoint;
}

impl Located for GeoPoint {
    fn location(&self) -> GeoPoint {
        *self
    }
}

impl<T: Located + ?Sized> Located for &T {
    fn location(&self) -> GeoPoint {
        (**self).location()
    }
}
