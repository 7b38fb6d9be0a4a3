//! Haversine great-circle distance on a spherical Earth.

use crate::models::GeoPoint;

/// Mean Earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance between two points, in kilometers.
///
/// Ignores elevation and road topology. Inputs are assumed to be valid
/// coordinates; see [`GeoPoint::is_valid`].
///
/// # Examples
///
/// ```
/// use pickup_routing::distance::haversine_km;
/// use pickup_routing::models::GeoPoint;
///
/// let berlin = GeoPoint::new(52.5200, 13.4050).unwrap();
/// let paris = GeoPoint::new(48.8566, 2.3522).unwrap();
/// assert!((haversine_km(&berlin, &paris) - 878.0).abs() < 10.0);
/// ```
pub fn haversine_km(a: &GeoPoint, b: &GeoPoint) -> f64 {
    let lat1 = a.lat().to_radians();
    let lat2 = b.lat().to_radians();
    let d_lat = (b.lat() - a.lat()).to_radians();
    let d_lon = (b.lon() - a.lon()).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    // Rounding can push h marginally above 1 for antipodal points.
    let c = 2.0 * h.sqrt().min(1.0).asin();

    EARTH_RADIUS_KM * c
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pt(lat: f64, lon: f64) -> GeoPoint {
        GeoPoint::new(lat, lon).expect("valid")
    }

    #[test]
    fn test_same_point_is_zero() {
        let p = pt(36.1, -115.1);
        assert!(haversine_km(&p, &p).abs() < 1e-12);
    }

    #[test]
    fn test_one_degree_on_equator() {
        // 2πR / 360
        let expected = EARTH_RADIUS_KM * std::f64::consts::PI / 180.0;
        let d = haversine_km(&pt(0.0, 0.0), &pt(0.0, 1.0));
        assert!((d - expected).abs() < 1e-9);
        assert!((d - 111.19).abs() < 0.01);
    }

    #[test]
    fn test_symmetric() {
        let a = pt(36.17, -115.14);
        let b = pt(34.05, -118.24);
        assert!((haversine_km(&a, &b) - haversine_km(&b, &a)).abs() < 1e-12);
    }

    #[test]
    fn test_known_distance() {
        // Las Vegas to Los Angeles, ~370 km
        let d = haversine_km(&pt(36.17, -115.14), &pt(34.05, -118.24));
        assert!(d > 350.0 && d < 400.0, "got {d}");
    }

    #[test]
    fn test_antipodal_is_half_circumference() {
        let d = haversine_km(&pt(0.0, 0.0), &pt(0.0, 180.0));
        assert!((d - EARTH_RADIUS_KM * std::f64::consts::PI).abs() < 1e-6);
    }
}
