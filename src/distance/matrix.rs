//! Dense distance matrix.

use crate::models::GeoPoint;

/// A dense n×n distance matrix (kilometers) stored in row-major order.
///
/// Built from haversine distances between points. By convention the tour
/// solver places the depot at index 0 and the cluster's pickups after it.
///
/// # Examples
///
/// ```
/// use pickup_routing::models::GeoPoint;
/// use pickup_routing::distance::DistanceMatrix;
///
/// let points = vec![
///     GeoPoint::new(0.0, 0.0).unwrap(),
///     GeoPoint::new(0.0, 1.0).unwrap(),
///     GeoPoint::new(0.0, 3.0).unwrap(),
/// ];
/// let dm = DistanceMatrix::from_points(&points);
/// assert_eq!(dm.size(), 3);
/// assert!(dm.get(0, 1) < dm.get(0, 2));
/// ```
#[derive(Debug, Clone)]
pub struct DistanceMatrix {
    data: Vec<f64>,
    size: usize,
}

impl DistanceMatrix {
    /// Creates a distance matrix of the given size, initialized to zero.
    pub fn new(size: usize) -> Self {
        Self {
            data: vec![0.0; size * size],
            size,
        }
    }

    /// Computes a great-circle distance matrix.
    pub fn from_points(points: &[GeoPoint]) -> Self {
        let n = points.len();
        let mut dm = Self::new(n);
        for i in 0..n {
            for j in (i + 1)..n {
                let d = points[i].distance_to(&points[j]);
                dm.set(i, j, d);
                dm.set(j, i, d);
            }
        }
        dm
    }

    /// Returns the distance from location `from` to location `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.size + to]
    }

    /// Sets the distance from location `from` to location `to`.
    pub fn set(&mut self, from: usize, to: usize, distance: f64) {
        self.data[from * self.size + to] = distance;
    }

    /// Number of locations in this matrix.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns `true` if the matrix is symmetric within the given tolerance.
    pub fn is_symmetric(&self, tol: f64) -> bool {
        for i in 0..self.size {
            for j in (i + 1)..self.size {
                if (self.get(i, j) - self.get(j, i)).abs() > tol {
                    return false;
                }
            }
        }
        true
    }

    /// Returns the nearest of `candidates` to `from`.
    ///
    /// Ties go to the candidate listed first. Returns `None` if `candidates`
    /// is empty.
    pub fn nearest_neighbor(&self, from: usize, candidates: &[usize]) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for &c in candidates {
            let d = self.get(from, c);
            match best {
                Some((_, bd)) if d >= bd => {}
                _ => best = Some((c, d)),
            }
        }
        best.map(|(c, _)| c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_points() -> Vec<GeoPoint> {
        vec![
            GeoPoint::new(0.0, 0.0).expect("valid"),
            GeoPoint::new(0.0, 1.0).expect("valid"),
            GeoPoint::new(0.0, 2.0).expect("valid"),
        ]
    }

    #[test]
    fn test_from_points() {
        let dm = DistanceMatrix::from_points(&sample_points());
        assert_eq!(dm.size(), 3);
        assert!(dm.get(0, 0).abs() < 1e-12);
        assert!((dm.get(0, 2) - 2.0 * dm.get(0, 1)).abs() < 1e-6);
    }

    #[test]
    fn test_symmetric() {
        let dm = DistanceMatrix::from_points(&sample_points());
        assert!(dm.is_symmetric(1e-10));
    }

    #[test]
    fn test_set_get() {
        let mut dm = DistanceMatrix::new(3);
        dm.set(0, 1, 42.0);
        assert_eq!(dm.get(0, 1), 42.0);
        assert_eq!(dm.get(1, 0), 0.0);
        assert!(!dm.is_symmetric(1e-10));
    }

    #[test]
    fn test_nearest_neighbor() {
        let dm = DistanceMatrix::from_points(&sample_points());
        assert_eq!(dm.nearest_neighbor(0, &[1, 2]), Some(1));
        assert_eq!(dm.nearest_neighbor(0, &[2]), Some(2));
        assert_eq!(dm.nearest_neighbor(0, &[]), None);
    }

    #[test]
    fn test_nearest_neighbor_tie_keeps_first() {
        let points = vec![
            GeoPoint::new(0.0, 0.0).expect("valid"),
            GeoPoint::new(0.0, 1.0).expect("valid"),
            GeoPoint::new(0.0, -1.0).expect("valid"),
        ];
        let dm = DistanceMatrix::from_points(&points);
        assert_eq!(dm.nearest_neighbor(0, &[2, 1]), Some(2));
        assert_eq!(dm.nearest_neighbor(0, &[1, 2]), Some(1));
    }
}
