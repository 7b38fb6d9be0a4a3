//! K-Means++ seeding.
//!
//! # Algorithm
//!
//! The first centroid is a uniformly random point. Each further centroid is
//! drawn with probability proportional to D(x)², the squared distance from a
//! point to its nearest already-chosen centroid. When every D(x)² is zero
//! (all points coincide with chosen centroids) the draw falls back to
//! uniform.
//!
//! # Reference
//!
//! Arthur, D. & Vassilvitskii, S. (2007). "k-means++: The Advantages of
//! Careful Seeding", *Proc. SODA 2007*, 1027-1035.

use rand::Rng;

use crate::models::{GeoPoint, Located};

/// Picks `k` initial centroids from `items` using K-Means++ sampling.
///
/// Returns fewer than `k` centroids only if `items` is empty.
///
/// # Examples
///
/// ```
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
/// use pickup_routing::clustering::kmeans_plus_plus;
/// use pickup_routing::models::GeoPoint;
///
/// let points = vec![
///     GeoPoint::new(0.0, 0.0).unwrap(),
///     GeoPoint::new(0.0, 0.01).unwrap(),
///     GeoPoint::new(10.0, 10.0).unwrap(),
/// ];
/// let mut rng = StdRng::seed_from_u64(7);
/// let centroids = kmeans_plus_plus(&points, 2, &mut rng);
/// assert_eq!(centroids.len(), 2);
/// ```
pub fn kmeans_plus_plus<T, R>(items: &[T], k: usize, rng: &mut R) -> Vec<GeoPoint>
where
    T: Located,
    R: Rng + ?Sized,
{
    let n = items.len();
    if n == 0 || k == 0 {
        return Vec::new();
    }

    let mut centroids = Vec::with_capacity(k);
    centroids.push(items[rng.random_range(0..n)].location());

    // Squared distance from each item to its nearest chosen centroid.
    let mut weights: Vec<f64> = items
        .iter()
        .map(|it| it.location().distance_to(&centroids[0]).powi(2))
        .collect();

    while centroids.len() < k {
        let next = weighted_index(&weights, rng).unwrap_or_else(|| rng.random_range(0..n));
        let chosen = items[next].location();
        centroids.push(chosen);

        for (w, it) in weights.iter_mut().zip(items) {
            let d2 = it.location().distance_to(&chosen).powi(2);
            if d2 < *w {
                *w = d2;
            }
        }
    }

    centroids
}

/// Draws an index with probability proportional to its weight.
///
/// Returns `None` when the weights sum to zero (or are not finite).
fn weighted_index<R: Rng + ?Sized>(weights: &[f64], rng: &mut R) -> Option<usize> {
    let total: f64 = weights.iter().sum();
    if !total.is_finite() || total <= 0.0 {
        return None;
    }

    let target = rng.random::<f64>() * total;
    let mut acc = 0.0;
    let mut last_positive = None;
    for (i, &w) in weights.iter().enumerate() {
        if w <= 0.0 {
            continue;
        }
        acc += w;
        last_positive = Some(i);
        if target < acc {
            return Some(i);
        }
    }
    // Floating-point shortfall in `acc`.
    last_positive
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn pt(lat: f64, lon: f64) -> GeoPoint {
        GeoPoint::new(lat, lon).expect("valid")
    }

    #[test]
    fn test_returns_k_centroids() {
        let points: Vec<GeoPoint> = (0..10).map(|i| pt(i as f64, 0.0)).collect();
        let mut rng = StdRng::seed_from_u64(1);
        let c = kmeans_plus_plus(&points, 4, &mut rng);
        assert_eq!(c.len(), 4);
        for centroid in &c {
            assert!(points.contains(centroid));
        }
    }

    #[test]
    fn test_empty_input() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(kmeans_plus_plus::<GeoPoint, _>(&[], 3, &mut rng).is_empty());
    }

    #[test]
    fn test_identical_points_fall_back_to_uniform() {
        let points = vec![pt(5.0, 5.0); 6];
        let mut rng = StdRng::seed_from_u64(3);
        let c = kmeans_plus_plus(&points, 3, &mut rng);
        assert_eq!(c, vec![pt(5.0, 5.0); 3]);
    }

    #[test]
    fn test_second_centroid_avoids_zero_weight_points() {
        // Two coincident points and one far point: once a coincident point is
        // chosen first, only the far point carries weight.
        let points = vec![pt(0.0, 0.0), pt(0.0, 0.0), pt(20.0, 20.0)];
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let c = kmeans_plus_plus(&points, 2, &mut rng);
            assert_ne!(c[0], c[1], "seed {seed}");
        }
    }

    #[test]
    fn test_weighted_index_zero_total() {
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(weighted_index(&[0.0, 0.0], &mut rng), None);
        assert_eq!(weighted_index(&[0.0, 2.0, 0.0], &mut rng), Some(1));
    }

    #[test]
    fn test_deterministic_with_seed() {
        let points: Vec<GeoPoint> = (0..25).map(|i| pt((i % 5) as f64, (i / 5) as f64)).collect();
        let a = kmeans_plus_plus(&points, 5, &mut StdRng::seed_from_u64(99));
        let b = kmeans_plus_plus(&points, 5, &mut StdRng::seed_from_u64(99));
        assert_eq!(a, b);
    }
}
