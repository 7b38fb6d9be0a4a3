//! K-Means clustering over geographic points.
//!
//! # Algorithm
//!
//! 1. Seed `k` centroids with [`kmeans_plus_plus`].
//! 2. Assign every item to its nearest centroid (haversine, ties to the
//!    lowest cluster index).
//! 3. Move each centroid to the arithmetic mean lat/lon of its items. A
//!    cluster left without items is re-seeded at a random item.
//! 4. Stop once no centroid moved more than the tolerance, or after
//!    `max_iterations` rounds.
//!
//! # Complexity
//!
//! O(n·k) per iteration, at most `max_iterations` iterations.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use super::kmeans_plus_plus;
use crate::models::{GeoPoint, Located};

/// Tunables for [`KMeans`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct KMeansConfig {
    /// Hard cap on assignment/update rounds.
    pub max_iterations: usize,
    /// Centroid movement (km) below which the clustering counts as converged.
    pub tolerance_km: f64,
}

impl Default for KMeansConfig {
    fn default() -> Self {
        Self {
            max_iterations: 50,
            tolerance_km: 0.001,
        }
    }
}

impl KMeansConfig {
    /// Sets the iteration cap.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Sets the convergence tolerance in kilometers.
    pub fn with_tolerance_km(mut self, tolerance_km: f64) -> Self {
        self.tolerance_km = tolerance_km;
        self
    }
}

/// One item's cluster membership.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClusterAssignment {
    /// Index of the item in the clustered slice.
    pub index: usize,
    /// Cluster the item belongs to.
    pub cluster: usize,
    /// Distance from the item to its cluster's final centroid, in km.
    pub distance_to_centroid_km: f64,
}

/// Output of a clustering run.
#[derive(Debug, Clone, PartialEq)]
pub struct Clustering {
    assignments: Vec<ClusterAssignment>,
    centroids: Vec<GeoPoint>,
    iterations: usize,
    converged: bool,
}

impl Clustering {
    /// One assignment per input item, in input order.
    pub fn assignments(&self) -> &[ClusterAssignment] {
        &self.assignments
    }

    /// Final centroids, indexed by cluster.
    pub fn centroids(&self) -> &[GeoPoint] {
        &self.centroids
    }

    /// Number of clusters.
    pub fn num_clusters(&self) -> usize {
        self.centroids.len()
    }

    /// Assignment/update rounds that were run.
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// `false` if the iteration cap was hit before centroids settled.
    pub fn converged(&self) -> bool {
        self.converged
    }

    /// Item indices grouped by cluster. Clusters may be empty.
    pub fn members(&self) -> Vec<Vec<usize>> {
        let mut groups = vec![Vec::new(); self.num_clusters()];
        for a in &self.assignments {
            groups[a.cluster].push(a.index);
        }
        groups
    }
}

/// K-Means clusterer with K-Means++ seeding.
///
/// # Examples
///
/// ```
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
/// use pickup_routing::clustering::KMeans;
/// use pickup_routing::models::GeoPoint;
///
/// let points = vec![
///     GeoPoint::new(0.0, 0.0).unwrap(),
///     GeoPoint::new(0.0, 0.01).unwrap(),
///     GeoPoint::new(10.0, 10.0).unwrap(),
///     GeoPoint::new(10.0, 10.01).unwrap(),
/// ];
/// let mut rng = StdRng::seed_from_u64(42);
/// let clustering = KMeans::default().cluster(&points, 2, &mut rng);
/// let a = clustering.assignments();
/// assert_eq!(a[0].cluster, a[1].cluster);
/// assert_eq!(a[2].cluster, a[3].cluster);
/// assert_ne!(a[0].cluster, a[2].cluster);
/// ```
#[derive(Debug, Clone, Default)]
pub struct KMeans {
    config: KMeansConfig,
}

impl KMeans {
    /// Creates a clusterer with the given configuration.
    pub fn new(config: KMeansConfig) -> Self {
        Self { config }
    }

    /// Partitions `items` into `k` clusters.
    ///
    /// `k == 0` is treated as 1. With `items.len() <= k` every item becomes
    /// its own cluster, numbered by position, and no iteration runs.
    #[instrument(level = "debug", skip_all, fields(n = items.len(), k = k))]
    pub fn cluster<T, R>(&self, items: &[T], k: usize, rng: &mut R) -> Clustering
    where
        T: Located,
        R: Rng + ?Sized,
    {
        let k = k.max(1);
        let points: Vec<GeoPoint> = items.iter().map(Located::location).collect();

        if points.len() <= k {
            return singletons(points);
        }

        let mut centroids = kmeans_plus_plus(&points, k, rng);
        let mut labels = vec![0usize; points.len()];
        let mut iterations = 0;
        let mut converged = false;

        while iterations < self.config.max_iterations {
            iterations += 1;
            assign(&points, &centroids, &mut labels);

            let updated = update_centroids(&points, &labels, k, rng);
            let shift = centroids
                .iter()
                .zip(&updated)
                .map(|(old, new)| old.distance_to(new))
                .fold(0.0, f64::max);
            centroids = updated;

            if shift < self.config.tolerance_km {
                converged = true;
                break;
            }
        }

        if converged {
            debug!(iterations, "k-means converged");
        } else {
            debug!(iterations, "k-means hit iteration cap");
        }

        let distances = assign(&points, &centroids, &mut labels);
        let assignments = labels
            .iter()
            .zip(distances)
            .enumerate()
            .map(|(index, (&cluster, distance_to_centroid_km))| ClusterAssignment {
                index,
                cluster,
                distance_to_centroid_km,
            })
            .collect();

        Clustering {
            assignments,
            centroids,
            iterations,
            converged,
        }
    }
}

fn singletons(points: Vec<GeoPoint>) -> Clustering {
    let assignments = (0..points.len())
        .map(|i| ClusterAssignment {
            index: i,
            cluster: i,
            distance_to_centroid_km: 0.0,
        })
        .collect();
    Clustering {
        assignments,
        centroids: points,
        iterations: 0,
        converged: true,
    }
}

/// Labels each point with its nearest centroid; returns the distances.
fn assign(points: &[GeoPoint], centroids: &[GeoPoint], labels: &mut [usize]) -> Vec<f64> {
    points
        .iter()
        .zip(labels.iter_mut())
        .map(|(p, label)| {
            let mut best = 0;
            let mut best_dist = f64::INFINITY;
            for (c, centroid) in centroids.iter().enumerate() {
                let d = p.distance_to(centroid);
                if d < best_dist {
                    best_dist = d;
                    best = c;
                }
            }
            *label = best;
            best_dist
        })
        .collect()
}

fn update_centroids<R: Rng + ?Sized>(
    points: &[GeoPoint],
    labels: &[usize],
    k: usize,
    rng: &mut R,
) -> Vec<GeoPoint> {
    (0..k)
        .map(|c| {
            let members = points
                .iter()
                .zip(labels)
                .filter(|&(_, &l)| l == c)
                .map(|(p, _)| p);
            GeoPoint::mean(members).unwrap_or_else(|| {
                debug!(cluster = c, "re-seeding empty cluster");
                points[rng.random_range(0..points.len())]
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn pt(lat: f64, lon: f64) -> GeoPoint {
        GeoPoint::new(lat, lon).expect("valid")
    }

    fn two_blobs() -> Vec<GeoPoint> {
        let mut pts = Vec::new();
        for i in 0..5 {
            pts.push(pt(40.0 + i as f64 * 0.001, -74.0));
            pts.push(pt(41.0 + i as f64 * 0.001, -73.0));
        }
        pts
    }

    #[test]
    fn test_singletons_when_few_points() {
        let pts = vec![pt(1.0, 1.0), pt(2.0, 2.0)];
        let c = KMeans::default().cluster(&pts, 3, &mut StdRng::seed_from_u64(0));
        assert_eq!(c.num_clusters(), 2);
        assert_eq!(c.iterations(), 0);
        for (i, a) in c.assignments().iter().enumerate() {
            assert_eq!(a.cluster, i);
            assert_eq!(a.distance_to_centroid_km, 0.0);
        }
    }

    #[test]
    fn test_empty_input() {
        let c = KMeans::default().cluster::<GeoPoint, _>(&[], 2, &mut StdRng::seed_from_u64(0));
        assert!(c.assignments().is_empty());
    }

    #[test]
    fn test_zero_k_means_one_cluster() {
        let pts = two_blobs();
        let c = KMeans::default().cluster(&pts, 0, &mut StdRng::seed_from_u64(0));
        assert_eq!(c.num_clusters(), 1);
        assert!(c.assignments().iter().all(|a| a.cluster == 0));
    }

    #[test]
    fn test_separates_blobs() {
        let pts = two_blobs();
        for seed in 0..10 {
            let c = KMeans::default().cluster(&pts, 2, &mut StdRng::seed_from_u64(seed));
            assert!(c.converged());
            let a = c.assignments();
            // even indices are the first blob, odd the second
            for i in (0..pts.len()).step_by(2) {
                assert_eq!(a[i].cluster, a[0].cluster, "seed {seed}");
                assert_eq!(a[i + 1].cluster, a[1].cluster, "seed {seed}");
            }
            assert_ne!(a[0].cluster, a[1].cluster, "seed {seed}");
        }
    }

    #[test]
    fn test_every_item_assigned_once() {
        let pts: Vec<GeoPoint> = (0..40)
            .map(|i| pt((i * 7 % 13) as f64 * 0.1, (i * 3 % 11) as f64 * 0.1))
            .collect();
        let c = KMeans::default().cluster(&pts, 4, &mut StdRng::seed_from_u64(5));
        assert_eq!(c.assignments().len(), pts.len());
        let mut seen: Vec<usize> = c.members().into_iter().flatten().collect();
        seen.sort_unstable();
        assert_eq!(seen, (0..pts.len()).collect::<Vec<_>>());
        assert!(c.assignments().iter().all(|a| a.cluster < 4));
    }

    #[test]
    fn test_identical_points_do_not_panic() {
        let pts = vec![pt(3.0, 3.0); 8];
        let c = KMeans::default().cluster(&pts, 3, &mut StdRng::seed_from_u64(11));
        assert_eq!(c.assignments().len(), 8);
        assert!(c.assignments().iter().all(|a| a.distance_to_centroid_km == 0.0));
    }

    #[test]
    fn test_iteration_cap() {
        let pts = two_blobs();
        let km = KMeans::new(KMeansConfig::default().with_max_iterations(1).with_tolerance_km(0.0));
        let c = km.cluster(&pts, 2, &mut StdRng::seed_from_u64(2));
        assert_eq!(c.iterations(), 1);
        assert!(!c.converged());
        assert_eq!(c.assignments().len(), pts.len());
    }

    #[test]
    fn test_distance_to_centroid_matches() {
        let pts = two_blobs();
        let c = KMeans::default().cluster(&pts, 2, &mut StdRng::seed_from_u64(8));
        for a in c.assignments() {
            let expected = pts[a.index].distance_to(&c.centroids()[a.cluster]);
            assert!((a.distance_to_centroid_km - expected).abs() < 1e-12);
        }
    }

    #[test]
    fn test_seeded_runs_are_identical() {
        let pts: Vec<GeoPoint> = (0..30).map(|i| pt((i % 6) as f64, (i / 6) as f64)).collect();
        let a = KMeans::default().cluster(&pts, 3, &mut StdRng::seed_from_u64(77));
        let b = KMeans::default().cluster(&pts, 3, &mut StdRng::seed_from_u64(77));
        assert_eq!(a, b);
    }
}
