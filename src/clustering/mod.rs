//! Geographic clustering of pickups.
//!
//! - [`KMeans`] — Lloyd iterations over lat/lon centroids with haversine
//!   assignment
//! - [`kmeans_plus_plus`] — distance-weighted seeding (Arthur & Vassilvitskii, 2007)

mod kmeans;
mod seeding;

pub use kmeans::{ClusterAssignment, Clustering, KMeans, KMeansConfig};
pub use seeding::kmeans_plus_plus;
