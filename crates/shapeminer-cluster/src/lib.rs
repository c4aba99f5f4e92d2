//! Radius clustering of equal-length shapelet candidates.
//!
//! Candidates within `d_max` of each other (Euclidean) are linked; clusters
//! are formed greedily around the densest remaining candidate so that every
//! member lies within `d_max` of its representative.

mod config;
mod error;
mod radius;
mod result;

pub use config::RadiusClustering;
pub use error::ClusterError;
pub use result::ClusterResult;
