//! Multivariate time series primitives for shapelet discovery.
//!
//! Pure math library with no I/O. Provides validated multivariate series,
//! dimension subsets, memoized local-extrema detection, z-normalized
//! subsequence windows with a noise floor, and batched Euclidean
//! best-matching distances.

mod dims;
mod distance;
mod error;
mod extrema;
mod label;
mod profile;
mod series;
mod subsequence;

pub use dims::DimensionSubset;
pub use distance::{euclidean, squared_euclidean};
pub use error::SeriesError;
pub use extrema::{Extrema, ExtremaIndexer, find_extrema};
pub use label::Label;
pub use profile::{best_match_distances, distance_profile};
pub use series::{SeriesId, TimeSeries};
pub use subsequence::{NormalizedWindows, max_subsequence_std, mean_std, z_normalize};
