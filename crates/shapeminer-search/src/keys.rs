//! Composite keys for candidate pools and the BMD table.

use shapeminer_series::{DimensionSubset, Label, SeriesId};

/// Identifies one candidate pool: shapelets of one label, dimension subset
/// and window.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PoolKey {
    /// The label whose series produced the candidates.
    pub label: Label,
    /// Axes the shapelets span.
    pub dims: DimensionSubset,
    /// Shapelet length per axis.
    pub window: usize,
}

impl PoolKey {
    /// Create a pool key.
    #[must_use]
    pub fn new(label: Label, dims: DimensionSubset, window: usize) -> Self {
        Self { label, dims, window }
    }
}

/// Identifies one best-matching distance: a pooled shapelet against one
/// training series.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BmdKey {
    /// The training series.
    pub series: SeriesId,
    /// Position of the shapelet inside its pool.
    pub shapelet: usize,
    /// Label of the pool.
    pub label: Label,
    /// Window of the pool.
    pub window: usize,
    /// Dimension subset of the pool.
    pub dims: DimensionSubset,
}

impl BmdKey {
    /// Key for shapelet `shapelet` of `pool` against `series`.
    #[must_use]
    pub fn new(series: SeriesId, shapelet: usize, pool: &PoolKey) -> Self {
        Self {
            series,
            shapelet,
            label: pool.label.clone(),
            window: pool.window,
            dims: pool.dims.clone(),
        }
    }
}
