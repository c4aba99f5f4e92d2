//! Clustered shapelet pools per label, dimension subset and window.

use std::collections::BTreeMap;

use rayon::prelude::*;
use shapeminer_cluster::RadiusClustering;
use shapeminer_series::DimensionSubset;
use tracing::{debug, info, instrument};

use crate::error::SearchError;
use crate::keys::PoolKey;
use crate::prune::{Candidate, CandidatePruner};

/// Cluster representatives, keyed by pool and iterated in key order.
///
/// Each shapelet is a flattened, axis-major normalized subsequence. A pool
/// is present only if its label produced at least one candidate.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShapeletPools {
    pools: BTreeMap<PoolKey, Vec<Vec<f64>>>,
}

impl ShapeletPools {
    /// Prune and cluster every `(dims, window)` combination in parallel.
    ///
    /// # Errors
    ///
    /// Propagates pruning and clustering errors.
    #[instrument(skip_all, fields(n_dims = dims.len(), n_windows = windows.len()))]
    pub fn build(
        pruner: &CandidatePruner<'_>,
        clustering: &RadiusClustering,
        dims: &[DimensionSubset],
        windows: &[usize],
    ) -> Result<Self, SearchError> {
        let combos: Vec<(&DimensionSubset, usize)> = dims
            .iter()
            .flat_map(|d| windows.iter().map(move |&w| (d, w)))
            .collect();

        let groups = combos
            .par_iter()
            .map(|&(d, w)| -> Result<Vec<(PoolKey, Vec<Vec<f64>>)>, SearchError> {
                let mut out = Vec::new();
                for (label, candidates) in pruner.prune(w, d)? {
                    let representatives = representatives(clustering, candidates)?;
                    debug!(label = %label, dims = %d, window = w, n = representatives.len(), "pool clustered");
                    out.push((PoolKey::new(label, d.clone(), w), representatives));
                }
                Ok(out)
            })
            .collect::<Result<Vec<_>, _>>()?;

        let pools: BTreeMap<_, _> = groups.into_iter().flatten().collect();
        info!(
            n_pools = pools.len(),
            n_shapelets = pools.values().map(Vec::len).sum::<usize>(),
            "shapelet pools built"
        );
        Ok(Self { pools })
    }

    /// Borrow the shapelets of one pool; empty if the pool does not exist.
    #[must_use]
    pub fn get(&self, key: &PoolKey) -> &[Vec<f64>] {
        self.pools.get(key).map_or(&[], Vec::as_slice)
    }

    /// Iterate over `(key, shapelets)` in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&PoolKey, &[Vec<f64>])> + '_ {
        self.pools.iter().map(|(k, v)| (k, v.as_slice()))
    }

    /// Return the number of non-empty pools.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pools.len()
    }

    /// Return true if no pool holds a shapelet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pools.is_empty()
    }

    /// Total number of shapelets across pools.
    #[must_use]
    pub fn n_shapelets(&self) -> usize {
        self.pools.values().map(Vec::len).sum()
    }
}

impl FromIterator<(PoolKey, Vec<Vec<f64>>)> for ShapeletPools {
    fn from_iter<I: IntoIterator<Item = (PoolKey, Vec<Vec<f64>>)>>(iter: I) -> Self {
        Self {
            pools: iter.into_iter().filter(|(_, v)| !v.is_empty()).collect(),
        }
    }
}

/// Values of each cluster representative; provenance is dropped here.
fn representatives(
    clustering: &RadiusClustering,
    candidates: Vec<Candidate>,
) -> Result<Vec<Vec<f64>>, SearchError> {
    let values: Vec<Vec<f64>> = candidates.into_iter().map(|c| c.values).collect();
    let result = clustering.fit(&values)?;
    let mut slots: Vec<Option<Vec<f64>>> = values.into_iter().map(Some).collect();
    Ok(result
        .representatives
        .iter()
        .filter_map(|&i| slots[i].take())
        .collect())
}

#[cfg(test)]
mod tests {
    use shapeminer_series::Label;

    use super::*;

    #[test]
    fn representatives_follow_cluster_order() {
        let clustering = RadiusClustering::new(0.5).unwrap();
        let candidates: Vec<Candidate> = [0.0, 0.3, 5.0, 0.6]
            .iter()
            .enumerate()
            .map(|(i, &x)| Candidate {
                series: shapeminer_series::SeriesId::new(0),
                offset: i,
                values: vec![x],
            })
            .collect();
        let reps = representatives(&clustering, candidates).unwrap();
        // 0.3 reaches both 0.0 and 0.6 and is picked first.
        assert_eq!(reps, vec![vec![0.3], vec![5.0]]);
    }

    #[test]
    fn from_iter_drops_empty_pools() {
        let d = DimensionSubset::new(vec![0]).unwrap();
        let pools: ShapeletPools = [
            (PoolKey::new(Label::from("a"), d.clone(), 3), vec![vec![0.0; 3]]),
            (PoolKey::new(Label::from("b"), d.clone(), 3), vec![]),
        ]
        .into_iter()
        .collect();
        assert_eq!(pools.len(), 1);
        assert_eq!(pools.n_shapelets(), 1);
        assert!(pools.get(&PoolKey::new(Label::from("b"), d, 3)).is_empty());
    }
}
