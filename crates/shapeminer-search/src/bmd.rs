//! Best-matching distances between every pooled shapelet and every series.

use std::collections::{BTreeMap, HashMap};

use rayon::prelude::*;
use shapeminer_series::{DimensionSubset, SeriesId, best_match_distances};
use tracing::{debug, info, instrument};

use crate::error::SearchError;
use crate::keys::{BmdKey, PoolKey};
use crate::pools::ShapeletPools;
use crate::store::NormalizedStore;

/// Shapelets of every label sharing one `(dims, window)`, stacked in label order.
struct Group<'p> {
    dims: &'p DimensionSubset,
    window: usize,
    shapelets: Vec<&'p [f64]>,
    origin: Vec<(&'p PoolKey, usize)>,
}

fn group_pools(pools: &ShapeletPools) -> Vec<Group<'_>> {
    let mut groups: BTreeMap<(&DimensionSubset, usize), Group<'_>> = BTreeMap::new();
    for (key, shapelets) in pools.iter() {
        let group = groups.entry((&key.dims, key.window)).or_insert_with(|| Group {
            dims: &key.dims,
            window: key.window,
            shapelets: Vec::new(),
            origin: Vec::new(),
        });
        for (i, s) in shapelets.iter().enumerate() {
            group.shapelets.push(s.as_slice());
            group.origin.push((key, i));
        }
    }
    groups.into_values().collect()
}

/// Best-matching distance of every pooled shapelet to every training series.
///
/// Each key is written exactly once, during [`BmdTable::compute`].
#[derive(Debug, Clone, Default)]
pub struct BmdTable {
    n_series: usize,
    distances: HashMap<BmdKey, f64>,
}

impl BmdTable {
    /// Compute all distances, one batched call per `(series, dims, window)`.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`SearchError::MissingWindows`] | the store lacks a pool's window |
    /// | [`SearchError::Series`] | a shapelet does not fit its dims and window |
    #[instrument(skip_all, fields(n_series = n_series, n_pools = pools.len()))]
    pub fn compute(
        pools: &ShapeletPools,
        store: &NormalizedStore,
        n_series: usize,
    ) -> Result<Self, SearchError> {
        let groups = group_pools(pools);
        let units: Vec<(usize, &Group<'_>)> = (0..n_series)
            .flat_map(|s| groups.iter().map(move |g| (s, g)))
            .collect();

        let rows = units
            .par_iter()
            .map(|&(s, group)| -> Result<Vec<(BmdKey, f64)>, SearchError> {
                let id = SeriesId::new(s);
                let windows = store
                    .get(id, group.window)
                    .ok_or(SearchError::MissingWindows { series: s, window: group.window })?;
                let bmds = best_match_distances(&group.shapelets, windows, group.dims)?;
                debug!(series = s, dims = %group.dims, window = group.window, n = bmds.len(), "bmd batch");
                Ok(group
                    .origin
                    .iter()
                    .zip(bmds)
                    .map(|(&(pool, i), d)| (BmdKey::new(id, i, pool), d))
                    .collect())
            })
            .collect::<Result<Vec<_>, _>>()?;

        let distances: HashMap<BmdKey, f64> = rows.into_iter().flatten().collect();
        info!(n_distances = distances.len(), n_groups = groups.len(), "bmd table computed");
        Ok(Self {
            n_series,
            distances,
        })
    }

    /// Return the distance for one key, if computed.
    #[must_use]
    pub fn get(&self, key: &BmdKey) -> Option<f64> {
        self.distances.get(key).copied()
    }

    /// Distances of shapelet `shapelet` of `pool` to every series, in
    /// series order; `None` if any entry is missing.
    #[must_use]
    pub fn feature_vector(&self, pool: &PoolKey, shapelet: usize) -> Option<Vec<f64>> {
        (0..self.n_series)
            .map(|s| self.get(&BmdKey::new(SeriesId::new(s), shapelet, pool)))
            .collect()
    }

    /// Return the number of stored distances.
    #[must_use]
    pub fn len(&self) -> usize {
        self.distances.len()
    }

    /// Return true if no distance is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.distances.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use shapeminer_series::{Label, TimeSeries, euclidean};

    use super::*;
    use crate::dataset::TrainingSet;

    #[test]
    fn matches_brute_force() {
        let series = vec![
            TimeSeries::new(vec![vec![0.0, 1.0, 3.0, 1.0, 0.0, 2.0], vec![1.0, 0.0, 1.0, 4.0, 1.0, 0.0]])
                .unwrap(),
            TimeSeries::new(vec![vec![5.0, 4.0, 3.0, 2.0, 1.0, 0.0], vec![0.0, 0.5, 0.0, 0.5, 0.0, 0.5]])
                .unwrap(),
        ];
        let set = TrainingSet::new(series, vec![BTreeSet::new(), BTreeSet::new()]).unwrap();
        let store = NormalizedStore::build(&set, &[3], 0.0).unwrap();

        let d01 = DimensionSubset::new(vec![0, 1]).unwrap();
        let d1 = DimensionSubset::new(vec![1]).unwrap();
        let key_a = PoolKey::new(Label::from("a"), d01.clone(), 3);
        let key_b = PoolKey::new(Label::from("b"), d01.clone(), 3);
        let key_c = PoolKey::new(Label::from("a"), d1.clone(), 3);
        let pools: ShapeletPools = [
            (key_a.clone(), vec![vec![1.0, 0.0, -1.0, 0.0, 1.0, 0.0], vec![0.5; 6]]),
            (key_b.clone(), vec![vec![-1.0, 0.0, 1.0, 1.0, 0.0, -1.0]]),
            (key_c.clone(), vec![vec![-1.0, 1.0, -1.0]]),
        ]
        .into_iter()
        .collect();

        let table = BmdTable::compute(&pools, &store, set.len()).unwrap();
        assert_eq!(table.len(), 2 * 4);

        for (key, shapelets) in pools.iter() {
            for (i, shapelet) in shapelets.iter().enumerate() {
                let fv = table.feature_vector(key, i).unwrap();
                for (s, &got) in fv.iter().enumerate() {
                    let windows = store.get(SeriesId::new(s), key.window).unwrap();
                    let expected = (0..windows.n_windows())
                        .map(|o| euclidean(shapelet, &windows.candidate(o, &key.dims)))
                        .fold(f64::INFINITY, f64::min);
                    assert!((got - expected).abs() < 1e-12, "{key:?}/{i}/series {s}");
                }
            }
        }
        assert!(table.feature_vector(&key_b, 1).is_none());
    }

    #[test]
    fn empty_pools_give_empty_table() {
        let set = TrainingSet::new(
            vec![TimeSeries::new(vec![vec![0.0, 1.0, 0.0]]).unwrap()],
            vec![BTreeSet::new()],
        )
        .unwrap();
        let store = NormalizedStore::build(&set, &[2], 0.0).unwrap();
        let table = BmdTable::compute(&ShapeletPools::default(), &store, 1).unwrap();
        assert!(table.is_empty());
    }
}
