//! Result type for radius clustering.

/// Outcome of one radius clustering run.
///
/// Clusters are identified by the input index of their representative, and
/// appear in the order their representatives were chosen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClusterResult {
    /// Input index of each cluster's representative, in selection order.
    pub representatives: Vec<usize>,
    /// For each input candidate, the input index of the representative that
    /// absorbed it. A representative is assigned to itself.
    pub assignments: Vec<usize>,
}

impl ClusterResult {
    /// Return the number of clusters.
    #[must_use]
    pub fn n_clusters(&self) -> usize {
        self.representatives.len()
    }

    /// Return true if no candidate was clustered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.representatives.is_empty()
    }

    /// Return true if candidate `index` was chosen as a representative.
    #[must_use]
    pub fn is_representative(&self, index: usize) -> bool {
        self.assignments.get(index) == Some(&index)
    }

    /// Return the number of candidates in each cluster, in selection order.
    #[must_use]
    pub fn cluster_sizes(&self) -> Vec<usize> {
        self.representatives
            .iter()
            .map(|&rep| self.assignments.iter().filter(|&&a| a == rep).count())
            .collect()
    }

    /// Return the input indices absorbed by `representative`, ascending.
    ///
    /// Empty when `representative` did not head a cluster.
    #[must_use]
    pub fn members(&self, representative: usize) -> Vec<usize> {
        self.assignments
            .iter()
            .enumerate()
            .filter_map(|(i, &a)| (a == representative).then_some(i))
            .collect()
    }
}
