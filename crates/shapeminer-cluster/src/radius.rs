//! Greedy density-center radius clustering over a neighbor graph.

use rayon::prelude::*;
use shapeminer_series::euclidean;
use tracing::{debug, instrument};

use crate::result::ClusterResult;

/// Indices of every other candidate within `d_max`, one row per candidate.
fn neighbor_graph<S: AsRef<[f64]> + Sync>(candidates: &[S], d_max: f64) -> Vec<Vec<usize>> {
    (0..candidates.len())
        .into_par_iter()
        .map(|i| {
            let a = candidates[i].as_ref();
            candidates
                .iter()
                .enumerate()
                .filter(|&(j, b)| j != i && euclidean(a, b.as_ref()) <= d_max)
                .map(|(j, _)| j)
                .collect()
        })
        .collect()
}

#[instrument(skip(candidates), fields(n = candidates.len()))]
pub(crate) fn cluster<S: AsRef<[f64]> + Sync>(candidates: &[S], d_max: f64) -> ClusterResult {
    let n = candidates.len();
    if n == 0 {
        return ClusterResult::default();
    }

    let neighbors = neighbor_graph(candidates, d_max);
    let mut degree: Vec<usize> = neighbors.iter().map(Vec::len).collect();
    let mut assigned: Vec<Option<usize>> = vec![None; n];
    let mut representatives = Vec::new();
    let mut remaining = n;

    while remaining > 0 {
        // Highest remaining degree; among equals the lowest index wins.
        let Some(center) = (0..n)
            .filter(|&i| assigned[i].is_none())
            .max_by(|&a, &b| degree[a].cmp(&degree[b]).then(b.cmp(&a)))
        else {
            break;
        };

        representatives.push(center);

        let mut absorbed = vec![center];
        absorbed.extend(neighbors[center].iter().copied().filter(|&j| assigned[j].is_none()));
        for &m in &absorbed {
            assigned[m] = Some(center);
        }
        remaining -= absorbed.len();

        for &m in &absorbed {
            for &k in &neighbors[m] {
                if assigned[k].is_none() {
                    degree[k] -= 1;
                }
            }
        }
    }

    let assignments: Vec<usize> = assigned.into_iter().flatten().collect();
    debug!(n_clusters = representatives.len(), d_max, "radius clustering done");
    ClusterResult {
        representatives,
        assignments,
    }
}
