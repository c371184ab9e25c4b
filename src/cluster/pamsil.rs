//! Medoid-swap search on the silhouette objective.
//!
//! PAM swaps medoids to minimise total within-cluster distance; PAMSil
//! keeps the swap neighbourhood but scores each candidate medoid set by the
//! ASW of the partition it induces. Starting from the PAM seed, every
//! (medoid m, non-medoid h) exchange is tried — k·(n−k) candidates — and the
//! best one commits iff it strictly raises the ASW.
//!
//! Each candidate needs a fresh nearest-medoid assignment and a full ASW
//! evaluation, so a swap pass costs O(k·(n−k)·n²); this engine is the
//! expensive member of the family and the reassignment engines exist for a
//! reason. Equal-ASW candidates resolve to the lowest (m, h) pair, with m
//! ranging over the sorted medoid vector.

use super::traits::{ClusterFit, SilhouetteClustering};
use crate::dist::DistanceMatrix;
use crate::error::{Error, Result};
use crate::init::{assign_to_medoids, pam_medoids};
use crate::silhouette::ClusterSums;

/// ASW-maximising medoid-swap engine, seeded by PAM.
#[derive(Debug, Clone)]
pub struct PamSil {
    /// Cap on committed swaps. `None` runs to the local optimum.
    max_iter: Option<usize>,
}

impl Default for PamSil {
    fn default() -> Self {
        Self::new()
    }
}

impl PamSil {
    /// Create an engine with no swap cap.
    pub fn new() -> Self {
        Self { max_iter: None }
    }

    /// Cap the number of committed swaps.
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = Some(max_iter);
        self
    }
}

fn asw_of(dist: &DistanceMatrix, labels: &[usize], k: usize) -> f64 {
    ClusterSums::build(dist, labels, k).asw(labels)
}

impl SilhouetteClustering for PamSil {
    fn fit(&self, dist: &DistanceMatrix, k: usize) -> Result<ClusterFit> {
        let n = dist.len();
        if k < 2 || k > n {
            return Err(Error::InvalidClusterCount {
                requested: k,
                n_items: n,
            });
        }

        let mut medoids = pam_medoids(dist, k);
        let mut labels = assign_to_medoids(dist, &medoids);
        let mut asw = asw_of(dist, &labels, k);

        let mut iterations = 0;
        while self.max_iter.map_or(true, |cap| iterations < cap) {
            let mut best: Option<(f64, Vec<usize>, Vec<usize>)> = None;
            for pos in 0..k {
                for h in 0..n {
                    if medoids.contains(&h) {
                        continue;
                    }
                    let mut trial = medoids.clone();
                    trial[pos] = h;
                    trial.sort_unstable();
                    let trial_labels = assign_to_medoids(dist, &trial);
                    let trial_asw = asw_of(dist, &trial_labels, k);
                    if best.as_ref().map_or(true, |(b, _, _)| trial_asw > *b) {
                        best = Some((trial_asw, trial, trial_labels));
                    }
                }
            }
            match best {
                Some((best_asw, best_medoids, best_labels)) if best_asw > asw => {
                    asw = best_asw;
                    medoids = best_medoids;
                    labels = best_labels;
                    iterations += 1;
                }
                _ => break,
            }
        }

        Ok(ClusterFit {
            labels,
            asw,
            iterations,
            medoids: Some(medoids),
        })
    }
}
