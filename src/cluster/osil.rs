//! Silhouette optimisation by single-point reassignment.
//!
//! # The Search
//!
//! OSil ascends the Average Silhouette Width directly: from a seed
//! partition, repeatedly evaluate every single-point reassignment
//! (i → cluster c), commit the globally best one if it strictly improves
//! the ASW, and stop when nothing does. The committed sequence is
//! monotone in ASW and the partition space is finite, so termination is
//! guaranteed without an iteration cap.
//!
//! # Why It's Fast
//!
//! Scoring one candidate naively costs O(n²): every point's silhouette can
//! change when cluster means shift. The engine instead maintains the
//! per-cluster distance sums S[j, c] (see [`crate::silhouette`]) so that a
//! hypothetical move of point i touches only two columns:
//!
//! ```text
//! S'[j, from] = S[j, from] - d(i, j)
//! S'[j, to]   = S[j, to]   + d(i, j)
//! ```
//!
//! Reading through those virtual updates scores a candidate in O(n·k), an
//! O(n) speedup, and committing a move is an O(n) write. That is the entire
//! difference between the [`OsilVariant::Efficient`] and
//! [`OsilVariant::Original`] variants; both scan candidates in the same
//! order with the same strict comparisons and return identical partitions.
//!
//! # Guarantees
//!
//! - Moves that would empty the source cluster are skipped.
//! - Ties between equally good candidates resolve to the lowest (i, c).
//! - ASW is strictly increasing across committed iterations.

use super::traits::{ClusterFit, SilhouetteClustering};
use crate::dist::DistanceMatrix;
use crate::error::Result;
use crate::init::{initial_partition, InitMethod};
use crate::silhouette::ClusterSums;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Candidate evaluation strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OsilVariant {
    /// Score candidates through the maintained sums, O(n·k) each.
    Efficient,
    /// Score candidates from scratch, O(n²) each. Same fixed points as
    /// `Efficient`; kept for equivalence testing.
    Original,
}

/// Exact ASW-optimising reassignment engine.
#[derive(Debug, Clone)]
pub struct EffOsil {
    /// Seeding methods; the best-ASW seed is used.
    init: Vec<InitMethod>,
    /// Candidate evaluation strategy.
    variant: OsilVariant,
    /// Cap on committed moves. `None` runs to the local optimum.
    max_iter: Option<usize>,
}

impl Default for EffOsil {
    fn default() -> Self {
        Self::new()
    }
}

impl EffOsil {
    /// Create an engine with average-linkage seeding and the efficient
    /// evaluation path.
    pub fn new() -> Self {
        Self {
            init: vec![InitMethod::Average],
            variant: OsilVariant::Efficient,
            max_iter: None,
        }
    }

    /// Set the seeding methods.
    pub fn with_init(mut self, init: Vec<InitMethod>) -> Self {
        self.init = init;
        self
    }

    /// Set the candidate evaluation strategy.
    pub fn with_variant(mut self, variant: OsilVariant) -> Self {
        self.variant = variant;
        self
    }

    /// Cap the number of committed moves.
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = Some(max_iter);
        self
    }

    /// Score moving point i to cluster `to` under the configured variant.
    fn candidate_asw(
        &self,
        dist: &DistanceMatrix,
        sums: &ClusterSums,
        labels: &[usize],
        i: usize,
        to: usize,
    ) -> f64 {
        match self.variant {
            OsilVariant::Efficient => sums.trial_asw(dist, labels, i, to),
            OsilVariant::Original => {
                let mut trial = labels.to_vec();
                trial[i] = to;
                ClusterSums::build(dist, &trial, sums.n_clusters()).asw(&trial)
            }
        }
    }

    /// Best reassignment for point i, ties to the lowest target cluster.
    fn best_for_point(
        &self,
        dist: &DistanceMatrix,
        sums: &ClusterSums,
        labels: &[usize],
        i: usize,
    ) -> Option<(f64, usize, usize)> {
        let from = labels[i];
        if sums.size(from) <= 1 {
            return None;
        }
        let mut best: Option<(f64, usize, usize)> = None;
        for c in 0..sums.n_clusters() {
            if c == from {
                continue;
            }
            let asw = self.candidate_asw(dist, sums, labels, i, c);
            if best.map_or(true, |(b, _, _)| asw > b) {
                best = Some((asw, i, c));
            }
        }
        best
    }

    /// Best reassignment over all points, ties to the lowest (i, c).
    fn best_move(
        &self,
        dist: &DistanceMatrix,
        sums: &ClusterSums,
        labels: &[usize],
    ) -> Option<(f64, usize, usize)> {
        #[cfg(feature = "parallel")]
        let best = (0..labels.len())
            .into_par_iter()
            .filter_map(|i| self.best_for_point(dist, sums, labels, i))
            .reduce_with(|a, b| {
                if b.0 > a.0 || (b.0 == a.0 && (b.1, b.2) < (a.1, a.2)) {
                    b
                } else {
                    a
                }
            });

        #[cfg(not(feature = "parallel"))]
        let best = {
            let mut best: Option<(f64, usize, usize)> = None;
            for i in 0..labels.len() {
                let Some(candidate) = self.best_for_point(dist, sums, labels, i) else {
                    continue;
                };
                if best.map_or(true, |(b, _, _)| candidate.0 > b) {
                    best = Some(candidate);
                }
            }
            best
        };

        best
    }
}

impl SilhouetteClustering for EffOsil {
    fn fit(&self, dist: &DistanceMatrix, k: usize) -> Result<ClusterFit> {
        let mut labels = initial_partition(dist, k, &self.init)?;
        let mut sums = ClusterSums::build(dist, &labels, k);
        let mut asw = sums.asw(&labels);

        let mut iterations = 0;
        while self.max_iter.map_or(true, |cap| iterations < cap) {
            let Some((best_asw, i, c)) = self.best_move(dist, &sums, &labels) else {
                break;
            };
            if best_asw <= asw {
                break;
            }
            sums.move_point(dist, &mut labels, i, c);
            asw = sums.asw(&labels);
            iterations += 1;
        }

        Ok(ClusterFit {
            labels,
            asw,
            iterations,
            medoids: None,
        })
    }
}
