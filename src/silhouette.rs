//! Silhouette evaluation, from scratch and incremental.
//!
//! # The Silhouette Width
//!
//! For a point i in cluster l with cluster sizes n_c:
//!
//! ```text
//! a(i) = mean distance from i to the other members of l
//! b(i) = min over c ≠ l of the mean distance from i to cluster c
//! s(i) = (b(i) - a(i)) / max(a(i), b(i))
//! ```
//!
//! s(i) lives in [-1, 1]; the **Average Silhouette Width** (ASW) is the mean
//! of s(i) over all points. Singleton clusters contribute s(i) = 0
//! (Rousseeuw's convention), as does the degenerate case a = b = 0.
//!
//! # Incremental Bookkeeping
//!
//! Every quantity above is a ratio of per-cluster distance sums, so the
//! engines maintain the n × k matrix
//!
//! ```text
//! S[i, c] = Σ_{j: label(j) = c} d(i, j)
//! ```
//!
//! together with the cluster sizes. Reassigning point i from cluster `from`
//! to cluster `to` touches exactly two columns:
//!
//! ```text
//! S[j, from] -= d(i, j)    S[j, to] += d(i, j)    for every j
//! ```
//!
//! which is O(n), and a hypothetical move can be scored in O(n·k) by reading
//! S through those same two adjustments without writing them. That virtual
//! evaluation is what buys the reassignment engines their speedup over
//! recomputing all pairwise sums per candidate.

use crate::dist::DistanceMatrix;
use crate::error::{Error, Result};
use ndarray::Array2;

/// Average silhouette width of a labelling, computed from scratch in O(n²).
///
/// The number of clusters is inferred as `max(labels) + 1`; empty label ids
/// are skipped when searching for the nearest other cluster.
pub fn avg_silhouette(dist: &DistanceMatrix, labels: &[usize]) -> Result<f64> {
    let sums = ClusterSums::build_checked(dist, labels)?;
    Ok(sums.asw(labels))
}

/// Per-point silhouette widths of a labelling, computed from scratch.
pub fn silhouette_widths(dist: &DistanceMatrix, labels: &[usize]) -> Result<Vec<f64>> {
    let sums = ClusterSums::build_checked(dist, labels)?;
    Ok((0..labels.len())
        .map(|i| sums.point_width(i, labels[i]))
        .collect())
}

/// Combine an intra-cluster sum with the nearest-other-cluster mean.
#[inline]
fn width(own_sum: f64, own_size: usize, b: f64) -> f64 {
    if own_size <= 1 || !b.is_finite() {
        return 0.0;
    }
    let a = own_sum / (own_size - 1) as f64;
    let denom = a.max(b);
    if denom > 0.0 {
        (b - a) / denom
    } else {
        0.0
    }
}

/// Per-cluster distance sums and sizes for a labelling.
///
/// The structure the engines mutate in place through their local search.
/// Row invariant: for each point i, the sums across clusters add up to the
/// total distance from i to all points, regardless of the labelling.
#[derive(Debug, Clone)]
pub(crate) struct ClusterSums {
    /// sums[[i, c]] = Σ over j in cluster c of d(i, j).
    sums: Array2<f64>,
    /// Cluster sizes; each ≥ 1 while an engine is running.
    sizes: Vec<usize>,
}

impl ClusterSums {
    /// Build sums for `labels` over `k` clusters in one pass over all pairs.
    pub(crate) fn build(dist: &DistanceMatrix, labels: &[usize], k: usize) -> Self {
        let n = labels.len();
        let mut sums = Array2::zeros((n, k));
        let mut sizes = vec![0usize; k];
        for &l in labels {
            sizes[l] += 1;
        }
        for i in 0..n {
            for j in (i + 1)..n {
                let d = dist.get(i, j);
                sums[[i, labels[j]]] += d;
                sums[[j, labels[i]]] += d;
            }
        }
        Self { sums, sizes }
    }

    /// Validate the labelling against the matrix, then build.
    fn build_checked(dist: &DistanceMatrix, labels: &[usize]) -> Result<Self> {
        if labels.is_empty() {
            return Err(Error::EmptyInput);
        }
        if labels.len() != dist.len() {
            return Err(Error::DimensionMismatch {
                expected: dist.len(),
                found: labels.len(),
            });
        }
        let k = labels.iter().max().copied().unwrap_or(0) + 1;
        Ok(Self::build(dist, labels, k))
    }

    #[inline]
    pub(crate) fn size(&self, c: usize) -> usize {
        self.sizes[c]
    }

    #[inline]
    pub(crate) fn n_clusters(&self) -> usize {
        self.sizes.len()
    }

    /// Silhouette width of point i, currently labelled `li`.
    pub(crate) fn point_width(&self, i: usize, li: usize) -> f64 {
        let mut b = f64::INFINITY;
        for c in 0..self.sizes.len() {
            if c == li || self.sizes[c] == 0 {
                continue;
            }
            let mean = self.sums[[i, c]] / self.sizes[c] as f64;
            if mean < b {
                b = mean;
            }
        }
        width(self.sums[[i, li]], self.sizes[li], b)
    }

    /// ASW of the current labelling, O(n·k).
    pub(crate) fn asw(&self, labels: &[usize]) -> f64 {
        let n = labels.len();
        let total: f64 = labels
            .iter()
            .enumerate()
            .map(|(i, &li)| self.point_width(i, li))
            .sum();
        total / n as f64
    }

    /// ASW that would result from moving point i to cluster `to`, without
    /// committing the move.
    ///
    /// Reads the sums through virtual ±d(i, ·) adjustments on the source and
    /// target columns. The caller must ensure the source cluster holds more
    /// than one point.
    pub(crate) fn trial_asw(
        &self,
        dist: &DistanceMatrix,
        labels: &[usize],
        i: usize,
        to: usize,
    ) -> f64 {
        let n = labels.len();
        let k = self.sizes.len();
        let from = labels[i];
        debug_assert!(self.sizes[from] > 1);
        debug_assert_ne!(from, to);

        let mut total = 0.0;
        for j in 0..n {
            let lj = if j == i { to } else { labels[j] };
            let d_ij = dist.get(i, j);

            let own_size = self.trial_size(lj, from, to);
            if own_size <= 1 {
                continue;
            }
            let mut own_sum = self.sums[[j, lj]];
            if lj == from {
                own_sum -= d_ij;
            } else if lj == to {
                own_sum += d_ij;
            }

            let mut b = f64::INFINITY;
            for c in 0..k {
                if c == lj {
                    continue;
                }
                let size = self.trial_size(c, from, to);
                if size == 0 {
                    continue;
                }
                let mut sum = self.sums[[j, c]];
                if c == from {
                    sum -= d_ij;
                } else if c == to {
                    sum += d_ij;
                }
                let mean = sum / size as f64;
                if mean < b {
                    b = mean;
                }
            }
            total += width(own_sum, own_size, b);
        }
        total / n as f64
    }

    #[inline]
    fn trial_size(&self, c: usize, from: usize, to: usize) -> usize {
        if c == from {
            self.sizes[c] - 1
        } else if c == to {
            self.sizes[c] + 1
        } else {
            self.sizes[c]
        }
    }

    /// Commit the reassignment of point i to cluster `to`.
    ///
    /// Updates the two affected sum columns in O(n), the sizes, and the
    /// label vector. The source cluster must not be emptied.
    pub(crate) fn move_point(
        &mut self,
        dist: &DistanceMatrix,
        labels: &mut [usize],
        i: usize,
        to: usize,
    ) {
        let from = labels[i];
        debug_assert!(self.sizes[from] > 1);
        debug_assert_ne!(from, to);
        for j in 0..labels.len() {
            let d_ij = dist.get(i, j);
            self.sums[[j, from]] -= d_ij;
            self.sums[[j, to]] += d_ij;
        }
        self.sizes[from] -= 1;
        self.sizes[to] += 1;
        labels[i] = to;
    }
}
