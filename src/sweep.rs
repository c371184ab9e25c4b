//! Cluster-count selection by ASW sweep.
//!
//! Runs an engine once per candidate k and keeps the whole table; the k
//! whose partition scores the highest ASW is the estimate, ties going to
//! the smallest k.

use crate::cluster::{ClusterFit, SilhouetteClustering};
use crate::dist::DistanceMatrix;
use crate::error::{Error, Result};

/// Results of an engine run over a range of cluster counts.
#[derive(Debug, Clone)]
pub struct SweepResult {
    /// Candidate cluster counts, as given.
    pub ks: Vec<usize>,
    /// Per-k fits, parallel to `ks`.
    pub fits: Vec<ClusterFit>,
    best: usize,
}

impl SweepResult {
    /// The estimated number of clusters.
    pub fn best_k(&self) -> usize {
        self.ks[self.best]
    }

    /// ASW of the best partition.
    pub fn best_asw(&self) -> f64 {
        self.fits[self.best].asw
    }

    /// Labels of the best partition.
    pub fn best_clustering(&self) -> &[usize] {
        &self.fits[self.best].labels
    }

    /// Medoids of the best partition, if the engine reports them.
    pub fn best_medoids(&self) -> Option<&[usize]> {
        self.fits[self.best].medoids.as_deref()
    }

    /// ASW per candidate k, parallel to `ks`.
    pub fn asw(&self) -> Vec<f64> {
        self.fits.iter().map(|f| f.asw).collect()
    }

    /// Committed iterations per candidate k, parallel to `ks`.
    pub fn iterations(&self) -> Vec<usize> {
        self.fits.iter().map(|f| f.iterations).collect()
    }
}

/// Fit `engine` at every k in `ks` and report the argmax-ASW solution.
///
/// `ks` must be non-empty, strictly increasing, with min ≥ 2 and
/// max ≤ the number of points.
pub fn sweep<E: SilhouetteClustering>(
    engine: &E,
    dist: &DistanceMatrix,
    ks: &[usize],
) -> Result<SweepResult> {
    if ks.is_empty() {
        return Err(Error::InvalidParameter {
            name: "ks",
            message: "at least one candidate cluster count is required",
        });
    }
    if ks.windows(2).any(|w| w[0] >= w[1]) {
        return Err(Error::InvalidParameter {
            name: "ks",
            message: "candidate cluster counts must be strictly increasing",
        });
    }
    if ks[0] < 2 || ks[ks.len() - 1] > dist.len() {
        return Err(Error::InvalidClusterCount {
            requested: if ks[0] < 2 { ks[0] } else { ks[ks.len() - 1] },
            n_items: dist.len(),
        });
    }

    let mut fits = Vec::with_capacity(ks.len());
    for &k in ks {
        fits.push(engine.fit(dist, k)?);
    }

    // Ties go to the smallest k; ks is ascending, so first-wins does it.
    let mut best = 0;
    for (i, fit) in fits.iter().enumerate() {
        if fit.asw > fits[best].asw {
            best = i;
        }
    }

    Ok(SweepResult {
        ks: ks.to_vec(),
        fits,
        best,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cluster::{EffOsil, PamSil};

    fn three_blobs() -> DistanceMatrix {
        let positions: Vec<f64> = (0..6)
            .map(|i| i as f64 * 0.2)
            .chain((0..6).map(|i| 50.0 + i as f64 * 0.2))
            .chain((0..6).map(|i| 100.0 + i as f64 * 0.2))
            .collect();
        DistanceMatrix::from_fn(18, |i, j| (positions[i] - positions[j]).abs()).unwrap()
    }

    #[test]
    fn test_sweep_finds_three() {
        let d = three_blobs();
        let result = sweep(&EffOsil::new(), &d, &[2, 3, 4, 5]).unwrap();
        assert_eq!(result.best_k(), 3);
        assert!(result.best_asw() > 0.9);
        assert_eq!(result.asw().len(), 4);
    }

    #[test]
    fn test_argmax_consistency() {
        let d = three_blobs();
        let result = sweep(&EffOsil::new(), &d, &[2, 3, 4]).unwrap();
        let asw = result.asw();
        let max = asw.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        assert_eq!(result.best_asw(), max);
        let pos = result.ks.iter().position(|&k| k == result.best_k()).unwrap();
        assert_eq!(asw[pos], result.best_asw());
    }

    #[test]
    fn test_medoids_surface_through_sweep() {
        let d = three_blobs();
        let result = sweep(&PamSil::new(), &d, &[2, 3]).unwrap();
        assert_eq!(result.best_medoids().unwrap().len(), result.best_k());
    }

    #[test]
    fn test_ks_validation() {
        let d = three_blobs();
        assert!(sweep(&EffOsil::new(), &d, &[]).is_err());
        assert!(sweep(&EffOsil::new(), &d, &[3, 2]).is_err());
        assert!(sweep(&EffOsil::new(), &d, &[2, 2]).is_err());
        assert!(sweep(&EffOsil::new(), &d, &[1, 2]).is_err());
        assert!(sweep(&EffOsil::new(), &d, &[2, 19]).is_err());
    }
}
