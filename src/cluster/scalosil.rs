//! Scalable silhouette optimisation by sub-sampling.
//!
//! The reassignment search costs too much to run on every point of a large
//! dataset, so this engine runs it on a uniform sub-sample and extends the
//! result: draw `n_starts` random sub-samples, optimise each with
//! [`EffOsil`], keep the trial with the best sub-sample ASW, then assign
//! every left-out point to the cluster with the smallest mean distance to
//! that cluster's sampled members (ties to the lowest cluster). The full-set
//! ASW of the extended labelling is recomputed on the complete matrix, and
//! the whole procedure can be repeated independently, keeping the best
//! repeat.
//!
//! The [`ScalVariant::Scalable`] extension streams one pass per point over
//! the cached per-cluster membership — O(k·n) per extended point becomes
//! O(n) — while [`ScalVariant::Original`] recomputes every (point, cluster)
//! mean from scratch the way FOSil does. Both commit identical assignments:
//! picking the minimum-mean cluster is exactly what maximises the extended
//! point's silhouette against the sub-sample partition.
//!
//! With `sample_size = n` and `n_starts = 1` the sub-sample is the whole
//! dataset and the engine reduces to [`EffOsil`].

use super::osil::EffOsil;
use super::traits::{ClusterFit, SilhouetteClustering};
use crate::dist::DistanceMatrix;
use crate::error::{Error, Result};
use crate::init::InitMethod;
use crate::silhouette::ClusterSums;
use rand::prelude::*;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Extension evaluation strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalVariant {
    /// One pass per extended point over cached per-cluster membership.
    Scalable,
    /// Recompute each (point, cluster) mean from scratch, FOSil-style.
    /// Same assignments as `Scalable`; kept for equivalence testing.
    Original,
}

/// Sub-sample-and-extend ASW engine.
#[derive(Debug, Clone)]
pub struct ScalOsil {
    /// Sub-sample size. Defaults to ⌈n/10⌉, at least 2.
    sample_size: Option<usize>,
    /// Sub-sample trials per repeat.
    n_starts: usize,
    /// Independent repeats.
    repeats: usize,
    /// Extension evaluation strategy.
    variant: ScalVariant,
    /// RNG seed for the sample draws.
    seed: Option<u64>,
    /// Seeding methods for the inner search.
    init: Vec<InitMethod>,
    /// Cap on the inner search's committed moves.
    max_iter: Option<usize>,
}

impl Default for ScalOsil {
    fn default() -> Self {
        Self::new()
    }
}

impl ScalOsil {
    /// Create an engine with default sampling (⌈n/10⌉ points, 10 trials,
    /// 1 repeat) and average-linkage seeding.
    pub fn new() -> Self {
        Self {
            sample_size: None,
            n_starts: 10,
            repeats: 1,
            variant: ScalVariant::Scalable,
            seed: None,
            init: vec![InitMethod::Average],
            max_iter: None,
        }
    }

    /// Set the sub-sample size.
    pub fn with_sample_size(mut self, sample_size: usize) -> Self {
        self.sample_size = Some(sample_size);
        self
    }

    /// Set the number of sub-sample trials per repeat.
    pub fn with_n_starts(mut self, n_starts: usize) -> Self {
        self.n_starts = n_starts;
        self
    }

    /// Set the number of independent repeats.
    pub fn with_repeats(mut self, repeats: usize) -> Self {
        self.repeats = repeats;
        self
    }

    /// Set the extension evaluation strategy.
    pub fn with_variant(mut self, variant: ScalVariant) -> Self {
        self.variant = variant;
        self
    }

    /// Set the RNG seed for reproducible sampling.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the seeding methods for the inner search.
    pub fn with_init(mut self, init: Vec<InitMethod>) -> Self {
        self.init = init;
        self
    }

    /// Cap the inner search's committed moves.
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = Some(max_iter);
        self
    }

    fn resolve_sample_size(&self, n: usize) -> Result<usize> {
        match self.sample_size {
            Some(s) if s < 2 || s > n => Err(Error::InvalidParameter {
                name: "sample_size",
                message: "must be between 2 and the number of points",
            }),
            Some(s) => Ok(s),
            None => Ok(((n + 9) / 10).max(2).min(n)),
        }
    }

    /// Run the best of `n_starts` sub-sample trials; ties keep the earliest.
    fn best_trial(
        &self,
        dist: &DistanceMatrix,
        k: usize,
        samples: Vec<Vec<usize>>,
        inner: &EffOsil,
    ) -> Result<(Vec<usize>, ClusterFit)> {
        #[cfg(feature = "parallel")]
        let fits: Vec<ClusterFit> = samples
            .par_iter()
            .map(|sample| inner.fit(&dist.sub_matrix(sample), k))
            .collect::<Result<_>>()?;

        #[cfg(not(feature = "parallel"))]
        let fits: Vec<ClusterFit> = samples
            .iter()
            .map(|sample| inner.fit(&dist.sub_matrix(sample), k))
            .collect::<Result<_>>()?;

        let mut best = 0;
        for (t, fit) in fits.iter().enumerate() {
            if fit.asw > fits[best].asw {
                best = t;
            }
        }
        let fit = fits.into_iter().nth(best).expect("n_starts >= 1");
        let sample = samples.into_iter().nth(best).expect("n_starts >= 1");
        Ok((sample, fit))
    }

    /// Extend the sub-sample labelling to every point of the full set.
    fn extend(
        &self,
        dist: &DistanceMatrix,
        k: usize,
        sample: &[usize],
        sample_labels: &[usize],
    ) -> Vec<usize> {
        let n = dist.len();
        let mut labels = vec![usize::MAX; n];
        let mut in_sample = vec![false; n];
        for (pos, &p) in sample.iter().enumerate() {
            labels[p] = sample_labels[pos];
            in_sample[p] = true;
        }

        let mut sizes = vec![0usize; k];
        for &l in sample_labels {
            sizes[l] += 1;
        }

        for j in 0..n {
            if in_sample[j] {
                continue;
            }
            labels[j] = match self.variant {
                ScalVariant::Scalable => {
                    // One pass over the sample, binning distances by cluster.
                    let mut sums = vec![0.0f64; k];
                    for (pos, &p) in sample.iter().enumerate() {
                        sums[sample_labels[pos]] += dist.get(j, p);
                    }
                    nearest_mean(&sums, &sizes)
                }
                ScalVariant::Original => {
                    let mut best = 0;
                    let mut best_mean = f64::INFINITY;
                    for (c, &size) in sizes.iter().enumerate() {
                        let sum: f64 = sample
                            .iter()
                            .zip(sample_labels.iter())
                            .filter(|(_, &l)| l == c)
                            .map(|(&p, _)| dist.get(j, p))
                            .sum();
                        let mean = sum / size as f64;
                        if mean < best_mean {
                            best_mean = mean;
                            best = c;
                        }
                    }
                    best
                }
            };
        }
        labels
    }
}

/// Index of the smallest per-cluster mean; ties to the lowest cluster.
fn nearest_mean(sums: &[f64], sizes: &[usize]) -> usize {
    let mut best = 0;
    let mut best_mean = f64::INFINITY;
    for (c, (&sum, &size)) in sums.iter().zip(sizes.iter()).enumerate() {
        let mean = sum / size as f64;
        if mean < best_mean {
            best_mean = mean;
            best = c;
        }
    }
    best
}

impl SilhouetteClustering for ScalOsil {
    fn fit(&self, dist: &DistanceMatrix, k: usize) -> Result<ClusterFit> {
        let n = dist.len();
        if n == 0 {
            return Err(Error::EmptyInput);
        }
        let sample_size = self.resolve_sample_size(n)?;
        if self.n_starts < 1 {
            return Err(Error::InvalidParameter {
                name: "n_starts",
                message: "must be at least 1",
            });
        }
        if self.repeats < 1 {
            return Err(Error::InvalidParameter {
                name: "repeats",
                message: "must be at least 1",
            });
        }
        if k < 2 || k > sample_size {
            return Err(Error::InvalidClusterCount {
                requested: k,
                n_items: sample_size,
            });
        }

        let mut rng: Box<dyn RngCore> = match self.seed {
            Some(s) => Box::new(StdRng::seed_from_u64(s)),
            None => Box::new(rand::rng()),
        };
        let inner = {
            let mut engine = EffOsil::new().with_init(self.init.clone());
            if let Some(cap) = self.max_iter {
                engine = engine.with_max_iter(cap);
            }
            engine
        };

        let mut best: Option<ClusterFit> = None;
        for _ in 0..self.repeats {
            // Draw every trial's sample up front so the RNG stream does not
            // depend on how the trials are scheduled.
            let samples: Vec<Vec<usize>> = (0..self.n_starts)
                .map(|_| {
                    let mut perm: Vec<usize> = (0..n).collect();
                    perm.shuffle(&mut rng);
                    let mut sample = perm[..sample_size].to_vec();
                    sample.sort_unstable();
                    sample
                })
                .collect();

            let (sample, sub_fit) = self.best_trial(dist, k, samples, &inner)?;
            let labels = self.extend(dist, k, &sample, &sub_fit.labels);
            let asw = ClusterSums::build(dist, &labels, k).asw(&labels);

            if best.as_ref().map_or(true, |b| asw > b.asw) {
                best = Some(ClusterFit {
                    labels,
                    asw,
                    iterations: sub_fit.iterations,
                    medoids: None,
                });
            }
        }
        Ok(best.expect("repeats >= 1"))
    }
}
