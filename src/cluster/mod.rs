//! Clustering engines that optimise the silhouette directly.
//!
//! Most partitioning algorithms optimise a surrogate — within-cluster sum of
//! squares, total distance to medoid — and use the silhouette only to grade
//! the result afterwards. The engines here make the Average Silhouette Width
//! the objective itself.
//!
//! ## Engines
//!
//! ### PAMSil
//!
//! PAM's medoid-swap neighbourhood, rescored: every (medoid, non-medoid)
//! exchange is evaluated by the ASW of the partition it induces, and the
//! best strictly-improving swap commits. Faithful but expensive — each
//! candidate needs a full reassignment and evaluation.
//!
//! ### effOSil
//!
//! Exact single-point reassignment ascent. The best move over all
//! (point, cluster) pairs commits per iteration; incremental per-cluster
//! distance sums make each candidate an O(n·k) evaluation instead of O(n²).
//! Produces the same fixed points as the published OSil algorithm.
//!
//! ### scalOSil
//!
//! Sub-sample effOSil plus an out-of-sample extension: optimise a random
//! sub-sample, assign every remaining point to its nearest cluster by mean
//! distance, rescore on the full matrix, repeat and keep the best.
//!
//! ## Choosing
//!
//! | Engine | Neighbourhood | Cost per pass | Use when |
//! |--------|--------------|---------------|----------|
//! | [`PamSil`] | medoid swaps | O(k·(n−k)·n²) | medoid representatives needed |
//! | [`EffOsil`] | point moves | O(n²·k²) | exact optimum, moderate n |
//! | [`ScalOsil`] | sampled | sub-sample cost | n too large for the others |
//!
//! ## Usage
//!
//! ```rust
//! use sil::{DistanceMatrix, EffOsil, SilhouetteClustering};
//!
//! let points = vec![
//!     vec![0.0, 0.0],
//!     vec![0.1, 0.1],
//!     vec![10.0, 10.0],
//!     vec![10.1, 10.1],
//! ];
//! let dist = DistanceMatrix::euclidean(&points).unwrap();
//! let fit = EffOsil::new().fit(&dist, 2).unwrap();
//! assert_eq!(fit.labels[0], fit.labels[1]);
//! assert_ne!(fit.labels[0], fit.labels[2]);
//! ```

mod osil;
mod pamsil;
mod scalosil;
mod traits;

pub use osil::{EffOsil, OsilVariant};
pub use pamsil::PamSil;
pub use scalosil::{ScalOsil, ScalVariant};
pub use traits::{ClusterFit, SilhouetteClustering};
