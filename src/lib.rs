//! # sil
//!
//! Clustering by direct optimisation of the Average Silhouette Width.
//!
//! Given a precomputed pairwise [`DistanceMatrix`] and a set of candidate
//! cluster counts, the engines in [`cluster`] search partition space for the
//! labelling with the highest ASW, and [`sweep()`] picks the cluster count
//! whose optimum scores best.

pub mod cluster;
pub mod dist;
pub mod error;
pub mod init;
pub mod silhouette;
pub mod sweep;

pub use cluster::{
    ClusterFit, EffOsil, OsilVariant, PamSil, ScalOsil, ScalVariant, SilhouetteClustering,
};
pub use dist::DistanceMatrix;
pub use error::{Error, Result};
pub use init::{initial_partition, pam_medoids, InitMethod};
pub use silhouette::{avg_silhouette, silhouette_widths};
pub use sweep::{sweep, SweepResult};
