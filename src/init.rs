//! Initial partitions for the silhouette engines.
//!
//! The local searches only ever improve a seed, so the seed matters. Four
//! methods are recognised: the three classic agglomerative linkages
//! (single, average, complete), cut to k clusters, and PAM, the k-medoid
//! descent on total within-cluster distance. When several methods are given,
//! the seed with the best ASW wins.
//!
//! Linkage runs through kodama on the condensed distance store; the merge
//! history uses SciPy/MATLAB-style cluster labels (leaves 0..n-1, merge i
//! creates cluster id n+i), and cutting to k clusters replays the first
//! n-k merges.

use crate::dist::DistanceMatrix;
use crate::error::{Error, Result};
use crate::silhouette::avg_silhouette;
use kodama::{linkage as kodama_linkage, Method as KodamaMethod};

/// Seeding method for the engines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitMethod {
    /// Single linkage: minimum distance between clusters.
    Single,
    /// Average linkage: mean distance between clusters.
    Average,
    /// Complete linkage: maximum distance between clusters.
    Complete,
    /// PAM: k-medoid descent on total distance to medoid.
    Pam,
}

/// Produce the best-ASW initial partition among `methods`.
///
/// Candidates are scored by [`avg_silhouette`]; ties keep the earlier
/// method in the list. Labels are contiguous in 0..k and every cluster is
/// non-empty.
pub fn initial_partition(
    dist: &DistanceMatrix,
    k: usize,
    methods: &[InitMethod],
) -> Result<Vec<usize>> {
    let n = dist.len();
    if k < 2 || k > n {
        return Err(Error::InvalidClusterCount {
            requested: k,
            n_items: n,
        });
    }
    if methods.is_empty() {
        return Err(Error::InvalidParameter {
            name: "init",
            message: "at least one initialisation method is required",
        });
    }

    let mut best: Option<(f64, Vec<usize>)> = None;
    for &method in methods {
        let labels = match method {
            InitMethod::Single => linkage_partition(dist, k, KodamaMethod::Single),
            InitMethod::Average => linkage_partition(dist, k, KodamaMethod::Average),
            InitMethod::Complete => linkage_partition(dist, k, KodamaMethod::Complete),
            InitMethod::Pam => {
                let medoids = pam_medoids(dist, k);
                assign_to_medoids(dist, &medoids)
            }
        };
        let asw = avg_silhouette(dist, &labels)?;
        if best.as_ref().map_or(true, |(b, _)| asw > *b) {
            best = Some((asw, labels));
        }
    }
    Ok(best.expect("methods is non-empty").1)
}

/// Agglomerative linkage over the condensed store, cut to exactly k clusters.
fn linkage_partition(dist: &DistanceMatrix, k: usize, method: KodamaMethod) -> Vec<usize> {
    let n = dist.len();
    let mut condensed = dist.condensed().to_vec();
    let dendrogram = kodama_linkage(&mut condensed, n, method);

    // Replay the first n-k merges. Merge t consumes two cluster ids and
    // creates id n+t holding the union of their members.
    let mut members: Vec<Option<Vec<usize>>> = (0..n).map(|i| Some(vec![i])).collect();
    for (t, step) in dendrogram.steps().iter().take(n - k).enumerate() {
        let mut a = members[step.cluster1].take().expect("merged cluster is live");
        let mut b = members[step.cluster2].take().expect("merged cluster is live");
        if a.len() < b.len() {
            std::mem::swap(&mut a, &mut b);
        }
        a.extend(b);
        debug_assert_eq!(members.len(), n + t);
        members.push(Some(a));
    }

    // Canonical contiguous labels: clusters ordered by smallest member.
    let mut clusters: Vec<Vec<usize>> = members.into_iter().flatten().collect();
    clusters.sort_by_key(|c| c.iter().min().copied());
    let mut labels = vec![0usize; n];
    for (label, cluster) in clusters.iter().enumerate() {
        for &p in cluster {
            labels[p] = label;
        }
    }
    labels
}

/// PAM seeding: greedy BUILD followed by SWAP descent.
///
/// Returns k distinct medoid indices sorted ascending. The objective here is
/// the classic total distance to the nearest medoid, not ASW; the silhouette
/// engines take it from there.
pub fn pam_medoids(dist: &DistanceMatrix, k: usize) -> Vec<usize> {
    let n = dist.len();
    assert!(k <= n, "cannot place {k} medoids among {n} points");
    let mut medoids: Vec<usize> = Vec::with_capacity(k);

    // BUILD: add the point that most reduces total cost, one medoid at a time.
    for _ in 0..k {
        let mut best = usize::MAX;
        let mut best_total = f64::INFINITY;
        for i in 0..n {
            if medoids.contains(&i) {
                continue;
            }
            let mut total = 0.0;
            for j in 0..n {
                let mut cost = dist.get(i, j);
                for &m in &medoids {
                    let d = dist.get(m, j);
                    if d < cost {
                        cost = d;
                    }
                }
                total += cost;
            }
            if total < best_total {
                best_total = total;
                best = i;
            }
        }
        medoids.push(best);
    }
    medoids.sort_unstable();

    // SWAP: commit the single best strictly-improving swap until a fixed point.
    let mut current = total_medoid_cost(dist, &medoids);
    loop {
        let mut best_cost = current;
        let mut best_swap: Option<(usize, usize)> = None;
        for slot in 0..k {
            for h in 0..n {
                if medoids.contains(&h) {
                    continue;
                }
                let old = medoids[slot];
                medoids[slot] = h;
                let cost = total_medoid_cost(dist, &medoids);
                medoids[slot] = old;
                if cost < best_cost {
                    best_cost = cost;
                    best_swap = Some((slot, h));
                }
            }
        }
        match best_swap {
            Some((slot, h)) => {
                medoids[slot] = h;
                medoids.sort_unstable();
                current = best_cost;
            }
            None => break,
        }
    }
    medoids
}

fn total_medoid_cost(dist: &DistanceMatrix, medoids: &[usize]) -> f64 {
    (0..dist.len())
        .map(|j| {
            medoids
                .iter()
                .map(|&m| dist.get(m, j))
                .fold(f64::INFINITY, f64::min)
        })
        .sum()
}

/// Assign every point to its nearest medoid; ties go to the lowest medoid.
///
/// Cluster labels are positions in the medoid list, so a sorted medoid
/// vector yields labels ordered by medoid index.
pub(crate) fn assign_to_medoids(dist: &DistanceMatrix, medoids: &[usize]) -> Vec<usize> {
    (0..dist.len())
        .map(|p| {
            let mut best = 0;
            let mut best_d = f64::INFINITY;
            for (c, &m) in medoids.iter().enumerate() {
                let d = dist.get(p, m);
                if d < best_d {
                    best_d = d;
                    best = c;
                }
            }
            best
        })
        .collect()
}
