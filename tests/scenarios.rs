//! End-to-end scenarios for the three engines.

use rand::prelude::*;
use sil::{
    avg_silhouette, pam_medoids, sweep, DistanceMatrix, EffOsil, InitMethod, OsilVariant, PamSil,
    ScalOsil, SilhouetteClustering,
};

/// 20 points on the line: 0..9 and 100..109, absolute-difference distance.
fn two_line_blobs() -> DistanceMatrix {
    let positions: Vec<f64> = (0..10)
        .map(|i| i as f64)
        .chain((0..10).map(|i| 100.0 + i as f64))
        .collect();
    DistanceMatrix::from_fn(20, |i, j| (positions[i] - positions[j]).abs()).unwrap()
}

/// 30 points, 10 each around three well-separated plane centres.
fn three_plane_blobs() -> DistanceMatrix {
    let centres = [(0.0, 0.0), (10.0, 0.0), (5.0, 8.66)];
    let mut rng = StdRng::seed_from_u64(2024);
    let mut points = Vec::with_capacity(30);
    for &(cx, cy) in &centres {
        for _ in 0..10 {
            points.push(vec![
                cx + rng.random::<f64>() - 0.5,
                cy + rng.random::<f64>() - 0.5,
            ]);
        }
    }
    DistanceMatrix::euclidean(&points).unwrap()
}

/// 50 unstructured points in the plane.
fn random_cloud() -> DistanceMatrix {
    let mut rng = StdRng::seed_from_u64(1);
    let points: Vec<Vec<f64>> = (0..50)
        .map(|_| vec![rng.random::<f64>() * 10.0, rng.random::<f64>() * 10.0])
        .collect();
    DistanceMatrix::euclidean(&points).unwrap()
}

#[test]
fn two_separated_clusters_on_the_line() {
    let d = two_line_blobs();
    let result = sweep(&EffOsil::new(), &d, &[2, 3, 4, 5]).unwrap();
    assert_eq!(result.best_k(), 2);
    assert!(result.best_asw() > 0.95);
    let labels = result.best_clustering();
    assert_eq!(&labels[..10], &[labels[0]; 10]);
    assert_eq!(&labels[10..], &[labels[10]; 10]);
    assert_ne!(labels[0], labels[10]);
}

#[test]
fn three_equilateral_clusters_all_engines() {
    let d = three_plane_blobs();
    let ks = [2, 3, 4, 5, 6];

    let eff = sweep(&EffOsil::new(), &d, &ks).unwrap();
    assert_eq!(eff.best_k(), 3);
    assert!(eff.best_asw() > 0.7);

    let pam = sweep(&PamSil::new(), &d, &ks).unwrap();
    assert_eq!(pam.best_k(), 3);
    assert!(pam.best_asw() > 0.7);

    let scal_engine = ScalOsil::new()
        .with_sample_size(21)
        .with_n_starts(5)
        .with_seed(42);
    let scal = sweep(&scal_engine, &d, &ks).unwrap();
    assert_eq!(scal.best_k(), 3);
    assert!(scal.best_asw() > 0.7);
}

#[test]
fn singleton_outlier_is_isolated_without_nan() {
    let mut points: Vec<Vec<f64>> = (0..10).map(|i| vec![i as f64 * 0.01, 0.0]).collect();
    points.push(vec![1000.0, 0.0]);
    let d = DistanceMatrix::euclidean(&points).unwrap();

    let fit = EffOsil::new().fit(&d, 2).unwrap();
    assert!(fit.asw.is_finite());
    assert!(fit.asw > 0.8);
    // The outlier ends up alone and the tight group stays together.
    assert_eq!(&fit.labels[..10], &[fit.labels[0]; 10]);
    assert_ne!(fit.labels[10], fit.labels[0]);
}

#[test]
fn efficient_and_original_variants_return_identical_partitions() {
    let d = random_cloud();
    let efficient = EffOsil::new().fit(&d, 3).unwrap();
    let original = EffOsil::new()
        .with_variant(OsilVariant::Original)
        .fit(&d, 3)
        .unwrap();
    assert_eq!(efficient.labels, original.labels);
    assert!((efficient.asw - original.asw).abs() < 1e-9);
}

#[test]
fn full_sample_scalosil_degenerates_to_effosil() {
    let d = random_cloud();
    let scal = ScalOsil::new()
        .with_sample_size(50)
        .with_n_starts(1)
        .with_seed(9)
        .fit(&d, 3)
        .unwrap();
    let eff = EffOsil::new().fit(&d, 3).unwrap();
    assert_eq!(scal.labels, eff.labels);
    assert!((scal.asw - eff.asw).abs() < 1e-10);
}

#[test]
fn pamsil_never_scores_below_its_pam_seed() {
    let d = random_cloud();
    for k in 2..=6 {
        let seed_medoids = pam_medoids(&d, k);
        let mut best_to_medoid = vec![f64::INFINITY; 50];
        let mut seed_labels = vec![0usize; 50];
        for p in 0..50 {
            for (c, &m) in seed_medoids.iter().enumerate() {
                let dist = d.get(p, m);
                if dist < best_to_medoid[p] {
                    best_to_medoid[p] = dist;
                    seed_labels[p] = c;
                }
            }
        }
        let seed_asw = avg_silhouette(&d, &seed_labels).unwrap();
        let fit = PamSil::new().fit(&d, k).unwrap();
        assert!(fit.asw >= seed_asw, "k={k}");
    }
}

#[test]
fn relabelling_points_relabels_the_partition() {
    // Permutation invariance: clustering the permuted matrix gives the
    // permuted partition, up to label names.
    let d = random_cloud();
    let n = d.len();
    let mut perm: Vec<usize> = (0..n).collect();
    let mut rng = StdRng::seed_from_u64(77);
    perm.shuffle(&mut rng);

    let permuted = DistanceMatrix::from_fn(n, |a, b| d.get(perm[a], perm[b])).unwrap();
    let base = EffOsil::new().fit(&d, 3).unwrap();
    let moved = EffOsil::new().fit(&permuted, 3).unwrap();

    for a in 0..n {
        for b in (a + 1)..n {
            let together_base = base.labels[perm[a]] == base.labels[perm[b]];
            let together_moved = moved.labels[a] == moved.labels[b];
            assert_eq!(together_base, together_moved);
        }
    }
}

#[test]
fn best_asw_is_recomputable_from_the_output() {
    let d = three_plane_blobs();
    for result in [
        sweep(&EffOsil::new(), &d, &[2, 3, 4]).unwrap(),
        sweep(&PamSil::new(), &d, &[2, 3, 4]).unwrap(),
    ] {
        let scratch = avg_silhouette(&d, result.best_clustering()).unwrap();
        assert!((result.best_asw() - scratch).abs() < 1e-10);
        assert!((-1.0..=1.0).contains(&result.best_asw()));
    }
}

#[test]
fn seeding_with_every_method_is_accepted() {
    let d = two_line_blobs();
    let fit = EffOsil::new()
        .with_init(vec![
            InitMethod::Single,
            InitMethod::Average,
            InitMethod::Complete,
            InitMethod::Pam,
        ])
        .fit(&d, 2)
        .unwrap();
    assert!(fit.asw > 0.95);
}
