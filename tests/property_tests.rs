use proptest::prelude::*;
use sil::{avg_silhouette, DistanceMatrix, EffOsil, SilhouetteClustering};

proptest! {
    #[test]
    fn prop_effosil_partition_is_valid(
        data in prop::collection::vec(prop::collection::vec(-10.0f64..10.0, 2), 4..16),
        k in 2usize..4
    ) {
        // Skip if k > n
        if k <= data.len() {
            let dist = DistanceMatrix::euclidean(&data).unwrap();
            let fit = EffOsil::new().fit(&dist, k).unwrap();

            prop_assert_eq!(fit.labels.len(), data.len());

            // Surjection onto 0..k: every label in range, every cluster used.
            let mut seen = vec![false; k];
            for &l in &fit.labels {
                prop_assert!(l < k);
                seen[l] = true;
            }
            prop_assert!(seen.iter().all(|&s| s));

            // ASW is bounded and recomputable from the labels.
            prop_assert!((-1.0..=1.0).contains(&fit.asw));
            let scratch = avg_silhouette(&dist, &fit.labels).unwrap();
            prop_assert!((fit.asw - scratch).abs() < 1e-10);
        }
    }

    #[test]
    fn prop_distance_matrix_is_symmetric_with_zero_diagonal(
        data in prop::collection::vec(prop::collection::vec(-100.0f64..100.0, 3), 2..12)
    ) {
        let dist = DistanceMatrix::euclidean(&data).unwrap();
        for i in 0..data.len() {
            prop_assert_eq!(dist.get(i, i), 0.0);
            for j in 0..data.len() {
                prop_assert_eq!(dist.get(i, j), dist.get(j, i));
                prop_assert!(dist.get(i, j) >= 0.0);
            }
        }
    }
}
