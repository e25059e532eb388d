use super::rand::{draw_weighted_set, InstanceCfg, ReplayToken};
use super::*;
use nalgebra::{dvector, DVector};
use proptest::prelude::*;

fn cfg() -> ReduceCfg {
    ReduceCfg::default()
}

#[test]
fn three_points_on_a_line_reduce_to_two() {
    let points = vec![dvector![0.0], dvector![1.0], dvector![2.0]];
    let weights = vec![0.25, 0.25, 0.5];
    let set = WeightedSet::new(points, weights, cfg()).unwrap();
    let target = set.target();
    assert!((target[0] - 1.25).abs() < 1e-12);

    let out = reduce(set, cfg()).unwrap();
    assert_eq!(out.support(), &[1, 2]);
    assert!((out.weights()[0] - 0.75).abs() < 1e-12);
    assert!((out.weights()[1] - 0.25).abs() < 1e-12);
    assert!((out.target()[0] - 1.25).abs() < 1e-12);
    assert!(is_affinely_independent(out.points(), out.support(), cfg()));
}

#[test]
fn interior_point_of_a_triangle_is_retired() {
    // Square corners plus the centroid certificate for (0.75, 0.75).
    let points = vec![
        dvector![0.0, 0.0],
        dvector![2.0, 0.0],
        dvector![0.0, 2.0],
        dvector![1.0, 1.0],
    ];
    let weights = vec![0.25; 4];
    let set = WeightedSet::new(points, weights, cfg()).unwrap();
    let target = set.target();
    assert!((target[0] - 0.75).abs() < 1e-12 && (target[1] - 0.75).abs() < 1e-12);

    let out = reduce(set, cfg()).unwrap();
    assert_eq!(out.support_len(), 3);
    assert_eq!(out.support(), &[0, 1, 2]);
    assert!((out.weights()[0] - 0.25).abs() < 1e-12);
    assert!((out.weights()[1] - 0.375).abs() < 1e-12);
    assert!((out.weights()[2] - 0.375).abs() < 1e-12);
    let after = out.target();
    assert!((after[0] - 0.75).abs() < 1e-12 && (after[1] - 0.75).abs() < 1e-12);
    assert!(is_affinely_independent(out.points(), out.support(), cfg()));
}

#[test]
fn independent_input_is_returned_unchanged() {
    let points = vec![dvector![0.0, 0.0], dvector![1.0, 0.0], dvector![0.0, 1.0]];
    let weights = vec![0.2, 0.3, 0.5];
    let set = WeightedSet::new(points, weights.clone(), cfg()).unwrap();
    let out = reduce(set, cfg()).unwrap();
    assert_eq!(out.support(), &[0, 1, 2]);
    assert_eq!(out.weights(), weights.as_slice());
}

#[test]
fn duplicate_point_collapses_to_one() {
    let p = dvector![3.0, -1.0, 0.5];
    let set = WeightedSet::new(vec![p.clone(), p.clone()], vec![0.5, 0.5], cfg()).unwrap();
    let out = reduce(set, cfg()).unwrap();
    assert_eq!(out.support_len(), 1);
    assert!((out.weights()[0] - 1.0).abs() < 1e-12);
    assert!((out.target() - p).norm() < 1e-12);
}

#[test]
fn long_line_family_hits_the_dimension_bound() {
    let points: Vec<DVector<f64>> = (0..5).map(|i| dvector![i as f64]).collect();
    let weights = vec![0.2; 5];
    let set = WeightedSet::new(points, weights, cfg()).unwrap();
    let target = set.target();
    let out = reduce(set, cfg()).unwrap();
    assert!(out.support_len() <= 2);
    assert!((out.target()[0] - target[0]).abs() < 1e-9);
    let sum: f64 = out.weights().iter().sum();
    assert!((sum - 1.0).abs() < 1e-9);
}

#[test]
fn zero_weight_points_still_join_the_family() {
    // The zero-weight duplicate keeps the family dependent; reduction
    // retires it without disturbing the certificate.
    let points = vec![dvector![0.0], dvector![1.0], dvector![1.0]];
    let weights = vec![0.5, 0.5, 0.0];
    let set = WeightedSet::new(points, weights, cfg()).unwrap();
    assert_eq!(set.support_len(), 3);
    let out = reduce(set, cfg()).unwrap();
    assert!(out.support_len() <= 2);
    assert!((out.target()[0] - 0.5).abs() < 1e-12);
}

#[test]
fn construction_rejects_bad_certificates() {
    let p = || vec![dvector![0.0], dvector![1.0]];
    assert!(matches!(
        WeightedSet::new(Vec::new(), Vec::new(), cfg()),
        Err(ReduceError::EmptyInput)
    ));
    assert!(matches!(
        WeightedSet::new(p(), vec![1.0], cfg()),
        Err(ReduceError::WeightCountMismatch { .. })
    ));
    assert!(matches!(
        WeightedSet::new(
            vec![dvector![0.0], dvector![1.0, 2.0]],
            vec![0.5, 0.5],
            cfg()
        ),
        Err(ReduceError::DimensionMismatch {
            index: 1,
            expected: 1,
            found: 2
        })
    ));
    assert!(matches!(
        WeightedSet::new(p(), vec![1.5, -0.5], cfg()),
        Err(ReduceError::NegativeWeight { index: 1, .. })
    ));
    assert!(matches!(
        WeightedSet::new(p(), vec![0.5, f64::NAN], cfg()),
        Err(ReduceError::NonFiniteWeight { index: 1 })
    ));
    assert!(matches!(
        WeightedSet::new(p(), vec![0.4, 0.5], cfg()),
        Err(ReduceError::WeightSumMismatch { .. })
    ));
}

#[test]
fn weight_lookup_tracks_the_support() {
    let points = vec![dvector![0.0], dvector![1.0], dvector![2.0]];
    let set = WeightedSet::new(points, vec![0.25, 0.25, 0.5], cfg()).unwrap();
    assert_eq!(set.weight_of(0), Some(0.25));
    let out = reduce(set, cfg()).unwrap();
    assert_eq!(out.weight_of(0), None);
    assert_eq!(out.weight_of(1), Some(0.75));
}

#[test]
fn single_pivot_shrinks_support_by_exactly_one() {
    let set = draw_weighted_set(
        InstanceCfg {
            point_count: 9,
            dim: 2,
            coord_range: 1.0,
        },
        ReplayToken { seed: 42, index: 0 },
    )
    .unwrap();
    let before = set.support_len();
    let target = set.target();
    let rel = find_affine_relation(set.points(), set.support(), cfg()).unwrap();
    let out = pivot(set, &rel, cfg()).unwrap();
    assert_eq!(out.support_len(), before - 1);
    let sum: f64 = out.weights().iter().sum();
    assert!((sum - 1.0).abs() < 1e-9);
    assert!((out.target() - target).norm() < 1e-9);
}

proptest! {
    #[test]
    fn reduction_preserves_the_certificate(
        seed in any::<u64>(),
        n in 2usize..24,
        dim in 1usize..6,
    ) {
        let set = draw_weighted_set(
            InstanceCfg { point_count: n, dim, coord_range: 1.0 },
            ReplayToken { seed, index: 0 },
        )
        .unwrap();
        let target0 = set.target();
        let m0 = set.support_len();

        let out = reduce_with_defaults(set).unwrap();
        prop_assert!(out.support_len() <= m0);
        prop_assert!(out.support_len() <= dim + 1);
        prop_assert!(out.weights().iter().all(|&w| w >= 0.0));
        let sum: f64 = out.weights().iter().sum();
        prop_assert!((sum - 1.0).abs() < 1e-9, "weight sum drifted to {}", sum);
        let drift = (out.target() - &target0).norm();
        prop_assert!(drift < 1e-6 * (1.0 + target0.norm()), "target drift {}", drift);
        prop_assert!(is_affinely_independent(out.points(), out.support(), cfg()));
    }

    #[test]
    fn minimal_supports_admit_no_relation(
        seed in any::<u64>(),
        n in 4usize..16,
    ) {
        let set = draw_weighted_set(
            InstanceCfg { point_count: n, dim: 3, coord_range: 1.0 },
            ReplayToken { seed, index: 1 },
        )
        .unwrap();
        let out = reduce_with_defaults(set).unwrap();
        prop_assert!(matches!(
            find_affine_relation(out.points(), out.support(), cfg()),
            Err(ReduceError::AlreadyIndependent)
        ));
    }
}
