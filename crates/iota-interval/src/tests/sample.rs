//! Tests for point sampling, vertex enumeration, and volume.

use crate::{Interval, SampleStrategy};
use iota_core::{IntervalError, DEFAULT_TOL};
use ndarray::arr1;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

fn vector(l: &[f64], u: &[f64]) -> Interval {
    Interval::new(arr1(l).into_dyn(), arr1(u).into_dyn()).unwrap()
}

#[test]
fn test_uniform_samples_stay_inside() {
    let iv = vector(&[-1.0, 0.0, 2.0], &[1.0, 0.0, 5.0]);
    let pts = iv
        .sample_point(50, SampleStrategy::Uniform, &mut rng())
        .unwrap();
    assert_eq!(pts.shape(), &[3, 50]);
    for col in pts.columns() {
        let p = arr1(&[col[0], col[1], col[2]]).into_dyn();
        assert!(iv.contains_point(&p, DEFAULT_TOL).unwrap());
    }
    // The degenerate axis always samples its single value.
    assert!(pts.row(1).iter().all(|&v| v == 0.0));
}

#[test]
fn test_extreme_samples_are_corners() {
    let iv = vector(&[0.0, -1.0], &[1.0, 1.0]);
    let pts = iv
        .sample_point(20, SampleStrategy::Extreme, &mut rng())
        .unwrap();
    for col in pts.columns() {
        assert!(col[0] == 0.0 || col[0] == 1.0);
        assert!(col[1] == -1.0 || col[1] == 1.0);
    }
}

#[test]
fn test_center_strategy() {
    let iv = vector(&[0.0, 2.0], &[2.0, 4.0]);
    let pts = iv
        .sample_point(3, SampleStrategy::Center, &mut rng())
        .unwrap();
    for col in pts.columns() {
        assert_eq!(col[0], 1.0);
        assert_eq!(col[1], 3.0);
    }
}

#[test]
fn test_sampling_empty_fails() {
    let err = Interval::empty(&[2])
        .sample_point(1, SampleStrategy::Uniform, &mut rng())
        .unwrap_err();
    assert!(matches!(err, IntervalError::EmptySet));
}

#[test]
fn test_sampling_unbounded_fails() {
    let err = Interval::unbounded(&[2])
        .sample_point(1, SampleStrategy::Uniform, &mut rng())
        .unwrap_err();
    assert!(matches!(err, IntervalError::UnboundedSampling));

    let err = Interval::unbounded(&[2])
        .sample_point(1, SampleStrategy::Extreme, &mut rng())
        .unwrap_err();
    assert!(matches!(err, IntervalError::UnboundedSampling));

    // Center sampling fails through center().
    let err = Interval::unbounded(&[2])
        .sample_point(1, SampleStrategy::Center, &mut rng())
        .unwrap_err();
    assert!(matches!(err, IntervalError::UndefinedOperation(_)));
}

#[test]
fn test_vertices_2d() {
    let iv = vector(&[1.0, 3.0], &[2.0, 4.0]);
    let v = iv.vertices().unwrap();
    assert_eq!(v.shape(), &[2, 4]);
    // All four corners appear.
    let mut corners: Vec<(f64, f64)> = v.columns().into_iter().map(|c| (c[0], c[1])).collect();
    corners.sort_by(|a, b| a.partial_cmp(b).unwrap());
    assert_eq!(
        corners,
        vec![(1.0, 3.0), (1.0, 4.0), (2.0, 3.0), (2.0, 4.0)]
    );
}

#[test]
fn test_vertices_round_trip_reconstructs_box() {
    let iv = vector(&[-1.0, 0.5, 2.0], &[1.0, 0.5, 3.0]);
    let v = iv.vertices().unwrap();
    // The bounding box of the vertex set is the original interval.
    let mut lower = vec![f64::INFINITY; 3];
    let mut upper = vec![f64::NEG_INFINITY; 3];
    for col in v.columns() {
        for i in 0..3 {
            lower[i] = lower[i].min(col[i]);
            upper[i] = upper[i].max(col[i]);
        }
    }
    let hull = vector(&lower, &upper);
    assert!(hull.is_equal(&iv, DEFAULT_TOL));
}

#[test]
fn test_vertices_empty_and_unbounded() {
    let v = Interval::empty(&[3]).vertices().unwrap();
    assert_eq!(v.shape(), &[3, 0]);
    assert!(matches!(
        Interval::unbounded(&[2]).vertices(),
        Err(IntervalError::UndefinedOperation(_))
    ));
}

#[test]
fn test_vertices_dimension_guard() {
    assert!(Interval::origin(&[31]).vertices().is_err());
}

#[test]
fn test_volume() {
    let iv = vector(&[0.0, 0.0], &[2.0, 3.0]);
    assert_eq!(iv.volume(), 6.0);
}

#[test]
fn test_volume_degenerate_axis_is_zero() {
    let iv = vector(&[0.0, 1.0], &[2.0, 1.0]);
    assert_eq!(iv.volume(), 0.0);
}

#[test]
fn test_volume_empty_is_zero() {
    assert_eq!(Interval::empty(&[1]).volume(), 0.0);
}

#[test]
fn test_volume_unbounded_sentinel() {
    assert_eq!(Interval::unbounded(&[2]).volume(), f64::INFINITY);
}

#[test]
fn test_volume_monotone_under_containment() {
    let outer = vector(&[0.0, 0.0], &[4.0, 4.0]);
    let inner = vector(&[1.0, 1.0], &[2.0, 3.0]);
    assert!(outer.contains(&inner, DEFAULT_TOL).unwrap());
    assert!(inner.volume() <= outer.volume());
}
