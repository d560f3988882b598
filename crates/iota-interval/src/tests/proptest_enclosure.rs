//! Property-based enclosure tests.
//!
//! The enclosure property: for all a in A and b in B, `a op b` lies inside
//! `A op B` for every supported operation. Operands are sampled as concrete
//! points on a grid inside the interval; a small tolerance absorbs
//! floating-point rounding (bound computation is not directed-rounding
//! rigorous by design).

use crate::Interval;
use proptest::prelude::*;

/// Tolerance for floating-point rounding in enclosure checks.
const FP_TOLERANCE: f64 = 1e-9;

/// Strategy for a valid bound pair `lower <= upper` within `±range`.
fn valid_interval(range: f64) -> impl Strategy<Value = (f64, f64)> {
    (-range..range).prop_flat_map(move |a| (-range..range).prop_map(move |b| (a.min(b), a.max(b))))
}

/// Concrete points spanning `[lower, upper]` inclusive.
fn sample_points(lower: f64, upper: f64, num_samples: usize) -> Vec<f64> {
    if lower == upper {
        return vec![lower];
    }
    (0..=num_samples)
        .map(|i| {
            let t = i as f64 / num_samples as f64;
            (lower + (upper - lower) * t).clamp(lower, upper)
        })
        .collect()
}

fn encloses(iv: &Interval, v: f64) -> bool {
    iv.lower()[[0]] - FP_TOLERANCE <= v && v <= iv.upper()[[0]] + FP_TOLERANCE
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn enclosure_add((al, au) in valid_interval(100.0), (bl, bu) in valid_interval(100.0)) {
        let a = Interval::scalar(al, au).unwrap();
        let b = Interval::scalar(bl, bu).unwrap();
        let sum = a.add(&b).unwrap();
        for x in sample_points(al, au, 10) {
            for y in sample_points(bl, bu, 10) {
                prop_assert!(
                    encloses(&sum, x + y),
                    "{} + {} = {} not in [{}, {}]",
                    x, y, x + y, sum.lower()[[0]], sum.upper()[[0]]
                );
            }
        }
    }

    #[test]
    fn enclosure_sub((al, au) in valid_interval(100.0), (bl, bu) in valid_interval(100.0)) {
        let a = Interval::scalar(al, au).unwrap();
        let b = Interval::scalar(bl, bu).unwrap();
        let diff = a.sub(&b).unwrap();
        for x in sample_points(al, au, 10) {
            for y in sample_points(bl, bu, 10) {
                prop_assert!(encloses(&diff, x - y));
            }
        }
    }

    #[test]
    fn enclosure_mul((al, au) in valid_interval(50.0), (bl, bu) in valid_interval(50.0)) {
        let a = Interval::scalar(al, au).unwrap();
        let b = Interval::scalar(bl, bu).unwrap();
        let prod = a.mul(&b).unwrap();
        for x in sample_points(al, au, 10) {
            for y in sample_points(bl, bu, 10) {
                // Product magnitudes reach 2500; scale the tolerance.
                let v = x * y;
                prop_assert!(
                    prod.lower()[[0]] - 1e-6 <= v && v <= prod.upper()[[0]] + 1e-6,
                    "{} * {} = {} not in [{}, {}]",
                    x, y, v, prod.lower()[[0]], prod.upper()[[0]]
                );
            }
        }
    }

    #[test]
    fn enclosure_div((al, au) in valid_interval(50.0), (bl, bu) in valid_interval(50.0)) {
        let a = Interval::scalar(al, au).unwrap();
        let b = Interval::scalar(bl, bu).unwrap();
        let quot = a.div(&b).unwrap();
        for x in sample_points(al, au, 8) {
            for y in sample_points(bl, bu, 8) {
                if y == 0.0 {
                    continue;
                }
                let v = x / y;
                // NaN bounds only arise from 0/0, which is skipped above.
                prop_assert!(
                    quot.lower()[[0]] - 1e-6 <= v && v <= quot.upper()[[0]] + 1e-6,
                    "{} / {} = {} not in [{}, {}]",
                    x, y, v, quot.lower()[[0]], quot.upper()[[0]]
                );
            }
        }
    }

    #[test]
    fn enclosure_powi((l, u) in valid_interval(10.0), n in 0i32..6) {
        let iv = Interval::scalar(l, u).unwrap();
        let p = iv.powi(n);
        for x in sample_points(l, u, 20) {
            let v = x.powi(n);
            prop_assert!(
                p.lower()[[0]] - 1e-6 <= v && v <= p.upper()[[0]] + 1e-6,
                "{}^{} = {} not in [{}, {}]",
                x, n, v, p.lower()[[0]], p.upper()[[0]]
            );
        }
    }

    #[test]
    fn enclosure_abs((l, u) in valid_interval(100.0)) {
        let iv = Interval::scalar(l, u).unwrap();
        let a = iv.abs();
        for x in sample_points(l, u, 20) {
            prop_assert!(encloses(&a, x.abs()));
        }
    }

    #[test]
    fn enclosure_exp((l, u) in valid_interval(10.0)) {
        let iv = Interval::scalar(l, u).unwrap();
        let e = iv.exp();
        for x in sample_points(l, u, 20) {
            prop_assert!(
                e.lower()[[0]] - 1e-6 <= x.exp() && x.exp() <= e.upper()[[0]] + 1e-6
            );
        }
    }

    #[test]
    fn enclosure_sin((l, u) in valid_interval(10.0)) {
        let iv = Interval::scalar(l, u).unwrap();
        let s = iv.sin();
        // Extra samples for the periodic case.
        for x in sample_points(l, u, 50) {
            prop_assert!(
                encloses(&s, x.sin()),
                "sin({}) = {} not in [{}, {}]",
                x, x.sin(), s.lower()[[0]], s.upper()[[0]]
            );
        }
    }

    #[test]
    fn enclosure_cos((l, u) in valid_interval(10.0)) {
        let iv = Interval::scalar(l, u).unwrap();
        let c = iv.cos();
        for x in sample_points(l, u, 50) {
            prop_assert!(encloses(&c, x.cos()));
        }
    }

    #[test]
    fn enclosure_tanh((l, u) in valid_interval(10.0)) {
        let iv = Interval::scalar(l, u).unwrap();
        let t = iv.tanh();
        for x in sample_points(l, u, 20) {
            prop_assert!(encloses(&t, x.tanh()));
        }
    }

    #[test]
    fn enclosure_sqrt((l, u) in valid_interval(100.0)) {
        let (l, u) = (l.abs().min(u.abs()), l.abs().max(u.abs()));
        let iv = Interval::scalar(l, u).unwrap();
        let r = iv.sqrt().unwrap();
        for x in sample_points(l, u, 20) {
            prop_assert!(encloses(&r, x.sqrt()));
        }
    }

    #[test]
    fn intersection_contains_common_points(
        (al, au) in valid_interval(50.0),
        (bl, bu) in valid_interval(50.0),
    ) {
        let a = Interval::scalar(al, au).unwrap();
        let b = Interval::scalar(bl, bu).unwrap();
        let isect = a.intersect(&b).unwrap();
        for x in sample_points(al, au, 20) {
            let in_both = bl <= x && x <= bu;
            if in_both {
                prop_assert!(!isect.is_empty());
                prop_assert!(encloses(&isect, x));
            }
        }
    }

    #[test]
    fn union_hull_contains_operand_points(
        (al, au) in valid_interval(50.0),
        (bl, bu) in valid_interval(50.0),
    ) {
        let a = Interval::scalar(al, au).unwrap();
        let b = Interval::scalar(bl, bu).unwrap();
        let hull = a.union_hull(&b).unwrap();
        for x in sample_points(al, au, 10).into_iter().chain(sample_points(bl, bu, 10)) {
            prop_assert!(encloses(&hull, x));
        }
    }

    #[test]
    fn volume_monotone_under_containment(
        (al, au) in valid_interval(50.0),
        (bl, bu) in valid_interval(50.0),
    ) {
        let a = Interval::scalar(al, au).unwrap();
        let b = Interval::scalar(bl, bu).unwrap();
        if a.contains(&b, 0.0).unwrap() {
            prop_assert!(b.volume() <= a.volume() + 1e-12);
        }
    }
}
