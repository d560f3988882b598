//! Elementwise interval arithmetic.
//!
//! Binary operations follow classical interval arithmetic applied per
//! element, with scalar operands broadcast by the explicit reconciliation
//! step in [`crate::interval::broadcast`]. Infinity handling uses the
//! interval-arithmetic convention `0 * inf = 0` rather than the IEEE NaN;
//! NaN bounds poison the affected result elements.

use crate::interval::{broadcast, broadcast_shape, Interval};
use iota_core::{DivisionPolicy, IntervalError, Result};
use ndarray::{ArrayD, Zip};
use std::ops::{Add, Div, Mul, Neg, Sub};
use tracing::warn;

/// Product that treats `0 * inf` as 0 (a zero coefficient contributes
/// nothing, whatever the other factor).
#[inline]
fn safe_mul(a: f64, b: f64) -> f64 {
    if a == 0.0 || b == 0.0 {
        0.0
    } else {
        a * b
    }
}

/// Bounds of the product of two scalar intervals: min/max over the four
/// sign combinations. NaN in any operand bound poisons the result pair.
#[inline]
pub(crate) fn mul_bounds(al: f64, au: f64, bl: f64, bu: f64) -> (f64, f64) {
    if al.is_nan() || au.is_nan() || bl.is_nan() || bu.is_nan() {
        return (f64::NAN, f64::NAN);
    }
    let products = [
        safe_mul(al, bl),
        safe_mul(al, bu),
        safe_mul(au, bl),
        safe_mul(au, bu),
    ];
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for p in products {
        lo = lo.min(p);
        hi = hi.max(p);
    }
    (lo, hi)
}

/// Reciprocal bounds of a scalar interval, widening to `(-inf, inf)` when
/// the operand strictly contains zero. The degenerate zero interval has no
/// reciprocal image and poisons to NaN.
#[inline]
pub(crate) fn recip_widen(bl: f64, bu: f64) -> (f64, f64) {
    if bl.is_nan() || bu.is_nan() {
        return (f64::NAN, f64::NAN);
    }
    if bl == 0.0 && bu == 0.0 {
        return (f64::NAN, f64::NAN);
    }
    if bl < 0.0 && bu > 0.0 {
        return (f64::NEG_INFINITY, f64::INFINITY);
    }
    if bl == 0.0 {
        return (1.0 / bu, f64::INFINITY);
    }
    if bu == 0.0 {
        return (f64::NEG_INFINITY, 1.0 / bl);
    }
    (1.0 / bu, 1.0 / bl)
}

impl Interval {
    /// Elementwise sum. Shapes must agree up to scalar broadcasting.
    pub fn add(&self, other: &Interval) -> Result<Interval> {
        let shape = broadcast_shape(self, other)?;
        if self.empty || other.empty {
            return Ok(Interval::empty(&shape));
        }
        let (al, au, bl, bu) = broadcast(self, other)?;
        Ok(Interval {
            lower: &al + &bl,
            upper: &au + &bu,
            empty: false,
        })
    }

    /// Elementwise difference `self - other`.
    pub fn sub(&self, other: &Interval) -> Result<Interval> {
        let shape = broadcast_shape(self, other)?;
        if self.empty || other.empty {
            return Ok(Interval::empty(&shape));
        }
        let (al, au, bl, bu) = broadcast(self, other)?;
        Ok(Interval {
            lower: &al - &bu,
            upper: &au - &bl,
            empty: false,
        })
    }

    /// Elementwise product: min/max over the four sign combinations of the
    /// operand bounds, with `0 * inf = 0`.
    pub fn mul(&self, other: &Interval) -> Result<Interval> {
        let shape = broadcast_shape(self, other)?;
        if self.empty || other.empty {
            return Ok(Interval::empty(&shape));
        }
        let (al, au, bl, bu) = broadcast(self, other)?;
        let mut lo_vec = Vec::with_capacity(al.len());
        let mut hi_vec = Vec::with_capacity(al.len());
        for (((a_l, a_u), b_l), b_u) in al.iter().zip(au.iter()).zip(bl.iter()).zip(bu.iter()) {
            let (lo, hi) = mul_bounds(*a_l, *a_u, *b_l, *b_u);
            lo_vec.push(lo);
            hi_vec.push(hi);
        }
        let dim = al.raw_dim();
        Ok(Interval {
            lower: ArrayD::from_shape_vec(dim.clone(), lo_vec).unwrap(),
            upper: ArrayD::from_shape_vec(dim, hi_vec).unwrap(),
            empty: false,
        })
    }

    /// Elementwise quotient under the default division policy
    /// ([`DivisionPolicy::Widen`]).
    pub fn div(&self, other: &Interval) -> Result<Interval> {
        self.div_with(other, DivisionPolicy::default())
    }

    /// Elementwise quotient `self / other` under an explicit policy.
    ///
    /// A divisor element strictly containing zero either widens the result
    /// element to `(-inf, inf)` (with one warning per call) or fails with
    /// `DivisionByZeroInterval`, per the policy. A degenerate zero divisor
    /// follows IEEE sign conventions and yields infinite quotients with a
    /// warning, never a hard failure.
    pub fn div_with(&self, other: &Interval, policy: DivisionPolicy) -> Result<Interval> {
        let shape = broadcast_shape(self, other)?;
        if self.empty || other.empty {
            return Ok(Interval::empty(&shape));
        }
        let (al, au, bl, bu) = broadcast(self, other)?;
        let mut lo_vec = Vec::with_capacity(al.len());
        let mut hi_vec = Vec::with_capacity(al.len());
        let mut warned_interior = false;
        let mut warned_degenerate = false;
        for (((a_l, a_u), b_l), b_u) in al.iter().zip(au.iter()).zip(bl.iter()).zip(bu.iter()) {
            let (lo, hi) = if b_l.is_nan() || b_u.is_nan() {
                (f64::NAN, f64::NAN)
            } else if *b_l == 0.0 && *b_u == 0.0 {
                if !warned_degenerate {
                    warn!("division by a degenerate zero divisor; quotients saturate to infinity");
                    warned_degenerate = true;
                }
                if *a_l == 0.0 || *a_u == 0.0 {
                    // 0/0 has no defined quotient; poison.
                    (f64::NAN, f64::NAN)
                } else {
                    let q_l = a_l / 0.0;
                    let q_u = a_u / 0.0;
                    (q_l.min(q_u), q_l.max(q_u))
                }
            } else if *b_l < 0.0 && *b_u > 0.0 {
                match policy {
                    DivisionPolicy::Fail => return Err(IntervalError::DivisionByZeroInterval),
                    DivisionPolicy::Widen => {
                        if !warned_interior {
                            warn!(
                                "divisor interval contains zero; widening result to (-inf, inf)"
                            );
                            warned_interior = true;
                        }
                        (f64::NEG_INFINITY, f64::INFINITY)
                    }
                }
            } else {
                let (r_l, r_u) = recip_widen(*b_l, *b_u);
                mul_bounds(*a_l, *a_u, r_l, r_u)
            };
            lo_vec.push(lo);
            hi_vec.push(hi);
        }
        let dim = al.raw_dim();
        Ok(Interval {
            lower: ArrayD::from_shape_vec(dim.clone(), lo_vec).unwrap(),
            upper: ArrayD::from_shape_vec(dim, hi_vec).unwrap(),
            empty: false,
        })
    }

    /// Elementwise negation: bounds swap and flip sign.
    pub fn neg(&self) -> Interval {
        if self.empty {
            return self.clone();
        }
        Interval {
            lower: self.upper.mapv(|v| -v),
            upper: self.lower.mapv(|v| -v),
            empty: false,
        }
    }

    /// Elementwise absolute value: `[0, max(|l|, |u|)]` when the element
    /// straddles zero, otherwise the ordered endpoint images.
    pub fn abs(&self) -> Interval {
        if self.empty {
            return self.clone();
        }
        let mut lower = self.lower.clone();
        let mut upper = self.upper.clone();
        Zip::from(&mut lower)
            .and(&mut upper)
            .for_each(|l, u| {
                let (a, b) = (*l, *u);
                if a.is_nan() || b.is_nan() {
                    *l = f64::NAN;
                    *u = f64::NAN;
                } else if a >= 0.0 {
                    *l = a;
                    *u = b;
                } else if b <= 0.0 {
                    *l = -b;
                    *u = -a;
                } else {
                    *l = 0.0;
                    *u = (-a).max(b);
                }
            });
        Interval {
            lower,
            upper,
            empty: false,
        }
    }

    /// Elementwise integer power.
    ///
    /// Even positive exponents of an element straddling zero enclose zero in
    /// the lower bound; odd exponents are monotone. `x^0` is the degenerate
    /// 1 everywhere (including at 0). Negative exponents go through the
    /// widening reciprocal.
    pub fn powi(&self, n: i32) -> Interval {
        if self.empty {
            return self.clone();
        }
        if n == 0 {
            return Interval::point(ArrayD::from_elem(self.lower.raw_dim(), 1.0));
        }
        if n < 0 {
            let mut lower = self.lower.clone();
            let mut upper = self.upper.clone();
            Zip::from(&mut lower).and(&mut upper).for_each(|l, u| {
                let (r_l, r_u) = recip_widen(*l, *u);
                *l = r_l;
                *u = r_u;
            });
            let recip = Interval {
                lower,
                upper,
                empty: false,
            };
            return recip.powi(n.checked_neg().unwrap_or(i32::MAX));
        }
        let mut lower = self.lower.clone();
        let mut upper = self.upper.clone();
        Zip::from(&mut lower).and(&mut upper).for_each(|l, u| {
            let (a, b) = (*l, *u);
            if a.is_nan() || b.is_nan() {
                *l = f64::NAN;
                *u = f64::NAN;
                return;
            }
            let pa = a.powi(n);
            let pb = b.powi(n);
            if n % 2 == 0 && a < 0.0 && b > 0.0 {
                *l = 0.0;
                *u = pa.max(pb);
            } else {
                *l = pa.min(pb);
                *u = pa.max(pb);
            }
        });
        Interval {
            lower,
            upper,
            empty: false,
        }
    }

    /// Elementwise real power.
    ///
    /// Integer-valued exponents delegate to [`Interval::powi`]; otherwise
    /// the base must be nonnegative over its whole range (`DomainError`).
    pub fn powf(&self, p: f64) -> Result<Interval> {
        if p.fract() == 0.0 && p.abs() <= i32::MAX as f64 {
            return Ok(self.powi(p as i32));
        }
        if self.empty {
            return Ok(self.clone());
        }
        if self.lower.iter().any(|&l| l < 0.0) {
            return Err(IntervalError::DomainError {
                op: "powf",
                detail: format!("negative base with non-integer exponent {}", p),
            });
        }
        let (lower, upper) = if p > 0.0 {
            (self.lower.mapv(|v| v.powf(p)), self.upper.mapv(|v| v.powf(p)))
        } else {
            // Decreasing on the nonnegative reals; 0^p saturates to +inf.
            (self.upper.mapv(|v| v.powf(p)), self.lower.mapv(|v| v.powf(p)))
        };
        Ok(Interval {
            lower,
            upper,
            empty: false,
        })
    }
}

// --- scalar operator lifts -------------------------------------------------
//
// Raw numeric operands combine with intervals by implicit lifting to the
// degenerate interval; these impls cover the infallible scalar forms. Full
// interval-interval arithmetic goes through the fallible named methods.

impl Neg for &Interval {
    type Output = Interval;
    fn neg(self) -> Interval {
        Interval::neg(self)
    }
}

impl Neg for Interval {
    type Output = Interval;
    fn neg(self) -> Interval {
        Interval::neg(&self)
    }
}

impl Add<f64> for &Interval {
    type Output = Interval;
    fn add(self, rhs: f64) -> Interval {
        if self.empty {
            return self.clone();
        }
        Interval {
            lower: &self.lower + rhs,
            upper: &self.upper + rhs,
            empty: false,
        }
    }
}

impl Add<f64> for Interval {
    type Output = Interval;
    fn add(self, rhs: f64) -> Interval {
        &self + rhs
    }
}

impl Add<&Interval> for f64 {
    type Output = Interval;
    fn add(self, rhs: &Interval) -> Interval {
        rhs + self
    }
}

impl Add<Interval> for f64 {
    type Output = Interval;
    fn add(self, rhs: Interval) -> Interval {
        &rhs + self
    }
}

impl Sub<f64> for &Interval {
    type Output = Interval;
    fn sub(self, rhs: f64) -> Interval {
        self + (-rhs)
    }
}

impl Sub<f64> for Interval {
    type Output = Interval;
    fn sub(self, rhs: f64) -> Interval {
        &self + (-rhs)
    }
}

impl Sub<&Interval> for f64 {
    type Output = Interval;
    fn sub(self, rhs: &Interval) -> Interval {
        rhs.neg() + self
    }
}

impl Sub<Interval> for f64 {
    type Output = Interval;
    fn sub(self, rhs: Interval) -> Interval {
        rhs.neg() + self
    }
}

impl Mul<f64> for &Interval {
    type Output = Interval;
    fn mul(self, rhs: f64) -> Interval {
        if self.empty {
            return self.clone();
        }
        let a = self.lower.mapv(|v| safe_mul(v, rhs));
        let b = self.upper.mapv(|v| safe_mul(v, rhs));
        if rhs >= 0.0 {
            Interval {
                lower: a,
                upper: b,
                empty: false,
            }
        } else {
            Interval {
                lower: b,
                upper: a,
                empty: false,
            }
        }
    }
}

impl Mul<f64> for Interval {
    type Output = Interval;
    fn mul(self, rhs: f64) -> Interval {
        &self * rhs
    }
}

impl Mul<&Interval> for f64 {
    type Output = Interval;
    fn mul(self, rhs: &Interval) -> Interval {
        rhs * self
    }
}

impl Mul<Interval> for f64 {
    type Output = Interval;
    fn mul(self, rhs: Interval) -> Interval {
        &rhs * self
    }
}

impl Div<f64> for &Interval {
    type Output = Interval;
    fn div(self, rhs: f64) -> Interval {
        if self.empty {
            return self.clone();
        }
        if rhs == 0.0 {
            warn!("scalar division by zero; quotients saturate to infinity");
            let mut lower = self.lower.clone();
            let mut upper = self.upper.clone();
            Zip::from(&mut lower).and(&mut upper).for_each(|l, u| {
                if *l == 0.0 || *u == 0.0 {
                    // 0/0 has no defined quotient; poison.
                    *l = f64::NAN;
                    *u = f64::NAN;
                } else {
                    let q_l = *l / rhs;
                    let q_u = *u / rhs;
                    *l = q_l.min(q_u);
                    *u = q_l.max(q_u);
                }
            });
            return Interval {
                lower,
                upper,
                empty: false,
            };
        }
        self * (1.0 / rhs)
    }
}

impl Div<f64> for Interval {
    type Output = Interval;
    fn div(self, rhs: f64) -> Interval {
        &self / rhs
    }
}
