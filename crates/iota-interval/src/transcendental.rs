//! Monotone interval extensions of transcendental functions.
//!
//! Monotone functions are evaluated at the operand bounds and the images
//! ordered. Periodic functions additionally widen the result to any local
//! extremum enclosed by the operand (`cos` over an interval spanning 0 must
//! enclose 1). Domain violations are rejected with `DomainError` before any
//! computation; NaN bounds pass the checks and poison the result instead.

use crate::interval::Interval;
use iota_core::{IntervalError, Result};
use ndarray::Zip;
use std::f64::consts::{FRAC_PI_2, PI, TAU};

/// True if some point `phase + k*period` (integer `k`) lies in `[l, u]`.
#[inline]
fn contains_phase(l: f64, u: f64, phase: f64, period: f64) -> bool {
    let k = ((l - phase) / period).ceil();
    phase + k * period <= u
}

#[inline]
fn sin_bounds(l: f64, u: f64) -> (f64, f64) {
    if l.is_nan() || u.is_nan() {
        return (f64::NAN, f64::NAN);
    }
    if !l.is_finite() || !u.is_finite() || u - l >= TAU {
        return (-1.0, 1.0);
    }
    let (sl, su) = (l.sin(), u.sin());
    let mut lo = sl.min(su);
    let mut hi = sl.max(su);
    if contains_phase(l, u, FRAC_PI_2, TAU) {
        hi = 1.0;
    }
    if contains_phase(l, u, -FRAC_PI_2, TAU) {
        lo = -1.0;
    }
    (lo, hi)
}

#[inline]
fn cos_bounds(l: f64, u: f64) -> (f64, f64) {
    if l.is_nan() || u.is_nan() {
        return (f64::NAN, f64::NAN);
    }
    if !l.is_finite() || !u.is_finite() || u - l >= TAU {
        return (-1.0, 1.0);
    }
    let (cl, cu) = (l.cos(), u.cos());
    let mut lo = cl.min(cu);
    let mut hi = cl.max(cu);
    if contains_phase(l, u, 0.0, TAU) {
        hi = 1.0;
    }
    if contains_phase(l, u, PI, TAU) {
        lo = -1.0;
    }
    (lo, hi)
}

#[inline]
fn tan_bounds(l: f64, u: f64) -> (f64, f64) {
    if l.is_nan() || u.is_nan() {
        return (f64::NAN, f64::NAN);
    }
    // A pole inside the operand makes the image the whole real line.
    if !l.is_finite() || !u.is_finite() || u - l >= PI || contains_phase(l, u, FRAC_PI_2, PI) {
        return (f64::NEG_INFINITY, f64::INFINITY);
    }
    (l.tan(), u.tan())
}

impl Interval {
    /// Apply an elementwise bound-pair kernel, propagating the empty set.
    fn map_elementwise(&self, f: impl Fn(f64, f64) -> (f64, f64)) -> Interval {
        if self.empty {
            return self.clone();
        }
        let mut lower = self.lower.clone();
        let mut upper = self.upper.clone();
        Zip::from(&mut lower).and(&mut upper).for_each(|l, u| {
            let (lo, hi) = f(*l, *u);
            *l = lo;
            *u = hi;
        });
        Interval {
            lower,
            upper,
            empty: false,
        }
    }

    /// Reject the operation when `pred` fails for some bound pair.
    fn check_domain(
        &self,
        op: &'static str,
        expect: &str,
        pred: impl Fn(f64, f64) -> bool,
    ) -> Result<()> {
        if self.empty {
            return Ok(());
        }
        for (l, u) in self.lower.iter().zip(self.upper.iter()) {
            // NaN bounds fall through every check and poison the result.
            if l.is_nan() || u.is_nan() {
                continue;
            }
            if !pred(*l, *u) {
                return Err(IntervalError::DomainError {
                    op,
                    detail: format!("operand [{}, {}] outside {}", l, u, expect),
                });
            }
        }
        Ok(())
    }

    /// Elementwise exponential.
    pub fn exp(&self) -> Interval {
        self.map_elementwise(|l, u| (l.exp(), u.exp()))
    }

    /// Elementwise natural logarithm.
    ///
    /// Requires nonnegative lower bounds; `ln(0)` is the limit `-inf`.
    pub fn ln(&self) -> Result<Interval> {
        self.check_domain("ln", "[0, inf)", |l, _| l >= 0.0)?;
        Ok(self.map_elementwise(|l, u| (l.ln(), u.ln())))
    }

    /// Elementwise square root. Requires nonnegative lower bounds.
    pub fn sqrt(&self) -> Result<Interval> {
        self.check_domain("sqrt", "[0, inf)", |l, _| l >= 0.0)?;
        Ok(self.map_elementwise(|l, u| (l.sqrt(), u.sqrt())))
    }

    /// Elementwise sine, widened to ±1 where the operand encloses an
    /// extremum of the period.
    pub fn sin(&self) -> Interval {
        self.map_elementwise(sin_bounds)
    }

    /// Elementwise cosine, widened to ±1 where the operand encloses an
    /// extremum of the period.
    pub fn cos(&self) -> Interval {
        self.map_elementwise(cos_bounds)
    }

    /// Elementwise tangent. Elements enclosing a pole widen to the whole
    /// real line.
    pub fn tan(&self) -> Interval {
        self.map_elementwise(tan_bounds)
    }

    /// Elementwise arcsine. Requires the operand within `[-1, 1]`.
    pub fn asin(&self) -> Result<Interval> {
        self.check_domain("asin", "[-1, 1]", |l, u| l >= -1.0 && u <= 1.0)?;
        Ok(self.map_elementwise(|l, u| (l.asin(), u.asin())))
    }

    /// Elementwise arccosine (decreasing). Requires the operand within
    /// `[-1, 1]`.
    pub fn acos(&self) -> Result<Interval> {
        self.check_domain("acos", "[-1, 1]", |l, u| l >= -1.0 && u <= 1.0)?;
        Ok(self.map_elementwise(|l, u| (u.acos(), l.acos())))
    }

    /// Elementwise arctangent.
    pub fn atan(&self) -> Interval {
        self.map_elementwise(|l, u| (l.atan(), u.atan()))
    }

    /// Elementwise hyperbolic sine.
    pub fn sinh(&self) -> Interval {
        self.map_elementwise(|l, u| (l.sinh(), u.sinh()))
    }

    /// Elementwise hyperbolic cosine: even, with minimum 1 at 0.
    pub fn cosh(&self) -> Interval {
        self.map_elementwise(|l, u| {
            if l.is_nan() || u.is_nan() {
                return (f64::NAN, f64::NAN);
            }
            let (cl, cu) = (l.cosh(), u.cosh());
            if l < 0.0 && u > 0.0 {
                (1.0, cl.max(cu))
            } else {
                (cl.min(cu), cl.max(cu))
            }
        })
    }

    /// Elementwise hyperbolic tangent.
    pub fn tanh(&self) -> Interval {
        self.map_elementwise(|l, u| (l.tanh(), u.tanh()))
    }

    /// Elementwise inverse hyperbolic sine.
    pub fn asinh(&self) -> Interval {
        self.map_elementwise(|l, u| (l.asinh(), u.asinh()))
    }

    /// Elementwise inverse hyperbolic cosine. Requires lower bounds >= 1.
    pub fn acosh(&self) -> Result<Interval> {
        self.check_domain("acosh", "[1, inf)", |l, _| l >= 1.0)?;
        Ok(self.map_elementwise(|l, u| (l.acosh(), u.acosh())))
    }

    /// Elementwise inverse hyperbolic tangent. Requires the operand within
    /// `[-1, 1]`; `atanh(±1)` is the limit `±inf`.
    pub fn atanh(&self) -> Result<Interval> {
        self.check_domain("atanh", "[-1, 1]", |l, u| l >= -1.0 && u <= 1.0)?;
        Ok(self.map_elementwise(|l, u| (l.atanh(), u.atanh())))
    }
}
