//! Set relations: containment, tolerance equality, ordering predicates.
//!
//! All predicates resolve NaN-bearing elements to `false`, matching IEEE-754
//! comparison semantics; they never raise on numeric edge cases. Shape
//! incompatibility is the only error surfaced here.

use crate::interval::Interval;
use iota_core::{IntervalError, Result};
use ndarray::ArrayD;

impl Interval {
    /// True iff every point of `other` lies within `self`, elementwise,
    /// with absolute tolerance `tol` on the bound comparison.
    ///
    /// The empty set is contained in everything; nothing except the empty
    /// set is contained in the empty set.
    pub fn contains(&self, other: &Interval, tol: f64) -> Result<bool> {
        if self.shape() != other.shape() {
            return Err(IntervalError::shape_mismatch(self.shape(), other.shape()));
        }
        if other.empty {
            return Ok(true);
        }
        if self.empty {
            return Ok(false);
        }
        Ok(self
            .lower
            .iter()
            .zip(self.upper.iter())
            .zip(other.lower.iter().zip(other.upper.iter()))
            .all(|((sl, su), (ol, ou))| *sl - tol <= *ol && *ou <= *su + tol))
    }

    /// True iff the concrete point lies within `self`, elementwise.
    pub fn contains_point(&self, point: &ArrayD<f64>, tol: f64) -> Result<bool> {
        if self.shape() != point.shape() {
            return Err(IntervalError::shape_mismatch(self.shape(), point.shape()));
        }
        if self.empty {
            return Ok(false);
        }
        Ok(self
            .lower
            .iter()
            .zip(self.upper.iter())
            .zip(point.iter())
            .all(|((l, u), p)| *l - tol <= *p && *p <= *u + tol))
    }

    /// True iff `self` is a subset of `other`.
    pub fn is_subset_of(&self, other: &Interval, tol: f64) -> Result<bool> {
        other.contains(self, tol)
    }

    /// True iff `self` is a superset of `other`.
    pub fn is_superset_of(&self, other: &Interval, tol: f64) -> Result<bool> {
        self.contains(other, tol)
    }

    /// Elementwise bound agreement within absolute tolerance `tol`.
    ///
    /// Two empty intervals of the same shape are equal; differently shaped
    /// intervals are simply unequal (no error). NaN-bearing elements compare
    /// unequal regardless of tolerance. Infinite bounds agree only when
    /// identical.
    pub fn is_equal(&self, other: &Interval, tol: f64) -> bool {
        if self.shape() != other.shape() {
            return false;
        }
        if self.empty || other.empty {
            return self.empty && other.empty;
        }
        let close = |a: f64, b: f64| {
            if a.is_infinite() || b.is_infinite() {
                a == b
            } else {
                (a - b).abs() <= tol
            }
        };
        self.lower
            .iter()
            .zip(other.lower.iter())
            .all(|(a, b)| close(*a, *b))
            && self
                .upper
                .iter()
                .zip(other.upper.iter())
                .all(|(a, b)| close(*a, *b))
    }

    /// Strict ordering: true iff every element of `self` lies entirely below
    /// the corresponding element of `other` (`self.upper < other.lower`).
    ///
    /// Overlapping operands answer false in both directions; this is a
    /// partial order on non-overlapping boxes, not a total one. Empty
    /// operands answer false.
    pub fn is_lt(&self, other: &Interval) -> Result<bool> {
        if self.shape() != other.shape() {
            return Err(IntervalError::shape_mismatch(self.shape(), other.shape()));
        }
        if self.empty || other.empty {
            return Ok(false);
        }
        Ok(self
            .upper
            .iter()
            .zip(other.lower.iter())
            .all(|(u, l)| *u < *l))
    }

    /// Non-strict ordering: `self.upper <= other.lower` elementwise.
    pub fn is_le(&self, other: &Interval) -> Result<bool> {
        if self.shape() != other.shape() {
            return Err(IntervalError::shape_mismatch(self.shape(), other.shape()));
        }
        if self.empty || other.empty {
            return Ok(false);
        }
        Ok(self
            .upper
            .iter()
            .zip(other.lower.iter())
            .all(|(u, l)| *u <= *l))
    }

    /// Strict ordering in the other direction; see [`Interval::is_lt`].
    pub fn is_gt(&self, other: &Interval) -> Result<bool> {
        other.is_lt(self)
    }

    /// Non-strict ordering in the other direction; see [`Interval::is_le`].
    pub fn is_ge(&self, other: &Interval) -> Result<bool> {
        other.is_le(self)
    }
}
