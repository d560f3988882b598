//! The core interval tensor type: bound storage, construction, invariants.

use iota_core::{IntervalError, Result};
use ndarray::{ArrayD, CowArray, IxDyn};
use serde::{Deserialize, Serialize};
use std::fmt;

/// An axis-aligned box over an N-dimensional array of reals.
///
/// Stores elementwise `lower`/`upper` bounds of identical shape. The
/// non-crossing invariant (`lower <= upper` per element) is enforced at
/// construction; NaN bounds are permitted and act as poisoning values.
///
/// The empty set is a distinguished state that keeps its shape but has no
/// points; it propagates through every operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Interval {
    pub(crate) lower: ArrayD<f64>,
    pub(crate) upper: ArrayD<f64>,
    pub(crate) empty: bool,
}

impl Interval {
    /// Create an interval from a bound pair.
    ///
    /// Fails with `ShapeMismatch` if the arrays differ in shape and with
    /// `InvalidBounds` if any element has `lower > upper`. NaN bounds pass
    /// validation (NaN comparisons are false) and poison later arithmetic.
    pub fn new(lower: ArrayD<f64>, upper: ArrayD<f64>) -> Result<Self> {
        if lower.shape() != upper.shape() {
            return Err(IntervalError::shape_mismatch(lower.shape(), upper.shape()));
        }
        for (index, (l, u)) in lower.iter().zip(upper.iter()).enumerate() {
            if l > u {
                return Err(IntervalError::InvalidBounds { index });
            }
        }
        Ok(Self {
            lower,
            upper,
            empty: false,
        })
    }

    /// Create an interval without validating the non-crossing invariant.
    ///
    /// Callers must guarantee `lower <= upper` elementwise (or accept the
    /// consequences); shape agreement is still required by construction sites.
    pub fn new_unchecked(lower: ArrayD<f64>, upper: ArrayD<f64>) -> Self {
        debug_assert_eq!(lower.shape(), upper.shape());
        Self {
            lower,
            upper,
            empty: false,
        }
    }

    /// Degenerate (zero-width) interval at the given values.
    pub fn point(values: ArrayD<f64>) -> Self {
        Self {
            lower: values.clone(),
            upper: values,
            empty: false,
        }
    }

    /// Scalar interval `[l, u]` with shape `[1]`.
    pub fn scalar(lower: f64, upper: f64) -> Result<Self> {
        Self::new(
            ArrayD::from_elem(IxDyn(&[1]), lower),
            ArrayD::from_elem(IxDyn(&[1]), upper),
        )
    }

    /// Degenerate scalar interval `[v, v]`.
    pub fn point_scalar(value: f64) -> Self {
        Self::point(ArrayD::from_elem(IxDyn(&[1]), value))
    }

    /// The empty set of the given shape.
    ///
    /// The stored bounds are the conventional `(+inf, -inf)` pair; they carry
    /// the shape only and are never read by operations.
    pub fn empty(shape: &[usize]) -> Self {
        Self {
            lower: ArrayD::from_elem(IxDyn(shape), f64::INFINITY),
            upper: ArrayD::from_elem(IxDyn(shape), f64::NEG_INFINITY),
            empty: true,
        }
    }

    /// The fully unbounded interval `(-inf, inf)` of the given shape.
    pub fn unbounded(shape: &[usize]) -> Self {
        Self {
            lower: ArrayD::from_elem(IxDyn(shape), f64::NEG_INFINITY),
            upper: ArrayD::from_elem(IxDyn(shape), f64::INFINITY),
            empty: false,
        }
    }

    /// Degenerate interval at the origin of the given shape.
    pub fn origin(shape: &[usize]) -> Self {
        Self::point(ArrayD::zeros(IxDyn(shape)))
    }

    /// Lower bound array.
    #[inline]
    pub fn lower(&self) -> &ArrayD<f64> {
        &self.lower
    }

    /// Upper bound array.
    #[inline]
    pub fn upper(&self) -> &ArrayD<f64> {
        &self.upper
    }

    /// Shape of the interval (scalar entries along each axis).
    #[inline]
    pub fn shape(&self) -> &[usize] {
        self.lower.shape()
    }

    /// Number of axes.
    #[inline]
    pub fn ndim(&self) -> usize {
        self.lower.ndim()
    }

    /// Total number of scalar interval elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.lower.len()
    }

    /// True if this is the empty set.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.empty
    }

    /// True if no bound is infinite. The empty set is bounded.
    pub fn is_bounded(&self) -> bool {
        self.empty
            || self
                .lower
                .iter()
                .zip(self.upper.iter())
                .all(|(l, u)| !l.is_infinite() && !u.is_infinite())
    }

    /// True if the interval holds exactly one scalar entry.
    #[inline]
    pub fn is_scalar(&self) -> bool {
        self.len() == 1
    }

    /// True if every bound is finite (no NaN, no infinity).
    pub fn is_finite(&self) -> bool {
        !self.empty
            && self
                .lower
                .iter()
                .zip(self.upper.iter())
                .all(|(l, u)| l.is_finite() && u.is_finite())
    }

    /// True if the interval is degenerate (`lower == upper` elementwise).
    pub fn is_point(&self) -> bool {
        !self.empty
            && self
                .lower
                .iter()
                .zip(self.upper.iter())
                .all(|(l, u)| l == u)
    }

    /// Midpoint `(lower + upper) / 2`.
    ///
    /// Undefined for empty and unbounded intervals.
    pub fn center(&self) -> Result<ArrayD<f64>> {
        if self.empty {
            return Err(IntervalError::UndefinedOperation(
                "center of an empty interval",
            ));
        }
        if !self.is_bounded() {
            return Err(IntervalError::UndefinedOperation(
                "center of an unbounded interval",
            ));
        }
        Ok((&self.lower + &self.upper) / 2.0)
    }

    /// Half-width `(upper - lower) / 2`, elementwise. NaN-filled for the
    /// empty set.
    pub fn radius(&self) -> ArrayD<f64> {
        if self.empty {
            return ArrayD::from_elem(self.lower.raw_dim(), f64::NAN);
        }
        (&self.upper - &self.lower) / 2.0
    }

    /// Width `upper - lower`, elementwise. Zero-filled for the empty set.
    pub fn width(&self) -> ArrayD<f64> {
        if self.empty {
            return ArrayD::zeros(self.lower.raw_dim());
        }
        &self.upper - &self.lower
    }

    /// The single scalar bound pair of a scalar interval.
    ///
    /// Panics in debug builds if the interval is not scalar; callers check
    /// `is_scalar()` first.
    pub(crate) fn scalar_bounds(&self) -> (f64, f64) {
        debug_assert!(self.is_scalar());
        let l = self.lower.iter().next().copied().unwrap_or(f64::NAN);
        let u = self.upper.iter().next().copied().unwrap_or(f64::NAN);
        (l, u)
    }
}

/// Reconcile the shapes of two operands ahead of a binary operation.
///
/// Shapes must be identical, or one operand must be scalar (single element),
/// in which case its bounds are splatted to the other operand's shape. This
/// is the only broadcasting the engine performs; anything else is a
/// `ShapeMismatch`.
pub(crate) fn broadcast<'a>(
    a: &'a Interval,
    b: &'a Interval,
) -> Result<(
    CowArray<'a, f64, IxDyn>,
    CowArray<'a, f64, IxDyn>,
    CowArray<'a, f64, IxDyn>,
    CowArray<'a, f64, IxDyn>,
)> {
    if a.shape() == b.shape() {
        return Ok((
            a.lower.view().into(),
            a.upper.view().into(),
            b.lower.view().into(),
            b.upper.view().into(),
        ));
    }
    if a.is_scalar() {
        let (al, au) = a.scalar_bounds();
        let dim = b.lower.raw_dim();
        return Ok((
            ArrayD::from_elem(dim.clone(), al).into(),
            ArrayD::from_elem(dim, au).into(),
            b.lower.view().into(),
            b.upper.view().into(),
        ));
    }
    if b.is_scalar() {
        let (bl, bu) = b.scalar_bounds();
        let dim = a.lower.raw_dim();
        return Ok((
            a.lower.view().into(),
            a.upper.view().into(),
            ArrayD::from_elem(dim.clone(), bl).into(),
            ArrayD::from_elem(dim, bu).into(),
        ));
    }
    Err(IntervalError::shape_mismatch(a.shape(), b.shape()))
}

/// The result shape of a binary operation between `a` and `b`.
pub(crate) fn broadcast_shape(a: &Interval, b: &Interval) -> Result<Vec<usize>> {
    if a.shape() == b.shape() {
        Ok(a.shape().to_vec())
    } else if a.is_scalar() {
        Ok(b.shape().to_vec())
    } else if b.is_scalar() {
        Ok(a.shape().to_vec())
    } else {
        Err(IntervalError::shape_mismatch(a.shape(), b.shape()))
    }
}

impl PartialEq for Interval {
    /// Exact structural equality: shapes agree and either both are empty or
    /// all bounds match bit-for-bit (NaN elements compare unequal).
    /// Tolerance-based comparison is [`Interval::is_equal`].
    fn eq(&self, other: &Self) -> bool {
        if self.shape() != other.shape() {
            return false;
        }
        if self.empty || other.empty {
            return self.empty && other.empty;
        }
        self.lower == other.lower && self.upper == other.upper
    }
}

impl From<f64> for Interval {
    fn from(value: f64) -> Self {
        Interval::point_scalar(value)
    }
}

impl From<ArrayD<f64>> for Interval {
    fn from(values: ArrayD<f64>) -> Self {
        Interval::point(values)
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.empty {
            return write!(f, "empty interval of shape {:?}", self.shape());
        }
        if self.is_scalar() {
            let (l, u) = self.scalar_bounds();
            return write!(f, "[{}, {}]", l, u);
        }
        match self.ndim() {
            1 => {
                let cells: Vec<String> = self
                    .lower
                    .iter()
                    .zip(self.upper.iter())
                    .map(|(l, u)| format!("[{}, {}]", l, u))
                    .collect();
                write!(f, "{}", cells.join(" "))
            }
            2 => {
                let cols = self.shape()[1].max(1);
                let rows: Vec<String> = self
                    .lower
                    .iter()
                    .zip(self.upper.iter())
                    .map(|(l, u)| format!("[{}, {}]", l, u))
                    .collect::<Vec<_>>()
                    .chunks(cols)
                    .map(|row| row.join(" "))
                    .collect();
                write!(f, "{}", rows.join("\n"))
            }
            _ => {
                let cells: Vec<String> = self
                    .lower
                    .iter()
                    .zip(self.upper.iter())
                    .map(|(l, u)| format!("[{}, {}]", l, u))
                    .collect();
                write!(f, "shape {:?}: {}", self.shape(), cells.join(" "))
            }
        }
    }
}
