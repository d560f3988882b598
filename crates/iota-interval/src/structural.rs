//! Structural operations on matrix-shaped intervals: transposition,
//! concatenation, diagonal and triangular extraction, Kronecker products,
//! and dimension lifting/projection.
//!
//! 1-D intervals are treated as column vectors wherever a matrix view is
//! required, so vectors concatenate and multiply the way column vectors do.

use crate::arithmetic::mul_bounds;
use crate::interval::Interval;
use iota_core::{IntervalError, Result};
use ndarray::{concatenate, Array2, ArrayD, Axis, Ix2, IxDyn};

/// Interpret a bound array of at most two axes as a matrix (vectors become
/// single-column matrices).
fn to_matrix(arr: &ArrayD<f64>) -> Result<Array2<f64>> {
    match arr.ndim() {
        0 => Ok(Array2::from_elem(
            (1, 1),
            arr.iter().next().copied().unwrap_or(f64::NAN),
        )),
        1 => {
            let n = arr.len();
            Ok(arr
                .to_owned()
                .into_shape_with_order((n, 1))
                .expect("vector reshapes to a single column"))
        }
        2 => Ok(arr
            .view()
            .into_dimensionality::<Ix2>()
            .expect("checked two axes")
            .to_owned()),
        _ => Err(IntervalError::UndefinedOperation(
            "matrix operation on an interval with more than two axes",
        )),
    }
}

fn from_matrix(lower: Array2<f64>, upper: Array2<f64>, empty: bool) -> Interval {
    if empty {
        return Interval::empty(&[lower.nrows(), lower.ncols()]);
    }
    Interval::new_unchecked(lower.into_dyn(), upper.into_dyn())
}

impl Interval {
    /// Transpose (reverse the axis order). A no-op for 1-D intervals;
    /// composing twice returns the original.
    pub fn transpose(&self) -> Interval {
        Interval {
            lower: self.lower.t().to_owned(),
            upper: self.upper.t().to_owned(),
            empty: self.empty,
        }
    }

    /// Horizontal concatenation (matching row counts).
    ///
    /// Any empty operand empties the result, which keeps the concatenated
    /// shape.
    pub fn horzcat(parts: &[&Interval]) -> Result<Interval> {
        Self::concat(parts, Axis(1))
    }

    /// Vertical concatenation (matching column counts).
    pub fn vertcat(parts: &[&Interval]) -> Result<Interval> {
        Self::concat(parts, Axis(0))
    }

    fn concat(parts: &[&Interval], axis: Axis) -> Result<Interval> {
        if parts.is_empty() {
            return Err(IntervalError::UndefinedOperation(
                "concatenation of zero operands",
            ));
        }
        let lowers = parts
            .iter()
            .map(|p| to_matrix(&p.lower))
            .collect::<Result<Vec<_>>>()?;
        let uppers = parts
            .iter()
            .map(|p| to_matrix(&p.upper))
            .collect::<Result<Vec<_>>>()?;
        let first = &lowers[0];
        for m in &lowers[1..] {
            let compatible = if axis == Axis(1) {
                m.nrows() == first.nrows()
            } else {
                m.ncols() == first.ncols()
            };
            if !compatible {
                return Err(IntervalError::shape_mismatch(first.shape(), m.shape()));
            }
        }
        let lower_views: Vec<_> = lowers.iter().map(|m| m.view()).collect();
        let upper_views: Vec<_> = uppers.iter().map(|m| m.view()).collect();
        let lower = concatenate(axis, &lower_views).expect("operand shapes checked");
        let upper = concatenate(axis, &upper_views).expect("operand shapes checked");
        let any_empty = parts.iter().any(|p| p.is_empty());
        Ok(from_matrix(lower, upper, any_empty))
    }

    /// Diagonal extraction/construction, as in MATLAB `diag`.
    ///
    /// A genuine matrix yields its main-diagonal vector; a vector (or a
    /// single-row/column matrix) yields the square matrix carrying it on
    /// the diagonal with degenerate zeros elsewhere.
    pub fn diag(&self) -> Result<Interval> {
        if self.empty {
            // Shape bookkeeping only; the result stays empty.
            let lower = to_matrix(&self.lower)?;
            let (m, n) = (lower.nrows(), lower.ncols());
            if m > 1 && n > 1 {
                return Ok(Interval::empty(&[m.min(n)]));
            }
            let k = m.max(n);
            return Ok(Interval::empty(&[k, k]));
        }
        let lower = to_matrix(&self.lower)?;
        let upper = to_matrix(&self.upper)?;
        let (m, n) = (lower.nrows(), lower.ncols());
        if m > 1 && n > 1 {
            let k = m.min(n);
            let l = ArrayD::from_shape_fn(IxDyn(&[k]), |idx| lower[[idx[0], idx[0]]]);
            let u = ArrayD::from_shape_fn(IxDyn(&[k]), |idx| upper[[idx[0], idx[0]]]);
            return Ok(Interval::new_unchecked(l, u));
        }
        let k = m.max(n);
        let flat_l: Vec<f64> = lower.iter().copied().collect();
        let flat_u: Vec<f64> = upper.iter().copied().collect();
        let mut dl = Array2::zeros((k, k));
        let mut du = Array2::zeros((k, k));
        for i in 0..k {
            dl[[i, i]] = flat_l[i];
            du[[i, i]] = flat_u[i];
        }
        Ok(from_matrix(dl, du, false))
    }

    /// Lower-triangular extraction: keep entries on and below the `k`-th
    /// diagonal, replace the rest with degenerate zeros.
    pub fn tril(&self, k: isize) -> Result<Interval> {
        self.triangular(k, true)
    }

    /// Upper-triangular extraction: keep entries on and above the `k`-th
    /// diagonal.
    pub fn triu(&self, k: isize) -> Result<Interval> {
        self.triangular(k, false)
    }

    fn triangular(&self, k: isize, lower_part: bool) -> Result<Interval> {
        let mut lower = to_matrix(&self.lower)?;
        let mut upper = to_matrix(&self.upper)?;
        if self.empty {
            return Ok(Interval::empty(&[lower.nrows(), lower.ncols()]));
        }
        for ((i, j), v) in lower.indexed_iter_mut() {
            let offset = j as isize - i as isize;
            let keep = if lower_part { offset <= k } else { offset >= k };
            if !keep {
                *v = 0.0;
            }
        }
        for ((i, j), v) in upper.indexed_iter_mut() {
            let offset = j as isize - i as isize;
            let keep = if lower_part { offset <= k } else { offset >= k };
            if !keep {
                *v = 0.0;
            }
        }
        Ok(from_matrix(lower, upper, false))
    }

    /// Kronecker product of interval matrices.
    ///
    /// Each block of the result is a scalar-interval times matrix-interval
    /// product, computed with the elementwise multiplication kernel.
    pub fn kron(&self, other: &Interval) -> Result<Interval> {
        let al = to_matrix(&self.lower)?;
        let au = to_matrix(&self.upper)?;
        let bl = to_matrix(&other.lower)?;
        let bu = to_matrix(&other.upper)?;
        let (m, n) = (al.nrows(), al.ncols());
        let (p, q) = (bl.nrows(), bl.ncols());
        if self.empty || other.empty {
            return Ok(Interval::empty(&[m * p, n * q]));
        }
        let mut lower = Array2::zeros((m * p, n * q));
        let mut upper = Array2::zeros((m * p, n * q));
        for i in 0..m {
            for j in 0..n {
                for r in 0..p {
                    for s in 0..q {
                        let (lo, hi) =
                            mul_bounds(al[[i, j]], au[[i, j]], bl[[r, s]], bu[[r, s]]);
                        lower[[i * p + r, j * q + s]] = lo;
                        upper[[i * p + r, j * q + s]] = hi;
                    }
                }
            }
        }
        Ok(from_matrix(lower, upper, false))
    }

    /// Select a coordinate subset of a vector-shaped interval.
    ///
    /// Coordinates index the flattened element order; the result is 1-D.
    pub fn project(&self, dims: &[usize]) -> Result<Interval> {
        let n = self.len();
        if dims.iter().any(|&d| d >= n) {
            return Err(IntervalError::UndefinedOperation(
                "projection coordinate out of range",
            ));
        }
        if self.empty {
            return Ok(Interval::empty(&[dims.len()]));
        }
        let flat_l: Vec<f64> = self.lower.iter().copied().collect();
        let flat_u: Vec<f64> = self.upper.iter().copied().collect();
        let l: Vec<f64> = dims.iter().map(|&d| flat_l[d]).collect();
        let u: Vec<f64> = dims.iter().map(|&d| flat_u[d]).collect();
        Ok(Interval::new_unchecked(
            ArrayD::from_shape_vec(IxDyn(&[dims.len()]), l).unwrap(),
            ArrayD::from_shape_vec(IxDyn(&[dims.len()]), u).unwrap(),
        ))
    }

    /// Embed a vector-shaped interval into a larger coordinate set.
    ///
    /// `dims[i]` names the target coordinate of this interval's `i`-th
    /// element; every unnamed coordinate of the result is unbounded.
    pub fn lift(&self, target_dim: usize, dims: &[usize]) -> Result<Interval> {
        if dims.len() != self.len() {
            return Err(IntervalError::shape_mismatch(&[self.len()], &[dims.len()]));
        }
        if dims.iter().any(|&d| d >= target_dim) {
            return Err(IntervalError::UndefinedOperation(
                "lift coordinate outside the target dimension",
            ));
        }
        let mut seen = vec![false; target_dim];
        for &d in dims {
            if seen[d] {
                return Err(IntervalError::UndefinedOperation(
                    "duplicate lift coordinate",
                ));
            }
            seen[d] = true;
        }
        if self.empty {
            return Ok(Interval::empty(&[target_dim]));
        }
        let mut lower = ArrayD::from_elem(IxDyn(&[target_dim]), f64::NEG_INFINITY);
        let mut upper = ArrayD::from_elem(IxDyn(&[target_dim]), f64::INFINITY);
        for (&d, (l, u)) in dims.iter().zip(self.lower.iter().zip(self.upper.iter())) {
            lower[[d]] = *l;
            upper[[d]] = *u;
        }
        Ok(Interval::new_unchecked(lower, upper))
    }
}
