//! Set combination: intersection, union hull, Minkowski difference.

use crate::interval::{broadcast, broadcast_shape, Interval};
use iota_core::Result;
use ndarray::Zip;

impl Interval {
    /// Exact intersection of two boxes: elementwise `(max lower, min upper)`.
    ///
    /// If the bounds cross on any element the sets are disjoint and the
    /// whole result is the empty set of the reconciled shape.
    pub fn intersect(&self, other: &Interval) -> Result<Interval> {
        let shape = broadcast_shape(self, other)?;
        if self.empty || other.empty {
            return Ok(Interval::empty(&shape));
        }
        let (al, au, bl, bu) = broadcast(self, other)?;
        let mut lower = al.to_owned();
        let mut upper = au.to_owned();
        Zip::from(&mut lower).and(&bl).for_each(|l, b| *l = l.max(*b));
        Zip::from(&mut upper).and(&bu).for_each(|u, b| *u = u.min(*b));
        if lower.iter().zip(upper.iter()).any(|(l, u)| l > u) {
            return Ok(Interval::empty(&shape));
        }
        Ok(Interval {
            lower,
            upper,
            empty: false,
        })
    }

    /// Smallest box enclosing the union: elementwise `(min lower, max upper)`.
    ///
    /// The true union of two boxes is generally not a box; this hull
    /// encloses it and is an intentional over-approximation.
    pub fn union_hull(&self, other: &Interval) -> Result<Interval> {
        let shape = broadcast_shape(self, other)?;
        if self.empty && other.empty {
            return Ok(Interval::empty(&shape));
        }
        if self.empty {
            return Ok(materialize(other, &shape));
        }
        if other.empty {
            return Ok(materialize(self, &shape));
        }
        let (al, au, bl, bu) = broadcast(self, other)?;
        let mut lower = al.to_owned();
        let mut upper = au.to_owned();
        Zip::from(&mut lower).and(&bl).for_each(|l, b| *l = l.min(*b));
        Zip::from(&mut upper).and(&bu).for_each(|u, b| *u = u.max(*b));
        Ok(Interval {
            lower,
            upper,
            empty: false,
        })
    }

    /// Minkowski difference: the largest box `X` with `X ⊕ other ⊆ self`.
    ///
    /// Per axis the candidate is `[self.lower - other.lower, self.upper -
    /// other.upper]`; if `other` is wider than `self` along any axis the
    /// candidate crosses and no such box exists, so the result is empty.
    /// An empty subtrahend constrains nothing and yields the unbounded
    /// interval.
    pub fn minkowski_diff(&self, other: &Interval) -> Result<Interval> {
        let shape = broadcast_shape(self, other)?;
        if self.empty {
            return Ok(Interval::empty(&shape));
        }
        if other.empty {
            return Ok(Interval::unbounded(&shape));
        }
        let (al, au, bl, bu) = broadcast(self, other)?;
        let lower = &al - &bl;
        let upper = &au - &bu;
        if lower.iter().zip(upper.iter()).any(|(l, u)| l > u) {
            return Ok(Interval::empty(&shape));
        }
        Ok(Interval {
            lower,
            upper,
            empty: false,
        })
    }
}

/// Clone `iv`, splatting a scalar operand to the reconciled shape.
fn materialize(iv: &Interval, shape: &[usize]) -> Interval {
    if iv.shape() == shape {
        return iv.clone();
    }
    let (l, u) = iv.scalar_bounds();
    Interval {
        lower: ndarray::ArrayD::from_elem(ndarray::IxDyn(shape), l),
        upper: ndarray::ArrayD::from_elem(ndarray::IxDyn(shape), u),
        empty: false,
    }
}
