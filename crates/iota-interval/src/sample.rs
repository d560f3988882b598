//! Point sampling, vertex enumeration, and volume.

use crate::interval::Interval;
use iota_core::{IntervalError, Result};
use ndarray::Array2;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Point-generation strategy for [`Interval::sample_point`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SampleStrategy {
    /// Independent uniform draws per coordinate.
    #[default]
    Uniform,
    /// Random corner: each coordinate picks its lower or upper bound.
    Extreme,
    /// The box center, repeated.
    Center,
}

impl Interval {
    /// Draw `n` points from the box, one per column of the result.
    ///
    /// Coordinates follow the flattened element order of the bound arrays.
    /// Fails with `EmptySet` on the empty set and `UnboundedSampling` when a
    /// uniform or extreme draw is requested from a set of infinite extent
    /// (`Center` fails through [`Interval::center`] instead).
    pub fn sample_point<R: Rng + ?Sized>(
        &self,
        n: usize,
        strategy: SampleStrategy,
        rng: &mut R,
    ) -> Result<Array2<f64>> {
        if self.empty {
            return Err(IntervalError::EmptySet);
        }
        let d = self.len();
        debug!(dim = d, count = n, ?strategy, "sampling interval points");
        let lower: Vec<f64> = self.lower.iter().copied().collect();
        let upper: Vec<f64> = self.upper.iter().copied().collect();
        let mut points = Array2::zeros((d, n));
        match strategy {
            SampleStrategy::Uniform => {
                if !self.is_bounded() {
                    return Err(IntervalError::UnboundedSampling);
                }
                for col in 0..n {
                    for (row, (&l, &u)) in lower.iter().zip(upper.iter()).enumerate() {
                        points[[row, col]] = if l == u {
                            l
                        } else {
                            l + (u - l) * rng.gen::<f64>()
                        };
                    }
                }
            }
            SampleStrategy::Extreme => {
                if !self.is_bounded() {
                    return Err(IntervalError::UnboundedSampling);
                }
                for col in 0..n {
                    for (row, (&l, &u)) in lower.iter().zip(upper.iter()).enumerate() {
                        points[[row, col]] = if rng.gen::<bool>() { u } else { l };
                    }
                }
            }
            SampleStrategy::Center => {
                let center = self.center()?;
                for col in 0..n {
                    for (row, &c) in center.iter().enumerate() {
                        points[[row, col]] = c;
                    }
                }
            }
        }
        Ok(points)
    }

    /// Enumerate all `2^n` corner points of a bounded box, one per column.
    ///
    /// The empty set has no corners and yields a zero-column result.
    /// Unbounded intervals have no vertices; dimensions above 30 are
    /// rejected before the `2^n` blow-up.
    pub fn vertices(&self) -> Result<Array2<f64>> {
        let d = self.len();
        if self.empty {
            return Ok(Array2::zeros((d, 0)));
        }
        if !self.is_bounded() {
            return Err(IntervalError::UndefinedOperation(
                "vertices of an unbounded interval",
            ));
        }
        if d > 30 {
            return Err(IntervalError::UndefinedOperation(
                "vertex enumeration above 30 dimensions",
            ));
        }
        let lower: Vec<f64> = self.lower.iter().copied().collect();
        let upper: Vec<f64> = self.upper.iter().copied().collect();
        let count = 1usize << d;
        let mut out = Array2::zeros((d, count));
        for v in 0..count {
            for i in 0..d {
                out[[i, v]] = if (v >> i) & 1 == 1 { upper[i] } else { lower[i] };
            }
        }
        Ok(out)
    }

    /// Volume of the box: the product of per-axis widths.
    ///
    /// Degenerate axes give 0; the empty set has volume 0; unbounded
    /// intervals return the `+inf` sentinel rather than failing. NaN widths
    /// poison the product.
    pub fn volume(&self) -> f64 {
        if self.empty {
            return 0.0;
        }
        if !self.is_bounded() {
            return f64::INFINITY;
        }
        self.width().iter().product()
    }
}
