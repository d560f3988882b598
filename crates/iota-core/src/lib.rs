//! Core types for the iota interval engine.
//!
//! This crate provides the error taxonomy and numeric policy configuration
//! shared by every set-representation crate in the workspace. It carries no
//! array code of its own; the interval type lives in `iota-interval`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default absolute tolerance for relation checks (equality, containment).
///
/// Threaded explicitly through every relation call; there is no global
/// mutable tolerance state.
pub const DEFAULT_TOL: f64 = 1e-9;

/// Error types for interval operations.
///
/// Shape and domain errors are raised at the operation boundary with no
/// partial results. Numeric edge cases (infinity arithmetic, NaN) are
/// absorbed into result values instead and never surface here.
#[derive(Debug, Error)]
pub enum IntervalError {
    /// Operand shapes are incompatible and neither operand is a scalar.
    #[error("shape mismatch: expected {expected:?}, got {got:?}")]
    ShapeMismatch {
        expected: Vec<usize>,
        got: Vec<usize>,
    },

    /// Construction with `lower > upper` on a non-empty request.
    #[error("invalid bounds: lower exceeds upper at flat index {index}")]
    InvalidBounds { index: usize },

    /// A function was applied outside its mathematical domain.
    #[error("domain error in {op}: {detail}")]
    DomainError { op: &'static str, detail: String },

    /// The divisor interval contains zero strictly inside its bounds and the
    /// division policy is [`DivisionPolicy::Fail`].
    #[error("division by an interval containing zero")]
    DivisionByZeroInterval,

    /// Sampling or enumeration was requested on a set with no points.
    #[error("operation requires a non-empty set")]
    EmptySet,

    /// Sampling was requested on a set of infinite extent.
    #[error("cannot sample from an unbounded interval")]
    UnboundedSampling,

    /// The operation is mathematically undefined for the given operand,
    /// e.g. the center of an unbounded interval.
    #[error("undefined operation: {0}")]
    UndefinedOperation(&'static str),
}

impl IntervalError {
    /// Create a `ShapeMismatch` error from two shape slices.
    #[inline]
    pub fn shape_mismatch(expected: &[usize], got: &[usize]) -> Self {
        IntervalError::ShapeMismatch {
            expected: expected.to_vec(),
            got: got.to_vec(),
        }
    }
}

pub type Result<T> = std::result::Result<T, IntervalError>;

/// Policy for division by an interval that strictly contains zero.
///
/// The reference behavior is to warn and continue with the unbounded
/// interval, so [`DivisionPolicy::Widen`] is the default; `Fail` is the
/// opt-in strict mode for callers that prefer a hard error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DivisionPolicy {
    /// Produce `(-inf, inf)` for the affected elements and log a warning.
    #[default]
    Widen,
    /// Return [`IntervalError::DivisionByZeroInterval`].
    Fail,
}
