//! Function-level pipeline: a scalar functional operator `x(t) ↦ f(x(t), t)`
//! over continuous functions on an interval, with sup-norm distances
//! approximated by ternary search.

use crate::error::{PicardError, Result};
use crate::search::function_distance;
use crate::solving::ContractionMap;

/// An iterate of the functional operator, identified by how many times the
/// operator has been applied to the zero function.
///
/// The iterate is evaluated pointwise by a bounded loop rather than by nested
/// recursion, so its depth never touches the call stack.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FunctionIterate {
    steps: usize,
}

impl FunctionIterate {
    /// The starting point of the iteration: the zero function.
    pub fn start() -> Self {
        Self { steps: 0 }
    }

    /// Number of operator applications this iterate represents.
    pub fn steps(&self) -> usize {
        self.steps
    }
}

/// A contraction operator on `C[left, right]`, defined by its pointwise value
/// map `(x, t) ↦ f(x, t)` and an analytically supplied contraction factor.
///
/// The metric tolerance bounds the ternary search that approximates sup-norm
/// distances between iterates.
pub struct FunctionalContraction<F>
where
    F: Fn(f64, f64) -> f64,
{
    operator: F,
    left: f64,
    right: f64,
    factor: f64,
    metric_tolerance: f64,
}

impl<F> FunctionalContraction<F>
where
    F: Fn(f64, f64) -> f64,
{
    /// Validates the interval and factor and constructs the operator.
    pub fn new(
        operator: F,
        left: f64,
        right: f64,
        factor: f64,
        metric_tolerance: f64,
    ) -> Result<Self> {
        if !left.is_finite() || !right.is_finite() || left >= right {
            return Err(PicardError::InvalidInterval { left, right });
        }
        if !factor.is_finite() || factor <= 0.0 || factor >= 1.0 {
            return Err(PicardError::InvalidContractionFactor { factor });
        }
        if !(metric_tolerance > 0.0) {
            return Err(PicardError::non_finite("metric tolerance"));
        }
        Ok(Self {
            operator,
            left,
            right,
            factor,
            metric_tolerance,
        })
    }

    /// Left endpoint of the interval the functions live on.
    pub fn left(&self) -> f64 {
        self.left
    }

    /// Right endpoint of the interval.
    pub fn right(&self) -> f64 {
        self.right
    }

    /// Evaluates the iterate at `t` by folding the operator `steps` times
    /// over the value of the zero function.
    pub fn eval(&self, iterate: FunctionIterate, t: f64) -> f64 {
        let mut value = 0.0;
        for _ in 0..iterate.steps {
            value = (self.operator)(value, t);
        }
        value
    }

    /// Borrows an iterate as a plain `t ↦ x_n(t)` closure, for sampling and
    /// plotting.
    pub fn as_function(&self, iterate: FunctionIterate) -> impl Fn(f64) -> f64 + '_ {
        move |t| self.eval(iterate, t)
    }
}

impl<F> ContractionMap for FunctionalContraction<F>
where
    F: Fn(f64, f64) -> f64,
{
    type Point = FunctionIterate;

    fn apply(&self, point: &FunctionIterate) -> FunctionIterate {
        FunctionIterate {
            steps: point.steps + 1,
        }
    }

    fn distance(&self, a: &FunctionIterate, b: &FunctionIterate) -> f64 {
        let (a, b) = (*a, *b);
        function_distance(
            |t| self.eval(a, t),
            |t| self.eval(b, t),
            self.left,
            self.right,
            self.metric_tolerance,
        )
    }

    fn factor(&self) -> f64 {
        self.factor
    }
}
