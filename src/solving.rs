//! The shared successive-approximation core: the contraction-map abstraction,
//! a priori and a posteriori iteration estimates, and the fixed-point solver.

use log::debug;

use crate::error::{PicardError, Result};

/// A contraction mapping over some metric space of points.
///
/// The distance lives on the map rather than the point because the
/// function-space metric needs the operator's interval and search tolerance to
/// evaluate a supremum; vector maps simply ignore that context.
pub trait ContractionMap {
    /// The points the map acts on (vectors, function iterates, ...).
    type Point: Clone;

    /// Applies the operator once: `x ↦ Φ(x)`.
    fn apply(&self, point: &Self::Point) -> Self::Point;

    /// Distance between two points in the map's metric.
    fn distance(&self, a: &Self::Point, b: &Self::Point) -> f64;

    /// The contraction (Lipschitz) factor `alpha`, expected in (0, 1).
    fn factor(&self) -> f64;
}

/// Configuration for the fixed-point iteration.
#[derive(Clone, Debug)]
pub struct IterationOptions {
    /// Target precision for the a posteriori stopping test.
    pub tolerance: f64,
    /// Maximum number of iterations allowed before aborting.
    pub max_iterations: usize,
}

impl Default for IterationOptions {
    fn default() -> Self {
        Self {
            tolerance: 1e-9,
            max_iterations: 1_000,
        }
    }
}

impl IterationOptions {
    /// Overrides the stopping tolerance while preserving other defaults.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Overrides the iteration cap while preserving other defaults.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations.max(1);
        self
    }
}

/// Diagnostics returned alongside the converged iterate.
#[derive(Clone, Copy, Debug)]
pub struct IterationSummary {
    /// Number of operator applications performed.
    pub iterations: usize,
    /// A posteriori gap `(alpha/(1-alpha))·dist(x_{n-1}, x_n)` at termination.
    pub gap: f64,
}

/// The two iteration counts contraction theory provides: the closed-form bound
/// computed before iterating and the count the stopping test actually needed.
#[derive(Clone, Copy, Debug)]
pub struct ConvergenceEstimate {
    /// A priori bound from the first displacement.
    pub a_priori: usize,
    /// Iterations actually performed until the a posteriori test passed.
    pub a_posteriori: usize,
    /// Final a posteriori gap.
    pub gap: f64,
}

fn validate_factor(factor: f64) -> Result<f64> {
    if !factor.is_finite() || factor <= 0.0 || factor >= 1.0 {
        return Err(PicardError::InvalidContractionFactor { factor });
    }
    Ok(factor)
}

/// Computes the a priori iteration bound
/// `ceil(log_alpha(tolerance·(1 - alpha) / initial_gap))`.
///
/// `initial_gap` is the distance between the starting point and its first
/// image and must be strictly positive; a start already within tolerance of
/// the fixed point leaves the logarithm undefined. The bound is clamped below
/// at zero and is advisory only: the solver stops on the a posteriori test.
pub fn a_priori_iterations(initial_gap: f64, factor: f64, tolerance: f64) -> Result<usize> {
    let factor = validate_factor(factor)?;
    if !(initial_gap > 0.0) {
        return Err(PicardError::ZeroInitialDisplacement);
    }
    let argument = tolerance * (1.0 - factor) / initial_gap;
    if !argument.is_finite() || argument <= 0.0 {
        return Err(PicardError::non_finite("a priori estimate"));
    }
    let bound = (argument.ln() / factor.ln()).ceil();
    Ok(bound.max(0.0) as usize)
}

/// Runs the successive-approximation loop `x_{n+1} = Φ(x_n)` from `start`,
/// retaining only the two most recent iterates, until the a posteriori test
/// `(alpha/(1-alpha))·dist(x_{n-1}, x_n) <= tolerance` is satisfied.
///
/// Returns the converged iterate with diagnostics, or
/// [`DidNotConverge`](PicardError::DidNotConverge) if the cap in `options` is
/// reached first (the original unbounded loop is deliberately not reproduced).
pub fn solve_fixed_point<M: ContractionMap>(
    map: &M,
    start: M::Point,
    options: &IterationOptions,
) -> Result<(M::Point, IterationSummary)> {
    let factor = validate_factor(map.factor())?;
    let ratio = factor / (1.0 - factor);

    let mut previous = start;
    let mut current = map.apply(&previous);
    let mut iterations = 1usize;

    loop {
        let gap = ratio * map.distance(&previous, &current);
        if !gap.is_finite() {
            return Err(PicardError::non_finite("a posteriori gap"));
        }
        if gap <= options.tolerance {
            debug!("fixed-point iteration converged after {iterations} iterations (gap {gap:.3e})");
            return Ok((current, IterationSummary { iterations, gap }));
        }
        if iterations >= options.max_iterations {
            return Err(PicardError::DidNotConverge { iterations, gap });
        }
        std::mem::swap(&mut previous, &mut current);
        current = map.apply(&previous);
        iterations += 1;
    }
}

/// Computes the a priori bound from the first displacement, then runs the
/// a posteriori solve, pairing both counts in a [`ConvergenceEstimate`].
pub fn estimate_and_solve<M: ContractionMap>(
    map: &M,
    start: M::Point,
    options: &IterationOptions,
) -> Result<(M::Point, ConvergenceEstimate)> {
    let first = map.apply(&start);
    let initial_gap = map.distance(&start, &first);
    let a_priori = a_priori_iterations(initial_gap, map.factor(), options.tolerance)?;
    debug!("a priori iteration bound: {a_priori} (initial gap {initial_gap:.3e})");

    let (solution, summary) = solve_fixed_point(map, start, options)?;
    Ok((
        solution,
        ConvergenceEstimate {
            a_priori,
            a_posteriori: summary.iterations,
            gap: summary.gap,
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    /// Scalar affine contraction `x ↦ slope·x + intercept` with fixed point
    /// `intercept / (1 - slope)`.
    struct ScalarAffine {
        slope: f64,
        intercept: f64,
    }

    impl ContractionMap for ScalarAffine {
        type Point = f64;

        fn apply(&self, point: &f64) -> f64 {
            self.slope * point + self.intercept
        }

        fn distance(&self, a: &f64, b: &f64) -> f64 {
            (a - b).abs()
        }

        fn factor(&self) -> f64 {
            self.slope
        }
    }

    #[test]
    fn converges_to_known_fixed_point() {
        let map = ScalarAffine {
            slope: 0.5,
            intercept: 1.0,
        };
        let options = IterationOptions::default().with_tolerance(1e-10);
        let (value, summary) = solve_fixed_point(&map, 0.0, &options).unwrap();
        assert_relative_eq!(value, 2.0, epsilon = 1e-9);
        assert!(summary.gap <= 1e-10);
        assert!(summary.iterations >= 1);
    }

    #[test]
    fn iteration_is_deterministic() {
        let map = ScalarAffine {
            slope: 0.7,
            intercept: 3.0,
        };
        let options = IterationOptions::default().with_tolerance(1e-8);
        let (first, first_summary) = solve_fixed_point(&map, 0.0, &options).unwrap();
        let (second, second_summary) = solve_fixed_point(&map, 0.0, &options).unwrap();
        assert_eq!(first, second);
        assert_eq!(first_summary.iterations, second_summary.iterations);
    }

    #[test]
    fn iteration_cap_is_enforced() {
        let map = ScalarAffine {
            slope: 0.99,
            intercept: 1.0,
        };
        let options = IterationOptions::default()
            .with_tolerance(1e-12)
            .with_max_iterations(3);
        let result = solve_fixed_point(&map, 0.0, &options);
        assert!(matches!(
            result,
            Err(PicardError::DidNotConverge { iterations: 3, .. })
        ));
    }

    #[test]
    fn factor_outside_unit_interval_is_rejected() {
        for factor in [0.0, 1.0, 1.5, -0.2, f64::NAN] {
            let result = a_priori_iterations(1.0, factor, 1e-3);
            assert!(matches!(
                result,
                Err(PicardError::InvalidContractionFactor { .. })
            ));
        }
    }

    #[test]
    fn a_priori_estimate_is_clamped_at_zero() {
        // Tolerance so loose the bound would be negative.
        let bound = a_priori_iterations(1.0, 0.5, 10.0).unwrap();
        assert_eq!(bound, 0);
    }

    #[test]
    fn a_priori_estimate_requires_positive_displacement() {
        let result = a_priori_iterations(0.0, 0.5, 1e-3);
        assert!(matches!(result, Err(PicardError::ZeroInitialDisplacement)));
    }

    #[test]
    fn a_priori_bound_dominates_actual_iterations() {
        let map = ScalarAffine {
            slope: 0.5,
            intercept: 1.0,
        };
        let options = IterationOptions::default().with_tolerance(1e-6);
        let (value, estimate) = estimate_and_solve(&map, 0.0, &options).unwrap();
        assert_relative_eq!(value, 2.0, epsilon = 1e-5);
        assert!(estimate.a_priori >= estimate.a_posteriori);
    }

    #[test]
    fn random_scalar_contractions_converge() {
        let mut rng = SmallRng::seed_from_u64(1234);
        let options = IterationOptions::default()
            .with_tolerance(1e-9)
            .with_max_iterations(10_000);

        for _ in 0..50 {
            let slope: f64 = rng.gen_range(0.1..0.9);
            let intercept: f64 = rng.gen_range(-10.0..10.0);
            let map = ScalarAffine { slope, intercept };
            let expected = intercept / (1.0 - slope);

            let (value, summary) = solve_fixed_point(&map, 0.0, &options).unwrap();
            assert_relative_eq!(value, expected, epsilon = 1e-7);
            assert!(summary.iterations <= 10_000);
        }
    }
}
