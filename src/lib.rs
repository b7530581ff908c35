//! Successive-approximation solvers for contraction mappings.
//!
//! This crate implements the contraction-mapping (fixed-point iteration)
//! method at two levels that share a single iteration core:
//!
//! - solve a linear system `A x = b` by normalizing it into the affine
//!   fixed-point form `x = C x + d` (`linear` module),
//! - find the fixed point of a scalar functional operator
//!   `x(t) ↦ f(x(t), t)` over continuous functions on an interval
//!   (`functional` module).
//!
//! The shared core (`solving` module) drives the iteration `x_{n+1} = Φ(x_n)`
//! for anything implementing [`ContractionMap`], retaining only the two most
//! recent iterates. It pairs the closed-form a priori iteration bound from
//! contraction theory with the a posteriori successive-difference stopping
//! test, which is the one that actually terminates the loop. Sup-norm
//! distances between function iterates are approximated by ternary search
//! (`search` module), and solution curves can be sampled into JSON for an
//! external plotter (`plot` module).
//!
//! # Quick start
//!
//! ```no_run
//! use nalgebra::{DMatrix, DVector};
//! use picard::linear::{AffineContraction, LinearSystem};
//! use picard::solving::{estimate_and_solve, IterationOptions};
//!
//! let a = DMatrix::from_row_slice(2, 2, &[4.0, 1.0, 1.0, 3.0]);
//! let b = DVector::from_vec(vec![1.0, 2.0]);
//! let reference = DVector::from_vec(vec![1.0 / 11.0, 7.0 / 11.0]);
//!
//! let system = LinearSystem::new(a, b, reference).expect("validated system");
//! let contraction = AffineContraction::from_system(&system).expect("contraction");
//!
//! let options = IterationOptions::default().with_tolerance(1e-6);
//! let (solution, estimate) =
//!     estimate_and_solve(&contraction, contraction.zero_start(), &options).expect("converged");
//!
//! println!(
//!     "converged after {} iterations (a priori bound {})",
//!     estimate.a_posteriori, estimate.a_priori
//! );
//! println!("distance to reference solution: {}", system.final_error(&solution));
//! ```
//!
//! Convergence requires the contraction factor `alpha` to lie strictly in
//! (0, 1); constructors and estimators reject anything else rather than
//! looping forever on a map that is not actually a contraction.

pub mod error;
pub mod functional;
pub mod linear;
pub mod plot;
pub mod search;
pub mod solving;

pub use error::{PicardError, Result};
pub use functional::{FunctionIterate, FunctionalContraction};
pub use linear::{AffineContraction, LinearSystem};
pub use plot::Curve;
pub use solving::{
    a_priori_iterations, estimate_and_solve, solve_fixed_point, ContractionMap,
    ConvergenceEstimate, IterationOptions, IterationSummary,
};
