// Solves a 4x4 linear system by successive approximations and reports the
// derivation trace, both iteration estimates, and the final error against the
// known reference solution, at two target precisions.

use nalgebra::{DMatrix, DVector};
use picard::linear::{AffineContraction, LinearSystem};
use picard::solving::{estimate_and_solve, ContractionMap, IterationOptions};
use picard::Result;

fn report(system: &LinearSystem, contraction: &AffineContraction, eps: f64) -> Result<()> {
    let options = IterationOptions::default().with_tolerance(eps);
    let (solution, estimate) =
        estimate_and_solve(contraction, contraction.zero_start(), &options)?;
    let error = system.final_error(&solution);

    println!("Approximating the solution to precision eps = {eps}:");
    println!("  a priori iteration bound: {}", estimate.a_priori);
    println!("  iterations actually needed: {}", estimate.a_posteriori);
    println!("  computed iterate x_n: {}", solution.transpose());
    println!("  distance to the reference solution: {error:e}");
    println!(
        "  within eps: {}",
        if error <= eps { "yes" } else { "no" }
    );
    println!();
    Ok(())
}

fn main() -> Result<()> {
    let a = DMatrix::from_row_slice(
        4,
        4,
        &[
            8.0, 2.0, -3.0, 2.0, //
            -6.0, 3.0, -2.0, 1.0, //
            3.0, 8.0, 4.0, -8.0, //
            2.0, 1.0, -6.0, 2.0,
        ],
    );
    let b = DVector::from_vec(vec![102.0, -47.0, -122.0, -24.0]);
    // Reference solution of the system, for final-error reporting.
    let x = DVector::from_vec(vec![10.0, 6.0, 20.0, 35.0]);

    let system = LinearSystem::new(a, b, x)?;
    let contraction = AffineContraction::from_system(&system)?;

    println!("Matrix A: {}", system.coefficients());
    println!("Right-hand side b: {}", system.rhs().transpose());
    println!("Gram matrix A^T A: {}", contraction.gram());
    println!("Moment vector A^T b: {}", contraction.moment().transpose());
    println!(
        "Eigenvalues of A^T A: {}",
        contraction.gram_eigenvalues().transpose()
    );
    println!("Largest of them (lambda_max): {}", contraction.lambda_max());
    println!();
    println!(
        "Iteration matrix C = I - A^T A / lambda_max: {}",
        contraction.map()
    );
    println!(
        "Shift vector d = A^T b / lambda_max: {}",
        contraction.shift().transpose()
    );
    println!(
        "Eigenvalues of C: {}",
        contraction.map_eigenvalues().transpose()
    );
    println!(
        "Largest of them, the contraction factor alpha: {}",
        contraction.factor()
    );
    println!();
    println!("Reference solution: {}", system.solution().transpose());
    println!();

    report(&system, &contraction, 1e-2)?;
    report(&system, &contraction, 1e-4)?;
    Ok(())
}
