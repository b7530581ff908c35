use nalgebra::{DMatrix, DVector};
use picard::functional::{FunctionIterate, FunctionalContraction};
use picard::linear::{AffineContraction, LinearSystem};
use picard::plot::Curve;
use picard::solving::{estimate_and_solve, solve_fixed_point, IterationOptions};
use std::f64::consts::PI;

fn reference_system() -> LinearSystem {
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
    let x = DVector::from_vec(vec![10.0, 6.0, 20.0, 35.0]);
    LinearSystem::new(a, b, x).unwrap()
}

/// End-to-end run of the reference 4x4 system at both target precisions. The
/// stricter run must land closer to the known solution and take more
/// iterations, with the a priori bound dominating both actual counts.
#[test]
fn reference_system_meets_both_tolerances() {
    let system = reference_system();
    let contraction = AffineContraction::from_system(&system).unwrap();

    let coarse = IterationOptions::default().with_tolerance(1e-2);
    let (solution_coarse, estimate_coarse) =
        estimate_and_solve(&contraction, contraction.zero_start(), &coarse).unwrap();
    let error_coarse = system.final_error(&solution_coarse);
    assert!(error_coarse <= 1e-2, "coarse error {error_coarse} above eps");
    assert!(estimate_coarse.a_priori >= estimate_coarse.a_posteriori);

    let fine = IterationOptions::default().with_tolerance(1e-4);
    let (solution_fine, estimate_fine) =
        estimate_and_solve(&contraction, contraction.zero_start(), &fine).unwrap();
    let error_fine = system.final_error(&solution_fine);
    assert!(error_fine <= 1e-4, "fine error {error_fine} above eps");
    assert!(estimate_fine.a_priori >= estimate_fine.a_posteriori);

    assert!(estimate_fine.a_posteriori > estimate_coarse.a_posteriori);
    assert!(error_fine < error_coarse);
}

/// Rerunning the iteration from the same start must reproduce the exact same
/// iterate and count; there is no nondeterminism in the pipeline.
#[test]
fn reruns_are_bitwise_identical() {
    let system = reference_system();
    let contraction = AffineContraction::from_system(&system).unwrap();
    let options = IterationOptions::default().with_tolerance(1e-3);

    let (first, first_summary) =
        solve_fixed_point(&contraction, contraction.zero_start(), &options).unwrap();
    let (second, second_summary) =
        solve_fixed_point(&contraction, contraction.zero_start(), &options).unwrap();

    assert_eq!(first, second);
    assert_eq!(first_summary.iterations, second_summary.iterations);
    assert_eq!(first_summary.gap, second_summary.gap);
}

/// The a posteriori stopping metric must eventually fall below any positive
/// tolerance, so tighter tolerances can only demand more iterations.
#[test]
fn iteration_counts_grow_with_tighter_tolerances() {
    let system = reference_system();
    let contraction = AffineContraction::from_system(&system).unwrap();

    let mut previous_count = 0usize;
    for eps in [1e-1, 1e-2, 1e-3, 1e-4] {
        let options = IterationOptions::default().with_tolerance(eps);
        let (_, summary) =
            solve_fixed_point(&contraction, contraction.zero_start(), &options).unwrap();
        assert!(summary.iterations >= previous_count);
        assert!(summary.gap <= eps);
        previous_count = summary.iterations;
    }
}

/// The function-space operator from the reference problem converges under the
/// a posteriori test, and its solution samples into a clean curve.
#[test]
fn functional_operator_converges_and_samples() {
    let eps = 0.01;
    let operator = FunctionalContraction::new(
        |x, t| (3.0 * t).sin() + (t + 1.0) * (x / 6.0).cos(),
        -PI,
        PI,
        (PI + 1.0) / 6.0,
        eps,
    )
    .unwrap();

    let options = IterationOptions::default().with_tolerance(eps);
    let (solution, estimate) =
        estimate_and_solve(&operator, FunctionIterate::start(), &options).unwrap();

    assert!(estimate.gap <= eps);
    assert!(estimate.a_priori >= estimate.a_posteriori);
    assert_eq!(solution.steps(), estimate.a_posteriori);

    let curve = Curve::sample(
        operator.as_function(solution),
        operator.left(),
        operator.right(),
        100,
    )
    .unwrap();
    assert_eq!(curve.len(), 100);
    // The operator's range is bounded by 1 + (pi + 1) in absolute value.
    assert!(curve.x.iter().all(|value| value.abs() <= 1.0 + (PI + 1.0)));

    let json = curve.to_json().unwrap();
    assert!(json.starts_with('{'));
}
