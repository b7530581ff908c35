// Fixed point of the operator x(t) -> sin(3t) + (t + 1)cos(x(t)/6) on [-pi, pi].
// Prints both iteration estimates, then the approximate solution sampled at
// 100 uniform points as JSON: {"t":[...], "x":[...]}, for an external plotter.

use std::f64::consts::PI;

use picard::functional::{FunctionIterate, FunctionalContraction};
use picard::plot::Curve;
use picard::solving::{estimate_and_solve, IterationOptions};
use picard::Result;

fn main() -> Result<()> {
    let eps = 0.01;
    // Contraction factor of the operator, derived analytically:
    // sup |d/dx [sin(3t) + (t + 1)cos(x/6)]| <= (pi + 1)/6 on [-pi, pi].
    let alpha = (PI + 1.0) / 6.0;

    let operator = FunctionalContraction::new(
        |x, t| (3.0 * t).sin() + (t + 1.0) * (x / 6.0).cos(),
        -PI,
        PI,
        alpha,
        eps,
    )?;

    let options = IterationOptions::default().with_tolerance(eps);
    let (solution, estimate) =
        estimate_and_solve(&operator, FunctionIterate::start(), &options)?;

    println!("a priori iteration bound: {}", estimate.a_priori);
    println!("iterations actually needed: {}", estimate.a_posteriori);

    let curve = Curve::sample(
        operator.as_function(solution),
        operator.left(),
        operator.right(),
        100,
    )?;
    println!("{}", curve.to_json()?);
    Ok(())
}
