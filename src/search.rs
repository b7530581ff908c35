//! Interval maximization by ternary search, used to approximate the sup-norm
//! distance between continuous functions.

/// Approximates `max f(t)` over `[left, right]` for a unimodal `f`.
///
/// The interval is narrowed at the two interior ternary points until its width
/// is at most `tolerance`, then `f` is evaluated at the midpoint. Terminates in
/// `O(log((right - left) / tolerance))` evaluations. If `f` is not unimodal the
/// result is some local maximum, not necessarily the global one.
pub fn maximum_on<F>(f: F, mut left: f64, mut right: f64, tolerance: f64) -> f64
where
    F: Fn(f64) -> f64,
{
    while right - left > tolerance {
        let a = (2.0 * left + right) / 3.0;
        let b = (left + 2.0 * right) / 3.0;
        if f(a) > f(b) {
            right = b;
        } else {
            left = a;
        }
    }
    f(0.5 * (left + right))
}

/// Sup-norm distance `max |x(t) - y(t)|` over `[left, right]`, approximated to
/// within `tolerance` under the inherited unimodality assumption on the
/// pointwise difference.
pub fn function_distance<X, Y>(x: X, y: Y, left: f64, right: f64, tolerance: f64) -> f64
where
    X: Fn(f64) -> f64,
    Y: Fn(f64) -> f64,
{
    maximum_on(|t| (x(t) - y(t)).abs(), left, right, tolerance)
}
