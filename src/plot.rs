//! Curve sampling for the external plotting collaborator.
//!
//! The library does not open a plot window itself; it samples a function into
//! a serializable [`Curve`] and hands the JSON to whatever renders it.

use serde::Serialize;

use crate::error::{PicardError, Result};

/// A real-valued function sampled uniformly on an interval.
#[derive(Clone, Debug, Serialize)]
pub struct Curve {
    /// Sample abscissae.
    pub t: Vec<f64>,
    /// Function values at the corresponding abscissae.
    pub x: Vec<f64>,
}

impl Curve {
    /// Samples `f` at `points` uniformly spaced abscissae covering
    /// `[left, right]` inclusive. At least two points are required, and every
    /// sampled value must be finite.
    pub fn sample<F>(f: F, left: f64, right: f64, points: usize) -> Result<Self>
    where
        F: Fn(f64) -> f64,
    {
        if points < 2 {
            return Err(PicardError::dimension_mismatch("curve samples", 2, points));
        }
        if !left.is_finite() || !right.is_finite() || left >= right {
            return Err(PicardError::InvalidInterval { left, right });
        }

        let step = (right - left) / (points - 1) as f64;
        let mut t = Vec::with_capacity(points);
        let mut x = Vec::with_capacity(points);
        for i in 0..points {
            let t_i = left + step * i as f64;
            let x_i = f(t_i);
            if !x_i.is_finite() {
                return Err(PicardError::non_finite("curve sampling"));
            }
            t.push(t_i);
            x.push(x_i);
        }
        Ok(Self { t, x })
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.t.len()
    }

    /// Whether the curve holds no samples.
    pub fn is_empty(&self) -> bool {
        self.t.is_empty()
    }

    /// Renders the curve as a JSON object `{"t": [...], "x": [...]}`.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
