use thiserror::Error;

/// Unified error type for `picard` operations.
#[derive(Debug, Error)]
pub enum PicardError {
    /// Raised when provided vectors or matrices have incompatible dimensions.
    #[error("dimension mismatch in {context}: expected {expected} but found {found}")]
    DimensionMismatch {
        /// Human-readable context describing the operation.
        context: &'static str,
        /// The required dimension, often implied by the coefficient matrix.
        expected: usize,
        /// The dimension that was actually supplied.
        found: usize,
    },

    /// Raised when a contraction factor falls outside the open interval (0, 1).
    #[error("contraction factor must lie strictly in (0, 1), found {factor}")]
    InvalidContractionFactor { factor: f64 },

    /// Raised when the first iterate coincides with the starting point, leaving
    /// the a priori logarithm undefined.
    #[error("initial displacement is zero; the a priori iteration estimate is undefined")]
    ZeroInitialDisplacement,

    /// Raised when the a posteriori stopping test is still failing at the
    /// iteration cap.
    #[error(
        "fixed-point iteration did not converge after {iterations} iterations; last gap {gap}"
    )]
    DidNotConverge {
        /// Number of iterations performed before termination.
        iterations: usize,
        /// A posteriori gap observed in the last iteration.
        gap: f64,
    },

    /// Raised when the largest eigenvalue of the Gram matrix is not strictly
    /// positive, so the normalized map cannot be formed.
    #[error("largest Gram eigenvalue must be strictly positive, found {value}")]
    DegenerateGram { value: f64 },

    /// Raised when a function-space interval is empty or reversed.
    #[error("interval [{left}, {right}] must satisfy left < right")]
    InvalidInterval { left: f64, right: f64 },

    /// Raised when numerical routines produce NaN or infinity.
    #[error("encountered a non-finite value during {context}")]
    NumericalError { context: &'static str },

    /// Raised when a sampled curve cannot be rendered for the plotting collaborator.
    #[error("failed to serialize curve: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl PicardError {
    /// Helper to format a [`DimensionMismatch`](PicardError::DimensionMismatch) error.
    pub fn dimension_mismatch(context: &'static str, expected: usize, found: usize) -> Self {
        Self::DimensionMismatch {
            context,
            expected,
            found,
        }
    }

    /// Helper to raise when an intermediate computation produced NaN or infinity.
    pub fn non_finite(context: &'static str) -> Self {
        Self::NumericalError { context }
    }
}

/// Type alias for results returned by this crate.
pub type Result<T> = std::result::Result<T, PicardError>;
