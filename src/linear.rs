//! Vector-level pipeline: normalizing a linear system `A x = b` into the
//! affine fixed-point form `x = C x + d` and exposing it as a contraction map.

use log::debug;
use nalgebra::linalg::SymmetricEigen;
use nalgebra::{DMatrix, DVector};

use crate::error::{PicardError, Result};
use crate::solving::ContractionMap;

/// A square linear system together with its known reference solution.
///
/// The reference solution is carried only for final-error reporting; the
/// solver never looks at it. Immutable once constructed.
#[derive(Clone, Debug)]
pub struct LinearSystem {
    coefficients: DMatrix<f64>,
    rhs: DVector<f64>,
    solution: DVector<f64>,
}

impl LinearSystem {
    /// Validates shapes and constructs a system `A x = b` with reference
    /// solution `x`.
    pub fn new(
        coefficients: DMatrix<f64>,
        rhs: DVector<f64>,
        solution: DVector<f64>,
    ) -> Result<Self> {
        let n = coefficients.nrows();
        if coefficients.ncols() != n {
            return Err(PicardError::dimension_mismatch(
                "coefficient matrix columns",
                n,
                coefficients.ncols(),
            ));
        }
        if n == 0 {
            return Err(PicardError::dimension_mismatch(
                "coefficient matrix rows",
                1,
                0,
            ));
        }
        if rhs.len() != n {
            return Err(PicardError::dimension_mismatch("rhs length", n, rhs.len()));
        }
        if solution.len() != n {
            return Err(PicardError::dimension_mismatch(
                "solution length",
                n,
                solution.len(),
            ));
        }
        Ok(Self {
            coefficients,
            rhs,
            solution,
        })
    }

    /// Number of unknowns.
    pub fn dimension(&self) -> usize {
        self.rhs.len()
    }

    /// Returns a read-only view of the coefficient matrix `A`.
    pub fn coefficients(&self) -> &DMatrix<f64> {
        &self.coefficients
    }

    /// Returns a read-only view of the right-hand side `b`.
    pub fn rhs(&self) -> &DVector<f64> {
        &self.rhs
    }

    /// Returns a read-only view of the known reference solution.
    pub fn solution(&self) -> &DVector<f64> {
        &self.solution
    }

    /// Euclidean distance between the reference solution and an iterate.
    pub fn final_error(&self, iterate: &DVector<f64>) -> f64 {
        (&self.solution - iterate).norm()
    }
}

/// The normalized affine map `x ↦ C x + d` derived from a [`LinearSystem`],
/// with `C = I - AᵀA/λ_max` and `d = Aᵀb/λ_max`.
///
/// Keeps the full derivation trace (Gram matrix, moment vector, both eigenvalue
/// sets) so reports can show how `C`, `d`, and `alpha` were obtained.
#[derive(Clone, Debug)]
pub struct AffineContraction {
    map: DMatrix<f64>,
    shift: DVector<f64>,
    factor: f64,
    gram: DMatrix<f64>,
    moment: DVector<f64>,
    gram_eigenvalues: DVector<f64>,
    map_eigenvalues: DVector<f64>,
    lambda_max: f64,
}

impl AffineContraction {
    /// Derives the normalized map from a linear system.
    ///
    /// Both `AᵀA` and `C` are symmetric, so their spectra come from
    /// [`SymmetricEigen`]. Fails if the largest Gram eigenvalue is not
    /// strictly positive or if the resulting factor leaves (0, 1), in which
    /// case the instance is not a contraction and iteration would diverge.
    pub fn from_system(system: &LinearSystem) -> Result<Self> {
        let a = system.coefficients();
        let gram = a.transpose() * a;
        let moment = a.transpose() * system.rhs();

        let gram_eigen = SymmetricEigen::new(gram.clone());
        let lambda_max = gram_eigen.eigenvalues.max();
        if !lambda_max.is_finite() || lambda_max <= 0.0 {
            return Err(PicardError::DegenerateGram { value: lambda_max });
        }

        let n = system.dimension();
        let map = DMatrix::<f64>::identity(n, n) - &gram / lambda_max;
        let shift = &moment / lambda_max;

        let map_eigen = SymmetricEigen::new(map.clone());
        let factor = map_eigen.eigenvalues.max();
        if !factor.is_finite() || factor <= 0.0 || factor >= 1.0 {
            return Err(PicardError::InvalidContractionFactor { factor });
        }
        debug!("derived affine contraction: lambda_max {lambda_max:.6}, alpha {factor:.6}");

        Ok(Self {
            map,
            shift,
            factor,
            gram,
            moment,
            gram_eigenvalues: gram_eigen.eigenvalues,
            map_eigenvalues: map_eigen.eigenvalues,
            lambda_max,
        })
    }

    /// Returns a read-only view of the iteration matrix `C`.
    pub fn map(&self) -> &DMatrix<f64> {
        &self.map
    }

    /// Returns a read-only view of the shift vector `d`.
    pub fn shift(&self) -> &DVector<f64> {
        &self.shift
    }

    /// Returns a read-only view of the Gram matrix `AᵀA`.
    pub fn gram(&self) -> &DMatrix<f64> {
        &self.gram
    }

    /// Returns a read-only view of the moment vector `Aᵀb`.
    pub fn moment(&self) -> &DVector<f64> {
        &self.moment
    }

    /// Eigenvalues of the Gram matrix `AᵀA`.
    pub fn gram_eigenvalues(&self) -> &DVector<f64> {
        &self.gram_eigenvalues
    }

    /// Eigenvalues of the iteration matrix `C`.
    pub fn map_eigenvalues(&self) -> &DVector<f64> {
        &self.map_eigenvalues
    }

    /// The largest Gram eigenvalue `λ_max` used for normalization.
    pub fn lambda_max(&self) -> f64 {
        self.lambda_max
    }

    /// The all-zeros starting vector the iteration conventionally uses.
    pub fn zero_start(&self) -> DVector<f64> {
        DVector::zeros(self.shift.len())
    }
}

impl ContractionMap for AffineContraction {
    type Point = DVector<f64>;

    fn apply(&self, point: &DVector<f64>) -> DVector<f64> {
        &self.map * point + &self.shift
    }

    fn distance(&self, a: &DVector<f64>, b: &DVector<f64>) -> f64 {
        (a - b).norm()
    }

    fn factor(&self) -> f64 {
        self.factor
    }
}
