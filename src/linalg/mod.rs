//! Dense linear algebra for small symmetric systems.
//!
//! Everything here is sized for covariance matrices of at most a few hundred
//! rows: no pivoting, no blocking, no sparse storage.
//!
//! - [`cholesky`]: Cholesky–Banachiewicz factorization `A = L·Lᵀ` with a
//!   clamped pivot floor, so it always produces a factor.
//! - [`solve_lower_triangular`] / [`solve_upper_triangular`]: forward and
//!   back substitution.
//! - [`Cholesky`]: owns a factor and offers `solve` and `ln_det`.
//! - [`invert_2x2`]: closed-form 2×2 inverse with a large-diagonal fallback
//!   for singular input.

pub(crate) mod cholesky;
mod small;

pub use cholesky::{cholesky, solve_lower_triangular, solve_upper_triangular, Cholesky, PIVOT_FLOOR};
pub use small::{invert_2x2, DEGENERATE_DIAGONAL, SINGULAR_DET};

/// Errors from linear algebra operations.
///
/// ```
/// use gpcore::DynMatrix;
/// use gpcore::linalg::LinalgError;
///
/// let a = DynMatrix::<f64>::zeros(2, 3);
/// let b = DynMatrix::<f64>::zeros(2, 3);
/// assert!(matches!(a.matmul(&b), Err(LinalgError::DimensionMismatch { .. })));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinalgError {
    /// Operand shapes are incompatible. Shapes are `(rows, cols)`.
    DimensionMismatch {
        expected: (usize, usize),
        got: (usize, usize),
    },
    /// A triangular solve hit a zero pivot or produced a non-finite value.
    NumericalDegeneracy,
}

impl core::fmt::Display for LinalgError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            LinalgError::DimensionMismatch { expected, got } => write!(
                f,
                "dimension mismatch: expected {}x{}, got {}x{}",
                expected.0, expected.1, got.0, got.1
            ),
            LinalgError::NumericalDegeneracy => {
                write!(f, "numerically degenerate matrix (zero or non-finite pivot)")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for LinalgError {}
