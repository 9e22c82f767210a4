use alloc::vec;
use alloc::vec::Vec;

use crate::dynmatrix::DynMatrix;
use crate::linalg::LinalgError;
use crate::traits::{FloatScalar, MatrixRef};

/// Smallest value allowed under a Cholesky square root.
///
/// Pre-sqrt quantities below this (including NaN from a badly broken input)
/// are replaced by it, so the factorization always completes.
pub const PIVOT_FLOOR: f64 = 1e-10;

fn require_square<T>(a: &impl MatrixRef<T>) -> Result<usize, LinalgError> {
    let (m, n) = (a.nrows(), a.ncols());
    if m != n {
        return Err(LinalgError::DimensionMismatch {
            expected: (m, m),
            got: (m, n),
        });
    }
    Ok(n)
}

/// Cholesky–Banachiewicz factorization `A = L·Lᵀ`, row by row.
///
/// Only the lower triangle of `a` is read; symmetry is the caller's
/// contract. Each diagonal pivot `A[i][i] − Σ L[i][k]²` is clamped to
/// [`PIVOT_FLOOR`] before the square root, so this never fails for
/// numerical reasons. The factor of a matrix far from positive semidefinite
/// is therefore well-formed but meaningless.
///
/// Fails only with [`LinalgError::DimensionMismatch`] for non-square input.
///
/// ```
/// use gpcore::DynMatrix;
/// use gpcore::linalg::cholesky;
///
/// let a = DynMatrix::from_row_slice(2, 2, &[4.0_f64, 2.0, 2.0, 3.0]);
/// let l = cholesky(&a).unwrap();
/// let llt = l.matmul(&l.transpose()).unwrap();
/// assert!((llt[(1, 1)] - 3.0).abs() < 1e-12);
/// assert_eq!(l[(0, 1)], 0.0);
/// ```
pub fn cholesky<T: FloatScalar>(a: &impl MatrixRef<T>) -> Result<DynMatrix<T>, LinalgError> {
    let n = require_square(a)?;
    let floor = T::lit(PIVOT_FLOOR);
    let mut l = DynMatrix::zeros(n, n);

    for i in 0..n {
        for j in 0..=i {
            let mut sum = T::zero();
            for k in 0..j {
                sum = sum + l[(i, k)] * l[(j, k)];
            }

            if i == j {
                let mut d = *a.get(i, i) - sum;
                if d.is_nan() || d < floor {
                    log::trace!(
                        "cholesky: clamped pivot {} at row {} to {}",
                        d.to_f64_lossy(),
                        i,
                        PIVOT_FLOOR
                    );
                    d = floor;
                }
                l[(i, i)] = d.sqrt();
            } else {
                l[(i, j)] = (*a.get(i, j) - sum) / l[(j, j)];
            }
        }
    }

    Ok(l)
}

/// Solve `L·x = b` by forward substitution, `L` lower triangular.
///
/// Entries above the diagonal are ignored.
///
/// ```
/// use gpcore::DynMatrix;
/// use gpcore::linalg::solve_lower_triangular;
///
/// let l = DynMatrix::from_row_slice(2, 2, &[2.0_f64, 0.0, 1.0, 4.0]);
/// let x = solve_lower_triangular(&l, &[2.0, 9.0]).unwrap();
/// assert_eq!(x, vec![1.0, 2.0]);
/// ```
pub fn solve_lower_triangular<T: FloatScalar>(
    l: &impl MatrixRef<T>,
    b: &[T],
) -> Result<Vec<T>, LinalgError> {
    let n = require_square(l)?;
    check_rhs(n, b)?;

    let mut x = vec![T::zero(); n];
    for i in 0..n {
        let mut sum = b[i];
        for j in 0..i {
            sum = sum - *l.get(i, j) * x[j];
        }
        x[i] = divide_pivot(sum, *l.get(i, i))?;
    }
    Ok(x)
}

/// Solve `U·x = b` by back substitution, `U` upper triangular.
///
/// Used with the transpose of a Cholesky factor to complete `A·x = b`
/// through `L·Lᵀ·x = b`. Entries below the diagonal are ignored.
pub fn solve_upper_triangular<T: FloatScalar>(
    u: &impl MatrixRef<T>,
    b: &[T],
) -> Result<Vec<T>, LinalgError> {
    let n = require_square(u)?;
    check_rhs(n, b)?;

    let mut x = vec![T::zero(); n];
    for i in (0..n).rev() {
        let mut sum = b[i];
        for j in (i + 1)..n {
            sum = sum - *u.get(i, j) * x[j];
        }
        x[i] = divide_pivot(sum, *u.get(i, i))?;
    }
    Ok(x)
}

fn check_rhs<T>(n: usize, b: &[T]) -> Result<(), LinalgError> {
    if b.len() != n {
        return Err(LinalgError::DimensionMismatch {
            expected: (n, 1),
            got: (b.len(), 1),
        });
    }
    Ok(())
}

#[inline]
fn divide_pivot<T: FloatScalar>(num: T, pivot: T) -> Result<T, LinalgError> {
    if pivot == T::zero() {
        return Err(LinalgError::NumericalDegeneracy);
    }
    let x = num / pivot;
    if !x.is_finite() {
        return Err(LinalgError::NumericalDegeneracy);
    }
    Ok(x)
}

// ---------------------------------------------------------------------------
// Cholesky wrapper
// ---------------------------------------------------------------------------

/// Cholesky factor of a symmetric positive (semi)definite matrix.
///
/// # Example
///
/// ```
/// use gpcore::DynMatrix;
/// use gpcore::linalg::Cholesky;
///
/// let a = DynMatrix::from_row_slice(2, 2, &[4.0_f64, 2.0, 2.0, 3.0]);
/// let chol = Cholesky::new(&a).unwrap();
///
/// let x = chol.solve(&[8.0, 7.0]).unwrap(); // solve Ax = b
/// assert!((x[0] - 1.25).abs() < 1e-12);
/// assert!((x[1] - 1.5).abs() < 1e-12);
/// assert!((chol.ln_det() - 8.0_f64.ln()).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct Cholesky<T> {
    l: DynMatrix<T>,
}

impl<T: FloatScalar> Cholesky<T> {
    /// Factor `a` (see [`cholesky`] for the clamping rule).
    pub fn new(a: &impl MatrixRef<T>) -> Result<Self, LinalgError> {
        Ok(Self { l: cholesky(a)? })
    }

    /// Consume and return `L`.
    pub fn into_l(self) -> DynMatrix<T> {
        self.l
    }

    /// Dimension of the factored matrix.
    #[inline]
    pub fn dim(&self) -> usize {
        self.l.nrows()
    }

    /// Solve `L·y = b`.
    pub fn solve_lower(&self, b: &[T]) -> Result<Vec<T>, LinalgError> {
        solve_lower_triangular(&self.l, b)
    }

    /// Solve `A·x = b` as `Lᵀ·x = L⁻¹·b`.
    pub fn solve(&self, b: &[T]) -> Result<Vec<T>, LinalgError> {
        let y = self.solve_lower(b)?;
        solve_upper_triangular(&self.l.transpose(), &y)
    }

    /// `ln det(A) = 2·Σ ln L[i][i]`.
    pub fn ln_det(&self) -> T {
        let two = T::one() + T::one();
        self.l.diagonal().into_iter().fold(T::zero(), |s, d| s + d.ln()) * two
    }
}
