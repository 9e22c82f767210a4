use alloc::vec;
use alloc::vec::Vec;

use crate::linalg::LinalgError;
use crate::traits::{FloatScalar, Scalar};

use super::DynMatrix;

// ── Vector helpers ──────────────────────────────────────────────────

/// Dot product of two equal-length slices.
///
/// ```
/// use gpcore::dynmatrix::dot;
/// assert_eq!(dot(&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]).unwrap(), 32.0);
/// assert!(dot(&[1.0], &[1.0, 2.0]).is_err());
/// ```
pub fn dot<T: Scalar>(a: &[T], b: &[T]) -> Result<T, LinalgError> {
    if a.len() != b.len() {
        return Err(LinalgError::DimensionMismatch {
            expected: (a.len(), 1),
            got: (b.len(), 1),
        });
    }
    Ok(a
        .iter()
        .zip(b.iter())
        .fold(T::zero(), |acc, (&x, &y)| acc + x * y))
}

/// `n` evenly spaced points on `[start, end]`, both ends included.
///
/// `n == 1` yields `[start]`; `n == 0` yields an empty vector.
///
/// ```
/// use gpcore::dynmatrix::linspace;
/// let g = linspace(-1.0_f64, 1.0, 5);
/// assert_eq!(g, vec![-1.0, -0.5, 0.0, 0.5, 1.0]);
/// ```
pub fn linspace<T: FloatScalar>(start: T, end: T, n: usize) -> Vec<T> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / T::lit((n - 1) as f64);
            (0..n)
                .map(|i| {
                    if i == n - 1 {
                        end
                    } else {
                        start + step * T::lit(i as f64)
                    }
                })
                .collect()
        }
    }
}

// ── Products, sums, transpose ───────────────────────────────────────

impl<T: Scalar> DynMatrix<T> {
    /// Matrix-vector product `M·v`.
    ///
    /// ```
    /// use gpcore::DynMatrix;
    /// let m = DynMatrix::from_row_slice(2, 2, &[1.0, 2.0, 3.0, 4.0]);
    /// assert_eq!(m.mul_vec(&[1.0, 1.0]).unwrap(), vec![3.0, 7.0]);
    /// ```
    pub fn mul_vec(&self, v: &[T]) -> Result<Vec<T>, LinalgError> {
        if v.len() != self.ncols {
            return Err(LinalgError::DimensionMismatch {
                expected: (self.ncols, 1),
                got: (v.len(), 1),
            });
        }
        Ok(self
            .rows()
            .map(|row| {
                row.iter()
                    .zip(v.iter())
                    .fold(T::zero(), |acc, (&a, &b)| acc + a * b)
            })
            .collect())
    }

    /// Matrix product `(M×N)·(N×P) → (M×P)`.
    pub fn matmul(&self, rhs: &DynMatrix<T>) -> Result<DynMatrix<T>, LinalgError> {
        if self.ncols != rhs.nrows {
            return Err(LinalgError::DimensionMismatch {
                expected: (self.ncols, rhs.ncols),
                got: (rhs.nrows, rhs.ncols),
            });
        }
        let m = self.nrows;
        let n = self.ncols;
        let p = rhs.ncols;
        let mut data = vec![T::zero(); m * p];
        for i in 0..m {
            for k in 0..n {
                let a_ik = self.data[i * n + k];
                for j in 0..p {
                    data[i * p + j] = data[i * p + j] + a_ik * rhs.data[k * p + j];
                }
            }
        }
        Ok(DynMatrix {
            data,
            nrows: m,
            ncols: p,
        })
    }

    /// Element-wise sum. Shapes must match exactly.
    pub fn add_mat(&self, rhs: &DynMatrix<T>) -> Result<DynMatrix<T>, LinalgError> {
        if self.shape() != rhs.shape() {
            return Err(LinalgError::DimensionMismatch {
                expected: self.shape(),
                got: rhs.shape(),
            });
        }
        let data = self
            .data
            .iter()
            .zip(rhs.data.iter())
            .map(|(&a, &b)| a + b)
            .collect();
        Ok(DynMatrix {
            data,
            nrows: self.nrows,
            ncols: self.ncols,
        })
    }

    /// Multiply every element by `s`.
    pub fn scale(&self, s: T) -> DynMatrix<T> {
        DynMatrix {
            data: self.data.iter().map(|&a| a * s).collect(),
            nrows: self.nrows,
            ncols: self.ncols,
        }
    }

    /// Transpose: (M×N) → (N×M).
    ///
    /// ```
    /// use gpcore::DynMatrix;
    /// let a = DynMatrix::from_row_slice(2, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    /// let t = a.transpose();
    /// assert_eq!(t.shape(), (3, 2));
    /// assert_eq!(t[(2, 1)], 6.0);
    /// ```
    pub fn transpose(&self) -> DynMatrix<T> {
        let n = self.ncols;
        DynMatrix::from_fn(self.ncols, self.nrows, |i, j| self.data[j * n + i])
    }

    /// Add `value` to every diagonal entry in place (jitter, noise).
    pub fn add_to_diagonal(&mut self, value: T) {
        let n = self.nrows.min(self.ncols);
        for i in 0..n {
            self[(i, i)] = self[(i, i)] + value;
        }
    }

    /// Main diagonal.
    pub fn diagonal(&self) -> Vec<T> {
        (0..self.nrows.min(self.ncols)).map(|i| self[(i, i)]).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mul_vec_basic() {
        let m = DynMatrix::from_row_slice(2, 3, &[1.0, 0.0, 2.0, -1.0, 3.0, 1.0]);
        let r = m.mul_vec(&[3.0, 2.0, 1.0]).unwrap();
        assert_eq!(r, vec![5.0, 4.0]);
    }

    #[test]
    fn mul_vec_mismatch() {
        let m = DynMatrix::from_row_slice(2, 3, &[1.0; 6]);
        assert_eq!(
            m.mul_vec(&[1.0, 2.0]).unwrap_err(),
            LinalgError::DimensionMismatch {
                expected: (3, 1),
                got: (2, 1)
            }
        );
    }

    #[test]
    fn matmul_rect() {
        let a = DynMatrix::from_row_slice(2, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        let b = DynMatrix::from_row_slice(3, 2, &[7.0, 8.0, 9.0, 10.0, 11.0, 12.0]);
        let c = a.matmul(&b).unwrap();
        assert_eq!(c.shape(), (2, 2));
        assert_eq!(c[(0, 0)], 58.0);
        assert_eq!(c[(0, 1)], 64.0);
        assert_eq!(c[(1, 0)], 139.0);
        assert_eq!(c[(1, 1)], 154.0);
    }

    #[test]
    fn matmul_identity() {
        let a = DynMatrix::from_row_slice(2, 2, &[1.0, 2.0, 3.0, 4.0]);
        let id = DynMatrix::eye(2);
        assert_eq!(a.matmul(&id).unwrap(), a);
        assert_eq!(id.matmul(&a).unwrap(), a);
    }

    #[test]
    fn matmul_mismatch() {
        let a = DynMatrix::<f64>::zeros(2, 3);
        let b = DynMatrix::<f64>::zeros(2, 3);
        assert!(matches!(
            a.matmul(&b),
            Err(LinalgError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn add_mat_basic() {
        let a = DynMatrix::from_row_slice(2, 2, &[1.0, 2.0, 3.0, 4.0]);
        let b = DynMatrix::from_row_slice(2, 2, &[5.0, 6.0, 7.0, 8.0]);
        let c = a.add_mat(&b).unwrap();
        assert_eq!(c.as_slice(), &[6.0, 8.0, 10.0, 12.0]);
    }

    #[test]
    fn add_mat_mismatch() {
        let a = DynMatrix::<f64>::zeros(2, 2);
        let b = DynMatrix::<f64>::zeros(2, 3);
        assert_eq!(
            a.add_mat(&b).unwrap_err(),
            LinalgError::DimensionMismatch {
                expected: (2, 2),
                got: (2, 3)
            }
        );
    }

    #[test]
    fn transpose_twice() {
        let a = DynMatrix::from_row_slice(2, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        assert_eq!(a.transpose().transpose(), a);
        assert_eq!(a.transpose()[(0, 1)], 4.0);
    }

    #[test]
    fn diagonal_ops() {
        let mut a = DynMatrix::from_row_slice(2, 2, &[1.0, 2.0, 3.0, 4.0]);
        a.add_to_diagonal(0.5);
        assert_eq!(a.diagonal(), vec![1.5, 4.5]);
        assert_eq!(a[(0, 1)], 2.0);
    }

    #[test]
    fn scale() {
        let a = DynMatrix::from_row_slice(1, 3, &[1.0, -2.0, 3.0]);
        assert_eq!(a.scale(2.0).as_slice(), &[2.0, -4.0, 6.0]);
    }

    #[test]
    fn linspace_edges() {
        assert!(linspace(0.0_f64, 1.0, 0).is_empty());
        assert_eq!(linspace(2.0_f64, 5.0, 1), vec![2.0]);
        let g = linspace(0.0_f64, 1.0, 11);
        assert_eq!(g.len(), 11);
        assert_eq!(g[10], 1.0);
        assert!((g[3] - 0.3).abs() < 1e-15);
    }

    #[test]
    fn dot_basic() {
        assert_eq!(dot(&[1.0, -1.0], &[2.0, 2.0]).unwrap(), 0.0);
        assert_eq!(dot::<f64>(&[], &[]).unwrap(), 0.0);
    }
}
