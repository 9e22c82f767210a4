use crate::dynmatrix::DynMatrix;
use crate::linalg::LinalgError;
use crate::traits::FloatScalar;

/// Determinant magnitude below which [`invert_2x2`] treats its input as singular.
pub const SINGULAR_DET: f64 = 1e-10;

/// Diagonal value returned by [`invert_2x2`] for singular input.
pub const DEGENERATE_DIAGONAL: f64 = 1e10;

/// Closed-form inverse of a 2×2 matrix.
///
/// If `|det| < 1e-10` the result is `diag(1e10, 1e10)` rather than an
/// error: callers read it as "effectively infinite variance" and must
/// tolerate this convention.
///
/// Fails with [`LinalgError::DimensionMismatch`] for anything but 2×2.
///
/// ```
/// use gpcore::DynMatrix;
/// use gpcore::linalg::invert_2x2;
///
/// let m = DynMatrix::from_row_slice(2, 2, &[4.0_f64, 7.0, 2.0, 6.0]);
/// let inv = invert_2x2(&m).unwrap();
/// assert!((inv[(0, 0)] - 0.6).abs() < 1e-12);
/// assert!((inv[(0, 1)] + 0.7).abs() < 1e-12);
///
/// let singular = DynMatrix::from_row_slice(2, 2, &[1.0_f64, 2.0, 2.0, 4.0]);
/// assert_eq!(invert_2x2(&singular).unwrap()[(0, 0)], 1e10);
/// ```
pub fn invert_2x2<T: FloatScalar>(m: &DynMatrix<T>) -> Result<DynMatrix<T>, LinalgError> {
    if m.shape() != (2, 2) {
        return Err(LinalgError::DimensionMismatch {
            expected: (2, 2),
            got: m.shape(),
        });
    }

    let (a, b, c, d) = (m[(0, 0)], m[(0, 1)], m[(1, 0)], m[(1, 1)]);
    let det = a * d - b * c;
    if det.abs() < T::lit(SINGULAR_DET) {
        log::debug!(
            "invert_2x2: |det| = {:e} below threshold, using degenerate diagonal",
            det.abs().to_f64_lossy()
        );
        let big = T::lit(DEGENERATE_DIAGONAL);
        return Ok(DynMatrix::from_diagonal(&[big, big]));
    }

    let inv_det = T::one() / det;
    Ok(DynMatrix::from_row_slice(
        2,
        2,
        &[d * inv_det, -b * inv_det, -c * inv_det, a * inv_det],
    ))
}
