//! Gaussian random draws from an injected [`rand::Rng`].
//!
//! Every function takes the generator explicitly; nothing here owns global
//! state. Use [`seeded_rng`] for reproducible draws.
//!
//! ```
//! use gpcore::sampling::{seeded_rng, standard_normal_vec};
//!
//! let a: Vec<f64> = standard_normal_vec(4, &mut seeded_rng(7));
//! let b: Vec<f64> = standard_normal_vec(4, &mut seeded_rng(7));
//! assert_eq!(a, b);
//! ```

use alloc::vec::Vec;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::dynmatrix::DynMatrix;
use crate::linalg::LinalgError;
use crate::traits::FloatScalar;

/// Deterministic generator for reproducible sampling.
pub fn seeded_rng(seed: u64) -> SmallRng {
    SmallRng::seed_from_u64(seed)
}

/// One draw from N(0, 1) by the Box–Muller transform.
///
/// `u1` is taken from `(0, 1]` so `ln(u1)` is always finite.
pub fn standard_normal<T: FloatScalar, R: Rng + ?Sized>(rng: &mut R) -> T {
    let u1 = T::lit(1.0 - rng.random::<f64>());
    let u2 = T::lit(1.0 - rng.random::<f64>());
    (T::lit(-2.0) * u1.ln()).sqrt() * (T::lit(2.0 * core::f64::consts::PI) * u2).cos()
}

/// `n` independent standard normal draws.
pub fn standard_normal_vec<T: FloatScalar, R: Rng + ?Sized>(n: usize, rng: &mut R) -> Vec<T> {
    (0..n).map(|_| standard_normal(rng)).collect()
}

/// Draw from N(mean, L·Lᵀ) as `mean + L·z`.
///
/// `l` is a lower-triangular factor; entries above its diagonal are ignored.
pub fn sample_mvn<T: FloatScalar, R: Rng + ?Sized>(
    mean: &[T],
    l: &DynMatrix<T>,
    rng: &mut R,
) -> Result<Vec<T>, LinalgError> {
    let n = mean.len();
    if l.shape() != (n, n) {
        return Err(LinalgError::DimensionMismatch {
            expected: (n, n),
            got: l.shape(),
        });
    }
    let z: Vec<T> = standard_normal_vec(n, rng);
    Ok((0..n)
        .map(|i| {
            l.row(i)[..=i]
                .iter()
                .zip(&z)
                .fold(mean[i], |acc, (&lij, &zj)| acc + lij * zj)
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn moments() {
        let mut rng = seeded_rng(42);
        let n = 20_000;
        let xs: Vec<f64> = standard_normal_vec(n, &mut rng);
        let mean = xs.iter().sum::<f64>() / n as f64;
        let var = xs.iter().map(|x| (x - mean) * (x - mean)).sum::<f64>() / n as f64;
        assert!(mean.abs() < 0.05, "mean = {}", mean);
        assert!((var - 1.0).abs() < 0.05, "var = {}", var);
        assert!(xs.iter().all(|x| x.is_finite()));
    }

    #[test]
    fn seeds_differ() {
        let a: Vec<f64> = standard_normal_vec(3, &mut seeded_rng(1));
        let b: Vec<f64> = standard_normal_vec(3, &mut seeded_rng(2));
        assert_ne!(a, b);
    }

    #[test]
    fn mvn_identity_factor_shifts_mean() {
        let mean = [10.0_f64, -10.0];
        let l = DynMatrix::eye(2);
        let mut rng = seeded_rng(3);
        let z: Vec<f64> = standard_normal_vec(2, &mut seeded_rng(3));
        let s = sample_mvn(&mean, &l, &mut rng).unwrap();
        assert!((s[0] - (10.0 + z[0])).abs() < 1e-12);
        assert!((s[1] - (-10.0 + z[1])).abs() < 1e-12);
    }

    #[test]
    fn mvn_perfectly_correlated() {
        // L for [[1,1],[1,1]]: both components share z0.
        let l = DynMatrix::from_row_slice(2, 2, &[1.0, 0.0, 1.0, 0.0]);
        let s = sample_mvn(&[0.0, 0.0], &l, &mut seeded_rng(9)).unwrap();
        assert_eq!(s[0], s[1]);
    }

    #[test]
    fn mvn_shape_mismatch() {
        let l = DynMatrix::<f64>::eye(3);
        assert_eq!(
            sample_mvn(&[0.0, 0.0], &l, &mut seeded_rng(0)).unwrap_err(),
            LinalgError::DimensionMismatch {
                expected: (2, 2),
                got: (3, 3)
            }
        );
    }

    #[test]
    fn works_through_dyn_rng() {
        let mut rng = seeded_rng(5);
        let dyn_rng: &mut dyn rand::RngCore = &mut rng;
        let x: f32 = standard_normal(dyn_rng);
        assert!(x.is_finite());
    }
}
