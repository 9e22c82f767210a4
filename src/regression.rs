//! Conjugate Bayesian linear regression `y = w₀ + w₁·x + ε`.
//!
//! Prior `w ~ N(0, σ_p²·I)`, noise `ε ~ N(0, σ_n²)`. With design rows
//! `φ(x) = [1, x]` the weight posterior is `N(m, S)` where
//!
//! ```text
//! S⁻¹ = I/σ_p² + ΦᵀΦ/σ_n²
//! m   = S·Φᵀy/σ_n²
//! ```
//!
//! `S` comes from [`invert_2x2`], so a numerically singular precision yields
//! the large-diagonal fallback instead of an error.
//!
//! ```
//! use gpcore::regression::BayesianLinearRegression;
//! use gpcore::Observation;
//!
//! let model = BayesianLinearRegression::new(10.0_f64, 0.01).unwrap();
//! let obs: Vec<_> = (0..5).map(|i| Observation::new(i as f64, 1.0 + 2.0 * i as f64)).collect();
//! let post = model.fit(&obs).unwrap();
//! assert!((post.mean()[1] - 2.0).abs() < 1e-2);
//! ```

use alloc::vec::Vec;

use rand::Rng;

use crate::dynmatrix::DynMatrix;
use crate::error::GpError;
use crate::gp::{Observation, Posterior};
use crate::linalg::{cholesky, invert_2x2};
use crate::sampling::sample_mvn;
use crate::traits::FloatScalar;

/// Model hyperparameters. Both variances are finite and strictly positive.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BayesianLinearRegression<T> {
    prior_variance: T,
    noise_variance: T,
}

impl<T: FloatScalar> BayesianLinearRegression<T> {
    pub fn new(prior_variance: T, noise_variance: T) -> Result<Self, GpError> {
        if !prior_variance.is_finite() || prior_variance <= T::zero() {
            return Err(GpError::InvalidPrior {
                value: prior_variance.to_f64_lossy(),
            });
        }
        if !noise_variance.is_finite() || noise_variance <= T::zero() {
            return Err(GpError::InvalidNoise {
                value: noise_variance.to_f64_lossy(),
            });
        }
        Ok(Self {
            prior_variance,
            noise_variance,
        })
    }

    pub fn prior_variance(&self) -> T {
        self.prior_variance
    }

    pub fn noise_variance(&self) -> T {
        self.noise_variance
    }

    /// Weight prior `N(0, σ_p²·I)`.
    pub fn prior(&self) -> LinearPosterior<T> {
        LinearPosterior {
            mean: [T::zero(); 2],
            covariance: DynMatrix::from_diagonal(&[self.prior_variance, self.prior_variance]),
            noise_variance: self.noise_variance,
        }
    }

    /// Condition on `observations`. Returns the prior when there are none.
    pub fn fit(&self, observations: &[Observation<T>]) -> Result<LinearPosterior<T>, GpError> {
        if let Some(index) = observations
            .iter()
            .position(|o| !o.x.is_finite() || !o.y.is_finite())
        {
            return Err(GpError::NonFiniteInput {
                name: "observations",
                index,
            });
        }
        if observations.is_empty() {
            return Ok(self.prior());
        }

        let n = observations.len();
        let phi = DynMatrix::from_fn(n, 2, |i, j| {
            if j == 0 {
                T::one()
            } else {
                observations[i].x
            }
        });
        let phi_t = phi.transpose();
        let inv_noise = T::one() / self.noise_variance;

        let mut precision = phi_t.matmul(&phi)?.scale(inv_noise);
        precision.add_to_diagonal(T::one() / self.prior_variance);
        let covariance = invert_2x2(&precision)?;

        let ys: Vec<T> = observations.iter().map(|o| o.y).collect();
        let phi_t_y: Vec<T> = phi_t.mul_vec(&ys)?.into_iter().map(|v| v * inv_noise).collect();
        let m = covariance.mul_vec(&phi_t_y)?;

        log::debug!(
            "linear regression: {} observations, weights [{}, {}]",
            n,
            m[0].to_f64_lossy(),
            m[1].to_f64_lossy()
        );

        Ok(LinearPosterior {
            mean: [m[0], m[1]],
            covariance,
            noise_variance: self.noise_variance,
        })
    }
}

/// Gaussian belief over `[w₀, w₁]`.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearPosterior<T> {
    mean: [T; 2],
    covariance: DynMatrix<T>,
    noise_variance: T,
}

impl<T: FloatScalar> LinearPosterior<T> {
    /// Posterior mean `[intercept, slope]`.
    pub fn mean(&self) -> [T; 2] {
        self.mean
    }

    /// 2×2 weight covariance `S`.
    pub fn covariance(&self) -> &DynMatrix<T> {
        &self.covariance
    }

    /// Predictive distribution of a new noisy observation at each query
    /// point: mean `mᵀφ`, variance `φᵀSφ + σ_n²`.
    pub fn predict(&self, query: &[T]) -> Posterior<T> {
        let s = &self.covariance;
        let (mean, variance): (Vec<T>, Vec<T>) = query
            .iter()
            .map(|&x| {
                let m = self.mean[0] + self.mean[1] * x;
                let v = s[(0, 0)] + (s[(0, 1)] + s[(1, 0)]) * x + s[(1, 1)] * x * x;
                (m, v.max(T::zero()) + self.noise_variance)
            })
            .unzip();
        Posterior { mean, variance }
    }

    /// One draw of `[w₀, w₁]` from the posterior.
    pub fn sample_weights<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<[T; 2], GpError> {
        let l = cholesky(&self.covariance)?;
        let w = sample_mvn(&self.mean, &l, rng)?;
        Ok([w[0], w[1]])
    }

    /// `num_lines` sampled regression lines evaluated over `query`.
    pub fn sample_lines<R: Rng + ?Sized>(
        &self,
        query: &[T],
        num_lines: usize,
        rng: &mut R,
    ) -> Result<Vec<Vec<T>>, GpError> {
        let l = cholesky(&self.covariance)?;
        (0..num_lines)
            .map(|_| -> Result<Vec<T>, GpError> {
                let w = sample_mvn(&self.mean, &l, rng)?;
                Ok(query.iter().map(|&x| w[0] + w[1] * x).collect())
            })
            .collect()
    }
}
