//! Exact Gaussian process regression over scalar inputs.
//!
//! Given observations `(xᵢ, yᵢ)`, a [`Kernel`] and a noise variance, the
//! posterior at query points is computed by
//!
//! 1. `K = k(X, X) + noise·I + 1e-6·I`,
//! 2. `L = cholesky(K)`,
//! 3. `α = L⁻ᵀ·L⁻¹·y`,
//! 4. for each query `x*`: mean `k*ᵀα`, variance `max(0, k(x*, x*) − vᵀv)`
//!    with `v = L⁻¹k*`.
//!
//! Nothing is cached between calls. With no observations, or if a triangular
//! solve degenerates, the result is the prior (mean 0, variance `k(x, x)`).
//! The fallback is logged at `warn` level and never returned as an error.
//!
//! # Example
//!
//! ```
//! use gpcore::gp::{compute_gp_posterior, Observation};
//! use gpcore::Kernel;
//!
//! let kernel = Kernel::rbf(0.3_f64, 1.0).unwrap();
//! let obs = [Observation::new(-1.0, 1.0), Observation::new(1.0, -1.0)];
//! let post = compute_gp_posterior(&[-1.0, 0.0, 1.0], &obs, &kernel, 0.05).unwrap();
//!
//! assert!((post.mean[0] - 1.0).abs() < 0.05);
//! assert!(post.variance[1] > post.variance[0]);
//! ```

mod posterior;


pub use posterior::{Observation, Posterior};

use alloc::vec;
use alloc::vec::Vec;

use rand::Rng;

use crate::dynmatrix::{dot, DynMatrix};
use crate::error::GpError;
use crate::kernel::Kernel;
use crate::linalg::{Cholesky, LinalgError};
use crate::sampling::sample_mvn;
use crate::traits::FloatScalar;

/// Constant added to every covariance diagonal before factorization.
pub const DIAGONAL_JITTER: f64 = 1e-6;

// ---------------------------------------------------------------------------
// Input validation
// ---------------------------------------------------------------------------

pub(crate) fn check_noise<T: FloatScalar>(noise_variance: T) -> Result<(), GpError> {
    if !noise_variance.is_finite() || noise_variance < T::zero() {
        return Err(GpError::InvalidNoise {
            value: noise_variance.to_f64_lossy(),
        });
    }
    Ok(())
}

fn check_query<T: FloatScalar>(query: &[T]) -> Result<(), GpError> {
    match query.iter().position(|x| !x.is_finite()) {
        Some(index) => Err(GpError::NonFiniteInput {
            name: "query",
            index,
        }),
        None => Ok(()),
    }
}

fn check_observations<T: FloatScalar>(observations: &[Observation<T>]) -> Result<(), GpError> {
    match observations
        .iter()
        .position(|o| !o.x.is_finite() || !o.y.is_finite())
    {
        Some(index) => Err(GpError::NonFiniteInput {
            name: "observations",
            index,
        }),
        None => Ok(()),
    }
}

fn check_all<T: FloatScalar>(
    query: &[T],
    observations: &[Observation<T>],
    kernel: &Kernel<T>,
    noise_variance: T,
) -> Result<(), GpError> {
    kernel.validate()?;
    check_noise(noise_variance)?;
    check_query(query)?;
    check_observations(observations)
}

// ---------------------------------------------------------------------------
// Conditioning on data
// ---------------------------------------------------------------------------

/// Factored training covariance and weights for one inference call.
struct Conditioned<'k, T> {
    kernel: &'k Kernel<T>,
    xs: Vec<T>,
    chol: Cholesky<T>,
    alpha: Vec<T>,
}

impl<'k, T: FloatScalar> Conditioned<'k, T> {
    fn new(
        observations: &[Observation<T>],
        kernel: &'k Kernel<T>,
        noise_variance: T,
    ) -> Result<Self, LinalgError> {
        let xs: Vec<T> = observations.iter().map(|o| o.x).collect();
        let ys: Vec<T> = observations.iter().map(|o| o.y).collect();

        let mut k = kernel.matrix(&xs);
        k.add_to_diagonal(noise_variance + T::lit(DIAGONAL_JITTER));
        let chol = Cholesky::new(&k)?;
        let alpha = chol.solve(&ys)?;

        Ok(Self {
            kernel,
            xs,
            chol,
            alpha,
        })
    }

    /// `k* = k(x, X)` and `v = L⁻¹·k*`.
    fn project(&self, x: T) -> Result<(Vec<T>, Vec<T>), LinalgError> {
        let k_star = self.kernel.vector(x, &self.xs);
        let v = self.chol.solve_lower(&k_star)?;
        Ok((k_star, v))
    }

    fn predict(&self, query: &[T]) -> Result<Posterior<T>, LinalgError> {
        let mut mean = Vec::with_capacity(query.len());
        let mut variance = Vec::with_capacity(query.len());
        for &x in query {
            let (k_star, v) = self.project(x)?;
            mean.push(dot(&k_star, &self.alpha)?);
            let var = self.kernel.eval(x, x) - dot(&v, &v)?;
            variance.push(var.max(T::zero()));
        }
        Ok(Posterior { mean, variance })
    }

    /// Full posterior covariance `K** − VᵀV` over `query`.
    fn covariance(&self, query: &[T]) -> Result<DynMatrix<T>, LinalgError> {
        let vs = query
            .iter()
            .map(|&x| self.project(x).map(|(_, v)| v))
            .collect::<Result<Vec<_>, _>>()?;

        let n = query.len();
        let mut cov = self.kernel.matrix(query);
        for i in 0..n {
            for j in 0..=i {
                let c = cov[(i, j)] - dot(&vs[i], &vs[j])?;
                cov[(i, j)] = c;
                cov[(j, i)] = c;
            }
        }
        Ok(cov)
    }

    /// `-½yᵀα − Σ ln Lᵢᵢ − n/2·ln 2π`.
    fn log_marginal_likelihood(&self, ys: &[T]) -> Result<T, LinalgError> {
        let n = T::lit(self.chol.dim() as f64);
        let data_fit = T::lit(-0.5) * dot(ys, &self.alpha)?;
        let complexity = T::lit(0.5) * self.chol.ln_det();
        let norm = T::lit(0.5) * n * T::lit(2.0 * core::f64::consts::PI).ln();
        Ok(data_fit - complexity - norm)
    }
}

fn warn_fallback(op: &str, n_obs: usize, err: &LinalgError) {
    log::warn!(
        "{}: {} with {} observations, falling back to the prior",
        op,
        err,
        n_obs
    );
}

// ---------------------------------------------------------------------------
// Public operations
// ---------------------------------------------------------------------------

/// Prior at every query point: mean 0, variance `k(x, x)`.
///
/// The kernel is used as given; validate it first if it was built by hand.
pub fn prior<T: FloatScalar>(query: &[T], kernel: &Kernel<T>) -> Posterior<T> {
    Posterior {
        mean: vec![T::zero(); query.len()],
        variance: query.iter().map(|&x| kernel.eval(x, x)).collect(),
    }
}

/// Posterior mean and variance at `query` given `observations`.
///
/// Fails only on invalid input: bad kernel hyperparameters, a negative or
/// non-finite `noise_variance`, or a NaN/infinite query or observation.
/// Numerical trouble inside the solve yields the prior instead.
pub fn compute_gp_posterior<T: FloatScalar>(
    query: &[T],
    observations: &[Observation<T>],
    kernel: &Kernel<T>,
    noise_variance: T,
) -> Result<Posterior<T>, GpError> {
    check_all(query, observations, kernel, noise_variance)?;
    if observations.is_empty() {
        return Ok(prior(query, kernel));
    }

    let posterior = Conditioned::new(observations, kernel, noise_variance)
        .and_then(|c| c.predict(query));
    match posterior {
        Ok(p) => Ok(p),
        Err(e) => {
            warn_fallback("compute_gp_posterior", observations.len(), &e);
            Ok(prior(query, kernel))
        }
    }
}

/// Posterior covariance matrix over `query`, symmetric by construction.
///
/// Falls back to the prior covariance `k(query, query)` under the same rules
/// as [`compute_gp_posterior`].
pub fn posterior_covariance<T: FloatScalar>(
    query: &[T],
    observations: &[Observation<T>],
    kernel: &Kernel<T>,
    noise_variance: T,
) -> Result<DynMatrix<T>, GpError> {
    check_all(query, observations, kernel, noise_variance)?;
    if observations.is_empty() {
        return Ok(kernel.matrix(query));
    }

    let cov = Conditioned::new(observations, kernel, noise_variance)
        .and_then(|c| c.covariance(query));
    match cov {
        Ok(c) => Ok(c),
        Err(e) => {
            warn_fallback("posterior_covariance", observations.len(), &e);
            Ok(kernel.matrix(query))
        }
    }
}

/// Draw `num_samples` functions from the GP prior over `query`.
///
/// Each sample is `L·z` with `L = cholesky(k(query, query) + 1e-6·I)` and
/// `z` standard normal.
pub fn sample_prior<T: FloatScalar, R: Rng + ?Sized>(
    query: &[T],
    kernel: &Kernel<T>,
    num_samples: usize,
    rng: &mut R,
) -> Result<Vec<Vec<T>>, GpError> {
    kernel.validate()?;
    check_query(query)?;
    let mut cov = kernel.matrix(query);
    draw(&vec![T::zero(); query.len()], &mut cov, num_samples, rng)
}

/// Draw `num_samples` functions from the posterior over `query`.
///
/// Uses the full posterior covariance (plus jitter), so samples are smooth
/// across the grid rather than independent per point. Falls back to prior
/// samples under the same rules as [`compute_gp_posterior`].
pub fn sample_posterior<T: FloatScalar, R: Rng + ?Sized>(
    query: &[T],
    observations: &[Observation<T>],
    kernel: &Kernel<T>,
    noise_variance: T,
    num_samples: usize,
    rng: &mut R,
) -> Result<Vec<Vec<T>>, GpError> {
    check_all(query, observations, kernel, noise_variance)?;
    if observations.is_empty() {
        return sample_prior(query, kernel, num_samples, rng);
    }

    let moments = Conditioned::new(observations, kernel, noise_variance)
        .and_then(|c| Ok((c.predict(query)?.mean, c.covariance(query)?)));
    match moments {
        Ok((mean, mut cov)) => draw(&mean, &mut cov, num_samples, rng),
        Err(e) => {
            warn_fallback("sample_posterior", observations.len(), &e);
            sample_prior(query, kernel, num_samples, rng)
        }
    }
}

fn draw<T: FloatScalar, R: Rng + ?Sized>(
    mean: &[T],
    cov: &mut DynMatrix<T>,
    num_samples: usize,
    rng: &mut R,
) -> Result<Vec<Vec<T>>, GpError> {
    cov.add_to_diagonal(T::lit(DIAGONAL_JITTER));
    let l = Cholesky::new(&*cov)?.into_l();
    (0..num_samples)
        .map(|_| sample_mvn(mean, &l, rng).map_err(GpError::from))
        .collect()
}

/// Log evidence `ln p(y | X)` of the observations under the model.
///
/// Zero for an empty observation set. A degenerate solve is reported as
/// [`GpError::Linalg`], since there is no prior value to fall back to.
pub fn log_marginal_likelihood<T: FloatScalar>(
    observations: &[Observation<T>],
    kernel: &Kernel<T>,
    noise_variance: T,
) -> Result<T, GpError> {
    check_all(&[], observations, kernel, noise_variance)?;
    if observations.is_empty() {
        return Ok(T::zero());
    }
    let ys: Vec<T> = observations.iter().map(|o| o.y).collect();
    let c = Conditioned::new(observations, kernel, noise_variance)?;
    Ok(c.log_marginal_likelihood(&ys)?)
}
