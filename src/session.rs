//! Mutable modelling session: the state an interactive front end edits.
//!
//! [`GpSession`] owns the kernel, the noise variance, the observation list
//! and a sampling seed. Every query recomputes from scratch through the
//! stateless functions in [`gp`](crate::gp), so the session is only a
//! validated container.
//!
//! Sampling reuses the session seed, so the same draws are reproduced while
//! hyperparameters change and sample paths deform smoothly under a slider.
//!
//! ```
//! use gpcore::session::GpSession;
//! use gpcore::{Acquisition, Kernel, Observation};
//!
//! let mut s = GpSession::new(Kernel::rbf(0.3_f64, 1.0).unwrap(), 0.05).unwrap();
//! s.add_observation(Observation::new(-1.0, 1.0)).unwrap();
//! s.add_observation(Observation::new(1.0, -1.0)).unwrap();
//!
//! let grid = gpcore::linspace(-2.0, 2.0, 41);
//! let post = s.posterior(&grid).unwrap();
//! assert_eq!(post.len(), 41);
//!
//! let next = s.suggest_next(&grid, &Acquisition::ExpectedImprovement).unwrap();
//! assert!(next.is_some());
//! ```

use alloc::vec::Vec;

use crate::acquisition::{suggest_next, Acquisition, Suggestion};
use crate::error::GpError;
use crate::gp::{self, check_noise, Observation, Posterior};
use crate::kernel::Kernel;
use crate::sampling::seeded_rng;
use crate::traits::FloatScalar;

/// Observations plus model settings.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GpSession<T> {
    kernel: Kernel<T>,
    noise_variance: T,
    observations: Vec<Observation<T>>,
    seed: u64,
}

impl<T: FloatScalar> GpSession<T> {
    /// Empty session with seed 0.
    pub fn new(kernel: Kernel<T>, noise_variance: T) -> Result<Self, GpError> {
        kernel.validate()?;
        check_noise(noise_variance)?;
        Ok(Self {
            kernel,
            noise_variance,
            observations: Vec::new(),
            seed: 0,
        })
    }

    /// Builder-style seed override.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn kernel(&self) -> &Kernel<T> {
        &self.kernel
    }

    pub fn noise_variance(&self) -> T {
        self.noise_variance
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn observations(&self) -> &[Observation<T>] {
        &self.observations
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    // ── Mutation ────────────────────────────────────────────────────

    /// Replace the kernel. The session is unchanged on error.
    pub fn set_kernel(&mut self, kernel: Kernel<T>) -> Result<(), GpError> {
        kernel.validate()?;
        log::debug!("session: kernel set to {}", kernel.name());
        self.kernel = kernel;
        Ok(())
    }

    /// Replace the noise variance (`≥ 0`, finite).
    pub fn set_noise_variance(&mut self, noise_variance: T) -> Result<(), GpError> {
        check_noise(noise_variance)?;
        log::debug!(
            "session: noise variance set to {}",
            noise_variance.to_f64_lossy()
        );
        self.noise_variance = noise_variance;
        Ok(())
    }

    /// Change the sampling seed, giving a fresh set of sample paths.
    pub fn set_seed(&mut self, seed: u64) {
        log::debug!("session: seed set to {}", seed);
        self.seed = seed;
    }

    /// Append an observation. Non-finite coordinates are rejected.
    pub fn add_observation(&mut self, observation: Observation<T>) -> Result<(), GpError> {
        if !observation.x.is_finite() || !observation.y.is_finite() {
            return Err(GpError::NonFiniteInput {
                name: "observation",
                index: self.observations.len(),
            });
        }
        self.observations.push(observation);
        log::debug!(
            "session: added observation ({}, {}), {} total",
            observation.x.to_f64_lossy(),
            observation.y.to_f64_lossy(),
            self.observations.len()
        );
        Ok(())
    }

    /// Remove and return the observation at `index`, if any.
    pub fn remove_observation(&mut self, index: usize) -> Option<Observation<T>> {
        if index >= self.observations.len() {
            return None;
        }
        let removed = self.observations.remove(index);
        log::debug!("session: removed observation {}", index);
        Some(removed)
    }

    /// Remove the observation whose `x` is closest to `x`, provided it lies
    /// within `radius`. The earliest one wins on ties.
    ///
    /// Nothing is removed unless both `x` and `radius` are finite.
    pub fn remove_nearest(&mut self, x: T, radius: T) -> Option<Observation<T>> {
        if !x.is_finite() || !radius.is_finite() {
            return None;
        }
        let (index, dist) = self
            .observations
            .iter()
            .map(|o| (o.x - x).abs())
            .enumerate()
            .fold(None, |best: Option<(usize, T)>, (i, d)| match best {
                Some((_, bd)) if bd <= d => best,
                _ => Some((i, d)),
            })?;
        if dist > radius {
            return None;
        }
        self.remove_observation(index)
    }

    /// Drop every observation.
    pub fn clear(&mut self) {
        log::debug!("session: cleared {} observations", self.observations.len());
        self.observations.clear();
    }

    // ── Queries ─────────────────────────────────────────────────────

    /// Observation with the largest `y`, the first on ties.
    pub fn best_observation(&self) -> Option<Observation<T>> {
        self.observations
            .iter()
            .copied()
            .fold(None, |best: Option<Observation<T>>, o| match best {
                Some(b) if b.y >= o.y => best,
                _ => Some(o),
            })
    }

    pub fn posterior(&self, query: &[T]) -> Result<Posterior<T>, GpError> {
        gp::compute_gp_posterior(query, &self.observations, &self.kernel, self.noise_variance)
    }

    pub fn log_marginal_likelihood(&self) -> Result<T, GpError> {
        gp::log_marginal_likelihood(&self.observations, &self.kernel, self.noise_variance)
    }

    /// Prior sample paths drawn with the session seed.
    pub fn sample_prior(&self, query: &[T], num_samples: usize) -> Result<Vec<Vec<T>>, GpError> {
        let mut rng = seeded_rng(self.seed);
        gp::sample_prior(query, &self.kernel, num_samples, &mut rng)
    }

    /// Posterior sample paths drawn with the session seed.
    pub fn sample_posterior(
        &self,
        query: &[T],
        num_samples: usize,
    ) -> Result<Vec<Vec<T>>, GpError> {
        let mut rng = seeded_rng(self.seed);
        gp::sample_posterior(
            query,
            &self.observations,
            &self.kernel,
            self.noise_variance,
            num_samples,
            &mut rng,
        )
    }

    /// Next point to evaluate under `acquisition`.
    ///
    /// The incumbent is the best observed `y`; with no observations it is 0,
    /// the prior mean.
    pub fn suggest_next(
        &self,
        query: &[T],
        acquisition: &Acquisition<T>,
    ) -> Result<Option<Suggestion<T>>, GpError> {
        let posterior = self.posterior(query)?;
        let best_y = self.best_observation().map_or(T::zero(), |o| o.y);
        Ok(suggest_next(query, &posterior, acquisition, best_y))
    }
}
