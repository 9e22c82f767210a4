use alloc::vec::Vec;

use crate::stats::{ContinuousDistribution, Normal, StatsError};
use crate::traits::FloatScalar;

/// A noisy measurement `y` of the latent function at `x`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Observation<T> {
    pub x: T,
    pub y: T,
}

impl<T> Observation<T> {
    pub fn new(x: T, y: T) -> Self {
        Self { x, y }
    }
}

impl<T> From<(T, T)> for Observation<T> {
    fn from((x, y): (T, T)) -> Self {
        Self { x, y }
    }
}

/// Pointwise posterior over a query grid.
///
/// `mean[i]` and `variance[i]` describe the latent function at the `i`-th
/// query point; both vectors have the query's length and every variance is
/// non-negative. From the GP engine the variance excludes observation noise,
/// see [`Posterior::predictive_variance`].
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Posterior<T> {
    pub mean: Vec<T>,
    pub variance: Vec<T>,
}

impl<T: FloatScalar> Posterior<T> {
    /// Number of query points.
    pub fn len(&self) -> usize {
        self.mean.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mean.is_empty()
    }

    /// Pointwise standard deviation `√variance`.
    pub fn std_dev(&self) -> Vec<T> {
        self.variance.iter().map(|v| v.sqrt()).collect()
    }

    /// Variance of a new noisy observation: `variance + noise_variance`.
    pub fn predictive_variance(&self, noise_variance: T) -> Vec<T> {
        self.variance.iter().map(|&v| v + noise_variance).collect()
    }

    /// `(mean − k·σ, mean + k·σ)` at every query point.
    ///
    /// ```
    /// use gpcore::Posterior;
    ///
    /// let p = Posterior { mean: vec![1.0_f64], variance: vec![4.0] };
    /// let (lo, hi) = p.band(2.0);
    /// assert_eq!((lo[0], hi[0]), (-3.0, 5.0));
    /// ```
    pub fn band(&self, k: T) -> (Vec<T>, Vec<T>) {
        self.mean
            .iter()
            .zip(&self.variance)
            .map(|(&m, &v)| {
                let half = k * v.sqrt();
                (m - half, m + half)
            })
            .unzip()
    }

    /// Central credible interval of probability `level ∈ (0, 1)`.
    ///
    /// `level = 0.95` gives the familiar `mean ± 1.96·σ` band.
    pub fn credible_interval(&self, level: T) -> Result<(Vec<T>, Vec<T>), StatsError> {
        if !(level > T::zero() && level < T::one()) {
            return Err(StatsError::InvalidParameter);
        }
        let z = Normal::standard().quantile(T::lit(0.5) + level * T::lit(0.5));
        Ok(self.band(z))
    }
}
