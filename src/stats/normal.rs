use crate::FloatScalar;
use super::{normal_cdf, normal_pdf, normal_quantile, ContinuousDistribution, StatsError};

/// Normal (Gaussian) distribution N(μ, σ²).
///
/// # Example
///
/// ```
/// use gpcore::stats::{Normal, ContinuousDistribution};
///
/// let n = Normal::new(0.0_f64, 1.0).unwrap();
/// assert!((n.cdf(0.0) - 0.5).abs() < 1e-6);
/// assert!((n.quantile(0.975) - 1.96).abs() < 0.01);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Normal<T> {
    mu: T,
    sigma: T,
}

impl<T: FloatScalar> Normal<T> {
    /// Create a normal distribution with mean `mu` and standard deviation `sigma`.
    ///
    /// Requires finite `mu` and finite `sigma > 0`.
    pub fn new(mu: T, sigma: T) -> Result<Self, StatsError> {
        if !mu.is_finite() || !sigma.is_finite() || sigma <= T::zero() {
            return Err(StatsError::InvalidParameter);
        }
        Ok(Self { mu, sigma })
    }

    /// The standard normal N(0, 1).
    pub fn standard() -> Self {
        Self {
            mu: T::zero(),
            sigma: T::one(),
        }
    }
}

impl<T: FloatScalar> ContinuousDistribution<T> for Normal<T> {
    fn pdf(&self, x: T) -> T {
        let z = (x - self.mu) / self.sigma;
        normal_pdf(z) / self.sigma
    }

    fn cdf(&self, x: T) -> T {
        normal_cdf((x - self.mu) / self.sigma)
    }

    fn quantile(&self, p: T) -> T {
        self.mu + self.sigma * normal_quantile(p)
    }
}
