//! Acquisition functions for Bayesian optimization (maximization).
//!
//! Each scores a candidate from its posterior mean and standard deviation;
//! higher is more worth sampling next.
//!
//! | Function | Score |
//! |---|---|
//! | [`ucb`] | `μ + β·σ` |
//! | [`expected_improvement`] | `(μ − y*)·Φ(z) + σ·φ(z)`, `z = (μ − y*)/σ` |
//! | [`probability_of_improvement`] | `Φ((μ − y* − ξ)/σ)` |
//!
//! EI and PI return exactly 0 when `σ < 0.001`.
//!
//! ```
//! use gpcore::acquisition::{expected_improvement, ucb};
//!
//! assert_eq!(ucb(1.0_f64, 0.5, 2.0), 2.0);
//! assert_eq!(expected_improvement(5.0_f64, 0.0005, 0.0), 0.0);
//! ```

use alloc::vec::Vec;

use crate::gp::Posterior;
use crate::stats::{ContinuousDistribution, Normal};
use crate::traits::FloatScalar;

/// Standard deviation below which EI and PI are defined as 0.
pub const STD_THRESHOLD: f64 = 0.001;

/// Default exploration margin ξ for [`probability_of_improvement`].
pub const DEFAULT_XI: f64 = 0.01;

/// Upper confidence bound `mean + beta·std`.
#[inline]
pub fn ucb<T: FloatScalar>(mean: T, std: T, beta: T) -> T {
    mean + beta * std
}

/// Expected improvement over `best_y`.
pub fn expected_improvement<T: FloatScalar>(mean: T, std: T, best_y: T) -> T {
    if std < T::lit(STD_THRESHOLD) {
        return T::zero();
    }
    let improvement = mean - best_y;
    let z = improvement / std;
    let phi = Normal::standard();
    improvement * phi.cdf(z) + std * phi.pdf(z)
}

/// Probability that a sample exceeds `best_y + xi`.
pub fn probability_of_improvement<T: FloatScalar>(mean: T, std: T, best_y: T, xi: T) -> T {
    if std < T::lit(STD_THRESHOLD) {
        return T::zero();
    }
    Normal::standard().cdf((mean - best_y - xi) / std)
}

/// Acquisition function choice plus its parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Acquisition<T> {
    Ucb { beta: T },
    ExpectedImprovement,
    ProbabilityOfImprovement { xi: T },
}

impl<T: FloatScalar> Acquisition<T> {
    /// PI with the default margin ξ = 0.01.
    pub fn probability_of_improvement() -> Self {
        Acquisition::ProbabilityOfImprovement {
            xi: T::lit(DEFAULT_XI),
        }
    }

    /// Score one candidate. `best_y` is ignored by UCB.
    pub fn score(&self, mean: T, std: T, best_y: T) -> T {
        match *self {
            Acquisition::Ucb { beta } => ucb(mean, std, beta),
            Acquisition::ExpectedImprovement => expected_improvement(mean, std, best_y),
            Acquisition::ProbabilityOfImprovement { xi } => {
                probability_of_improvement(mean, std, best_y, xi)
            }
        }
    }

    /// Score every point of a posterior.
    pub fn evaluate(&self, posterior: &Posterior<T>, best_y: T) -> Vec<T> {
        posterior
            .mean
            .iter()
            .zip(&posterior.variance)
            .map(|(&m, &v)| self.score(m, v.sqrt(), best_y))
            .collect()
    }
}

/// Highest-scoring query point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Suggestion<T> {
    pub index: usize,
    pub x: T,
    pub score: T,
}

/// Argmax of `acquisition` over `query`, first index on ties.
///
/// `None` if the query is empty, the lengths differ, or every score is NaN.
///
/// ```
/// use gpcore::acquisition::{suggest_next, Acquisition};
/// use gpcore::Posterior;
///
/// let post = Posterior { mean: vec![0.0_f64, 0.5, 0.2], variance: vec![0.0, 0.0, 1.0] };
/// let s = suggest_next(&[0.0, 1.0, 2.0], &post, &Acquisition::Ucb { beta: 2.0 }, 0.0).unwrap();
/// assert_eq!(s.index, 2);
/// ```
pub fn suggest_next<T: FloatScalar>(
    query: &[T],
    posterior: &Posterior<T>,
    acquisition: &Acquisition<T>,
    best_y: T,
) -> Option<Suggestion<T>> {
    if query.len() != posterior.len() || posterior.variance.len() != posterior.len() {
        return None;
    }
    let scores = acquisition.evaluate(posterior, best_y);

    let mut best: Option<Suggestion<T>> = None;
    for (index, (&x, &score)) in query.iter().zip(&scores).enumerate() {
        if score.is_nan() {
            continue;
        }
        if best.map_or(true, |b| score > b.score) {
            best = Some(Suggestion { index, x, score });
        }
    }
    best
}
