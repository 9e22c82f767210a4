use crate::traits::FloatScalar;

use super::MaternNu;

/// Distances below this (in length-scale units) count as zero for Matérn.
pub const MATERN_ZERO_DISTANCE: f64 = 1e-10;

/// Squared exponential (RBF): `σ²·exp(-½·((x1 − x2)/ℓ)²)`.
///
/// ```
/// use gpcore::kernel::rbf;
/// assert_eq!(rbf(0.3_f64, 0.3, 0.5, 2.0), 2.0);
/// assert!((rbf(0.0_f64, 1.0, 1.0, 1.0) - (-0.5_f64).exp()).abs() < 1e-15);
/// ```
#[inline]
pub fn rbf<T: FloatScalar>(x1: T, x2: T, length_scale: T, variance: T) -> T {
    let d = (x1 - x2) / length_scale;
    variance * (-T::lit(0.5) * d * d).exp()
}

/// Matérn kernel for ν ∈ {1/2, 3/2, 5/2}, with `r = |x1 − x2|/ℓ`.
///
/// Returns `variance` exactly when `r < 1e-10`, and zero when `r` overflows.
pub fn matern<T: FloatScalar>(x1: T, x2: T, length_scale: T, variance: T, nu: MaternNu) -> T {
    let r = (x1 - x2).abs() / length_scale;
    if r < T::lit(MATERN_ZERO_DISTANCE) {
        return variance;
    }
    if r.is_infinite() {
        return T::zero();
    }
    match nu {
        MaternNu::Half => variance * (-r).exp(),
        MaternNu::ThreeHalves => {
            let s = T::lit(3.0).sqrt() * r;
            variance * (T::one() + s) * (-s).exp()
        }
        MaternNu::FiveHalves => {
            let s = T::lit(5.0).sqrt() * r;
            let poly = T::one() + s + T::lit(5.0) * r * r / T::lit(3.0);
            variance * poly * (-s).exp()
        }
    }
}

/// Periodic (exp-sine-squared): `σ²·exp(−2·sin²(π|x1 − x2|/p)/ℓ²)`.
///
/// Both inputs are reduced modulo the period first, so the lag stays finite
/// for any pair of finite inputs.
#[inline]
pub fn periodic<T: FloatScalar>(x1: T, x2: T, length_scale: T, variance: T, period: T) -> T {
    let pi = T::lit(core::f64::consts::PI);
    let lag = (x1 % period - x2 % period).abs();
    let s = (pi * lag / period).sin();
    variance * (-T::lit(2.0) * s * s / (length_scale * length_scale)).exp()
}
