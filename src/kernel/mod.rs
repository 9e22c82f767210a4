//! Covariance functions over scalar inputs.
//!
//! | Kernel | Formula (`d = x1 − x2`) |
//! |---|---|
//! | [`Kernel::Rbf`] | `σ²·exp(−d²/2ℓ²)` |
//! | [`Kernel::Matern`] ν=½ | `σ²·exp(−r)`, `r = \|d\|/ℓ` |
//! | [`Kernel::Matern`] ν=3/2 | `σ²·(1+√3r)·exp(−√3r)` |
//! | [`Kernel::Matern`] ν=5/2 | `σ²·(1+√5r+5r²/3)·exp(−√5r)` |
//! | [`Kernel::Periodic`] | `σ²·exp(−2·sin²(π\|d\|/p)/ℓ²)` |
//!
//! Every kernel is symmetric and equals `σ²` at zero distance.
//!
//! # Example
//!
//! ```
//! use gpcore::kernel::{compute_kernel_matrix, Kernel};
//!
//! let k = Kernel::rbf(0.5_f64, 1.0).unwrap();
//! let m = compute_kernel_matrix(&[0.0, 0.5, 1.0], &k).unwrap();
//! assert_eq!(m[(1, 1)], 1.0);
//! assert_eq!(m[(0, 2)], m[(2, 0)]);
//!
//! assert!(Kernel::rbf(-1.0_f64, 1.0).is_err());
//! ```

mod functions;

pub use functions::{matern, periodic, rbf, MATERN_ZERO_DISTANCE};

use alloc::vec::Vec;

use crate::dynmatrix::DynMatrix;
use crate::traits::FloatScalar;

/// Errors from kernel construction and validation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum KernelError {
    /// A hyperparameter is non-positive, non-finite, or (for `nu`) not one
    /// of the supported values.
    InvalidHyperparameter { name: &'static str, value: f64 },
}

impl core::fmt::Display for KernelError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            KernelError::InvalidHyperparameter { name, value } => {
                write!(f, "invalid kernel hyperparameter {} = {}", name, value)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for KernelError {}

/// Matérn smoothness. Only the closed-form half-integer cases are supported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MaternNu {
    /// ν = 1/2 (exponential / Ornstein–Uhlenbeck).
    Half,
    /// ν = 3/2, once differentiable sample paths.
    ThreeHalves,
    /// ν = 5/2, twice differentiable sample paths.
    FiveHalves,
}

impl TryFrom<f64> for MaternNu {
    type Error = KernelError;

    /// Accepts exactly 0.5, 1.5 or 2.5.
    ///
    /// ```
    /// use gpcore::kernel::MaternNu;
    /// assert_eq!(MaternNu::try_from(1.5).unwrap(), MaternNu::ThreeHalves);
    /// assert!(MaternNu::try_from(2.0).is_err());
    /// ```
    fn try_from(nu: f64) -> Result<Self, Self::Error> {
        match nu {
            n if n == 0.5 => Ok(MaternNu::Half),
            n if n == 1.5 => Ok(MaternNu::ThreeHalves),
            n if n == 2.5 => Ok(MaternNu::FiveHalves),
            _ => Err(KernelError::InvalidHyperparameter {
                name: "nu",
                value: nu,
            }),
        }
    }
}

/// Kernel family plus hyperparameters. Immutable per inference call.
///
/// The variants are public so callers can pattern-match and tweak single
/// fields from UI sliders; anything reaching [`compute_kernel_matrix`] or the
/// GP engine is re-checked with [`Kernel::validate`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Kernel<T> {
    /// Squared exponential.
    Rbf { length_scale: T, variance: T },
    /// Matérn with half-integer smoothness.
    Matern {
        length_scale: T,
        variance: T,
        nu: MaternNu,
    },
    /// Exp-sine-squared.
    Periodic {
        length_scale: T,
        variance: T,
        period: T,
    },
}

impl<T: FloatScalar> Kernel<T> {
    /// RBF kernel. Requires `length_scale > 0`, `variance > 0`.
    pub fn rbf(length_scale: T, variance: T) -> Result<Self, KernelError> {
        let k = Kernel::Rbf {
            length_scale,
            variance,
        };
        k.validate()?;
        Ok(k)
    }

    /// Matérn kernel. Requires `length_scale > 0`, `variance > 0`.
    pub fn matern(length_scale: T, variance: T, nu: MaternNu) -> Result<Self, KernelError> {
        let k = Kernel::Matern {
            length_scale,
            variance,
            nu,
        };
        k.validate()?;
        Ok(k)
    }

    /// Periodic kernel. Requires all three parameters `> 0`.
    pub fn periodic(length_scale: T, variance: T, period: T) -> Result<Self, KernelError> {
        let k = Kernel::Periodic {
            length_scale,
            variance,
            period,
        };
        k.validate()?;
        Ok(k)
    }

    /// Check every hyperparameter is finite and strictly positive.
    pub fn validate(&self) -> Result<(), KernelError> {
        positive("length_scale", self.length_scale())?;
        positive("variance", self.variance())?;
        if let Kernel::Periodic { period, .. } = *self {
            positive("period", period)?;
        }
        Ok(())
    }

    /// Short human-readable name.
    pub fn name(&self) -> &'static str {
        match self {
            Kernel::Rbf { .. } => "RBF",
            Kernel::Matern {
                nu: MaternNu::Half, ..
            } => "Matérn 1/2",
            Kernel::Matern {
                nu: MaternNu::ThreeHalves,
                ..
            } => "Matérn 3/2",
            Kernel::Matern {
                nu: MaternNu::FiveHalves,
                ..
            } => "Matérn 5/2",
            Kernel::Periodic { .. } => "Periodic",
        }
    }

    /// Length scale ℓ.
    pub fn length_scale(&self) -> T {
        match *self {
            Kernel::Rbf { length_scale, .. }
            | Kernel::Matern { length_scale, .. }
            | Kernel::Periodic { length_scale, .. } => length_scale,
        }
    }

    /// Signal variance σ², which is also `k(x, x)`.
    pub fn variance(&self) -> T {
        match *self {
            Kernel::Rbf { variance, .. }
            | Kernel::Matern { variance, .. }
            | Kernel::Periodic { variance, .. } => variance,
        }
    }

    /// Covariance between two inputs.
    #[inline]
    pub fn eval(&self, x1: T, x2: T) -> T {
        match *self {
            Kernel::Rbf {
                length_scale,
                variance,
            } => rbf(x1, x2, length_scale, variance),
            Kernel::Matern {
                length_scale,
                variance,
                nu,
            } => matern(x1, x2, length_scale, variance, nu),
            Kernel::Periodic {
                length_scale,
                variance,
                period,
            } => periodic(x1, x2, length_scale, variance, period),
        }
    }

    /// `[k(x, p) for p in points]`.
    pub fn vector(&self, x: T, points: &[T]) -> Vec<T> {
        points.iter().map(|&p| self.eval(x, p)).collect()
    }

    /// Square kernel matrix `K[i][j] = k(p_i, p_j)`.
    ///
    /// Only the lower triangle is evaluated; the upper one is mirrored, so
    /// the result is exactly symmetric.
    pub fn matrix(&self, points: &[T]) -> DynMatrix<T> {
        let n = points.len();
        let mut k = DynMatrix::zeros(n, n);
        for i in 0..n {
            for j in 0..=i {
                let v = self.eval(points[i], points[j]);
                k[(i, j)] = v;
                k[(j, i)] = v;
            }
        }
        k
    }

    /// Rectangular cross-covariance `K[i][j] = k(a_i, b_j)`.
    pub fn cross_matrix(&self, a: &[T], b: &[T]) -> DynMatrix<T> {
        DynMatrix::from_fn(a.len(), b.len(), |i, j| self.eval(a[i], b[j]))
    }
}

fn positive<T: FloatScalar>(name: &'static str, value: T) -> Result<(), KernelError> {
    if !value.is_finite() || value <= T::zero() {
        return Err(KernelError::InvalidHyperparameter {
            name,
            value: value.to_f64_lossy(),
        });
    }
    Ok(())
}

/// Validated kernel matrix over `points`.
pub fn compute_kernel_matrix<T: FloatScalar>(
    points: &[T],
    kernel: &Kernel<T>,
) -> Result<DynMatrix<T>, KernelError> {
    kernel.validate()?;
    Ok(kernel.matrix(points))
}
