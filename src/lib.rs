//! # gpcore
//!
//! Exact Gaussian process regression over scalar inputs, with the kernels,
//! small dense linear algebra, sampling and acquisition functions needed by
//! interactive ML visualizations. No-std compatible (requires `alloc`).
//!
//! ## Quick start
//!
//! ```
//! use gpcore::{compute_gp_posterior, linspace, Kernel, Observation};
//!
//! let kernel = Kernel::rbf(0.3_f64, 1.0).unwrap();
//! let obs = [Observation::new(-1.0, 1.0), Observation::new(1.0, -1.0)];
//! let grid = linspace(-2.0, 2.0, 81);
//!
//! let post = compute_gp_posterior(&grid, &obs, &kernel, 0.05).unwrap();
//! let (lower, upper) = post.band(2.0);
//! assert_eq!(lower.len(), 81);
//! assert!(upper[40] > lower[40]);
//! ```
//!
//! ## Modules
//!
//! - [`dynmatrix`]: heap-allocated, row-major `DynMatrix<T>` with checked
//!   products, transpose and diagonal updates.
//!
//! - [`linalg`]: Cholesky–Banachiewicz factorization with a clamped pivot
//!   floor, forward/back substitution, the [`linalg::Cholesky`] wrapper, and
//!   a closed-form 2×2 inverse.
//!
//! - [`kernel`]: RBF, Matérn (ν = ½, 3/2, 5/2) and periodic covariance
//!   functions behind the validated [`Kernel`] enum.
//!
//! - [`gp`]: posterior mean/variance, full posterior covariance, prior and
//!   posterior function samples, and log marginal likelihood. Numerical
//!   failures fall back to the prior.
//!
//! - [`acquisition`]: UCB, expected improvement and probability of
//!   improvement, plus grid argmax via [`acquisition::suggest_next`].
//!
//! - [`regression`]: conjugate Bayesian linear regression on `[1, x]`.
//!
//! - [`session`]: [`session::GpSession`], an editable observation set with
//!   kernel, noise and seed.
//!
//! - [`sampling`]: Box–Muller normals and multivariate normal draws from an
//!   injected [`rand::Rng`].
//!
//! - [`stats`]: [`stats::Normal`] and the erf-based Φ, φ, Φ⁻¹ helpers.
//!
//! - [`traits`]: element trait hierarchy:
//!   - [`Scalar`]: all matrix elements (`Copy + PartialEq + Debug + Zero + One + Num`)
//!   - [`FloatScalar`]: `f32` / `f64`, used by every numerical routine
//!   - [`MatrixRef`]: generic read access for algorithms
//!
//! ## Logging
//!
//! Diagnostics go through the [`log`] facade; no logger is installed here.
//! Clamped Cholesky pivots are reported at `trace`, the 2×2 singular fallback
//! and session edits at `debug`, and GP fallbacks to the prior at `warn`.
//!
//! ## Cargo features
//!
//! | Feature | Default  | Description |
//! |---------|----------|-------------|
//! | `std`   | yes      | Hardware FPU via system libm, `std::error::Error` impls |
//! | `libm`  | baseline | Pure-Rust software float fallback |
//! | `serde` | no       | `Serialize`/`Deserialize` for kernels, observations, posteriors, sessions |
//! | `all`   | no       | `std` + `serde` |

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod acquisition;
pub mod dynmatrix;
pub mod error;
pub mod gp;
pub mod kernel;
pub mod linalg;
pub mod regression;
pub mod sampling;
pub mod session;
pub mod stats;
pub mod traits;

pub use acquisition::{Acquisition, Suggestion};
pub use dynmatrix::{dot, linspace, DynMatrix};
pub use error::GpError;
pub use gp::{
    compute_gp_posterior, log_marginal_likelihood, posterior_covariance, prior, sample_posterior,
    sample_prior, Observation, Posterior,
};
pub use kernel::{compute_kernel_matrix, Kernel, KernelError, MaternNu};
pub use linalg::LinalgError;
pub use regression::{BayesianLinearRegression, LinearPosterior};
pub use session::GpSession;
pub use traits::{FloatScalar, MatrixRef, Scalar};
