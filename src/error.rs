use crate::kernel::KernelError;
use crate::linalg::LinalgError;

/// Errors surfaced by the GP engine, the regression model and the session.
///
/// Linear-algebra failures inside posterior inference never reach the caller
/// (they fall back to the prior); the `Linalg` variant is produced only by
/// operations with no meaningful fallback, such as
/// [`log_marginal_likelihood`](crate::gp::log_marginal_likelihood).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GpError {
    Linalg(LinalgError),
    Kernel(KernelError),
    /// Observation noise variance is negative or non-finite.
    InvalidNoise { value: f64 },
    /// Prior weight variance of the linear model is not finite and positive.
    InvalidPrior { value: f64 },
    /// An input value is NaN or infinite. `name` identifies the argument.
    NonFiniteInput { name: &'static str, index: usize },
}

impl From<LinalgError> for GpError {
    fn from(e: LinalgError) -> Self {
        GpError::Linalg(e)
    }
}

impl From<KernelError> for GpError {
    fn from(e: KernelError) -> Self {
        GpError::Kernel(e)
    }
}

impl core::fmt::Display for GpError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            GpError::Linalg(e) => write!(f, "{}", e),
            GpError::Kernel(e) => write!(f, "{}", e),
            GpError::InvalidNoise { value } => {
                write!(f, "noise variance must be finite and non-negative, got {}", value)
            }
            GpError::InvalidPrior { value } => {
                write!(f, "prior variance must be finite and positive, got {}", value)
            }
            GpError::NonFiniteInput { name, index } => {
                write!(f, "non-finite value in {} at index {}", name, index)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for GpError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GpError::Linalg(e) => Some(e),
            GpError::Kernel(e) => Some(e),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn propagate() -> Result<(), GpError> {
        let inner: Result<(), LinalgError> = Err(LinalgError::NumericalDegeneracy);
        inner?;
        Ok(())
    }

    #[test]
    fn question_mark_converts() {
        assert_eq!(
            propagate().unwrap_err(),
            GpError::Linalg(LinalgError::NumericalDegeneracy)
        );
    }

    #[test]
    fn display() {
        let e = GpError::NonFiniteInput {
            name: "query",
            index: 3,
        };
        assert_eq!(alloc::format!("{}", e), "non-finite value in query at index 3");
        let e: GpError = KernelError::InvalidHyperparameter {
            name: "variance",
            value: 0.0,
        }
        .into();
        assert_eq!(
            alloc::format!("{}", e),
            "invalid kernel hyperparameter variance = 0"
        );
    }
}
