use core::fmt::Debug;
use num_traits::{Float, Num, One, Zero};

/// Trait for types that can be used as matrix elements.
///
/// Blanket-implemented for all types satisfying the bounds.
/// Covers `f32`, `f64`, and all integer types.
pub trait Scalar: Copy + PartialEq + Debug + Zero + One + Num {}

impl<T: Copy + PartialEq + Debug + Zero + One + Num> Scalar for T {}

/// Trait for floating-point elements used by the decompositions, kernels and
/// the GP engine.
///
/// Implemented for `f32` and `f64`. Adds an infallible conversion from `f64`
/// literals so numerical constants (jitter, pivot floors, √3, …) can be
/// written once for both precisions.
pub trait FloatScalar: Scalar + Float {
    /// Convert an `f64` constant into `Self` (rounding for `f32`).
    fn lit(x: f64) -> Self;

    /// Widen to `f64`, used for logging and error payloads.
    fn to_f64_lossy(self) -> f64;
}

macro_rules! impl_float_scalar {
    ($($t:ty),*) => {
        $(
            impl FloatScalar for $t {
                #[inline] fn lit(x: f64) -> $t { x as $t }
                #[inline] fn to_f64_lossy(self) -> f64 { self as f64 }
            }
        )*
    };
}

impl_float_scalar!(f32, f64);

/// Read-only access to a matrix-like type.
///
/// The triangular solves and the Cholesky factorization are written against
/// this trait so they accept any row/column addressable storage.
pub trait MatrixRef<T> {
    fn nrows(&self) -> usize;
    fn ncols(&self) -> usize;
    fn get(&self, row: usize, col: usize) -> &T;
}
