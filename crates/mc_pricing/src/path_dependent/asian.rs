//! Asian option payoffs on the average of all observations.
//!
//! - **Arithmetic Asian**: `max(mean(obs) − E, 0)`
//! - **Geometric Asian**: `max(exp(mean(ln obs)) − E, 0)`
//!
//! The average runs over every observation including the initial spot, i.e.
//! N + 1 points for N steps. The matching geometric closed form is
//! [`crate::analytical::geometric_asian_call_including_spot`].

use super::{OptionKind, PathDependentPayoff, PathObserver};
use num_traits::Float;

/// Asian call on the arithmetic average.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AsianArithmeticPayoff<T: Float> {
    /// Strike price (E).
    pub strike: T,
}

impl<T: Float> AsianArithmeticPayoff<T> {
    /// Arithmetic average-price call.
    #[inline]
    pub fn call(strike: T) -> Self {
        Self { strike }
    }
}

impl<T: Float + Send + Sync> PathDependentPayoff<T> for AsianArithmeticPayoff<T> {
    #[inline]
    fn intrinsic(&self, observer: &PathObserver<T>) -> T {
        OptionKind::Call.intrinsic(observer.arithmetic_average(), self.strike)
    }
}

/// Asian call on the geometric average.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AsianGeometricPayoff<T: Float> {
    /// Strike price (E).
    pub strike: T,
}

impl<T: Float> AsianGeometricPayoff<T> {
    /// Geometric average-price call.
    #[inline]
    pub fn call(strike: T) -> Self {
        Self { strike }
    }
}

impl<T: Float + Send + Sync> PathDependentPayoff<T> for AsianGeometricPayoff<T> {
    #[inline]
    fn intrinsic(&self, observer: &PathObserver<T>) -> T {
        OptionKind::Call.intrinsic(observer.geometric_average(), self.strike)
    }
}
