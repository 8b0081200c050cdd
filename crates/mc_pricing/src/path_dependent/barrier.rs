//! Down-and-out barrier call with discrete monitoring.
//!
//! The barrier is checked against every observation of the trajectory,
//! including the initial spot. Touching the barrier counts as a hit, so the
//! option stays alive only while every observation is strictly above B.
//! A knocked-out payoff is exactly `0.0`.

use super::{OptionKind, PathDependentPayoff, PathObserver};
use num_traits::Float;

/// Down-and-out call payoff.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BarrierPayoff<T: Float> {
    /// Strike price (E).
    pub strike: T,
    /// Barrier level (B).
    pub barrier: T,
}

impl<T: Float> BarrierPayoff<T> {
    /// Down-and-out call with strike `strike` and barrier `barrier`.
    #[inline]
    pub fn down_out_call(strike: T, barrier: T) -> Self {
        Self { strike, barrier }
    }

    /// Whether some observation is at or below the barrier.
    #[inline]
    pub fn is_knocked_out(&self, observer: &PathObserver<T>) -> bool {
        observer.minimum() <= self.barrier
    }
}

impl<T: Float + Send + Sync> PathDependentPayoff<T> for BarrierPayoff<T> {
    #[inline]
    fn intrinsic(&self, observer: &PathObserver<T>) -> T {
        if self.is_knocked_out(observer) {
            T::zero()
        } else {
            OptionKind::Call.intrinsic(observer.terminal(), self.strike)
        }
    }
}
