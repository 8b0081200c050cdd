//! PathDependentPayoff trait and the call/put direction shared by all payoffs.

use super::PathObserver;
use crate::mc::Trajectory;
use num_traits::Float;

/// Direction of an option payoff.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum OptionKind {
    /// Pays `max(underlying − strike, 0)`.
    Call,
    /// Pays `max(strike − underlying, 0)`.
    Put,
}

impl OptionKind {
    /// Undiscounted intrinsic value against `strike`.
    ///
    /// Out-of-the-money (and at-the-money) inputs return exactly `0.0`, never `-0.0`.
    #[inline]
    pub fn intrinsic<T: Float>(self, underlying: T, strike: T) -> T {
        let moneyness = match self {
            OptionKind::Call => underlying - strike,
            OptionKind::Put => strike - underlying,
        };
        if moneyness > T::zero() {
            moneyness
        } else {
            T::zero()
        }
    }
}

/// Payoff computed from the streaming statistics of one trajectory.
///
/// Implementors only define the undiscounted [`intrinsic`](Self::intrinsic)
/// value; [`discounted`](Self::discounted) applies `exp(−rT)` and is what
/// the samplers record as one payoff sample. Payoffs are only ever valued
/// on a [`Trajectory`], whose observations are known to be positive.
pub trait PathDependentPayoff<T: Float>: Send + Sync {
    /// Undiscounted payoff given the path statistics.
    fn intrinsic(&self, observer: &PathObserver<T>) -> T;

    /// Discounted payoff of `trajectory`: `discount · intrinsic`.
    #[inline]
    fn discounted(&self, trajectory: &Trajectory<T>, discount: T) -> T {
        discount * self.intrinsic(&PathObserver::from_trajectory(trajectory))
    }
}
