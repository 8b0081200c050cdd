//! PathPayoffType enum for static dispatch over every supported payoff.

use super::{
    AsianArithmeticPayoff, AsianGeometricPayoff, BarrierPayoff, EuropeanPayoff,
    PathDependentPayoff, PathObserver,
};
use num_traits::Float;

/// Unified payoff enum.
///
/// The samplers hold one of these instead of a trait object, keeping the
/// per-sample evaluation monomorphic.
///
/// # Examples
///
/// ```rust
/// use mc_pricing::mc::Trajectory;
/// use mc_pricing::path_dependent::{PathDependentPayoff, PathPayoffType};
///
/// let payoff = PathPayoffType::barrier_down_out_call(52.0, 49.0);
/// let path = Trajectory::from_observations(vec![55.0, 48.0, 60.0]).unwrap();
/// assert_eq!(payoff.discounted(&path, 1.0), 0.0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PathPayoffType<T: Float> {
    /// Terminal-only European payoff.
    European(EuropeanPayoff<T>),
    /// Arithmetic-average Asian payoff.
    AsianArithmetic(AsianArithmeticPayoff<T>),
    /// Geometric-average Asian payoff.
    AsianGeometric(AsianGeometricPayoff<T>),
    /// Discretely monitored down-and-out call.
    Barrier(BarrierPayoff<T>),
}

impl<T: Float + Send + Sync> PathPayoffType<T> {
    // ========================================================================
    // Constructors
    // ========================================================================

    /// European call.
    #[inline]
    pub fn european_call(strike: T) -> Self {
        Self::European(EuropeanPayoff::call(strike))
    }

    /// European put.
    #[inline]
    pub fn european_put(strike: T) -> Self {
        Self::European(EuropeanPayoff::put(strike))
    }

    /// Arithmetic-average Asian call.
    #[inline]
    pub fn asian_arithmetic_call(strike: T) -> Self {
        Self::AsianArithmetic(AsianArithmeticPayoff::call(strike))
    }

    /// Geometric-average Asian call.
    #[inline]
    pub fn asian_geometric_call(strike: T) -> Self {
        Self::AsianGeometric(AsianGeometricPayoff::call(strike))
    }

    /// Down-and-out barrier call.
    #[inline]
    pub fn barrier_down_out_call(strike: T, barrier: T) -> Self {
        Self::Barrier(BarrierPayoff::down_out_call(strike, barrier))
    }
}

impl<T: Float + Send + Sync> PathDependentPayoff<T> for PathPayoffType<T> {
    #[inline]
    fn intrinsic(&self, observer: &PathObserver<T>) -> T {
        match self {
            PathPayoffType::European(payoff) => payoff.intrinsic(observer),
            PathPayoffType::AsianArithmetic(payoff) => payoff.intrinsic(observer),
            PathPayoffType::AsianGeometric(payoff) => payoff.intrinsic(observer),
            PathPayoffType::Barrier(payoff) => payoff.intrinsic(observer),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path_dependent::tests::trajectory;
    use approx::assert_relative_eq;

    #[test]
    fn test_dispatch_matches_concrete_payoffs() {
        let path = trajectory(&[4.0, 4.5, 5.5, 4.8]);
        let direct = AsianArithmeticPayoff::call(4.0).discounted(&path, 0.97);
        let dispatched = PathPayoffType::asian_arithmetic_call(4.0).discounted(&path, 0.97);
        assert_relative_eq!(direct, dispatched);

        let direct = AsianGeometricPayoff::call(4.0).discounted(&path, 0.97);
        let dispatched = PathPayoffType::asian_geometric_call(4.0).discounted(&path, 0.97);
        assert_relative_eq!(direct, dispatched);
    }

    #[test]
    fn test_european_variants() {
        let path = trajectory(&[50.0, 53.0]);
        assert_relative_eq!(PathPayoffType::european_call(52.0).discounted(&path, 1.0), 1.0);
        assert_eq!(PathPayoffType::european_put(52.0).discounted(&path, 1.0), 0.0);
    }
}
