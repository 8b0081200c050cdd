//! European option payoff: depends on the terminal observation only.

use super::{OptionKind, PathDependentPayoff, PathObserver};
use num_traits::Float;

/// European call or put.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EuropeanPayoff<T: Float> {
    /// Strike price (E).
    pub strike: T,
    /// Call or put.
    pub kind: OptionKind,
}

impl<T: Float> EuropeanPayoff<T> {
    /// European call with the given strike.
    #[inline]
    pub fn call(strike: T) -> Self {
        Self {
            strike,
            kind: OptionKind::Call,
        }
    }

    /// European put with the given strike.
    #[inline]
    pub fn put(strike: T) -> Self {
        Self {
            strike,
            kind: OptionKind::Put,
        }
    }

    /// Undiscounted payoff given only the terminal price.
    #[inline]
    pub fn intrinsic_at(&self, terminal: T) -> T {
        self.kind.intrinsic(terminal, self.strike)
    }
}

impl<T: Float + Send + Sync> PathDependentPayoff<T> for EuropeanPayoff<T> {
    #[inline]
    fn intrinsic(&self, observer: &PathObserver<T>) -> T {
        self.intrinsic_at(observer.terminal())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path_dependent::tests::trajectory;
    use approx::assert_relative_eq;

    #[test]
    fn test_european_uses_terminal_only() {
        let payoff = EuropeanPayoff::call(52.0);
        // Intermediate excursions are irrelevant.
        let path = trajectory(&[50.0, 80.0, 10.0, 55.0]);
        assert_relative_eq!(payoff.discounted(&path, 1.0), 3.0);
    }

    #[test]
    fn test_european_put_discounting() {
        let payoff = EuropeanPayoff::put(52.0);
        let discount = (-0.06_f64).exp();
        let path = trajectory(&[50.0, 49.0]);
        assert_relative_eq!(payoff.discounted(&path, discount), 3.0 * discount);
    }
}
