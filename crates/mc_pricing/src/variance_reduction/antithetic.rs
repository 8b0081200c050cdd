//! Antithetic pair averaging.

use crate::mc::Trajectory;
use crate::path_dependent::PathDependentPayoff;

/// Discounted payoffs of a primal trajectory and its antithetic mirror.
///
/// The two payoffs are evaluated independently; a knocked-out leg
/// contributes exactly `0.0` to the average.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AntitheticPair {
    /// Payoff on the +Z trajectory.
    pub primal: f64,
    /// Payoff on the −Z trajectory.
    pub antithetic: f64,
}

impl AntitheticPair {
    /// Pair from two already evaluated payoffs.
    #[inline]
    pub fn new(primal: f64, antithetic: f64) -> Self {
        Self { primal, antithetic }
    }

    /// Evaluates `payoff` on both trajectories.
    #[inline]
    pub fn evaluate<P: PathDependentPayoff<f64>>(
        payoff: &P,
        primal: &Trajectory,
        antithetic: &Trajectory,
        discount: f64,
    ) -> Self {
        Self::new(
            payoff.discounted(primal, discount),
            payoff.discounted(antithetic, discount),
        )
    }

    /// The per-sample value, `(primal + antithetic) / 2`.
    #[inline]
    pub fn average(&self) -> f64 {
        (self.primal + self.antithetic) / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path_dependent::BarrierPayoff;
    use approx::assert_relative_eq;

    #[test]
    fn test_average() {
        assert_relative_eq!(AntitheticPair::new(3.0, 1.0).average(), 2.0);
    }

    #[test]
    fn test_knocked_out_leg_contributes_zero() {
        let payoff = BarrierPayoff::down_out_call(52.0, 49.0);
        let primal = Trajectory::from_observations(vec![55.0, 57.0, 60.0]).unwrap();
        let antithetic = Trajectory::from_observations(vec![55.0, 48.0, 50.0]).unwrap();

        let pair = AntitheticPair::evaluate(&payoff, &primal, &antithetic, 1.0);
        assert_relative_eq!(pair.primal, 8.0);
        assert_eq!(pair.antithetic, 0.0);
        assert_relative_eq!(pair.average(), 4.0);
    }

    #[test]
    fn test_both_legs_knocked_out() {
        let payoff = BarrierPayoff::down_out_call(52.0, 49.0);
        let path = Trajectory::from_observations(vec![55.0, 45.0, 60.0]).unwrap();
        assert_eq!(AntitheticPair::evaluate(&payoff, &path, &path, 0.9).average(), 0.0);
    }
}
