//! Sample reduction: mean, standard deviation and 95% confidence interval.
//!
//! The standard deviation is the population form (divide by M) and the
//! interval is the normal approximation `mean ± 1.96·sd/√M`. Samples are
//! sorted under a total order before summation, so the result is
//! bit-identical for every permutation of the same samples.

use mc_core::{SimulationError, SimulationResult};

/// Two-sided 95% standard normal quantile.
pub const Z_95: f64 = 1.96;

/// Point estimate with a 95% confidence interval.
///
/// # Examples
///
/// ```rust
/// use mc_pricing::mc::EstimateResult;
///
/// let estimate = EstimateResult::from_samples(&[1.0, 2.0, 3.0, 4.0]).unwrap();
/// assert_eq!(estimate.mean(), 2.5);
/// assert!(estimate.contains(2.5));
/// let (low, high) = estimate.confidence_interval();
/// assert!(low < 2.5 && 2.5 < high);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct EstimateResult {
    mean: f64,
    std_dev: f64,
    n_samples: usize,
    confidence_interval: (f64, f64),
}

impl EstimateResult {
    /// Reduces a sample set.
    ///
    /// # Errors
    ///
    /// - `InvalidParameter` if `samples` is empty
    /// - `NumericDomain` if any sample is NaN or infinite
    pub fn from_samples(samples: &[f64]) -> SimulationResult<Self> {
        if samples.is_empty() {
            return Err(SimulationError::invalid_parameter(
                "samples",
                "at least one sample is required",
            ));
        }
        if let Some(&bad) = samples.iter().find(|x| !x.is_finite()) {
            return Err(SimulationError::numeric_domain("payoff sample", bad));
        }

        let mut sorted = samples.to_vec();
        sorted.sort_by(f64::total_cmp);

        let n = sorted.len() as f64;
        let mean = sorted.iter().sum::<f64>() / n;
        let variance = sorted.iter().map(|&x| (x - mean) * (x - mean)).sum::<f64>() / n;
        let std_dev = variance.sqrt();
        let half_width = Z_95 * std_dev / n.sqrt();

        Ok(Self {
            mean,
            std_dev,
            n_samples: sorted.len(),
            confidence_interval: (mean - half_width, mean + half_width),
        })
    }

    /// Reduces a sample set that must contain exactly `expected` samples.
    ///
    /// # Errors
    ///
    /// `SampleCountMismatch` if the count differs, otherwise as
    /// [`from_samples`](Self::from_samples).
    pub fn from_samples_expecting(samples: &[f64], expected: usize) -> SimulationResult<Self> {
        if samples.len() != expected {
            return Err(SimulationError::SampleCountMismatch {
                expected,
                actual: samples.len(),
            });
        }
        Self::from_samples(samples)
    }

    /// Sample mean.
    #[inline]
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Population standard deviation.
    #[inline]
    pub fn std_dev(&self) -> f64 {
        self.std_dev
    }

    /// Population variance.
    #[inline]
    pub fn variance(&self) -> f64 {
        self.std_dev * self.std_dev
    }

    /// Number of aggregated samples (M).
    #[inline]
    pub fn n_samples(&self) -> usize {
        self.n_samples
    }

    /// Standard error of the mean, sd/√M.
    #[inline]
    pub fn std_error(&self) -> f64 {
        self.std_dev / (self.n_samples as f64).sqrt()
    }

    /// `(low, high)` bounds of the 95% interval.
    #[inline]
    pub fn confidence_interval(&self) -> (f64, f64) {
        self.confidence_interval
    }

    /// Half-width of the 95% interval, 1.96·sd/√M.
    #[inline]
    pub fn half_width(&self) -> f64 {
        0.5 * (self.confidence_interval.1 - self.confidence_interval.0)
    }

    /// Whether `value` lies inside the closed 95% interval.
    #[inline]
    pub fn contains(&self, value: f64) -> bool {
        let (low, high) = self.confidence_interval;
        low <= value && value <= high
    }
}

/// Finite-difference delta estimate from a base and a bumped-spot estimate.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DeltaEstimate {
    delta: f64,
    bump: f64,
    n_samples: usize,
    confidence_interval: (f64, f64),
}

impl DeltaEstimate {
    /// Delta from two independently sampled legs.
    ///
    /// `delta = (mean_{S+h} − mean_S) / h`, with interval
    /// `delta ± 1.96·(sd_S + sd_{S+h}) / (h·√M)`.
    ///
    /// # Errors
    ///
    /// - `InvalidParameter` if `bump` is not positive
    /// - `SampleCountMismatch` if the legs have different sample counts
    pub fn from_independent_legs(
        base: &EstimateResult,
        bumped: &EstimateResult,
        bump: f64,
    ) -> SimulationResult<Self> {
        check_bump(bump)?;
        if base.n_samples() != bumped.n_samples() {
            return Err(SimulationError::SampleCountMismatch {
                expected: base.n_samples(),
                actual: bumped.n_samples(),
            });
        }

        let m = base.n_samples() as f64;
        let delta = (bumped.mean() - base.mean()) / bump;
        let half_width = Z_95 * (base.std_dev() + bumped.std_dev()) / (bump * m.sqrt());

        Ok(Self {
            delta,
            bump,
            n_samples: base.n_samples(),
            confidence_interval: (delta - half_width, delta + half_width),
        })
    }

    /// Delta from per-sample differences `bumped_i − base_i` of paired legs.
    ///
    /// The interval is the ordinary 95% interval of the scaled differences.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` if `bump` is not positive, otherwise as
    /// [`EstimateResult::from_samples`].
    pub fn from_paired_differences(differences: &[f64], bump: f64) -> SimulationResult<Self> {
        check_bump(bump)?;
        let scaled: Vec<f64> = differences.iter().map(|d| d / bump).collect();
        let estimate = EstimateResult::from_samples(&scaled)?;

        Ok(Self {
            delta: estimate.mean(),
            bump,
            n_samples: estimate.n_samples(),
            confidence_interval: estimate.confidence_interval(),
        })
    }

    /// Point estimate of delta.
    #[inline]
    pub fn delta(&self) -> f64 {
        self.delta
    }

    /// Spot perturbation h.
    #[inline]
    pub fn bump(&self) -> f64 {
        self.bump
    }

    /// Samples per leg (M).
    #[inline]
    pub fn n_samples(&self) -> usize {
        self.n_samples
    }

    /// `(low, high)` bounds of the 95% interval.
    #[inline]
    pub fn confidence_interval(&self) -> (f64, f64) {
        self.confidence_interval
    }

    /// Half-width of the 95% interval.
    #[inline]
    pub fn half_width(&self) -> f64 {
        0.5 * (self.confidence_interval.1 - self.confidence_interval.0)
    }

    /// Whether `value` lies inside the closed 95% interval.
    #[inline]
    pub fn contains(&self, value: f64) -> bool {
        let (low, high) = self.confidence_interval;
        low <= value && value <= high
    }
}

fn check_bump(bump: f64) -> SimulationResult<()> {
    if bump > 0.0 && bump.is_finite() {
        Ok(())
    } else {
        Err(SimulationError::invalid_parameter(
            "bump",
            format!("must be positive and finite, got {}", bump),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn test_known_statistics() {
        let samples = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let estimate = EstimateResult::from_samples(&samples).unwrap();
        assert_relative_eq!(estimate.mean(), 5.0);
        // Population standard deviation of this set is exactly 2.
        assert_relative_eq!(estimate.std_dev(), 2.0);
        assert_relative_eq!(estimate.variance(), 4.0);
        assert_relative_eq!(estimate.std_error(), 2.0 / 8.0_f64.sqrt());
        assert_relative_eq!(estimate.half_width(), 1.96 * 2.0 / 8.0_f64.sqrt(), epsilon = 1e-12);
        assert_eq!(estimate.n_samples(), 8);
    }

    #[test]
    fn test_single_sample_has_zero_width() {
        let estimate = EstimateResult::from_samples(&[3.5]).unwrap();
        assert_eq!(estimate.mean(), 3.5);
        assert_eq!(estimate.std_dev(), 0.0);
        assert_eq!(estimate.confidence_interval(), (3.5, 3.5));
    }

    #[test]
    fn test_all_zero_payoffs() {
        let estimate = EstimateResult::from_samples(&[0.0; 50]).unwrap();
        assert_eq!(estimate.mean(), 0.0);
        assert_eq!(estimate.half_width(), 0.0);
    }

    #[test]
    fn test_empty_samples_rejected() {
        assert!(matches!(
            EstimateResult::from_samples(&[]),
            Err(SimulationError::InvalidParameter {
                name: "samples",
                ..
            })
        ));
    }

    #[test]
    fn test_non_finite_sample_rejected() {
        assert!(matches!(
            EstimateResult::from_samples(&[1.0, f64::NAN, 2.0]),
            Err(SimulationError::NumericDomain { .. })
        ));
        assert!(EstimateResult::from_samples(&[f64::INFINITY]).is_err());
    }

    #[test]
    fn test_sample_count_mismatch() {
        assert_eq!(
            EstimateResult::from_samples_expecting(&[1.0, 2.0], 3),
            Err(SimulationError::SampleCountMismatch {
                expected: 3,
                actual: 2
            })
        );
        assert!(EstimateResult::from_samples_expecting(&[1.0, 2.0], 2).is_ok());
    }

    #[test]
    fn test_delta_from_independent_legs() {
        let base = EstimateResult::from_samples(&[1.0, 2.0, 3.0, 4.0]).unwrap();
        let bumped = EstimateResult::from_samples(&[0.9, 1.9, 2.9, 3.9]).unwrap();
        let delta = DeltaEstimate::from_independent_legs(&base, &bumped, 0.1).unwrap();

        assert_relative_eq!(delta.delta(), -1.0, epsilon = 1e-12);
        let expected_half = 1.96 * (base.std_dev() + bumped.std_dev()) / (0.1 * 2.0);
        assert_relative_eq!(delta.half_width(), expected_half, epsilon = 1e-12);
        assert!(delta.contains(-1.0));
    }

    #[test]
    fn test_delta_leg_mismatch() {
        let base = EstimateResult::from_samples(&[1.0, 2.0]).unwrap();
        let bumped = EstimateResult::from_samples(&[1.0]).unwrap();
        assert!(matches!(
            DeltaEstimate::from_independent_legs(&base, &bumped, 0.1),
            Err(SimulationError::SampleCountMismatch { .. })
        ));
    }

    #[test]
    fn test_delta_from_paired_differences() {
        let delta = DeltaEstimate::from_paired_differences(&[-0.04, -0.04, -0.04], 0.1).unwrap();
        assert_relative_eq!(delta.delta(), -0.4, epsilon = 1e-12);
        assert_relative_eq!(delta.half_width(), 0.0, epsilon = 1e-12);
        assert_eq!(delta.bump(), 0.1);
    }

    #[test]
    fn test_delta_rejects_bad_bump() {
        assert!(DeltaEstimate::from_paired_differences(&[0.1], 0.0).is_err());
    }

    proptest! {
        #[test]
        fn prop_permutation_invariant(
            samples in prop::collection::vec(-1e3_f64..1e3, 1..200),
            seed in any::<u64>(),
        ) {
            use rand::seq::SliceRandom;
            use rand::SeedableRng;

            let mut shuffled = samples.clone();
            shuffled.shuffle(&mut rand::rngs::StdRng::seed_from_u64(seed));

            let a = EstimateResult::from_samples(&samples).unwrap();
            let b = EstimateResult::from_samples(&shuffled).unwrap();
            prop_assert_eq!(a, b);
        }

        #[test]
        fn prop_interval_brackets_mean(samples in prop::collection::vec(0.0_f64..100.0, 1..200)) {
            let estimate = EstimateResult::from_samples(&samples).unwrap();
            let (low, high) = estimate.confidence_interval();
            prop_assert!(low <= estimate.mean() && estimate.mean() <= high);
            prop_assert!(estimate.std_dev() >= 0.0);
        }
    }
}
