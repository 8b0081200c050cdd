//! Control variate adjustment.

use crate::mc::EstimateResult;

/// Control variate with known expectation.
///
/// The adjustment is `z = target + expected − control`; for the arithmetic Asian call with
/// the geometric Asian call as control this is
/// `z = pArith + geo − pGeo`.
///
/// # Examples
///
/// ```rust
/// use mc_pricing::variance_reduction::ControlVariate;
///
/// let cv = ControlVariate::new(0.25);
/// assert!((cv.adjust(0.30, 0.28) - 0.27).abs() < 1e-12);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ControlVariate {
    expected: f64,
}

impl ControlVariate {
    /// Control variate whose control has expectation `expected`.
    #[inline]
    pub fn new(expected: f64) -> Self {
        Self { expected }
    }

    /// Known expectation of the control.
    #[inline]
    pub fn expected(&self) -> f64 {
        self.expected
    }

    /// Adjusted sample `target + expected − control`.
    #[inline]
    pub fn adjust(&self, target: f64, control: f64) -> f64 {
        target + self.expected - control
    }

    /// Ratio of adjusted to raw sample variance.
    ///
    /// Values below 1 mean the control reduced variance. `None` when the raw
    /// estimate has zero variance.
    pub fn variance_ratio(raw: &EstimateResult, adjusted: &EstimateResult) -> Option<f64> {
        let raw_variance = raw.variance();
        if raw_variance > 0.0 {
            Some(adjusted.variance() / raw_variance)
        } else {
            None
        }
    }
}
