//! Scenario reports: Monte Carlo estimates next to their closed-form references.

use super::estimator::{DeltaEstimate, EstimateResult};
use super::sampler::DeltaMode;

/// European put and call from a single set of terminal draws.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct EuropeanReport {
    /// Put estimate.
    pub put: EstimateResult,
    /// Black-Scholes put.
    pub bs_put: f64,
    /// Call estimate.
    pub call: EstimateResult,
    /// Black-Scholes call.
    pub bs_call: f64,
    /// Run seed.
    pub seed: u64,
}

/// Finite-difference put delta.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DeltaReport {
    /// Delta estimate and interval.
    pub delta: DeltaEstimate,
    /// Put estimate at spot S.
    pub base: EstimateResult,
    /// Put estimate at spot S + h.
    pub bumped: EstimateResult,
    /// Closed-form put delta Φ(d₁) − 1.
    pub closed_form: f64,
    /// Draw-sharing mode of the two legs.
    pub mode: DeltaMode,
    /// Run seed.
    pub seed: u64,
}

/// Arithmetic Asian call, crude and with the geometric control variate.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct AsianReport {
    /// Crude Monte Carlo estimate.
    pub crude: EstimateResult,
    /// Control-variate estimate from the same trajectories.
    pub control_variate: EstimateResult,
    /// Geometric Asian closed form on the fixing dates (the control expectation).
    pub geometric_closed_form: f64,
    /// Geometric Asian closed form on the simulated grid, spot included.
    pub geometric_grid_closed_form: f64,
    /// Expected offset of the control-variate mean from the crude mean.
    pub control_bias: f64,
    /// Plain Monte Carlo estimate of the geometric Asian call.
    pub geometric: EstimateResult,
    /// Adjusted over crude variance, when defined.
    pub variance_ratio: Option<f64>,
    /// Run seed.
    pub seed: u64,
}

/// Down-and-out call.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct BarrierReport {
    /// Estimate (per trajectory, or per antithetic pair).
    pub estimate: EstimateResult,
    /// Whether samples are antithetic pair averages.
    pub antithetic: bool,
    /// Continuous-monitoring closed form at the shifted (discrete-equivalent) barrier.
    pub closed_form_discrete: f64,
    /// Continuous-monitoring closed form at the contractual barrier.
    pub closed_form_continuous: f64,
    /// Run seed.
    pub seed: u64,
}
