//! Discretely monitored geometric-average Asian call.
//!
//! The geometric mean of equally spaced lognormal observations is itself
//! lognormal, which gives a Black-Scholes-type closed form. Two grids are
//! covered.
//!
//! [`geometric_asian_call`] averages the N fixing dates S_Δt, …, S_T and
//! leaves the spot out:
//!
//! ```text
//! σ²_eff·T = σ²T(N+1)(2N+1) / (6N²)
//! μ_eff·T  = ½σ²_eff·T + (r − ½σ²)T(N+1) / (2N)
//! d₁ = (ln(S/E) + μ_eff·T + ½σ²_eff·T) / √(σ²_eff·T)
//! d₂ = d₁ − √(σ²_eff·T)
//! G  = e^(−rT)·(S·e^(μ_eff·T)·Φ(d₁) − E·Φ(d₂))
//! ```
//!
//! [`geometric_asian_call_including_spot`] averages all N + 1 points
//! S₀, S_Δt, …, S_T, which is what the simulated payoff observes:
//!
//! ```text
//! σ²_eff·T = σ²T(2N+1) / (6(N+1))
//! μ_eff·T  = ½σ²_eff·T + ½(r − ½σ²)T
//! ```
//!
//! The two differ by O(1/N). The control-variate estimator uses the first
//! as its expectation, so its mean sits [`control_bias`] away from the
//! crude arithmetic estimate. As N → ∞ both effective variances tend to
//! σ²T/3, the continuous Kemna-Vorst limit.

use mc_core::math::norm_cdf;
use mc_core::SimulationParameters;

/// Geometric Asian price with intermediate quantities.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct GeometricAsianResult {
    /// Option value.
    pub price: f64,
    /// Effective total variance σ²_eff·T.
    pub effective_variance: f64,
    /// Effective total log-drift μ_eff·T.
    pub effective_drift: f64,
    /// d₁ term.
    pub d1: f64,
    /// d₂ term.
    pub d2: f64,
}

/// Geometric Asian call on the N fixing dates after the spot.
///
/// This is the control-variate expectation used by the Asian scenario.
///
/// # Examples
///
/// ```rust
/// use mc_core::SimulationParameters;
/// use mc_pricing::analytical::geometric_asian_call;
///
/// let params = SimulationParameters::builder()
///     .spot(4.0)
///     .strike(4.0)
///     .volatility(0.25)
///     .rate(0.03)
///     .maturity(1.0)
///     .time_step(0.01)
///     .n_samples(10_000)
///     .build()
///     .unwrap();
///
/// let geo = geometric_asian_call(&params);
/// assert!((geo.price - 0.2460).abs() < 1e-4);
/// ```
pub fn geometric_asian_call(params: &SimulationParameters) -> GeometricAsianResult {
    let n = params.n_steps() as f64;
    let sigma = params.volatility();
    let t = params.maturity();
    let r = params.rate();

    let effective_variance = sigma * sigma * t * (n + 1.0) * (2.0 * n + 1.0) / (6.0 * n * n);
    let effective_drift =
        0.5 * effective_variance + (r - 0.5 * sigma * sigma) * t * (n + 1.0) / (2.0 * n);

    lognormal_call(params, effective_variance, effective_drift)
}

/// Geometric Asian call averaging all `n_steps + 1` observations,
/// the spot included.
///
/// This is the expectation of the discounted geometric payoff evaluated
/// on simulated trajectories.
pub fn geometric_asian_call_including_spot(params: &SimulationParameters) -> GeometricAsianResult {
    let n = params.n_steps() as f64;
    let sigma = params.volatility();
    let t = params.maturity();
    let r = params.rate();

    let effective_variance = sigma * sigma * t * (2.0 * n + 1.0) / (6.0 * (n + 1.0));
    let effective_drift = 0.5 * effective_variance + 0.5 * (r - 0.5 * sigma * sigma) * t;

    lognormal_call(params, effective_variance, effective_drift)
}

/// Offset of the control-variate mean from the arithmetic expectation.
///
/// Equals [`geometric_asian_call`] minus
/// [`geometric_asian_call_including_spot`]. Positive for an at-the-money
/// call, and about 0.0027 at the default 100-step grid.
pub fn control_bias(params: &SimulationParameters) -> f64 {
    geometric_asian_call(params).price - geometric_asian_call_including_spot(params).price
}

fn lognormal_call(
    params: &SimulationParameters,
    effective_variance: f64,
    effective_drift: f64,
) -> GeometricAsianResult {
    let vol = effective_variance.sqrt();
    let d1 = ((params.spot() / params.strike()).ln() + effective_drift + 0.5 * effective_variance)
        / vol;
    let d2 = d1 - vol;

    let price = params.discount_factor()
        * (params.spot() * effective_drift.exp() * norm_cdf(d1)
            - params.strike() * norm_cdf(d2));

    GeometricAsianResult {
        price,
        effective_variance,
        effective_drift,
        d1,
        d2,
    }
}
