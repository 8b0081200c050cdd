//! Down-and-out call closed form.
//!
//! Continuous monitoring (Reiner-Rubinstein), with λ = (r + σ²/2)/σ²:
//!
//! - **E ≥ B**: C_do = C − C_di, where
//!   C_di = S(B/S)^(2λ)·Φ(y) − E·e^(−rT)·(B/S)^(2λ−2)·Φ(y − σ√T),
//!   y = ln(B²/(S·E))/(σ√T) + λσ√T
//! - **E < B**: C_do = S·Φ(x₁) − E·e^(−rT)·Φ(x₁ − σ√T)
//!   − S(B/S)^(2λ)·Φ(y₁) + E·e^(−rT)·(B/S)^(2λ−2)·Φ(y₁ − σ√T),
//!   x₁ = ln(S/B)/(σ√T) + λσ√T, y₁ = ln(B/S)/(σ√T) + λσ√T
//!
//! A simulation only checks the barrier at the N + 1 grid points, so it
//! prices a slightly more valuable option. The Broadie-Glasserman-Kou shift
//! B → B·exp(−β·σ√Δt), β = ζ(½)/√(2π) ≈ 0.5826, maps the discrete contract
//! onto a continuous one.

use super::BlackScholes;
use mc_core::math::norm_cdf;
use mc_core::{SimulationParameters, SimulationResult};

/// −ζ(½)/√(2π)
const BGK_BETA: f64 = 0.5826;

/// Barrier level of the continuous contract equivalent to discrete monitoring
/// of a down barrier at spacing `dt`.
#[inline]
pub fn discrete_barrier_shift(barrier: f64, volatility: f64, dt: f64) -> f64 {
    barrier * (-BGK_BETA * volatility * dt.sqrt()).exp()
}

/// Continuously monitored down-and-out call with barrier `barrier`.
///
/// Spot, strike, rate, volatility and maturity are taken from `params`;
/// the barrier is explicit so shifted levels can be priced. A spot at or
/// below the barrier is already knocked out and prices at zero.
pub fn down_out_call(params: &SimulationParameters, barrier: f64) -> f64 {
    let s = params.spot();
    let k = params.strike();
    let h = barrier;
    let r = params.rate();
    let sigma = params.volatility();
    let t = params.maturity();

    if s <= h {
        return 0.0;
    }

    let vol_sqrt_t = sigma * t.sqrt();
    let lambda = (r + 0.5 * sigma * sigma) / (sigma * sigma);
    let discount = params.discount_factor();
    let ratio = h / s;
    let reflect_spot = ratio.powf(2.0 * lambda);
    let reflect_strike = ratio.powf(2.0 * lambda - 2.0);

    let price = if k >= h {
        let vanilla = BlackScholes::from_params(params).price_call(k, t);
        let y = (h * h / (s * k)).ln() / vol_sqrt_t + lambda * vol_sqrt_t;
        let knock_in = s * reflect_spot * norm_cdf(y)
            - k * discount * reflect_strike * norm_cdf(y - vol_sqrt_t);
        vanilla - knock_in
    } else {
        let x1 = (s / h).ln() / vol_sqrt_t + lambda * vol_sqrt_t;
        let y1 = (h / s).ln() / vol_sqrt_t + lambda * vol_sqrt_t;
        s * norm_cdf(x1)
            - k * discount * norm_cdf(x1 - vol_sqrt_t)
            - s * reflect_spot * norm_cdf(y1)
            + k * discount * reflect_strike * norm_cdf(y1 - vol_sqrt_t)
    };

    price.max(0.0)
}

/// Down-and-out call monitored at the `n_steps + 1` simulation dates,
/// approximated by the continuous formula at the shifted barrier.
///
/// # Errors
///
/// Returns `SimulationError::InvalidParameter` if `params` carries no barrier.
pub fn down_out_call_discrete(params: &SimulationParameters) -> SimulationResult<f64> {
    let barrier = params.require_barrier()?;
    let shifted = discrete_barrier_shift(barrier, params.volatility(), params.dt());
    Ok(down_out_call(params, shifted))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn barrier_params(strike: f64) -> SimulationParameters {
        SimulationParameters::builder()
            .spot(55.0)
            .strike(strike)
            .volatility(0.1)
            .rate(0.06)
            .maturity(1.0)
            .n_steps(100)
            .n_samples(5000)
            .barrier(49.0)
            .build()
            .unwrap()
    }

    #[test]
    fn test_continuous_reference_value() {
        let params = barrier_params(52.0);
        assert_relative_eq!(down_out_call(&params, 49.0), 6.262_656_071_441_833, epsilon = 1e-5);
    }

    #[test]
    fn test_discrete_reference_value() {
        let params = barrier_params(52.0);
        assert_relative_eq!(
            down_out_call_discrete(&params).unwrap(),
            6.284_123_045_958_776,
            epsilon = 1e-5
        );
    }

    #[test]
    fn test_bounded_by_vanilla() {
        let params = barrier_params(52.0);
        let vanilla = BlackScholes::from_params(&params).price_call(52.0, 1.0);
        let continuous = down_out_call(&params, 49.0);
        let discrete = down_out_call_discrete(&params).unwrap();
        assert!(continuous < discrete);
        assert!(discrete < vanilla);
    }

    #[test]
    fn test_remote_barrier_recovers_vanilla() {
        let params = barrier_params(52.0);
        let vanilla = BlackScholes::from_params(&params).price_call(52.0, 1.0);
        assert_relative_eq!(down_out_call(&params, 5.0), vanilla, epsilon = 1e-9);
    }

    #[test]
    fn test_branches_agree_at_strike_equal_barrier() {
        let at = down_out_call(&barrier_params(49.0), 49.0);
        let strike_below = down_out_call(&barrier_params(49.0 - 1e-9), 49.0);
        assert_relative_eq!(at, strike_below, epsilon = 1e-6);
    }

    #[test]
    fn test_knocked_out_at_inception() {
        let params = barrier_params(52.0);
        assert_eq!(down_out_call(&params, 55.0), 0.0);
    }

    #[test]
    fn test_shift_lowers_down_barrier() {
        let shifted = discrete_barrier_shift(49.0, 0.1, 0.01);
        assert!(shifted < 49.0);
        assert_relative_eq!(shifted, 49.0 * (-0.005826_f64).exp(), epsilon = 1e-12);
    }
}
