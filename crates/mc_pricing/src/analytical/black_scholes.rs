//! Black-Scholes prices and deltas for European options.
//!
//! ## Formulas
//!
//! - d₁ = (ln(S/E) + (r + σ²/2)T) / (σ√T), d₂ = d₁ − σ√T
//! - **Call**: C = S·Φ(d₁) − E·e^(−rT)·Φ(d₂)
//! - **Put**: P = E·e^(−rT)·(1 − Φ(d₂)) + S·(Φ(d₁) − 1)
//! - **Call delta**: Φ(d₁); **Put delta**: Φ(d₁) − 1

use mc_core::math::norm_cdf;
use mc_core::{SimulationError, SimulationParameters, SimulationResult};

/// Black-Scholes model for a non-dividend-paying underlying.
///
/// # Examples
///
/// ```rust
/// use mc_pricing::analytical::BlackScholes;
///
/// let bs = BlackScholes::new(50.0, 0.06, 0.1).unwrap();
/// let call = bs.price_call(52.0, 1.0);
/// let put = bs.price_put(52.0, 1.0);
///
/// // Put-call parity: C − P = S − E·e^(−rT)
/// let parity = 50.0 - 52.0 * (-0.06_f64).exp();
/// assert!((call - put - parity).abs() < 1e-6);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BlackScholes {
    spot: f64,
    rate: f64,
    volatility: f64,
}

impl BlackScholes {
    /// Creates a model, rejecting non-positive spot or volatility.
    pub fn new(spot: f64, rate: f64, volatility: f64) -> SimulationResult<Self> {
        if !(spot > 0.0 && spot.is_finite()) {
            return Err(SimulationError::invalid_parameter(
                "spot",
                format!("must be positive and finite, got {}", spot),
            ));
        }
        if !(volatility > 0.0 && volatility.is_finite()) {
            return Err(SimulationError::invalid_parameter(
                "volatility",
                format!("must be positive and finite, got {}", volatility),
            ));
        }
        if !rate.is_finite() {
            return Err(SimulationError::invalid_parameter(
                "rate",
                format!("must be finite, got {}", rate),
            ));
        }
        Ok(Self {
            spot,
            rate,
            volatility,
        })
    }

    /// Model for the spot, rate and volatility of validated run parameters.
    #[inline]
    pub fn from_params(params: &SimulationParameters) -> Self {
        Self {
            spot: params.spot(),
            rate: params.rate(),
            volatility: params.volatility(),
        }
    }

    /// Returns the spot price.
    #[inline]
    pub fn spot(&self) -> f64 {
        self.spot
    }

    /// d₁ for the given strike and expiry.
    #[inline]
    pub fn d1(&self, strike: f64, expiry: f64) -> f64 {
        let vol_sqrt_t = self.volatility * expiry.sqrt();
        let drift = (self.rate + 0.5 * self.volatility * self.volatility) * expiry;
        ((self.spot / strike).ln() + drift) / vol_sqrt_t
    }

    /// d₂ = d₁ − σ√T.
    #[inline]
    pub fn d2(&self, strike: f64, expiry: f64) -> f64 {
        self.d1(strike, expiry) - self.volatility * expiry.sqrt()
    }

    /// European call price.
    pub fn price_call(&self, strike: f64, expiry: f64) -> f64 {
        let discount = (-self.rate * expiry).exp();
        self.spot * norm_cdf(self.d1(strike, expiry))
            - strike * discount * norm_cdf(self.d2(strike, expiry))
    }

    /// European put price.
    pub fn price_put(&self, strike: f64, expiry: f64) -> f64 {
        let discount = (-self.rate * expiry).exp();
        let n1 = norm_cdf(self.d1(strike, expiry));
        let n2 = norm_cdf(self.d2(strike, expiry));
        strike * discount * (1.0 - n2) + self.spot * (n1 - 1.0)
    }

    /// Call delta, Φ(d₁).
    #[inline]
    pub fn call_delta(&self, strike: f64, expiry: f64) -> f64 {
        norm_cdf(self.d1(strike, expiry))
    }

    /// Put delta, Φ(d₁) − 1.
    #[inline]
    pub fn put_delta(&self, strike: f64, expiry: f64) -> f64 {
        norm_cdf(self.d1(strike, expiry)) - 1.0
    }
}
