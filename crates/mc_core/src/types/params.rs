//! Simulation parameters and their builder.
//!
//! [`SimulationParameters`] is immutable for the duration of a run. All
//! preconditions are checked once, in [`SimulationParametersBuilder::build`],
//! so downstream path generation and payoff code can rely on them without
//! re-validating or clamping.

use super::error::{SimulationError, SimulationResult};

/// Relative tolerance when deriving the step count from a time step.
const STEP_COUNT_TOLERANCE: f64 = 1e-9;

/// Parameters of a single Monte Carlo run.
///
/// # Fields
///
/// | Symbol | Accessor | Constraint |
/// |--------|----------|------------|
/// | S | [`spot`](Self::spot) | > 0 |
/// | E | [`strike`](Self::strike) | > 0 |
/// | σ | [`volatility`](Self::volatility) | > 0 |
/// | r | [`rate`](Self::rate) | finite |
/// | T | [`maturity`](Self::maturity) | > 0 |
/// | N | [`n_steps`](Self::n_steps) | ≥ 1 |
/// | M | [`n_samples`](Self::n_samples) | ≥ 1 |
/// | B | [`barrier`](Self::barrier) | 0 < B < S, optional |
/// | h | [`bump`](Self::bump) | > 0, optional |
///
/// # Examples
///
/// ```rust
/// use mc_core::types::SimulationParameters;
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
///     .expect("valid parameters");
///
/// assert_eq!(params.n_steps(), 100);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SimulationParameters {
    spot: f64,
    strike: f64,
    volatility: f64,
    rate: f64,
    maturity: f64,
    n_steps: usize,
    n_samples: usize,
    barrier: Option<f64>,
    bump: Option<f64>,
}

impl SimulationParameters {
    /// Creates a new parameter builder.
    #[inline]
    pub fn builder() -> SimulationParametersBuilder {
        SimulationParametersBuilder::default()
    }

    /// Returns the initial spot price (S).
    #[inline]
    pub fn spot(&self) -> f64 {
        self.spot
    }

    /// Returns the strike price (E).
    #[inline]
    pub fn strike(&self) -> f64 {
        self.strike
    }

    /// Returns the annualised volatility (σ).
    #[inline]
    pub fn volatility(&self) -> f64 {
        self.volatility
    }

    /// Returns the annualised risk-free rate (r).
    #[inline]
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Returns the time to maturity in years (T).
    #[inline]
    pub fn maturity(&self) -> f64 {
        self.maturity
    }

    /// Returns the number of time steps per trajectory (N).
    #[inline]
    pub fn n_steps(&self) -> usize {
        self.n_steps
    }

    /// Returns the number of Monte Carlo samples (M).
    #[inline]
    pub fn n_samples(&self) -> usize {
        self.n_samples
    }

    /// Returns the knock-out barrier level (B), if any.
    #[inline]
    pub fn barrier(&self) -> Option<f64> {
        self.barrier
    }

    /// Returns the spot perturbation size (h), if any.
    #[inline]
    pub fn bump(&self) -> Option<f64> {
        self.bump
    }

    /// Returns the step size Δt = T / N.
    #[inline]
    pub fn dt(&self) -> f64 {
        self.maturity / self.n_steps as f64
    }

    /// Returns the discount factor exp(−rT).
    #[inline]
    pub fn discount_factor(&self) -> f64 {
        (-self.rate * self.maturity).exp()
    }

    /// Returns the barrier level or an error naming the missing parameter.
    pub fn require_barrier(&self) -> SimulationResult<f64> {
        self.barrier
            .ok_or_else(|| SimulationError::invalid_parameter("barrier", "must be specified"))
    }

    /// Returns the perturbation size or an error naming the missing parameter.
    pub fn require_bump(&self) -> SimulationResult<f64> {
        self.bump
            .ok_or_else(|| SimulationError::invalid_parameter("bump", "must be specified"))
    }

    /// Returns a copy with a different spot price, re-validated.
    ///
    /// Used for perturbed-spot (finite difference) estimators.
    pub fn with_spot(&self, spot: f64) -> SimulationResult<Self> {
        let params = Self { spot, ..*self };
        params.validate()?;
        Ok(params)
    }

    /// Validates every precondition.
    ///
    /// # Errors
    ///
    /// Returns `SimulationError::InvalidParameter` if:
    /// - `spot`, `strike`, `volatility` or `maturity` is not positive and finite
    /// - `rate` is not finite
    /// - `n_steps` or `n_samples` is 0
    /// - `barrier` is not positive or is at or above `spot` (knock-out at inception)
    /// - `bump` is not positive and finite
    pub fn validate(&self) -> SimulationResult<()> {
        positive_finite("spot", self.spot)?;
        positive_finite("strike", self.strike)?;
        positive_finite("volatility", self.volatility)?;
        positive_finite("maturity", self.maturity)?;

        if !self.rate.is_finite() {
            return Err(SimulationError::invalid_parameter(
                "rate",
                format!("must be finite, got {}", self.rate),
            ));
        }
        if self.n_steps == 0 {
            return Err(SimulationError::invalid_parameter(
                "n_steps",
                "must be at least 1",
            ));
        }
        if self.n_samples == 0 {
            return Err(SimulationError::invalid_parameter(
                "n_samples",
                "must be at least 1",
            ));
        }
        if self.dt() <= 0.0 {
            return Err(SimulationError::invalid_parameter(
                "dt",
                format!("must be positive, got {}", self.dt()),
            ));
        }
        if let Some(barrier) = self.barrier {
            positive_finite("barrier", barrier)?;
            if barrier >= self.spot {
                return Err(SimulationError::invalid_parameter(
                    "barrier",
                    format!(
                        "down-and-out barrier {} must be below spot {}",
                        barrier, self.spot
                    ),
                ));
            }
        }
        if let Some(bump) = self.bump {
            positive_finite("bump", bump)?;
        }
        Ok(())
    }
}

fn positive_finite(name: &'static str, value: f64) -> SimulationResult<()> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(SimulationError::invalid_parameter(
            name,
            format!("must be positive and finite, got {}", value),
        ))
    }
}

/// Builder for [`SimulationParameters`].
///
/// The time discretisation can be given either as a step count
/// ([`n_steps`](Self::n_steps)) or as a step size ([`time_step`](Self::time_step));
/// a step size must divide the maturity into a whole number of steps.
#[derive(Clone, Debug, Default)]
pub struct SimulationParametersBuilder {
    spot: Option<f64>,
    strike: Option<f64>,
    volatility: Option<f64>,
    rate: Option<f64>,
    maturity: Option<f64>,
    n_steps: Option<usize>,
    time_step: Option<f64>,
    n_samples: Option<usize>,
    barrier: Option<f64>,
    bump: Option<f64>,
}

impl SimulationParametersBuilder {
    /// Sets the initial spot price (S).
    #[inline]
    pub fn spot(mut self, spot: f64) -> Self {
        self.spot = Some(spot);
        self
    }

    /// Sets the strike price (E).
    #[inline]
    pub fn strike(mut self, strike: f64) -> Self {
        self.strike = Some(strike);
        self
    }

    /// Sets the annualised volatility (σ).
    #[inline]
    pub fn volatility(mut self, volatility: f64) -> Self {
        self.volatility = Some(volatility);
        self
    }

    /// Sets the annualised risk-free rate (r).
    #[inline]
    pub fn rate(mut self, rate: f64) -> Self {
        self.rate = Some(rate);
        self
    }

    /// Sets the time to maturity in years (T).
    #[inline]
    pub fn maturity(mut self, maturity: f64) -> Self {
        self.maturity = Some(maturity);
        self
    }

    /// Sets the number of time steps (N).
    #[inline]
    pub fn n_steps(mut self, n_steps: usize) -> Self {
        self.n_steps = Some(n_steps);
        self
    }

    /// Sets the step size (Δt); N is derived as T / Δt.
    #[inline]
    pub fn time_step(mut self, dt: f64) -> Self {
        self.time_step = Some(dt);
        self
    }

    /// Sets the number of Monte Carlo samples (M).
    #[inline]
    pub fn n_samples(mut self, n_samples: usize) -> Self {
        self.n_samples = Some(n_samples);
        self
    }

    /// Sets the down-and-out barrier level (B).
    #[inline]
    pub fn barrier(mut self, barrier: f64) -> Self {
        self.barrier = Some(barrier);
        self
    }

    /// Sets the spot perturbation size (h).
    #[inline]
    pub fn bump(mut self, bump: f64) -> Self {
        self.bump = Some(bump);
        self
    }

    /// Builds and validates the parameters.
    ///
    /// # Errors
    ///
    /// Returns `SimulationError::InvalidParameter` if a required field is
    /// missing, if the time step does not divide the maturity, or if any
    /// check in [`SimulationParameters::validate`] fails.
    pub fn build(self) -> SimulationResult<SimulationParameters> {
        let spot = required("spot", self.spot)?;
        let strike = required("strike", self.strike)?;
        let volatility = required("volatility", self.volatility)?;
        let rate = required("rate", self.rate)?;
        let maturity = required("maturity", self.maturity)?;
        let n_samples = required("n_samples", self.n_samples)?;
        positive_finite("maturity", maturity)?;

        let n_steps = match (self.n_steps, self.time_step) {
            (Some(n_steps), None) => n_steps,
            (None, Some(dt)) => steps_from_time_step(maturity, dt)?,
            (Some(n_steps), Some(dt)) => {
                let derived = steps_from_time_step(maturity, dt)?;
                if derived != n_steps {
                    return Err(SimulationError::invalid_parameter(
                        "time_step",
                        format!(
                            "time step {} implies {} steps but n_steps is {}",
                            dt, derived, n_steps
                        ),
                    ));
                }
                n_steps
            }
            (None, None) => {
                return Err(SimulationError::invalid_parameter(
                    "n_steps",
                    "must be specified (directly or via time_step)",
                ))
            }
        };

        let params = SimulationParameters {
            spot,
            strike,
            volatility,
            rate,
            maturity,
            n_steps,
            n_samples,
            barrier: self.barrier,
            bump: self.bump,
        };

        params.validate()?;
        Ok(params)
    }
}

fn required<T>(name: &'static str, value: Option<T>) -> SimulationResult<T> {
    value.ok_or_else(|| SimulationError::invalid_parameter(name, "must be specified"))
}

fn steps_from_time_step(maturity: f64, dt: f64) -> SimulationResult<usize> {
    if !(dt > 0.0 && dt.is_finite()) {
        return Err(SimulationError::invalid_parameter(
            "time_step",
            format!("must be positive and finite, got {}", dt),
        ));
    }

    let ratio = maturity / dt;
    let rounded = ratio.round();
    // usize::MAX as f64 rounds up to 2^64, which is itself out of range.
    if !rounded.is_finite() || rounded >= usize::MAX as f64 {
        return Err(SimulationError::invalid_parameter(
            "time_step",
            format!(
                "time step {} gives more steps than fit in usize over maturity {}",
                dt, maturity
            ),
        ));
    }
    if rounded < 1.0 || (ratio - rounded).abs() > STEP_COUNT_TOLERANCE * rounded {
        return Err(SimulationError::invalid_parameter(
            "time_step",
            format!(
                "time step {} does not divide maturity {} into whole steps",
                dt, maturity
            ),
        ));
    }
    Ok(rounded as usize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn european_builder() -> SimulationParametersBuilder {
        SimulationParameters::builder()
            .spot(50.0)
            .strike(52.0)
            .volatility(0.1)
            .rate(0.06)
            .maturity(1.0)
            .n_steps(1)
            .n_samples(100)
    }

    #[test]
    fn test_builder_valid() {
        let params = european_builder().build().unwrap();

        assert_eq!(params.spot(), 50.0);
        assert_eq!(params.strike(), 52.0);
        assert_eq!(params.n_steps(), 1);
        assert_eq!(params.n_samples(), 100);
        assert_eq!(params.barrier(), None);
        assert_eq!(params.bump(), None);
        assert_relative_eq!(params.dt(), 1.0);
        assert_relative_eq!(params.discount_factor(), (-0.06_f64).exp());
    }

    #[test]
    fn test_time_step_derives_step_count() {
        let params = SimulationParameters::builder()
            .spot(4.0)
            .strike(4.0)
            .volatility(0.25)
            .rate(0.03)
            .maturity(1.0)
            .time_step(0.01)
            .n_samples(10_000)
            .build()
            .unwrap();

        assert_eq!(params.n_steps(), 100);
        assert_relative_eq!(params.dt(), 0.01, epsilon = 1e-15);
    }

    #[test]
    fn test_time_step_not_dividing_maturity() {
        let result = european_builder().n_steps(1).time_step(0.3).build();
        assert!(matches!(
            result,
            Err(SimulationError::InvalidParameter {
                name: "time_step",
                ..
            })
        ));
    }

    #[test]
    fn test_time_step_step_count_overflow() {
        let result = SimulationParameters::builder()
            .spot(50.0)
            .strike(52.0)
            .volatility(0.1)
            .rate(0.06)
            .maturity(1.0)
            .time_step(1e-300)
            .n_samples(100)
            .build();
        match result {
            Err(SimulationError::InvalidParameter { name, reason }) => {
                assert_eq!(name, "time_step");
                assert!(reason.contains("usize"), "{}", reason);
            }
            other => panic!("expected InvalidParameter, got {:?}", other),
        }
    }

    #[test]
    fn test_time_step_inconsistent_with_steps() {
        let result = european_builder().n_steps(10).time_step(0.01).build();
        assert!(matches!(
            result,
            Err(SimulationError::InvalidParameter {
                name: "time_step",
                ..
            })
        ));
    }

    #[test]
    fn test_non_positive_inputs_rejected() {
        let cases = [
            ("spot", european_builder().spot(0.0)),
            ("strike", european_builder().strike(-1.0)),
            ("volatility", european_builder().volatility(0.0)),
            ("maturity", european_builder().maturity(0.0)),
        ];

        for (expected, builder) in cases {
            match builder.build() {
                Err(SimulationError::InvalidParameter { name, .. }) => assert_eq!(name, expected),
                other => panic!("expected InvalidParameter for {}, got {:?}", expected, other),
            }
        }
    }

    #[test]
    fn test_nan_spot_rejected() {
        assert!(european_builder().spot(f64::NAN).build().is_err());
    }

    #[test]
    fn test_zero_steps_and_samples_rejected() {
        assert!(matches!(
            european_builder().n_steps(0).build(),
            Err(SimulationError::InvalidParameter {
                name: "n_steps",
                ..
            })
        ));
        assert!(matches!(
            european_builder().n_samples(0).build(),
            Err(SimulationError::InvalidParameter {
                name: "n_samples",
                ..
            })
        ));
    }

    #[test]
    fn test_missing_field() {
        let result = SimulationParameters::builder().spot(50.0).build();
        assert!(matches!(
            result,
            Err(SimulationError::InvalidParameter { name: "strike", .. })
        ));
    }

    #[test]
    fn test_barrier_at_or_above_spot_rejected() {
        assert!(european_builder().barrier(50.0).build().is_err());
        assert!(european_builder().barrier(60.0).build().is_err());
        assert!(european_builder().barrier(0.0).build().is_err());
        assert_eq!(
            european_builder().barrier(49.0).build().unwrap().barrier(),
            Some(49.0)
        );
    }

    #[test]
    fn test_bump_must_be_positive() {
        assert!(european_builder().bump(0.0).build().is_err());
        assert_eq!(
            european_builder().bump(0.1).build().unwrap().require_bump(),
            Ok(0.1)
        );
    }

    #[test]
    fn test_require_missing_barrier() {
        let params = european_builder().build().unwrap();
        assert!(matches!(
            params.require_barrier(),
            Err(SimulationError::InvalidParameter {
                name: "barrier",
                ..
            })
        ));
    }

    #[test]
    fn test_with_spot_revalidates() {
        let params = european_builder().barrier(49.0).build().unwrap();
        assert_eq!(params.with_spot(50.1).unwrap().spot(), 50.1);
        assert!(params.with_spot(48.0).is_err());
    }
}
