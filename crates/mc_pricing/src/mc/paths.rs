//! Geometric Brownian Motion trajectories.
//!
//! Each step applies the exact log-space update
//!
//! ```text
//! S_k = S_{k−1} · exp((r − σ²/2)Δt + σ√Δt · Z_k)
//! ```
//!
//! with Z_k i.i.d. standard normal. A trajectory of N steps has N + 1
//! observations, element 0 being the initial spot.
//!
//! The antithetic companion of a trajectory is built from the *same* draws
//! with every Z_k negated; it is never redrawn.

use num_traits::Float;

use super::workspace::PathWorkspace;
use crate::rng::SimRng;
use mc_core::{SimulationError, SimulationParameters, SimulationResult};

/// Ordered, strictly positive price observations of one simulated path.
///
/// Element 0 is the initial spot. Every element is finite and positive;
/// the only public constructor, [`Trajectory::from_observations`], checks this,
/// and generated trajectories are checked as they are written. Payoffs only
/// accept a `Trajectory`, so an unchecked price sequence can never be valued.
#[derive(Clone, Debug, PartialEq)]
pub struct Trajectory<T: Float = f64> {
    observations: Vec<T>,
}

impl<T: Float> Trajectory<T> {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            observations: Vec::with_capacity(capacity),
        }
    }

    /// Wraps raw observations, validating that every value is positive and finite.
    ///
    /// # Errors
    ///
    /// - `InvalidParameter` if `observations` is empty
    /// - `NumericDomain` for the first non-positive or non-finite value
    ///
    /// # Examples
    ///
    /// ```rust
    /// use mc_pricing::mc::Trajectory;
    ///
    /// let path = Trajectory::from_observations(vec![55.0, 50.0, 48.5, 53.0]).unwrap();
    /// assert_eq!(path.minimum(), 48.5);
    /// assert!(Trajectory::from_observations(vec![55.0, -1.0]).is_err());
    /// ```
    pub fn from_observations(observations: Vec<T>) -> SimulationResult<Self> {
        if observations.is_empty() {
            return Err(SimulationError::invalid_parameter(
                "observations",
                "a trajectory needs at least the initial observation",
            ));
        }
        if let Some(&bad) = observations.iter().find(|&&x| !is_valid_price(x)) {
            let value = bad.to_f64().unwrap_or(f64::NAN);
            return Err(SimulationError::numeric_domain("trajectory", value));
        }
        Ok(Self { observations })
    }

    /// All observations, initial spot first.
    #[inline]
    pub fn observations(&self) -> &[T] {
        &self.observations
    }

    /// Number of observations (N + 1).
    #[inline]
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    /// Always false for a constructed trajectory.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// Number of steps (N).
    #[inline]
    pub fn n_steps(&self) -> usize {
        self.observations.len().saturating_sub(1)
    }

    /// Initial observation (the spot).
    #[inline]
    pub fn initial(&self) -> T {
        self.observations.first().copied().unwrap_or_else(T::nan)
    }

    /// Final observation.
    #[inline]
    pub fn terminal(&self) -> T {
        self.observations.last().copied().unwrap_or_else(T::nan)
    }

    /// Smallest observation, including the initial spot.
    #[inline]
    pub fn minimum(&self) -> T {
        self.observations.iter().copied().fold(T::infinity(), T::min)
    }
}

#[inline]
fn is_valid_price<T: Float>(x: T) -> bool {
    x > T::zero() && x.is_finite()
}

/// Sign applied to the normal draws when building a trajectory.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoiseSign {
    /// Use Z_k as drawn.
    Primal,
    /// Use −Z_k.
    Antithetic,
}

impl NoiseSign {
    #[inline]
    fn apply(self, z: f64) -> f64 {
        match self {
            NoiseSign::Primal => z,
            NoiseSign::Antithetic => -z,
        }
    }
}

/// Precomputed GBM step for a fixed (r, σ, Δt).
///
/// # Examples
///
/// ```rust
/// use mc_pricing::mc::GbmStepper;
///
/// let stepper = GbmStepper::new(0.06, 0.1, 1.0);
/// // Z = 0: pure drift
/// let next = stepper.step(50.0, 0.0);
/// assert!((next - 50.0 * (0.055_f64).exp()).abs() < 1e-12);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GbmStepper {
    drift_dt: f64,
    vol_sqrt_dt: f64,
}

impl GbmStepper {
    /// Precomputes `(r − σ²/2)Δt` and `σ√Δt`.
    #[inline]
    pub fn new(rate: f64, volatility: f64, dt: f64) -> Self {
        Self {
            drift_dt: (rate - 0.5 * volatility * volatility) * dt,
            vol_sqrt_dt: volatility * dt.sqrt(),
        }
    }

    /// Stepper for the rate, volatility and Δt of the run parameters.
    #[inline]
    pub fn from_params(params: &SimulationParameters) -> Self {
        Self::new(params.rate(), params.volatility(), params.dt())
    }

    /// Log drift per step.
    #[inline]
    pub fn drift_dt(&self) -> f64 {
        self.drift_dt
    }

    /// Log diffusion scale per step.
    #[inline]
    pub fn vol_sqrt_dt(&self) -> f64 {
        self.vol_sqrt_dt
    }

    /// One step from `price` with draw `z`.
    #[inline]
    pub fn step(&self, price: f64, z: f64) -> f64 {
        price * (self.drift_dt + self.vol_sqrt_dt * z).exp()
    }

    /// Writes `normals.len() + 1` observations starting at `spot` into `out`.
    ///
    /// `out` is cleared first and its allocation reused.
    ///
    /// # Errors
    ///
    /// Returns `NumericDomain` if the spot or any generated observation is
    /// non-positive or non-finite (e.g. overflow under extreme volatility).
    pub fn fill(
        &self,
        spot: f64,
        normals: &[f64],
        sign: NoiseSign,
        out: &mut Trajectory,
    ) -> SimulationResult<()> {
        if !is_valid_price(spot) {
            return Err(SimulationError::numeric_domain("trajectory", spot));
        }

        let observations = &mut out.observations;
        observations.clear();
        observations.reserve(normals.len() + 1);
        observations.push(spot);

        let mut price = spot;
        for &z in normals {
            price = self.step(price, sign.apply(z));
            if !is_valid_price(price) {
                return Err(SimulationError::numeric_domain("trajectory", price));
            }
            observations.push(price);
        }
        Ok(())
    }
}

/// Generates one trajectory into a freshly allocated buffer.
///
/// Draws `n_steps` normals from `rng`. Convenient for tests and one-off
/// paths; the samplers use [`generate_trajectory_into`] instead.
pub fn generate_trajectory(
    params: &SimulationParameters,
    rng: &mut SimRng,
) -> SimulationResult<Trajectory> {
    let mut normals = vec![0.0; params.n_steps()];
    rng.fill_normal(&mut normals);

    let mut trajectory = Trajectory::with_capacity(normals.len() + 1);
    GbmStepper::from_params(params).fill(
        params.spot(),
        &normals,
        NoiseSign::Primal,
        &mut trajectory,
    )?;
    Ok(trajectory)
}

/// Generates one trajectory into the workspace's primal buffer.
pub fn generate_trajectory_into<'w>(
    params: &SimulationParameters,
    stepper: &GbmStepper,
    workspace: &'w mut PathWorkspace,
    rng: &mut SimRng,
) -> SimulationResult<&'w Trajectory> {
    workspace.ensure_capacity(params.n_steps());
    rng.fill_normal(workspace.normals_mut());

    let (normals, primal, _) = workspace.split_mut();
    stepper.fill(params.spot(), normals, NoiseSign::Primal, primal)?;
    Ok(workspace.primal())
}

/// Generates a primal trajectory and its antithetic companion.
///
/// The N normals are drawn once; the primal uses +Z and the companion −Z.
///
/// # Examples
///
/// ```rust
/// use mc_core::SimulationParameters;
/// use mc_pricing::mc::{generate_antithetic_pair, GbmStepper, PathWorkspace};
/// use mc_pricing::rng::SimRng;
///
/// let params = SimulationParameters::builder()
///     .spot(55.0).strike(52.0).volatility(0.1).rate(0.06)
///     .maturity(1.0).n_steps(100).n_samples(1).barrier(49.0)
///     .build().unwrap();
///
/// let stepper = GbmStepper::from_params(&params);
/// let mut workspace = PathWorkspace::new(params.n_steps());
/// let mut rng = SimRng::from_seed(1);
///
/// let (primal, antithetic) =
///     generate_antithetic_pair(&params, &stepper, &mut workspace, &mut rng).unwrap();
/// assert_eq!(primal.initial(), antithetic.initial());
/// assert_ne!(primal.terminal(), antithetic.terminal());
/// ```
pub fn generate_antithetic_pair<'w>(
    params: &SimulationParameters,
    stepper: &GbmStepper,
    workspace: &'w mut PathWorkspace,
    rng: &mut SimRng,
) -> SimulationResult<(&'w Trajectory, &'w Trajectory)> {
    workspace.ensure_capacity(params.n_steps());
    rng.fill_normal(workspace.normals_mut());

    let (normals, primal, antithetic) = workspace.split_mut();
    stepper.fill(params.spot(), normals, NoiseSign::Primal, primal)?;
    stepper.fill(params.spot(), normals, NoiseSign::Antithetic, antithetic)?;
    Ok((workspace.primal(), workspace.antithetic()))
}
