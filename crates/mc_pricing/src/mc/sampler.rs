//! Per-sample evaluation: one call produces one independent payoff sample.
//!
//! A [`PayoffSampler`] owns everything that is constant over a run
//! (parameters, precomputed step, discount factor, control expectation) and
//! is shared read-only by every chunk. Per-sample state lives only in the
//! caller's [`PathWorkspace`] and [`SimRng`].

use super::paths::{generate_antithetic_pair, generate_trajectory_into, GbmStepper, NoiseSign};
use super::workspace::PathWorkspace;
use crate::path_dependent::{
    AsianArithmeticPayoff, AsianGeometricPayoff, EuropeanPayoff, PathDependentPayoff,
    PathPayoffType,
};
use crate::rng::SimRng;
use crate::variance_reduction::{AntitheticPair, ControlVariate};
use mc_core::{SimulationParameters, SimulationResult};

/// Produces one sample per call from fresh draws.
///
/// Implementations must draw everything they need from `rng` and must not
/// carry state between calls, so that samples are independent and a chunk
/// can be replayed from its stream seed.
pub trait PayoffSampler: Sync {
    /// One sample (a discounted payoff, or a tuple of legs).
    type Output: Send;

    /// Steps per trajectory, used to size the workspace.
    fn n_steps(&self) -> usize;

    /// Draws and evaluates one sample.
    fn sample(
        &self,
        workspace: &mut PathWorkspace,
        rng: &mut SimRng,
    ) -> SimulationResult<Self::Output>;
}

// ============================================================================
// Single payoff
// ============================================================================

/// Discounted payoff of one trajectory per sample.
#[derive(Clone, Debug)]
pub struct PathPayoffSampler {
    params: SimulationParameters,
    stepper: GbmStepper,
    payoff: PathPayoffType<f64>,
    discount: f64,
}

impl PathPayoffSampler {
    /// Sampler for `payoff` under `params`.
    pub fn new(params: &SimulationParameters, payoff: PathPayoffType<f64>) -> Self {
        Self {
            params: *params,
            stepper: GbmStepper::from_params(params),
            payoff,
            discount: params.discount_factor(),
        }
    }

    /// Down-and-out call on the barrier and strike of `params`.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` if `params` carries no barrier.
    pub fn down_out_call(params: &SimulationParameters) -> SimulationResult<Self> {
        let barrier = params.require_barrier()?;
        Ok(Self::new(
            params,
            PathPayoffType::barrier_down_out_call(params.strike(), barrier),
        ))
    }

    /// The payoff being sampled.
    #[inline]
    pub fn payoff(&self) -> &PathPayoffType<f64> {
        &self.payoff
    }
}

impl PayoffSampler for PathPayoffSampler {
    type Output = f64;

    fn n_steps(&self) -> usize {
        self.params.n_steps()
    }

    fn sample(&self, workspace: &mut PathWorkspace, rng: &mut SimRng) -> SimulationResult<f64> {
        let path = generate_trajectory_into(&self.params, &self.stepper, workspace, rng)?;
        Ok(self.payoff.discounted(path, self.discount))
    }
}

// ============================================================================
// European put and call on a shared draw
// ============================================================================

/// Discounted European put and call from the same terminal price.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EuropeanSample {
    /// Discounted put payoff.
    pub put: f64,
    /// Discounted call payoff.
    pub call: f64,
}

/// Samples a European put and call on one trajectory.
#[derive(Clone, Debug)]
pub struct EuropeanSampler {
    params: SimulationParameters,
    stepper: GbmStepper,
    put: EuropeanPayoff<f64>,
    call: EuropeanPayoff<f64>,
    discount: f64,
}

impl EuropeanSampler {
    /// Sampler for the strike of `params`.
    pub fn new(params: &SimulationParameters) -> Self {
        Self {
            params: *params,
            stepper: GbmStepper::from_params(params),
            put: EuropeanPayoff::put(params.strike()),
            call: EuropeanPayoff::call(params.strike()),
            discount: params.discount_factor(),
        }
    }
}

impl PayoffSampler for EuropeanSampler {
    type Output = EuropeanSample;

    fn n_steps(&self) -> usize {
        self.params.n_steps()
    }

    fn sample(
        &self,
        workspace: &mut PathWorkspace,
        rng: &mut SimRng,
    ) -> SimulationResult<EuropeanSample> {
        let terminal = generate_trajectory_into(&self.params, &self.stepper, workspace, rng)?
            .terminal();
        Ok(EuropeanSample {
            put: self.discount * self.put.intrinsic_at(terminal),
            call: self.discount * self.call.intrinsic_at(terminal),
        })
    }
}

// ============================================================================
// Arithmetic Asian with geometric control
// ============================================================================

/// Raw and control-adjusted Asian payoffs of one trajectory.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AsianSample {
    /// Discounted arithmetic-average payoff.
    pub arithmetic: f64,
    /// Discounted geometric-average payoff (the control).
    pub geometric: f64,
    /// `arithmetic + expected − geometric`.
    pub adjusted: f64,
}

/// Arithmetic Asian call with the geometric Asian call as control variate.
#[derive(Clone, Debug)]
pub struct AsianControlVariateSampler {
    params: SimulationParameters,
    stepper: GbmStepper,
    arithmetic: AsianArithmeticPayoff<f64>,
    geometric: AsianGeometricPayoff<f64>,
    control: ControlVariate,
    discount: f64,
}

impl AsianControlVariateSampler {
    /// Sampler whose control has expectation `control.expected()`, normally
    /// the geometric closed form computed once for the run.
    pub fn new(params: &SimulationParameters, control: ControlVariate) -> Self {
        Self {
            params: *params,
            stepper: GbmStepper::from_params(params),
            arithmetic: AsianArithmeticPayoff::call(params.strike()),
            geometric: AsianGeometricPayoff::call(params.strike()),
            control,
            discount: params.discount_factor(),
        }
    }

    /// The control variate in use.
    #[inline]
    pub fn control(&self) -> &ControlVariate {
        &self.control
    }
}

impl PayoffSampler for AsianControlVariateSampler {
    type Output = AsianSample;

    fn n_steps(&self) -> usize {
        self.params.n_steps()
    }

    fn sample(
        &self,
        workspace: &mut PathWorkspace,
        rng: &mut SimRng,
    ) -> SimulationResult<AsianSample> {
        let path = generate_trajectory_into(&self.params, &self.stepper, workspace, rng)?;
        let arithmetic = self.arithmetic.discounted(path, self.discount);
        let geometric = self.geometric.discounted(path, self.discount);
        Ok(AsianSample {
            arithmetic,
            geometric,
            adjusted: self.control.adjust(arithmetic, geometric),
        })
    }
}

// ============================================================================
// Antithetic pairs
// ============================================================================

/// One payoff evaluated on an antithetic pair of trajectories per sample.
#[derive(Clone, Debug)]
pub struct AntitheticSampler {
    params: SimulationParameters,
    stepper: GbmStepper,
    payoff: PathPayoffType<f64>,
    discount: f64,
}

impl AntitheticSampler {
    /// Sampler for `payoff` under `params`.
    pub fn new(params: &SimulationParameters, payoff: PathPayoffType<f64>) -> Self {
        Self {
            params: *params,
            stepper: GbmStepper::from_params(params),
            payoff,
            discount: params.discount_factor(),
        }
    }

    /// Antithetic down-and-out call on the barrier and strike of `params`.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` if `params` carries no barrier.
    pub fn down_out_call(params: &SimulationParameters) -> SimulationResult<Self> {
        let barrier = params.require_barrier()?;
        Ok(Self::new(
            params,
            PathPayoffType::barrier_down_out_call(params.strike(), barrier),
        ))
    }
}

impl PayoffSampler for AntitheticSampler {
    type Output = AntitheticPair;

    fn n_steps(&self) -> usize {
        self.params.n_steps()
    }

    fn sample(
        &self,
        workspace: &mut PathWorkspace,
        rng: &mut SimRng,
    ) -> SimulationResult<AntitheticPair> {
        let (primal, antithetic) =
            generate_antithetic_pair(&self.params, &self.stepper, workspace, rng)?;
        Ok(AntitheticPair::evaluate(
            &self.payoff,
            primal,
            antithetic,
            self.discount,
        ))
    }
}

// ============================================================================
// Perturbed-spot legs
// ============================================================================

/// How the base and bumped legs of a finite-difference delta share draws.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DeltaMode {
    /// Each leg draws its own normals; the interval adds the two deviations.
    #[default]
    Independent,
    /// Both legs reuse the same normals; the interval is that of the paired differences.
    CommonRandomNumbers,
}

/// Discounted European put payoffs from spot S and from S + h.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DeltaSample {
    /// Payoff from spot S.
    pub base: f64,
    /// Payoff from spot S + h.
    pub bumped: f64,
}

/// European put sampled from the base and the bumped spot.
#[derive(Clone, Debug)]
pub struct BumpedSpotSampler {
    params: SimulationParameters,
    bumped_spot: f64,
    stepper: GbmStepper,
    payoff: EuropeanPayoff<f64>,
    mode: DeltaMode,
    discount: f64,
}

impl BumpedSpotSampler {
    /// Sampler for the put delta of `params` with the perturbation `params.bump()`.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` if `params` carries no bump.
    pub fn european_put(params: &SimulationParameters, mode: DeltaMode) -> SimulationResult<Self> {
        let bump = params.require_bump()?;
        let bumped = params.with_spot(params.spot() + bump)?;
        Ok(Self {
            params: *params,
            bumped_spot: bumped.spot(),
            stepper: GbmStepper::from_params(params),
            payoff: EuropeanPayoff::put(params.strike()),
            mode,
            discount: params.discount_factor(),
        })
    }

    /// Draw-sharing mode.
    #[inline]
    pub fn mode(&self) -> DeltaMode {
        self.mode
    }

    fn leg(
        &self,
        spot: f64,
        workspace: &mut PathWorkspace,
        redraw: bool,
        rng: &mut SimRng,
    ) -> SimulationResult<f64> {
        if redraw {
            rng.fill_normal(workspace.normals_mut());
        }
        let (normals, primal, _) = workspace.split_mut();
        self.stepper.fill(spot, normals, NoiseSign::Primal, primal)?;
        Ok(self.discount * self.payoff.intrinsic_at(primal.terminal()))
    }
}

impl PayoffSampler for BumpedSpotSampler {
    type Output = DeltaSample;

    fn n_steps(&self) -> usize {
        self.params.n_steps()
    }

    fn sample(
        &self,
        workspace: &mut PathWorkspace,
        rng: &mut SimRng,
    ) -> SimulationResult<DeltaSample> {
        workspace.ensure_capacity(self.params.n_steps());
        let base = self.leg(self.params.spot(), workspace, true, rng)?;
        let redraw = self.mode == DeltaMode::Independent;
        let bumped = self.leg(self.bumped_spot, workspace, redraw, rng)?;
        Ok(DeltaSample { base, bumped })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn delta_params() -> SimulationParameters {
        SimulationParameters::builder()
            .spot(50.0)
            .strike(52.0)
            .volatility(0.1)
            .rate(0.06)
            .maturity(1.0)
            .n_steps(1)
            .n_samples(100)
            .bump(0.1)
            .build()
            .unwrap()
    }

    #[test]
    fn test_european_sample_shares_terminal() {
        let params = delta_params();
        let sampler = EuropeanSampler::new(&params);
        let mut workspace = PathWorkspace::new(1);
        let mut rng = SimRng::from_seed(4);

        for _ in 0..50 {
            let sample = sampler.sample(&mut workspace, &mut rng).unwrap();
            // A put and a call on the same terminal can't both be in the money.
            assert!(sample.put == 0.0 || sample.call == 0.0);
            let terminal = workspace.primal().terminal();
            let discount = params.discount_factor();
            let parity = discount * (terminal - 52.0);
            assert_relative_eq!(sample.call - sample.put, parity, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_crn_legs_share_draws() {
        let params = delta_params();
        let sampler =
            BumpedSpotSampler::european_put(&params, DeltaMode::CommonRandomNumbers).unwrap();
        let mut workspace = PathWorkspace::new(1);
        let mut rng = SimRng::from_seed(9);

        let sample = sampler.sample(&mut workspace, &mut rng).unwrap();
        // With shared draws the bumped terminal is the base terminal scaled by (S+h)/S.
        let z = workspace.normals()[0];
        let stepper = GbmStepper::from_params(&params);
        let base_terminal = stepper.step(50.0, z);
        let discount = params.discount_factor();
        assert_relative_eq!(
            sample.base,
            discount * (52.0 - base_terminal).max(0.0),
            epsilon = 1e-12
        );
        assert_relative_eq!(
            sample.bumped,
            discount * (52.0 - base_terminal * 50.1 / 50.0).max(0.0),
            epsilon = 1e-10
        );
    }

    #[test]
    fn test_independent_legs_use_two_draw_sets() {
        let params = delta_params();
        let sampler = BumpedSpotSampler::european_put(&params, DeltaMode::Independent).unwrap();
        let mut workspace = PathWorkspace::new(1);
        let mut rng = SimRng::from_seed(9);
        sampler.sample(&mut workspace, &mut rng).unwrap();

        let mut reference = SimRng::from_seed(9);
        reference.gen_normal();
        let second = reference.gen_normal();
        assert_eq!(workspace.normals()[0], second);
        assert_eq!(sampler.mode(), DeltaMode::Independent);
    }

    #[test]
    fn test_bump_required() {
        let without_bump = SimulationParameters::builder()
            .spot(50.0)
            .strike(52.0)
            .volatility(0.1)
            .rate(0.06)
            .maturity(1.0)
            .n_steps(1)
            .n_samples(10)
            .build()
            .unwrap();
        assert!(BumpedSpotSampler::european_put(&without_bump, DeltaMode::Independent).is_err());
    }

    #[test]
    fn test_barrier_required() {
        assert!(PathPayoffSampler::down_out_call(&delta_params()).is_err());
        assert!(AntitheticSampler::down_out_call(&delta_params()).is_err());
    }

    #[test]
    fn test_asian_sample_adjustment() {
        let params = SimulationParameters::builder()
            .spot(4.0)
            .strike(4.0)
            .volatility(0.25)
            .rate(0.03)
            .maturity(1.0)
            .n_steps(100)
            .n_samples(10)
            .build()
            .unwrap();
        let sampler = AsianControlVariateSampler::new(&params, ControlVariate::new(0.246));
        let mut workspace = PathWorkspace::new(100);
        let mut rng = SimRng::from_seed(1);

        let sample = sampler.sample(&mut workspace, &mut rng).unwrap();
        let expected = sample.arithmetic + 0.246 - sample.geometric;
        assert_relative_eq!(sample.adjusted, expected, epsilon = 1e-15);
        assert!(sample.geometric <= sample.arithmetic + 1e-12);
        assert_eq!(sampler.control().expected(), 0.246);
    }
}
