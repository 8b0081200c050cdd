//! Monte Carlo pricing engine.
//!
//! [`MonteCarloPricer`] turns a [`PayoffSampler`] into M samples and reduces
//! them. Sampling is organised in fixed-size chunks; chunk `k` owns RNG
//! stream `k` of the run seed and its own [`PathWorkspace`], which makes the
//! parallel and sequential sample sequences identical.

use rayon::prelude::*;
use tracing::{debug, info, warn};

use super::config::MonteCarloConfig;
use super::estimator::{DeltaEstimate, EstimateResult};
use super::report::{AsianReport, BarrierReport, DeltaReport, EuropeanReport};
use super::sampler::{
    AntitheticSampler, AsianControlVariateSampler, BumpedSpotSampler, DeltaMode, EuropeanSampler,
    PathPayoffSampler, PayoffSampler,
};
use super::workspace::PathWorkspace;
use crate::analytical::{
    down_out_call, down_out_call_discrete, geometric_asian_call,
    geometric_asian_call_including_spot, BlackScholes,
};
use crate::rng::{entropy_seed, SimRng};
use crate::variance_reduction::ControlVariate;
use mc_core::{SimulationParameters, SimulationResult};

/// Below this sample count the normal approximation behind the 95% interval is weak.
pub const MIN_RELIABLE_SAMPLES: usize = 30;

/// Monte Carlo pricing engine.
///
/// Holds no per-sample state: every pricing call replays the run seed, so two
/// calls with the same inputs return identical results.
///
/// # Examples
///
/// ```rust
/// use mc_core::SimulationParameters;
/// use mc_pricing::mc::{MonteCarloConfig, MonteCarloPricer};
///
/// let params = SimulationParameters::builder()
///     .spot(50.0).strike(52.0).volatility(0.1).rate(0.06)
///     .maturity(1.0).n_steps(1).n_samples(10_000)
///     .build().unwrap();
///
/// let config = MonteCarloConfig::builder().seed(42).build().unwrap();
/// let pricer = MonteCarloPricer::new(config).unwrap();
/// let report = pricer.price_european(&params).unwrap();
///
/// let (low, high) = report.call.confidence_interval();
/// assert!(low < high);
/// assert!((report.call.mean() - report.bs_call).abs() < 0.2);
/// ```
#[derive(Clone, Debug)]
pub struct MonteCarloPricer {
    config: MonteCarloConfig,
    seed: u64,
}

impl MonteCarloPricer {
    /// Creates a pricer, drawing a seed from entropy if the config has none.
    ///
    /// # Errors
    ///
    /// Returns `SimulationError::InvalidParameter` if the configuration is invalid.
    pub fn new(config: MonteCarloConfig) -> SimulationResult<Self> {
        config.validate()?;

        let seed = match config.seed() {
            Some(seed) => seed,
            None => {
                let seed = entropy_seed();
                info!(seed, "No seed supplied; drew run seed from entropy");
                seed
            }
        };

        Ok(Self { config, seed })
    }

    /// Creates a pricer with an explicit seed, overriding the config seed.
    ///
    /// # Errors
    ///
    /// Returns `SimulationError::InvalidParameter` if the configuration is invalid.
    pub fn with_seed(config: MonteCarloConfig, seed: u64) -> SimulationResult<Self> {
        config.validate()?;
        Ok(Self { config, seed })
    }

    /// Returns the configuration.
    #[inline]
    pub fn config(&self) -> &MonteCarloConfig {
        &self.config
    }

    /// Returns the run seed.
    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    // ========================================================================
    // Sampling
    // ========================================================================

    /// Lazy iterator over `n_samples` samples.
    ///
    /// Each call starts again from the run seed, so iterating twice yields the
    /// same sequence. The sequence equals the output of
    /// [`collect_samples`](Self::collect_samples). Iteration stops after the
    /// first error.
    pub fn samples<'s, S: PayoffSampler>(
        &self,
        sampler: &'s S,
        n_samples: usize,
    ) -> Samples<'s, S> {
        Samples {
            sampler,
            seed: self.seed,
            chunk_size: self.config.chunk_size(),
            n_samples,
            index: 0,
            rng: SimRng::for_stream(self.seed, 0),
            workspace: PathWorkspace::new(sampler.n_steps()),
            failed: false,
        }
    }

    /// Draws `n_samples` samples, on the rayon pool if the config enables it.
    ///
    /// # Errors
    ///
    /// Returns the first error raised by the sampler in sample order, which
    /// is the same error for the parallel and the sequential schedule.
    pub fn collect_samples<S: PayoffSampler>(
        &self,
        sampler: &S,
        n_samples: usize,
    ) -> SimulationResult<Vec<S::Output>> {
        let chunk_size = self.config.chunk_size();
        let n_chunks = n_samples.div_ceil(chunk_size);

        if !self.config.parallel() {
            let mut samples = Vec::with_capacity(n_samples);
            for chunk in 0..n_chunks {
                samples.extend(self.run_chunk(sampler, chunk, n_samples)?);
            }
            return Ok(samples);
        }

        // Every chunk runs to completion; the scan below keeps the error order.
        let chunks: Vec<SimulationResult<Vec<S::Output>>> = (0..n_chunks)
            .into_par_iter()
            .map(|chunk| self.run_chunk(sampler, chunk, n_samples))
            .collect();

        let mut samples = Vec::with_capacity(n_samples);
        for chunk in chunks {
            samples.extend(chunk?);
        }
        Ok(samples)
    }

    fn run_chunk<S: PayoffSampler>(
        &self,
        sampler: &S,
        chunk: usize,
        n_samples: usize,
    ) -> SimulationResult<Vec<S::Output>> {
        let chunk_size = self.config.chunk_size();
        let start = chunk * chunk_size;
        let len = chunk_size.min(n_samples - start);

        let mut rng = SimRng::for_stream(self.seed, chunk as u64);
        let mut workspace = PathWorkspace::new(sampler.n_steps());
        debug!(chunk, start, len, "Sampling chunk");

        (0..len)
            .map(|_| sampler.sample(&mut workspace, &mut rng))
            .collect()
    }

    fn announce(&self, scenario: &'static str, params: &SimulationParameters) {
        info!(
            scenario,
            seed = self.seed,
            spot = params.spot(),
            strike = params.strike(),
            volatility = params.volatility(),
            rate = params.rate(),
            maturity = params.maturity(),
            n_steps = params.n_steps(),
            n_samples = params.n_samples(),
            parallel = self.config.parallel(),
            "Starting Monte Carlo run"
        );
        if params.n_samples() < MIN_RELIABLE_SAMPLES {
            warn!(
                scenario,
                n_samples = params.n_samples(),
                "Sample count below {}; the 95% interval is unreliable",
                MIN_RELIABLE_SAMPLES
            );
        }
    }

    // ========================================================================
    // Scenarios
    // ========================================================================

    /// European put and call on shared terminal draws, with Black-Scholes references.
    ///
    /// # Errors
    ///
    /// Propagates sampling and reduction errors.
    pub fn price_european(
        &self,
        params: &SimulationParameters,
    ) -> SimulationResult<EuropeanReport> {
        self.announce("european", params);
        let samples = self.collect_samples(&EuropeanSampler::new(params), params.n_samples())?;

        let puts: Vec<f64> = samples.iter().map(|s| s.put).collect();
        let calls: Vec<f64> = samples.iter().map(|s| s.call).collect();
        let bs = BlackScholes::from_params(params);

        Ok(EuropeanReport {
            put: EstimateResult::from_samples_expecting(&puts, params.n_samples())?,
            bs_put: bs.price_put(params.strike(), params.maturity()),
            call: EstimateResult::from_samples_expecting(&calls, params.n_samples())?,
            bs_call: bs.price_call(params.strike(), params.maturity()),
            seed: self.seed,
        })
    }

    /// Finite-difference put delta `(V(S+h) − V(S)) / h`.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` if `params` has no bump; otherwise propagates
    /// sampling and reduction errors.
    pub fn estimate_delta(
        &self,
        params: &SimulationParameters,
        mode: DeltaMode,
    ) -> SimulationResult<DeltaReport> {
        let bump = params.require_bump()?;
        self.announce("delta", params);
        let sampler = BumpedSpotSampler::european_put(params, mode)?;
        let samples = self.collect_samples(&sampler, params.n_samples())?;

        let base_samples: Vec<f64> = samples.iter().map(|s| s.base).collect();
        let bumped_samples: Vec<f64> = samples.iter().map(|s| s.bumped).collect();
        let base = EstimateResult::from_samples_expecting(&base_samples, params.n_samples())?;
        let bumped = EstimateResult::from_samples_expecting(&bumped_samples, params.n_samples())?;

        let delta = match mode {
            DeltaMode::Independent => DeltaEstimate::from_independent_legs(&base, &bumped, bump)?,
            DeltaMode::CommonRandomNumbers => {
                let differences: Vec<f64> = samples.iter().map(|s| s.bumped - s.base).collect();
                DeltaEstimate::from_paired_differences(&differences, bump)?
            }
        };

        Ok(DeltaReport {
            delta,
            base,
            bumped,
            closed_form: BlackScholes::from_params(params)
                .put_delta(params.strike(), params.maturity()),
            mode,
            seed: self.seed,
        })
    }

    /// Arithmetic Asian call, crude and with the geometric control variate.
    ///
    /// Both estimates come from the same trajectories. The geometric closed
    /// form on the fixing dates is computed once and shared by every sample.
    /// The simulated geometric payoff also observes the spot, so the
    /// control-variate mean is offset from the crude mean by
    /// [`AsianReport::control_bias`].
    ///
    /// # Errors
    ///
    /// Propagates sampling and reduction errors.
    pub fn price_asian(&self, params: &SimulationParameters) -> SimulationResult<AsianReport> {
        self.announce("asian", params);
        let geometric_closed_form = geometric_asian_call(params).price;
        let geometric_grid_closed_form = geometric_asian_call_including_spot(params).price;
        let sampler =
            AsianControlVariateSampler::new(params, ControlVariate::new(geometric_closed_form));
        let samples = self.collect_samples(&sampler, params.n_samples())?;

        let arithmetic: Vec<f64> = samples.iter().map(|s| s.arithmetic).collect();
        let geometric: Vec<f64> = samples.iter().map(|s| s.geometric).collect();
        let adjusted: Vec<f64> = samples.iter().map(|s| s.adjusted).collect();

        let crude = EstimateResult::from_samples_expecting(&arithmetic, params.n_samples())?;
        let control_variate =
            EstimateResult::from_samples_expecting(&adjusted, params.n_samples())?;
        let variance_ratio = ControlVariate::variance_ratio(&crude, &control_variate);
        let control_bias = geometric_closed_form - geometric_grid_closed_form;
        debug!(?variance_ratio, control_bias, "Control variate diagnostics");

        Ok(AsianReport {
            crude,
            control_variate,
            geometric_closed_form,
            geometric_grid_closed_form,
            control_bias,
            geometric: EstimateResult::from_samples_expecting(&geometric, params.n_samples())?,
            variance_ratio,
            seed: self.seed,
        })
    }

    /// Down-and-out call, one trajectory per sample.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` if `params` has no barrier; otherwise propagates
    /// sampling and reduction errors.
    pub fn price_barrier(&self, params: &SimulationParameters) -> SimulationResult<BarrierReport> {
        let sampler = PathPayoffSampler::down_out_call(params)?;
        self.announce("barrier", params);
        let samples = self.collect_samples(&sampler, params.n_samples())?;
        self.barrier_report(params, &samples, false)
    }

    /// Down-and-out call, one antithetic pair average per sample.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` if `params` has no barrier; otherwise propagates
    /// sampling and reduction errors.
    pub fn price_barrier_antithetic(
        &self,
        params: &SimulationParameters,
    ) -> SimulationResult<BarrierReport> {
        let sampler = AntitheticSampler::down_out_call(params)?;
        self.announce("barrier_antithetic", params);
        let pairs = self.collect_samples(&sampler, params.n_samples())?;
        let samples: Vec<f64> = pairs.iter().map(|pair| pair.average()).collect();
        self.barrier_report(params, &samples, true)
    }

    fn barrier_report(
        &self,
        params: &SimulationParameters,
        samples: &[f64],
        antithetic: bool,
    ) -> SimulationResult<BarrierReport> {
        let barrier = params.require_barrier()?;
        Ok(BarrierReport {
            estimate: EstimateResult::from_samples_expecting(samples, params.n_samples())?,
            antithetic,
            closed_form_discrete: down_out_call_discrete(params)?,
            closed_form_continuous: down_out_call(params, barrier),
            seed: self.seed,
        })
    }
}

/// Lazy, restartable sample iterator returned by [`MonteCarloPricer::samples`].
pub struct Samples<'s, S: PayoffSampler> {
    sampler: &'s S,
    seed: u64,
    chunk_size: usize,
    n_samples: usize,
    index: usize,
    rng: SimRng,
    workspace: PathWorkspace,
    failed: bool,
}

impl<S: PayoffSampler> Iterator for Samples<'_, S> {
    type Item = SimulationResult<S::Output>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.index >= self.n_samples {
            return None;
        }
        if self.index % self.chunk_size == 0 {
            let chunk = (self.index / self.chunk_size) as u64;
            self.rng = SimRng::for_stream(self.seed, chunk);
        }
        self.index += 1;

        let sample = self.sampler.sample(&mut self.workspace, &mut self.rng);
        self.failed = sample.is_err();
        Some(sample)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.failed {
            return (0, Some(0));
        }
        let remaining = self.n_samples - self.index;
        (0, Some(remaining))
    }
}
