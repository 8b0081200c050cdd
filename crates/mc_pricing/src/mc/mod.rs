//! Monte Carlo simulation engine.
//!
//! # Architecture
//!
//! ```text
//! MonteCarloPricer
//! ├── MonteCarloConfig   (seed, parallelism, chunk size)
//! ├── PayoffSampler      (one sample per call)
//! │   ├── PathPayoffSampler / EuropeanSampler
//! │   ├── AsianControlVariateSampler
//! │   ├── AntitheticSampler
//! │   └── BumpedSpotSampler
//! ├── PathWorkspace      (per-chunk normal and trajectory buffers)
//! ├── SimRng             (one stream per chunk)
//! └── EstimateResult     (mean, population std dev, 95% interval)
//! ```
//!
//! Samples are drawn in chunks of [`MonteCarloConfig::chunk_size`]. Chunk `k`
//! always uses stream `k` of the run seed, so enabling `parallel` changes
//! neither the samples nor the estimates.
//!
//! # Examples
//!
//! ```rust
//! use mc_core::SimulationParameters;
//! use mc_pricing::mc::{MonteCarloConfig, MonteCarloPricer};
//!
//! let params = SimulationParameters::builder()
//!     .spot(55.0).strike(52.0).volatility(0.1).rate(0.06)
//!     .maturity(1.0).n_steps(100).n_samples(2_000)
//!     .barrier(49.0)
//!     .build()
//!     .unwrap();
//!
//! let config = MonteCarloConfig::builder().seed(7).parallel(true).build().unwrap();
//! let pricer = MonteCarloPricer::new(config).unwrap();
//!
//! let report = pricer.price_barrier_antithetic(&params).unwrap();
//! assert_eq!(report.estimate.n_samples(), 2_000);
//! ```

pub mod config;
pub mod estimator;
pub mod paths;
pub mod pricer;
pub mod report;
pub mod sampler;
pub mod workspace;

pub use config::{MonteCarloConfig, MonteCarloConfigBuilder, DEFAULT_CHUNK_SIZE, MAX_CHUNK_SIZE};
pub use estimator::{DeltaEstimate, EstimateResult, Z_95};
pub use paths::{
    generate_antithetic_pair, generate_trajectory, generate_trajectory_into, GbmStepper,
    NoiseSign, Trajectory,
};
pub use pricer::{MonteCarloPricer, Samples, MIN_RELIABLE_SAMPLES};
pub use report::{AsianReport, BarrierReport, DeltaReport, EuropeanReport};
pub use sampler::{
    AntitheticSampler, AsianControlVariateSampler, AsianSample, BumpedSpotSampler, DeltaMode,
    DeltaSample, EuropeanSample, EuropeanSampler, PathPayoffSampler, PayoffSampler,
};
pub use workspace::PathWorkspace;
