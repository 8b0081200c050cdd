//! Scenario configuration management.
//!
//! Values are resolved in layers: built-in defaults (the reference run
//! constants), an optional TOML file, the `MC_SEED` / `MC_SAMPLES` /
//! `MC_PARALLEL` environment variables, and finally command line flags via
//! [`Overrides`]. Tables or fields missing from the file keep their defaults.
//!
//! ```toml
//! [run]
//! seed = 42
//! parallel = true
//!
//! [asian]
//! n_samples = 50000
//!
//! [barrier]
//! antithetic = true
//! ```

use std::path::{Path, PathBuf};

use mc_core::{SimulationParameters, SimulationResult};
use mc_pricing::mc::{DeltaMode, MonteCarloConfig, DEFAULT_CHUNK_SIZE};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Environment variable overriding the run seed.
pub const ENV_SEED: &str = "MC_SEED";
/// Environment variable overriding the sample count of every scenario.
pub const ENV_SAMPLES: &str = "MC_SAMPLES";
/// Environment variable enabling parallel sampling.
pub const ENV_PARALLEL: &str = "MC_PARALLEL";

/// Configuration error type
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("Failed to read {}: {}", .path.display(), .source)]
    Io {
        /// Path that was read
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for [`ScenarioConfig`]
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// Environment variable holds an unparsable value
    #[error("Invalid value '{value}' for {var}")]
    Env {
        /// Variable name
        var: &'static str,
        /// Raw value
        value: String,
    },

    /// One or more scenario tables fail validation
    #[error("Validation errors: {}", .0.join("; "))]
    Validation(Vec<String>),
}

// ============================================================================
// Tables
// ============================================================================

/// `[run]`: engine settings shared by every scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunConfig {
    /// Run seed; drawn from entropy and logged when absent.
    pub seed: Option<u64>,
    /// Sample chunks on the rayon pool.
    pub parallel: bool,
    /// Samples per RNG stream.
    pub chunk_size: usize,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            seed: None,
            parallel: false,
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

impl RunConfig {
    /// Engine configuration for these settings.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` if the chunk size is out of range.
    pub fn monte_carlo_config(&self) -> SimulationResult<MonteCarloConfig> {
        MonteCarloConfig::builder()
            .maybe_seed(self.seed)
            .parallel(self.parallel)
            .chunk_size(self.chunk_size)
            .build()
    }
}

/// `[european]`: put and call against Black-Scholes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EuropeanConfig {
    /// Spot S
    pub spot: f64,
    /// Strike E
    pub strike: f64,
    /// Volatility σ
    pub volatility: f64,
    /// Risk-free rate r
    pub rate: f64,
    /// Maturity T in years
    pub maturity: f64,
    /// Steps per trajectory N
    pub n_steps: usize,
    /// Samples M
    pub n_samples: usize,
}

impl Default for EuropeanConfig {
    fn default() -> Self {
        Self {
            spot: 50.0,
            strike: 52.0,
            volatility: 0.1,
            rate: 0.06,
            maturity: 1.0,
            n_steps: 1,
            n_samples: 100,
        }
    }
}

impl EuropeanConfig {
    /// Validated run parameters.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` for any out-of-domain value.
    pub fn parameters(&self) -> SimulationResult<SimulationParameters> {
        SimulationParameters::builder()
            .spot(self.spot)
            .strike(self.strike)
            .volatility(self.volatility)
            .rate(self.rate)
            .maturity(self.maturity)
            .n_steps(self.n_steps)
            .n_samples(self.n_samples)
            .build()
    }
}

/// `[delta]`: finite-difference put delta.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DeltaConfig {
    /// Spot S
    pub spot: f64,
    /// Strike E
    pub strike: f64,
    /// Volatility σ
    pub volatility: f64,
    /// Risk-free rate r
    pub rate: f64,
    /// Maturity T in years
    pub maturity: f64,
    /// Steps per trajectory N
    pub n_steps: usize,
    /// Samples M
    pub n_samples: usize,
    /// Spot perturbation h
    pub bump: f64,
    /// Whether the two legs share draws
    pub mode: DeltaMode,
}

impl Default for DeltaConfig {
    fn default() -> Self {
        Self {
            spot: 50.0,
            strike: 52.0,
            volatility: 0.1,
            rate: 0.06,
            maturity: 1.0,
            n_steps: 1,
            n_samples: 100,
            bump: 0.1,
            mode: DeltaMode::Independent,
        }
    }
}

impl DeltaConfig {
    /// Validated run parameters, including the bump.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` for any out-of-domain value.
    pub fn parameters(&self) -> SimulationResult<SimulationParameters> {
        SimulationParameters::builder()
            .spot(self.spot)
            .strike(self.strike)
            .volatility(self.volatility)
            .rate(self.rate)
            .maturity(self.maturity)
            .n_steps(self.n_steps)
            .n_samples(self.n_samples)
            .bump(self.bump)
            .build()
    }
}

/// `[asian]`: arithmetic Asian call with geometric control variate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AsianConfig {
    /// Spot S
    pub spot: f64,
    /// Strike E
    pub strike: f64,
    /// Volatility σ
    pub volatility: f64,
    /// Risk-free rate r
    pub rate: f64,
    /// Maturity T in years
    pub maturity: f64,
    /// Observation spacing Δt; must divide T
    pub time_step: f64,
    /// Samples M
    pub n_samples: usize,
}

impl Default for AsianConfig {
    fn default() -> Self {
        Self {
            spot: 4.0,
            strike: 4.0,
            volatility: 0.25,
            rate: 0.03,
            maturity: 1.0,
            time_step: 0.01,
            n_samples: 10_000,
        }
    }
}

impl AsianConfig {
    /// Validated run parameters with N = T / Δt.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` for any out-of-domain value or a Δt that does not divide T.
    pub fn parameters(&self) -> SimulationResult<SimulationParameters> {
        SimulationParameters::builder()
            .spot(self.spot)
            .strike(self.strike)
            .volatility(self.volatility)
            .rate(self.rate)
            .maturity(self.maturity)
            .time_step(self.time_step)
            .n_samples(self.n_samples)
            .build()
    }
}

/// `[barrier]`: discretely monitored down-and-out call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BarrierConfig {
    /// Spot S
    pub spot: f64,
    /// Strike E
    pub strike: f64,
    /// Volatility σ
    pub volatility: f64,
    /// Risk-free rate r
    pub rate: f64,
    /// Maturity T in years
    pub maturity: f64,
    /// Steps per trajectory N
    pub n_steps: usize,
    /// Down-and-out barrier B
    pub barrier: f64,
    /// Samples M for plain sampling
    pub n_samples: usize,
    /// Antithetic pairs M for antithetic sampling
    pub antithetic_samples: usize,
    /// Use antithetic pairs by default
    pub antithetic: bool,
}

impl Default for BarrierConfig {
    fn default() -> Self {
        Self {
            spot: 55.0,
            strike: 52.0,
            volatility: 0.1,
            rate: 0.06,
            maturity: 1.0,
            n_steps: 100,
            barrier: 49.0,
            n_samples: 5_000,
            antithetic_samples: 2_500,
            antithetic: false,
        }
    }
}

impl BarrierConfig {
    /// Validated run parameters; `antithetic` selects the pair count.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` for any out-of-domain value or a barrier at or above spot.
    pub fn parameters(&self, antithetic: bool) -> SimulationResult<SimulationParameters> {
        let n_samples = if antithetic {
            self.antithetic_samples
        } else {
            self.n_samples
        };
        SimulationParameters::builder()
            .spot(self.spot)
            .strike(self.strike)
            .volatility(self.volatility)
            .rate(self.rate)
            .maturity(self.maturity)
            .n_steps(self.n_steps)
            .n_samples(n_samples)
            .barrier(self.barrier)
            .build()
    }
}

// ============================================================================
// Full configuration
// ============================================================================

/// Command line overrides, applied after file and environment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Overrides {
    /// `--seed`
    pub seed: Option<u64>,
    /// `--samples`
    pub samples: Option<usize>,
    /// `--parallel`
    pub parallel: bool,
}

/// Complete mc-validate configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScenarioConfig {
    /// Engine settings
    pub run: RunConfig,
    /// European scenario
    pub european: EuropeanConfig,
    /// Delta scenario
    pub delta: DeltaConfig,
    /// Asian scenario
    pub asian: AsianConfig,
    /// Barrier scenario
    pub barrier: BarrierConfig,
}

impl ScenarioConfig {
    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Load from `path` if given, otherwise start from the defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Apply `MC_SEED`, `MC_SAMPLES` and `MC_PARALLEL` from the process environment
    pub fn with_env_override(self) -> Result<Self, ConfigError> {
        self.with_overrides_from(|var| std::env::var(var).ok())
    }

    /// Apply environment-style overrides read through `lookup`
    pub fn with_overrides_from<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(ENV_SEED) {
            let seed = value.trim().parse().map_err(|_| ConfigError::Env {
                var: ENV_SEED,
                value: value.clone(),
            })?;
            self.run.seed = Some(seed);
        }

        if let Some(value) = lookup(ENV_SAMPLES) {
            let samples = value.trim().parse().map_err(|_| ConfigError::Env {
                var: ENV_SAMPLES,
                value: value.clone(),
            })?;
            self.set_samples(samples);
        }

        if let Some(value) = lookup(ENV_PARALLEL) {
            self.run.parallel = parse_flag(&value).ok_or(ConfigError::Env {
                var: ENV_PARALLEL,
                value: value.clone(),
            })?;
        }

        Ok(self)
    }

    /// Apply command line overrides
    pub fn with_cli_override(mut self, overrides: &Overrides) -> Self {
        if let Some(seed) = overrides.seed {
            self.run.seed = Some(seed);
        }
        if let Some(samples) = overrides.samples {
            self.set_samples(samples);
        }
        if overrides.parallel {
            self.run.parallel = true;
        }
        self
    }

    /// Set M for every scenario, antithetic pair count included
    pub fn set_samples(&mut self, n_samples: usize) {
        self.european.n_samples = n_samples;
        self.delta.n_samples = n_samples;
        self.asian.n_samples = n_samples;
        self.barrier.n_samples = n_samples;
        self.barrier.antithetic_samples = n_samples;
    }

    /// Validate every table, collecting all failures
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        let mut check = |table: &str, result: SimulationResult<()>| {
            if let Err(err) = result {
                errors.push(format!("{}: {}", table, err));
            }
        };

        check("run", self.run.monte_carlo_config().map(drop));
        check("european", self.european.parameters().map(drop));
        check("delta", self.delta.parameters().map(drop));
        check("asian", self.asian.parameters().map(drop));
        check("barrier", self.barrier.parameters(false).map(drop));
        check("barrier (antithetic)", self.barrier.parameters(true).map(drop));

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
