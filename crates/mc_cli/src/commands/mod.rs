//! CLI command implementations
//!
//! Each submodule implements one subcommand. `execute` runs the scenario and
//! returns its report; `run` also writes it in the selected format.

pub mod all;
pub mod asian;
pub mod barrier;
pub mod check;
pub mod delta;
pub mod european;

use mc_pricing::mc::MonteCarloPricer;
use tracing::info;

use crate::config::ScenarioConfig;
use crate::output::OutputFormat;
use crate::Result;

/// Resolved configuration and engine shared by the scenario commands.
#[derive(Debug, Clone)]
pub struct Context {
    /// Validated configuration
    pub config: ScenarioConfig,
    /// Engine with the resolved run seed
    pub pricer: MonteCarloPricer,
    /// Output format
    pub format: OutputFormat,
}

impl Context {
    /// Build the engine for `config`.
    pub fn new(config: ScenarioConfig, format: OutputFormat) -> Result<Self> {
        let pricer = MonteCarloPricer::new(config.run.monte_carlo_config()?)?;
        info!(
            seed = pricer.seed(),
            parallel = config.run.parallel,
            chunk_size = config.run.chunk_size,
            "Engine ready"
        );
        Ok(Self {
            config,
            pricer,
            format,
        })
    }
}
