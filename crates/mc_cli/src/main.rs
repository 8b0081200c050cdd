//! mc-validate binary entry point.

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use mc_cli::commands::{self, Context};
use mc_cli::config::{Overrides, ScenarioConfig};
use mc_cli::output::OutputFormat;
use mc_cli::Result;
use mc_pricing::mc::DeltaMode;
use tracing::{debug, error};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Monte Carlo option pricing validation runner
#[derive(Parser)]
#[command(name = "mc-validate")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// TOML scenario configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Run seed (drawn from entropy and logged when omitted)
    #[arg(short, long, global = true)]
    seed: Option<u64>,

    /// Sample count M for every scenario
    #[arg(short = 'm', long, global = true)]
    samples: Option<usize>,

    /// Sample chunks in parallel
    #[arg(short, long, global = true)]
    parallel: bool,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// European put and call against Black-Scholes
    European,

    /// Finite-difference delta of the European put
    Delta {
        /// Reuse the same draws for both legs
        #[arg(long)]
        common_random_numbers: bool,
    },

    /// Arithmetic Asian call with the geometric control variate
    Asian,

    /// Discretely monitored down-and-out call
    Barrier {
        /// Sample antithetic pairs
        #[arg(short, long)]
        antithetic: bool,
    },

    /// Run every scenario
    All,

    /// Validate configuration and print closed-form references
    Check,
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn resolve_config(cli: &Cli) -> Result<ScenarioConfig> {
    let overrides = Overrides {
        seed: cli.seed,
        samples: cli.samples,
        parallel: cli.parallel,
    };
    let mut config = ScenarioConfig::load_or_default(cli.config.as_deref())?
        .with_env_override()?
        .with_cli_override(&overrides);

    if matches!(
        cli.command,
        Commands::Delta {
            common_random_numbers: true
        }
    ) {
        config.delta.mode = DeltaMode::CommonRandomNumbers;
    }

    config.validate()?;
    debug!(?config, "Resolved configuration");
    Ok(config)
}

fn run(cli: Cli) -> Result<()> {
    let config = resolve_config(&cli)?;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    let format = cli.format;
    let context = |config: ScenarioConfig| Context::new(config, format);

    match cli.command {
        Commands::Check => commands::check::run(&config, format, &mut out)?,
        Commands::European => commands::european::run(&context(config)?, &mut out)?,
        Commands::Delta { .. } => commands::delta::run(&context(config)?, &mut out)?,
        Commands::Asian => commands::asian::run(&context(config)?, &mut out)?,
        Commands::Barrier { antithetic } => {
            let antithetic = antithetic || config.barrier.antithetic;
            commands::barrier::run(&context(config)?, antithetic, &mut out)?
        }
        Commands::All => commands::all::run(&context(config)?, &mut out)?,
    }

    out.flush()?;
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "mc-validate failed");
            ExitCode::FAILURE
        }
    }
}
