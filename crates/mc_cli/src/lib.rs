//! mc-validate: runs the Monte Carlo validation scenarios from the command line.
//!
//! # Commands
//!
//! - `mc-validate european` - European put and call against Black-Scholes
//! - `mc-validate delta` - finite-difference put delta
//! - `mc-validate asian` - arithmetic Asian call with geometric control variate
//! - `mc-validate barrier [--antithetic]` - discretely monitored down-and-out call
//! - `mc-validate all` - every scenario with one seed
//! - `mc-validate check` - validate configuration and print closed forms
//!
//! # Architecture
//!
//! As the **S**ervice layer this crate owns all I/O: it resolves
//! [`config::ScenarioConfig`], builds the engine in [`commands::Context`] and
//! renders reports through [`output`].

pub mod commands;
pub mod config;
pub mod error;
pub mod output;

pub use error::{CliError, Result};
