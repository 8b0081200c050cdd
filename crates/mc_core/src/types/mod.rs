//! Core types for Monte Carlo simulation runs.
//!
//! This module provides:
//! - `SimulationError`: Structured failures for invalid inputs and numeric domain violations
//! - `SimulationParameters`: Immutable run parameters with builder-time validation

pub mod error;
pub mod params;

pub use error::{SimulationError, SimulationResult};
pub use params::{SimulationParameters, SimulationParametersBuilder};
