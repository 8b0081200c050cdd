//! # mc_core (Layer 1: Foundation)
//!
//! Foundation types shared by the Monte Carlo pricing kernel and the CLI:
//!
//! - [`types::SimulationParameters`]: immutable, validated run parameters
//! - [`types::SimulationError`]: precondition and numeric-domain failures
//! - [`math::distributions`]: standard normal CDF and the error function
//!
//! This crate has no knowledge of random numbers or paths; it only defines
//! the vocabulary the pricing layer is written in.
//!
//! ## Usage Example
//!
//! ```rust
//! use mc_core::types::SimulationParameters;
//!
//! let params = SimulationParameters::builder()
//!     .spot(50.0)
//!     .strike(52.0)
//!     .volatility(0.1)
//!     .rate(0.06)
//!     .maturity(1.0)
//!     .n_steps(1)
//!     .n_samples(100)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(params.dt(), 1.0);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod math;
pub mod types;

pub use types::{SimulationError, SimulationParameters, SimulationResult};
