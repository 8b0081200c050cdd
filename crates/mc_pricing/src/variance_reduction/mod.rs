//! Variance reduction techniques.
//!
//! - [`ControlVariate`]: shift a target payoff by a correlated control with
//!   known expectation, `z = target + c·(E[control] − control)`
//! - [`AntitheticPair`]: average the payoffs of a trajectory and its
//!   mirror built from the negated draws
//!
//! Both act *within* a single sample. Outer samples remain independent, so
//! the usual confidence interval over the adjusted samples stays valid.

mod antithetic;
mod control_variate;

pub use antithetic::AntitheticPair;
pub use control_variate::ControlVariate;
