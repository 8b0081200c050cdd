//! Payoff evaluation on simulated trajectories.
//!
//! Every payoff is computed from a single streaming pass over the
//! observations of a validated [`Trajectory`](crate::mc::Trajectory)
//! ([`PathObserver`]) and returns `discount · intrinsic`:
//!
//! | Payoff | Intrinsic value |
//! |--------|-----------------|
//! | European call / put | `max(S_N − E, 0)` / `max(E − S_N, 0)` |
//! | Arithmetic Asian call | `max(mean(S_0..S_N) − E, 0)` |
//! | Geometric Asian call | `max(exp(mean(ln S_0..ln S_N)) − E, 0)` |
//! | Down-and-out call | `max(S_N − E, 0)` if `min(S_0..S_N) > B`, else `0` |
//!
//! [`PathPayoffType`] provides static dispatch over all of them.

mod asian;
mod barrier;
mod european;
mod observer;
mod payoff;
mod payoff_type;

pub use asian::{AsianArithmeticPayoff, AsianGeometricPayoff};
pub use barrier::BarrierPayoff;
pub use european::EuropeanPayoff;
pub use observer::PathObserver;
pub use payoff::{OptionKind, PathDependentPayoff};
pub use payoff_type::PathPayoffType;
