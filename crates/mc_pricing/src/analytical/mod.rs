//! Closed-form reference values.
//!
//! - [`black_scholes`]: European call/put prices and deltas
//! - [`asian`]: discretely monitored geometric-average Asian call
//! - [`barrier`]: down-and-out call, continuous monitoring with an optional
//!   discrete-monitoring shift of the barrier
//!
//! These are deterministic and evaluated once per run. The Monte Carlo
//! estimators are validated against them in the integration tests, and the
//! geometric Asian value doubles as the control-variate expectation.

pub mod asian;
pub mod barrier;
pub mod black_scholes;

pub use asian::{
    control_bias, geometric_asian_call, geometric_asian_call_including_spot, GeometricAsianResult,
};
pub use barrier::{discrete_barrier_shift, down_out_call, down_out_call_discrete};
pub use black_scholes::BlackScholes;
