//! Delta command implementation
//!
//! Finite-difference put delta from perturbed-spot legs, against the
//! closed form Φ(d₁) − 1.

use std::io::Write;

use mc_pricing::mc::DeltaReport;

use super::Context;
use crate::output::{delta_table, emit};
use crate::Result;

/// Run the delta scenario in the configured draw-sharing mode
pub fn execute(ctx: &Context) -> Result<DeltaReport> {
    let params = ctx.config.delta.parameters()?;
    Ok(ctx.pricer.estimate_delta(&params, ctx.config.delta.mode)?)
}

/// Run and write the delta scenario
pub fn run<W: Write>(ctx: &Context, out: &mut W) -> Result<()> {
    let report = execute(ctx)?;
    emit(out, ctx.format, &report, &[delta_table(&report)])
}
