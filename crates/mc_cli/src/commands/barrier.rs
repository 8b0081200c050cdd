//! Barrier command implementation
//!
//! Down-and-out call, plain or with antithetic pairs. The antithetic run
//! uses the `antithetic_samples` pair count from the `[barrier]` table.

use std::io::Write;

use mc_pricing::mc::BarrierReport;

use super::Context;
use crate::output::{barrier_table, emit};
use crate::Result;

/// Run the barrier scenario
pub fn execute(ctx: &Context, antithetic: bool) -> Result<BarrierReport> {
    let params = ctx.config.barrier.parameters(antithetic)?;
    let report = if antithetic {
        ctx.pricer.price_barrier_antithetic(&params)?
    } else {
        ctx.pricer.price_barrier(&params)?
    };
    Ok(report)
}

/// Run and write the barrier scenario
pub fn run<W: Write>(ctx: &Context, antithetic: bool, out: &mut W) -> Result<()> {
    let report = execute(ctx, antithetic)?;
    emit(out, ctx.format, &report, &[barrier_table(&report)])
}
