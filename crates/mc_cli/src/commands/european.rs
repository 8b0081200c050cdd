//! European command implementation
//!
//! Prices a European put and call on shared draws and compares both with
//! Black-Scholes.

use std::io::Write;

use mc_pricing::mc::EuropeanReport;

use super::Context;
use crate::output::{emit, european_table};
use crate::Result;

/// Run the European scenario
pub fn execute(ctx: &Context) -> Result<EuropeanReport> {
    let params = ctx.config.european.parameters()?;
    Ok(ctx.pricer.price_european(&params)?)
}

/// Run and write the European scenario
pub fn run<W: Write>(ctx: &Context, out: &mut W) -> Result<()> {
    let report = execute(ctx)?;
    emit(out, ctx.format, &report, &[european_table(&report)])
}
