//! Asian command implementation

use std::io::Write;

use mc_pricing::mc::AsianReport;

use super::Context;
use crate::output::{asian_table, emit};
use crate::Result;

/// Run the arithmetic Asian scenario with the geometric control variate
pub fn execute(ctx: &Context) -> Result<AsianReport> {
    let params = ctx.config.asian.parameters()?;
    Ok(ctx.pricer.price_asian(&params)?)
}

/// Run and write the Asian scenario
pub fn run<W: Write>(ctx: &Context, out: &mut W) -> Result<()> {
    let report = execute(ctx)?;
    emit(out, ctx.format, &report, &[asian_table(&report)])
}
