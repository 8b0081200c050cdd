//! All command implementation
//!
//! Runs every scenario in reference order with one run seed.

use std::io::Write;

use mc_pricing::mc::{AsianReport, BarrierReport, DeltaReport, EuropeanReport};
use serde::Serialize;
use tracing::info;

use super::{asian, barrier, delta, european, Context};
use crate::output::{asian_table, barrier_table, delta_table, emit, european_table};
use crate::Result;

/// Reports of every scenario.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AllReport {
    /// European put and call
    pub european: EuropeanReport,
    /// Put delta
    pub delta: DeltaReport,
    /// Arithmetic Asian call
    pub asian: AsianReport,
    /// Down-and-out call, plain sampling
    pub barrier: BarrierReport,
    /// Down-and-out call, antithetic pairs
    pub barrier_antithetic: BarrierReport,
}

/// Run every scenario
pub fn execute(ctx: &Context) -> Result<AllReport> {
    let report = AllReport {
        european: european::execute(ctx)?,
        delta: delta::execute(ctx)?,
        asian: asian::execute(ctx)?,
        barrier: barrier::execute(ctx, false)?,
        barrier_antithetic: barrier::execute(ctx, true)?,
    };
    info!(seed = ctx.pricer.seed(), "All scenarios complete");
    Ok(report)
}

/// Run and write every scenario
pub fn run<W: Write>(ctx: &Context, out: &mut W) -> Result<()> {
    let report = execute(ctx)?;
    let tables = [
        european_table(&report.european),
        delta_table(&report.delta),
        asian_table(&report.asian),
        barrier_table(&report.barrier),
        barrier_table(&report.barrier_antithetic),
    ];
    emit(out, ctx.format, &report, &tables)
}
