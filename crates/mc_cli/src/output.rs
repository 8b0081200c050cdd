//! Report rendering for `--format table|json`.

use std::fmt::Write as _;
use std::io::Write;

use clap::ValueEnum;
use mc_pricing::mc::{
    AsianReport, BarrierReport, DeltaEstimate, DeltaReport, EstimateResult, EuropeanReport,
};
use serde::Serialize;

use crate::Result;

/// Output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    #[default]
    Table,
    /// JSON document
    Json,
}

/// What the third column of a row shows.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Detail {
    Interval(f64, f64),
    ClosedForm,
    Diagnostic,
}

/// One table line: an estimate with its interval, a closed-form value, or a
/// run diagnostic.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    label: String,
    value: f64,
    detail: Detail,
}

impl Row {
    /// Monte Carlo estimate with its 95% interval.
    pub fn estimate(label: impl Into<String>, estimate: &EstimateResult) -> Self {
        Self {
            label: label.into(),
            value: estimate.mean(),
            detail: interval(estimate.confidence_interval()),
        }
    }

    /// Finite-difference delta with its 95% interval.
    pub fn delta(label: impl Into<String>, delta: &DeltaEstimate) -> Self {
        Self {
            label: label.into(),
            value: delta.delta(),
            detail: interval(delta.confidence_interval()),
        }
    }

    /// Closed-form value.
    pub fn exact(label: impl Into<String>, value: f64) -> Self {
        Self {
            label: label.into(),
            value,
            detail: Detail::ClosedForm,
        }
    }

    /// Derived quantity that is neither an estimate nor a closed form.
    pub fn diagnostic(label: impl Into<String>, value: f64) -> Self {
        Self {
            label: label.into(),
            value,
            detail: Detail::Diagnostic,
        }
    }
}

fn interval((low, high): (f64, f64)) -> Detail {
    Detail::Interval(low, high)
}

/// A titled table of rows.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    title: String,
    rows: Vec<Row>,
}

impl Table {
    /// Empty table
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            rows: Vec::new(),
        }
    }

    /// Append a row
    pub fn row(mut self, row: Row) -> Self {
        self.rows.push(row);
        self
    }

    /// Render with box-drawing borders
    pub fn render(&self) -> String {
        const LABEL: usize = 24;
        const VALUE: usize = 12;
        const INTERVAL: usize = 25;

        let rule = |left: &str, mid: &str, right: &str| {
            format!(
                "{}{}{}{}{}{}{}\n",
                left,
                "─".repeat(LABEL + 2),
                mid,
                "─".repeat(VALUE + 2),
                mid,
                "─".repeat(INTERVAL + 2),
                right
            )
        };

        let mut out = String::new();
        let _ = writeln!(out, "\n{}", self.title);
        out.push_str(&rule("┌", "┬", "┐"));
        let _ = writeln!(
            out,
            "│ {:<LABEL$} │ {:>VALUE$} │ {:^INTERVAL$} │",
            "Quantity", "Value", "95% CI"
        );
        out.push_str(&rule("├", "┼", "┤"));
        for row in &self.rows {
            let interval = match row.detail {
                Detail::Interval(low, high) => format!("[{:.6}, {:.6}]", low, high),
                Detail::ClosedForm => "(closed form)".to_string(),
                Detail::Diagnostic => "(diagnostic)".to_string(),
            };
            let _ = writeln!(
                out,
                "│ {:<LABEL$} │ {:>VALUE$.6} │ {:^INTERVAL$} │",
                row.label, row.value, interval
            );
        }
        out.push_str(&rule("└", "┴", "┘"));
        out
    }
}

/// European: put CI, Black-Scholes put, call CI, Black-Scholes call.
pub fn european_table(report: &EuropeanReport) -> Table {
    Table::new(format!(
        "European options (M = {}, seed = {})",
        report.put.n_samples(),
        report.seed
    ))
    .row(Row::estimate("put", &report.put))
    .row(Row::exact("put (Black-Scholes)", report.bs_put))
    .row(Row::estimate("call", &report.call))
    .row(Row::exact("call (Black-Scholes)", report.bs_call))
}

/// Delta: estimate with CI, then the closed form Φ(d₁) − 1.
pub fn delta_table(report: &DeltaReport) -> Table {
    Table::new(format!(
        "European put delta (M = {}, h = {}, {:?}, seed = {})",
        report.delta.n_samples(),
        report.delta.bump(),
        report.mode,
        report.seed
    ))
    .row(Row::delta("delta", &report.delta))
    .row(Row::exact("delta (Black-Scholes)", report.closed_form))
}

/// Asian: crude, control variate, both geometric closed forms, then the
/// control bias and the variance ratio.
pub fn asian_table(report: &AsianReport) -> Table {
    let mut table = Table::new(format!(
        "Arithmetic Asian call (M = {}, seed = {})",
        report.crude.n_samples(),
        report.seed
    ))
    .row(Row::estimate("crude", &report.crude))
    .row(Row::estimate("control variate", &report.control_variate))
    .row(Row::exact("geometric (fixing dates)", report.geometric_closed_form))
    .row(Row::exact("geometric (full grid)", report.geometric_grid_closed_form))
    .row(Row::diagnostic("control bias", report.control_bias));
    if let Some(ratio) = report.variance_ratio {
        table = table.row(Row::diagnostic("variance ratio", ratio));
    }
    table
}

/// Barrier: estimate with CI, then shifted and continuous closed forms.
pub fn barrier_table(report: &BarrierReport) -> Table {
    let sampling = if report.antithetic {
        "antithetic pairs"
    } else {
        "plain"
    };
    Table::new(format!(
        "Down-and-out call, {} (M = {}, seed = {})",
        sampling,
        report.estimate.n_samples(),
        report.seed
    ))
    .row(Row::estimate("down-and-out call", &report.estimate))
    .row(Row::exact("discrete (shifted barrier)", report.closed_form_discrete))
    .row(Row::exact("continuous monitoring", report.closed_form_continuous))
}

/// Write `tables` or `value` to `out` in the requested format.
pub fn emit<W, T>(out: &mut W, format: OutputFormat, value: &T, tables: &[Table]) -> Result<()>
where
    W: Write,
    T: Serialize,
{
    match format {
        OutputFormat::Table => {
            for table in tables {
                out.write_all(table.render().as_bytes())?;
            }
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, value)?;
            writeln!(out)?;
        }
    }
    Ok(())
}
