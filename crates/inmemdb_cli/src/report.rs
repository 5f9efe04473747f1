//! End-of-session statistics report.

use crate::error::CliResult;
use clap::ValueEnum;
use inmemdb_core::StatsSnapshot;
use std::io::Write;

/// Output format for the stats report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StatsFormat {
    /// Human-readable table.
    Text,
    /// Pretty-printed JSON object.
    Json,
}

/// Writes `stats` to `out` in the requested format.
pub fn write_stats<W: Write>(
    out: &mut W,
    stats: &StatsSnapshot,
    format: StatsFormat,
) -> CliResult<()> {
    match format {
        StatsFormat::Json => {
            writeln!(out, "{}", serde_json::to_string_pretty(stats)?)?;
        }
        StatsFormat::Text => write_text(out, stats)?,
    }
    out.flush()?;
    Ok(())
}

fn write_text<W: Write>(out: &mut W, stats: &StatsSnapshot) -> CliResult<()> {
    writeln!(out, "InMemDB Session Statistics")?;
    writeln!(out, "==========================")?;
    writeln!(out)?;
    writeln!(out, "Data commands:")?;
    writeln!(out, "  SET:        {}", stats.sets)?;
    writeln!(out, "  GET:        {}", stats.gets)?;
    writeln!(out, "  UNSET:      {}", stats.unsets)?;
    writeln!(out, "  NUMEQUALTO: {}", stats.count_queries)?;
    writeln!(out)?;
    writeln!(out, "Transactions:")?;
    writeln!(out, "  Begun:           {}", stats.transactions_begun)?;
    writeln!(out, "  Rolled back:     {}", stats.transactions_rolled_back)?;
    writeln!(
        out,
        "  Commits:         {} ({} blocks)",
        stats.commits, stats.frames_committed
    )?;
    writeln!(out, "  Values restored: {}", stats.prior_states_restored)?;

    if stats.rejected_arguments > 0 {
        writeln!(out)?;
        writeln!(out, "Rejected arguments: {}", stats.rejected_arguments)?;
    }
    Ok(())
}
