//! Session statistics report.

use crate::config::StatsFormat;
use crate::error::CliResult;
use memdb_core::{Session, StatsSnapshot};
use serde::Serialize;
use std::io::Write;

/// Statistics printed when a session finishes.
#[derive(Debug, Serialize)]
pub struct StatsReport {
    /// Committed names at exit.
    pub committed_names: usize,
    /// Transactions still open at exit (discarded).
    pub open_transactions: usize,
    /// Lines read from input.
    pub lines_read: usize,
    /// Operation counters.
    pub operations: OperationCounts,
}

/// Operation counters, as reported.
#[derive(Debug, Serialize)]
pub struct OperationCounts {
    /// GET operations.
    pub gets: u64,
    /// SET operations.
    pub sets: u64,
    /// DELETE operations.
    pub deletes: u64,
    /// COUNT operations.
    pub counts: u64,
    /// Transactions begun.
    pub begins: u64,
    /// Effective commits.
    pub commits: u64,
    /// Transactions rolled back.
    pub rollbacks: u64,
    /// Rollbacks rejected for lack of a transaction.
    pub failed_rollbacks: u64,
    /// Deepest nesting reached.
    pub max_depth: u64,
}

impl From<StatsSnapshot> for OperationCounts {
    fn from(snap: StatsSnapshot) -> Self {
        Self {
            gets: snap.gets,
            sets: snap.sets,
            deletes: snap.deletes,
            counts: snap.counts,
            begins: snap.begins,
            commits: snap.commits,
            rollbacks: snap.rollbacks,
            failed_rollbacks: snap.failed_rollbacks,
            max_depth: snap.max_depth,
        }
    }
}

impl StatsReport {
    /// Builds a report from a finished session.
    #[must_use]
    pub fn new(session: &Session, lines_read: usize) -> Self {
        Self {
            committed_names: session.store().len(),
            open_transactions: session.depth(),
            lines_read,
            operations: session.stats().snapshot().into(),
        }
    }

    /// Writes the report in the requested format.
    pub fn write_to<W: Write>(&self, out: &mut W, format: StatsFormat) -> CliResult<()> {
        match format {
            StatsFormat::Json => {
                writeln!(out, "{}", serde_json::to_string_pretty(self)?)?;
            }
            StatsFormat::Text => self.write_text(out)?,
        }
        Ok(())
    }

    fn write_text<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        let ops = &self.operations;
        writeln!(out, "Session statistics")?;
        writeln!(out, "  Lines read:        {}", self.lines_read)?;
        writeln!(out, "  Committed names:   {}", self.committed_names)?;
        writeln!(out, "  Open transactions: {}", self.open_transactions)?;
        writeln!(
            out,
            "  Operations:        get={} set={} delete={} count={}",
            ops.gets, ops.sets, ops.deletes, ops.counts
        )?;
        writeln!(
            out,
            "  Transactions:      begin={} commit={} rollback={} failed_rollback={} max_depth={}",
            ops.begins, ops.commits, ops.rollbacks, ops.failed_rollbacks, ops.max_depth
        )
    }
}
