//! Run reports and their console rendering

use crate::config::OutputFormat;
use crate::deleter::DeletionReport;
use anyhow::Result;
use chrono::{DateTime, Utc};
use log_reaper_common::ResourceKind;
use serde::Serialize;
use std::fmt::Write as _;
use std::io;

/// Result of one reconciliation pass
#[derive(Debug, Clone, Serialize)]
pub struct PassReport {
    pub kind: ResourceKind,
    pub log_group_prefix: &'static str,
    pub log_groups_scanned: usize,
    pub resources_scanned: usize,
    pub orphaned: usize,
    #[serde(flatten)]
    pub deletion: DeletionReport,
    pub resources_without_log_group: Vec<String>,
}

/// Result of a full run
#[derive(Debug, Clone)]
pub struct ReconcileReport {
    pub account_id: String,
    pub region: String,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub passes: Vec<PassReport>,
}

impl ReconcileReport {
    /// Total failed deletions across all passes
    pub fn total_failed(&self) -> usize {
        self.passes.iter().map(|p| p.deletion.failed.len()).sum()
    }

    /// Total log groups deleted across all passes
    pub fn total_deleted(&self) -> usize {
        self.passes.iter().map(|p| p.deletion.deleted.len()).sum()
    }
}

/// Receives pass reports as the run progresses.
///
/// A pass is handed over as soon as it finishes, before the next pass starts
/// listing, so a later failure cannot swallow the summary of deletions that
/// already happened.
pub trait ReportSink {
    /// Called once credentials are validated, before the first pass
    fn run_started(&mut self, _account_id: &str, _region: &str) -> Result<()> {
        Ok(())
    }

    fn pass_finished(&mut self, pass: &PassReport) -> Result<()>;
}

/// Writes each pass to `out` as soon as it is reported.
///
/// `Table` prints a header and one summary block per pass. `Json` prints one
/// JSON object per line, one line per pass.
pub struct ConsoleSink<W> {
    out: W,
    format: OutputFormat,
}

impl<W: io::Write> ConsoleSink<W> {
    pub fn new(out: W, format: OutputFormat) -> Self {
        Self { out, format }
    }
}

impl<W: io::Write> ReportSink for ConsoleSink<W> {
    fn run_started(&mut self, account_id: &str, region: &str) -> Result<()> {
        if self.format == OutputFormat::Table {
            write!(self.out, "{}", render_header(account_id, region))?;
            self.out.flush()?;
        }
        Ok(())
    }

    fn pass_finished(&mut self, pass: &PassReport) -> Result<()> {
        match self.format {
            OutputFormat::Table => write!(self.out, "\n{}", render_pass_table(pass))?,
            OutputFormat::Json => {
                serde_json::to_writer(&mut self.out, pass)?;
                writeln!(self.out)?;
            }
        }
        self.out.flush()?;
        Ok(())
    }
}

fn render_header(account_id: &str, region: &str) -> String {
    format!("Account: {account_id}\nRegion:  {region}\n")
}

/// Render one pass as a summary block
fn render_pass_table(pass: &PassReport) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "=== {} ({}) ===", pass.kind.label(), pass.log_group_prefix);
    let _ = writeln!(out, "Log groups scanned: {}", pass.log_groups_scanned);
    let _ = writeln!(out, "Resources scanned:  {}", pass.resources_scanned);
    let _ = writeln!(out, "Orphaned:           {}", pass.orphaned);
    let _ = writeln!(out, "Deleted:            {}", pass.deletion.deleted.len());
    let _ = writeln!(out, "Failed:             {}", pass.deletion.failed.len());

    for failure in &pass.deletion.failed {
        let _ = writeln!(out, "  {} ({:?})", failure.log_group_name, failure.kind);
        if let Some(suggestion) = &failure.suggestion {
            let _ = writeln!(out, "    hint: {suggestion}");
        }
    }

    if pass.kind.reports_missing_log_groups() {
        let _ = writeln!(
            out,
            "{} without log group: {}",
            pass.kind.label(),
            pass.resources_without_log_group.len()
        );
        for name in &pass.resources_without_log_group {
            let _ = writeln!(out, "  {name}");
        }
    }

    out
}
