//! Reporting metrics to the results store.
//!
//! The harness only knows the small tuple in [`MetricReport`]; what the store does with it is not its concern.
//! A rejected report is logged by the caller and never stops the remaining metrics.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::rc::Rc;

use perfwatch_trace::{Revision, Score};
use serde::Serialize;

use super::shell::{CommandLine, CommandRunner, OutputSink};

/// One metric of one run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricReport {
    pub metric: String,
    pub score: Score,
    pub platform: String,
    pub variant: String,
    pub revision: Revision,
}

pub trait ReportingClient {
    /// Hand one metric to the store; `true` if it was accepted.
    fn report(&self, report: &MetricReport) -> bool;
}

/// Appends each report as one JSON object per line.
pub struct LedgerReporter {
    path: PathBuf,
}

impl LedgerReporter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn append(&self, report: &MetricReport) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let line = serde_json::to_string(report).map_err(std::io::Error::other)?;
        let mut file = OpenOptions::new().create(true).append(true).open(&self.path)?;
        writeln!(file, "{line}")
    }
}

impl ReportingClient for LedgerReporter {
    fn report(&self, report: &MetricReport) -> bool {
        match self.append(report) {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!(path = %self.path.display(), error = %err, "could not append to results ledger");
                false
            }
        }
    }
}

/// Runs `<program> <metric> <score> <platform> <variant> <revision>`; exit status 0 means accepted.
pub struct CommandReporter {
    program: String,
    root: PathBuf,
    shell: Rc<dyn CommandRunner>,
}

impl CommandReporter {
    pub fn new(program: impl Into<String>, root: impl Into<PathBuf>, shell: Rc<dyn CommandRunner>) -> Self {
        Self {
            program: program.into(),
            root: root.into(),
            shell,
        }
    }

    pub fn command_for(&self, report: &MetricReport) -> CommandLine {
        CommandLine::new(&self.program)
            .arg(&report.metric)
            .arg(report.score.to_string())
            .arg(&report.platform)
            .arg(&report.variant)
            .arg(report.revision.to_string())
            .current_dir(&self.root)
    }
}

impl ReportingClient for CommandReporter {
    fn report(&self, report: &MetricReport) -> bool {
        let command = self.command_for(report);
        match self.shell.run(&command, &OutputSink::Capture) {
            Ok(output) => output.success(),
            Err(err) => {
                tracing::warn!(error = %err, "report command could not be launched");
                false
            }
        }
    }
}
