//! Process-phase strategies.
//!
//! Each processor reads one trace, parses it with its [`perfwatch_trace::Grammar`], and hands every metric to the
//! reporting client. Platform and variant come from the trace file name unless the grammar carries them per line.

pub mod browser;
pub mod dromaeo;
pub mod key_value;
pub mod size;

use std::fs;

use perfwatch_trace::{ParsedTrace, TraceFileName};

pub use browser::BrowserResultsProcessor;
pub use dromaeo::DromaeoProcessor;
pub use key_value::KeyValueProcessor;
pub use size::SizeProcessor;

use super::HarnessContext;
use super::suite::{FileOutcome, SuiteInfo};
use crate::collab::MetricReport;
use crate::errors::HarnessError;

pub(crate) fn read_trace(suite: &SuiteInfo, file_name: &str) -> Result<String, HarnessError> {
    let path = suite.output_dir.join(file_name);
    let bytes = fs::read(&path).map_err(|e| HarnessError::io(&path, e))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

pub(crate) fn parse_name(file_name: &str) -> Option<TraceFileName> {
    match file_name.parse::<TraceFileName>() {
        Ok(name) => Some(name),
        Err(err) => {
            tracing::debug!(file = file_name, error = %err, "not a trace file");
            None
        }
    }
}

/// Report every entry of `trace` that `keep` accepts.
///
/// Entries without their own variant use `default_variant`.
pub(crate) fn publish(
    ctx: &HarnessContext<'_>,
    trace: ParsedTrace,
    platform: &str,
    default_variant: &str,
    keep: impl Fn(&str) -> bool,
) -> FileOutcome {
    let mut accepted = 0;
    let mut rejected = 0;
    for entry in trace.entries {
        if !keep(&entry.metric) {
            tracing::trace!(metric = %entry.metric, "metric not declared by suite");
            continue;
        }
        let report = MetricReport {
            variant: entry.variant.unwrap_or_else(|| default_variant.to_string()),
            metric: entry.metric,
            score: entry.score,
            platform: platform.to_string(),
            revision: trace.revision,
        };
        if ctx.reporter.report(&report) {
            accepted += 1;
        } else {
            tracing::warn!(metric = %report.metric, platform, variant = %report.variant, "report rejected");
            rejected += 1;
        }
    }
    FileOutcome::Reported {
        revision: trace.revision,
        accepted,
        rejected,
    }
}
