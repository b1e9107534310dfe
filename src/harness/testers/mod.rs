//! Run-phase strategies.
//!
//! Every tester follows the same per-cell pattern, implemented once in [`run_matrix`]:
//!
//! 1. point the suite's current trace at `<prefix>-<stamp>-<platform>-<variant>`;
//! 2. write the revision stamp, truncating any earlier content;
//! 3. run the cell's workload, which appends to the trace.
//!
//! A cell that fails is tallied and the matrix moves on.

pub mod compile;
pub mod selenium;
pub mod size;

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

use perfwatch_core::browsers::DARTIUM;
use perfwatch_trace::Revision;

pub use compile::CompileTester;
pub use selenium::{BrowserPageTester, DromaeoTester};
pub use size::SizeTester;

use super::HarnessContext;
use super::suite::{CellOutcome, MatrixSummary, SuiteInfo};
use crate::collab::{CommandLine, OutputSink};
use crate::errors::HarnessError;

/// Run `cell` for every valid (platform, variant) of `suite`.
///
/// `cell` receives the platform, the variant and the trace path; the revision stamp is already written.
pub fn run_matrix<F>(suite: &mut SuiteInfo, ctx: &HarnessContext<'_>, mut cell: F) -> MatrixSummary
where
    F: FnMut(&str, &str, &Path) -> Result<CellOutcome, HarnessError>,
{
    let mut summary = MatrixSummary::default();
    for (platform, variant) in suite.cells() {
        let trace = suite.trace_path(&platform, &variant);
        suite.current_trace = Some(trace.clone());

        let span = tracing::info_span!("cell", %platform, %variant);
        let _guard = span.enter();

        let outcome = stamp_revision(&trace, &platform, ctx)
            .and_then(|()| cell(&platform, &variant, &trace))
            .unwrap_or_else(|err| CellOutcome::Failed(err.to_string()));
        match &outcome {
            CellOutcome::Completed => tracing::debug!("cell completed"),
            CellOutcome::Abandoned(reason) => tracing::warn!(%reason, "cell abandoned"),
            CellOutcome::Failed(reason) => tracing::warn!(%reason, "cell failed"),
        }
        summary.record(&outcome);
    }
    suite.current_trace = None;
    summary
}

/// Start `trace` with the revision stamp for `platform`.
pub fn stamp_revision(trace: &Path, platform: &str, ctx: &HarnessContext<'_>) -> Result<(), HarnessError> {
    let revision = ctx.revision_for(platform);
    if revision.is_none() {
        tracing::warn!(platform, "revision unknown; trace will not be reported");
    }
    fs::write(trace, format!("{}\n", Revision::marker_line(revision))).map_err(|e| HarnessError::io(trace, e))
}

/// Append one line to `trace`.
pub fn append_line(trace: &Path, line: &str) -> Result<(), HarnessError> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(trace)
        .map_err(|e| HarnessError::io(trace, e))?;
    writeln!(file, "{line}").map_err(|e| HarnessError::io(trace, e))
}

/// Size of `path` in bytes; missing or unreadable artifacts count as 0.
pub fn file_size(path: &Path) -> u64 {
    fs::metadata(path).map(|m| m.len()).unwrap_or(0)
}

/// Run a setup command whose failure is worth a warning but not worth stopping the suite.
pub(crate) fn run_setup(ctx: &HarnessContext<'_>, command: CommandLine) -> Result<(), HarnessError> {
    let output = ctx.shell.run(&command, &OutputSink::Capture)?;
    if !output.success() {
        tracing::warn!(%command, status = output.status, "setup command failed");
    }
    Ok(())
}

/// Download the Dartium driver if `suite` runs on Dartium.
pub(crate) fn fetch_dartium(suite: &SuiteInfo, ctx: &HarnessContext<'_>) -> Result<(), HarnessError> {
    if !suite.spec.platforms.iter().any(|p| p == DARTIUM) {
        return Ok(());
    }
    let command = CommandLine::new("python")
        .arg(Path::new("tools").join("get_drt.py"))
        .arg("--dartium")
        .current_dir(&ctx.config.root);
    run_setup(ctx, command)
}

/// Regenerate the compiled Dromaeo tests.
pub(crate) fn generate_dromaeo_tests(ctx: &HarnessContext<'_>) -> Result<(), HarnessError> {
    let command = CommandLine::new("python")
        .arg("generate_frog_tests.py")
        .current_dir(dromaeo_dir(ctx));
    run_setup(ctx, command)
}

pub(crate) fn dromaeo_dir(ctx: &HarnessContext<'_>) -> std::path::PathBuf {
    ctx.config.in_root(Path::new("samples").join("third_party").join("dromaeo"))
}
