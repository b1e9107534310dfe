//! Browser-driven testers.
//!
//! Both drive `tools/testing/run_selenium.py`, which loads a page in the given browser, waits for the benchmarks to
//! finish, and dumps the page body to stdout; that output is appended to the cell's trace.

use std::path::{Path, PathBuf};

use perfwatch_core::HostOs;
use perfwatch_core::benchmarks::valid_dromaeo_tags;
use perfwatch_core::browsers::DARTIUM;

use super::{dromaeo_dir, fetch_dartium, generate_dromaeo_tests, run_matrix, run_setup};
use crate::collab::{CommandLine, OutputSink};
use crate::errors::HarnessError;
use crate::harness::HarnessContext;
use crate::harness::suite::{CellOutcome, MatrixSummary, SuiteInfo, Tester};

/// What the Selenium driver should wait for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeleniumMode {
    Perf,
    Dromaeo,
}

impl SeleniumMode {
    pub fn as_str(self) -> &'static str {
        match self {
            SeleniumMode::Perf => "perf",
            SeleniumMode::Dromaeo => "dromaeo",
        }
    }
}

/// The driver invocation for one cell.
pub fn selenium_command(ctx: &HarnessContext<'_>, page: &str, browser: &str, mode: SeleniumMode) -> CommandLine {
    CommandLine::new("python")
        .arg(Path::new("tools").join("testing").join("run_selenium.py"))
        .args(["--out", page, "--browser", browser])
        .arg("--timeout")
        .arg(ctx.config.browser_timeout_secs.to_string())
        .args(["--mode", mode.as_str()])
        .current_dir(&ctx.config.root)
}

fn run_in_browser(
    ctx: &HarnessContext<'_>,
    trace: &Path,
    page: &str,
    browser: &str,
    mode: SeleniumMode,
) -> Result<CellOutcome, HarnessError> {
    let command = selenium_command(ctx, page, browser, mode);
    let output = ctx.shell.run(&command, &OutputSink::Append(trace.to_path_buf()))?;
    if !output.success() {
        // The trace still says what happened; the processor decides whether it holds results.
        tracing::warn!(browser, status = output.status, "browser driver exited with failure");
    }
    Ok(CellOutcome::Completed)
}

/// Standalone benchmark pages (`browser-perf`).
#[derive(Debug, Default)]
pub struct BrowserPageTester;

impl BrowserPageTester {
    pub fn page_for(ctx: &HarnessContext<'_>, variant: &str) -> PathBuf {
        ctx.config
            .in_root("internal")
            .join("browserBenchmarks")
            .join(format!("benchmark_page_{variant}.html"))
    }
}

impl Tester for BrowserPageTester {
    fn prepare(&mut self, suite: &SuiteInfo, ctx: &HarnessContext<'_>) -> Result<(), HarnessError> {
        fetch_dartium(suite, ctx)?;
        let generate = CommandLine::new("python")
            .arg(Path::new("benchmarks").join("make_web_benchmarks.py"))
            .current_dir(ctx.config.in_root("frog"));
        run_setup(ctx, generate)
    }

    fn run_tests(&mut self, suite: &mut SuiteInfo, ctx: &HarnessContext<'_>) -> MatrixSummary {
        run_matrix(suite, ctx, |browser, variant, trace| {
            let page = Self::page_for(ctx, variant);
            run_in_browser(ctx, trace, &page.to_string_lossy(), browser, SeleniumMode::Perf)
        })
    }
}

/// Dromaeo DOM benchmarks (`dromaeo`).
#[derive(Debug, Default)]
pub struct DromaeoTester;

/// Query selecting `variant` for every Dromaeo tag runnable on `host`.
///
/// Dartium runs Dart directly, so its `frog*` variants are spelled `dart*`; `_` separates query terms on the page.
pub fn dromaeo_query(browser: &str, variant: &str, host: HostOs) -> String {
    let variant = if browser == DARTIUM {
        variant.replace("frog", "dart")
    } else {
        variant.to_string()
    };
    let variant = variant.replace('_', "&");
    valid_dromaeo_tags(host)
        .iter()
        .map(|tag| format!("{variant}&{tag}"))
        .collect::<Vec<_>>()
        .join("|")
}

impl DromaeoTester {
    pub fn page_for(ctx: &HarnessContext<'_>, browser: &str, variant: &str) -> String {
        let index = dromaeo_dir(ctx).join("index-js.html");
        format!(
            "{}?{}",
            index.to_string_lossy(),
            dromaeo_query(browser, variant, ctx.config.host)
        )
    }
}

impl Tester for DromaeoTester {
    fn prepare(&mut self, suite: &SuiteInfo, ctx: &HarnessContext<'_>) -> Result<(), HarnessError> {
        fetch_dartium(suite, ctx)?;
        generate_dromaeo_tests(ctx)
    }

    fn run_tests(&mut self, suite: &mut SuiteInfo, ctx: &HarnessContext<'_>) -> MatrixSummary {
        run_matrix(suite, ctx, |browser, variant, trace| {
            let page = Self::page_for(ctx, browser, variant);
            run_in_browser(ctx, trace, &page, browser, SeleniumMode::Dromaeo)
        })
    }
}
