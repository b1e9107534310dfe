//! CLI command implementations
//!
//! All command functions return `CliResult<ExitCode>` instead of calling
//! `process::exit`. Error handling and exits happen in the top-level `run()`.

use crate::collab::Collaborators;
use crate::config::{HarnessConfig, absolute_root};
use crate::harness::{PerfRunner, SequenceReport, SuiteRegistry};

use super::{Cli, CliResult, ExitCode};

/// Layer command-line flags over an environment-derived config.
pub fn apply_overrides(mut config: HarnessConfig, cli: &Cli) -> CliResult<HarnessConfig> {
    if let Some(root) = &cli.root {
        config = config.with_root(absolute_root(root)?);
    }
    if cli.verbose {
        config = config.with_verbose(true);
    }
    if let Some(program) = &cli.report_cmd {
        config = config.with_report_command(program);
    }
    if let Some(path) = &cli.results {
        config = config.with_results_path(path);
        config.report_command = None;
    }
    Ok(config)
}

/// Resolve configuration and the suite selection, then run once or forever.
pub fn execute(cli: Cli, registry: SuiteRegistry) -> CliResult<ExitCode> {
    let config = apply_overrides(HarnessConfig::from_env()?, &cli)?;
    let selection = registry.select(cli.suites.as_deref())?;
    tracing::debug!(?config, ?selection, "configuration resolved");

    let collaborators = Collaborators::from_config(&config);
    let runner = PerfRunner::new(config, registry, collaborators)
        .with_selection(selection)
        .with_no_build(cli.nobuild);

    if cli.forever {
        runner.run_forever();
    }
    run_once(&runner)
}

/// Run the sequence once and print a summary.
pub fn run_once(runner: &PerfRunner) -> CliResult<ExitCode> {
    let report = runner.run_test_sequence()?;
    print_summary(&report);
    if report.failed.is_empty() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}

fn print_summary(report: &SequenceReport) {
    for suite in &report.suites {
        println!(
            "{}: {} of {} cells completed, {} trace files, {} metrics reported ({} rejected)",
            suite.suite,
            suite.matrix.completed,
            suite.matrix.attempted,
            suite.files.len(),
            suite.accepted(),
            suite.rejected()
        );
    }
    for (suite, reason) in &report.failed {
        eprintln!("{suite}: failed: {reason}");
    }
}
