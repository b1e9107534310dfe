//! CLI module for perfwatch
//!
//! ## Usage
//!
//! - `perfwatch` - sync, build and run every suite once
//! - `perfwatch -s dromaeo,dromaeo-size` - only the named suites, in that order
//! - `perfwatch -n` - skip sync and build, test what is already built
//! - `perfwatch -f` - poll forever, running the sequence whenever upstream changes
//!
//! ## Design
//!
//! The CLI uses clap for argument parsing with derive macros; the suite list in `--help` comes from the registry at
//! runtime. Command functions return `CliResult<T>` instead of calling `process::exit`. Only the top-level `run()`
//! function handles errors and exits.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod commands;

use std::ffi::OsString;
use std::fmt;
use std::path::PathBuf;
use std::process;

use clap::{CommandFactory, FromArgMatches, Parser};

use crate::errors::HarnessError;
use crate::harness::SuiteRegistry;
use crate::version::PERFWATCH_VERSION;

// ============================================================================
// CLI Error handling
// ============================================================================

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode(0);
    pub const FAILURE: ExitCode = ExitCode(1);
    /// The build under test is broken; nothing was measured.
    pub const BUILD_FAILED: ExitCode = ExitCode(2);
}

/// Error type for CLI operations.
///
/// Contains a user-facing message and an exit code. The CLI entry point
/// catches these errors, prints the message, and exits with the code.
#[derive(Debug)]
pub struct CliError {
    /// User-facing error message (already formatted for display)
    pub message: String,
    /// Exit code to return to the shell
    pub exit_code: ExitCode,
}

impl CliError {
    /// Create a new CLI error with a message and exit code.
    pub fn new(message: impl Into<String>, exit_code: ExitCode) -> Self {
        Self {
            message: message.into(),
            exit_code,
        }
    }

    /// Create a failure error (exit code 1).
    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(message, ExitCode::FAILURE)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

impl From<HarnessError> for CliError {
    fn from(err: HarnessError) -> Self {
        let exit_code = if err.is_build_failure() {
            ExitCode::BUILD_FAILED
        } else {
            ExitCode::FAILURE
        };
        CliError::new(format!("{:?}", miette::Report::new(err)), exit_code)
    }
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

// ============================================================================
// Clap CLI definition
// ============================================================================

/// Performance-regression harness
#[derive(Parser, Debug)]
#[command(name = "perfwatch")]
#[command(version = PERFWATCH_VERSION)]
#[command(about = "Sync, build, and run benchmark suites, reporting every metric", long_about = None)]
pub struct Cli {
    /// Comma-separated suites to run (default: all)
    #[arg(short = 's', long = "suites", value_name = "SUITES")]
    pub suites: Option<String>,

    /// Run forever, re-running the suites whenever upstream changes
    #[arg(short = 'f', long)]
    pub forever: bool,

    /// Do not sync or build; test what is already built
    #[arg(short = 'n', long)]
    pub nobuild: bool,

    /// Echo every external command
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Checkout root (default: $PERFWATCH_ROOT or the current directory)
    #[arg(long, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Report each metric by running PROGRAM <metric> <score> <platform> <variant> <revision>
    #[arg(long = "report-cmd", value_name = "PROGRAM")]
    pub report_cmd: Option<String>,

    /// Append reports to this JSON-lines ledger
    #[arg(long, value_name = "FILE", conflicts_with = "report_cmd")]
    pub results: Option<PathBuf>,
}

/// Parse `args`, listing `registry`'s suites in the `--suites` help.
pub fn parse_cli<I, T>(registry: &SuiteRegistry, args: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let suites_help = format!(
        "Comma-separated suites to run (default: all). Available: {}",
        registry.available_names().join(", ")
    );
    let command = Cli::command().mut_arg("suites", |arg| arg.help(suites_help));
    let matches = command.try_get_matches_from(args)?;
    Cli::from_arg_matches(&matches)
}

// ============================================================================
// CLI entry point
// ============================================================================

/// Main CLI entry point.
///
/// This is the only place where `process::exit` is called. All command
/// implementations return `CliResult` and errors are handled here.
pub fn run() {
    let registry = SuiteRegistry::builtin();
    let cli = match parse_cli(&registry, std::env::args_os()) {
        Ok(cli) => cli,
        Err(err) => err.exit(),
    };

    match commands::execute(cli, registry) {
        Ok(exit_code) => {
            if exit_code.0 != 0 {
                process::exit(exit_code.0);
            }
        }
        Err(e) => {
            if !e.message.is_empty() {
                eprintln!("{}", e.message);
            }
            process::exit(e.exit_code.0);
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
