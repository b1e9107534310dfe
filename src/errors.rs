//! Harness errors.
//!
//! Everything that can stop a suite, a cycle, or the whole invocation. Per-file trace problems are not errors here;
//! they are [`perfwatch_trace::TraceError`] outcomes recorded in the suite report.

use std::io;
use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum HarnessError {
    #[error("invalid suite `{name}` not in {available}")]
    #[diagnostic(
        code(perfwatch::unknown_suite),
        help("pass a comma-separated list to --suites, e.g. --suites {available}")
    )]
    UnknownSuite { name: String, available: String },

    #[error("build of `{target}` failed with status {status}")]
    #[diagnostic(
        code(perfwatch::build_failed),
        help("no suite runs against a broken build; the next cycle retries after a sync")
    )]
    BuildFailed { target: String, status: i32 },

    #[error("failed to launch `{command}`")]
    #[diagnostic(code(perfwatch::spawn))]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },

    #[error("I/O error on {}", path.display())]
    #[diagnostic(code(perfwatch::io))]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("version control: {0}")]
    #[diagnostic(code(perfwatch::vcs))]
    VersionControl(String),

    #[error("configuration: {0}")]
    #[diagnostic(code(perfwatch::config))]
    Config(String),
}

impl HarnessError {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        HarnessError::Io {
            path: path.into(),
            source,
        }
    }

    /// Whether this error means the build under test is broken.
    pub fn is_build_failure(&self) -> bool {
        matches!(self, HarnessError::BuildFailed { .. })
    }
}
