//! The test-orchestration engine.
//!
//! ## Modules
//!
//! - `suite` - suite descriptor, matrix, and the prepare → run → enumerate → process lifecycle
//! - `registry` - name → constructor mapping for every known suite
//! - `suites` - the built-in suites
//! - `testers` - run-phase strategies that write trace files
//! - `processors` - process-phase strategies that read trace files and report metrics
//! - `runner` - the scheduler: change detection, sync and build, sequencing, continuous polling
//!
//! ## Design
//!
//! Everything is synchronous and single-threaded. Suites borrow their collaborators through a [`HarnessContext`]
//! for the duration of one `run()`; nothing is shared between polling cycles except the registry and the
//! collaborators themselves.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod processors;
pub mod registry;
pub mod runner;
pub mod suite;
pub mod suites;
pub mod testers;

use std::fs;

use perfwatch_core::browsers::DARTIUM;
use perfwatch_trace::Revision;

pub use registry::SuiteRegistry;
pub use runner::{Cycle, PerfRunner, SequenceReport};
pub use suite::{
    CellOutcome, FileOutcome, FileReport, MatrixSummary, Processor, Suite, SuiteInfo, SuiteReport, SuiteSpec, Tester,
};

use crate::collab::{Collaborators, CommandRunner, ReportingClient, VersionControl};
use crate::config::HarnessConfig;

/// Everything a tester or processor may touch while a suite runs.
#[derive(Clone, Copy)]
pub struct HarnessContext<'a> {
    pub config: &'a HarnessConfig,
    pub shell: &'a dyn CommandRunner,
    pub vcs: &'a dyn VersionControl,
    pub reporter: &'a dyn ReportingClient,
}

impl<'a> HarnessContext<'a> {
    pub fn new(config: &'a HarnessConfig, collaborators: &'a Collaborators) -> Self {
        Self {
            config,
            shell: collaborators.shell.as_ref(),
            vcs: collaborators.vcs.as_ref(),
            reporter: collaborators.reporter.as_ref(),
        }
    }

    /// Revision to stamp a trace for `platform` with.
    ///
    /// Dartium is downloaded prebuilt, so its revision comes from the build's version marker rather than the
    /// checkout.
    pub fn revision_for(&self, platform: &str) -> Option<Revision> {
        if platform == DARTIUM {
            dartium_revision(self.config)
        } else {
            self.vcs.current_revision()
        }
    }
}

/// Revision from `LAST_VERSION`, whose second-to-last `.`-separated field is the revision
/// (`dartium-lucid32-full-2871.0` → `2871`).
pub fn dartium_revision(config: &HarnessConfig) -> Option<Revision> {
    let path = config.dartium_version_file();
    let text = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "Dartium version marker unreadable");
            return None;
        }
    };
    parse_dartium_version(&text)
}

fn parse_dartium_version(text: &str) -> Option<Revision> {
    let fields: Vec<&str> = text.trim().split('.').collect();
    if fields.len() < 2 {
        return None;
    }
    let field = fields[fields.len() - 2];
    // Only the trailing digits are the revision; the rest is the archive name.
    let digits: String = field.chars().rev().take_while(char::is_ascii_digit).collect();
    let digits: String = digits.chars().rev().collect();
    digits.parse::<u64>().ok().and_then(Revision::new)
}
