//! External collaborators.
//!
//! The harness talks to the outside world through four trait boundaries:
//! - [`CommandRunner`] - launching processes (workloads, build, version control)
//! - [`VersionControl`] - change detection, sync, revision lookup
//! - [`BuildSystem`] - building the artifact under test
//! - [`ReportingClient`] - the results store
//!
//! [`Collaborators::from_config`] wires up the production implementations; tests build the struct directly from
//! fakes.

pub mod build;
pub mod reporting;
pub mod shell;
pub mod vcs;

use std::rc::Rc;

pub use build::{BuildSystem, ToolsBuild, remove_dir_tolerant};
pub use reporting::{CommandReporter, LedgerReporter, MetricReport, ReportingClient};
pub use shell::{CommandLine, CommandOutput, CommandRunner, OutputSink, ShellCommandRunner};
pub use vcs::{SubversionClient, VersionControl};

use crate::config::HarnessConfig;

pub struct Collaborators {
    pub shell: Rc<dyn CommandRunner>,
    pub vcs: Box<dyn VersionControl>,
    pub build: Box<dyn BuildSystem>,
    pub reporter: Box<dyn ReportingClient>,
}

impl Collaborators {
    pub fn from_config(config: &HarnessConfig) -> Self {
        let shell: Rc<dyn CommandRunner> = Rc::new(ShellCommandRunner::new(config.verbose));
        let reporter: Box<dyn ReportingClient> = match &config.report_command {
            Some(program) => Box::new(CommandReporter::new(program, &config.root, Rc::clone(&shell))),
            None => Box::new(LedgerReporter::new(config.ledger_path())),
        };
        Self {
            vcs: Box::new(SubversionClient::new(&config.root, Rc::clone(&shell))),
            build: Box::new(ToolsBuild::new(&config.root, Rc::clone(&shell))),
            reporter,
            shell,
        }
    }
}
