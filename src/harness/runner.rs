//! The scheduler.
//!
//! Single-shot mode runs [`PerfRunner::run_test_sequence`] once. Continuous mode repeats [`PerfRunner::poll_once`]
//! forever: when upstream has changed, the whole sequence runs (sync, build, every selected suite); otherwise the
//! runner sleeps for the poll interval. Polling never happens while a sequence is running.

use std::thread;

use super::HarnessContext;
use super::registry::SuiteRegistry;
use super::suite::{Suite, SuiteReport};
use crate::collab::{Collaborators, remove_dir_tolerant};
use crate::config::HarnessConfig;
use crate::errors::HarnessError;

/// Outcome of one sequence.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct SequenceReport {
    pub suites: Vec<SuiteReport>,
    /// Suites whose `run()` failed outright, with the reason.
    pub failed: Vec<(String, String)>,
}

impl SequenceReport {
    pub fn accepted(&self) -> usize {
        self.suites.iter().map(SuiteReport::accepted).sum()
    }
}

/// Outcome of one continuous-mode poll.
#[derive(Debug, PartialEq, Eq)]
pub enum Cycle {
    /// Nothing changed upstream.
    Idle,
    Ran(SequenceReport),
}

pub struct PerfRunner {
    config: HarnessConfig,
    registry: SuiteRegistry,
    collaborators: Collaborators,
    selection: Vec<String>,
    no_build: bool,
}

impl PerfRunner {
    /// A runner for every suite in `registry`, building before each sequence.
    pub fn new(config: HarnessConfig, registry: SuiteRegistry, collaborators: Collaborators) -> Self {
        let selection = registry.available_names().into_iter().map(String::from).collect();
        Self {
            config,
            registry,
            collaborators,
            selection,
            no_build: false,
        }
    }

    /// Run only `names`, in this order.
    pub fn with_selection(mut self, names: Vec<String>) -> Self {
        self.selection = names;
        self
    }

    pub fn with_no_build(mut self, no_build: bool) -> Self {
        self.no_build = no_build;
        self
    }

    pub fn config(&self) -> &HarnessConfig {
        &self.config
    }

    pub fn selection(&self) -> &[String] {
        &self.selection
    }

    pub fn has_new_code(&self) -> Result<bool, HarnessError> {
        self.collaborators.vcs.status_has_remote_changes()
    }

    /// Sync the checkout, wipe the previous build output, and build every target `suites` need.
    #[tracing::instrument(skip_all)]
    pub fn sync_and_build(&self, suites: &[Suite]) -> Result<(), HarnessError> {
        self.collaborators.vcs.sync_to_latest()?;
        remove_dir_tolerant(&self.config.build_root())?;

        for target in build_targets(suites) {
            tracing::info!(%target, "building");
            let status = self
                .collaborators
                .build
                .build(&self.config.build_mode, &self.config.build_arch, &target)?;
            if status != 0 {
                return Err(HarnessError::BuildFailed { target, status });
            }
        }
        Ok(())
    }

    /// Construct the selected suites, build unless told not to, then run each suite in order.
    ///
    /// A build failure stops the sequence before any suite runs. A suite that fails outright is recorded and the
    /// next one still runs.
    #[tracing::instrument(skip_all, fields(suites = %self.selection.join(",")))]
    pub fn run_test_sequence(&self) -> Result<SequenceReport, HarnessError> {
        let mut suites = self
            .selection
            .iter()
            .map(|name| self.registry.make(name, &self.config))
            .collect::<Result<Vec<_>, _>>()?;

        if !self.no_build {
            self.sync_and_build(&suites)?;
        }

        let ctx = HarnessContext::new(&self.config, &self.collaborators);
        let mut report = SequenceReport::default();
        for suite in &mut suites {
            match suite.run(&ctx) {
                Ok(suite_report) => {
                    tracing::info!(
                        suite = %suite_report.suite,
                        files = suite_report.files.len(),
                        accepted = suite_report.accepted(),
                        rejected = suite_report.rejected(),
                        "suite finished"
                    );
                    report.suites.push(suite_report);
                }
                Err(err) => {
                    tracing::error!(suite = suite.name(), error = %err, "suite failed");
                    report.failed.push((suite.name().to_string(), err.to_string()));
                }
            }
        }
        Ok(report)
    }

    /// One continuous-mode iteration, without the sleep.
    pub fn poll_once(&self) -> Result<Cycle, HarnessError> {
        if self.has_new_code()? {
            Ok(Cycle::Ran(self.run_test_sequence()?))
        } else {
            Ok(Cycle::Idle)
        }
    }

    /// Whether to wait out the poll interval after `cycle`.
    ///
    /// A sequence that synced is followed straight by the next poll. Without syncing, upstream still looks changed,
    /// so the runner waits like an idle poll.
    pub fn pauses_after(&self, cycle: &Cycle) -> bool {
        match cycle {
            Cycle::Idle => true,
            Cycle::Ran(_) => self.no_build,
        }
    }

    /// Poll forever, sleeping for the poll interval whenever there is nothing to do.
    pub fn run_forever(&self) -> ! {
        tracing::info!(interval_secs = self.config.poll_interval.as_secs(), "watching for new revisions");
        loop {
            let pause = match self.poll_once() {
                Ok(cycle) => {
                    match &cycle {
                        Cycle::Ran(report) => tracing::info!(
                            accepted = report.accepted(),
                            failed = report.failed.len(),
                            "cycle finished"
                        ),
                        Cycle::Idle => tracing::debug!("no upstream changes"),
                    }
                    self.pauses_after(&cycle)
                }
                Err(err) => {
                    tracing::error!(error = %err, "cycle aborted");
                    true
                }
            };
            if pause {
                thread::sleep(self.config.poll_interval);
            }
        }
    }
}

/// Union of the suites' build targets, deduplicated, in first-seen order.
pub fn build_targets(suites: &[Suite]) -> Vec<String> {
    let mut targets: Vec<String> = Vec::new();
    for target in suites.iter().flat_map(Suite::build_targets) {
        if !targets.contains(target) {
            targets.push(target.clone());
        }
    }
    targets
}
