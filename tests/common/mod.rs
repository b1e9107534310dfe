//! Shared fakes for the integration tests.
//!
//! Every fake records what it was asked to do into a shared [`Events`] log (or its own log) so tests can assert on
//! ordering across collaborators.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::time::Duration;

use perfwatch::collab::{
    BuildSystem, Collaborators, CommandLine, CommandOutput, CommandRunner, MetricReport, OutputSink, ReportingClient,
    VersionControl,
};
use perfwatch::harness::suite::{CellOutcome, MatrixSummary, SuiteInfo, SuiteSpec, Tester};
use perfwatch::harness::testers::{append_line, run_matrix};
use perfwatch::harness::{HarnessContext, PerfRunner, Processor, Suite, SuiteRegistry};
use perfwatch::{HarnessConfig, HarnessError};
use perfwatch_core::HostOs;
use perfwatch_trace::{Revision, Score};

pub type Events = Rc<RefCell<Vec<String>>>;

// ============================================================================
// Shell
// ============================================================================

pub struct FakeShell {
    log: RefCell<Vec<CommandLine>>,
    durations: RefCell<VecDeque<Duration>>,
    driver_output: String,
    missing: Vec<String>,
}

impl FakeShell {
    pub fn new() -> Self {
        Self {
            log: RefCell::new(Vec::new()),
            durations: RefCell::new(VecDeque::new()),
            driver_output: String::new(),
            missing: Vec::new(),
        }
    }

    /// Durations returned by successive `time()` calls (1s once exhausted).
    pub fn with_durations(self, durations: &[Duration]) -> Self {
        *self.durations.borrow_mut() = durations.iter().copied().collect();
        self
    }

    /// Text every command writes when its output goes to a trace.
    pub fn with_driver_output(mut self, output: &str) -> Self {
        self.driver_output = output.to_string();
        self
    }

    /// Programs that fail to launch.
    pub fn with_missing_program(mut self, program: &str) -> Self {
        self.missing.push(program.to_string());
        self
    }

    pub fn commands(&self) -> Vec<String> {
        self.log.borrow().iter().map(ToString::to_string).collect()
    }

    pub fn recorded(&self) -> Vec<CommandLine> {
        self.log.borrow().clone()
    }
}

impl CommandRunner for FakeShell {
    fn run(&self, command: &CommandLine, sink: &OutputSink) -> Result<CommandOutput, HarnessError> {
        self.log.borrow_mut().push(command.clone());
        if self.missing.iter().any(|p| command.program.ends_with(p.as_str())) {
            return Err(HarnessError::Spawn {
                command: command.to_string(),
                source: io::Error::new(io::ErrorKind::NotFound, "no such program"),
            });
        }
        if let OutputSink::Append(path) = sink {
            let mut file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|e| HarnessError::io(path, e))?;
            file.write_all(self.driver_output.as_bytes())
                .map_err(|e| HarnessError::io(path, e))?;
        }
        Ok(CommandOutput {
            status: 0,
            stdout: String::new(),
        })
    }

    fn time(&self, command: &CommandLine, sink: &OutputSink) -> Result<(CommandOutput, Duration), HarnessError> {
        let output = self.run(command, sink)?;
        let elapsed = self.durations.borrow_mut().pop_front().unwrap_or(Duration::from_secs(1));
        Ok((output, elapsed))
    }
}

// ============================================================================
// Version control
// ============================================================================

pub struct FakeVcs {
    pub changed: bool,
    pub revision: Option<u64>,
    pub events: Events,
}

impl VersionControl for FakeVcs {
    fn status_has_remote_changes(&self) -> Result<bool, HarnessError> {
        self.events.borrow_mut().push("status".to_string());
        Ok(self.changed)
    }

    fn sync_to_latest(&self) -> Result<(), HarnessError> {
        self.events.borrow_mut().push("sync".to_string());
        Ok(())
    }

    fn current_revision(&self) -> Option<Revision> {
        self.revision.and_then(Revision::new)
    }

    fn revert(&self, path: &Path) -> Result<(), HarnessError> {
        let name = path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
        self.events.borrow_mut().push(format!("revert {name}"));
        Ok(())
    }
}

// ============================================================================
// Build
// ============================================================================

pub struct FakeBuild {
    pub statuses: HashMap<String, i32>,
    pub events: Events,
}

impl BuildSystem for FakeBuild {
    fn build(&self, mode: &str, arch: &str, target: &str) -> Result<i32, HarnessError> {
        self.events.borrow_mut().push(format!("build {mode} {arch} {target}"));
        Ok(self.statuses.get(target).copied().unwrap_or(0))
    }
}

// ============================================================================
// Reporting
// ============================================================================

pub struct RecordingReporter {
    pub reports: Rc<RefCell<Vec<MetricReport>>>,
    pub reject: Vec<String>,
}

impl ReportingClient for RecordingReporter {
    fn report(&self, report: &MetricReport) -> bool {
        self.reports.borrow_mut().push(report.clone());
        !self.reject.contains(&report.metric)
    }
}

/// A report tuple, for compact assertions.
pub type Tuple = (String, Score, String, String, u64);

pub fn tuples(reports: &[MetricReport]) -> Vec<Tuple> {
    reports
        .iter()
        .map(|r| {
            (
                r.metric.clone(),
                r.score,
                r.platform.clone(),
                r.variant.clone(),
                r.revision.get(),
            )
        })
        .collect()
}

// ============================================================================
// Fixture
// ============================================================================

/// A scratch checkout with fakes wired into [`Collaborators`].
pub struct Fixture {
    pub dir: tempfile::TempDir,
    pub config: HarnessConfig,
    pub events: Events,
    pub reports: Rc<RefCell<Vec<MetricReport>>>,
    pub shell: Rc<FakeShell>,
    pub collaborators: Collaborators,
}

pub struct FixtureBuilder {
    shell: FakeShell,
    changed: bool,
    revision: Option<u64>,
    build_statuses: HashMap<String, i32>,
    reject: Vec<String>,
}

impl FixtureBuilder {
    pub fn new() -> Self {
        Self {
            shell: FakeShell::new(),
            changed: false,
            revision: Some(1234),
            build_statuses: HashMap::new(),
            reject: Vec::new(),
        }
    }

    pub fn shell(mut self, shell: FakeShell) -> Self {
        self.shell = shell;
        self
    }

    pub fn upstream_changed(mut self) -> Self {
        self.changed = true;
        self
    }

    pub fn revision(mut self, revision: Option<u64>) -> Self {
        self.revision = revision;
        self
    }

    pub fn build_status(mut self, target: &str, status: i32) -> Self {
        self.build_statuses.insert(target.to_string(), status);
        self
    }

    pub fn reject(mut self, metric: &str) -> Self {
        self.reject.push(metric.to_string());
        self
    }

    pub fn build(self) -> Fixture {
        let dir = tempfile::tempdir().expect("scratch checkout");
        let config = HarnessConfig::new().with_root(dir.path()).with_host(HostOs::Linux);
        let events: Events = Rc::new(RefCell::new(Vec::new()));
        let reports = Rc::new(RefCell::new(Vec::new()));
        let shell = Rc::new(self.shell);

        let collaborators = Collaborators {
            shell: shell.clone(),
            vcs: Box::new(FakeVcs {
                changed: self.changed,
                revision: self.revision,
                events: events.clone(),
            }),
            build: Box::new(FakeBuild {
                statuses: self.build_statuses,
                events: events.clone(),
            }),
            reporter: Box::new(RecordingReporter {
                reports: reports.clone(),
                reject: self.reject,
            }),
        };

        Fixture {
            dir,
            config,
            events,
            reports,
            shell,
            collaborators,
        }
    }
}

impl Fixture {
    pub fn ctx(&self) -> HarnessContext<'_> {
        HarnessContext::new(&self.config, &self.collaborators)
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn events(&self) -> Vec<String> {
        self.events.borrow().clone()
    }

    pub fn reports(&self) -> Vec<MetricReport> {
        self.reports.borrow().clone()
    }

    /// Write `relative` under the checkout root, creating parent directories.
    pub fn write(&self, relative: impl AsRef<Path>, contents: &str) -> PathBuf {
        let path = self.root().join(relative);
        fs::create_dir_all(path.parent().expect("file has a parent")).expect("create parents");
        fs::write(&path, contents).expect("write fixture file");
        path
    }
}

/// A [`PerfRunner`] over a fixture's fakes; the checkout lives as long as `dir`.
pub struct RunnerFixture {
    pub dir: tempfile::TempDir,
    pub runner: PerfRunner,
    pub events: Events,
    pub reports: Rc<RefCell<Vec<MetricReport>>>,
    pub shell: Rc<FakeShell>,
}

impl Fixture {
    pub fn into_runner(self, registry: SuiteRegistry) -> RunnerFixture {
        RunnerFixture {
            dir: self.dir,
            runner: PerfRunner::new(self.config, registry, self.collaborators),
            events: self.events,
            reports: self.reports,
            shell: self.shell,
        }
    }
}

impl RunnerFixture {
    pub fn events(&self) -> Vec<String> {
        self.events.borrow().clone()
    }
}

// ============================================================================
// Instrumented suites
// ============================================================================

/// Writes `body(platform, variant)` into each cell's trace and counts how often it ran.
pub struct ScriptedTester {
    pub body: fn(&str, &str) -> String,
    pub runs: Rc<RefCell<usize>>,
}

impl Tester for ScriptedTester {
    fn run_tests(&mut self, suite: &mut SuiteInfo, ctx: &HarnessContext<'_>) -> MatrixSummary {
        *self.runs.borrow_mut() += 1;
        let body = self.body;
        run_matrix(suite, ctx, |platform, variant, trace| {
            for line in body(platform, variant).lines() {
                append_line(trace, line)?;
            }
            Ok(CellOutcome::Completed)
        })
    }
}

/// A suite over `spec` with a [`ScriptedTester`] and the given processor.
pub fn scripted_suite(
    spec: SuiteSpec,
    config: &HarnessConfig,
    body: fn(&str, &str) -> String,
    processor: Box<dyn Processor>,
    runs: Rc<RefCell<usize>>,
) -> Suite {
    Suite::new(
        SuiteInfo::new(spec, config),
        Box::new(ScriptedTester { body, runs }),
        processor,
    )
}
