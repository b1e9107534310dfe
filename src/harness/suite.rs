//! Suite descriptor and lifecycle.
//!
//! A [`Suite`] is built fresh for every run by the registry, owns one [`Tester`] and one [`Processor`], and is
//! dropped once [`Suite::run`] returns. The lifecycle is strictly linear:
//!
//! 1. **Prepare**: `prepare()` on the tester, then the processor.
//! 2. **Run**: create the output folder, then `run_tests()` walks the whole platform × variant matrix.
//! 3. **Enumerate**: list the output folder (no dot-files, no subdirectories, sorted by name).
//! 4. **Process**: `process_file()` per file; one bad file never stops the rest.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use perfwatch_trace::{Revision, TraceError, TraceFileName};

use super::HarnessContext;
use crate::config::HarnessConfig;
use crate::errors::HarnessError;

/// Predicate deciding whether a (platform, variant) cell is run.
pub type CellFilter = fn(platform: &str, variant: &str) -> bool;

/// Default [`CellFilter`]: every cell is valid.
pub fn every_cell(_platform: &str, _variant: &str) -> bool {
    true
}

/// Static configuration of a suite.
#[derive(Debug, Clone)]
pub struct SuiteSpec {
    /// Registry name
    pub name: String,
    /// Folder under the perf directory that receives this suite's traces
    pub output_folder: String,
    /// First component of every trace file name
    pub trace_prefix: String,
    pub platforms: Vec<String>,
    pub variants: Vec<String>,
    /// Metrics the suite reports, in display order
    pub metrics: Vec<String>,
    /// Build targets required before the suite can run
    pub build_targets: Vec<String>,
    pub cell_filter: CellFilter,
}

/// Build target every suite needs unless it says otherwise.
pub const DEFAULT_BUILD_TARGET: &str = "create_sdk";

fn owned(items: impl IntoIterator<Item = impl Into<String>>) -> Vec<String> {
    items.into_iter().map(Into::into).collect()
}

impl SuiteSpec {
    /// A suite named `name`, writing to a folder and trace prefix of the same name.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            output_folder: name.clone(),
            trace_prefix: name.clone(),
            name,
            platforms: Vec::new(),
            variants: Vec::new(),
            metrics: Vec::new(),
            build_targets: vec![DEFAULT_BUILD_TARGET.to_string()],
            cell_filter: every_cell,
        }
    }

    pub fn with_trace_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.trace_prefix = prefix.into();
        self
    }

    pub fn with_platforms(mut self, platforms: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.platforms = owned(platforms);
        self
    }

    pub fn with_variants(mut self, variants: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.variants = owned(variants);
        self
    }

    pub fn with_metrics(mut self, metrics: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.metrics = owned(metrics);
        self
    }

    pub fn with_build_targets(mut self, targets: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.build_targets = owned(targets);
        self
    }

    pub fn with_cell_filter(mut self, filter: CellFilter) -> Self {
        self.cell_filter = filter;
        self
    }
}

/// Per-run state of a suite: its spec plus what this run has decided so far.
#[derive(Debug, Clone)]
pub struct SuiteInfo {
    pub spec: SuiteSpec,
    /// Whole seconds since the epoch, captured once and shared by every trace of the run.
    /// Moved forward past any stamp already present in the output folder.
    pub run_stamp: u64,
    pub output_dir: PathBuf,
    /// Trace of the cell currently being run
    pub current_trace: Option<PathBuf>,
}

impl SuiteInfo {
    pub fn new(spec: SuiteSpec, config: &HarnessConfig) -> Self {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        let output_dir = config.perf_dir().join(&spec.output_folder);
        let run_stamp = unused_stamp(&output_dir, &spec.trace_prefix, now);
        Self {
            output_dir,
            spec,
            run_stamp,
            current_trace: None,
        }
    }

    pub fn with_run_stamp(mut self, stamp: u64) -> Self {
        self.run_stamp = stamp;
        self
    }

    pub fn name(&self) -> &str {
        &self.spec.name
    }

    pub fn is_valid_combination(&self, platform: &str, variant: &str) -> bool {
        (self.spec.cell_filter)(platform, variant)
    }

    /// Valid cells, platform-major in declared order.
    pub fn cells(&self) -> Vec<(String, String)> {
        let mut cells = Vec::new();
        for platform in &self.spec.platforms {
            for variant in &self.spec.variants {
                if self.is_valid_combination(platform, variant) {
                    cells.push((platform.clone(), variant.clone()));
                }
            }
        }
        cells
    }

    pub fn trace_name(&self, platform: &str, variant: &str) -> TraceFileName {
        TraceFileName::new(&self.spec.trace_prefix, self.run_stamp, platform, variant)
    }

    pub fn trace_path(&self, platform: &str, variant: &str) -> PathBuf {
        self.output_dir.join(self.trace_name(platform, variant).to_string())
    }
}

/// First stamp from `stamp` on that no trace of `prefix` in `dir` already carries.
fn unused_stamp(dir: &Path, prefix: &str, mut stamp: u64) -> u64 {
    let existing: Vec<String> = fs::read_dir(dir)
        .map(|entries| {
            entries
                .filter_map(Result::ok)
                .map(|entry| entry.file_name().to_string_lossy().into_owned())
                .collect()
        })
        .unwrap_or_default();
    while existing
        .iter()
        .any(|name| name.starts_with(&format!("{prefix}-{stamp}-")))
    {
        stamp += 1;
    }
    stamp
}

/// How one matrix cell ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellOutcome {
    Completed,
    /// The workload ran but its numbers are meaningless (e.g. below a sanity threshold).
    Abandoned(String),
    /// The workload could not be launched or its trace not written.
    Failed(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatrixSummary {
    pub attempted: usize,
    pub completed: usize,
    pub abandoned: usize,
    pub failed: usize,
}

impl MatrixSummary {
    pub fn record(&mut self, outcome: &CellOutcome) {
        self.attempted += 1;
        match outcome {
            CellOutcome::Completed => self.completed += 1,
            CellOutcome::Abandoned(_) => self.abandoned += 1,
            CellOutcome::Failed(_) => self.failed += 1,
        }
    }
}

/// What processing one trace file produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    Reported {
        revision: Revision,
        accepted: usize,
        rejected: usize,
    },
    /// The trace is not complete enough to report anything.
    Incomplete(TraceError),
    /// The file name does not follow the trace naming scheme.
    UnrecognizedName,
    /// Reading the file failed.
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
    pub file: String,
    pub outcome: FileOutcome,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuiteReport {
    pub suite: String,
    pub matrix: MatrixSummary,
    pub files: Vec<FileReport>,
}

impl SuiteReport {
    /// Metrics accepted by the reporting client across every file.
    pub fn accepted(&self) -> usize {
        self.files
            .iter()
            .map(|f| match f.outcome {
                FileOutcome::Reported { accepted, .. } => accepted,
                _ => 0,
            })
            .sum()
    }

    pub fn rejected(&self) -> usize {
        self.files
            .iter()
            .map(|f| match f.outcome {
                FileOutcome::Reported { rejected, .. } => rejected,
                _ => 0,
            })
            .sum()
    }
}

/// Run-phase strategy: executes the suite's workload for every valid cell.
pub trait Tester {
    /// One-time setup before the matrix runs (fetching drivers, generating pages).
    fn prepare(&mut self, _suite: &SuiteInfo, _ctx: &HarnessContext<'_>) -> Result<(), HarnessError> {
        Ok(())
    }

    /// Run every valid cell, writing one trace per cell.
    fn run_tests(&mut self, suite: &mut SuiteInfo, ctx: &HarnessContext<'_>) -> MatrixSummary;
}

/// Process-phase strategy: turns one trace file into reports.
pub trait Processor {
    fn prepare(&mut self, _suite: &SuiteInfo, _ctx: &HarnessContext<'_>) -> Result<(), HarnessError> {
        Ok(())
    }

    /// Report every metric in `file_name` (a file in the suite's output folder).
    fn process_file(
        &self,
        suite: &SuiteInfo,
        ctx: &HarnessContext<'_>,
        file_name: &str,
    ) -> Result<FileOutcome, HarnessError>;
}

pub struct Suite {
    pub info: SuiteInfo,
    tester: Box<dyn Tester>,
    processor: Box<dyn Processor>,
}

impl Suite {
    pub fn new(info: SuiteInfo, tester: Box<dyn Tester>, processor: Box<dyn Processor>) -> Self {
        Self {
            info,
            tester,
            processor,
        }
    }

    pub fn name(&self) -> &str {
        self.info.name()
    }

    pub fn build_targets(&self) -> &[String] {
        &self.info.spec.build_targets
    }

    #[tracing::instrument(skip_all, fields(suite = %self.info.spec.name))]
    pub fn run(&mut self, ctx: &HarnessContext<'_>) -> Result<SuiteReport, HarnessError> {
        self.tester.prepare(&self.info, ctx)?;
        self.processor.prepare(&self.info, ctx)?;

        let output_dir = self.info.output_dir.clone();
        fs::create_dir_all(&output_dir).map_err(|e| HarnessError::io(&output_dir, e))?;
        let matrix = self.tester.run_tests(&mut self.info, ctx);
        tracing::info!(
            attempted = matrix.attempted,
            completed = matrix.completed,
            abandoned = matrix.abandoned,
            failed = matrix.failed,
            "matrix finished"
        );

        let mut files = Vec::new();
        for file in list_trace_files(&output_dir)? {
            let outcome = match self.processor.process_file(&self.info, ctx, &file) {
                Ok(outcome) => outcome,
                Err(err) => {
                    tracing::warn!(file = %file, error = %err, "could not process trace");
                    FileOutcome::Failed(err.to_string())
                }
            };
            if let FileOutcome::Incomplete(reason) = &outcome {
                tracing::debug!(file = %file, %reason, "skipping incomplete trace");
            }
            files.push(FileReport { file, outcome });
        }

        Ok(SuiteReport {
            suite: self.info.spec.name.clone(),
            matrix,
            files,
        })
    }
}

/// Regular files in `dir` whose names do not start with `.`, sorted.
pub fn list_trace_files(dir: &Path) -> Result<Vec<String>, HarnessError> {
    let entries = fs::read_dir(dir).map_err(|e| HarnessError::io(dir, e))?;
    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| HarnessError::io(dir, e))?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.starts_with('.') {
            continue;
        }
        match entry.file_type() {
            Ok(kind) if kind.is_file() => names.push(name),
            _ => continue,
        }
    }
    names.sort();
    Ok(names)
}
