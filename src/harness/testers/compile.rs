//! Compiler self-hosting time and output size.
//!
//! Runs in `<root>/frog`:
//!
//! | Step | Command | Trace line |
//! |---|---|---|
//! | compile the compiler on the VM | `dart ./minfrogc.dart --out=minfrog minfrog.dart` | `Compiling on Dart VM: <s>` |
//! | bootstrap with the result | `./minfrog --out=minfrog minfrog.dart tests/hello.dart` | `Bootstrapping: <s>`, `minfrog: <bytes>` |
//! | compile two samples | `frogc --out=<name>-result <sample>` | `swarm: <bytes>`, `total: <bytes>` |
//!
//! A bootstrap faster than [`BOOTSTRAP_THRESHOLD`] means the compiler did not actually compile anything; the cell
//! is abandoned before any size is recorded.

use std::path::Path;
use std::time::Duration;

use perfwatch_trace::Score;
use perfwatch_trace::format::{metric_line, timing_line};

use super::{append_line, file_size, run_matrix};
use crate::collab::{CommandLine, OutputSink};
use crate::errors::HarnessError;
use crate::harness::HarnessContext;
use crate::harness::suite::{CellOutcome, MatrixSummary, SuiteInfo, Tester};

pub const METRIC_VM_COMPILE: &str = "Compiling on Dart VM";
pub const METRIC_BOOTSTRAP: &str = "Bootstrapping";
pub const METRIC_MINFROG: &str = "minfrog";
pub const METRIC_SWARM: &str = "swarm";
pub const METRIC_TOTAL: &str = "total";

/// Metrics written by the compile tester, in trace order.
pub const COMPILE_METRICS: &[&str] = &[METRIC_VM_COMPILE, METRIC_BOOTSTRAP, METRIC_MINFROG, METRIC_SWARM, METRIC_TOTAL];

/// Fastest plausible bootstrap.
pub const BOOTSTRAP_THRESHOLD: Duration = Duration::from_millis(500);

/// Samples compiled for size, as (metric, output name, source relative to `frog/`).
const SAMPLES: &[(&str, &str, &str)] = &[
    (METRIC_SWARM, "swarm-result", "../samples/swarm/swarm.dart"),
    (METRIC_TOTAL, "total-result", "../samples/total/client/Total.dart"),
];

#[derive(Debug, Default)]
pub struct CompileTester;

impl Tester for CompileTester {
    fn run_tests(&mut self, suite: &mut SuiteInfo, ctx: &HarnessContext<'_>) -> MatrixSummary {
        run_matrix(suite, ctx, |_, _, trace| compile_cell(trace, ctx))
    }
}

fn compile_cell(trace: &Path, ctx: &HarnessContext<'_>) -> Result<CellOutcome, HarnessError> {
    let config = ctx.config;
    let frog = config.in_root("frog");
    let sdk_bin = config.sdk_bin();
    let dart_vm = sdk_bin.join(format!("dart{}", config.host.exe_suffix()));
    let frogc = sdk_bin.join("frogc");

    let on_vm = CommandLine::new(&dart_vm)
        .args(["./minfrogc.dart", "--out=minfrog", "minfrog.dart"])
        .current_dir(&frog);
    let (_, elapsed) = ctx.shell.time(&on_vm, &OutputSink::Capture)?;
    append_line(trace, &timing_line(METRIC_VM_COMPILE, elapsed))?;

    let bootstrap = CommandLine::new("./minfrog")
        .args(["--out=minfrog", "minfrog.dart", "tests/hello.dart"])
        .current_dir(&frog);
    let (_, elapsed) = ctx.shell.time(&bootstrap, &OutputSink::Capture)?;
    if elapsed < BOOTSTRAP_THRESHOLD {
        return Ok(CellOutcome::Abandoned(format!(
            "bootstrap took {:.3}s, below the {:.1}s threshold",
            elapsed.as_secs_f64(),
            BOOTSTRAP_THRESHOLD.as_secs_f64()
        )));
    }
    append_line(trace, &timing_line(METRIC_BOOTSTRAP, elapsed))?;
    append_line(trace, &metric_line(METRIC_MINFROG, Score::from(file_size(&frog.join("minfrog")))))?;

    for (metric, out, source) in SAMPLES {
        let command = CommandLine::new(&frogc)
            .arg(format!("--out={out}"))
            .arg(source)
            .current_dir(&frog);
        let output = ctx.shell.run(&command, &OutputSink::Capture)?;
        if !output.success() {
            tracing::warn!(sample = metric, status = output.status, "sample failed to compile; size recorded as 0");
        }
        append_line(trace, &metric_line(metric, Score::from(file_size(&frog.join(out)))))?;
    }

    // The bootstrapped compiler is checked in; keep the next sync clean.
    if let Err(err) = ctx.vcs.revert(&frog.join("minfrog")) {
        tracing::warn!(error = %err, "could not revert minfrog");
    }
    Ok(CellOutcome::Completed)
}
