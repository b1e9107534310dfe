//! Dromaeo artifact sizes.
//!
//! One cell per variant. Each cell records the size of every Dromaeo suite's artifact for that variant, then the
//! variant total under [`SIZE_SUM_METRIC`]. The `dart` variant measures the Dart sources; the others measure the
//! compiled JavaScript. Missing artifacts are recorded as 0 so a broken compile shows up as a cliff in the graphs.

use std::path::{Path, PathBuf};

use perfwatch_core::benchmarks::{DART_SOURCE_VARIANT, DROMAEO_SIZE_VARIANTS, DROMAEO_SUITES, SIZE_SUM_METRIC};
use perfwatch_trace::format::size_line;

use super::{append_line, dromaeo_dir, file_size, generate_dromaeo_tests, run_matrix};
use crate::errors::HarnessError;
use crate::harness::HarnessContext;
use crate::harness::suite::{CellOutcome, MatrixSummary, SuiteInfo, Tester};

#[derive(Debug, Default)]
pub struct SizeTester;

/// Artifact measured for Dromaeo suite `key` under `variant`, relative to the Dromaeo directory.
///
/// `None` for a variant with no known artifact layout.
pub fn artifact_for(variant: &str, key: &str) -> Option<PathBuf> {
    let tests = Path::new("tests");
    if variant == DART_SOURCE_VARIANT {
        return Some(tests.join(format!("dom-{key}.dart")));
    }
    DROMAEO_SIZE_VARIANTS
        .iter()
        .find(|(name, _)| *name == variant)
        .map(|(_, suffix)| tests.join("frog").join(format!("dom-{key}{suffix}.dart.js")))
}

impl Tester for SizeTester {
    fn prepare(&mut self, _suite: &SuiteInfo, ctx: &HarnessContext<'_>) -> Result<(), HarnessError> {
        generate_dromaeo_tests(ctx)
    }

    fn run_tests(&mut self, suite: &mut SuiteInfo, ctx: &HarnessContext<'_>) -> MatrixSummary {
        let dromaeo = dromaeo_dir(ctx);
        run_matrix(suite, ctx, |_, variant, trace| {
            let mut total = 0;
            for dromaeo_suite in DROMAEO_SUITES {
                let Some(artifact) = artifact_for(variant, dromaeo_suite.key) else {
                    return Ok(CellOutcome::Failed(format!("no artifact layout for variant `{variant}`")));
                };
                let bytes = file_size(&dromaeo.join(artifact));
                total += bytes;
                append_line(trace, &size_line(variant, dromaeo_suite.key, bytes))?;
            }
            append_line(trace, &size_line(variant, SIZE_SUM_METRIC, total))?;
            Ok(CellOutcome::Completed)
        })
    }
}
