//! `Size (variant, metric): bytes` traces.
//!
//! Sizes are not tied to a browser, so every report goes out under [`SIZE_PLATFORM`] and the variant comes from
//! each line rather than the file name.

use perfwatch_trace::Grammar;

use super::{publish, read_trace};
use crate::errors::HarnessError;
use crate::harness::HarnessContext;
use crate::harness::suite::{FileOutcome, Processor, SuiteInfo};

pub const SIZE_PLATFORM: &str = "browser";

#[derive(Debug, Default)]
pub struct SizeProcessor;

impl Processor for SizeProcessor {
    fn process_file(
        &self,
        suite: &SuiteInfo,
        ctx: &HarnessContext<'_>,
        file_name: &str,
    ) -> Result<FileOutcome, HarnessError> {
        let text = read_trace(suite, file_name)?;
        match Grammar::Size.parse(&text) {
            // Every size line names its variant, so the fallback is never used.
            Ok(trace) => Ok(publish(ctx, trace, SIZE_PLATFORM, "", |_| true)),
            Err(reason) => Ok(FileOutcome::Incomplete(reason)),
        }
    }
}
