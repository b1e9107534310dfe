//! Dromaeo result pages.

use perfwatch_trace::Grammar;

use super::{parse_name, publish, read_trace};
use crate::errors::HarnessError;
use crate::harness::HarnessContext;
use crate::harness::suite::{FileOutcome, Processor, SuiteInfo};

#[derive(Debug, Default)]
pub struct DromaeoProcessor;

impl Processor for DromaeoProcessor {
    fn process_file(
        &self,
        suite: &SuiteInfo,
        ctx: &HarnessContext<'_>,
        file_name: &str,
    ) -> Result<FileOutcome, HarnessError> {
        let Some(name) = parse_name(file_name) else {
            return Ok(FileOutcome::UnrecognizedName);
        };
        let text = read_trace(suite, file_name)?;
        match Grammar::Dromaeo.parse(&text) {
            Ok(trace) => Ok(publish(ctx, trace, &name.platform, &name.variant, |_| true)),
            Err(reason) => Ok(FileOutcome::Incomplete(reason)),
        }
    }
}
