//! `name: value` traces (compile suite).

use perfwatch_trace::Grammar;

use super::{parse_name, publish, read_trace};
use crate::errors::HarnessError;
use crate::harness::HarnessContext;
use crate::harness::suite::{FileOutcome, Processor, SuiteInfo};

/// Reports only the metrics the suite declares; anything else in the trace is workload chatter.
#[derive(Debug, Default)]
pub struct KeyValueProcessor;

impl Processor for KeyValueProcessor {
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
        let trace = match Grammar::KeyValue.parse(&text) {
            Ok(trace) => trace,
            Err(reason) => return Ok(FileOutcome::Incomplete(reason)),
        };
        let declared = &suite.spec.metrics;
        Ok(publish(ctx, trace, &name.platform, &name.variant, |metric| {
            declared.iter().any(|m| m == metric)
        }))
    }
}
