//! Standalone benchmark pages (`browser-perf`).

use perfwatch_trace::Grammar;

use super::{parse_name, publish, read_trace};
use crate::errors::HarnessError;
use crate::harness::HarnessContext;
use crate::harness::suite::{FileOutcome, Processor, SuiteInfo};

/// Older traces name the plain-JavaScript variant after the engine.
const VARIANT_ALIASES: &[(&str, &str)] = &[("v8", "js")];

pub fn canonical_variant(variant: &str) -> &str {
    VARIANT_ALIASES
        .iter()
        .find(|(alias, _)| *alias == variant)
        .map_or(variant, |(_, canonical)| *canonical)
}

#[derive(Debug, Default)]
pub struct BrowserResultsProcessor;

impl Processor for BrowserResultsProcessor {
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
        match Grammar::BrowserResults.parse(&text) {
            Ok(trace) => Ok(publish(ctx, trace, &name.platform, canonical_variant(&name.variant), |_| true)),
            Err(reason) => Ok(FileOutcome::Incomplete(reason)),
        }
    }
}
