//! Standalone benchmark results captured from a browser page.
//!
//! The Selenium driver dumps the page body into the trace. The stamp comes first; somewhere after it a line contains
//! `<div id="results">` and the *next* line carries every result, separated by `<br>` (or `<br />`, depending on the
//! browser's serializer):
//!
//! ```text
//! Revision: 4521
//! <html>...<div id="results">
//! DeltaBlue: 1234<br>Richards: 987.5<br></div>
//! ```
//!
//! Reading stops at the first segment without a `:`.

use super::{ParsedTrace, TraceEntry};
use crate::TraceError;
use crate::revision::Revision;
use crate::score::Score;

const RESULTS_DIV: &str = "<div id=\"results\">";

pub fn parse(text: &str) -> Result<ParsedTrace, TraceError> {
    let mut revision = None;
    let mut lines = text.lines();

    let mut found_div = false;
    for line in lines.by_ref() {
        if line.contains(RESULTS_DIV) {
            found_div = true;
            break;
        }
        if revision.is_none() {
            revision = Revision::from_marker_line(line);
        }
    }

    let revision = revision.ok_or(TraceError::MissingRevision)?;
    if !found_div {
        return Err(TraceError::MissingResults);
    }
    let payload = lines.next().ok_or(TraceError::MissingResults)?;

    let separator = if payload.contains("<br>") { "<br>" } else { "<br />" };
    let mut entries = Vec::new();
    for segment in payload.split(separator) {
        let Some((name, score)) = segment.split_once(':') else {
            break;
        };
        match Score::parse(score) {
            Some(score) => entries.push(TraceEntry::new(name.trim(), score)),
            None => tracing::trace!(segment, "skipping non-numeric browser result"),
        }
    }

    Ok(ParsedTrace { revision, entries })
}
