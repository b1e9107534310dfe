//! `name: value` lines.
//!
//! The name is everything before the first `:` and may contain spaces (`Compiling on Dart VM: 1.25`). Lines whose
//! value is not a number, later revision stamps, and blank lines are skipped.

use super::{ParsedTrace, TraceEntry, take_revision};
use crate::TraceError;
use crate::revision::MARKER;
use crate::score::Score;

pub fn parse(text: &str) -> Result<ParsedTrace, TraceError> {
    let mut lines = text.lines();
    let revision = take_revision(&mut lines)?;

    let entries = lines.filter_map(parse_line).collect();
    Ok(ParsedTrace { revision, entries })
}

fn parse_line(line: &str) -> Option<TraceEntry> {
    let line = line.trim();
    if line.starts_with(MARKER) {
        return None;
    }
    let (name, value) = line.split_once(':')?;
    let name = name.trim();
    if name.is_empty() {
        return None;
    }
    match Score::parse(value) {
        Some(score) => Some(TraceEntry::new(name, score)),
        None => {
            tracing::trace!(line, "skipping non-numeric metric line");
            None
        }
    }
}
