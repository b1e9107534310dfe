//! `Size (variant, metric): bytes` lines.
//!
//! Unlike the other grammars the variant is named on each line, so a single trace may carry several variants.

use std::sync::LazyLock;

use regex::Regex;

use super::{ParsedTrace, TraceEntry, take_revision};
use crate::TraceError;
use crate::score::Score;

static SIZE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^Size \((\w+), ([A-Za-z0-9_-]+)\): (\d+(?:\.\d+)?)$").expect("INVARIANT: size regex compiles")
});

pub fn parse(text: &str) -> Result<ParsedTrace, TraceError> {
    let mut lines = text.lines();
    let revision = take_revision(&mut lines)?;

    let entries = lines
        .filter_map(|line| {
            let caps = SIZE_RE.captures(line.trim())?;
            let score = Score::parse(&caps[3])?;
            Some(TraceEntry::new(&caps[2], score).with_variant(&caps[1]))
        })
        .collect();

    Ok(ParsedTrace { revision, entries })
}
