//! Result grammars.
//!
//! Each suite writes its metrics in the shape its benchmark library produces. The grammars here are deliberately
//! tolerant line scanners: a line that does not fit the grammar is skipped, never an error. The only hard outcomes
//! are the [`TraceError`] variants for traces that must not be reported at all.
//!
//! | Grammar | Produced by | Metric line |
//! |---|---|---|
//! | [`Grammar::KeyValue`] | compile tester | `name: value` |
//! | [`Grammar::BrowserResults`] | Selenium page runs | `<div id="results">` then `a: 1<br>b: 2` |
//! | [`Grammar::Dromaeo`] | Selenium Dromaeo runs | `<li><b>name:</b>123.4<small> runs/s ...</li>` |
//! | [`Grammar::Size`] | size tester | `Size (variant, metric): bytes` |
//!
//! All grammars only read metrics that follow the revision stamp.

pub mod browser;
pub mod dromaeo;
pub mod key_value;
pub mod size;

use std::str::Lines;

use crate::TraceError;
use crate::revision::Revision;
use crate::score::Score;

/// One metric extracted from a trace.
#[derive(Debug, Clone, PartialEq)]
pub struct TraceEntry {
    pub metric: String,
    pub score: Score,
    /// Variant named by the line itself; only the size grammar carries one.
    pub variant: Option<String>,
}

impl TraceEntry {
    pub fn new(metric: impl Into<String>, score: Score) -> Self {
        Self {
            metric: metric.into(),
            score,
            variant: None,
        }
    }

    pub fn with_variant(mut self, variant: impl Into<String>) -> Self {
        self.variant = Some(variant.into());
        self
    }
}

/// A complete trace: its revision and every metric that parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedTrace {
    pub revision: Revision,
    pub entries: Vec<TraceEntry>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grammar {
    KeyValue,
    BrowserResults,
    Dromaeo,
    Size,
}

impl Grammar {
    pub fn parse(self, text: &str) -> Result<ParsedTrace, TraceError> {
        match self {
            Grammar::KeyValue => key_value::parse(text),
            Grammar::BrowserResults => browser::parse(text),
            Grammar::Dromaeo => dromaeo::parse(text),
            Grammar::Size => size::parse(text),
        }
    }
}

/// Advance `lines` past the first usable revision stamp.
///
/// Returns the revision and leaves `lines` positioned on the line after the stamp.
fn take_revision(lines: &mut Lines<'_>) -> Result<Revision, TraceError> {
    lines
        .by_ref()
        .find_map(Revision::from_marker_line)
        .ok_or(TraceError::MissingRevision)
}
