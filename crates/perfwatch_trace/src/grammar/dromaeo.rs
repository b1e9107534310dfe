//! Dromaeo result markup.
//!
//! Each finished Dromaeo suite renders as a container holding one `<li>` per benchmark:
//!
//! ```text
//! <div class="result-item done">...<ol><li><b>getAttribute:</b>1234.56<small> runs/s &#177;1.2%</small></li>...</ol></div>
//! ```
//!
//! Names lose their surrounding colons and are legalized with
//! [`perfwatch_core::benchmarks::legalize_metric_name`]; scores are always floats (runs per second).

use std::sync::LazyLock;

use perfwatch_core::benchmarks::legalize_metric_name;
use regex::Regex;

use super::{ParsedTrace, TraceEntry, take_revision};
use crate::TraceError;
use crate::score::Score;

static SUITE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<div class="result-item done">(.+?)</ol></div>"#).expect("INVARIANT: suite regex compiles")
});
static ITEM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<li>(.*?)</li>").expect("INVARIANT: item regex compiles"));
static RESULT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^<b>(.+?)</b>(.+?)<small> runs/s").expect("INVARIANT: result regex compiles"));

pub fn parse(text: &str) -> Result<ParsedTrace, TraceError> {
    let mut lines = text.lines();
    let revision = take_revision(&mut lines)?;

    let mut entries = Vec::new();
    for line in lines {
        for suite in SUITE_RE.captures_iter(line) {
            for item in ITEM_RE.captures_iter(&suite[1]) {
                if let Some(entry) = parse_item(&item[1]) {
                    entries.push(entry);
                }
            }
        }
    }

    Ok(ParsedTrace { revision, entries })
}

fn parse_item(item: &str) -> Option<TraceEntry> {
    let Some(caps) = RESULT_RE.captures(item) else {
        tracing::trace!(item, "skipping unrecognized Dromaeo item");
        return None;
    };
    let name = caps[1].trim().trim_matches(':').trim();
    let score = caps[2].trim().parse::<f64>().ok()?;
    Some(TraceEntry::new(legalize_metric_name(name), Score::Float(score)))
}
