//! Line formatting for the trace grammars.
//!
//! Testers write through these helpers so that what they emit is exactly what the matching [`crate::grammar`]
//! accepts.

use std::time::Duration;

use crate::score::Score;

/// `name: value` line for the key/value grammar.
pub fn metric_line(name: &str, score: Score) -> String {
    format!("{name}: {score}")
}

/// Elapsed time in seconds, with six decimals so it always reads back as a float.
pub fn timing_line(name: &str, elapsed: Duration) -> String {
    format!("{name}: {:.6}", elapsed.as_secs_f64())
}

/// `Size (variant, metric): bytes` line for the size grammar.
pub fn size_line(variant: &str, metric: &str, bytes: u64) -> String {
    format!("Size ({variant}, {metric}): {bytes}")
}
