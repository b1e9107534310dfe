//! Suite vocabulary.
//!
//! Canonical names for the built-in suites, in the order the harness registers (and by default runs) them. The
//! harness's registry maps these names to constructors; this table only fixes the spelling and the trace-file prefix.
//!
//! ## Examples
//! ```rust
//! use perfwatch_core::suites::{self, SuiteId};
//!
//! assert_eq!(suites::from_str("dromaeo-size"), Some(SuiteId::DromaeoSize));
//! assert_eq!(suites::info(SuiteId::BrowserPerf).trace_prefix, "perf");
//! ```

/// Stable identifier for a built-in suite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SuiteId {
    TimeSize,
    BrowserPerf,
    Dromaeo,
    DromaeoSize,
}

/// Metadata for a built-in suite.
#[derive(Debug, Clone, Copy)]
pub struct SuiteInfo {
    pub id: SuiteId,
    /// Name used on the command line; also the suite's output folder.
    pub name: &'static str,
    /// First component of every trace file the suite writes.
    pub trace_prefix: &'static str,
    pub description: &'static str,
}

/// Registry of built-in suites.
pub const SUITES: &[SuiteInfo] = &[
    SuiteInfo {
        id: SuiteId::TimeSize,
        name: "time-size",
        trace_prefix: "time-size",
        description: "Compiler self-hosting time and generated code size.",
    },
    SuiteInfo {
        id: SuiteId::BrowserPerf,
        name: "browser-perf",
        trace_prefix: "perf",
        description: "Standalone benchmarks (DeltaBlue, Richards, ...) in every browser.",
    },
    SuiteInfo {
        id: SuiteId::Dromaeo,
        name: "dromaeo",
        trace_prefix: "dromaeo",
        description: "Dromaeo DOM benchmarks in every browser.",
    },
    SuiteInfo {
        id: SuiteId::DromaeoSize,
        name: "dromaeo-size",
        trace_prefix: "dromaeo-size",
        description: "Compiled output size of the Dromaeo benchmarks.",
    },
];

/// Metadata for `id`.
pub fn info(id: SuiteId) -> &'static SuiteInfo {
    // Every `SuiteId` variant has exactly one row; `suite_table_is_complete` pins this.
    match SUITES.iter().find(|s| s.id == id) {
        Some(info) => info,
        None => unreachable!("suite table is missing {id:?}"),
    }
}

/// Canonical name of `id`.
pub fn as_str(id: SuiteId) -> &'static str {
    info(id).name
}

/// Resolve a command-line suite name (case-sensitive).
pub fn from_str(name: &str) -> Option<SuiteId> {
    SUITES.iter().find(|s| s.name == name).map(|s| s.id)
}
