//! Benchmark tables for the browser suites.
//!
//! ## Notes
//! - Dromaeo metric names come straight from the benchmark page (`getElementsByTagName(*)`, ...). They are
//!   legalized with [`legalize_metric_name`] before being reported so they are safe to use as file names downstream.
//! - The `modify` Dromaeo tag is skipped on macOS where it breaks the 32-bit browsers.
//!
//! ## Examples
//! ```rust
//! use perfwatch_core::benchmarks::legalize_metric_name;
//!
//! assert_eq!(legalize_metric_name("getElementsByTagName(*)"), "getElementsByTagName_ALL_");
//! assert_eq!(legalize_metric_name("element.property = value"), "element.property_ASSIGN_value");
//! ```

use crate::host::HostOs;

/// Standalone benchmarks run by the `browser-perf` page.
pub const STANDALONE_BENCHMARKS: &[&str] = &[
    "Mandelbrot",
    "DeltaBlue",
    "Richards",
    "NBody",
    "BinaryTrees",
    "Fannkuch",
    "Meteor",
    "BubbleSort",
    "Fibonacci",
    "Loop",
    "Permute",
    "Queens",
    "QuickSort",
    "Recurse",
    "Sieve",
    "Sum",
    "Tak",
    "Takl",
    "Towers",
    "TreeSort",
];

/// One Dromaeo DOM suite.
#[derive(Debug, Clone, Copy)]
pub struct DromaeoSuite {
    /// Short key used in generated test file names (`dom-<key>.dart`) and size metrics.
    pub key: &'static str,
    /// Tag understood by the Dromaeo page's query string.
    pub tag: &'static str,
    /// Individual benchmark names as printed by the page.
    pub tests: &'static [&'static str],
}

/// Registry of Dromaeo suites.
pub const DROMAEO_SUITES: &[DromaeoSuite] = &[
    DromaeoSuite {
        key: "attr",
        tag: "attributes",
        tests: &[
            "getAttribute",
            "element.property",
            "setAttribute",
            "element.property = value",
        ],
    },
    DromaeoSuite {
        key: "modify",
        tag: "modify",
        tests: &[
            "createElement",
            "createTextNode",
            "innerHTML",
            "cloneNode",
            "appendChild",
            "insertBefore",
        ],
    },
    DromaeoSuite {
        key: "query",
        tag: "query",
        tests: &[
            "getElementById",
            "getElementById (not in document)",
            "getElementsByTagName(div)",
            "getElementsByTagName(p)",
            "getElementsByTagName(a)",
            "getElementsByTagName(*)",
            "getElementsByTagName (not in document)",
            "getElementsByName",
            "getElementsByName (not in document)",
        ],
    },
    DromaeoSuite {
        key: "traverse",
        tag: "traverse",
        tests: &["firstChild", "lastChild", "nextSibling", "previousSibling", "childNodes"],
    },
];

/// Variants exercised by the Dromaeo runtime suite.
pub const DROMAEO_VARIANTS: &[&str] = &["js", "frog_dom", "frog_html"];

/// Compiled-output variants measured by the Dromaeo size suite, with the file-name suffix of each artifact.
///
/// The `dart` variant is measured from the Dart sources and has no compiled artifact.
pub const DROMAEO_SIZE_VARIANTS: &[(&str, &str)] = &[
    ("frog_dom", ""),
    ("frog_html", "-html"),
    ("frog_htmlidiomatic", "-htmlidiomatic"),
];

/// Variant name for the uncompiled Dart sources in the size suite.
pub const DART_SOURCE_VARIANT: &str = "dart";

/// Metric name for the per-variant total in the size suite.
pub const SIZE_SUM_METRIC: &str = "sum";

/// Rewrite characters that are awkward in file names and URLs.
pub fn legalize_metric_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for ch in name.chars() {
        match ch {
            ' ' | '(' | ')' => out.push('_'),
            '*' => out.push_str("ALL"),
            '=' => out.push_str("ASSIGN"),
            other => out.push(other),
        }
    }
    out
}

/// Dromaeo suites runnable on `host`.
pub fn valid_dromaeo_suites(host: HostOs) -> impl Iterator<Item = &'static DromaeoSuite> {
    DROMAEO_SUITES
        .iter()
        .filter(move |suite| !(host == HostOs::MacOs && suite.tag == "modify"))
}

/// Dromaeo tags runnable on `host`.
pub fn valid_dromaeo_tags(host: HostOs) -> Vec<&'static str> {
    valid_dromaeo_suites(host).map(|suite| suite.tag).collect()
}

/// Legalized metric names reported by the Dromaeo runtime suite on `host`.
pub fn dromaeo_metrics(host: HostOs) -> Vec<String> {
    valid_dromaeo_suites(host)
        .flat_map(|suite| suite.tests.iter())
        .map(|test| legalize_metric_name(test))
        .collect()
}
