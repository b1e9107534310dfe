//! Browser vocabulary.
//!
//! Browser suites run one matrix cell per browser. The set of browsers depends on the host: every host runs Dartium,
//! Firefox and Chrome; Safari is added on macOS and Internet Explorer on Windows.
//!
//! ## Notes
//! - The short names (`ff`, `ie`, ...) are what the Selenium driver script accepts on its `--browser` flag and what
//!   ends up in trace file names, so they must never contain `-`.
//!
//! ## Examples
//! ```rust
//! use perfwatch_core::HostOs;
//! use perfwatch_core::browsers;
//!
//! assert_eq!(browsers::names_for(HostOs::Linux), vec!["dartium", "ff", "chrome"]);
//! assert!(browsers::names_for(HostOs::MacOs).contains(&"safari"));
//! ```

use crate::host::HostOs;

/// Stable identifier for a browser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BrowserId {
    Dartium,
    Firefox,
    Chrome,
    Safari,
    InternetExplorer,
}

/// Metadata for a browser.
#[derive(Debug, Clone, Copy)]
pub struct BrowserInfo {
    pub id: BrowserId,
    /// Name passed to the Selenium driver and used in trace file names.
    pub name: &'static str,
    /// Host this browser is restricted to (`None` = every host).
    pub only_on: Option<HostOs>,
}

/// Browser name for the Dart-enabled Chromium build.
///
/// Dartium is special in two ways: its revision stamp comes from the downloaded build's version marker rather than
/// from version control, and its driver has to be fetched before any browser suite runs.
pub const DARTIUM: &str = "dartium";

/// Registry of all browsers, in the order matrix cells are attempted.
pub const BROWSERS: &[BrowserInfo] = &[
    BrowserInfo {
        id: BrowserId::Dartium,
        name: DARTIUM,
        only_on: None,
    },
    BrowserInfo {
        id: BrowserId::Firefox,
        name: "ff",
        only_on: None,
    },
    BrowserInfo {
        id: BrowserId::Chrome,
        name: "chrome",
        only_on: None,
    },
    BrowserInfo {
        id: BrowserId::Safari,
        name: "safari",
        only_on: Some(HostOs::MacOs),
    },
    BrowserInfo {
        id: BrowserId::InternetExplorer,
        name: "ie",
        only_on: Some(HostOs::Windows),
    },
];

/// Browsers available on `host`, in registry order.
pub fn available_on(host: HostOs) -> impl Iterator<Item = &'static BrowserInfo> {
    BROWSERS.iter().filter(move |b| b.only_on.is_none_or(|only| only == host))
}

/// Names of the browsers available on `host`.
pub fn names_for(host: HostOs) -> Vec<&'static str> {
    available_on(host).map(|b| b.name).collect()
}

/// Look up a browser by its short name (case-sensitive).
pub fn from_str(name: &str) -> Option<BrowserId> {
    BROWSERS.iter().find(|b| b.name == name).map(|b| b.id)
}
