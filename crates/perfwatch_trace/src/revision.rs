//! Revision stamps.
//!
//! ## Notes
//! - Revision `0` is the "unknown" sentinel. It is unrepresentable here: a stamp of `Revision: 0` or
//!   `Revision: unknown` parses as no revision at all, so it can never reach a reporting client.
//!
//! ## Examples
//! ```rust
//! use perfwatch_trace::Revision;
//!
//! let rev = Revision::from_marker_line("Revision: 1234").unwrap();
//! assert_eq!(rev.get(), 1234);
//! assert_eq!(Revision::from_marker_line("Revision: 0"), None);
//! assert_eq!(Revision::from_marker_line("Revision: unknown"), None);
//! ```

use std::fmt;
use std::num::NonZeroU64;

use serde::Serialize;

/// Label that starts every revision stamp line.
pub const MARKER: &str = "Revision:";

/// A known source revision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Revision(NonZeroU64);

impl Revision {
    /// Wrap a revision number; `0` yields `None`.
    pub fn new(value: u64) -> Option<Self> {
        NonZeroU64::new(value).map(Revision)
    }

    pub fn get(self) -> u64 {
        self.0.get()
    }

    /// Parse a stamp line such as `Revision: 1234`.
    ///
    /// Leading/trailing whitespace and quotes around the number are tolerated (`svn info` output and hand-written
    /// stamps differ here). Anything else, including the `0` sentinel, yields `None`.
    pub fn from_marker_line(line: &str) -> Option<Self> {
        let rest = line.trim().strip_prefix(MARKER)?;
        let digits = rest.trim().trim_matches('"');
        digits.parse::<u64>().ok().and_then(Revision::new)
    }

    /// Render the stamp line for `revision`, or the explicit unknown stamp.
    pub fn marker_line(revision: Option<Revision>) -> String {
        match revision {
            Some(rev) => format!("{MARKER} {rev}"),
            None => format!("{MARKER} unknown"),
        }
    }
}

impl fmt::Display for Revision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
