//! Trace file names.
//!
//! Every trace file is named `<prefix>-<stamp>-<platform>-<variant>`. The stamp is the suite's run timestamp, shared
//! by every cell of one run, so names are unique within a run and never collide with earlier runs.
//!
//! ## Notes
//! - Prefixes may contain `-` (`dromaeo-size`), platforms and variants may not. Names are therefore parsed from the
//!   right.
//!
//! ## Examples
//! ```rust
//! use perfwatch_trace::TraceFileName;
//!
//! let name: TraceFileName = "dromaeo-size-1700000000-browser-frog_dom".parse().unwrap();
//! assert_eq!(name.prefix, "dromaeo-size");
//! assert_eq!(name.platform, "browser");
//! assert_eq!(name.variant, "frog_dom");
//! assert_eq!(name.to_string(), "dromaeo-size-1700000000-browser-frog_dom");
//! ```

use std::fmt;
use std::str::FromStr;

use crate::TraceError;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TraceFileName {
    pub prefix: String,
    pub stamp: u64,
    pub platform: String,
    pub variant: String,
}

impl TraceFileName {
    pub fn new(prefix: impl Into<String>, stamp: u64, platform: impl Into<String>, variant: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            stamp,
            platform: platform.into(),
            variant: variant.into(),
        }
    }
}

impl fmt::Display for TraceFileName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}-{}", self.prefix, self.stamp, self.platform, self.variant)
    }
}

impl FromStr for TraceFileName {
    type Err = TraceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || TraceError::MalformedName(s.to_string());

        let mut parts = s.rsplitn(4, '-');
        let variant = parts.next().filter(|p| !p.is_empty()).ok_or_else(malformed)?;
        let platform = parts.next().filter(|p| !p.is_empty()).ok_or_else(malformed)?;
        let stamp = parts.next().and_then(|p| p.parse::<u64>().ok()).ok_or_else(malformed)?;
        let prefix = parts.next().filter(|p| !p.is_empty()).ok_or_else(malformed)?;

        Ok(TraceFileName::new(prefix, stamp, platform, variant))
    }
}
