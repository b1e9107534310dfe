//! Metric scores.
//!
//! A score is an integer or a float. The text form decides which: anything with a decimal point is a float,
//! everything else must be an integer.
//!
//! ## Examples
//! ```rust
//! use perfwatch_trace::Score;
//!
//! assert_eq!(Score::parse("3"), Some(Score::Int(3)));
//! assert_eq!(Score::parse("3.5"), Some(Score::Float(3.5)));
//! assert_eq!(Score::parse("fast"), None);
//! ```

use std::fmt;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Score {
    Int(i64),
    Float(f64),
}

impl Score {
    /// Coerce trimmed `text` to a score; `None` if it is not a number of the kind its spelling implies.
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        if text.contains('.') {
            text.parse::<f64>().ok().map(Score::Float)
        } else {
            text.parse::<i64>().ok().map(Score::Int)
        }
    }

    pub fn as_f64(self) -> f64 {
        match self {
            Score::Int(v) => v as f64,
            Score::Float(v) => v,
        }
    }

    pub fn is_float(self) -> bool {
        matches!(self, Score::Float(_))
    }
}

/// Floats always render with a decimal point so that the text parses back as a float.
impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Score::Int(v) => write!(f, "{v}"),
            Score::Float(v) if v.is_finite() && v.fract() == 0.0 => write!(f, "{v:.1}"),
            Score::Float(v) => write!(f, "{v}"),
        }
    }
}

impl From<u64> for Score {
    fn from(value: u64) -> Self {
        Score::Int(i64::try_from(value).unwrap_or(i64::MAX))
    }
}
