//! The perfwatch trace file protocol.
//!
//! A trace file is the hand-off between the *run* phase (a tester executing a workload) and the *process* phase (a
//! processor reporting metrics). It is plain UTF-8 text:
//!
//! ```text
//! Revision: 1234
//! Compiling on Dart VM: 12.500000
//! minfrog: 2097152
//! ```
//!
//! The first meaningful line is a revision stamp; what follows depends on the suite and is parsed by one of the
//! [`grammar`]s. A trace without a usable stamp is *incomplete* and must never be partially reported; every grammar
//! returns [`TraceError::MissingRevision`] for it instead of an empty result.
//!
//! ## Notes
//! - This crate does no IO. Testers format lines with [`format`]; processors hand file contents to a [`Grammar`].
//! - Trace file names carry the run stamp, platform and variant; see [`TraceFileName`].

pub mod format;
pub mod grammar;
pub mod name;
pub mod revision;
pub mod score;

pub use grammar::{Grammar, ParsedTrace, TraceEntry};
pub use name::TraceFileName;
pub use revision::Revision;
pub use score::Score;

/// Reasons a trace file yields nothing to report.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, miette::Diagnostic)]
pub enum TraceError {
    #[error("trace has no revision stamp")]
    #[diagnostic(
        code(perfwatch::trace::missing_revision),
        help("the run that wrote this trace did not finish; it is skipped")
    )]
    MissingRevision,

    #[error("trace has a revision stamp but no results block")]
    #[diagnostic(code(perfwatch::trace::missing_results))]
    MissingResults,

    #[error("`{0}` is not a trace file name (<prefix>-<stamp>-<platform>-<variant>)")]
    #[diagnostic(code(perfwatch::trace::malformed_name))]
    MalformedName(String),
}
