//! Provide the shared, pure vocabulary of the perfwatch harness.
//!
//! Everything the harness needs to *name* lives here: the host operating systems it knows how to drive, the browsers
//! available on each host, the benchmark tables for the browser suites, and the canonical suite names.
//!
//! ## Notes
//!
//! - This is a vocabulary crate: **no IO**, no global state, and no dependencies.
//! - The trace grammar (`perfwatch_trace`) and the harness (`perfwatch`) both read these tables, so the names written
//!   into trace files and the names parsed back out of them cannot drift apart.

pub mod benchmarks;
pub mod browsers;
pub mod host;
pub mod suites;

pub use host::HostOs;
