#![forbid(unsafe_code)]
//! perfwatch: an unattended performance-regression harness.
//!
//! The harness watches a source checkout for new revisions, syncs and builds it, runs a selection of benchmark
//! suites across their platform × variant matrix, and reports every metric it finds in the resulting trace files.
//!
//! - [`harness`]: suite lifecycle, registry, testers, processors and the scheduler ([`harness::PerfRunner`]).
//! - [`collab`]: the external collaborators (shell, version control, build, reporting) behind traits.
//! - [`config`]: [`HarnessConfig`] and its environment layer.
//! - [`cli`]: argument parsing and process exit.
//!
//! ## Panic Policy
//!
//! This codebase follows explicit error handling:
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. The `cli` and `harness` modules
//!   enforce `#![deny(clippy::unwrap_used)]`.
//!
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.
//!
//! - **True invariants**: If a panic represents a harness bug (logic error), use `.expect("INVARIANT: reason")` with a
//!   clear explanation.

pub mod cli;
pub mod collab;
pub mod config;
pub mod errors;
pub mod harness;
pub mod version;

pub use collab::Collaborators;
pub use config::HarnessConfig;
pub use errors::HarnessError;
pub use harness::{PerfRunner, SuiteRegistry};
