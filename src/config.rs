//! Harness configuration.
//!
//! Layered in increasing precedence: [`Default`] → environment ([`HarnessConfig::from_env`]) → command-line flags
//! (applied by the CLI through the `with_*` builders).
//!
//! | Variable | Field |
//! |---|---|
//! | `PERFWATCH_ROOT` | [`HarnessConfig::root`] |
//! | `PERFWATCH_POLL_SECS` | [`HarnessConfig::poll_interval`] |
//! | `PERFWATCH_BROWSER_TIMEOUT` | [`HarnessConfig::browser_timeout_secs`] |
//! | `PERFWATCH_RESULTS` | [`HarnessConfig::results_path`] |
//! | `PERFWATCH_REPORT_CMD` | [`HarnessConfig::report_command`] |

use std::path::{Path, PathBuf};
use std::time::Duration;

use perfwatch_core::HostOs;

use crate::errors::HarnessError;

pub const ENV_ROOT: &str = "PERFWATCH_ROOT";
pub const ENV_POLL_SECS: &str = "PERFWATCH_POLL_SECS";
pub const ENV_BROWSER_TIMEOUT: &str = "PERFWATCH_BROWSER_TIMEOUT";
pub const ENV_RESULTS: &str = "PERFWATCH_RESULTS";
pub const ENV_REPORT_CMD: &str = "PERFWATCH_REPORT_CMD";

/// Harness configuration
#[derive(Debug, Clone)]
pub struct HarnessConfig {
    /// Checkout root; every relative path the harness uses is resolved against it
    pub root: PathBuf,
    /// Host the harness runs on
    pub host: HostOs,
    /// Build mode passed to the build tool
    pub build_mode: String,
    /// Build architecture passed to the build tool
    pub build_arch: String,
    /// Delay between polls in continuous mode when nothing changed upstream
    pub poll_interval: Duration,
    /// Timeout handed to the browser driver
    pub browser_timeout_secs: u64,
    /// Echo every external command before running it
    pub verbose: bool,
    /// JSON-lines ledger; defaults to `results.jsonl` in the perf directory
    pub results_path: Option<PathBuf>,
    /// Program to report metrics through instead of the ledger
    pub report_command: Option<String>,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            host: HostOs::current(),
            build_mode: "release".to_string(),
            build_arch: "ia32".to_string(),
            poll_interval: Duration::from_secs(200),
            browser_timeout_secs: 600,
            verbose: false,
            results_path: None,
            report_command: None,
        }
    }
}

impl HarnessConfig {
    /// Create a new config with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults overlaid with the process environment.
    pub fn from_env() -> Result<Self, HarnessError> {
        Self::from_env_with(|key| std::env::var(key).ok())
    }

    /// Defaults overlaid with whatever `lookup` returns for each `PERFWATCH_*` variable.
    pub fn from_env_with(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, HarnessError> {
        let mut config = Self::default();
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(root) = get(ENV_ROOT) {
            config.root = PathBuf::from(root);
        }
        config.root = absolute_root(&config.root)?;
        if let Some(secs) = get(ENV_POLL_SECS) {
            config.poll_interval = Duration::from_secs(parse_secs(ENV_POLL_SECS, &secs)?);
        }
        if let Some(secs) = get(ENV_BROWSER_TIMEOUT) {
            config.browser_timeout_secs = parse_secs(ENV_BROWSER_TIMEOUT, &secs)?;
        }
        if let Some(path) = get(ENV_RESULTS) {
            config.results_path = Some(PathBuf::from(path));
        }
        config.report_command = get(ENV_REPORT_CMD);
        Ok(config)
    }

    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = root.into();
        self
    }

    pub fn with_host(mut self, host: HostOs) -> Self {
        self.host = host;
        self
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn with_results_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.results_path = Some(path.into());
        self
    }

    pub fn with_report_command(mut self, program: impl Into<String>) -> Self {
        self.report_command = Some(program.into());
        self
    }

    /// `<root>/tools/testing/perf_testing`: parent of every suite's output folder.
    pub fn perf_dir(&self) -> PathBuf {
        self.root.join("tools").join("testing").join("perf_testing")
    }

    /// Build output root for the configured mode and architecture, e.g. `<root>/out/ReleaseIA32`.
    pub fn build_root(&self) -> PathBuf {
        self.root.join(self.host.build_root(&self.build_mode, &self.build_arch))
    }

    /// Binaries of the SDK produced by the build.
    pub fn sdk_bin(&self) -> PathBuf {
        self.build_root().join("dart-sdk").join("bin")
    }

    /// Version marker of the downloaded Dartium build.
    pub fn dartium_version_file(&self) -> PathBuf {
        self.root.join("client").join("tests").join("dartium").join("LAST_VERSION")
    }

    pub fn ledger_path(&self) -> PathBuf {
        match &self.results_path {
            Some(path) => path.clone(),
            None => self.perf_dir().join("results.jsonl"),
        }
    }

    /// Resolve `relative` against the checkout root.
    pub fn in_root(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.root.join(relative)
    }
}

/// `root` made absolute against the current directory.
///
/// Programs are launched with their own working directory, so a relative root would resolve differently in each.
pub fn absolute_root(root: &Path) -> Result<PathBuf, HarnessError> {
    std::path::absolute(root).map_err(|e| HarnessError::io(root, e))
}

fn parse_secs(key: &str, value: &str) -> Result<u64, HarnessError> {
    value
        .trim()
        .parse::<u64>()
        .map_err(|_| HarnessError::Config(format!("{key} must be a whole number of seconds, got `{value}`")))
}
