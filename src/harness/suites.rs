//! The built-in suites.
//!
//! | Suite | Platforms | Variants | Tester | Processor |
//! |---|---|---|---|---|
//! | `time-size` | `commandline` | `frog` | [`CompileTester`] | [`KeyValueProcessor`] |
//! | `browser-perf` | host browsers | `js`, `frog` | [`BrowserPageTester`] | [`BrowserResultsProcessor`] |
//! | `dromaeo` | host browsers | Dromaeo variants | [`DromaeoTester`] | [`DromaeoProcessor`] |
//! | `dromaeo-size` | `browser` | `dart` + compiled variants | [`SizeTester`] | [`SizeProcessor`] |

use perfwatch_core::benchmarks::{
    DART_SOURCE_VARIANT, DROMAEO_SIZE_VARIANTS, DROMAEO_SUITES, DROMAEO_VARIANTS, SIZE_SUM_METRIC,
    STANDALONE_BENCHMARKS, dromaeo_metrics,
};
use perfwatch_core::browsers::{self, DARTIUM};
use perfwatch_core::suites::{self as vocab, SuiteId};

use super::processors::size::SIZE_PLATFORM;
use super::processors::{BrowserResultsProcessor, DromaeoProcessor, KeyValueProcessor, SizeProcessor};
use super::registry::SuiteRegistry;
use super::suite::{Suite, SuiteInfo, SuiteSpec};
use super::testers::compile::COMPILE_METRICS;
use super::testers::{BrowserPageTester, CompileTester, DromaeoTester, SizeTester};
use crate::config::HarnessConfig;

pub const COMMANDLINE_PLATFORM: &str = "commandline";
pub const FROG_VARIANT: &str = "frog";
pub const JS_VARIANT: &str = "js";

fn spec_for(id: SuiteId) -> SuiteSpec {
    let info = vocab::info(id);
    SuiteSpec::new(info.name).with_trace_prefix(info.trace_prefix)
}

pub fn time_size(config: &HarnessConfig) -> Suite {
    let spec = spec_for(SuiteId::TimeSize)
        .with_platforms([COMMANDLINE_PLATFORM])
        .with_variants([FROG_VARIANT])
        .with_metrics(COMPILE_METRICS.iter().copied());
    Suite::new(
        SuiteInfo::new(spec, config),
        Box::new(CompileTester),
        Box::new(KeyValueProcessor),
    )
}

pub fn browser_perf(config: &HarnessConfig) -> Suite {
    let spec = spec_for(SuiteId::BrowserPerf)
        .with_platforms(browsers::names_for(config.host))
        .with_variants([JS_VARIANT, FROG_VARIANT])
        .with_metrics(STANDALONE_BENCHMARKS.iter().copied());
    Suite::new(
        SuiteInfo::new(spec, config),
        Box::new(BrowserPageTester),
        Box::new(BrowserResultsProcessor),
    )
}

/// Dartium's 32-bit build crashes running the plain-JavaScript Dromaeo pages.
fn dromaeo_cell(browser: &str, variant: &str) -> bool {
    !(browser == DARTIUM && variant == JS_VARIANT)
}

pub fn dromaeo(config: &HarnessConfig) -> Suite {
    let spec = spec_for(SuiteId::Dromaeo)
        .with_platforms(browsers::names_for(config.host))
        .with_variants(DROMAEO_VARIANTS.iter().copied())
        .with_metrics(dromaeo_metrics(config.host))
        .with_cell_filter(dromaeo_cell);
    Suite::new(
        SuiteInfo::new(spec, config),
        Box::new(DromaeoTester),
        Box::new(DromaeoProcessor),
    )
}

pub fn dromaeo_size(config: &HarnessConfig) -> Suite {
    let variants = std::iter::once(DART_SOURCE_VARIANT).chain(DROMAEO_SIZE_VARIANTS.iter().map(|(name, _)| *name));
    let metrics = DROMAEO_SUITES
        .iter()
        .map(|suite| suite.key)
        .chain(std::iter::once(SIZE_SUM_METRIC));
    let spec = spec_for(SuiteId::DromaeoSize)
        .with_platforms([SIZE_PLATFORM])
        .with_variants(variants)
        .with_metrics(metrics);
    Suite::new(SuiteInfo::new(spec, config), Box::new(SizeTester), Box::new(SizeProcessor))
}

/// Register every built-in suite in default run order.
pub fn register_builtin(registry: &mut SuiteRegistry) {
    for info in vocab::SUITES {
        let constructor: fn(&HarnessConfig) -> Suite = match info.id {
            SuiteId::TimeSize => time_size,
            SuiteId::BrowserPerf => browser_perf,
            SuiteId::Dromaeo => dromaeo,
            SuiteId::DromaeoSize => dromaeo_size,
        };
        registry.register(info.name, constructor);
    }
}
