//! Suite registry.
//!
//! Maps each suite's name to a constructor. Suites are only ever built through [`SuiteRegistry::make`], once per
//! run, so no state leaks between polling cycles.

use super::suite::Suite;
use super::suites;
use crate::config::HarnessConfig;
use crate::errors::HarnessError;

pub type SuiteConstructor = Box<dyn Fn(&HarnessConfig) -> Suite>;

#[derive(Default)]
pub struct SuiteRegistry {
    entries: Vec<(String, SuiteConstructor)>,
}

impl SuiteRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every built-in suite, in default run order.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        suites::register_builtin(&mut registry);
        registry
    }

    /// Register `constructor` under `name`, replacing an earlier registration of the same name in place.
    pub fn register(&mut self, name: impl Into<String>, constructor: impl Fn(&HarnessConfig) -> Suite + 'static) {
        let name = name.into();
        let constructor: SuiteConstructor = Box::new(constructor);
        match self.entries.iter_mut().find(|(existing, _)| *existing == name) {
            Some(entry) => entry.1 = constructor,
            None => self.entries.push((name, constructor)),
        }
    }

    /// Registered names in registration order.
    pub fn available_names(&self) -> Vec<&str> {
        self.entries.iter().map(|(name, _)| name.as_str()).collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(existing, _)| existing == name)
    }

    /// Construct a fresh suite.
    pub fn make(&self, name: &str, config: &HarnessConfig) -> Result<Suite, HarnessError> {
        match self.entries.iter().find(|(existing, _)| existing == name) {
            Some((_, constructor)) => Ok(constructor(config)),
            None => Err(self.unknown(name)),
        }
    }

    /// Resolve a comma-separated selection; `None` selects every registered suite.
    ///
    /// Blank items are ignored; the first unknown name fails the whole selection.
    pub fn select(&self, selection: Option<&str>) -> Result<Vec<String>, HarnessError> {
        let Some(selection) = selection else {
            return Ok(self.available_names().into_iter().map(String::from).collect());
        };
        let mut names = Vec::new();
        for name in selection.split(',').map(str::trim).filter(|n| !n.is_empty()) {
            if !self.contains(name) {
                return Err(self.unknown(name));
            }
            names.push(name.to_string());
        }
        if names.is_empty() {
            return Err(self.unknown(selection));
        }
        Ok(names)
    }

    fn unknown(&self, name: &str) -> HarnessError {
        HarnessError::UnknownSuite {
            name: name.to_string(),
            available: self.available_names().join(", "),
        }
    }
}
