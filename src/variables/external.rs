//! Build-tool specific macro providers
//!
//! After the solution and project families are applied, the string is passed
//! through an [`ExternalMacros`] provider keyed by the selected project's file
//! path.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Further substitution for a project, opaque to the resolver
pub trait ExternalMacros: Send + Sync {
    fn apply(&self, project_file: &Path, input: &str) -> String;
}

/// Provider that leaves every string untouched
#[derive(Debug, Clone, Copy, Default)]
pub struct NoExternalMacros;

impl ExternalMacros for NoExternalMacros {
    fn apply(&self, _project_file: &Path, input: &str) -> String {
        input.to_string()
    }
}

/// Two providers applied in order
#[derive(Clone, Copy)]
pub struct ChainedMacros<'a> {
    first: &'a dyn ExternalMacros,
    then: &'a dyn ExternalMacros,
}

impl<'a> ChainedMacros<'a> {
    pub fn new(first: &'a dyn ExternalMacros, then: &'a dyn ExternalMacros) -> Self {
        Self { first, then }
    }
}

impl ExternalMacros for ChainedMacros<'_> {
    fn apply(&self, project_file: &Path, input: &str) -> String {
        let once = self.first.apply(project_file, input);
        self.then.apply(project_file, &once)
    }
}

/// Build properties per project, replaced as `$(Key)` tokens
#[derive(Debug, Clone, Default)]
pub struct PropertyMacros {
    properties: HashMap<PathBuf, Vec<(String, String)>>,
}

impl PropertyMacros {
    pub fn insert(
        &mut self,
        project_file: impl Into<PathBuf>,
        key: impl Into<String>,
        value: impl Into<String>,
    ) {
        self.properties
            .entry(project_file.into())
            .or_default()
            .push((key.into(), value.into()));
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

impl ExternalMacros for PropertyMacros {
    fn apply(&self, project_file: &Path, input: &str) -> String {
        let Some(properties) = self.properties.get(project_file) else {
            return input.to_string();
        };

        properties
            .iter()
            .fold(input.to_string(), |acc, (key, value)| {
                acc.replace(&format!("$({})", key), value)
            })
    }
}
