//! Build context providers

use std::path::{Path, PathBuf};

use super::manifest::Manifest;
use super::model::BuildContext;
use crate::error::TaskError;
use crate::variables::PropertyMacros;

/// Build context plus the build properties read alongside it
#[derive(Debug, Clone, Default)]
pub struct SolutionSnapshot {
    pub context: BuildContext,
    pub properties: PropertyMacros,
}

/// Source of solution and project metadata
///
/// Called once per discovery pass; the returned snapshot is treated as
/// read-only for the rest of that pass.
pub trait BuildContextProvider: Send + Sync {
    fn build_context(&self) -> Result<BuildContext, TaskError>;

    /// Context and properties from a single read; no properties by default
    fn snapshot(&self) -> Result<SolutionSnapshot, TaskError> {
        Ok(SolutionSnapshot {
            context: self.build_context()?,
            properties: PropertyMacros::default(),
        })
    }
}

/// Provider that always hands out the same snapshot
#[derive(Debug, Clone, Default)]
pub struct StaticContextProvider {
    context: BuildContext,
}

impl StaticContextProvider {
    pub fn new(context: BuildContext) -> Self {
        Self { context }
    }
}

impl BuildContextProvider for StaticContextProvider {
    fn build_context(&self) -> Result<BuildContext, TaskError> {
        Ok(self.context.clone())
    }
}

/// Provider that re-reads a solution manifest on every pass
#[derive(Debug, Clone)]
pub struct ManifestContextProvider {
    path: PathBuf,
}

impl ManifestContextProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Manifest, TaskError> {
        tracing::debug!("Loading solution manifest from: {}", self.path.display());
        Manifest::load(&self.path)
    }
}

impl BuildContextProvider for ManifestContextProvider {
    fn build_context(&self) -> Result<BuildContext, TaskError> {
        self.load()?.build_context()
    }

    fn snapshot(&self) -> Result<SolutionSnapshot, TaskError> {
        let manifest = self.load()?;
        Ok(SolutionSnapshot {
            context: manifest.build_context()?,
            properties: manifest.property_macros(),
        })
    }
}
