//! Task runner provider
//!
//! Entry point for discovery. Wires the config reader, build context provider
//! and external macros together and runs one discovery pass off the async
//! runtime's worker threads.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::hierarchy::HierarchyBuilder;
use super::node::TaskNode;
use super::record::{ConfigReader, JsonConfigReader};
use crate::config::Config;
use crate::context::{BuildContextProvider, ProjectSelector, StaticContextProvider};
use crate::error::TaskError;
use crate::variables::{ChainedMacros, ExternalMacros, NoExternalMacros, VariableResolver};

/// A populated task tree ready for presentation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRunnerConfig {
    root: TaskNode,
}

impl TaskRunnerConfig {
    pub fn root(&self) -> &TaskNode {
        &self.root
    }

    pub fn into_root(self) -> TaskNode {
        self.root
    }
}

/// True when the tree has no categories, or its first category has no tasks
pub fn is_degenerate(root: &TaskNode) -> bool {
    root.children()
        .first()
        .map_or(true, |first| first.children().is_empty())
}

/// Discovers command tasks for a commands file
#[derive(Clone)]
pub struct TaskRunnerProvider {
    config: Config,
    reader: Arc<dyn ConfigReader>,
    context: Arc<dyn BuildContextProvider>,
    external: Arc<dyn ExternalMacros>,
}

impl Default for TaskRunnerProvider {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl TaskRunnerProvider {
    /// Provider with the JSON reader, an empty build context and no external macros
    pub fn new(config: Config) -> Self {
        Self {
            config,
            reader: Arc::new(JsonConfigReader),
            context: Arc::new(StaticContextProvider::default()),
            external: Arc::new(NoExternalMacros),
        }
    }

    pub fn with_reader(mut self, reader: Arc<dyn ConfigReader>) -> Self {
        self.reader = reader;
        self
    }

    pub fn with_context_provider(mut self, context: Arc<dyn BuildContextProvider>) -> Self {
        self.context = context;
        self
    }

    pub fn with_external_macros(mut self, external: Arc<dyn ExternalMacros>) -> Self {
        self.external = external;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Build the full tree without the degenerate-tree check
    ///
    /// Properties from the context snapshot are applied before the injected
    /// external macros.
    pub fn load_hierarchy(&self, primary: &Path) -> Result<TaskNode, TaskError> {
        let snapshot = self.context.snapshot()?;
        let external = ChainedMacros::new(&snapshot.properties, self.external.as_ref());
        let selector = ProjectSelector::new(self.config.matching.strategy.matcher());
        let resolver = VariableResolver::new(&snapshot.context, &external);

        HierarchyBuilder::new(self.reader.as_ref(), resolver, &selector, &self.config.files)
            .build(primary)
    }

    /// Run discovery on the current thread
    ///
    /// # Returns
    /// * `Ok(None)` - no task runner configuration is available
    /// * `Ok(Some(config))` - the populated tree
    pub fn discover(&self, primary: &Path) -> Result<Option<TaskRunnerConfig>, TaskError> {
        let root = self.load_hierarchy(primary)?;

        if is_degenerate(&root) {
            tracing::info!("No task runner configuration available for {}", primary.display());
            return Ok(None);
        }

        Ok(Some(TaskRunnerConfig { root }))
    }

    /// Run discovery as a blocking job so the caller's runtime stays responsive
    pub async fn parse_config(
        &self,
        primary: impl Into<PathBuf>,
    ) -> Result<Option<TaskRunnerConfig>, TaskError> {
        let provider = self.clone();
        let primary = primary.into();

        tokio::task::spawn_blocking(move || provider.discover(&primary))
            .await
            .map_err(|e| TaskError::Discovery(e.to_string()))?
    }
}
