//! Project selection for a task directory
//!
//! A task's commands file lives in some directory; the project whose file
//! path matches that directory supplies the project-level macros. Matching is
//! a swappable [`ProjectMatcher`] strategy.

use std::path::Path;

use super::model::ProjectMetadata;

/// Decides whether a project belongs to a task directory
pub trait ProjectMatcher: Send + Sync + std::fmt::Debug {
    fn matches(&self, project: &ProjectMetadata, task_dir: &Path) -> bool;
}

/// Project file path contains the directory as a plain substring.
///
/// `/src/App` also matches `/src/AppTests/AppTests.csproj`, so with several
/// candidates the first in solution order wins.
#[derive(Debug, Clone, Copy, Default)]
pub struct SubstringMatcher;

impl ProjectMatcher for SubstringMatcher {
    fn matches(&self, project: &ProjectMetadata, task_dir: &Path) -> bool {
        project
            .file_path
            .to_string_lossy()
            .contains(task_dir.to_string_lossy().as_ref())
    }
}

/// Project file lives at or below the directory, compared by path components
#[derive(Debug, Clone, Copy, Default)]
pub struct PathPrefixMatcher;

impl ProjectMatcher for PathPrefixMatcher {
    fn matches(&self, project: &ProjectMetadata, task_dir: &Path) -> bool {
        project.file_path.starts_with(task_dir)
    }
}

/// Picks the project that applies to a task directory
#[derive(Debug)]
pub struct ProjectSelector {
    matcher: Box<dyn ProjectMatcher>,
}

impl Default for ProjectSelector {
    fn default() -> Self {
        Self::new(Box::new(SubstringMatcher))
    }
}

impl ProjectSelector {
    pub fn new(matcher: Box<dyn ProjectMatcher>) -> Self {
        Self { matcher }
    }

    /// First project, in traversal order, accepted by the matcher
    pub fn select<'a>(
        &self,
        projects: &[&'a ProjectMetadata],
        task_dir: &Path,
    ) -> Option<&'a ProjectMetadata> {
        let selected = projects
            .iter()
            .copied()
            .find(|project| self.matcher.matches(project, task_dir));

        match selected {
            Some(project) => tracing::debug!(
                "Selected project '{}' for {}",
                project.name,
                task_dir.display()
            ),
            None => tracing::debug!("No project matches {}", task_dir.display()),
        }

        selected
    }
}
