//! Build context snapshot
//!
//! Read-only solution and project metadata consumed by macro resolution.
//! The project tree is an arena indexed by [`ProjectId`]; solution folders
//! hold child ids and are expanded by [`ProjectTree::flatten`].

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::TaskError;

/// Index of a node in a [`ProjectTree`]
pub type ProjectId = usize;

/// Active configuration of a buildable project
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectConfiguration {
    /// Output path relative to the project directory (e.g. `bin\Debug\`)
    pub output_directory: String,
    /// Primary build output (e.g. `app.exe`)
    pub output_file_name: String,
}

/// Metadata for a single project in the solution
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectMetadata {
    /// Full path to the project file
    pub file_path: PathBuf,
    /// Project display name
    pub name: String,
    /// Active configuration; `None` for project kinds with nothing to build
    #[serde(skip_serializing_if = "Option::is_none")]
    pub configuration: Option<ProjectConfiguration>,
}

impl ProjectMetadata {
    /// Create a project without build configuration
    pub fn new(file_path: impl Into<PathBuf>, name: impl Into<String>) -> Self {
        Self {
            file_path: file_path.into(),
            name: name.into(),
            configuration: None,
        }
    }

    /// Attach an active build configuration
    pub fn with_configuration(
        mut self,
        output_directory: impl Into<String>,
        output_file_name: impl Into<String>,
    ) -> Self {
        self.configuration = Some(ProjectConfiguration {
            output_directory: output_directory.into(),
            output_file_name: output_file_name.into(),
        });
        self
    }

    /// Directory containing the project file
    pub fn directory(&self) -> &Path {
        self.file_path.parent().unwrap_or_else(|| Path::new(""))
    }
}

/// A node in the project tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectNode {
    Project(ProjectMetadata),
    /// Solution folder grouping nested projects and folders
    Folder { name: String, children: Vec<ProjectId> },
}

/// Arena of projects and solution folders
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectTree {
    nodes: Vec<ProjectNode>,
    roots: Vec<ProjectId>,
}

impl ProjectTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a project at the top level or inside a folder
    pub fn add_project(
        &mut self,
        parent: Option<ProjectId>,
        project: ProjectMetadata,
    ) -> Result<ProjectId, TaskError> {
        self.push(parent, ProjectNode::Project(project))
    }

    /// Add a solution folder at the top level or inside another folder
    pub fn add_folder(
        &mut self,
        parent: Option<ProjectId>,
        name: impl Into<String>,
    ) -> Result<ProjectId, TaskError> {
        self.push(
            parent,
            ProjectNode::Folder {
                name: name.into(),
                children: vec![],
            },
        )
    }

    fn push(&mut self, parent: Option<ProjectId>, node: ProjectNode) -> Result<ProjectId, TaskError> {
        let id = self.nodes.len();

        match parent {
            None => self.roots.push(id),
            Some(parent_id) => match self.nodes.get_mut(parent_id) {
                Some(ProjectNode::Folder { children, .. }) => children.push(id),
                Some(ProjectNode::Project(project)) => {
                    return Err(TaskError::InvalidProjectTree(format!(
                        "project '{}' cannot contain other projects",
                        project.name
                    )))
                }
                None => {
                    return Err(TaskError::InvalidProjectTree(format!(
                        "unknown parent id {}",
                        parent_id
                    )))
                }
            },
        }

        self.nodes.push(node);
        Ok(id)
    }

    pub fn get(&self, id: ProjectId) -> Option<&ProjectNode> {
        self.nodes.get(id)
    }

    /// Top-level node ids in solution order
    pub fn roots(&self) -> &[ProjectId] {
        &self.roots
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All projects in pre-order, with solution folders expanded at any depth
    pub fn flatten(&self) -> Vec<&ProjectMetadata> {
        let mut projects = Vec::new();
        let mut stack: Vec<ProjectId> = self.roots.iter().rev().copied().collect();

        while let Some(id) = stack.pop() {
            match self.nodes.get(id) {
                Some(ProjectNode::Project(project)) => projects.push(project),
                Some(ProjectNode::Folder { children, .. }) => {
                    stack.extend(children.iter().rev().copied());
                }
                None => {}
            }
        }

        projects
    }
}

/// Snapshot of the active build environment
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildContext {
    /// Full path to the solution file, if a solution is open
    pub solution_path: Option<PathBuf>,
    /// Active solution configuration (e.g. `Debug`)
    pub configuration_name: Option<String>,
    /// Active solution platform (e.g. `Any CPU`)
    pub platform_name: Option<String>,
    /// Directory of the IDE / build tooling
    pub devenv_dir: Option<PathBuf>,
    pub projects: ProjectTree,
}

impl BuildContext {
    /// Context for a solution file with no projects
    pub fn for_solution(path: impl Into<PathBuf>) -> Self {
        Self {
            solution_path: Some(path.into()),
            ..Default::default()
        }
    }
}
