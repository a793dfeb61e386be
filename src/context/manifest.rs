//! Solution manifest
//!
//! A TOML description of the solution standing in for a live IDE model:
//!
//! ```toml
//! path = "/src/MySolution.sln"
//! configuration = "Debug"
//! platform = "Any CPU"
//!
//! [[projects]]
//! name = "App"
//! path = "/src/App/App.csproj"
//! output_path = "bin/Debug/"
//! output_file_name = "App.dll"
//!
//! [[projects]]
//! kind = "folder"
//! name = "libs"
//!   [[projects.children]]
//!   name = "Core"
//!   path = "/src/libs/Core/Core.csproj"
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::model::{BuildContext, ProjectId, ProjectMetadata, ProjectTree};
use crate::error::TaskError;
use crate::variables::PropertyMacros;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    #[default]
    Project,
    Folder,
}

/// One `[[projects]]` entry, either a project or a solution folder
#[derive(Debug, Clone, Deserialize)]
pub struct ManifestEntry {
    pub name: String,
    #[serde(default)]
    pub kind: EntryKind,
    pub path: Option<PathBuf>,
    /// Present only for projects with an active build configuration
    pub output_path: Option<String>,
    #[serde(default)]
    pub output_file_name: String,
    /// Build properties exposed as `$(Key)` macros for this project
    #[serde(default)]
    pub properties: toml::Table,
    #[serde(default)]
    pub children: Vec<ManifestEntry>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct Manifest {
    pub path: Option<PathBuf>,
    pub configuration: Option<String>,
    pub platform: Option<String>,
    pub devenv_dir: Option<PathBuf>,
    #[serde(default)]
    pub projects: Vec<ManifestEntry>,
}

impl Manifest {
    /// Read and parse a manifest file
    pub fn load(path: &Path) -> Result<Self, TaskError> {
        let content = std::fs::read_to_string(path).map_err(|e| TaskError::Manifest {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::parse(&content, path)
    }

    pub fn parse(content: &str, origin: &Path) -> Result<Self, TaskError> {
        toml::from_str(content).map_err(|e| TaskError::Manifest {
            path: origin.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Convert the nested entries into a build context snapshot
    pub fn build_context(&self) -> Result<BuildContext, TaskError> {
        let mut projects = ProjectTree::new();
        let mut pending: Vec<(Option<ProjectId>, &ManifestEntry)> =
            self.projects.iter().rev().map(|entry| (None, entry)).collect();

        while let Some((parent, entry)) = pending.pop() {
            match entry.kind {
                EntryKind::Folder => {
                    let id = projects.add_folder(parent, entry.name.clone())?;
                    pending.extend(entry.children.iter().rev().map(|child| (Some(id), child)));
                }
                EntryKind::Project => {
                    projects.add_project(parent, self.project_metadata(entry)?)?;
                }
            }
        }

        Ok(BuildContext {
            solution_path: self.path.clone(),
            configuration_name: self.configuration.clone(),
            platform_name: self.platform.clone(),
            devenv_dir: self.devenv_dir.clone(),
            projects,
        })
    }

    fn project_metadata(&self, entry: &ManifestEntry) -> Result<ProjectMetadata, TaskError> {
        let file_path = entry.path.clone().ok_or_else(|| TaskError::Manifest {
            path: self.display_path(),
            message: format!("project '{}' has no path", entry.name),
        })?;

        let project = ProjectMetadata::new(file_path, entry.name.clone());
        Ok(match &entry.output_path {
            Some(output_path) => {
                project.with_configuration(output_path.clone(), entry.output_file_name.clone())
            }
            None => project,
        })
    }

    /// Per-project build properties, keyed by project file path
    pub fn property_macros(&self) -> PropertyMacros {
        let mut macros = PropertyMacros::default();
        let mut pending: Vec<&ManifestEntry> = self.projects.iter().collect();

        while let Some(entry) = pending.pop() {
            pending.extend(entry.children.iter());
            let Some(path) = &entry.path else { continue };
            for (key, value) in &entry.properties {
                let value = match value {
                    toml::Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                macros.insert(path.clone(), key.clone(), value);
            }
        }

        macros
    }

    fn display_path(&self) -> String {
        self.path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "<manifest>".to_string())
    }
}
