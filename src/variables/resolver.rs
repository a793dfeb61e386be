//! Build macro resolution
//!
//! Replaces `$(Name)` tokens with values from the build context:
//! - Solution family - `$(SolutionDir)`, `$(ConfigurationName)`, ...
//! - Project family - `$(ProjectDir)`, `$(TargetPath)`, ... (only for a
//!   selected project with an active configuration)
//! - External family - delegated to an [`ExternalMacros`] provider
//!
//! Replacement is literal and sequential. Unknown tokens are left verbatim.

use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;

use super::external::ExternalMacros;
use crate::context::{BuildContext, ProjectMetadata};

/// Matches any `$(Identifier)` token left in a string
static TOKEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$\([A-Za-z_][A-Za-z0-9_.]*\)").expect("Invalid regex"));

/// Ordered token -> value pairs, built for one resolution call
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariableMap {
    entries: Vec<(&'static str, String)>,
}

impl VariableMap {
    pub fn insert(&mut self, token: &'static str, value: impl Into<String>) {
        self.entries.push((token, value.into()));
    }

    pub fn get(&self, token: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(t, _)| *t == token)
            .map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.entries.iter().map(|(t, v)| (*t, v.as_str()))
    }

    /// Replace every known token in `template`
    pub fn apply(&self, template: &str) -> String {
        self.entries
            .iter()
            .fold(template.to_string(), |acc, (token, value)| {
                acc.replace(token, value)
            })
    }

    /// Solution-level macros; each one is added only when its value is known
    pub fn solution(context: &BuildContext) -> Self {
        let mut map = Self::default();

        if let Some(name) = &context.configuration_name {
            map.insert("$(ConfigurationName)", name.clone());
        }
        if let Some(dir) = &context.devenv_dir {
            map.insert("$(DevEnvDir)", dir.display().to_string());
        }
        if let Some(platform) = &context.platform_name {
            map.insert("$(PlatformName)", platform.clone());
        }

        if let Some(solution) = &context.solution_path {
            map.insert("$(SolutionDir)", parent_dir(solution));
            map.insert("$(SolutionExt)", extension(solution));
            map.insert("$(SolutionFileName)", file_name(solution));
            map.insert("$(SolutionName)", file_stem(solution));
            map.insert("$(SolutionPath)", solution.display().to_string());
        }

        map
    }

    /// Project and target macros; empty when the project has no configuration
    pub fn project(project: &ProjectMetadata) -> Self {
        let mut map = Self::default();
        let Some(configuration) = &project.configuration else {
            tracing::debug!(
                "Project '{}' has no active configuration, skipping project macros",
                project.name
            );
            return map;
        };

        let out_dir = configuration.output_directory.as_str();
        let target_file_name = configuration.output_file_name.as_str();
        let project_dir = project.directory();
        let target_dir = project_dir.join(out_dir);
        let target_path = target_dir.join(target_file_name);

        map.insert("$(OutDir)", out_dir);

        map.insert("$(ProjectDir)", project_dir.display().to_string());
        map.insert("$(ProjectExt)", extension(&project.file_path));
        map.insert("$(ProjectFileName)", file_name(&project.file_path));
        map.insert("$(ProjectName)", project.name.clone());
        map.insert("$(ProjectPath)", project.file_path.display().to_string());

        map.insert("$(TargetDir)", target_dir.display().to_string());
        map.insert("$(TargetExt)", extension(Path::new(target_file_name)));
        map.insert("$(TargetFileName)", target_file_name);
        map.insert("$(TargetName)", project.name.clone());
        map.insert("$(TargetPath)", target_path.display().to_string());

        map
    }

    /// Append all entries of another map after this one's
    pub fn extend(&mut self, other: VariableMap) {
        self.entries.extend(other.entries);
    }
}

fn parent_dir(path: &Path) -> String {
    path.parent()
        .map(|p| p.display().to_string())
        .unwrap_or_default()
}

/// Extension including the leading dot, or empty
fn extension(path: &Path) -> String {
    path.extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
        .unwrap_or_default()
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_default()
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().to_string())
        .unwrap_or_default()
}

/// Tokens still present in a string after resolution
pub fn unresolved_tokens(s: &str) -> Vec<String> {
    TOKEN_RE
        .find_iter(s)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Resolves macro tokens against a build context
#[derive(Clone, Copy)]
pub struct VariableResolver<'a> {
    context: &'a BuildContext,
    external: &'a dyn ExternalMacros,
}

impl<'a> VariableResolver<'a> {
    pub fn new(context: &'a BuildContext, external: &'a dyn ExternalMacros) -> Self {
        Self { context, external }
    }

    pub fn context(&self) -> &'a BuildContext {
        self.context
    }

    /// All solution and project variables for one resolution call
    pub fn variables(&self, project: Option<&ProjectMetadata>) -> VariableMap {
        let mut map = VariableMap::solution(self.context);
        if let Some(project) = project {
            map.extend(VariableMap::project(project));
        }
        map
    }

    /// Resolve every known token in `template`
    pub fn resolve(&self, template: &str, project: Option<&ProjectMetadata>) -> String {
        let resolved = self.variables(project).apply(template);

        match project {
            Some(project) => self.external.apply(&project.file_path, &resolved),
            None => resolved,
        }
    }

    /// Absent templates stay absent
    pub fn resolve_opt(
        &self,
        template: Option<&str>,
        project: Option<&ProjectMetadata>,
    ) -> Option<String> {
        template.map(|t| self.resolve(t, project))
    }
}
