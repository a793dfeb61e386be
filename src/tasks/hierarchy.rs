//! Task hierarchy assembly
//!
//! Loads the primary commands file, then the user override next to it, and
//! builds one tree:
//!
//! ```text
//! Command Tasks
//! ├── Commands          (primary file, if present)
//! │   └── leaves sorted by name
//! └── User Commands     (override file, if present)
//!     └── leaves sorted by name
//! ```

use std::cmp::Ordering;
use std::path::{Path, PathBuf};

use super::node::{make_leaf, TaskNode};
use super::record::ConfigReader;
use crate::config::FilesConfig;
use crate::context::{ProjectMetadata, ProjectSelector};
use crate::error::TaskError;
use crate::variables::{unresolved_tokens, VariableResolver};

/// Name of the synthetic root node
pub const ROOT_NAME: &str = "Command Tasks";

pub const COMMANDS_CATEGORY: &str = "Commands";
pub const COMMANDS_DESCRIPTION: &str = "A list of commands to execute";
pub const USER_COMMANDS_CATEGORY: &str = "User Commands";
pub const USER_COMMANDS_DESCRIPTION: &str = "A list of user commands to execute";

/// Override path for a primary commands file
///
/// The reserved primary name inside the file name is swapped for the user
/// name, in the same directory. Returns `None` when the file name does not
/// carry the primary name.
pub fn user_config_path(primary: &Path, files: &FilesConfig) -> Option<PathBuf> {
    let file_name = primary.file_name()?.to_str()?;
    if files.primary.is_empty() || !file_name.contains(&files.primary) || files.primary == files.user
    {
        return None;
    }

    Some(primary.with_file_name(file_name.replace(&files.primary, &files.user)))
}

/// Case-insensitive order, ordinal on ties: `apple`, `build`, `Zip`
fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Builds the task tree from the two config sources
pub struct HierarchyBuilder<'a> {
    reader: &'a dyn ConfigReader,
    resolver: VariableResolver<'a>,
    selector: &'a ProjectSelector,
    files: &'a FilesConfig,
}

impl<'a> HierarchyBuilder<'a> {
    pub fn new(
        reader: &'a dyn ConfigReader,
        resolver: VariableResolver<'a>,
        selector: &'a ProjectSelector,
        files: &'a FilesConfig,
    ) -> Self {
        Self {
            reader,
            resolver,
            selector,
            files,
        }
    }

    /// Build the tree for a primary commands file
    ///
    /// # Errors
    /// * Fatal reader errors, unchanged. Absent sources are skipped.
    pub fn build(&self, primary: &Path) -> Result<TaskNode, TaskError> {
        let mut root = TaskNode::category(ROOT_NAME, None);
        let projects = self.resolver.context().projects.flatten();

        self.append_commands(
            &mut root,
            primary,
            &projects,
            COMMANDS_CATEGORY,
            COMMANDS_DESCRIPTION,
        )?;

        match user_config_path(primary, self.files) {
            Some(user) => self.append_commands(
                &mut root,
                &user,
                &projects,
                USER_COMMANDS_CATEGORY,
                USER_COMMANDS_DESCRIPTION,
            )?,
            None => tracing::debug!(
                "No user override path derivable from {}",
                primary.display()
            ),
        }

        Ok(root)
    }

    fn append_commands(
        &self,
        root: &mut TaskNode,
        path: &Path,
        projects: &[&ProjectMetadata],
        name: &str,
        description: &str,
    ) -> Result<(), TaskError> {
        let Some(mut records) = self.reader.load_tasks(path)? else {
            tracing::debug!("Skipping '{}': no source at {}", name, path.display());
            return Ok(());
        };

        let root_dir = path.parent().unwrap_or_else(|| Path::new(""));
        let project = self.selector.select(projects, root_dir);
        let mut category = TaskNode::category(name, Some(description.to_string()));

        records.sort_by(|a, b| compare_names(&a.name, &b.name));
        for record in &records {
            let resolved_name = self.resolver.resolve(&record.name, project);
            let resolved_dir = self
                .resolver
                .resolve_opt(record.working_directory.as_deref(), project);

            let leftover = unresolved_tokens(&resolved_name)
                .into_iter()
                .chain(resolved_dir.as_deref().map(unresolved_tokens).unwrap_or_default())
                .collect::<Vec<_>>();
            if !leftover.is_empty() {
                tracing::debug!(
                    "Task '{}' keeps unresolved macros: {}",
                    record.name,
                    leftover.join(", ")
                );
            }

            category.push_child(make_leaf(record, resolved_name, resolved_dir, root_dir));
        }

        tracing::debug!(
            "Loaded {} task(s) into '{}' from {}",
            records.len(),
            name,
            path.display()
        );
        root.push_child(category);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{BuildContext, ProjectTree};
    use crate::tasks::record::{MockConfigReader, TaskRecord};
    use crate::variables::NoExternalMacros;

    fn context() -> BuildContext {
        let mut projects = ProjectTree::new();
        let folder = projects.add_folder(None, "src").unwrap();
        projects
            .add_project(
                Some(folder),
                ProjectMetadata::new("/repo/App/App.csproj", "App")
                    .with_configuration("bin/", "App.dll"),
            )
            .unwrap();

        BuildContext {
            solution_path: Some(PathBuf::from("/repo/MySolution.sln")),
            configuration_name: Some("Debug".to_string()),
            platform_name: None,
            devenv_dir: None,
            projects,
        }
    }

    /// Reader serving `<dir>/commands.json` and `<dir>/commands.user.json`
    fn mock_reader(
        dir: &str,
        primary: Option<Vec<TaskRecord>>,
        user: Option<Vec<TaskRecord>>,
    ) -> MockConfigReader {
        let primary_path = PathBuf::from(dir).join("commands.json");
        let user_path = PathBuf::from(dir).join("commands.user.json");
        let mut reader = MockConfigReader::new();

        reader
            .expect_load_tasks()
            .withf(move |p| p == primary_path.as_path())
            .times(1)
            .returning(move |_| Ok(primary.clone()));
        reader
            .expect_load_tasks()
            .withf(move |p| p == user_path.as_path())
            .times(1)
            .returning(move |_| Ok(user.clone()));

        reader
    }

    fn build(reader: &MockConfigReader, primary: &str) -> TaskNode {
        let context = context();
        let selector = ProjectSelector::default();
        let files = FilesConfig::default();
        let resolver = VariableResolver::new(&context, &NoExternalMacros);
        HierarchyBuilder::new(reader, resolver, &selector, &files)
            .build(Path::new(primary))
            .unwrap()
    }

    fn names(node: &TaskNode) -> Vec<&str> {
        node.children().iter().map(|c| c.name()).collect()
    }

    #[test]
    fn test_user_config_path() {
        let files = FilesConfig::default();

        assert_eq!(
            user_config_path(Path::new("/repo/commands.json"), &files),
            Some(PathBuf::from("/repo/commands.user.json"))
        );
        assert_eq!(user_config_path(Path::new("/repo/tasks.json"), &files), None);
        // Only the file name is rewritten, never the directory
        assert_eq!(
            user_config_path(Path::new("/commands.json/commands.json"), &files),
            Some(PathBuf::from("/commands.json/commands.user.json"))
        );
    }

    #[test]
    fn test_primary_only_sorted() {
        let reader = mock_reader(
            "/repo",
            Some(vec![
                TaskRecord::new("Test", "cargo", "test"),
                TaskRecord::new("Build", "cargo", "build"),
                TaskRecord::new("Lint", "cargo", "clippy"),
            ]),
            None,
        );

        let root = build(&reader, "/repo/commands.json");

        assert_eq!(root.name(), ROOT_NAME);
        assert_eq!(names(&root), vec![COMMANDS_CATEGORY]);
        let category = &root.children()[0];
        assert_eq!(category.description(), Some(COMMANDS_DESCRIPTION));
        assert_eq!(names(category), vec!["Build", "Lint", "Test"]);
        assert!(category.children().iter().all(|c| c.is_leaf()));
    }

    #[test]
    fn test_both_sources_in_fixed_order() {
        let reader = mock_reader(
            "/repo",
            Some(vec![TaskRecord::new("Zeta", "z", ""), TaskRecord::new("Alpha", "a", "")]),
            Some(vec![TaskRecord::new("Mine", "m", ""), TaskRecord::new("Alpha", "b", "")]),
        );

        let root = build(&reader, "/repo/commands.json");

        assert_eq!(names(&root), vec![COMMANDS_CATEGORY, USER_COMMANDS_CATEGORY]);
        assert_eq!(names(&root.children()[0]), vec!["Alpha", "Zeta"]);
        assert_eq!(names(&root.children()[1]), vec!["Alpha", "Mine"]);
        assert_eq!(
            root.children()[1].description(),
            Some(USER_COMMANDS_DESCRIPTION)
        );
    }

    #[test]
    fn test_user_source_alone() {
        let reader = mock_reader("/repo", None, Some(vec![TaskRecord::new("Mine", "m", "")]));

        let root = build(&reader, "/repo/commands.json");
        assert_eq!(names(&root), vec![USER_COMMANDS_CATEGORY]);
    }

    #[test]
    fn test_sort_is_stable_on_ties() {
        let reader = mock_reader(
            "/repo",
            Some(vec![
                TaskRecord::new("Same", "first", ""),
                TaskRecord::new("Other", "x", ""),
                TaskRecord::new("Same", "second", ""),
            ]),
            None,
        );

        let root = build(&reader, "/repo/commands.json");
        let files: Vec<&str> = root.children()[0]
            .children()
            .iter()
            .map(|c| c.command().unwrap().file_name.as_str())
            .collect();

        assert_eq!(files, vec!["x", "first", "second"]);
    }

    #[test]
    fn test_sort_ignores_case() {
        let reader = mock_reader(
            "/repo",
            Some(vec![
                TaskRecord::new("build", "b", ""),
                TaskRecord::new("Zip", "z", ""),
                TaskRecord::new("apple", "a", ""),
                TaskRecord::new("Build", "B", ""),
            ]),
            None,
        );

        let root = build(&reader, "/repo/commands.json");

        assert_eq!(names(&root.children()[0]), vec!["apple", "Build", "build", "Zip"]);
    }

    #[test]
    fn test_existing_empty_source_still_creates_category() {
        let reader = mock_reader("/repo", Some(vec![]), None);

        let root = build(&reader, "/repo/commands.json");

        assert_eq!(names(&root), vec![COMMANDS_CATEGORY]);
        assert!(root.children()[0].children().is_empty());
    }

    #[test]
    fn test_both_absent_gives_empty_root() {
        let reader = mock_reader("/repo", None, None);

        let root = build(&reader, "/repo/commands.json");
        assert!(root.children().is_empty());
    }

    #[test]
    fn test_no_override_path_reads_primary_only() {
        let mut reader = MockConfigReader::new();
        reader
            .expect_load_tasks()
            .times(1)
            .returning(|_| Ok(Some(vec![TaskRecord::new("Build", "make", "")])));

        let root = build(&reader, "/repo/tasks.json");
        assert_eq!(names(&root), vec![COMMANDS_CATEGORY]);
    }

    #[test]
    fn test_fatal_reader_error_propagates() {
        let mut reader = MockConfigReader::new();
        reader.expect_load_tasks().returning(|path| {
            Err(TaskError::ConfigRead {
                path: path.display().to_string(),
                error: "permission denied".to_string(),
            })
        });

        let context = context();
        let selector = ProjectSelector::default();
        let files = FilesConfig::default();
        let resolver = VariableResolver::new(&context, &NoExternalMacros);
        let result = HierarchyBuilder::new(&reader, resolver, &selector, &files)
            .build(Path::new("/repo/commands.json"));

        assert!(matches!(result, Err(TaskError::ConfigRead { .. })));
    }

    #[test]
    fn test_macros_resolved_in_name_and_working_dir() {
        let reader = mock_reader(
            "/repo/App",
            Some(vec![TaskRecord::new(
                "Run $(ProjectName) ($(ConfigurationName))",
                "dotnet",
                "$(TargetPath)",
            )
            .with_working_directory("$(TargetDir)")]),
            None,
        );

        let root = build(&reader, "/repo/App/commands.json");
        let leaf = &root.children()[0].children()[0];
        let command = leaf.command().unwrap();

        assert_eq!(leaf.name(), "Run App (Debug)");
        assert_eq!(command.working_dir, PathBuf::from("/repo/App/bin/"));
        assert_eq!(command.root_dir, PathBuf::from("/repo/App"));
        // Arguments are handed over untouched
        assert_eq!(command.arguments, "$(TargetPath)");
    }

    #[test]
    fn test_no_matching_project_resolves_solution_only() {
        let reader = mock_reader(
            "/elsewhere",
            Some(vec![TaskRecord::new("$(SolutionName)/$(ProjectName)", "x", "")]),
            None,
        );

        let root = build(&reader, "/elsewhere/commands.json");
        let leaf = &root.children()[0].children()[0];

        assert_eq!(leaf.name(), "MySolution/$(ProjectName)");
        assert_eq!(
            leaf.command().unwrap().working_dir,
            PathBuf::from("/elsewhere")
        );
    }
}
