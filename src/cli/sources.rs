//! Resolution of CLI path arguments into discovery inputs

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::config::Config;
use crate::context::{BuildContext, BuildContextProvider, ManifestContextProvider};
use crate::variables::PropertyMacros;

/// Build context and property macros loaded for one invocation
#[derive(Debug, Clone, Default)]
pub struct Solution {
    pub context: BuildContext,
    pub properties: PropertyMacros,
    /// Manifest the context came from, if any
    pub manifest_path: Option<PathBuf>,
}

/// Expand `~` and anchor relative paths at the current directory
pub fn absolute_path(path: &str) -> Result<PathBuf> {
    let path = PathBuf::from(shellexpand::tilde(path).as_ref());
    if path.is_absolute() {
        return Ok(path);
    }
    let cwd = std::env::current_dir().context("Failed to get current directory")?;
    Ok(cwd.join(path))
}

/// Primary commands file: the explicit path, or the configured name in the current directory
pub fn commands_path(file: Option<&str>, config: &Config) -> Result<PathBuf> {
    absolute_path(file.unwrap_or(&config.files.primary))
}

/// Locate the solution manifest
///
/// An explicit path is returned as given. Otherwise the configured manifest
/// name is looked up in `search_dir` and then in each parent directory.
pub fn find_manifest(
    explicit: Option<&str>,
    search_dir: &Path,
    config: &Config,
) -> Result<Option<PathBuf>> {
    if let Some(path) = explicit {
        return absolute_path(path).map(Some);
    }

    let found = search_dir
        .ancestors()
        .map(|dir| dir.join(&config.files.manifest))
        .find(|candidate| candidate.is_file());

    match &found {
        Some(path) => tracing::debug!("Found solution manifest: {}", path.display()),
        None => tracing::debug!(
            "No {} in {} or its parents",
            config.files.manifest,
            search_dir.display()
        ),
    }

    Ok(found)
}

/// Load the solution manifest
///
/// An explicit manifest must exist. Without one, the nearest manifest at or
/// above `search_dir` is used, and an empty context when there is none.
pub fn load_solution(explicit: Option<&str>, search_dir: &Path, config: &Config) -> Result<Solution> {
    let Some(manifest_path) = find_manifest(explicit, search_dir, config)? else {
        return Ok(Solution::default());
    };

    let snapshot = ManifestContextProvider::new(&manifest_path)
        .snapshot()
        .with_context(|| format!("Failed to read solution from {}", manifest_path.display()))?;

    Ok(Solution {
        context: snapshot.context,
        properties: snapshot.properties,
        manifest_path: Some(manifest_path),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_commands_path_defaults_to_cwd() {
        let config = Config::default();
        let path = commands_path(None, &config).unwrap();

        assert!(path.is_absolute());
        assert!(path.ends_with("commands.json"));
    }

    #[test]
    fn test_commands_path_keeps_absolute() {
        let config = Config::default();
        let path = commands_path(Some("/repo/tasks.json"), &config).unwrap();

        assert_eq!(path, PathBuf::from("/repo/tasks.json"));
    }

    #[test]
    fn test_load_solution_without_manifest_is_empty() {
        let dir = TempDir::new().unwrap();
        let solution = load_solution(None, dir.path(), &Config::default()).unwrap();

        assert!(solution.manifest_path.is_none());
        assert!(solution.context.solution_path.is_none());
        assert!(solution.properties.is_empty());
    }

    #[test]
    fn test_load_solution_finds_manifest_next_to_commands() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("solution.toml"),
            "path = \"/x/MySolution.sln\"\n",
        )
        .unwrap();

        let solution = load_solution(None, dir.path(), &Config::default()).unwrap();
        assert_eq!(
            solution.context.solution_path,
            Some(PathBuf::from("/x/MySolution.sln"))
        );
        assert_eq!(solution.manifest_path, Some(dir.path().join("solution.toml")));
    }

    #[test]
    fn test_find_manifest_walks_up_to_solution_root() {
        let dir = TempDir::new().unwrap();
        let app_dir = dir.path().join("src").join("App");
        std::fs::create_dir_all(&app_dir).unwrap();
        std::fs::write(dir.path().join("solution.toml"), "path = \"/x/Up.sln\"\n").unwrap();

        let found = find_manifest(None, &app_dir, &Config::default()).unwrap();
        assert_eq!(found, Some(dir.path().join("solution.toml")));

        let solution = load_solution(None, &app_dir, &Config::default()).unwrap();
        assert_eq!(solution.context.solution_path, Some(PathBuf::from("/x/Up.sln")));
    }

    #[test]
    fn test_find_manifest_prefers_nearest() {
        let dir = TempDir::new().unwrap();
        let app_dir = dir.path().join("App");
        std::fs::create_dir_all(&app_dir).unwrap();
        std::fs::write(dir.path().join("solution.toml"), "").unwrap();
        std::fs::write(app_dir.join("solution.toml"), "").unwrap();

        let found = find_manifest(None, &app_dir, &Config::default()).unwrap();
        assert_eq!(found, Some(app_dir.join("solution.toml")));
    }

    #[test]
    fn test_explicit_manifest_is_not_probed() {
        let dir = TempDir::new().unwrap();
        let found = find_manifest(Some("/nonexistent/solution.toml"), dir.path(), &Config::default())
            .unwrap();

        assert_eq!(found, Some(PathBuf::from("/nonexistent/solution.toml")));
    }

    #[test]
    fn test_explicit_missing_manifest_is_an_error() {
        let dir = TempDir::new().unwrap();
        let result = load_solution(Some("/nonexistent/solution.toml"), dir.path(), &Config::default());

        assert!(result.is_err());
    }
}
