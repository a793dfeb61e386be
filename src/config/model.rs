//! Configuration model for cmdhub
//!
//! Defines the structure for XDG-compliant layered configuration.

use serde::{Deserialize, Serialize};

use crate::context::{PathPrefixMatcher, ProjectMatcher, SubstringMatcher};

/// Root configuration structure
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Reserved file names for task sources and the solution manifest
    #[serde(default)]
    pub files: FilesConfig,

    /// How a task directory is matched against project paths
    #[serde(default)]
    pub matching: MatchingConfig,
}

/// Reserved file names
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FilesConfig {
    /// Shared, project-level commands file
    #[serde(default = "default_primary")]
    pub primary: String,

    /// User-local override, lives next to the primary file
    #[serde(default = "default_user")]
    pub user: String,

    /// Solution manifest looked up next to the commands file
    #[serde(default = "default_manifest")]
    pub manifest: String,
}

fn default_primary() -> String {
    "commands.json".to_string()
}

fn default_user() -> String {
    "commands.user.json".to_string()
}

fn default_manifest() -> String {
    "solution.toml".to_string()
}

impl Default for FilesConfig {
    fn default() -> Self {
        Self {
            primary: default_primary(),
            user: default_user(),
            manifest: default_manifest(),
        }
    }
}

/// Project matching configuration
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct MatchingConfig {
    #[serde(default)]
    pub strategy: MatchStrategy,
}

/// Strategy used to pick the project a task directory belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MatchStrategy {
    /// The project file path contains the directory as a substring
    #[default]
    Substring,
    /// The project file path starts with the directory, component-wise
    Prefix,
}

impl MatchStrategy {
    /// Build the matcher for this strategy
    pub fn matcher(self) -> Box<dyn ProjectMatcher> {
        match self {
            MatchStrategy::Substring => Box::new(SubstringMatcher),
            MatchStrategy::Prefix => Box::new(PathPrefixMatcher),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.files.primary, "commands.json");
        assert_eq!(config.files.user, "commands.user.json");
        assert_eq!(config.files.manifest, "solution.toml");
        assert_eq!(config.matching.strategy, MatchStrategy::Substring);
    }

    #[test]
    fn test_deserialize_minimal_config() {
        let toml = r#"
            [matching]
            strategy = "prefix"
        "#;

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.matching.strategy, MatchStrategy::Prefix);
        // Defaults should still apply
        assert_eq!(config.files.primary, "commands.json");
    }

    #[test]
    fn test_deserialize_custom_file_names() {
        let toml = r#"
            [files]
            primary = "tasks.json"
            user = "tasks.local.json"
        "#;

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.files.primary, "tasks.json");
        assert_eq!(config.files.user, "tasks.local.json");
        assert_eq!(config.files.manifest, "solution.toml");
    }

    #[test]
    fn test_unknown_strategy_rejected() {
        let toml = r#"
            [matching]
            strategy = "fuzzy"
        "#;

        assert!(toml::from_str::<Config>(toml).is_err());
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();

        assert!(toml_str.contains("strategy = \"substring\""));
        let _: Config = toml::from_str(&toml_str).unwrap();
    }
}
