//! Common test utilities for cmdhub tests

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Creates a temporary solution layout:
///
/// ```text
/// <tmp>/MySolution.sln
/// <tmp>/solution.toml
/// <tmp>/App/App.csproj
/// <tmp>/libs/Core/Core.csproj
/// <tmp>/Site/            (no build configuration)
/// ```
pub fn create_solution() -> (TempDir, PathBuf) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let root = dir.path().to_path_buf();

    for sub in ["App", "libs/Core", "Site"] {
        std::fs::create_dir_all(root.join(sub)).expect("Failed to create project dir");
    }

    let manifest = format!(
        r#"
path = "{root}/MySolution.sln"
configuration = "Debug"
platform = "Any CPU"
devenv_dir = "/opt/ide"

[[projects]]
name = "App"
path = "{root}/App/App.csproj"
output_path = "bin/Debug/"
output_file_name = "App.dll"
[projects.properties]
RootNamespace = "Contoso.App"

[[projects]]
kind = "folder"
name = "libs"

  [[projects.children]]
  name = "Core"
  path = "{root}/libs/Core/Core.csproj"
  output_path = "bin/Release/"
  output_file_name = "Core.dll"

[[projects]]
name = "Site"
path = "{root}/Site/"
"#,
        root = root.display()
    );
    std::fs::write(root.join("solution.toml"), manifest).expect("Failed to write manifest");

    (dir, root)
}

/// Writes a commands document into `dir` under `file`
pub fn write_commands(dir: &Path, file: &str, content: &str) -> PathBuf {
    let path = dir.join(file);
    std::fs::write(&path, content).expect("Failed to write commands file");
    path
}

/// Primary commands for the App project
pub const APP_COMMANDS: &str = r#"{
  "commands": {
    "Run $(ProjectName)": {
      "fileName": "dotnet",
      "arguments": "$(TargetPath)",
      "workingDirectory": "$(TargetDir)"
    },
    "Build $(SolutionName)": {
      "fileName": "dotnet",
      "arguments": "build $(SolutionPath)",
      "workingDirectory": "$(SolutionDir)"
    },
    "Namespace $(RootNamespace)": {
      "fileName": "echo",
      "arguments": "ns"
    }
  }
}"#;

/// User override commands
pub const USER_COMMANDS: &str = r#"{
  "commands": {
    "Watch": { "fileName": "dotnet", "arguments": "watch" }
  }
}"#;
