//! cmdhub - Layered command task discovery with build macro resolution
//!
//! Discovers shell-style command tasks from two layered sources:
//! - **`commands.json`** - shared, project-level commands
//! - **`commands.user.json`** - user-local overrides next to it
//!
//! ## Features
//!
//! - Merges both sources into one tree (`Commands`, `User Commands`)
//! - Resolves `$(SolutionDir)`, `$(ProjectName)`, `$(TargetPath)` and other
//!   build macros in task names and working directories
//! - Selects the owning project by walking the solution tree, including
//!   nested solution folders
//! - Produces deferred command descriptors; nothing is executed here
//! - XDG-compliant layered configuration

pub mod cli;
pub mod config;
pub mod context;
pub mod error;
pub mod tasks;
pub mod variables;

pub use cli::{Cli, Commands};
pub use config::Config;
pub use context::{
    BuildContext, BuildContextProvider, ProjectMetadata, ProjectSelector, ProjectTree,
};
pub use error::{ErrorInfo, TaskError};
pub use tasks::{
    CommandDescriptor, ConfigReader, JsonConfigReader, TaskNode, TaskRecord, TaskRunnerConfig,
    TaskRunnerProvider,
};
pub use variables::{ExternalMacros, VariableMap, VariableResolver};
