//! Task discovery module
//!
//! Provides discovery of command tasks from layered commands files:
//! - Task records and config readers
//! - Hierarchy assembly (primary + user override)
//! - Leaf nodes carrying deferred command descriptors
//! - The async provider entry point

pub mod hierarchy;
pub mod node;
pub mod provider;
pub mod record;

pub use hierarchy::{
    user_config_path, HierarchyBuilder, COMMANDS_CATEGORY, ROOT_NAME, USER_COMMANDS_CATEGORY,
};
pub use node::{make_leaf, CommandDescriptor, TaskNode};
pub use provider::{is_degenerate, TaskRunnerConfig, TaskRunnerProvider};
pub use record::{ConfigReader, JsonConfigReader, TaskRecord};
