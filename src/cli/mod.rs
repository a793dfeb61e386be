//! CLI module for cmdhub
//!
//! Provides command-line interface with the following subcommands:
//! - `list` - Show the resolved task tree
//! - `show` - Show one task's command descriptor
//! - `resolve` - Resolve macros in a template
//! - `config` - Show effective settings

pub mod commands;
pub mod sources;

pub use commands::{Cli, Commands};
pub use sources::{commands_path, find_manifest, load_solution, Solution};
