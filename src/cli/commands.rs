//! CLI command definitions using clap
//!
//! Defines all CLI subcommands and their arguments.

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Discover layered command tasks and resolve their build macros.
///
/// Reads `commands.json` and the user-local `commands.user.json` next to it,
/// resolves `$(Name)` macros against a solution manifest, and prints the
/// resulting task tree.
#[derive(Parser, Debug)]
#[command(name = "cmdhub")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Config file path (overrides default XDG paths)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the resolved task tree
    List(ListArgs),

    /// Show the command descriptor of a single task
    Show(ShowArgs),

    /// Resolve macros in a template string
    Resolve(ResolveArgs),

    /// Show effective settings
    Config(ConfigArgs),
}

/// Where to find the commands file and build context
#[derive(Args, Debug, Clone, Default)]
pub struct SourceArgs {
    /// Primary commands file (defaults to the configured name in the current directory)
    #[arg(short = 'f', long = "file")]
    pub file: Option<String>,

    /// Solution manifest (defaults to the configured name next to the commands file)
    #[arg(short, long)]
    pub solution: Option<String>,
}

/// Arguments for the `list` subcommand
#[derive(Parser, Debug)]
pub struct ListArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Output format
    #[arg(long, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

/// Arguments for the `show` subcommand
#[derive(Parser, Debug)]
pub struct ShowArgs {
    /// Resolved task name
    #[arg(required = true)]
    pub task: String,

    #[command(flatten)]
    pub source: SourceArgs,

    /// Output format
    #[arg(long, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

/// Arguments for the `resolve` subcommand
#[derive(Parser, Debug)]
pub struct ResolveArgs {
    /// Template containing `$(Name)` macros
    #[arg(required = true)]
    pub template: String,

    /// Task directory used to select the project (defaults to current directory)
    #[arg(short, long)]
    pub dir: Option<String>,

    /// Solution manifest
    #[arg(short, long)]
    pub solution: Option<String>,

    /// Also print every variable that was available
    #[arg(long)]
    pub vars: bool,
}

/// Arguments for the `config` subcommand
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Output format
    #[arg(long, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table format
    Table,
    /// JSON output
    Json,
    /// Plain text (one task per line)
    Plain,
}
