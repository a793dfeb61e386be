//! cmdhub CLI entry point
//!
//! Usage:
//!   cmdhub list                List resolved tasks from ./commands.json
//!   cmdhub show <task>         Show one task's command descriptor
//!   cmdhub resolve <template>  Resolve build macros in a string
//!   cmdhub config              Show effective settings

use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use cmdhub::cli::{
    commands::{ConfigArgs, ListArgs, OutputFormat, ResolveArgs, ShowArgs, SourceArgs},
    sources::absolute_path,
    commands_path, find_manifest, load_solution, Cli, Commands,
};
use cmdhub::config::{find_config_files, load_config, Config};
use cmdhub::context::{
    BuildContextProvider, ManifestContextProvider, ProjectSelector, StaticContextProvider,
};
use cmdhub::error::{suggest_task, ErrorInfo, TaskError};
use cmdhub::tasks::{TaskNode, TaskRunnerConfig, TaskRunnerProvider};
use cmdhub::variables::{unresolved_tokens, VariableResolver};

const NO_CONFIGURATION: &str = "No task runner configuration available";

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.log_json);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}: {:#}", "error".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool, json: bool) {
    let filter = if verbose {
        EnvFilter::new("cmdhub=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::List(args) => list_tasks(args, config).await,
        Commands::Show(args) => show_task(args, config).await,
        Commands::Resolve(args) => resolve_template(args, &config),
        Commands::Config(args) => show_config(args, &config),
    }
}

/// Run one discovery pass for the given sources
///
/// The manifest is only located here; it is read inside the discovery job.
async fn discover(source: &SourceArgs, config: Config) -> Result<Option<TaskRunnerConfig>> {
    let primary = commands_path(source.file.as_deref(), &config)?;
    let search_dir = primary.parent().unwrap_or_else(|| Path::new("."));

    let context: Arc<dyn BuildContextProvider> =
        match find_manifest(source.solution.as_deref(), search_dir, &config)? {
            Some(manifest) => {
                tracing::debug!("Using solution manifest: {}", manifest.display());
                Arc::new(ManifestContextProvider::new(manifest))
            }
            None => Arc::new(StaticContextProvider::default()),
        };

    TaskRunnerProvider::new(config)
        .with_context_provider(context)
        .parse_config(&primary)
        .await
        .with_context(|| format!("Failed to discover tasks from {}", primary.display()))
}

/// List the resolved task tree
async fn list_tasks(args: ListArgs, config: Config) -> Result<()> {
    let Some(tasks) = discover(&args.source, config).await? else {
        match args.format {
            OutputFormat::Json => println!("null"),
            OutputFormat::Plain => {}
            OutputFormat::Table => println!("{}", NO_CONFIGURATION.yellow()),
        }
        return Ok(());
    };
    let root = tasks.root();

    match args.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(root)?);
        }
        OutputFormat::Plain => {
            for leaf in root.leaves() {
                println!("{}", leaf.name());
            }
        }
        OutputFormat::Table => {
            for category in root.children() {
                print_category(category);
            }
        }
    }

    Ok(())
}

fn print_category(category: &TaskNode) {
    println!(
        "{} {}",
        category.name().cyan().bold(),
        category
            .description()
            .map(|d| format!("- {}", d))
            .unwrap_or_default()
    );

    if category.children().is_empty() {
        println!("  No tasks found.");
        println!();
        return;
    }

    let width = name_width(category.children());

    for task in category.children() {
        let command_line = task
            .command()
            .map(|c| c.command_line())
            .unwrap_or_default();
        println!(
            "  {}  {}",
            format!("{:width$}", task.name(), width = width).green(),
            command_line
        );
    }
    println!();
}

/// Widest task name in characters
fn name_width(tasks: &[TaskNode]) -> usize {
    tasks
        .iter()
        .map(|t| t.name().chars().count())
        .max()
        .unwrap_or(10)
}

/// Show a single task's command descriptor
async fn show_task(args: ShowArgs, config: Config) -> Result<()> {
    let tasks = discover(&args.source, config)
        .await?
        .context(NO_CONFIGURATION)?;
    let root = tasks.root();

    let Some(task) = root.find_leaf(&args.task) else {
        let available: Vec<String> = root.leaves().iter().map(|l| l.name().to_string()).collect();
        if let Some(suggestion) = suggest_task(&args.task, &available) {
            eprintln!("{}: {}", "hint".yellow(), suggestion);
        }
        let err = TaskError::TaskNotFound {
            task: args.task.clone(),
            available,
        };
        if args.format == OutputFormat::Json {
            println!("{}", serde_json::to_string_pretty(&ErrorInfo::from(&err))?);
        }
        return Err(err.into());
    };

    let category = root
        .children()
        .iter()
        .find(|c| c.children().iter().any(|t| std::ptr::eq(t, task)))
        .map(|c| c.name())
        .unwrap_or_default();
    let command = task.command().context("Task has no command")?;
    let mut unresolved = unresolved_tokens(task.name());
    unresolved.extend(unresolved_tokens(&command.working_dir.to_string_lossy()));

    match args.format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&serde_json::json!({
                "name": task.name(),
                "category": category,
                "description": task.description(),
                "command": command,
                "unresolved": unresolved,
            }))?;
            println!("{}", json);
        }
        OutputFormat::Plain => {
            println!("{}", command.command_line());
        }
        OutputFormat::Table => {
            println!("{}: {}", "Task".cyan(), task.name());
            println!("{}: {}", "Category".cyan(), category);
            println!("{}: {}", "File".cyan(), command.file_name);
            println!("{}: {}", "Arguments".cyan(), command.arguments);
            println!(
                "{}: {}",
                "Working Directory".cyan(),
                command.effective_working_dir().display()
            );
            println!("{}: {}", "Root Directory".cyan(), command.root_dir.display());
            if !unresolved.is_empty() {
                println!("{}: {}", "Unresolved".yellow(), unresolved.join(", "));
            }
        }
    }

    Ok(())
}

/// Resolve macros in a template against the selected project
fn resolve_template(args: ResolveArgs, config: &Config) -> Result<()> {
    let dir = match args.dir.as_deref() {
        Some(dir) => absolute_path(dir)?,
        None => std::env::current_dir().context("Failed to get current directory")?,
    };
    let solution = load_solution(args.solution.as_deref(), &dir, config)?;

    let projects = solution.context.projects.flatten();
    let selector = ProjectSelector::new(config.matching.strategy.matcher());
    let project = selector.select(&projects, &dir);
    let resolver = VariableResolver::new(&solution.context, &solution.properties);

    println!("{}", resolver.resolve(&args.template, project));

    if args.vars {
        match project {
            Some(p) => eprintln!("{}: {}", "project".cyan(), p.name),
            None => eprintln!("{}: {}", "project".cyan(), "none".yellow()),
        }
        for (token, value) in resolver.variables(project).iter() {
            eprintln!("  {} = {}", token.green(), value);
        }
    }

    Ok(())
}

/// Show effective settings
fn show_config(args: ConfigArgs, config: &Config) -> Result<()> {
    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(config)?),
        OutputFormat::Plain => print!("{}", toml::to_string_pretty(config)?),
        OutputFormat::Table => {
            let files = find_config_files();
            println!("{}:", "Config Files".cyan());
            if files.is_empty() {
                println!("  None (using defaults)");
            }
            for file in &files {
                println!("  - {}", file.display());
            }
            println!();
            println!("{}: {}", "Primary".cyan(), config.files.primary);
            println!("{}: {}", "User".cyan(), config.files.user);
            println!("{}: {}", "Manifest".cyan(), config.files.manifest);
            println!("{}: {:?}", "Matching".cyan(), config.matching.strategy);
        }
    }

    Ok(())
}
