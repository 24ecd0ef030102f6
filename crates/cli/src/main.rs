//! `agent-deps` command-line entry point.
//!
//! Loads a project from `<root>/.agent-deps/`, runs one resolver operation
//! and prints the result either for humans (coloured) or as JSON.

use ar_core::config::loader::{load_manifest_file, load_project};
use ar_core::graph::GraphFormat;
use ar_core::{ResolveError, Resolver};
use ar_protocol::manifest_models::AgentManifest;
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod render;

/// Agent dependency and contract compatibility resolver
#[derive(Debug, Parser)]
#[command(name = "agent-deps", version, about = "Check agent manifests for dependency and contract problems")]
struct Cli {
    /// Project root containing the `.agent-deps/` directory
    #[arg(long, global = true, default_value = ".")]
    root: PathBuf,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run every dependency and contract check
    Validate {
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Only check for version range conflicts
    Conflicts {
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Export the dependency graph
    Graph {
        /// Output format (dot, json)
        #[arg(long, default_value = "dot")]
        format: GraphFormat,
    },

    /// Print the deployment batches in order
    Order {
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Compare two versions of one agent's manifest
    Diff {
        /// Manifest of the currently deployed version
        old: PathBuf,

        /// Manifest of the candidate version
        new: PathBuf,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn exit_code(success: bool) -> ExitCode {
    if success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

async fn load(root: &Path) -> color_eyre::Result<(Resolver, Vec<AgentManifest>)> {
    let project = load_project(root).await?;
    tracing::debug!(
        root = %root.display(),
        manifests = project.manifests.len(),
        "project loaded"
    );
    Ok((Resolver::new(project.config), project.manifests))
}

fn diff(old: &Path, new: &Path, json: bool) -> color_eyre::Result<ExitCode> {
    let old = load_manifest_file(old)?;
    let new = load_manifest_file(new)?;
    let result = Resolver::default().detect_breaking_changes(&old, &new)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        render::breaking_changes(&result);
    }
    Ok(exit_code(!result.has_breaking_changes))
}

#[tokio::main]
async fn main() -> color_eyre::Result<ExitCode> {
    color_eyre::install()?;
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let code = match cli.command {
        Command::Validate { json } => {
            let (resolver, manifests) = load(&cli.root).await?;
            let result = resolver.validate_dependencies(&manifests);
            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                render::validation(&result, manifests.len());
            }
            exit_code(result.valid)
        }
        Command::Conflicts { json } => {
            let (resolver, manifests) = load(&cli.root).await?;
            let conflicts = resolver.check_conflicts_only(&manifests);
            if json {
                println!("{}", serde_json::to_string_pretty(&conflicts)?);
            } else {
                render::conflicts(&conflicts);
            }
            exit_code(conflicts.is_empty())
        }
        Command::Graph { format } => {
            let (resolver, manifests) = load(&cli.root).await?;
            let rendered = resolver.generate_dependency_graph(&manifests, format)?;
            println!("{}", rendered.trim_end());
            ExitCode::SUCCESS
        }
        Command::Order { json } => {
            let (resolver, manifests) = load(&cli.root).await?;
            match resolver.calculate_deployment_order(&manifests) {
                Ok(batches) => {
                    if json {
                        println!("{}", serde_json::to_string_pretty(&batches)?);
                    } else {
                        render::batches(&batches);
                    }
                    ExitCode::SUCCESS
                }
                Err(error @ ResolveError::CycleDetected { .. }) => {
                    eprintln!("{} {error}", "error:".red().bold());
                    ExitCode::FAILURE
                }
                Err(error) => return Err(error.into()),
            }
        }
        Command::Diff { old, new, json } => diff(&old, &new, json)?,
    };

    Ok(code)
}
