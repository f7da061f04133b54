// SPDX-FileCopyrightText: 2026 Dispatch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! dispatch - keyword-routed task assignment over a static agent roster.
//!
//! This is the binary entry point. Each subcommand lives in its own
//! module; the shared router is constructed here after config
//! validation.

mod best;
mod route;
mod stats;
mod workload;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use dispatch_core::OptimizeFor;
use dispatch_router::TaskRouter;

/// dispatch - route tasks to the best-fit agent.
#[derive(Parser, Debug)]
#[command(name = "dispatch", version, about, long_about = None)]
struct Cli {
    /// Explicit config file path (skips the XDG hierarchy lookup).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Route a task description to an agent.
    Route {
        /// Free-text task description.
        description: String,

        /// Optimization mode: quality, cost, or speed.
        #[arg(long, default_value = "quality")]
        optimize: OptimizeFor,

        /// Output the decision as JSON.
        #[arg(long)]
        json: bool,

        /// Disable colored output.
        #[arg(long)]
        plain: bool,
    },
    /// Show the designated agent for a task type.
    Best {
        /// Task type label (e.g. building, testing, deployment).
        #[arg(long = "type")]
        task_type: String,

        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Show accumulated routing statistics.
    Stats {
        /// Output as JSON.
        #[arg(long)]
        json: bool,

        /// Disable colored output.
        #[arg(long)]
        plain: bool,
    },
    /// Show the per-agent workload distribution.
    Workload {
        /// Output as JSON.
        #[arg(long)]
        json: bool,

        /// Disable colored output.
        #[arg(long)]
        plain: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match cli.config.as_deref() {
        Some(path) => dispatch_config::load_and_validate_path(path),
        None => dispatch_config::load_and_validate(),
    };
    let config = match config {
        Ok(config) => config,
        Err(errors) => {
            dispatch_config::render_errors(&errors);
            return ExitCode::FAILURE;
        }
    };

    init_tracing(&config.router.log_level);

    let router = TaskRouter::new(&config);

    match cli.command {
        Commands::Route {
            description,
            optimize,
            json,
            plain,
        } => route::run(&router, &description, optimize, json, plain),
        Commands::Best { task_type, json } => best::run(&router, &task_type, json),
        Commands::Stats { json, plain } => stats::run(&router, json, plain),
        Commands::Workload { json, plain } => workload::run(&router, json, plain),
    }
}

/// Initializes the tracing subscriber with the configured log level.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("dispatch={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .with_writer(std::io::stderr)
        .init();
}
