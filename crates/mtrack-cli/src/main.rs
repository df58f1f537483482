//! # mtrack CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use mtrack_cli::build_stores;
use mtrack_cli::commands::{
    run_assign, run_create, run_delete, run_preview, run_schedule, run_update, run_view,
    AssignArgs, CreateArgs, DeleteArgs, PreviewArgs, ScheduleArgs, UpdateArgs, ViewArgs,
};

/// Milestone tracker CLI.
///
/// Browses projects, equipment sales and payment milestone structures,
/// and renders the payment timeline as a text Gantt chart.
#[derive(Parser, Debug)]
#[command(name = "mtrack", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// API root, e.g. `http://localhost:8000/api`. Overrides MTRACK_API_BASE_URL.
    #[arg(long, global = true)]
    api_base: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Render a view: `/`, `/milestones`, `/equipment` or `/chart`.
    View(ViewArgs),

    /// Show server-computed payment schedules.
    Schedule(ScheduleArgs),

    /// Assign a milestone structure to an equipment sale.
    Assign(AssignArgs),

    /// Create a project, equipment sale, or milestone structure from a JSON draft.
    Create(CreateArgs),

    /// Replace a project, equipment sale, or milestone structure from a JSON draft.
    Update(UpdateArgs),

    /// Delete a project, equipment sale, or milestone structure.
    Delete(DeleteArgs),

    /// Validate a sale and preview its schedule without saving it.
    Preview(PreviewArgs),
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let stores = match build_stores(cli.api_base.as_deref()) {
        Ok(stores) => stores,
        Err(e) => {
            tracing::error!("{e:#}");
            return ExitCode::from(1);
        }
    };

    let result = match &cli.command {
        Commands::View(args) => run_view(args, &stores).await,
        Commands::Schedule(args) => run_schedule(args, &stores).await,
        Commands::Assign(args) => run_assign(args, &stores).await,
        Commands::Create(args) => run_create(args, &stores).await,
        Commands::Update(args) => run_update(args, &stores).await,
        Commands::Delete(args) => run_delete(args, &stores).await,
        Commands::Preview(args) => run_preview(args, &stores).await,
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
