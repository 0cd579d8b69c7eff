//! SWMTrack CLI — the main entry point.
//!
//! Commands:
//! - `onboard`  — Initialize the config directory
//! - `generate` — Produce a full narrated compliance report
//! - `score`    — Compute metrics and band offline, no narrator
//! - `doctor`   — Diagnose configuration health

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

#[derive(Parser)]
#[command(
    name = "swmtrack",
    about = "SWMTrack — solid-waste compliance scoring and report narration",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize configuration
    Onboard,

    /// Generate a narrated compliance report from a JSON request body
    Generate {
        /// Path to the request JSON (reads stdin when omitted)
        input: Option<PathBuf>,
    },

    /// Compute metrics, score, and band without calling the narrator
    Score {
        /// Path to the request JSON (reads stdin when omitted)
        input: Option<PathBuf>,
    },

    /// Diagnose configuration health
    Doctor,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Onboard => commands::onboard::run().await?,
        Commands::Generate { input } => commands::generate::run(input).await?,
        Commands::Score { input } => commands::score::run(input).await?,
        Commands::Doctor => commands::doctor::run().await?,
    }

    Ok(())
}
