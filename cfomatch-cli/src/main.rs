// Lint configuration for this crate
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! cfomatch CLI - manage favorites on a cfomatch backend from the command
//! line.
//!
//! # Examples
//!
//! ```bash
//! # List your favorites (default command)
//! cfomatch --token $TOKEN --user-id $USER
//!
//! # Favorite a CFO profile
//! cfomatch add cfo-42 --type cfo
//!
//! # Unfavorite
//! cfomatch remove cfo-42
//!
//! # Flip membership
//! cfomatch toggle co-7 --type company
//!
//! # Counts by target type
//! cfomatch stats
//!
//! # JSON output
//! cfomatch list --format json --pretty
//! ```
//!
//! The token, user ID, and base URL can also come from the environment:
//! `CFOMATCH_TOKEN`, `CFOMATCH_USER_ID`, `CFOMATCH_BASE_URL`.

mod commands;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use commands::{add, list, remove, stats, toggle};

// ============================================================================
// CLI Definition
// ============================================================================

/// cfomatch CLI - favorites management.
#[derive(Parser)]
#[command(name = "cfomatch")]
#[command(about = "Manage cfomatch favorites from the command line")]
#[command(version)]
pub struct Cli {
    /// Subcommand to run. If none, runs 'list' by default.
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Base URL of the cfomatch API.
    #[arg(long, env = "CFOMATCH_BASE_URL", default_value = "http://localhost:3000", global = true)]
    pub base_url: String,

    /// Bearer token for authenticated requests.
    #[arg(long, env = "CFOMATCH_TOKEN", global = true)]
    pub token: Option<String>,

    /// ID of the authenticated user.
    #[arg(long, env = "CFOMATCH_USER_ID", global = true)]
    pub user_id: Option<String>,

    /// Request timeout in seconds.
    #[arg(long, default_value = "30", global = true)]
    pub timeout: u64,

    /// Output format (text or json).
    #[arg(long, short = 'f', default_value = "text", global = true)]
    pub format: OutputFormat,

    /// Pretty-print JSON output.
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Verbose output (show debug info).
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Quiet mode (minimal output).
    #[arg(long, short, global = true)]
    pub quiet: bool,
}

/// CLI commands.
#[derive(Subcommand)]
pub enum Commands {
    /// List favorites (default if no command specified).
    #[command(visible_alias = "l")]
    List,

    /// Favorite a target profile.
    #[command(visible_alias = "a")]
    Add(add::AddArgs),

    /// Unfavorite a target profile.
    #[command(visible_alias = "r")]
    Remove(remove::RemoveArgs),

    /// Flip favorite membership for a target profile.
    #[command(visible_alias = "t")]
    Toggle(toggle::ToggleArgs),

    /// Show favorite counts by target type.
    #[command(visible_alias = "s")]
    Stats,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Human-readable text.
    #[default]
    Text,
    /// JSON output for scripting.
    Json,
}

/// CLI exit codes.
#[repr(i32)]
pub enum ExitCode {
    /// Success.
    Success = 0,
    /// General error.
    Error = 1,
    /// Missing or rejected credentials.
    Unauthorized = 2,
}

// ============================================================================
// Logging Setup
// ============================================================================

fn setup_logging(verbose: bool, quiet: bool) {
    if quiet {
        return; // No logging in quiet mode
    }

    let filter = if verbose {
        EnvFilter::new("cfomatch=debug,info")
    } else {
        EnvFilter::new("cfomatch=warn")
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let result = match &cli.command {
        Some(Commands::List) | None => list::run(&cli).await,
        Some(Commands::Add(args)) => add::run(args, &cli).await,
        Some(Commands::Remove(args)) => remove::run(args, &cli).await,
        Some(Commands::Toggle(args)) => toggle::run(args, &cli).await,
        Some(Commands::Stats) => stats::run(&cli).await,
    };

    if let Err(e) = result {
        if !cli.quiet {
            eprintln!("Error: {e}");
        }
        std::process::exit(ExitCode::Error as i32);
    }

    Ok(())
}
