//! # rotta CLI
//!
//! Command-line interface for rotta - inspect and exercise the application's
//! route table.
//!
//! ## Usage
//!
//! - `rotta routes` - List the active route table
//! - `rotta resolve /preferiti /mappamondo` - Resolve locations
//! - `rotta check` - Verify every table version
//! - `rotta walk / /preferiti back @mappamondo` - Replay a navigation script

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rotta_core::{HistoryMode, TableVersion};
use std::path::PathBuf;
use tracing::debug;

mod commands;
mod config;

use commands::{check_command, resolve_command, routes_command, walk_command};
use config::CliConfigLoader;

/// rotta - client-side route table and navigation controller
#[derive(Parser)]
#[command(name = "rotta")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Inspect and exercise the application route table")]
#[command(long_about = None)]
struct Cli {
    /// Configuration file or directory path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Base URL override (takes precedence over BASE_URL)
    #[arg(long, global = true)]
    base: Option<String>,

    /// History mode (web, hash, memory)
    #[arg(long, global = true)]
    history: Option<HistoryMode>,

    /// Route table version (v1, v2)
    #[arg(long, global = true)]
    table: Option<TableVersion>,

    /// Route name to use when nothing matches
    #[arg(long, global = true)]
    fallback: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the active route table
    Routes {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Resolve one or more locations
    Resolve {
        /// Locations to resolve
        #[arg(required = true)]
        locations: Vec<String>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Verify every route table version
    Check,

    /// Replay navigation steps: a location, @name, back or forward
    Walk {
        #[arg(required = true)]
        steps: Vec<String>,
    },
}

/// Build a configuration loader from CLI arguments
fn build_config_loader(cli: &Cli) -> CliConfigLoader {
    let mut loader = CliConfigLoader::new();

    if let Some(config_path) = &cli.config {
        loader = loader.with_config_override(config_path.clone());
    }

    if let Some(base) = &cli.base {
        loader = loader.with_base_override(base.clone());
    }

    if let Some(history) = cli.history {
        loader = loader.with_history_override(history);
    }

    if let Some(table) = cli.table {
        loader = loader.with_table_override(table);
    }

    if let Some(fallback) = &cli.fallback {
        loader = loader.with_fallback_override(fallback.clone());
    }

    loader
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    rotta_core::init_tracing_with_debug(cli.verbose);
    debug!(core = rotta_core::VERSION, "rotta starting");

    let settings = build_config_loader(&cli).load().await?;

    if let Commands::Check = cli.command {
        return check_command(settings.table);
    }

    let mut controller = rotta_core::create_controller(&settings)
        .context("Failed to build navigation controller")?;

    match cli.command {
        Commands::Routes { json } => routes_command(&controller, json),
        Commands::Resolve { locations, json } => resolve_command(&controller, &locations, json),
        Commands::Walk { steps } => walk_command(&mut controller, &steps),
        Commands::Check => check_command(settings.table),
    }
}
