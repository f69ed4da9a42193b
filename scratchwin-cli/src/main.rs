mod commands;
mod config;

use anyhow::Context;
use clap::{Parser, Subcommand};
use config::CliConfig;
use scratchwin_core::{GameConfig, ScratchError, Storage};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "scratchwin")]
#[command(about = "Scratch-and-win promotion: play a card and manage the prize catalog")]
#[command(version)]
struct Cli {
    /// Data directory for this device's storage
    #[arg(short, long, global = true)]
    data_dir: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scratch this device's card
    Play {
        /// Seed for the prize draw (reproducible runs)
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Show this device's participation record
    Status,
    /// Prize catalog commands
    #[command(subcommand)]
    Prize(commands::PrizeCommands),
    /// Clear this device's participation so it can play again
    Reset {
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
    /// Admin session commands
    #[command(subcommand)]
    Session(commands::SessionCommands),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let cli_config = CliConfig::new(cli.data_dir, cli.verbose);

    // Initialize logging
    let log_level = if cli_config.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(format!(
            "scratchwin={},scratchwin_core={},scratchwin_game={}",
            log_level, log_level, log_level
        )))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Ensure data directory exists
    tokio::fs::create_dir_all(&cli_config.data_dir)
        .await
        .with_context(|| format!("creating {}", cli_config.data_dir.display()))?;

    let game_config = GameConfig::load(&cli_config.game_config_path())?;
    tracing::debug!("Using data directory {}", cli_config.data_dir.display());
    let storage = Storage::new(&cli_config.db_path())
        .await
        .context("opening device storage")?;

    // Execute command
    let result = match cli.command {
        Commands::Play { seed } => {
            commands::handle_play_command(seed, &storage, &game_config).await
        }
        Commands::Status => commands::show_status(&storage),
        Commands::Prize(cmd) => commands::handle_prize_command(cmd, &storage, &game_config),
        Commands::Reset { force } => {
            commands::reset_participation(force, &storage, &game_config)
        }
        Commands::Session(cmd) => {
            commands::handle_session_command(cmd, &storage, &game_config)
        }
    };

    if let Err(e) = result {
        match e {
            ScratchError::PrizeNotFound { id } => {
                eprintln!("Error: Prize '{}' not found", id);
                eprintln!("Use 'scratchwin prize list' to see configured prizes");
            }
            ScratchError::Validation(msg) => {
                eprintln!("Error: {}", msg);
            }
            ScratchError::Unauthorized(msg) => {
                eprintln!("Error: {}", msg);
                eprintln!("Start one with 'scratchwin session login'");
            }
            _ => {
                eprintln!("Error: {}", e);
            }
        }
        std::process::exit(1);
    }

    Ok(())
}
