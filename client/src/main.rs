// Wayfarer travel agent client
// Main entry point for the wayfarer binary

use clap::Parser;
use wayfarer_client::cli::{Cli, Command};
use wayfarer_client::config::Config;
use wayfarer_client::handlers::{
    handle_chat, handle_history, handle_run, handle_state, handle_status, OutputFormat,
};
use wayfarer_client::telemetry::{init_telemetry, init_telemetry_with_level};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize basic telemetry first (before config is loaded)
    init_telemetry();

    // Load configuration (or use custom path if provided)
    let config = if let Some(config_path) = &cli.config {
        Config::load_from_path(config_path)?
    } else {
        Config::load_or_create()?
    };

    // Re-initialize with the flag- or config-driven log level
    // (only takes effect if RUST_LOG env var is not set)
    let log_level = cli.log.as_deref().unwrap_or(&config.core.log_level);
    init_telemetry_with_level(log_level);

    // Determine output format
    let format = if cli.json {
        OutputFormat::Json
    } else {
        OutputFormat::Text
    };

    // Handle commands; chat is the default
    match cli.command.unwrap_or(Command::Chat) {
        Command::Chat => handle_chat(&config, format).await,

        Command::Run { task } => {
            tracing::info!("Executing request: {}", task);
            handle_run(task, &config, format).await
        }

        Command::Status => {
            tracing::info!("Checking backend status...");
            handle_status(&config, format).await
        }

        Command::State { thread_id } => {
            tracing::info!("Fetching state for thread {}", thread_id);
            handle_state(thread_id, &config, format).await
        }

        Command::History { thread_id } => {
            tracing::info!("Fetching history for thread {}", thread_id);
            handle_history(thread_id, &config, format).await
        }
    }
}
