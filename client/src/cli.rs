//! CLI interface for Wayfarer
//!
//! Defines all commands and global flags using clap's derive API.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Wayfarer travel agent client
///
/// A terminal client for a staged travel-planning agent backend. Each request
/// runs through four stages (plan, research, draft, critique) and the running
/// transcript is printed as the stages complete.
#[derive(Parser, Debug)]
#[command(name = "wayfarer")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(long, global = true, value_name = "LEVEL")]
    pub log: Option<String>,

    /// Specify alternate configuration file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start an interactive chat session (the default)
    Chat,

    /// Run a single request through the pipeline and exit
    Run {
        /// The trip request to submit
        task: String,
    },

    /// Check whether the agent backend is reachable
    Status,

    /// Show the agent state of a conversation thread
    State {
        /// Thread id returned by a previous run
        thread_id: String,
    },

    /// Show the checkpoint history of a conversation thread
    History {
        /// Thread id returned by a previous run
        thread_id: String,
    },
}
