//! CLI parse: clap types for dotstate. No behavior; definitions only.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// dotstate CLI - inspect and manage persistent dotfile state
#[derive(Parser)]
#[command(name = "dotstate")]
#[command(about = "Inspect and manage the persistent state kept between dotfile runs")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path (overrides default config loading)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Persistent state location (overrides configuration)
    #[arg(long, global = true)]
    pub persistent_state: Option<PathBuf>,

    /// Make all changes without asking for confirmation
    #[arg(long, global = true)]
    pub force: bool,

    /// Report mutations without performing them
    #[arg(short = 'n', long, global = true)]
    pub dry_run: bool,

    /// Enable verbose logging (default: off)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long, global = true)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file, file+stderr)
    #[arg(long, global = true)]
    pub log_output: Option<String>,

    /// Log file path (if output includes "file")
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Manipulate the persistent state
    State {
        #[command(subcommand)]
        command: StateCommands,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum StateCommands {
    /// Print the raw contents of every bucket
    Data {
        /// Output format (json or yaml)
        #[arg(short, long, default_value = "json")]
        format: String,
    },
    /// Delete a key from a bucket
    Delete {
        #[arg(long)]
        bucket: String,
        #[arg(long)]
        key: String,
    },
    /// Print the well-known buckets with decoded values
    Dump {
        /// Output format (json or yaml)
        #[arg(short, long, default_value = "json")]
        format: String,
    },
    /// Print the value stored under a key
    Get {
        #[arg(long)]
        bucket: String,
        #[arg(long)]
        key: String,
    },
    /// Remove the persistent state entirely
    Reset,
    /// Store a value under a key
    Set {
        #[arg(long)]
        bucket: String,
        #[arg(long)]
        key: String,
        #[arg(long)]
        value: String,
    },
}

/// Command name for logging (e.g. "state.get")
pub fn command_name(command: &Commands) -> &'static str {
    match command {
        Commands::State { command } => match command {
            StateCommands::Data { .. } => "state.data",
            StateCommands::Delete { .. } => "state.delete",
            StateCommands::Dump { .. } => "state.dump",
            StateCommands::Get { .. } => "state.get",
            StateCommands::Reset => "state.reset",
            StateCommands::Set { .. } => "state.set",
        },
    }
}
