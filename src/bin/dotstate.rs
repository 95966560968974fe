//! dotstate CLI Binary
//!
//! Command-line interface for inspecting and managing the persistent state.

use clap::Parser;
use dotstate::cli::{command_name, Cli, RunContext};
use dotstate::config::ConfigLoader;
use dotstate::logging::{init_logging, resolve_log_file_path, LoggingConfig};
use std::io::Write;
use std::process;
use tracing::{error, info};

fn main() {
    let cli = Cli::parse();

    // Build logging config from CLI args, env vars, and config file
    let logging_config = build_logging_config(&cli);

    // Initialize logging early
    if let Err(e) = init_logging(Some(&logging_config)) {
        eprintln!("Failed to initialize logging: {}", e);
        process::exit(1);
    }

    info!(command = command_name(&cli.command), "dotstate starting");

    let context = match RunContext::new(&cli) {
        Ok(ctx) => ctx,
        Err(e) => {
            error!("Error initializing context: {}", e);
            eprintln!("{}", dotstate::cli::map_error(&e));
            process::exit(1);
        }
    };

    match context.execute(&cli.command) {
        Ok(output) => {
            info!("Command completed successfully");
            let mut stdout = std::io::stdout().lock();
            if let Err(e) = stdout.write_all(&output).and_then(|_| stdout.flush()) {
                eprintln!("dotstate: failed to write output: {}", e);
                process::exit(1);
            }
        }
        Err(e) => {
            error!("Command failed: {}", e);
            eprintln!("{}", dotstate::cli::map_error(&e));
            process::exit(1);
        }
    }
}

/// Build logging configuration from CLI args, environment, and config file
fn build_logging_config(cli: &Cli) -> LoggingConfig {
    // Logging stays off unless asked for
    if !cli.verbose && cli.log_level.is_none() {
        let mut config = LoggingConfig::default();
        config.level = "off".to_string();
        return config;
    }

    let mut config = match cli.config {
        Some(ref config_path) => ConfigLoader::load_from_file(config_path)
            .ok()
            .map(|c| c.logging)
            .unwrap_or_default(),
        None => ConfigLoader::load()
            .ok()
            .map(|c| c.logging)
            .unwrap_or_default(),
    };

    // Override with CLI arguments (highest priority)
    if let Some(ref level) = cli.log_level {
        config.level = level.clone();
    }
    if let Some(ref format) = cli.log_format {
        config.format = format.clone();
    }
    if let Some(ref output) = cli.log_output {
        config.output = output.clone();
    }
    // CLI flag, then DOTSTATE_LOG_FILE, then the config file
    config.file = resolve_log_file_path(cli.log_file.clone(), config.file.take()).ok();

    config
}
