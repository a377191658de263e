//! TreeVault CLI entry point.
//!
//! Loads configuration, initializes logging and dispatches to a subcommand.

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt};

use treevault_core::config::ClientConfig;
use treevault_core::config::logging::LoggingConfig;
use treevault_core::result::AppResult;

mod commands;
mod notifier;
mod output;

use commands::Cli;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match ClientConfig::load(&cli.config) {
        Ok(c) => c,
        Err(e) => {
            output::print_error(&format!("Failed to load configuration: {e}"));
            std::process::exit(1);
        }
    };

    init_logging(&config.logging);
    tracing::debug!(config_path = %cli.config, base_url = %config.api.base_url, "Configuration loaded");

    let code = exit_code(&cli.execute(&config).await);
    if code != 0 {
        std::process::exit(code);
    }
}

/// Process exit status for a finished command.
///
/// Failures have already been reported to the user by the command, so they
/// are only logged here.
fn exit_code(result: &AppResult<()>) -> i32 {
    match result {
        Ok(()) => 0,
        Err(e) => {
            tracing::debug!(kind = %e.kind, error = %e, "Command failed");
            1
        }
    }
}

/// Initialize tracing/logging. Logs go to stderr so command output stays
/// parseable.
fn init_logging(config: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    match config.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_writer(std::io::stderr)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}
