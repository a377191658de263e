//! CLI command definitions and dispatch.

pub mod drop;
pub mod node;
pub mod tag;
pub mod tree;

use std::sync::Arc;

use clap::{Parser, Subcommand};

use treevault_client::HttpNodeApi;
use treevault_core::config::ClientConfig;
use treevault_core::result::AppResult;
use treevault_core::traits::{Notifier, TracingNotifier};
use treevault_service::{NodeOperations, TreeStore};

use crate::notifier::ConsoleNotifier;
use crate::output::{self, OutputFormat};

/// TreeVault: browse and edit a remote folder hierarchy
#[derive(Debug, Parser)]
#[command(name = "treevault", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Send status messages to the log instead of the terminal
    #[arg(short, long)]
    pub quiet: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print the tree
    Tree(tree::TreeArgs),
    /// Show a single node
    Show(tree::ShowArgs),
    /// Create a folder or file
    Create(node::CreateArgs),
    /// Rename a node
    Rename(node::RenameArgs),
    /// Delete a node and everything below it
    Delete(node::DeleteArgs),
    /// Move a node to an explicit parent and index
    Move(node::MoveArgs),
    /// Tag management
    Tag(tag::TagArgs),
    /// Drop one node onto another, as a drag-and-drop gesture would
    Drop(drop::DropArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self, config: &ClientConfig) -> AppResult<()> {
        let ops = build_operations(config, self.quiet)
            .inspect_err(|e| output::print_error(&e.message))?;

        match &self.command {
            Commands::Tree(args) => tree::execute_tree(args, &ops, self.format).await,
            Commands::Show(args) => tree::execute_show(args, &ops, self.format).await,
            Commands::Create(args) => node::execute_create(args, &ops, self.format).await,
            Commands::Rename(args) => node::execute_rename(args, &ops).await,
            Commands::Delete(args) => node::execute_delete(args, &ops).await,
            Commands::Move(args) => node::execute_move(args, &ops).await,
            Commands::Tag(args) => tag::execute(args, &ops).await,
            Commands::Drop(args) => drop::execute(args, &ops, self.format).await,
        }
    }
}

/// Helper: wire the HTTP backend and a fresh mirror.
fn build_operations(config: &ClientConfig, quiet: bool) -> AppResult<NodeOperations> {
    let api = HttpNodeApi::new(&config.api)?;
    let notifier: Arc<dyn Notifier> = if quiet {
        Arc::new(TracingNotifier)
    } else {
        Arc::new(ConsoleNotifier)
    };
    Ok(NodeOperations::new(Arc::new(api), TreeStore::new(), notifier))
}
