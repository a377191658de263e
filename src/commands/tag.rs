//! Tag management CLI commands.

use clap::{Args, Subcommand};

use treevault_core::result::AppResult;
use treevault_core::types::NodeId;
use treevault_service::NodeOperations;

/// Arguments for tag commands
#[derive(Debug, Args)]
pub struct TagArgs {
    /// Tag subcommand
    #[command(subcommand)]
    pub command: TagCommand,
}

/// Tag subcommands
#[derive(Debug, Subcommand)]
pub enum TagCommand {
    /// Set a tag on a node
    Add {
        /// Node ID
        id: NodeId,
        /// Tag key
        key: String,
        /// Tag value
        value: String,
    },
    /// Remove a tag from a node
    Remove {
        /// Node ID
        id: NodeId,
        /// Tag key
        key: String,
    },
}

/// Execute tag commands
pub async fn execute(args: &TagArgs, ops: &NodeOperations) -> AppResult<()> {
    match &args.command {
        TagCommand::Add { id, key, value } => ops.add_tag(id, key, value).await,
        TagCommand::Remove { id, key } => ops.remove_tag(id, key).await,
    }
}
