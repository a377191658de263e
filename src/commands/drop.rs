//! Drag-and-drop from the command line.

use clap::Args;

use treevault_core::result::AppResult;
use treevault_core::types::NodeId;
use treevault_service::{DropPosition, NodeOperations};

use crate::output::{self, OutputFormat};

/// Arguments for `drop`
#[derive(Debug, Args)]
pub struct DropArgs {
    /// Node being dragged
    pub dragged: NodeId,
    /// Node it is dropped on
    pub target: NodeId,
    /// before, after or into
    #[arg(short, long, default_value = "into")]
    pub intent: DropPosition,
}

/// Load the tree, resolve the drop against it and run the resulting move.
pub async fn execute(args: &DropArgs, ops: &NodeOperations, format: OutputFormat) -> AppResult<()> {
    ops.load_tree().await?;

    let Some(command) = ops.drop_node(&args.dragged, &args.target, args.intent).await? else {
        return Ok(());
    };

    match format {
        OutputFormat::Json => output::print_json(&serde_json::json!({
            "nodeId": command.node_id,
            "newParentId": command.new_parent_id,
            "position": command.position,
        })),
        OutputFormat::Table => {
            output::print_kv("Node", command.node_id.as_str());
            output::print_kv("Parent", command.new_parent_id.as_str());
            output::print_kv("Position", &command.position.to_string());
        }
    }
    Ok(())
}
