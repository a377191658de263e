//! Node create, rename, delete and move commands.

use std::collections::BTreeMap;

use clap::{Args, ValueEnum};
use serde::Serialize;
use tabled::Tabled;

use treevault_core::error::AppError;
use treevault_core::result::AppResult;
use treevault_core::types::NodeId;
use treevault_entity::{CreateNodeRequest, NodeKind, TreeNode};
use treevault_service::NodeOperations;

use crate::output::{self, OutputFormat};

/// Node type accepted on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    Folder,
    File,
}

impl From<KindArg> for NodeKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Folder => NodeKind::Folder,
            KindArg::File => NodeKind::File,
        }
    }
}

/// Arguments for `create`
#[derive(Debug, Args)]
pub struct CreateArgs {
    /// Node name
    pub name: String,
    /// Folder or file
    #[arg(short, long, value_enum, default_value = "file")]
    pub kind: KindArg,
    /// Parent folder ID
    #[arg(short, long)]
    pub parent: NodeId,
    /// Initial tag as KEY=VALUE (repeatable)
    #[arg(short, long = "tag", value_name = "KEY=VALUE")]
    pub tags: Vec<String>,
}

/// Arguments for `rename`
#[derive(Debug, Args)]
pub struct RenameArgs {
    /// Node ID
    pub id: NodeId,
    /// New name
    pub name: String,
}

/// Arguments for `delete`
#[derive(Debug, Args)]
pub struct DeleteArgs {
    /// Node ID
    pub id: NodeId,
}

/// Arguments for `move`
#[derive(Debug, Args)]
pub struct MoveArgs {
    /// Node ID
    pub id: NodeId,
    /// Destination folder ID
    #[arg(short, long)]
    pub parent: NodeId,
    /// Index among the destination's children
    #[arg(long, default_value = "0")]
    pub position: usize,
}

/// Node display row
#[derive(Debug, Serialize, Tabled)]
pub struct NodeRow {
    /// Node ID
    pub id: String,
    /// Name
    pub name: String,
    /// Folder or file
    #[tabled(rename = "type")]
    pub kind: String,
    /// Path
    pub path: String,
    /// Position
    pub position: String,
}

impl From<&TreeNode> for NodeRow {
    fn from(node: &TreeNode) -> Self {
        Self {
            id: node.id.to_string(),
            name: node.name.clone(),
            kind: node.kind.label().to_string(),
            path: node.path.clone(),
            position: node
                .position
                .map(|p| p.to_string())
                .unwrap_or_else(|| "-".to_string()),
        }
    }
}

/// Create a node and print it.
pub async fn execute_create(args: &CreateArgs, ops: &NodeOperations, format: OutputFormat) -> AppResult<()> {
    let mut request = CreateNodeRequest::new(&args.name, args.kind.into(), args.parent.clone());
    if !args.tags.is_empty() {
        let tags = parse_tags(&args.tags).inspect_err(|e| output::print_error(&e.message))?;
        request.tags = Some(tags);
    }

    let created = ops.create_node_with(request).await?;
    output::print_list(&[NodeRow::from(&created)], format);
    Ok(())
}

pub async fn execute_rename(args: &RenameArgs, ops: &NodeOperations) -> AppResult<()> {
    ops.rename_node(&args.id, &args.name).await?;
    Ok(())
}

pub async fn execute_delete(args: &DeleteArgs, ops: &NodeOperations) -> AppResult<()> {
    ops.delete_node(&args.id).await
}

pub async fn execute_move(args: &MoveArgs, ops: &NodeOperations) -> AppResult<()> {
    ops.move_node(&args.id, &args.parent, args.position).await
}

/// Parse repeated `KEY=VALUE` arguments.
fn parse_tags(raw: &[String]) -> AppResult<BTreeMap<String, String>> {
    raw.iter()
        .map(|pair| {
            let (key, value) = pair
                .split_once('=')
                .ok_or_else(|| AppError::validation(format!("Invalid tag '{pair}', expected KEY=VALUE")))?;
            let key = key.trim();
            if key.is_empty() {
                return Err(AppError::validation(format!("Invalid tag '{pair}', key is empty")));
            }
            Ok((key.to_string(), value.to_string()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tags() {
        let tags = parse_tags(&["owner=ops".to_string(), "note=a=b".to_string()]).unwrap();
        assert_eq!(tags.get("owner").map(String::as_str), Some("ops"));
        assert_eq!(tags.get("note").map(String::as_str), Some("a=b"));
    }

    #[test]
    fn test_parse_tags_rejects_malformed() {
        assert!(parse_tags(&["owner".to_string()]).is_err());
        assert!(parse_tags(&["=x".to_string()]).is_err());
    }

    #[test]
    fn test_row_from_node() {
        let node = TreeNode::folder("f", "docs").with_position(3);
        let row = NodeRow::from(&node);
        assert_eq!(row.kind, "Folder");
        assert_eq!(row.position, "3");
    }
}
