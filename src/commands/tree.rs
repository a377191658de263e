//! Tree listing and node inspection commands.

use clap::Args;

use treevault_core::result::AppResult;
use treevault_core::types::NodeId;
use treevault_entity::TreeNode;
use treevault_service::NodeOperations;
use treevault_service::search;

use crate::output::{self, OutputFormat};

/// Arguments for `tree`
#[derive(Debug, Args)]
pub struct TreeArgs {
    /// Only show nodes whose name contains this text, plus their ancestors
    #[arg(short, long)]
    pub search: Option<String>,
    /// Max depth below the root
    #[arg(short, long)]
    pub depth: Option<usize>,
}

/// Arguments for `show`
#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Node ID
    pub id: NodeId,
}

/// Load the tree and print it.
pub async fn execute_tree(args: &TreeArgs, ops: &NodeOperations, format: OutputFormat) -> AppResult<()> {
    ops.load_tree().await?;
    let Some(tree) = ops.store().tree() else {
        return Ok(());
    };

    let query = args.search.as_deref().unwrap_or_default();
    match format {
        OutputFormat::Json => {
            output::print_json(&prune(&tree.root, query, args.depth, 0));
        }
        OutputFormat::Table => {
            let lines = render(&tree.root, query, args.depth);
            if lines.is_empty() {
                println!("No results found.");
            }
            for line in lines {
                println!("{line}");
            }
        }
    }
    Ok(())
}

/// Fetch a single node and print it.
pub async fn execute_show(args: &ShowArgs, ops: &NodeOperations, format: OutputFormat) -> AppResult<()> {
    let node = ops.fetch_node(&args.id).await?;

    match format {
        OutputFormat::Json => output::print_json(&node),
        OutputFormat::Table => {
            output::print_kv("ID", node.id.as_str());
            output::print_kv("Name", &node.name);
            output::print_kv("Type", node.kind.label());
            output::print_kv("Path", &node.path);
            output::print_kv(
                "Parent",
                node.parent_id.as_ref().map(NodeId::as_str).unwrap_or("-"),
            );
            output::print_kv(
                "Position",
                &node.position.map(|p| p.to_string()).unwrap_or_else(|| "-".to_string()),
            );
            output::print_kv("Children", &node.child_count().to_string());
            for (key, value) in &node.tags {
                output::print_kv(&format!("#{key}"), value);
            }
            if let Some(updated_at) = node.updated_at {
                output::print_kv("Updated", &updated_at.format("%Y-%m-%d %H:%M").to_string());
            }
        }
    }
    Ok(())
}

/// Lines of an indented listing of `root`'s children.
pub fn render(root: &TreeNode, query: &str, max_depth: Option<usize>) -> Vec<String> {
    fn walk(node: &TreeNode, query: &str, max_depth: Option<usize>, depth: usize, prefix: &str, out: &mut Vec<String>) {
        if max_depth.is_some_and(|max| depth >= max) {
            return;
        }
        let visible = search::filter_children(&node.children, query);
        let last = visible.len().saturating_sub(1);
        for (index, child) in visible.into_iter().enumerate() {
            let (branch, indent) = if index == last {
                ("└── ", "    ")
            } else {
                ("├── ", "│   ")
            };
            let suffix = if child.is_folder() { "/" } else { "" };
            out.push(format!("{prefix}{branch}{}{suffix}  [{}]", child.name, child.id));
            walk(child, query, max_depth, depth + 1, &format!("{prefix}{indent}"), out);
        }
    }

    let mut out = Vec::new();
    walk(root, query, max_depth, 0, "", &mut out);
    out
}

/// Copy of `node` with children filtered by `query` and cut at `max_depth`.
fn prune(node: &TreeNode, query: &str, max_depth: Option<usize>, depth: usize) -> TreeNode {
    let mut copy = node.clone();
    copy.children = if max_depth.is_some_and(|max| depth >= max) {
        Vec::new()
    } else {
        search::filter_children(&node.children, query)
            .into_iter()
            .map(|child| std::sync::Arc::new(prune(child, query, max_depth, depth + 1)))
            .collect()
    };
    copy
}
