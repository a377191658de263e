//! Read-only lookups over a tree snapshot.
//!
//! All searches are depth-first in child order and return the first match.

use std::sync::Arc;

use treevault_core::types::NodeId;
use treevault_entity::{Tree, TreeNode};

/// Find the node with `id`, the root included.
pub fn find_by_id(tree: &Tree, id: &NodeId) -> Option<Arc<TreeNode>> {
    find_in(&tree.root, id)
}

/// Find the node whose direct children contain `id`. The root has no parent.
pub fn find_parent(tree: &Tree, id: &NodeId) -> Option<Arc<TreeNode>> {
    parent_in(&tree.root, id)
}

/// Resolve a selection against a mirror.
///
/// `None` when nothing is selected, no tree is loaded, or the selected id is
/// stale.
pub fn get_selected_node(tree: Option<&Tree>, selected_id: Option<&NodeId>) -> Option<Arc<TreeNode>> {
    find_by_id(tree?, selected_id?)
}

/// Ids of every folder below the root, in depth-first order.
pub fn collect_folder_ids(tree: &Tree) -> Vec<NodeId> {
    fn walk(node: &TreeNode, out: &mut Vec<NodeId>) {
        for child in &node.children {
            if child.is_folder() {
                out.push(child.id.clone());
            }
            walk(child, out);
        }
    }

    let mut ids = Vec::new();
    walk(&tree.root, &mut ids);
    ids
}

fn find_in(node: &Arc<TreeNode>, id: &NodeId) -> Option<Arc<TreeNode>> {
    if &node.id == id {
        return Some(Arc::clone(node));
    }
    node.children.iter().find_map(|child| find_in(child, id))
}

fn parent_in(node: &Arc<TreeNode>, id: &NodeId) -> Option<Arc<TreeNode>> {
    if node.children.iter().any(|child| &child.id == id) {
        return Some(Arc::clone(node));
    }
    node.children.iter().find_map(|child| parent_in(child, id))
}
