//! Turns a drop intent into a concrete move command.

use tracing::debug;

use treevault_core::types::NodeId;
use treevault_entity::TreeNode;

use super::position::DropPosition;

/// Backend move request produced by a valid drop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveCommand {
    pub node_id: NodeId,
    pub new_parent_id: NodeId,
    /// Index among the new parent's children after the move.
    pub position: usize,
}

/// Reasons a drop is rejected locally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DropError {
    #[error("Can only move nodes into folders")]
    InvalidTarget,
    #[error("Cannot move a folder into itself or its descendants")]
    CyclicMove,
    #[error("Cannot reorder root level nodes")]
    NoParent,
    #[error("Failed to determine drop position")]
    TargetNotFound,
}

/// Whether `node` is `ancestor` or sits anywhere in its subtree.
pub fn is_descendant_or_self(ancestor: &TreeNode, node: &TreeNode) -> bool {
    ancestor.id == node.id
        || ancestor
            .children
            .iter()
            .any(|child| is_descendant_or_self(child, node))
}

/// Resolve dropping `dragged` at `position` relative to `target`.
///
/// `parent` is the node whose children contain `target`; it is required for
/// `Before`/`After`. Returns `Ok(None)` when a node is dropped on itself.
pub fn resolve_drop(
    dragged: &TreeNode,
    target: &TreeNode,
    parent: Option<&TreeNode>,
    position: DropPosition,
) -> Result<Option<MoveCommand>, DropError> {
    if dragged.id == target.id {
        return Ok(None);
    }

    let command = match position {
        DropPosition::Into => {
            if !target.is_folder() {
                return Err(DropError::InvalidTarget);
            }
            if is_descendant_or_self(dragged, target) {
                return Err(DropError::CyclicMove);
            }
            MoveCommand {
                node_id: dragged.id.clone(),
                new_parent_id: target.id.clone(),
                position: target.child_count(),
            }
        }
        DropPosition::Before | DropPosition::After => {
            let parent = parent.ok_or(DropError::NoParent)?;
            if is_descendant_or_self(dragged, parent) {
                return Err(DropError::CyclicMove);
            }
            let target_index = parent
                .child_index(&target.id)
                .ok_or(DropError::TargetNotFound)?;

            let mut index = match position {
                DropPosition::Before => target_index,
                _ => target_index + 1,
            };
            // Removing the dragged node first shifts later siblings up by one.
            if parent
                .child_index(&dragged.id)
                .is_some_and(|dragged_index| dragged_index < index)
            {
                index -= 1;
            }

            MoveCommand {
                node_id: dragged.id.clone(),
                new_parent_id: parent.id.clone(),
                position: index,
            }
        }
    };

    debug!(
        node_id = %command.node_id,
        new_parent_id = %command.new_parent_id,
        position = command.position,
        intent = %position,
        "Drop resolved"
    );
    Ok(Some(command))
}
