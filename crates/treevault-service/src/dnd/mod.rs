//! Drag-and-drop gesture tracking.
//!
//! [`DragAndDrop`] follows one gesture from drag start to drop. Pointer
//! geometry is classified by [`DropPosition::from_pointer`]; the drop itself
//! is resolved by [`resolver::resolve_drop`] and handed to a move callback.

pub mod position;
pub mod resolver;

use std::future::Future;
use std::sync::Arc;

use tracing::debug;

use treevault_core::result::AppResult;
use treevault_core::traits::notifier::Notifier;
use treevault_core::types::NodeId;
use treevault_entity::TreeNode;

pub use position::DropPosition;
pub use resolver::{DropError, MoveCommand, is_descendant_or_self, resolve_drop};

/// State of a single drag gesture.
#[derive(Debug, Clone, Default)]
pub struct DragAndDrop {
    dragged_node: Option<Arc<TreeNode>>,
    drop_target: Option<NodeId>,
    drop_position: Option<DropPosition>,
}

impl DragAndDrop {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin dragging `node`. Any previous gesture is discarded.
    pub fn drag_start(&mut self, node: Arc<TreeNode>) {
        debug!(node_id = %node.id, "Drag started");
        self.dragged_node = Some(node);
        self.drop_target = None;
        self.drop_position = None;
    }

    /// Track the pointer over `node`.
    ///
    /// Returns the drop position now shown, or `None` when nothing is being
    /// dragged or the pointer is over the dragged node itself.
    pub fn drag_over(&mut self, node: &TreeNode, offset_y: f64, height: f64) -> Option<DropPosition> {
        let dragged = self.dragged_node.as_ref()?;
        if dragged.id == node.id {
            return None;
        }

        let position = DropPosition::from_pointer(offset_y, height, node.kind);
        self.drop_target = Some(node.id.clone());
        self.drop_position = Some(position);
        Some(position)
    }

    /// Hover `node` with an explicit position, for input without pointer
    /// geometry. Same guards as [`DragAndDrop::drag_over`].
    pub fn hover(&mut self, node: &TreeNode, position: DropPosition) -> bool {
        let Some(dragged) = self.dragged_node.as_ref() else {
            return false;
        };
        if dragged.id == node.id {
            return false;
        }
        self.drop_target = Some(node.id.clone());
        self.drop_position = Some(position);
        true
    }

    /// The pointer left the hovered node.
    pub fn drag_leave(&mut self) {
        self.drop_target = None;
        self.drop_position = None;
    }

    /// Abandon the gesture.
    pub fn reset(&mut self) {
        self.dragged_node = None;
        self.drop_target = None;
        self.drop_position = None;
    }

    /// Node picked up by [`DragAndDrop::drag_start`].
    pub fn dragged_node(&self) -> Option<&Arc<TreeNode>> {
        self.dragged_node.as_ref()
    }

    /// Node currently highlighted as the drop target.
    pub fn drop_target(&self) -> Option<&NodeId> {
        self.drop_target.as_ref()
    }

    /// Indicator to draw on the drop target.
    pub fn drop_position(&self) -> Option<DropPosition> {
        self.drop_position
    }

    pub fn is_dragging(&self) -> bool {
        self.dragged_node.is_some()
    }

    /// Finish the gesture by dropping onto `target`.
    ///
    /// `parent` must be the node whose children contain `target`. A valid
    /// drop is passed to `on_move` and returned. Rejected drops are
    /// reported through `notifier` and yield `Ok(None)`; only an error from
    /// `on_move` is returned. The gesture is cleared in every case.
    pub async fn handle_drop<F, Fut>(
        &mut self,
        target: &TreeNode,
        parent: Option<&TreeNode>,
        notifier: &dyn Notifier,
        on_move: F,
    ) -> AppResult<Option<MoveCommand>>
    where
        F: FnOnce(MoveCommand) -> Fut,
        Fut: Future<Output = AppResult<()>>,
    {
        let dragged = self.dragged_node.take();
        let position = self.drop_position.take();
        self.drop_target = None;

        let Some(dragged) = dragged else {
            return Ok(None);
        };
        let Some(position) = position else {
            debug!(node_id = %dragged.id, "Drop without a drop position ignored");
            return Ok(None);
        };

        match resolve_drop(&dragged, target, parent, position) {
            Ok(Some(command)) => {
                on_move(command.clone()).await?;
                Ok(Some(command))
            }
            Ok(None) => Ok(None),
            Err(err) => {
                debug!(node_id = %dragged.id, target_id = %target.id, error = %err, "Drop rejected");
                notifier.error(&err.to_string());
                Ok(None)
            }
        }
    }
}
