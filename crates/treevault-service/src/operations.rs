//! Node operations: backend call first, mirror update second.

use std::fmt;
use std::sync::Arc;

use tracing::{info, warn};

use treevault_client::NodeApi;
use treevault_core::error::AppError;
use treevault_core::result::AppResult;
use treevault_core::traits::notifier::Notifier;
use treevault_core::types::NodeId;
use treevault_entity::{
    CreateNodeRequest, MoveNodeRequest, NodeKind, TagRequest, TreeNode, UpdateNodeRequest,
};

use crate::dnd::{DragAndDrop, DropError, DropPosition, MoveCommand};
use crate::locator;
use crate::store::TreeStore;

const LOAD_FAILED: &str = "Failed to load tree";
const FETCH_FAILED: &str = "Failed to fetch node";
const CREATE_FAILED: &str = "Failed to create node";
const RENAME_FAILED: &str = "Failed to rename node";
const DELETE_FAILED: &str = "Failed to delete node";
const ADD_TAG_FAILED: &str = "Failed to add tag";
const REMOVE_TAG_FAILED: &str = "Failed to remove tag";
const MOVE_FAILED: &str = "Failed to move node";

/// Runs tree operations against the backend and keeps the mirror in step.
///
/// The mirror is only touched after the backend confirmed a change. Every
/// outcome produces exactly one notification; failures are also returned
/// to the caller unchanged. Calls are not serialized, so concurrent
/// operations apply in the order their responses arrive.
#[derive(Clone)]
pub struct NodeOperations {
    /// Backend.
    api: Arc<dyn NodeApi>,
    /// Shared mirror.
    store: TreeStore,
    /// User-facing messages.
    notifier: Arc<dyn Notifier>,
}

impl fmt::Debug for NodeOperations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeOperations")
            .field("api", &self.api)
            .field("store", &self.store)
            .finish_non_exhaustive()
    }
}

impl NodeOperations {
    /// Creates a new operations handle.
    pub fn new(api: Arc<dyn NodeApi>, store: TreeStore, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            api,
            store,
            notifier,
        }
    }

    /// The mirror this handle writes to.
    pub fn store(&self) -> &TreeStore {
        &self.store
    }

    /// Fetches the whole tree and replaces the mirror.
    ///
    /// `loading` is raised for the duration of the call and cleared on every
    /// path. A failure is also recorded in the store's `error` field.
    pub async fn load_tree(&self) -> AppResult<()> {
        self.store.set_loading(true);
        self.store.set_error(None);

        let outcome = match self.api.get_tree().await {
            Ok(tree) => {
                info!(root_id = %tree.root.id, "Tree loaded");
                self.store.set_tree(Some(tree));
                Ok(())
            }
            Err(err) => {
                let message = err.user_message(LOAD_FAILED);
                warn!(kind = %err.kind, error = %err, "Tree load failed");
                self.store.set_error(Some(message.clone()));
                self.notifier.error(&message);
                Err(err)
            }
        };

        self.store.set_loading(false);
        outcome
    }

    /// Fetches a single node and merges it into the mirror.
    pub async fn fetch_node(&self, id: &NodeId) -> AppResult<TreeNode> {
        let fetched = self
            .api
            .get_node(id)
            .await
            .map_err(|e| self.report("fetch_node", e, FETCH_FAILED))?;

        self.store.update_node(id, |node| node.merged_with(&fetched));
        Ok(fetched)
    }

    /// Creates a node under `parent_id`.
    pub async fn create_node(
        &self,
        name: &str,
        kind: NodeKind,
        parent_id: &NodeId,
    ) -> AppResult<TreeNode> {
        self.create_node_with(CreateNodeRequest::new(name, kind, parent_id.clone()))
            .await
    }

    /// Creates a node from a full request, initial tags included.
    ///
    /// Without a parent in the request the node is placed under the parent
    /// the backend reports, falling back to the mirror's root.
    pub async fn create_node_with(&self, request: CreateNodeRequest) -> AppResult<TreeNode> {
        let created = self
            .api
            .create_node(&request)
            .await
            .map_err(|e| self.report("create_node", e, CREATE_FAILED))?;

        let parent_id = request
            .parent_id
            .clone()
            .or_else(|| created.parent_id.clone())
            .or_else(|| self.store.tree().map(|tree| tree.root.id.clone()));
        if let Some(parent_id) = parent_id {
            self.store.add_node(&parent_id, created.clone());
        }

        info!(node_id = %created.id, kind = created.kind.label(), name = %created.name, "Node created");
        self.notifier.success(&format!(
            "{} \"{}\" created successfully",
            request.kind.label(),
            request.name
        ));
        Ok(created)
    }

    /// Renames a node, keeping its loaded children.
    pub async fn rename_node(&self, id: &NodeId, name: &str) -> AppResult<TreeNode> {
        let request = UpdateNodeRequest {
            name: name.to_string(),
        };
        let updated = self
            .api
            .update_node(id, &request)
            .await
            .map_err(|e| self.report("rename_node", e, RENAME_FAILED))?;

        self.store.update_node(id, |node| node.merged_with(&updated));

        info!(node_id = %id, name = %name, "Node renamed");
        self.notifier
            .success(&format!("Renamed to \"{name}\" successfully"));
        Ok(updated)
    }

    /// Deletes a node and its subtree, clearing the selection if it pointed
    /// at the node.
    pub async fn delete_node(&self, id: &NodeId) -> AppResult<()> {
        self.api
            .delete_node(id)
            .await
            .map_err(|e| self.report("delete_node", e, DELETE_FAILED))?;

        self.store.remove_node(id);
        if self.store.selected_node_id().as_ref() == Some(id) {
            self.store.select_node(None);
        }

        info!(node_id = %id, "Node deleted");
        self.notifier.success("Node deleted successfully");
        Ok(())
    }

    /// Sets tag `key` to `value` on a node.
    pub async fn add_tag(&self, id: &NodeId, key: &str, value: &str) -> AppResult<()> {
        let request = TagRequest {
            key: key.to_string(),
            value: value.to_string(),
        };
        self.api
            .add_tag(id, &request)
            .await
            .map_err(|e| self.report("add_tag", e, ADD_TAG_FAILED))?;

        self.store.update_node(id, |node| {
            let mut node = node.clone();
            node.tags.insert(request.key.clone(), request.value.clone());
            node
        });

        info!(node_id = %id, key = %key, "Tag added");
        self.notifier.success("Tag added successfully");
        Ok(())
    }

    /// Removes tag `key` from a node.
    pub async fn remove_tag(&self, id: &NodeId, key: &str) -> AppResult<()> {
        self.api
            .remove_tag(id, key)
            .await
            .map_err(|e| self.report("remove_tag", e, REMOVE_TAG_FAILED))?;

        self.store.update_node(id, |node| {
            let mut node = node.clone();
            node.tags.remove(key);
            node
        });

        info!(node_id = %id, key = %key, "Tag removed");
        self.notifier.success("Tag removed successfully");
        Ok(())
    }

    /// Moves a node, then reloads the whole tree.
    ///
    /// Moves shift sibling positions on the backend, so the mirror is
    /// replaced rather than patched. The move counts as failed if the reload
    /// fails, and the mirror is left as it was.
    pub async fn move_node(
        &self,
        id: &NodeId,
        new_parent_id: &NodeId,
        position: usize,
    ) -> AppResult<()> {
        let request = MoveNodeRequest {
            new_parent_id: new_parent_id.clone(),
            position,
        };

        let tree = async {
            self.api.move_node(id, &request).await?;
            self.api.get_tree().await
        }
        .await
        .map_err(|e| self.report("move_node", e, MOVE_FAILED))?;

        self.store.set_tree(Some(tree));

        info!(node_id = %id, new_parent_id = %new_parent_id, position, "Node moved");
        self.notifier.success("Node moved successfully");
        Ok(())
    }

    /// Drops `dragged_id` onto `target_id` at `position` using the current
    /// mirror, and executes the resulting move.
    ///
    /// Rejected drops are reported and yield `Ok(None)`, as do nodes that are
    /// not in the mirror.
    pub async fn drop_node(
        &self,
        dragged_id: &NodeId,
        target_id: &NodeId,
        position: DropPosition,
    ) -> AppResult<Option<MoveCommand>> {
        let Some(tree) = self.store.tree() else {
            self.notifier.error(&DropError::TargetNotFound.to_string());
            return Ok(None);
        };
        let (Some(dragged), Some(target)) = (
            locator::find_by_id(&tree, dragged_id),
            locator::find_by_id(&tree, target_id),
        ) else {
            self.notifier.error(&DropError::TargetNotFound.to_string());
            return Ok(None);
        };
        let parent = locator::find_parent(&tree, target_id);

        let mut dnd = DragAndDrop::new();
        dnd.drag_start(dragged);
        dnd.hover(&target, position);
        dnd.handle_drop(
            &target,
            parent.as_deref(),
            self.notifier.as_ref(),
            |command| async move {
                self.move_node(&command.node_id, &command.new_parent_id, command.position)
                    .await
            },
        )
        .await
    }

    /// Looks a node up in the current mirror.
    pub fn find_node_by_id(&self, id: &NodeId) -> Option<Arc<TreeNode>> {
        locator::find_by_id(&self.store.tree()?, id)
    }

    /// The selected node, if it is still in the mirror.
    pub fn get_selected_node(&self) -> Option<Arc<TreeNode>> {
        let state = self.store.snapshot();
        locator::get_selected_node(state.tree.as_ref(), state.selected_node_id.as_ref())
    }

    /// Log and notify a failed operation, handing the error back.
    fn report(&self, operation: &'static str, err: AppError, fallback: &str) -> AppError {
        warn!(operation, kind = %err.kind, error = %err, "Tree operation failed");
        self.notifier.error(&err.user_message(fallback));
        err
    }
}
