//! Shared tree mirror state.

pub mod mirror;

use std::sync::Arc;

use tokio::sync::watch;
use tracing::debug;

use treevault_core::types::NodeId;
use treevault_entity::{Tree, TreeNode};

use crate::locator;

/// Snapshot of everything the presentation layer renders from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TreeState {
    /// Mirror of the backend tree; `None` until the first load.
    pub tree: Option<Tree>,
    /// Currently selected node.
    pub selected_node_id: Option<NodeId>,
    /// Folders shown expanded.
    pub expanded_node_ids: Vec<NodeId>,
    /// A full load is in flight.
    pub loading: bool,
    /// Last load failure, already resolved to a display message.
    pub error: Option<String>,
}

/// Cloneable handle to the tree mirror.
///
/// Every clone reads and writes the same state. Writers replace the tree
/// wholesale with a path-copied version, so a snapshot taken earlier never
/// changes underneath its holder. Subscribers are woken only when a write
/// actually changes something.
///
/// Closures passed to [`TreeStore::update_node`] run while the state is
/// locked and must not call back into the store.
#[derive(Debug, Clone)]
pub struct TreeStore {
    state: Arc<watch::Sender<TreeState>>,
}

impl TreeStore {
    /// Create an empty store.
    pub fn new() -> Self {
        let (sender, _) = watch::channel(TreeState::default());
        Self {
            state: Arc::new(sender),
        }
    }

    /// Clone of the current state.
    pub fn snapshot(&self) -> TreeState {
        self.state.borrow().clone()
    }

    /// Receiver woken on every effective change.
    pub fn subscribe(&self) -> watch::Receiver<TreeState> {
        self.state.subscribe()
    }

    pub fn tree(&self) -> Option<Tree> {
        self.state.borrow().tree.clone()
    }

    pub fn selected_node_id(&self) -> Option<NodeId> {
        self.state.borrow().selected_node_id.clone()
    }

    pub fn expanded_node_ids(&self) -> Vec<NodeId> {
        self.state.borrow().expanded_node_ids.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().loading
    }

    pub fn error(&self) -> Option<String> {
        self.state.borrow().error.clone()
    }

    /// Replace the whole mirror.
    pub fn set_tree(&self, tree: Option<Tree>) {
        self.state.send_if_modified(|state| {
            if state.tree == tree {
                return false;
            }
            state.tree = tree;
            true
        });
    }

    /// Replace node `id` with `updater(node)`.
    ///
    /// Returns `false` and leaves the state untouched when there is no tree
    /// or no node with that id.
    pub fn update_node<F>(&self, id: &NodeId, updater: F) -> bool
    where
        F: FnOnce(&TreeNode) -> TreeNode,
    {
        let changed = self.state.send_if_modified(|state| {
            let Some(tree) = state.tree.as_ref() else {
                return false;
            };
            match mirror::update_node(tree, id, updater) {
                Some(updated) => {
                    state.tree = Some(updated);
                    true
                }
                None => false,
            }
        });
        if !changed {
            debug!(node_id = %id, "Update skipped; node not in mirror");
        }
        changed
    }

    /// Insert `node` under `parent_id`, keeping siblings ordered by position.
    pub fn add_node(&self, parent_id: &NodeId, node: TreeNode) -> bool {
        let changed = self.state.send_if_modified(|state| {
            let Some(tree) = state.tree.as_ref() else {
                return false;
            };
            match mirror::add_node(tree, parent_id, node) {
                Some(updated) => {
                    state.tree = Some(updated);
                    true
                }
                None => false,
            }
        });
        if !changed {
            debug!(parent_id = %parent_id, "Insert skipped; parent not in mirror");
        }
        changed
    }

    /// Remove `id` (and its subtree) from the mirror.
    pub fn remove_node(&self, id: &NodeId) -> bool {
        self.state.send_if_modified(|state| {
            let Some(tree) = state.tree.as_ref() else {
                return false;
            };
            match mirror::remove_node(tree, id) {
                Some(updated) => {
                    state.tree = Some(updated);
                    true
                }
                None => false,
            }
        })
    }

    /// Select a node, or clear the selection with `None`.
    pub fn select_node(&self, id: Option<NodeId>) {
        self.state.send_if_modified(|state| {
            if state.selected_node_id == id {
                return false;
            }
            state.selected_node_id = id;
            true
        });
    }

    pub fn set_expanded_nodes(&self, ids: Vec<NodeId>) {
        self.state.send_if_modified(|state| {
            if state.expanded_node_ids == ids {
                return false;
            }
            state.expanded_node_ids = ids;
            true
        });
    }

    /// Flip the expansion of a single folder.
    pub fn toggle_expanded(&self, id: &NodeId) {
        self.state.send_modify(|state| {
            match state.expanded_node_ids.iter().position(|e| e == id) {
                Some(index) => {
                    state.expanded_node_ids.remove(index);
                }
                None => state.expanded_node_ids.push(id.clone()),
            }
        });
    }

    /// Expand every folder in the mirror.
    pub fn expand_all(&self) {
        let ids = self
            .tree()
            .map(|tree| locator::collect_folder_ids(&tree))
            .unwrap_or_default();
        self.set_expanded_nodes(ids);
    }

    pub fn collapse_all(&self) {
        self.set_expanded_nodes(Vec::new());
    }

    pub fn set_loading(&self, loading: bool) {
        self.state.send_if_modified(|state| {
            let changed = state.loading != loading;
            state.loading = loading;
            changed
        });
    }

    pub fn set_error(&self, error: Option<String>) {
        self.state.send_if_modified(|state| {
            if state.error == error {
                return false;
            }
            state.error = error;
            true
        });
    }
}

impl Default for TreeStore {
    fn default() -> Self {
        Self::new()
    }
}
