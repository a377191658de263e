//! Backend contract consumed by the client core.

use async_trait::async_trait;

use treevault_core::result::AppResult;
use treevault_core::types::NodeId;
use treevault_entity::{
    CreateNodeRequest, MoveNodeRequest, TagRequest, Tree, TreeNode, UpdateNodeRequest,
};

/// Trait for hierarchy backends.
///
/// The backend owns validation, ids, positions, and persistence; callers
/// trust every successful response as authoritative. Failures carry the
/// backend's `detail` message in [`treevault_core::AppError::detail`] when
/// one was sent.
#[async_trait]
pub trait NodeApi: Send + Sync + std::fmt::Debug + 'static {
    /// Fetch the whole tree.
    async fn get_tree(&self) -> AppResult<Tree>;

    /// Fetch a single node with its children.
    async fn get_node(&self, id: &NodeId) -> AppResult<TreeNode>;

    /// Create a node and return it as stored.
    async fn create_node(&self, request: &CreateNodeRequest) -> AppResult<TreeNode>;

    /// Rename a node and return it as stored.
    async fn update_node(&self, id: &NodeId, request: &UpdateNodeRequest) -> AppResult<TreeNode>;

    /// Delete a node and its subtree.
    async fn delete_node(&self, id: &NodeId) -> AppResult<()>;

    /// Move a node under a new parent at the given index.
    async fn move_node(&self, id: &NodeId, request: &MoveNodeRequest) -> AppResult<TreeNode>;

    /// Add or overwrite a tag.
    async fn add_tag(&self, id: &NodeId, request: &TagRequest) -> AppResult<()>;

    /// Remove a tag by key.
    async fn remove_tag(&self, id: &NodeId, key: &str) -> AppResult<()>;
}
