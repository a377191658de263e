//! In-process backend for offline use and tests.
//!
//! Nodes live in a flat arena keyed by id with explicit child-id lists.
//! Positions are always the node's index in its parent's list, renumbered
//! after every structural change. Only the checks needed to keep the arena
//! a tree are enforced; naming rules and other server-side policy are not
//! reproduced here.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{NaiveDateTime, Utc};
use tokio::sync::RwLock;
use tracing::debug;

use treevault_core::error::AppError;
use treevault_core::result::AppResult;
use treevault_core::types::NodeId;
use treevault_entity::{
    CreateNodeRequest, MoveNodeRequest, NodeKind, TagRequest, Tree, TreeNode, UpdateNodeRequest,
};

use crate::api::NodeApi;

/// One stored node.
#[derive(Debug, Clone)]
struct StoredNode {
    name: String,
    kind: NodeKind,
    parent_id: Option<NodeId>,
    child_ids: Vec<NodeId>,
    tags: BTreeMap<String, String>,
    version: i64,
    created_at: NaiveDateTime,
    updated_at: NaiveDateTime,
}

impl StoredNode {
    fn new(name: String, kind: NodeKind, parent_id: Option<NodeId>) -> Self {
        let now = Utc::now().naive_utc();
        Self {
            name,
            kind,
            parent_id,
            child_ids: Vec::new(),
            tags: BTreeMap::new(),
            version: 0,
            created_at: now,
            updated_at: now,
        }
    }

    fn touch(&mut self) {
        self.version += 1;
        self.updated_at = Utc::now().naive_utc();
    }
}

#[derive(Debug)]
struct Arena {
    root_id: NodeId,
    nodes: HashMap<NodeId, StoredNode>,
}

impl Arena {
    fn get(&self, id: &NodeId) -> AppResult<&StoredNode> {
        self.nodes.get(id).ok_or_else(|| not_found(id))
    }

    fn get_mut(&mut self, id: &NodeId) -> AppResult<&mut StoredNode> {
        self.nodes.get_mut(id).ok_or_else(|| not_found(id))
    }

    fn path_of(&self, id: &NodeId) -> String {
        let mut names = Vec::new();
        let mut current = Some(id.clone());
        while let Some(cursor) = current {
            match self.nodes.get(&cursor) {
                Some(node) if node.parent_id.is_some() => {
                    names.push(node.name.clone());
                    current = node.parent_id.clone();
                }
                _ => break,
            }
        }
        names.reverse();
        format!("/{}", names.join("/"))
    }

    /// Whether `candidate` is `ancestor` or lies below it.
    fn is_within(&self, ancestor: &NodeId, candidate: &NodeId) -> bool {
        let mut current = Some(candidate.clone());
        while let Some(cursor) = current {
            if &cursor == ancestor {
                return true;
            }
            current = self.nodes.get(&cursor).and_then(|n| n.parent_id.clone());
        }
        false
    }

    fn build(&self, id: &NodeId, recursive: bool) -> AppResult<TreeNode> {
        let stored = self.get(id)?;
        let position = match &stored.parent_id {
            Some(parent_id) => self
                .get(parent_id)?
                .child_ids
                .iter()
                .position(|child| child == id)
                .map(|index| index as u32),
            None => Some(0),
        };

        let children = if recursive {
            stored
                .child_ids
                .iter()
                .map(|child| self.build(child, true).map(Arc::new))
                .collect::<AppResult<Vec<_>>>()?
        } else {
            Vec::new()
        };

        Ok(TreeNode {
            id: id.clone(),
            name: stored.name.clone(),
            kind: stored.kind,
            parent_id: stored.parent_id.clone(),
            children,
            tags: stored.tags.clone(),
            path: self.path_of(id),
            position,
            version: Some(stored.version),
            created_at: Some(stored.created_at),
            updated_at: Some(stored.updated_at),
        })
    }

    fn remove_subtree(&mut self, id: &NodeId) {
        if let Some(node) = self.nodes.remove(id) {
            for child in node.child_ids {
                self.remove_subtree(&child);
            }
        }
    }
}

/// In-memory hierarchy backend.
#[derive(Debug)]
pub struct MemoryNodeApi {
    arena: RwLock<Arena>,
}

impl MemoryNodeApi {
    /// Create a backend holding only an empty root folder.
    pub fn new() -> Self {
        let root_id = NodeId::generate();
        let mut nodes = HashMap::new();
        nodes.insert(
            root_id.clone(),
            StoredNode::new("root".to_string(), NodeKind::Folder, None),
        );
        Self {
            arena: RwLock::new(Arena { root_id, nodes }),
        }
    }

    /// Create a backend seeded with an existing tree. Children keep the
    /// order they have in `root`.
    pub fn with_tree(root: &TreeNode) -> Self {
        fn insert(nodes: &mut HashMap<NodeId, StoredNode>, node: &TreeNode, parent: Option<NodeId>) {
            let mut stored = StoredNode::new(node.name.clone(), node.kind, parent);
            stored.tags = node.tags.clone();
            stored.child_ids = node.children.iter().map(|c| c.id.clone()).collect();
            nodes.insert(node.id.clone(), stored);
            for child in &node.children {
                insert(nodes, child, Some(node.id.clone()));
            }
        }

        let mut nodes = HashMap::new();
        insert(&mut nodes, root, None);
        Self {
            arena: RwLock::new(Arena {
                root_id: root.id.clone(),
                nodes,
            }),
        }
    }
}

impl Default for MemoryNodeApi {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NodeApi for MemoryNodeApi {
    async fn get_tree(&self) -> AppResult<Tree> {
        let arena = self.arena.read().await;
        let root = arena.build(&arena.root_id, true)?;
        Ok(Tree::new(root))
    }

    async fn get_node(&self, id: &NodeId) -> AppResult<TreeNode> {
        let arena = self.arena.read().await;
        arena.build(id, true)
    }

    async fn create_node(&self, request: &CreateNodeRequest) -> AppResult<TreeNode> {
        if request.name.trim().is_empty() {
            return Err(bad_request("Node name is required"));
        }

        let mut arena = self.arena.write().await;
        let parent_id = request
            .parent_id
            .clone()
            .unwrap_or_else(|| arena.root_id.clone());

        let parent = arena.get(&parent_id)?;
        if parent.kind != NodeKind::Folder {
            return Err(bad_request("Cannot add children to a file"));
        }

        let id = NodeId::generate();
        let mut stored = StoredNode::new(request.name.clone(), request.kind, Some(parent_id.clone()));
        if let Some(tags) = &request.tags {
            stored.tags = tags.clone();
        }
        arena.nodes.insert(id.clone(), stored);

        let parent = arena.get_mut(&parent_id)?;
        parent.child_ids.push(id.clone());
        parent.touch();

        debug!(node_id = %id, parent_id = %parent_id, "Memory backend created node");
        arena.build(&id, false)
    }

    async fn update_node(&self, id: &NodeId, request: &UpdateNodeRequest) -> AppResult<TreeNode> {
        if request.name.trim().is_empty() {
            return Err(bad_request("Node name is required"));
        }

        let mut arena = self.arena.write().await;
        let node = arena.get_mut(id)?;
        node.name = request.name.clone();
        node.touch();
        arena.build(id, false)
    }

    async fn delete_node(&self, id: &NodeId) -> AppResult<()> {
        let mut arena = self.arena.write().await;
        if id == &arena.root_id {
            return Err(bad_request("Cannot delete the root node"));
        }

        let parent_id = arena.get(id)?.parent_id.clone();
        if let Some(parent_id) = parent_id {
            let parent = arena.get_mut(&parent_id)?;
            parent.child_ids.retain(|child| child != id);
            parent.touch();
        }
        arena.remove_subtree(id);
        Ok(())
    }

    async fn move_node(&self, id: &NodeId, request: &MoveNodeRequest) -> AppResult<TreeNode> {
        let mut arena = self.arena.write().await;
        if id == &arena.root_id {
            return Err(bad_request("Cannot move the root node"));
        }

        let target = arena.get(&request.new_parent_id)?;
        if target.kind != NodeKind::Folder {
            return Err(bad_request("Target parent must be a folder"));
        }
        if arena.is_within(id, &request.new_parent_id) {
            return Err(bad_request("Cannot move node to its own descendant"));
        }

        let old_parent_id = arena.get(id)?.parent_id.clone();
        if let Some(old_parent_id) = &old_parent_id {
            let old_parent = arena.get_mut(old_parent_id)?;
            old_parent.child_ids.retain(|child| child != id);
            old_parent.touch();
        }

        let new_parent = arena.get_mut(&request.new_parent_id)?;
        let index = request.position.min(new_parent.child_ids.len());
        new_parent.child_ids.insert(index, id.clone());
        new_parent.touch();

        let node = arena.get_mut(id)?;
        node.parent_id = Some(request.new_parent_id.clone());
        node.touch();

        debug!(node_id = %id, new_parent_id = %request.new_parent_id, index, "Memory backend moved node");
        arena.build(id, false)
    }

    async fn add_tag(&self, id: &NodeId, request: &TagRequest) -> AppResult<()> {
        if request.key.trim().is_empty() {
            return Err(bad_request("Tag key is required"));
        }

        let mut arena = self.arena.write().await;
        let node = arena.get_mut(id)?;
        node.tags.insert(request.key.clone(), request.value.clone());
        node.touch();
        Ok(())
    }

    async fn remove_tag(&self, id: &NodeId, key: &str) -> AppResult<()> {
        let mut arena = self.arena.write().await;
        let node = arena.get_mut(id)?;
        if node.tags.remove(key).is_none() {
            return Err(AppError::not_found("Tag not found")
                .with_detail(format!("Tag not found: {key}")));
        }
        node.touch();
        Ok(())
    }
}

fn not_found(id: &NodeId) -> AppError {
    AppError::not_found("Node not found").with_detail(format!("Node not found: {id}"))
}

fn bad_request(detail: &str) -> AppError {
    AppError::validation(detail).with_detail(detail)
}
