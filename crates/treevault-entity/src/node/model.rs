//! Tree node entity model.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize};

use treevault_core::types::NodeId;

/// Whether a node is a folder or a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum NodeKind {
    /// A container; the only kind that may hold children.
    Folder,
    /// A leaf entry.
    File,
}

impl NodeKind {
    /// Display label, capitalized.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Folder => "Folder",
            Self::File => "File",
        }
    }
}

/// One entry in the hierarchy, with its loaded children.
///
/// Children sit behind [`Arc`] so that rebuilding one path of the tree
/// leaves every other subtree shared with the previous version.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeNode {
    /// Backend-issued identifier.
    pub id: NodeId,
    /// Display name.
    pub name: String,
    /// Folder or file.
    #[serde(rename = "type")]
    pub kind: NodeKind,
    /// Owning node; absent only for the root.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<NodeId>,
    /// Ordered children. Absent and empty are equivalent.
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub children: Vec<Arc<TreeNode>>,
    /// Key/value tags.
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub tags: BTreeMap<String, String>,
    /// Materialized path computed by the backend.
    #[serde(default, deserialize_with = "null_as_default")]
    pub path: String,
    /// Zero-based index among siblings, as assigned by the backend.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<u32>,
    /// Optimistic-lock version.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<i64>,
    /// Creation time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<NaiveDateTime>,
    /// Last modification time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<NaiveDateTime>,
}

impl TreeNode {
    /// Create a bare node of the given kind.
    pub fn new(id: impl Into<NodeId>, name: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            parent_id: None,
            children: Vec::new(),
            tags: BTreeMap::new(),
            path: String::new(),
            position: None,
            version: None,
            created_at: None,
            updated_at: None,
        }
    }

    /// Create a bare folder.
    pub fn folder(id: impl Into<NodeId>, name: impl Into<String>) -> Self {
        Self::new(id, name, NodeKind::Folder)
    }

    /// Create a bare file.
    pub fn file(id: impl Into<NodeId>, name: impl Into<String>) -> Self {
        Self::new(id, name, NodeKind::File)
    }

    /// Set the parent id.
    pub fn with_parent(mut self, parent_id: impl Into<NodeId>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }

    /// Set the sibling position.
    pub fn with_position(mut self, position: u32) -> Self {
        self.position = Some(position);
        self
    }

    /// Set a tag.
    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.insert(key.into(), value.into());
        self
    }

    /// Attach children, setting each child's parent id and position to
    /// match this node and the given order.
    pub fn with_children(mut self, children: impl IntoIterator<Item = TreeNode>) -> Self {
        let parent_id = self.id.clone();
        self.children = children
            .into_iter()
            .enumerate()
            .map(|(index, mut child)| {
                child.parent_id = Some(parent_id.clone());
                child.position = Some(index as u32);
                Arc::new(child)
            })
            .collect();
        self
    }

    /// Whether this node is a folder.
    pub fn is_folder(&self) -> bool {
        self.kind == NodeKind::Folder
    }

    /// Check if this is the root (no parent).
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    /// Number of loaded children.
    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    /// Index of the direct child `id`, if present.
    pub fn child_index(&self, id: &NodeId) -> Option<usize> {
        self.children.iter().position(|child| &child.id == id)
    }

    /// Sort key used when ordering siblings; a missing position counts as 0.
    pub fn sort_position(&self) -> u32 {
        self.position.unwrap_or(0)
    }

    /// Overlay the fields of `update` onto this node.
    ///
    /// `update` wins field by field, except that optional fields it leaves
    /// out keep their current value and an update without children keeps
    /// the loaded children. Responses to a rename are flat, so a plain
    /// replacement would collapse the subtree.
    pub fn merged_with(&self, update: &TreeNode) -> TreeNode {
        TreeNode {
            id: update.id.clone(),
            name: update.name.clone(),
            kind: update.kind,
            parent_id: update.parent_id.clone().or_else(|| self.parent_id.clone()),
            children: if update.children.is_empty() {
                self.children.clone()
            } else {
                update.children.clone()
            },
            tags: update.tags.clone(),
            path: if update.path.is_empty() {
                self.path.clone()
            } else {
                update.path.clone()
            },
            position: update.position.or(self.position),
            version: update.version.or(self.version),
            created_at: update.created_at.or(self.created_at),
            updated_at: update.updated_at.or(self.updated_at),
        }
    }
}

/// A complete tree snapshot as served by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tree {
    /// The hidden root folder owning every reachable node.
    pub root: Arc<TreeNode>,
}

impl Tree {
    /// Wrap a root node.
    pub fn new(root: TreeNode) -> Self {
        Self {
            root: Arc::new(root),
        }
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
