//! Request and error payloads exchanged with the backend.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use treevault_core::types::NodeId;

use super::model::NodeKind;

/// Body of `POST /api/v1/nodes`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateNodeRequest {
    /// Name of the new node.
    pub name: String,
    /// Folder or file.
    #[serde(rename = "type")]
    pub kind: NodeKind,
    /// Parent folder (omitted to let the backend pick the root).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<NodeId>,
    /// Initial tags.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<BTreeMap<String, String>>,
}

impl CreateNodeRequest {
    /// Request a node under `parent_id` with no initial tags.
    pub fn new(name: impl Into<String>, kind: NodeKind, parent_id: NodeId) -> Self {
        Self {
            name: name.into(),
            kind,
            parent_id: Some(parent_id),
            tags: None,
        }
    }
}

/// Body of `PUT /api/v1/nodes/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateNodeRequest {
    /// New name.
    pub name: String,
}

/// Body of `POST /api/v1/nodes/{id}/move`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveNodeRequest {
    /// Destination folder.
    pub new_parent_id: NodeId,
    /// Index among the destination's children.
    pub position: usize,
}

/// Body of `POST /api/v1/nodes/{id}/tags`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TagRequest {
    /// Tag key.
    pub key: String,
    /// Tag value.
    pub value: String,
}

/// RFC 7807 problem body returned with every non-2xx response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProblemDetail {
    /// Problem type URI.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub type_uri: Option<String>,
    /// Short summary.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// HTTP status echoed by the backend.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    /// Human-readable explanation, shown to the user verbatim.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    /// URI of the failing request.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instance: Option<String>,
}
