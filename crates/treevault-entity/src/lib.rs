//! # treevault-entity
//!
//! Domain models for the TreeVault client. Every struct in this crate mirrors
//! a payload exchanged with the hierarchy backend. All models derive `Debug`,
//! `Clone`, `Serialize` and `Deserialize`, and use the backend's camelCase
//! field names on the wire.

pub mod node;

pub use node::{
    CreateNodeRequest, MoveNodeRequest, NodeKind, ProblemDetail, TagRequest, Tree, TreeNode,
    UpdateNodeRequest,
};
