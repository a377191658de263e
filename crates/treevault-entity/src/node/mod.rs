//! Tree node domain entities.

pub mod model;
pub mod request;

pub use model::{NodeKind, Tree, TreeNode};
pub use request::{
    CreateNodeRequest, MoveNodeRequest, ProblemDetail, TagRequest, UpdateNodeRequest,
};
