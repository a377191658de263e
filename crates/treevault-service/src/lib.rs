//! # treevault-service
//!
//! Client-side tree engine for TreeVault. Keeps an in-memory mirror of the
//! backend tree, applies confirmed edits to it locally, resolves
//! drag-and-drop gestures into move commands, and reconciles the mirror with
//! the backend after moves.
//!
//! Components receive their collaborators at construction time; the
//! [`TreeStore`] handle is the only shared mutable state.

pub mod dnd;
pub mod locator;
pub mod operations;
pub mod search;
pub mod store;

pub use dnd::{DragAndDrop, DropError, DropPosition, MoveCommand};
pub use operations::NodeOperations;
pub use store::{TreeState, TreeStore};
