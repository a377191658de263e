//! # treevault-client
//!
//! Providers for the hierarchy backend. [`NodeApi`] is the contract the
//! client core consumes; [`HttpNodeApi`] speaks the REST protocol and
//! [`MemoryNodeApi`] keeps a tree in process for offline use and tests.

pub mod api;
pub mod providers;

pub use api::NodeApi;
pub use providers::{HttpNodeApi, MemoryNodeApi};
