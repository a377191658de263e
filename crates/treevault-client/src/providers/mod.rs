//! Backend provider implementations.

pub mod http;
pub mod memory;

pub use http::HttpNodeApi;
pub use memory::MemoryNodeApi;
