//! Opaque node identifier.
//!
//! Identifiers are issued by the backend and never reused. The client
//! assumes nothing about their structure beyond equality, so the wrapper
//! stores the raw string exactly as received.

use std::borrow::Borrow;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a tree node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    /// Wrap an identifier received from the backend.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Issue a fresh random identifier. Only in-process backends mint ids.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Return the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for NodeId {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.to_string()))
    }
}

impl From<String> for NodeId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl AsRef<str> for NodeId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for NodeId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_is_unique() {
        let id1 = NodeId::generate();
        let id2 = NodeId::generate();
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_display_is_raw_value() {
        let id = NodeId::new("3f1c-root");
        assert_eq!(id.to_string(), "3f1c-root");
        assert_eq!(id.as_str(), "3f1c-root");
    }

    #[test]
    fn test_from_str() {
        let id: NodeId = "abc".parse().expect("infallible");
        assert_eq!(id, NodeId::from("abc"));
    }

    #[test]
    fn test_serde_transparent() {
        let id = NodeId::new("n-1");
        let json = serde_json::to_string(&id).expect("serialize");
        assert_eq!(json, "\"n-1\"");
        let parsed: NodeId = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(id, parsed);
    }
}
