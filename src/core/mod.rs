//! Core block abstractions and types
//!
//! This module defines the declarative block schema, the field model, block
//! instances as the editor serializes them, and the registry that ties block
//! kinds to their definitions and code generators.

pub mod block;
pub mod field;
pub mod instance;
pub mod registry;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier of a placed block instance
///
/// Editors assign arbitrary opaque strings, so the id is kept as text. Fresh
/// ids are UUID v4.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockId(pub String);

impl BlockId {
    /// Generate a new random block ID
    pub fn new() -> Self {
        BlockId(Uuid::new_v4().to_string())
    }
}

impl Default for BlockId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&str> for BlockId {
    fn from(id: &str) -> Self {
        BlockId(id.to_string())
    }
}

impl std::fmt::Display for BlockId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
