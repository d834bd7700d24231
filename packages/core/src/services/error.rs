//! Service Layer Error Types
//!
//! Errors returned by the tree accessor and cascade deleter.

use crate::config::ConfigError;
use crate::db::StoreError;
use thiserror::Error;

/// Tree operation errors
#[derive(Error, Debug)]
pub enum TreeError {
    /// Underlying store read or write failed, passed through unchanged
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Field mapping is unusable
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Node looked up by ID does not exist
    #[error("Node not found: {id}")]
    NodeNotFound { id: String },

    /// Node is a root, so it has no parent to return
    #[error("Node {id} is a root and has no parent")]
    RootHasNoParent { id: String },

    /// Node references a parent that does not exist
    #[error("Parent {parent_id} of node {id} not found")]
    ParentNotFound { id: String, parent_id: String },

    /// Cascade delete stopped partway; `removed` lists what was already deleted
    #[error("Cascade delete aborted at node {node_id} after removing {} node(s): {source}", .removed.len())]
    CascadeAborted {
        node_id: String,
        removed: Vec<String>,
        #[source]
        source: StoreError,
    },
}

impl TreeError {
    /// Create a node not found error
    pub fn node_not_found(id: impl Into<String>) -> Self {
        Self::NodeNotFound { id: id.into() }
    }

    /// Create a parent not found error
    pub fn parent_not_found(id: impl Into<String>, parent_id: impl Into<String>) -> Self {
        Self::ParentNotFound {
            id: id.into(),
            parent_id: parent_id.into(),
        }
    }

    /// Create a cascade aborted error
    pub fn cascade_aborted(
        node_id: impl Into<String>,
        removed: Vec<String>,
        source: StoreError,
    ) -> Self {
        Self::CascadeAborted {
            node_id: node_id.into(),
            removed,
            source,
        }
    }

    /// Id of the node a cascade stopped at, if this is a cascade failure
    pub fn aborted_at(&self) -> Option<&str> {
        match self {
            Self::CascadeAborted { node_id, .. } => Some(node_id),
            _ => None,
        }
    }
}
