//! Common error types for NodeMorph.

use crate::NodePath;
use thiserror::Error;

/// Errors that can occur during tree operations.
#[derive(Debug, Error)]
pub enum TreeError {
    /// Node not found.
    #[error("Node not found: {0}")]
    NodeNotFound(NodePath),

    /// A node already exists at the path.
    #[error("Node already exists: {0}")]
    NodeExists(NodePath),

    /// The parent of a path to be created does not exist.
    #[error("Parent does not exist: {0}")]
    ParentNotFound(NodePath),

    /// Malformed path.
    #[error("Invalid path '{path}': {reason}")]
    InvalidPath { path: String, reason: String },

    /// Malformed node name.
    #[error("Invalid node name: '{0}'")]
    InvalidName(String),

    /// A property the tree maintains itself cannot be changed this way.
    #[error("Cannot {action} {name}")]
    Protected { name: String, action: String },

    /// Backing storage failure.
    #[error("Storage error: {0}")]
    Storage(String),
}

impl TreeError {
    pub fn invalid_path(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidPath {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub fn invalid_name(name: impl Into<String>) -> Self {
        Self::InvalidName(name.into())
    }

    pub fn protected(name: impl Into<String>, action: impl Into<String>) -> Self {
        Self::Protected {
            name: name.into(),
            action: action.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage(message.into())
    }
}

/// Result type for tree operations.
pub type TreeResult<T> = Result<T, TreeError>;
