//! Mutation error types.
//!
//! These are whole-request failures. A problem with a single node never
//! becomes a `MutationError` at the executor surface; it is recorded as a
//! `Failed` action instead.

use nodemorph_core::TreeError;
use thiserror::Error;

/// Result type for mutation operations.
pub type MutationResult<T> = Result<T, MutationError>;

/// Errors that can occur during mutation execution.
#[derive(Debug, Error)]
pub enum MutationError {
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    #[error("Unknown operation: {name}")]
    UnknownOperation { name: String },

    #[error("Unknown copy type: {name}")]
    UnknownCopyType { name: String },

    #[error("Invalid input: {message}")]
    Validation { message: String },

    #[error("Repository error: {0}")]
    Repository(#[from] TreeError),

    #[error("Failed to commit changes: {message}")]
    Commit { message: String },

    #[error("Cannot format timestamp: {message}")]
    Timestamp { message: String },
}

impl MutationError {
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }

    pub fn unknown_operation(name: impl Into<String>) -> Self {
        Self::UnknownOperation { name: name.into() }
    }

    pub fn unknown_copy_type(name: impl Into<String>) -> Self {
        Self::UnknownCopyType { name: name.into() }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn commit(message: impl Into<String>) -> Self {
        Self::Commit {
            message: message.into(),
        }
    }

    pub fn timestamp(message: impl Into<String>) -> Self {
        Self::Timestamp {
            message: message.into(),
        }
    }

    /// Returns true for errors raised before any repository access.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::MissingField { .. }
                | Self::UnknownOperation { .. }
                | Self::UnknownCopyType { .. }
                | Self::Validation { .. }
        )
    }
}
