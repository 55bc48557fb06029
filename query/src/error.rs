//! Query error types.

use nodemorph_core::TreeError;
use thiserror::Error;

/// Result type for search operations.
pub type QueryResult<T> = Result<T, QueryError>;

/// Errors that can occur while building or running a search.
#[derive(Debug, Error)]
pub enum QueryError {
    #[error("Invalid search: {message}")]
    Validation { message: String },

    #[error("Search failed: {status}")]
    Transport { status: String },

    #[error("Malformed search response: {message}")]
    Decode { message: String },

    #[error("Repository error: {0}")]
    Engine(#[from] TreeError),
}

impl QueryError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn transport(status: impl Into<String>) -> Self {
        Self::Transport {
            status: status.into(),
        }
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }
}
