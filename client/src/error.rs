//! Client error types.

use nodemorph_mutation::MutationError;
use thiserror::Error;

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors raised while talking to a remote instance.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Non-2xx response or a request that never completed. Carries the
    /// response body or status text verbatim.
    #[error("{status}")]
    Transport { status: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Malformed response: {message}")]
    Decode { message: String },

    #[error(transparent)]
    Mutation(#[from] MutationError),
}

impl ClientError {
    pub fn transport(status: impl Into<String>) -> Self {
        Self::Transport {
            status: status.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }
}
