//! Execution boundary error types.

use thiserror::Error;

/// Result type for service calls.
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Errors raised by an organization service implementation.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// The platform rejected the request.
    #[error("platform error: {message} (code: {code})")]
    Remote {
        /// Platform fault code.
        code: String,
        /// Platform fault message.
        message: String,
    },

    /// The request never reached the platform, or its reply was lost.
    #[error("transport failure: {0}")]
    Transport(String),

    /// Failed to encode the request or decode the reply.
    #[error("failed to serialize: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl ServiceError {
    /// Create a remote error from a platform fault.
    pub fn remote(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Remote {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }
}
