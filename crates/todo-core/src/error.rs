//! Client-level error types.

use thiserror::Error;

use crate::ports::{StorageError, TransportError};

/// Errors surfaced by [`crate::ApiClient`] calls.
///
/// `Unauthorized` and `Http` display the server-supplied message verbatim so
/// UI code can show it as-is.
#[derive(Debug, Error)]
pub enum ClientError {
    /// 401 or 403. The session has already been cleared and the navigator
    /// sent to the sign-in route when this is returned.
    #[error("{message}")]
    Unauthorized { status: u16, message: String },

    /// Any other non-2xx status.
    #[error("{message}")]
    Http { status: u16, message: String },

    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("Failed to encode request body: {0}")]
    Encode(String),

    #[error("Session storage error: {0}")]
    Storage(#[from] StorageError),
}

impl ClientError {
    /// HTTP status carried by the error, if it came from a response.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Unauthorized { status, .. } | ClientError::Http { status, .. } => {
                Some(*status)
            }
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ClientError::Unauthorized { .. })
    }
}
