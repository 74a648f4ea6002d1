//! Client error types

use shared::error::{ErrorKind, FALLBACK_NETWORK_MESSAGE};
use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// Request never produced a response (connect error, timeout)
    #[error("HTTP error: {0}")]
    Network(#[from] reqwest::Error),

    /// Server rejected the session token; local credentials were purged
    #[error("Authentication expired")]
    AuthExpired,

    /// Non-success HTTP status other than 401
    #[error("{message}")]
    Server { status: u16, message: String },

    /// Envelope reported failure, lacked a result or could not be decoded
    #[error("Invalid response: {0}")]
    Malformed(String),

    /// No stored session token; the request was not sent
    #[error("Authentication required")]
    NotAuthenticated,

    /// Credential store failure
    #[error("Storage error: {0}")]
    Storage(String),

    /// Invalid client configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Request body failed validation before sending
    #[error("Validation error: {0}")]
    Validation(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ClientError {
    /// Position of the error in the API error taxonomy, if it came from a call
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            Self::Network(_) => Some(ErrorKind::NetworkFailure),
            Self::AuthExpired => Some(ErrorKind::AuthExpired),
            Self::Server { .. } => Some(ErrorKind::ServerError),
            Self::Malformed(_) | Self::Serialization(_) => Some(ErrorKind::MalformedResponse),
            Self::NotAuthenticated
            | Self::Storage(_)
            | Self::Config(_)
            | Self::Validation(_) => None,
        }
    }

    /// Message suitable for a user-visible retry prompt
    pub fn user_message(&self) -> String {
        let message = self.to_string();
        if message.trim().is_empty() {
            FALLBACK_NETWORK_MESSAGE.to_string()
        } else {
            message
        }
    }
}

impl From<std::io::Error> for ClientError {
    fn from(err: std::io::Error) -> Self {
        Self::Storage(err.to_string())
    }
}

impl From<validator::ValidationErrors> for ClientError {
    fn from(err: validator::ValidationErrors) -> Self {
        Self::Validation(err.to_string())
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
