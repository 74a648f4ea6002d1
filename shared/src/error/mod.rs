//! Error classification for the field-service API
//!
//! Every failed call falls into one of four kinds:
//! - [`ErrorKind::NetworkFailure`]: transport error or timeout, no response
//! - [`ErrorKind::AuthExpired`]: HTTP 401, local credentials must be purged
//! - [`ErrorKind::ServerError`]: any other non-2xx status
//! - [`ErrorKind::MalformedResponse`]: 2xx but `success = false` or no `result`
//!
//! Statuses with a fixed user-facing message are listed in [`status_message`].

mod http;

pub use self::http::{FALLBACK_NETWORK_MESSAGE, status_message};

use ::http::StatusCode;
use serde::{Deserialize, Serialize};

/// Error taxonomy shared by all API calls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Request never produced a response
    NetworkFailure,
    /// Session token rejected (401)
    AuthExpired,
    /// Server answered with a 4xx/5xx status
    ServerError,
    /// Envelope reported failure or lacked a result
    MalformedResponse,
}

impl ErrorKind {
    /// Classify a non-success HTTP status
    pub fn from_status(status: StatusCode) -> Self {
        if status == StatusCode::UNAUTHORIZED {
            Self::AuthExpired
        } else {
            Self::ServerError
        }
    }

    /// Stable name for logs
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NetworkFailure => "network_failure",
            Self::AuthExpired => "auth_expired",
            Self::ServerError => "server_error",
            Self::MalformedResponse => "malformed_response",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_status() {
        assert_eq!(ErrorKind::from_status(StatusCode::UNAUTHORIZED), ErrorKind::AuthExpired);
        assert_eq!(ErrorKind::from_status(StatusCode::FORBIDDEN), ErrorKind::ServerError);
        assert_eq!(
            ErrorKind::from_status(StatusCode::INTERNAL_SERVER_ERROR),
            ErrorKind::ServerError
        );
    }

    #[test]
    fn test_kind_serialization() {
        let json = serde_json::to_string(&ErrorKind::MalformedResponse).unwrap();
        assert_eq!(json, "\"malformed_response\"");
    }
}
