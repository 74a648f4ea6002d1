//! ABP response envelope
//!
//! Every `/services/app/{Service}/{Method}` endpoint answers with the same
//! wrapper:
//! ```json
//! {
//!     "result": { ... },
//!     "targetUrl": null,
//!     "success": true,
//!     "error": null,
//!     "unAuthorizedRequest": false,
//!     "__abp": true
//! }
//! ```

use serde::{Deserialize, Serialize};

/// Uniform response wrapper of the field-service API
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AbpResponse<T> {
    /// Whether the server processed the call
    #[serde(default)]
    pub success: bool,
    /// Payload; absent on failure
    pub result: Option<T>,
    /// Error description; absent on success
    #[serde(default)]
    pub error: Option<AbpError>,
    #[serde(default)]
    pub target_url: Option<String>,
    #[serde(default)]
    pub un_authorized_request: bool,
    #[serde(default, rename = "__abp")]
    pub abp: bool,
}

impl<T> AbpResponse<T> {
    /// Build a successful envelope
    pub fn ok(result: T) -> Self {
        Self {
            success: true,
            result: Some(result),
            error: None,
            target_url: None,
            un_authorized_request: false,
            abp: true,
        }
    }

    /// Build a failed envelope
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            result: None,
            error: Some(AbpError::Message(message.into())),
            target_url: None,
            un_authorized_request: false,
            abp: true,
        }
    }

    /// Error message carried by the envelope, if any
    pub fn error_message(&self) -> Option<&str> {
        self.error.as_ref().and_then(AbpError::message)
    }

    /// The payload when `success` is set and `result` is present
    pub fn into_result(self) -> Option<T> {
        if self.success { self.result } else { None }
    }
}

/// Error member of the envelope
///
/// The backend sends either a plain string or an ABP error object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AbpError {
    Message(String),
    Info(AbpErrorInfo),
}

impl AbpError {
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Message(m) => Some(m.as_str()),
            Self::Info(info) => info.message.as_deref(),
        }
    }
}

/// ABP error object (`{ code, message, details }`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbpErrorInfo {
    #[serde(default)]
    pub code: i64,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub details: Option<String>,
}
