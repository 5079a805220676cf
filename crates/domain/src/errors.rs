//! Error types used throughout the SDK

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for the Mojio SDK
///
/// Every failure propagates to the immediate caller of the client or
/// command operation. A command either succeeds with its result populated
/// or fails with exactly one of these variants.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "detail")]
pub enum MojioError {
    /// Required configuration missing or malformed at client construction.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Command parameters rejected before dispatch; the request was never sent.
    #[error("Validation error: {0}")]
    Validation(String),

    /// OAuth grant exchange failed, or a refresh was attempted without a
    /// refresh token.
    #[error("Authentication error: {0}")]
    Auth(String),

    /// The API answered with a non-2xx status.
    #[error("Unexpected response status {status}: {body}")]
    Response { status: u16, body: String },

    /// The request never produced an HTTP response.
    #[error("Network error: {0}")]
    Network(String),

    /// A 2xx body could not be decoded into the declared return type.
    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl MojioError {
    /// Stable label suitable for structured logging.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Config(_) => "config",
            Self::Validation(_) => "validation",
            Self::Auth(_) => "auth",
            Self::Response { .. } => "response",
            Self::Network(_) => "network",
            Self::Decode(_) => "decode",
            Self::Internal(_) => "internal",
        }
    }

    /// HTTP status carried by a [`MojioError::Response`].
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Response { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Raw response body carried by a [`MojioError::Response`].
    #[must_use]
    pub fn body(&self) -> Option<&str> {
        match self {
            Self::Response { body, .. } => Some(body),
            _ => None,
        }
    }
}

/// Result type alias for SDK operations
pub type Result<T> = std::result::Result<T, MojioError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_error_exposes_status_and_body() {
        let err = MojioError::Response { status: 404, body: "missing".to_string() };

        assert_eq!(err.status(), Some(404));
        assert_eq!(err.body(), Some("missing"));
        assert_eq!(err.label(), "response");
        assert_eq!(err.to_string(), "Unexpected response status 404: missing");
    }

    #[test]
    fn non_response_errors_have_no_status() {
        let err = MojioError::Auth("invalid_grant".to_string());

        assert_eq!(err.status(), None);
        assert_eq!(err.body(), None);
        assert_eq!(err.label(), "auth");
    }

    #[test]
    fn serializes_with_type_tag() {
        let err = MojioError::Validation("page must be an integer".to_string());
        let json = serde_json::to_value(&err).unwrap();

        assert_eq!(json["type"], "Validation");
        assert_eq!(json["detail"], "page must be an integer");
    }
}
