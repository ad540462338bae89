//! Error types for the story service client.
//!
//! The data layer performs no recovery: every failure is classified into
//! [`ApiError`] and propagated unchanged to the caller, which owns any
//! user-visible messaging.

use reqwest::StatusCode;
use thiserror::Error;

/// Errors that can occur when talking to the story service.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport-level failure (connection refused, DNS, timeout).
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Non-success response that fits no more specific class.
    #[error("service error ({status}): {message}")]
    Service {
        /// HTTP status the service answered with.
        status: StatusCode,
        /// Message extracted from the error body, or the raw body text.
        message: String,
    },

    /// Credentials or session token rejected by the service (401/403).
    #[error("authentication rejected: {0}")]
    Auth(String),

    /// The service refused the input fields (400/422), or a response body
    /// did not match the expected shape.
    #[error("validation failed: {0}")]
    Validation(String),

    /// Username already taken (409).
    #[error("conflict: {0}")]
    Conflict(String),
}

/// Result type alias for `ApiError`.
pub type Result<T> = std::result::Result<T, ApiError>;

impl ApiError {
    /// Classify a non-success status plus the message extracted from its body.
    pub(crate) fn from_status(status: StatusCode, message: String) -> Self {
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Self::Auth(message),
            StatusCode::CONFLICT => Self::Conflict(message),
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                Self::Validation(message)
            }
            _ => Self::Service { status, message },
        }
    }

    /// A success response whose body failed to decode into the expected shape.
    pub(crate) fn decode(err: serde_json::Error) -> Self {
        Self::Validation(format!("unexpected response shape: {err}"))
    }
}

/// Error body returned by the story service.
///
/// ```json
/// {"error": {"status": 401, "title": "Unauthorized", "message": "Invalid credentials."}}
/// ```
#[derive(Debug, serde::Deserialize)]
pub(crate) struct ErrorEnvelope {
    pub error: ErrorBody,
}

/// Nested error details.
#[derive(Debug, serde::Deserialize)]
pub(crate) struct ErrorBody {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display() {
        let err = ApiError::Auth("Invalid credentials.".to_string());
        assert_eq!(
            err.to_string(),
            "authentication rejected: Invalid credentials."
        );

        let err = ApiError::Service {
            status: StatusCode::BAD_GATEWAY,
            message: "upstream down".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "service error (502 Bad Gateway): upstream down"
        );
    }

    #[test]
    fn test_from_status_classification() {
        assert!(matches!(
            ApiError::from_status(StatusCode::UNAUTHORIZED, String::new()),
            ApiError::Auth(_)
        ));
        assert!(matches!(
            ApiError::from_status(StatusCode::FORBIDDEN, String::new()),
            ApiError::Auth(_)
        ));
        assert!(matches!(
            ApiError::from_status(StatusCode::CONFLICT, String::new()),
            ApiError::Conflict(_)
        ));
        assert!(matches!(
            ApiError::from_status(StatusCode::BAD_REQUEST, String::new()),
            ApiError::Validation(_)
        ));
        assert!(matches!(
            ApiError::from_status(StatusCode::UNPROCESSABLE_ENTITY, String::new()),
            ApiError::Validation(_)
        ));
        assert!(matches!(
            ApiError::from_status(StatusCode::INTERNAL_SERVER_ERROR, String::new()),
            ApiError::Service { .. }
        ));
    }

    #[test]
    fn test_error_envelope_deserialization() {
        let json = r#"{
            "error": {
                "status": 409,
                "title": "Conflict",
                "message": "Username already taken"
            }
        }"#;

        let envelope: ErrorEnvelope = serde_json::from_str(json).expect("deserialize");
        assert_eq!(envelope.error.message, "Username already taken");
    }

    #[test]
    fn test_decode_is_validation() {
        let err = serde_json::from_str::<ErrorEnvelope>("{}").expect_err("should fail");
        assert!(matches!(ApiError::decode(err), ApiError::Validation(_)));
    }
}
