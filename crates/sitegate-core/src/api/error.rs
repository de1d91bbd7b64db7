use reqwest::StatusCode;
use thiserror::Error;

/// Message used when a failed response carries no usable `detail`.
pub const FALLBACK_MESSAGE: &str = "Request failed";

/// Maximum length for structured error details rendered into messages
const MAX_ERROR_BODY_LENGTH: usize = 500;

/// The gateway's single failure channel.
///
/// `Display` is always the human-readable message, so callers can show it
/// verbatim. `status()` is there for callers that need to branch.
#[derive(Error, Debug)]
pub enum ApiError {
    /// The backend answered with a non-2xx status.
    #[error("{message}")]
    Rejected { status: StatusCode, message: String },

    /// The request never completed.
    #[error("{0}")]
    Network(#[from] reqwest::Error),

    /// A 2xx response whose body could not be decoded.
    #[error("{0}")]
    InvalidResponse(String),

    /// The request body could not be encoded; nothing was sent.
    #[error("{0}")]
    InvalidRequest(String),
}

impl ApiError {
    /// Truncate a rendered detail to avoid surfacing excessive data
    fn truncate_body(body: &str) -> String {
        if body.len() <= MAX_ERROR_BODY_LENGTH {
            body.to_string()
        } else {
            let mut end = MAX_ERROR_BODY_LENGTH;
            while !body.is_char_boundary(end) {
                end -= 1;
            }
            format!("{}... (truncated, {} total bytes)", &body[..end], body.len())
        }
    }

    /// Build the failure for a non-2xx response.
    ///
    /// The message is the body's `detail` field when the body is JSON. A
    /// string detail is used as is; any other JSON detail (e.g. a list of
    /// validation errors) is rendered compactly.
    pub fn from_status(status: StatusCode, body: &str) -> Self {
        let message = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|value| match value.get("detail") {
                Some(serde_json::Value::String(detail)) => {
                    Some(detail.clone()).filter(|d| !d.is_empty())
                }
                Some(serde_json::Value::Null) | None => None,
                Some(other) => Some(Self::truncate_body(&other.to_string())),
            })
            .unwrap_or_else(|| FALLBACK_MESSAGE.to_string());

        ApiError::Rejected { status, message }
    }

    /// HTTP status of a rejected request, `None` for failures without a response.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Rejected { status, .. } => Some(*status),
            ApiError::Network(e) => e.status(),
            ApiError::InvalidResponse(_) | ApiError::InvalidRequest(_) => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(StatusCode::UNAUTHORIZED)
    }

    /// The message a caller should display.
    pub fn message(&self) -> String {
        self.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_becomes_message() {
        let err = ApiError::from_status(StatusCode::UNAUTHORIZED, r#"{"detail": "Invalid username or password"}"#);
        assert_eq!(err.to_string(), "Invalid username or password");
        assert!(err.is_unauthorized());
        assert_eq!(err.status(), Some(StatusCode::UNAUTHORIZED));
    }

    #[test]
    fn test_fallback_message() {
        // Not JSON at all
        let err = ApiError::from_status(StatusCode::BAD_GATEWAY, "<html>Bad Gateway</html>");
        assert_eq!(err.to_string(), FALLBACK_MESSAGE);

        // Empty body
        let err = ApiError::from_status(StatusCode::INTERNAL_SERVER_ERROR, "");
        assert_eq!(err.to_string(), FALLBACK_MESSAGE);

        // JSON without detail
        let err = ApiError::from_status(StatusCode::NOT_FOUND, r#"{"error": "nope"}"#);
        assert_eq!(err.to_string(), FALLBACK_MESSAGE);

        // Null detail
        let err = ApiError::from_status(StatusCode::BAD_REQUEST, r#"{"detail": null}"#);
        assert_eq!(err.to_string(), FALLBACK_MESSAGE);
    }

    #[test]
    fn test_structured_detail_is_rendered() {
        let body = r#"{"detail": [{"loc": ["body", "email"], "msg": "value is not a valid email address"}]}"#;
        let err = ApiError::from_status(StatusCode::UNPROCESSABLE_ENTITY, body);
        let message = err.to_string();
        assert!(message.starts_with('['));
        assert!(message.contains("value is not a valid email address"));
    }

    #[test]
    fn test_long_structured_detail_is_truncated() {
        let long = "x".repeat(2000);
        let body = serde_json::json!({ "detail": { "trace": long } }).to_string();
        let err = ApiError::from_status(StatusCode::INTERNAL_SERVER_ERROR, &body);
        assert!(err.to_string().contains("truncated"));
    }

    #[test]
    fn test_invalid_response_has_no_status() {
        let err = ApiError::InvalidResponse("expected value at line 1 column 1".to_string());
        assert_eq!(err.status(), None);
        assert!(!err.is_unauthorized());
        assert_eq!(err.message(), "expected value at line 1 column 1");
    }
}
