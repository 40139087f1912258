//! OAuth client errors.

use thiserror::Error;

/// Errors that can occur while obtaining or refreshing tokens.
#[derive(Debug, Error)]
pub enum OAuthError {
    /// The token endpoint reported a failure in its response body.
    ///
    /// HubSpot signals errors through a `status` field in the JSON body
    /// rather than the HTTP status line. Carries the raw body text.
    #[error("token endpoint reported an error: {0}")]
    CodeExchange(String),

    /// The token endpoint response does not match the expected success
    /// schema.
    #[error("unexpected token endpoint response: {0}")]
    BadResponse(String),

    /// HTTP error from the transport.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error (client secrets file).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl OAuthError {
    /// Create a `BadResponse` error.
    pub(crate) fn bad_response(msg: impl Into<String>) -> Self {
        Self::BadResponse(msg.into())
    }
}

/// Result type for OAuth operations.
pub type OAuthResult<T> = Result<T, OAuthError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = OAuthError::CodeExchange(r#"{"status":"error"}"#.into());
        assert!(err.to_string().contains(r#""status":"error""#));

        let err = OAuthError::bad_response("Bad token expiration format");
        assert_eq!(
            err.to_string(),
            "unexpected token endpoint response: Bad token expiration format"
        );
    }
}
