// src/error.rs
// Standardized error types for the Jira adapter

use thiserror::Error;

/// Main error type for the jira-mcp library
#[derive(Error, Debug)]
pub enum JiraError {
    #[error(
        "no Jira credentials: supply x-jira-domain plus either x-jira-oauth-token or x-jira-email and x-jira-api-token"
    )]
    MissingCredentials,

    #[error("authentication failed (401): Jira rejected the supplied credentials")]
    Unauthorized,

    #[error("permission denied (403): the authenticated user may not perform this operation")]
    Forbidden,

    #[error("rate limited by Jira, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    #[error("Jira API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience type alias for Result using JiraError
pub type Result<T> = std::result::Result<T, JiraError>;

impl JiraError {
    /// Classify a non-2xx response status, extracting a best-effort message
    /// from the vendor error envelope for the generic case.
    pub fn from_status(status: u16, body: &serde_json::Value, retry_after: Option<u64>) -> Self {
        match status {
            401 => JiraError::Unauthorized,
            403 => JiraError::Forbidden,
            429 => JiraError::RateLimited {
                retry_after_secs: retry_after.unwrap_or(DEFAULT_RETRY_AFTER_SECS),
            },
            _ => JiraError::Api {
                status,
                message: extract_error_message(body),
            },
        }
    }

    /// Convert to user-facing string for MCP tool boundaries
    pub fn to_user_string(&self) -> String {
        self.to_string()
    }
}

/// Retry hint used when Jira answers 429 without a Retry-After header
pub const DEFAULT_RETRY_AFTER_SECS: u64 = 30;

/// Pull a human-readable message out of Jira's error envelope.
///
/// Priority order: `errorMessages` (array of strings), `errors`
/// (field -> message map), then a bare `message` field.
pub fn extract_error_message(body: &serde_json::Value) -> String {
    if let Some(messages) = body.get("errorMessages").and_then(|m| m.as_array()) {
        let joined: Vec<&str> = messages.iter().filter_map(|m| m.as_str()).collect();
        if !joined.is_empty() {
            return joined.join("; ");
        }
    }

    if let Some(errors) = body.get("errors").and_then(|e| e.as_object()) {
        let pairs: Vec<String> = errors
            .iter()
            .filter_map(|(field, msg)| msg.as_str().map(|m| format!("{}: {}", field, m)))
            .collect();
        if !pairs.is_empty() {
            return pairs.join("; ");
        }
    }

    if let Some(message) = body.get("message").and_then(|m| m.as_str()) {
        return message.to_string();
    }

    "unknown error".to_string()
}

impl From<JiraError> for String {
    fn from(err: JiraError) -> Self {
        err.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_credentials_names_headers() {
        let err = JiraError::MissingCredentials;
        let msg = err.to_string();
        assert!(msg.contains("x-jira-domain"));
        assert!(msg.contains("x-jira-oauth-token"));
        assert!(msg.contains("x-jira-email"));
        assert!(msg.contains("x-jira-api-token"));
    }

    #[test]
    fn test_classify_401() {
        let err = JiraError::from_status(401, &json!({}), None);
        assert!(matches!(err, JiraError::Unauthorized));
    }

    #[test]
    fn test_classify_403() {
        let err = JiraError::from_status(403, &json!({}), None);
        assert!(matches!(err, JiraError::Forbidden));
    }

    #[test]
    fn test_classify_429_with_retry_after() {
        let err = JiraError::from_status(429, &json!({}), Some(12));
        match err {
            JiraError::RateLimited { retry_after_secs } => assert_eq!(retry_after_secs, 12),
            other => panic!("expected RateLimited, got {:?}", other),
        }
    }

    #[test]
    fn test_classify_429_default_hint() {
        let err = JiraError::from_status(429, &json!({}), None);
        match err {
            JiraError::RateLimited { retry_after_secs } => {
                assert_eq!(retry_after_secs, DEFAULT_RETRY_AFTER_SECS)
            }
            other => panic!("expected RateLimited, got {:?}", other),
        }
    }

    #[test]
    fn test_classify_generic_api_error() {
        let body = json!({"errorMessages": ["Issue does not exist"]});
        let err = JiraError::from_status(404, &body, None);
        match err {
            JiraError::Api { status, message } => {
                assert_eq!(status, 404);
                assert_eq!(message, "Issue does not exist");
            }
            other => panic!("expected Api, got {:?}", other),
        }
    }

    #[test]
    fn test_extract_error_messages_array_wins() {
        let body = json!({
            "errorMessages": ["first", "second"],
            "errors": {"summary": "ignored"},
            "message": "also ignored"
        });
        assert_eq!(extract_error_message(&body), "first; second");
    }

    #[test]
    fn test_extract_errors_map() {
        let body = json!({"errors": {"summary": "Summary is required"}});
        assert_eq!(extract_error_message(&body), "summary: Summary is required");
    }

    #[test]
    fn test_extract_bare_message() {
        let body = json!({"message": "Something went wrong"});
        assert_eq!(extract_error_message(&body), "Something went wrong");
    }

    #[test]
    fn test_extract_fallback() {
        assert_eq!(extract_error_message(&json!({})), "unknown error");
        assert_eq!(extract_error_message(&json!({"errorMessages": []})), "unknown error");
    }

    #[test]
    fn test_into_string() {
        let err = JiraError::Api {
            status: 500,
            message: "boom".into(),
        };
        let s: String = err.into();
        assert!(s.contains("500"));
        assert!(s.contains("boom"));
    }
}
