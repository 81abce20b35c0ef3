//! LLM error types.

use thiserror::Error;

/// Errors that can occur during a single generation call.
#[derive(Debug, Error)]
pub enum LlmError {
    /// HTTP request failed before a response arrived.
    #[error("LLM request failed: {0}")]
    RequestFailed(String),

    /// The provider answered with a non-success status.
    #[error("HTTP {status}: {body}")]
    Http {
        /// Numeric status code, e.g. 429.
        status: u16,
        /// Response body, usually the provider's error JSON.
        body: String,
    },

    /// LLM response was not valid JSON or had no text where expected.
    #[error("Failed to parse LLM response: {0}")]
    ParseError(String),

    /// Request timed out.
    #[error("LLM request timed out after {0}ms")]
    Timeout(u64),

    /// LLM provider is unavailable.
    #[error("LLM provider unavailable: {0}")]
    Unavailable(String),

    /// Configuration error.
    #[error("LLM configuration error: {0}")]
    ConfigError(String),
}

impl From<reqwest::Error> for LlmError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            LlmError::Timeout(0)
        } else if err.is_connect() {
            LlmError::Unavailable(err.to_string())
        } else {
            LlmError::RequestFailed(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_error_message_carries_status() {
        let err = LlmError::Http {
            status: 429,
            body: "Resource has been exhausted (e.g. check quota).".into(),
        };
        let msg = err.to_string();
        assert!(msg.starts_with("HTTP 429"));
        assert!(msg.contains("quota"));
    }
}
