//! Typed error enum for the LLM crate.

use thiserror::Error;

/// Errors from LLM API operations.
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP request failed: {0}")]
    HttpRequest(#[from] reqwest::Error),
    #[error("HTTP status {code}: {body}")]
    HttpStatus { code: u16, body: String },
    #[error("JSON parse error in {context}: {source}")]
    JsonParse {
        context: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("empty response: no usable content returned")]
    EmptyResponse,
    /// The model answered, but not with something we can use.
    #[error("invalid model output: {0}")]
    InvalidOutput(String),
    #[error("client initialization failed: {0}")]
    ClientInit(String),
    #[error("all retries exhausted, last error: {0}")]
    RetriesExhausted(Box<LlmError>),
}

impl LlmError {
    /// Whether this error is transient and should be retried.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            Self::HttpRequest(_) => true,
            Self::HttpStatus { code, .. } => matches!(code, 429 | 500 | 502 | 503 | 529),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rate_limit_and_gateway_errors_are_transient() {
        for code in [429, 500, 502, 503, 529] {
            assert!(LlmError::HttpStatus { code, body: String::new() }.is_transient(), "{code}");
        }
    }

    #[test]
    fn client_errors_are_not_transient() {
        for code in [400, 401, 403, 404, 422] {
            assert!(!LlmError::HttpStatus { code, body: String::new() }.is_transient(), "{code}");
        }
        assert!(!LlmError::EmptyResponse.is_transient());
        assert!(!LlmError::InvalidOutput("x".to_owned()).is_transient());
    }
}
