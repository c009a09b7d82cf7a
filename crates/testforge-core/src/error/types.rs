//! Core error types for testforge

use thiserror::Error;

/// Result type alias for testforge operations
pub type ForgeResult<T> = Result<T, ForgeError>;

/// Main error type for testforge
#[derive(Error, Debug, Clone)]
pub enum ForgeError {
    /// Configuration related errors
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        context: Option<String>,
    },

    /// LLM provider errors
    #[error("LLM error: {message}")]
    Llm {
        message: String,
        provider: Option<String>,
    },

    /// Source analysis errors
    #[error("Analysis error: {message}")]
    Analysis {
        message: String,
        language: Option<String>,
    },

    /// Artifact storage errors
    #[error("Storage error: {message}")]
    Storage {
        message: String,
        location: Option<String>,
    },

    /// HTTP request errors
    #[error("HTTP error: {message}")]
    Http {
        message: String,
        url: Option<String>,
        status_code: Option<u16>,
    },

    /// Invalid input errors
    #[error("Invalid input: {message}")]
    InvalidInput {
        message: String,
        field: Option<String>,
    },

    /// JSON serialization/deserialization errors
    #[error("JSON error: {message}")]
    Json { message: String },

    /// IO errors
    #[error("IO error: {message}")]
    Io {
        message: String,
        path: Option<String>,
    },

    /// Resource not found
    #[error("Not found: {message}")]
    NotFound { message: String },

    /// Generic error
    #[error("Error: {message}")]
    Other { message: String },
}

impl ForgeError {
    /// Check if this error is likely transient and worth retrying.
    ///
    /// Retryable: HTTP 429/502/503/504, timeouts, connection and network
    /// failures, provider overload. Auth and validation failures are not.
    pub fn is_retryable(&self) -> bool {
        match self {
            ForgeError::Llm { message, .. } => {
                let msg = message.to_lowercase();
                msg.contains("429")
                    || msg.contains("502")
                    || msg.contains("503")
                    || msg.contains("504")
                    || msg.contains("overloaded")
                    || msg.contains("timeout")
                    || msg.contains("connection")
                    || msg.contains("network")
            }
            ForgeError::Http { status_code, .. } => matches!(
                status_code,
                None | Some(429) | Some(502) | Some(503) | Some(504)
            ),
            _ => false,
        }
    }
}

impl From<serde_json::Error> for ForgeError {
    fn from(err: serde_json::Error) -> Self {
        ForgeError::Json {
            message: err.to_string(),
        }
    }
}

impl From<std::io::Error> for ForgeError {
    fn from(err: std::io::Error) -> Self {
        ForgeError::Io {
            message: err.to_string(),
            path: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transient_llm_errors_are_retryable() {
        assert!(ForgeError::llm("503 Service Unavailable").is_retryable());
        assert!(ForgeError::llm("request timeout").is_retryable());
        assert!(!ForgeError::llm("401 Unauthorized").is_retryable());
    }

    #[test]
    fn http_status_classification() {
        let err = ForgeError::http("rate limited", Some("https://x".into()), Some(429));
        assert!(err.is_retryable());
        let err = ForgeError::http("bad request", None, Some(400));
        assert!(!err.is_retryable());
        // No status means the request never completed
        let err = ForgeError::http("connection reset", None, None);
        assert!(err.is_retryable());
    }

    #[test]
    fn invalid_input_is_never_retryable() {
        assert!(!ForgeError::invalid_input("missing source", Some("source_code".into())).is_retryable());
    }
}
