//! Constructor methods for ForgeError

use super::types::ForgeError;

impl ForgeError {
    /// Create a new configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            context: None,
        }
    }

    /// Create a configuration error with context
    pub fn config_with_context(message: impl Into<String>, context: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            context: Some(context.into()),
        }
    }

    /// Create a new LLM error
    pub fn llm(message: impl Into<String>) -> Self {
        Self::Llm {
            message: message.into(),
            provider: None,
        }
    }

    /// Create an LLM error attributed to a provider
    pub fn llm_with_provider(message: impl Into<String>, provider: impl Into<String>) -> Self {
        Self::Llm {
            message: message.into(),
            provider: Some(provider.into()),
        }
    }

    /// Create a new analysis error
    pub fn analysis(message: impl Into<String>, language: Option<String>) -> Self {
        Self::Analysis {
            message: message.into(),
            language,
        }
    }

    /// Create a new storage error
    pub fn storage(message: impl Into<String>, location: Option<String>) -> Self {
        Self::Storage {
            message: message.into(),
            location,
        }
    }

    /// Create a new HTTP error
    pub fn http(message: impl Into<String>, url: Option<String>, status_code: Option<u16>) -> Self {
        Self::Http {
            message: message.into(),
            url,
            status_code,
        }
    }

    /// Create a new invalid input error
    pub fn invalid_input(message: impl Into<String>, field: Option<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
            field,
        }
    }

    /// Create an IO error with a path
    pub fn io_with_path(message: impl Into<String>, path: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
            path: Some(path.into()),
        }
    }

    /// Create a not-found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// Create a generic error
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
        }
    }
}
