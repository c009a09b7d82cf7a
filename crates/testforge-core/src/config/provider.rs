//! Provider-specific configuration
//!
//! Settings for talking to the generative model API: credentials, endpoint
//! override, timeouts, and retry policy.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

/// Timeout configuration for model requests
///
/// - **Connection timeout**: time allowed to establish a connection
/// - **Request timeout**: time allowed for a complete request/response cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeoutConfig {
    /// Connection timeout in seconds
    #[serde(default = "TimeoutConfig::default_connection_timeout")]
    pub connection_timeout_secs: u64,

    /// Request timeout in seconds. Total end-to-end budget, including
    /// connection establishment and response download.
    #[serde(default = "TimeoutConfig::default_request_timeout")]
    pub request_timeout_secs: u64,
}

impl TimeoutConfig {
    const fn default_connection_timeout() -> u64 {
        30
    }

    const fn default_request_timeout() -> u64 {
        120
    }

    /// Create a new timeout configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set connection timeout in seconds
    pub fn with_connection_timeout_secs(mut self, secs: u64) -> Self {
        self.connection_timeout_secs = secs;
        self
    }

    /// Set request timeout in seconds
    pub fn with_request_timeout_secs(mut self, secs: u64) -> Self {
        self.request_timeout_secs = secs;
        self
    }

    /// Get connection timeout as Duration
    pub fn connection_timeout(&self) -> Duration {
        Duration::from_secs(self.connection_timeout_secs)
    }

    /// Get request timeout as Duration
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Validate timeout configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.connection_timeout_secs == 0 {
            return Err("Connection timeout must be greater than 0".to_string());
        }
        if self.request_timeout_secs == 0 {
            return Err("Request timeout must be greater than 0".to_string());
        }
        if self.request_timeout_secs < self.connection_timeout_secs {
            return Err(
                "Request timeout must be greater than or equal to connection timeout".to_string(),
            );
        }
        Ok(())
    }
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            connection_timeout_secs: Self::default_connection_timeout(),
            request_timeout_secs: Self::default_request_timeout(),
        }
    }
}

/// Configuration for a generative model provider
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// API key for key-authenticated endpoints (Google AI Studio)
    pub api_key: Option<String>,

    /// OAuth bearer token for Vertex AI endpoints
    pub access_token: Option<String>,

    /// API endpoint base URL (overrides the provider default)
    pub base_url: Option<String>,

    /// Custom HTTP headers to include in requests
    #[serde(default)]
    pub headers: HashMap<String, String>,

    /// Timeout configuration
    #[serde(default)]
    pub timeouts: TimeoutConfig,

    /// Maximum number of retries for transient failures
    pub max_retries: Option<u32>,
}

impl ProviderConfig {
    /// Create a new provider configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the API key
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Set the bearer token
    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    /// Set the base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Set the retry budget
    pub fn with_max_retries(mut self, retries: u32) -> Self {
        self.max_retries = Some(retries);
        self
    }

    /// Get the API key, falling back to the environment
    pub fn get_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .or_else(|| std::env::var("GEMINI_API_KEY").ok())
            .or_else(|| std::env::var("GOOGLE_API_KEY").ok())
    }

    /// Get the bearer token, falling back to the environment
    pub fn get_access_token(&self) -> Option<String> {
        self.access_token
            .clone()
            .or_else(|| std::env::var("GOOGLE_ACCESS_TOKEN").ok())
    }

    /// Get the base URL for the Google AI Studio endpoint
    pub fn get_base_url(&self) -> String {
        self.base_url
            .clone()
            .unwrap_or_else(|| "https://generativelanguage.googleapis.com".to_string())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        self.timeouts.validate()?;
        if let Some(url) = &self.base_url {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(format!("Base URL must be http(s): {}", url));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeout_validation_rejects_zero() {
        let config = TimeoutConfig::new().with_request_timeout_secs(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn timeout_validation_rejects_inverted_budget() {
        let config = TimeoutConfig::new()
            .with_connection_timeout_secs(60)
            .with_request_timeout_secs(10);
        assert!(config.validate().is_err());
    }

    #[test]
    fn base_url_must_be_http() {
        let config = ProviderConfig::new().with_base_url("ftp://example.com");
        assert!(config.validate().is_err());
        let config = ProviderConfig::new().with_base_url("https://example.com");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn default_base_url_points_at_ai_studio() {
        let config = ProviderConfig::new();
        assert_eq!(
            config.get_base_url(),
            "https://generativelanguage.googleapis.com"
        );
    }
}
