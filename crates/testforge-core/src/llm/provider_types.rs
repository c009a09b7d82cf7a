//! Provider definitions and model parameters

use crate::error::ForgeError;
use serde::{Deserialize, Serialize};

/// Which Google endpoint family serves the model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// Google AI Studio (`generativelanguage.googleapis.com`, API key auth)
    Gemini,
    /// Vertex AI (`{location}-aiplatform.googleapis.com`, bearer token auth)
    Vertex,
}

impl ProviderKind {
    /// Provider name for logging and error attribution
    pub fn name(&self) -> &'static str {
        match self {
            ProviderKind::Gemini => "gemini",
            ProviderKind::Vertex => "vertex",
        }
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for ProviderKind {
    type Err = ForgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "gemini" | "google" | "ai-studio" => Ok(ProviderKind::Gemini),
            "vertex" | "vertexai" | "vertex-ai" => Ok(ProviderKind::Vertex),
            other => Err(ForgeError::config(format!("Unknown provider: {}", other))),
        }
    }
}

/// Parameters controlling a generation request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelParams {
    /// Model name (e.g. "gemini-1.5-pro")
    pub model: String,
    /// Sampling temperature
    pub temperature: Option<f32>,
    /// Cap on generated tokens
    pub max_output_tokens: Option<u32>,
    /// Nucleus sampling parameter
    pub top_p: Option<f32>,
    /// Top-k sampling parameter
    pub top_k: Option<u32>,
    /// Stop sequences
    pub stop_sequences: Option<Vec<String>>,
    /// Number of candidates to request
    pub candidate_count: Option<u32>,
}

impl Default for ModelParams {
    fn default() -> Self {
        Self {
            model: "gemini-1.5-pro".to_string(),
            temperature: None,
            max_output_tokens: None,
            top_p: None,
            top_k: None,
            stop_sequences: None,
            candidate_count: None,
        }
    }
}

impl ModelParams {
    /// Create parameters for a named model
    pub fn for_model(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            ..Default::default()
        }
    }

    /// Set the sampling temperature
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Set the output token cap
    pub fn with_max_output_tokens(mut self, max: u32) -> Self {
        self.max_output_tokens = Some(max);
        self
    }

    /// Set the number of candidates to request
    pub fn with_candidate_count(mut self, count: u32) -> Self {
        self.candidate_count = Some(count);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_kind_parses_aliases() {
        assert_eq!("google".parse::<ProviderKind>().unwrap(), ProviderKind::Gemini);
        assert_eq!("Vertex".parse::<ProviderKind>().unwrap(), ProviderKind::Vertex);
        assert!("openai".parse::<ProviderKind>().is_err());
    }
}
