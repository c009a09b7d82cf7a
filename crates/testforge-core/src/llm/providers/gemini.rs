//! Google AI Studio (Gemini) provider implementation

use crate::config::ProviderConfig;
use crate::error::{ForgeError, ForgeResult};
use crate::llm::messages::{GenerationMessage, GenerationResponse};
use crate::llm::provider_types::ModelParams;
use crate::llm::providers::GenerativeProvider;
use crate::llm::wire;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::instrument;

/// Google AI Studio provider, authenticated with an API key
#[derive(Debug)]
pub struct GeminiProvider {
    config: ProviderConfig,
    params: ModelParams,
    http_client: Client,
}

impl GeminiProvider {
    /// Create a new Gemini provider
    pub fn new(config: ProviderConfig, params: ModelParams, http_client: Client) -> Self {
        Self {
            config,
            params,
            http_client,
        }
    }
}

#[async_trait]
impl GenerativeProvider for GeminiProvider {
    #[instrument(skip(self, messages), level = "debug", fields(model = %self.params.model))]
    async fn generate(&self, messages: &[GenerationMessage]) -> ForgeResult<GenerationResponse> {
        let api_key = self
            .config
            .get_api_key()
            .ok_or_else(|| ForgeError::llm_with_provider("API key not provided", "gemini"))?;

        let url = format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.config.get_base_url(),
            self.params.model,
            api_key
        );

        let request_body = wire::build_request(messages, &self.params);

        let mut request = self.http_client.post(&url).json(&request_body);
        for (name, value) in &self.config.headers {
            request = request.header(name, value);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ForgeError::llm_with_provider(format!("Request failed: {}", e), "gemini"))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(ForgeError::llm_with_provider(
                format!("API error (status {}): {}", status, error_text),
                "gemini",
            ));
        }

        let response_json: Value = response.json().await.map_err(|e| {
            ForgeError::llm_with_provider(format!("Failed to parse response: {}", e), "gemini")
        })?;

        tracing::debug!(
            finish_reason = response_json["candidates"][0]["finishReason"]
                .as_str()
                .unwrap_or("unknown"),
            "gemini response received"
        );

        wire::parse_response(response_json, &self.params.model)
    }
}
