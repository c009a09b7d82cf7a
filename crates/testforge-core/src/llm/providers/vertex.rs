//! Vertex AI provider implementation
//!
//! Same request/response shape as the AI Studio endpoint, but the URL is
//! scoped to a project and location and authentication uses an OAuth
//! bearer token instead of an API key.

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

/// Vertex AI provider, authenticated with a bearer token
#[derive(Debug)]
pub struct VertexProvider {
    config: ProviderConfig,
    params: ModelParams,
    project_id: String,
    location: String,
    http_client: Client,
}

impl VertexProvider {
    /// Create a new Vertex provider
    pub fn new(
        config: ProviderConfig,
        params: ModelParams,
        project_id: impl Into<String>,
        location: impl Into<String>,
        http_client: Client,
    ) -> Self {
        Self {
            config,
            params,
            project_id: project_id.into(),
            location: location.into(),
            http_client,
        }
    }

    fn endpoint_url(&self) -> String {
        match &self.config.base_url {
            // Override hook for regional endpoints and emulators
            Some(base) => format!(
                "{}/v1/projects/{}/locations/{}/publishers/google/models/{}:generateContent",
                base, self.project_id, self.location, self.params.model
            ),
            None => format!(
                "https://{loc}-aiplatform.googleapis.com/v1/projects/{proj}/locations/{loc}/publishers/google/models/{model}:generateContent",
                loc = self.location,
                proj = self.project_id,
                model = self.params.model
            ),
        }
    }
}

#[async_trait]
impl GenerativeProvider for VertexProvider {
    #[instrument(skip(self, messages), level = "debug", fields(model = %self.params.model, project = %self.project_id))]
    async fn generate(&self, messages: &[GenerationMessage]) -> ForgeResult<GenerationResponse> {
        let token = self.config.get_access_token().ok_or_else(|| {
            ForgeError::llm_with_provider(
                "Access token not provided (set GOOGLE_ACCESS_TOKEN)",
                "vertex",
            )
        })?;

        let url = self.endpoint_url();
        let request_body = wire::build_request(messages, &self.params);

        let mut request = self
            .http_client
            .post(&url)
            .bearer_auth(token)
            .json(&request_body);
        for (name, value) in &self.config.headers {
            request = request.header(name, value);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ForgeError::llm_with_provider(format!("Request failed: {}", e), "vertex"))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(ForgeError::llm_with_provider(
                format!("API error (status {}): {}", status, error_text),
                "vertex",
            ));
        }

        let response_json: Value = response.json().await.map_err(|e| {
            ForgeError::llm_with_provider(format!("Failed to parse response: {}", e), "vertex")
        })?;

        wire::parse_response(response_json, &self.params.model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_url_is_scoped_to_project_and_location() {
        let provider = VertexProvider::new(
            ProviderConfig::default(),
            ModelParams::for_model("gemini-1.5-pro"),
            "my-project",
            "us-central1",
            Client::new(),
        );
        assert_eq!(
            provider.endpoint_url(),
            "https://us-central1-aiplatform.googleapis.com/v1/projects/my-project/locations/us-central1/publishers/google/models/gemini-1.5-pro:generateContent"
        );
    }

    #[test]
    fn base_url_override_is_honored() {
        let provider = VertexProvider::new(
            ProviderConfig::new().with_base_url("http://localhost:9090"),
            ModelParams::for_model("gemini-1.5-flash"),
            "my-project",
            "europe-west4",
            Client::new(),
        );
        assert!(provider
            .endpoint_url()
            .starts_with("http://localhost:9090/v1/projects/my-project/"));
    }
}
