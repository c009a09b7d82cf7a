//! Retrying client over the generative model providers

use crate::config::{ProviderConfig, ServiceConfig};
use crate::error::{ForgeError, ForgeResult};
use crate::llm::messages::{GenerationMessage, GenerationResponse};
use crate::llm::provider_types::{ModelParams, ProviderKind};
use crate::llm::providers::{
    GeminiProvider, GenerativeProvider, ProviderInstance, VertexProvider,
};
use rand::Rng;
use reqwest::Client;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{instrument, warn};

/// Client for making generation requests with automatic retries.
///
/// Wraps a provider instance and retries transient failures with
/// exponential backoff plus jitter. Non-retryable errors (auth failures,
/// invalid requests) return immediately.
#[derive(Debug)]
pub struct LlmClient {
    provider: ProviderKind,
    config: ProviderConfig,
    provider_instance: ProviderInstance,
}

impl LlmClient {
    /// Create a new client for the given provider.
    ///
    /// `project_id` and `location` are only consulted for Vertex AI.
    pub fn new(
        provider: ProviderKind,
        config: ProviderConfig,
        params: ModelParams,
        project_id: Option<String>,
        location: String,
    ) -> ForgeResult<Self> {
        config.validate().map_err(|e| {
            ForgeError::config_with_context(
                format!("Invalid provider config: {}", e),
                provider.name().to_string(),
            )
        })?;

        let http_client = Client::builder()
            .connect_timeout(config.timeouts.connection_timeout())
            .timeout(config.timeouts.request_timeout())
            .build()
            .map_err(|e| ForgeError::llm(format!("Failed to create HTTP client: {}", e)))?;

        let provider_instance = match provider {
            ProviderKind::Gemini => ProviderInstance::Gemini(GeminiProvider::new(
                config.clone(),
                params,
                http_client,
            )),
            ProviderKind::Vertex => {
                let project_id = project_id.ok_or_else(|| {
                    ForgeError::config("Vertex AI requires a project id (set GCP_PROJECT_ID)")
                })?;
                ProviderInstance::Vertex(VertexProvider::new(
                    config.clone(),
                    params,
                    project_id,
                    location,
                    http_client,
                ))
            }
        };

        Ok(Self {
            provider,
            config,
            provider_instance,
        })
    }

    /// Create a client from the service configuration
    pub fn from_config(config: &ServiceConfig) -> ForgeResult<Self> {
        let params = ModelParams {
            model: config.model.clone(),
            temperature: config.temperature,
            max_output_tokens: config.max_output_tokens,
            ..Default::default()
        };
        Self::new(
            config.provider,
            config.provider_config.clone(),
            params,
            config.project_id.clone(),
            config.location.clone(),
        )
    }

    /// The provider this client talks to
    pub fn provider(&self) -> ProviderKind {
        self.provider
    }

    /// Send a generation request with retry logic.
    ///
    /// Retry strategy (base delay 2^attempt seconds, 0-500 ms jitter per
    /// second of delay, default 3 retries) only applies to transient
    /// failures as classified by [`ForgeError::is_retryable`].
    #[instrument(skip(self, messages), fields(provider = %self.provider))]
    pub async fn generate(
        &self,
        messages: &[GenerationMessage],
    ) -> ForgeResult<GenerationResponse> {
        let max_retries = self.config.max_retries.unwrap_or(3);
        let mut last_error = None;

        for attempt in 0..=max_retries {
            match self.provider_instance.generate(messages).await {
                Ok(response) => {
                    if attempt > 0 {
                        tracing::info!(attempt = attempt, "request succeeded after retry");
                    }
                    if let Some(usage) = &response.usage {
                        tracing::info!(
                            prompt_tokens = usage.prompt_tokens,
                            completion_tokens = usage.completion_tokens,
                            total_tokens = usage.total_tokens,
                            "generation request completed"
                        );
                    }
                    return Ok(response);
                }
                Err(error) => {
                    if !error.is_retryable() {
                        warn!(error = %error, "non-retryable error");
                        return Err(error);
                    }
                    last_error = Some(error.clone());

                    if attempt < max_retries {
                        let base_delay_secs = 2_u64.pow(attempt);
                        let jitter_ms = {
                            let mut rng = rand::thread_rng();
                            rng.gen_range(0..=(base_delay_secs * 500))
                        };
                        let delay =
                            Duration::from_secs(base_delay_secs) + Duration::from_millis(jitter_ms);

                        warn!(
                            attempt = attempt + 1,
                            max_attempts = max_retries + 1,
                            delay_secs = delay.as_secs_f64(),
                            error = %error,
                            "retrying after failure"
                        );
                        sleep(delay).await;
                    } else {
                        tracing::error!(attempts = max_retries + 1, "all retry attempts exhausted");
                    }
                }
            }
        }

        Err(last_error.unwrap_or_else(|| ForgeError::llm("Request failed with no error recorded")))
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::llm::providers::StaticProvider;

    impl LlmClient {
        /// Build a client around canned responses. Test-only.
        pub(crate) fn with_static_provider(provider: StaticProvider) -> Self {
            Self {
                provider: ProviderKind::Gemini,
                config: ProviderConfig::default().with_max_retries(0),
                provider_instance: ProviderInstance::Static(provider),
            }
        }

        /// Same, but with a retry budget. Test-only.
        pub(crate) fn with_static_provider_and_retries(
            provider: StaticProvider,
            max_retries: u32,
        ) -> Self {
            Self {
                provider: ProviderKind::Gemini,
                config: ProviderConfig::default().with_max_retries(max_retries),
                provider_instance: ProviderInstance::Static(provider),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::providers::StaticProvider;

    #[tokio::test]
    async fn returns_first_successful_response() {
        let client = LlmClient::with_static_provider(StaticProvider::single(
            GenerationResponse::new("def test_x():\n    pass\n"),
        ));
        let response = client
            .generate(&[GenerationMessage::user("generate")])
            .await
            .unwrap();
        assert!(response.content.contains("def test_x"));
    }

    #[tokio::test]
    async fn retries_transient_failures() {
        let provider = StaticProvider::new(vec![
            Err(ForgeError::llm("503 Service Unavailable")),
            Ok(GenerationResponse::new("ok")),
        ]);
        let client = LlmClient::with_static_provider_and_retries(provider, 2);
        let response = client
            .generate(&[GenerationMessage::user("generate")])
            .await
            .unwrap();
        assert_eq!(response.content, "ok");
    }

    #[tokio::test]
    async fn does_not_retry_auth_failures() {
        let provider = StaticProvider::new(vec![
            Err(ForgeError::llm("401 Unauthorized")),
            Ok(GenerationResponse::new("should not be reached")),
        ]);
        let client = LlmClient::with_static_provider_and_retries(provider, 3);
        let err = client
            .generate(&[GenerationMessage::user("generate")])
            .await
            .unwrap_err();
        assert!(matches!(err, ForgeError::Llm { .. }));
    }

    #[test]
    fn vertex_without_project_is_a_config_error() {
        let err = LlmClient::new(
            ProviderKind::Vertex,
            ProviderConfig::default(),
            ModelParams::default(),
            None,
            "us-central1".to_string(),
        )
        .unwrap_err();
        assert!(matches!(err, ForgeError::Config { .. }));
    }
}
