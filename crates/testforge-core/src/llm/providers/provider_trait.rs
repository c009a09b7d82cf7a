//! Provider trait and unified enum

use crate::error::ForgeResult;
use crate::llm::messages::{GenerationMessage, GenerationResponse};
use async_trait::async_trait;

/// Unified trait for generative model providers
#[async_trait]
pub trait GenerativeProvider: Send + Sync {
    /// Send a generation request
    async fn generate(&self, messages: &[GenerationMessage]) -> ForgeResult<GenerationResponse>;
}

/// Unified provider enum that wraps all provider implementations
#[derive(Debug)]
pub enum ProviderInstance {
    Gemini(super::GeminiProvider),
    Vertex(super::VertexProvider),
    #[cfg(test)]
    Static(StaticProvider),
}

#[async_trait]
impl GenerativeProvider for ProviderInstance {
    async fn generate(&self, messages: &[GenerationMessage]) -> ForgeResult<GenerationResponse> {
        match self {
            Self::Gemini(p) => p.generate(messages).await,
            Self::Vertex(p) => p.generate(messages).await,
            #[cfg(test)]
            Self::Static(p) => p.generate(messages).await,
        }
    }
}

/// Test provider that replays canned responses without any network access
#[cfg(test)]
#[derive(Debug)]
pub struct StaticProvider {
    responses: std::sync::Mutex<Vec<ForgeResult<GenerationResponse>>>,
}

#[cfg(test)]
impl StaticProvider {
    pub fn new(responses: Vec<ForgeResult<GenerationResponse>>) -> Self {
        Self {
            responses: std::sync::Mutex::new(responses),
        }
    }

    pub fn single(response: GenerationResponse) -> Self {
        Self::new(vec![Ok(response)])
    }
}

#[cfg(test)]
#[async_trait]
impl GenerativeProvider for StaticProvider {
    async fn generate(&self, _messages: &[GenerationMessage]) -> ForgeResult<GenerationResponse> {
        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            return Err(crate::error::ForgeError::llm("StaticProvider exhausted"));
        }
        responses.remove(0)
    }
}
