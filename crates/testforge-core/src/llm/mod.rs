//! Generative model client and message types

pub mod client;
pub mod messages;
pub mod provider_types;
pub mod providers;
pub mod wire;

pub use client::LlmClient;
pub use messages::{GenerationMessage, GenerationResponse, MessageRole, TokenUsage};
pub use provider_types::{ModelParams, ProviderKind};
pub use providers::{GeminiProvider, GenerativeProvider, ProviderInstance, VertexProvider};
