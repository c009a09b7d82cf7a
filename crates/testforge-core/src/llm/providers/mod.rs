//! Generative model providers

mod gemini;
mod provider_trait;
mod vertex;

pub use gemini::GeminiProvider;
pub use provider_trait::{GenerativeProvider, ProviderInstance};
pub use vertex::VertexProvider;

#[cfg(test)]
pub(crate) use provider_trait::StaticProvider;
