//! Model message types and structures

use serde::{Deserialize, Serialize};

/// Role of a message in the generation request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// System instruction
    System,
    /// User message (the prompt)
    User,
    /// Model output (prior turns)
    Model,
}

impl std::fmt::Display for MessageRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MessageRole::System => write!(f, "system"),
            MessageRole::User => write!(f, "user"),
            MessageRole::Model => write!(f, "model"),
        }
    }
}

/// A message sent to the generative model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationMessage {
    /// Role of the message sender
    pub role: MessageRole,
    /// Text content of the message
    pub content: String,
}

impl GenerationMessage {
    /// Create a new system message
    pub fn system<S: Into<String>>(content: S) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }

    /// Create a new user message
    pub fn user<S: Into<String>>(content: S) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }

    /// Create a new model message
    pub fn model<S: Into<String>>(content: S) -> Self {
        Self {
            role: MessageRole::Model,
            content: content.into(),
        }
    }
}

/// Token usage reported by the provider
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    /// Tokens in the prompt
    pub prompt_tokens: u32,
    /// Tokens in the generated candidates
    pub completion_tokens: u32,
    /// Total billed tokens
    pub total_tokens: u32,
}

/// Response from the generative model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationResponse {
    /// The generated text
    pub content: String,
    /// Model that produced the response
    pub model: Option<String>,
    /// Finish reason reported by the provider (e.g. "STOP", "MAX_TOKENS")
    pub finish_reason: Option<String>,
    /// Token usage information
    pub usage: Option<TokenUsage>,
}

impl GenerationResponse {
    /// Create a new response
    pub fn new<S: Into<String>>(content: S) -> Self {
        Self {
            content: content.into(),
            model: None,
            finish_reason: None,
            usage: None,
        }
    }

    /// Add model information
    pub fn with_model<S: Into<String>>(mut self, model: S) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Add usage information
    pub fn with_usage(mut self, usage: TokenUsage) -> Self {
        self.usage = Some(usage);
        self
    }

    /// Check whether the model produced any text
    pub fn is_empty(&self) -> bool {
        self.content.trim().is_empty()
    }

    /// Check whether generation was cut off by the output token cap
    pub fn is_truncated(&self) -> bool {
        matches!(self.finish_reason.as_deref(), Some("MAX_TOKENS"))
    }
}
