//! Testforge Core Library
//!
//! This crate provides the core functionality for the testforge test
//! generation service: source code analysis, LLM integration, test
//! generation, artifact storage, and the pipeline that ties them together.

pub mod analysis;
pub mod config;
pub mod error;
pub mod generation;
pub mod llm;
pub mod pipeline;
pub mod storage;

// Re-export commonly used types
pub use analysis::{CodeAnalysis, CodeAnalyzer, SourceLanguage};
pub use config::{ProviderConfig, ServiceConfig, StorageBackend};
pub use error::{ForgeError, ForgeResult};
pub use generation::{GeneratedTests, TestFramework, TestGenerator, TestType};
pub use llm::{GenerationMessage, GenerationResponse, LlmClient, ModelParams, ProviderKind};
pub use pipeline::{GenerateOutcome, GenerateRequest, TestPipeline};
pub use storage::{ArtifactStore, GcsLocation, GcsStore, LocalStore};
