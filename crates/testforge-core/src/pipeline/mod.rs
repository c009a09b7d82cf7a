//! The analyze → generate → store pipeline

use crate::analysis::{CodeAnalysis, CodeAnalyzer, SourceLanguage};
use crate::config::{ServiceConfig, StorageBackend};
use crate::error::{ForgeError, ForgeResult};
use crate::generation::{TestFramework, TestGenerator, TestType};
use crate::llm::{LlmClient, TokenUsage};
use crate::storage::{ArtifactStore, GcsStore, LocalStore};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::instrument;

/// A fully validated generation request
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    /// Inline source code; used when `gcs_path` is absent
    pub source_code: Option<String>,
    /// Storage location to fetch the source from; wins over `source_code`
    pub gcs_path: Option<String>,
    /// Language of the source
    pub language: SourceLanguage,
    /// Requested test categories; empty means all
    pub test_types: Vec<TestType>,
    /// Target test framework
    pub framework: TestFramework,
}

/// Result of a pipeline run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateOutcome {
    /// The generated test file
    pub test_code: String,
    /// Where the test file was stored
    pub output_uri: String,
    /// Number of functions found in the source
    pub functions_analyzed: usize,
    /// Number of test cases detected in the output
    pub test_cases_generated: usize,
    /// Test categories that were requested
    pub test_types: Vec<TestType>,
    /// Framework the tests target
    pub framework: TestFramework,
    /// Run timestamp (`%Y%m%d_%H%M%S`, UTC)
    pub timestamp: String,
    /// Analyzer summary of the source
    pub analysis_summary: String,
    /// Model that produced the tests
    pub model: Option<String>,
    /// Token usage for the generation request
    pub usage: Option<TokenUsage>,
}

/// Orchestrates analysis, generation, and storage
pub struct TestPipeline {
    analyzer: CodeAnalyzer,
    generator: TestGenerator,
    store: Arc<dyn ArtifactStore>,
    output_prefix: String,
}

impl TestPipeline {
    /// Create a pipeline from its parts
    pub fn new(
        generator: TestGenerator,
        store: Arc<dyn ArtifactStore>,
        output_prefix: impl Into<String>,
    ) -> Self {
        Self {
            analyzer: CodeAnalyzer::new(),
            generator,
            store,
            output_prefix: output_prefix.into(),
        }
    }

    /// Build the pipeline described by the service configuration
    pub fn from_config(config: &ServiceConfig) -> ForgeResult<Self> {
        let client = LlmClient::from_config(config)?;
        let store: Arc<dyn ArtifactStore> = match config.storage {
            StorageBackend::Gcs => {
                let bucket = config.bucket.clone().ok_or_else(|| {
                    ForgeError::config("GCS storage selected but no bucket configured")
                })?;
                Arc::new(GcsStore::new(
                    bucket,
                    config.provider_config.get_access_token(),
                ))
            }
            StorageBackend::Local => Arc::new(LocalStore::new(config.local_root.clone())),
        };
        Ok(Self::new(
            TestGenerator::new(client),
            store,
            config.output_prefix.clone(),
        ))
    }

    /// Run the full pipeline: resolve the source, analyze it, generate
    /// tests, and persist the result.
    #[instrument(skip(self, request), fields(language = %request.language, framework = %request.framework))]
    pub async fn run(&self, request: GenerateRequest) -> ForgeResult<GenerateOutcome> {
        let source = self
            .resolve_source(request.source_code.as_deref(), request.gcs_path.as_deref())
            .await?;

        let analysis = self.analyzer.analyze(&source, request.language)?;

        let test_types = if request.test_types.is_empty() {
            TestType::all()
        } else {
            request.test_types.clone()
        };

        let generated = self
            .generator
            .generate(&source, &analysis, &test_types, request.framework)
            .await?;

        let timestamp = Utc::now().format("%Y%m%d_%H%M%S").to_string();
        let object_name = format!(
            "{}/{}_tests.{}",
            self.output_prefix,
            timestamp,
            request.framework.file_extension()
        );
        let output_uri = self.store.store(&generated.test_code, &object_name).await?;

        tracing::info!(
            output_uri = %output_uri,
            test_cases = generated.test_count,
            "pipeline run complete"
        );

        Ok(GenerateOutcome {
            test_code: generated.test_code,
            output_uri,
            functions_analyzed: analysis.functions.len(),
            test_cases_generated: generated.test_count,
            test_types,
            framework: request.framework,
            timestamp,
            analysis_summary: analysis.summary,
            model: generated.model,
            usage: generated.usage,
        })
    }

    /// Resolve and analyze a source without calling the model
    pub async fn analyze_only(
        &self,
        source_code: Option<&str>,
        gcs_path: Option<&str>,
        language: SourceLanguage,
    ) -> ForgeResult<CodeAnalysis> {
        let source = self.resolve_source(source_code, gcs_path).await?;
        self.analyzer.analyze(&source, language)
    }

    async fn resolve_source(
        &self,
        source_code: Option<&str>,
        gcs_path: Option<&str>,
    ) -> ForgeResult<String> {
        match (source_code, gcs_path) {
            (_, Some(path)) => self.store.fetch(path).await,
            (Some(source), None) => Ok(source.to_string()),
            (None, None) => Err(ForgeError::invalid_input(
                "Either source_code or gcs_path is required",
                Some("source_code".to_string()),
            )),
        }
    }
}
