//! Test generator

use crate::analysis::CodeAnalysis;
use crate::error::{ForgeError, ForgeResult};
use crate::generation::extract::{count_test_cases, extract_code};
use crate::generation::prompts::PromptBuilder;
use crate::generation::types::{TestFramework, TestType};
use crate::llm::{LlmClient, TokenUsage};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// A generated test file plus generation metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedTests {
    /// The test file contents
    pub test_code: String,
    /// Number of test cases detected in the file
    pub test_count: usize,
    /// Framework the tests target
    pub framework: TestFramework,
    /// Model that produced the tests
    pub model: Option<String>,
    /// Token usage for the generation request
    pub usage: Option<TokenUsage>,
}

/// Generates test files by prompting the configured model
pub struct TestGenerator {
    client: LlmClient,
}

impl TestGenerator {
    /// Create a generator over an existing client
    pub fn new(client: LlmClient) -> Self {
        Self { client }
    }

    /// Generate tests for an analyzed source file.
    ///
    /// The framework must match the analyzed language; an empty test-type
    /// list falls back to all three categories.
    #[instrument(skip(self, source, analysis), fields(framework = %framework, functions = analysis.functions.len()))]
    pub async fn generate(
        &self,
        source: &str,
        analysis: &CodeAnalysis,
        test_types: &[TestType],
        framework: TestFramework,
    ) -> ForgeResult<GeneratedTests> {
        if !framework.supports(analysis.language) {
            return Err(ForgeError::invalid_input(
                format!(
                    "Framework {} targets {}, not {}",
                    framework,
                    framework.language(),
                    analysis.language
                ),
                Some("framework".to_string()),
            ));
        }

        let messages = PromptBuilder::new(framework)
            .with_test_types(test_types)
            .build(source, analysis);

        let response = self.client.generate(&messages).await?;

        if response.is_empty() {
            return Err(ForgeError::llm("Model returned an empty response"));
        }
        if response.is_truncated() {
            tracing::warn!("generation hit the output token cap; test file may be incomplete");
        }

        let test_code = extract_code(&response.content);
        let test_count = count_test_cases(&test_code, framework);

        tracing::info!(test_count, "tests generated");

        Ok(GeneratedTests {
            test_code,
            test_count,
            framework,
            model: response.model,
            usage: response.usage,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{CodeAnalyzer, SourceLanguage};
    use crate::llm::providers::StaticProvider;
    use crate::llm::GenerationResponse;

    fn analyzed() -> (String, CodeAnalysis) {
        let source = "def add(a, b):\n    return a + b\n";
        let analysis = CodeAnalyzer::new()
            .analyze(source, SourceLanguage::Python)
            .unwrap();
        (source.to_string(), analysis)
    }

    #[tokio::test]
    async fn generates_and_counts_tests() {
        let (source, analysis) = analyzed();
        let response = GenerationResponse::new(
            "```python\nimport pytest\n\ndef test_add():\n    assert add(1, 2) == 3\n\ndef test_add_negative():\n    assert add(-1, -2) == -3\n```",
        );
        let generator =
            TestGenerator::new(LlmClient::with_static_provider(StaticProvider::single(response)));

        let generated = generator
            .generate(&source, &analysis, &TestType::all(), TestFramework::Pytest)
            .await
            .unwrap();

        assert_eq!(generated.test_count, 2);
        assert!(generated.test_code.contains("def test_add"));
        assert!(!generated.test_code.contains("```"));
    }

    #[tokio::test]
    async fn rejects_framework_language_mismatch() {
        let (source, analysis) = analyzed();
        let generator = TestGenerator::new(LlmClient::with_static_provider(
            StaticProvider::single(GenerationResponse::new("unused")),
        ));

        let err = generator
            .generate(&source, &analysis, &TestType::all(), TestFramework::Junit)
            .await
            .unwrap_err();
        assert!(matches!(err, ForgeError::InvalidInput { .. }));
    }

    #[tokio::test]
    async fn empty_model_response_is_an_error() {
        let (source, analysis) = analyzed();
        let generator = TestGenerator::new(LlmClient::with_static_provider(
            StaticProvider::single(GenerationResponse::new("   \n")),
        ));

        let err = generator
            .generate(&source, &analysis, &TestType::all(), TestFramework::Pytest)
            .await
            .unwrap_err();
        assert!(matches!(err, ForgeError::Llm { .. }));
    }
}
