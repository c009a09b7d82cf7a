//! Prompt construction for test generation

use crate::analysis::CodeAnalysis;
use crate::generation::types::{TestFramework, TestType};
use crate::llm::GenerationMessage;

/// Builder for test-generation prompts.
///
/// Assembles a system instruction and a user prompt from the analysis and
/// the source under test. Rendering is deterministic so prompt changes
/// show up in review diffs.
#[derive(Debug, Clone)]
pub struct PromptBuilder {
    framework: TestFramework,
    test_types: Vec<TestType>,
    include_source: bool,
}

impl PromptBuilder {
    /// Create a builder targeting a framework
    pub fn new(framework: TestFramework) -> Self {
        Self {
            framework,
            test_types: TestType::all(),
            include_source: true,
        }
    }

    /// Set the requested test types
    pub fn with_test_types(mut self, test_types: &[TestType]) -> Self {
        if !test_types.is_empty() {
            self.test_types = test_types.to_vec();
        }
        self
    }

    /// Skip embedding the full source (for very large files)
    pub fn without_source(mut self) -> Self {
        self.include_source = false;
        self
    }

    /// Render the system instruction
    pub fn system_prompt(&self) -> String {
        format!(
            "You are an expert software test engineer. You write thorough, \
             idiomatic {framework} test suites for {language} code. \
             Respond with a single complete test file inside one fenced code \
             block and no commentary outside it. The file must be runnable \
             as-is: include every import the tests need.",
            framework = self.framework,
            language = self.framework.language(),
        )
    }

    /// Render the user prompt for a source file
    pub fn user_prompt(&self, source: &str, analysis: &CodeAnalysis) -> String {
        let mut prompt = String::new();

        prompt.push_str(&format!(
            "Generate {} test cases for the {} code below.\n\n",
            self.framework,
            analysis.language
        ));

        prompt.push_str("Requested test coverage:\n");
        for test_type in &self.test_types {
            prompt.push_str(&format!("- {}\n", test_type.prompt_description()));
        }
        prompt.push('\n');

        prompt.push_str(&format!("Code analysis: {}\n\n", analysis.summary));

        if !analysis.functions.is_empty() {
            prompt.push_str("Functions to cover:\n");
            for function in &analysis.functions {
                prompt.push_str(&format!("- {}\n", function.signature()));
                if let Some(doc) = &function.docstring {
                    // First line of the docstring is enough context
                    if let Some(first_line) = doc.lines().next() {
                        prompt.push_str(&format!("  ({})\n", first_line.trim()));
                    }
                }
            }
            prompt.push('\n');
        }

        if self.include_source {
            prompt.push_str(&format!(
                "Source code:\n```{}\n{}\n```\n",
                analysis.language.extension(),
                source.trim_end()
            ));
        }

        prompt
    }

    /// Build the full message sequence for the model
    pub fn build(&self, source: &str, analysis: &CodeAnalysis) -> Vec<GenerationMessage> {
        vec![
            GenerationMessage::system(self.system_prompt()),
            GenerationMessage::user(self.user_prompt(source, analysis)),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{CodeAnalyzer, SourceLanguage};

    fn sample_analysis() -> (String, CodeAnalysis) {
        let source = "def add(a: int, b: int) -> int:\n    \"\"\"Add two numbers.\"\"\"\n    return a + b\n";
        let analysis = CodeAnalyzer::new()
            .analyze(source, SourceLanguage::Python)
            .unwrap();
        (source.to_string(), analysis)
    }

    #[test]
    fn user_prompt_lists_signatures_and_coverage() {
        let (source, analysis) = sample_analysis();
        let prompt = PromptBuilder::new(TestFramework::Pytest)
            .with_test_types(&[TestType::Unit, TestType::Negative])
            .user_prompt(&source, &analysis);

        assert!(prompt.contains("add(a: int, b: int) -> int"));
        assert!(prompt.contains("unit tests covering"));
        assert!(prompt.contains("negative tests"));
        assert!(!prompt.contains("edge-case tests"));
        assert!(prompt.contains("```py"));
    }

    #[test]
    fn system_prompt_names_framework_and_language() {
        let prompt = PromptBuilder::new(TestFramework::Jest).system_prompt();
        assert!(prompt.contains("jest"));
        assert!(prompt.contains("javascript"));
    }

    #[test]
    fn without_source_omits_the_code_block() {
        let (source, analysis) = sample_analysis();
        let prompt = PromptBuilder::new(TestFramework::Pytest)
            .without_source()
            .user_prompt(&source, &analysis);
        assert!(!prompt.contains("```"));
    }

    #[test]
    fn build_emits_system_then_user() {
        let (source, analysis) = sample_analysis();
        let messages = PromptBuilder::new(TestFramework::Pytest).build(&source, &analysis);
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, crate::llm::MessageRole::System);
        assert_eq!(messages[1].role, crate::llm::MessageRole::User);
    }
}
