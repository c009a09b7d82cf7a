//! Analyzer entry point

use crate::analysis::types::{ClassInfo, CodeAnalysis, FunctionInfo, ImportInfo, SourceLanguage};
use crate::analysis::{java, javascript, python};
use crate::error::{ForgeError, ForgeResult};
use tracing::instrument;

/// Raw per-language extraction output
#[derive(Debug, Default)]
pub(super) struct Extraction {
    pub functions: Vec<FunctionInfo>,
    pub classes: Vec<ClassInfo>,
    pub imports: Vec<ImportInfo>,
    pub had_errors: bool,
}

/// Parses source files and extracts their function inventory.
///
/// Stateless; a fresh tree-sitter parser is created per call so the
/// analyzer can be shared across request handlers.
#[derive(Debug, Clone, Copy, Default)]
pub struct CodeAnalyzer;

impl CodeAnalyzer {
    /// Create a new analyzer
    pub fn new() -> Self {
        Self
    }

    /// Analyze a source file.
    ///
    /// Sources with syntax errors still return whatever inventory could be
    /// recovered; a source yielding nothing at all is rejected.
    #[instrument(skip(self, source), fields(language = %language, bytes = source.len()))]
    pub fn analyze(
        &self,
        source: &str,
        language: SourceLanguage,
    ) -> ForgeResult<CodeAnalysis> {
        if source.trim().is_empty() {
            return Err(ForgeError::invalid_input(
                "Source code is empty",
                Some("source_code".to_string()),
            ));
        }

        let extraction = match language {
            SourceLanguage::Python => python::extract(source)?,
            SourceLanguage::JavaScript => javascript::extract(source)?,
            SourceLanguage::Java => java::extract(source)?,
        };

        if extraction.had_errors
            && extraction.functions.is_empty()
            && extraction.classes.is_empty()
        {
            return Err(ForgeError::analysis(
                format!("Source does not parse as {}", language),
                Some(language.name().to_string()),
            ));
        }

        let mut analysis = CodeAnalysis {
            language,
            functions: extraction.functions,
            classes: extraction.classes,
            imports: extraction.imports,
            line_count: source.lines().count(),
            summary: String::new(),
        };
        analysis.build_summary();

        tracing::debug!(
            functions = analysis.functions.len(),
            classes = analysis.classes.len(),
            recovered_from_errors = extraction.had_errors,
            "analysis complete"
        );
        Ok(analysis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_source_is_invalid_input() {
        let err = CodeAnalyzer::new()
            .analyze("   \n  ", SourceLanguage::Python)
            .unwrap_err();
        assert!(matches!(err, ForgeError::InvalidInput { .. }));
    }

    #[test]
    fn wrong_language_source_is_an_analysis_error() {
        let err = CodeAnalyzer::new()
            .analyze("}}} ??? {{{", SourceLanguage::Python)
            .unwrap_err();
        assert!(matches!(err, ForgeError::Analysis { .. }));
    }

    #[test]
    fn summary_mentions_the_inventory() {
        let analysis = CodeAnalyzer::new()
            .analyze(
                "def first():\n    pass\n\ndef second():\n    pass\n",
                SourceLanguage::Python,
            )
            .unwrap();
        assert_eq!(analysis.functions.len(), 2);
        assert!(analysis.summary.contains("2 function(s)"));
        assert!(analysis.summary.contains("first"));
        assert!(analysis.summary.contains("second"));
    }

    #[test]
    fn partially_broken_source_still_yields_inventory() {
        let source = "def good():\n    pass\n\ndef broken(:\n";
        let analysis = CodeAnalyzer::new()
            .analyze(source, SourceLanguage::Python)
            .unwrap();
        assert!(analysis.functions.iter().any(|f| f.name == "good"));
    }
}
