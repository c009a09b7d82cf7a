//! Analysis result types

use crate::error::ForgeError;
use serde::{Deserialize, Serialize};

/// Languages the analyzer understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceLanguage {
    Python,
    JavaScript,
    Java,
}

impl SourceLanguage {
    /// Language name used in API payloads and prompts
    pub fn name(&self) -> &'static str {
        match self {
            SourceLanguage::Python => "python",
            SourceLanguage::JavaScript => "javascript",
            SourceLanguage::Java => "java",
        }
    }

    /// Canonical source file extension
    pub fn extension(&self) -> &'static str {
        match self {
            SourceLanguage::Python => "py",
            SourceLanguage::JavaScript => "js",
            SourceLanguage::Java => "java",
        }
    }

    /// Guess the language from a file extension
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "py" => Some(SourceLanguage::Python),
            "js" | "mjs" | "cjs" | "jsx" => Some(SourceLanguage::JavaScript),
            "java" => Some(SourceLanguage::Java),
            _ => None,
        }
    }
}

impl std::fmt::Display for SourceLanguage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for SourceLanguage {
    type Err = ForgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "python" | "py" => Ok(SourceLanguage::Python),
            "javascript" | "js" => Ok(SourceLanguage::JavaScript),
            "java" => Ok(SourceLanguage::Java),
            other => Err(ForgeError::invalid_input(
                format!("Unsupported language: {}", other),
                Some("language".to_string()),
            )),
        }
    }
}

/// A function or method parameter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterInfo {
    /// Parameter name (including splat markers like `*args`)
    pub name: String,
    /// Declared type, when the source has one
    pub type_hint: Option<String>,
    /// Whether the parameter has a default value
    pub has_default: bool,
}

impl ParameterInfo {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_hint: None,
            has_default: false,
        }
    }
}

/// An extracted function or method
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunctionInfo {
    /// Bare name
    pub name: String,
    /// `Class.method` for methods, absent for free functions
    pub qualified_name: Option<String>,
    /// Parameters in declaration order
    pub parameters: Vec<ParameterInfo>,
    /// Declared return type, when the source has one
    pub return_type: Option<String>,
    /// Whether the function is async
    pub is_async: bool,
    /// Whether the function is a method on a class
    pub is_method: bool,
    /// Decorators (Python) or modifiers (Java)
    pub decorators: Vec<String>,
    /// 1-based start line
    pub start_line: u32,
    /// 1-based end line
    pub end_line: u32,
    /// Leading docstring or doc comment, when present
    pub docstring: Option<String>,
}

impl FunctionInfo {
    /// Render a one-line signature for prompts
    pub fn signature(&self) -> String {
        let params = self
            .parameters
            .iter()
            .map(|p| {
                let mut rendered = p.name.clone();
                if let Some(ty) = &p.type_hint {
                    rendered = format!("{}: {}", rendered, ty);
                }
                if p.has_default {
                    rendered.push_str(" = ...");
                }
                rendered
            })
            .collect::<Vec<_>>()
            .join(", ");

        let name = self.qualified_name.as_deref().unwrap_or(&self.name);
        let mut signature = format!("{}({})", name, params);
        if let Some(ret) = &self.return_type {
            signature.push_str(&format!(" -> {}", ret));
        }
        if self.is_async {
            signature = format!("async {}", signature);
        }
        signature
    }
}

/// An extracted class
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassInfo {
    /// Class name
    pub name: String,
    /// Base class, when declared
    pub extends: Option<String>,
    /// Method names in declaration order
    pub methods: Vec<String>,
    /// 1-based start line
    pub start_line: u32,
    /// 1-based end line
    pub end_line: u32,
}

/// An extracted import
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportInfo {
    /// Imported module or path
    pub source: String,
    /// Named items pulled from the module
    pub names: Vec<String>,
}

/// Complete analysis of one source file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CodeAnalysis {
    /// Language the source was parsed as
    pub language: SourceLanguage,
    /// Extracted functions and methods
    pub functions: Vec<FunctionInfo>,
    /// Extracted classes
    pub classes: Vec<ClassInfo>,
    /// Extracted imports
    pub imports: Vec<ImportInfo>,
    /// Number of source lines
    pub line_count: usize,
    /// Human-readable digest used in prompts and API responses
    pub summary: String,
}

impl CodeAnalysis {
    /// Build the summary string from the extracted inventory
    pub(crate) fn build_summary(&mut self) {
        let async_count = self.functions.iter().filter(|f| f.is_async).count();
        let method_count = self.functions.iter().filter(|f| f.is_method).count();

        let mut summary = format!(
            "{} source, {} lines: {} function(s) ({} method(s), {} async), {} class(es), {} import(s).",
            self.language,
            self.line_count,
            self.functions.len(),
            method_count,
            async_count,
            self.classes.len(),
            self.imports.len(),
        );

        if !self.functions.is_empty() {
            let names = self
                .functions
                .iter()
                .map(|f| f.qualified_name.as_deref().unwrap_or(&f.name).to_string())
                .collect::<Vec<_>>()
                .join(", ");
            summary.push_str(&format!(" Functions: {}.", names));
        }
        if !self.classes.is_empty() {
            let names = self
                .classes
                .iter()
                .map(|c| c.name.clone())
                .collect::<Vec<_>>()
                .join(", ");
            summary.push_str(&format!(" Classes: {}.", names));
        }

        self.summary = summary;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn language_parses_aliases() {
        assert_eq!("py".parse::<SourceLanguage>().unwrap(), SourceLanguage::Python);
        assert_eq!(
            "JavaScript".parse::<SourceLanguage>().unwrap(),
            SourceLanguage::JavaScript
        );
        assert!("ruby".parse::<SourceLanguage>().is_err());
    }

    #[test]
    fn signature_rendering() {
        let info = FunctionInfo {
            name: "add".to_string(),
            qualified_name: None,
            parameters: vec![
                ParameterInfo {
                    name: "a".to_string(),
                    type_hint: Some("int".to_string()),
                    has_default: false,
                },
                ParameterInfo {
                    name: "b".to_string(),
                    type_hint: Some("int".to_string()),
                    has_default: true,
                },
            ],
            return_type: Some("int".to_string()),
            is_async: false,
            is_method: false,
            decorators: Vec::new(),
            start_line: 1,
            end_line: 2,
            docstring: None,
        };
        assert_eq!(info.signature(), "add(a: int, b: int = ...) -> int");
    }
}
