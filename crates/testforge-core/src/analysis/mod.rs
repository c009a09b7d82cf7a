//! Source code analysis
//!
//! Parses Python, JavaScript, and Java sources with tree-sitter and
//! extracts the function/class/import inventory the test generator
//! prompts with.

mod analyzer;
mod java;
mod javascript;
mod python;
mod types;

pub use analyzer::CodeAnalyzer;
pub use types::{
    ClassInfo, CodeAnalysis, FunctionInfo, ImportInfo, ParameterInfo, SourceLanguage,
};
