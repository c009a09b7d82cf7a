//! Test generation vocabulary

use crate::analysis::SourceLanguage;
use crate::error::ForgeError;
use serde::{Deserialize, Serialize};

/// Categories of test cases the generator can be asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestType {
    /// Typical-behavior tests
    Unit,
    /// Boundary-condition tests
    Edge,
    /// Invalid-input and error-path tests
    Negative,
}

impl TestType {
    /// All test types, in the order the hosted service used
    pub fn all() -> Vec<TestType> {
        vec![TestType::Unit, TestType::Edge, TestType::Negative]
    }

    /// Name used in API payloads
    pub fn name(&self) -> &'static str {
        match self {
            TestType::Unit => "unit",
            TestType::Edge => "edge",
            TestType::Negative => "negative",
        }
    }

    /// Instruction line used when prompting the model
    pub fn prompt_description(&self) -> &'static str {
        match self {
            TestType::Unit => "unit tests covering the typical behavior of each function",
            TestType::Edge => {
                "edge-case tests for boundary conditions (empty inputs, extremes, off-by-one)"
            }
            TestType::Negative => {
                "negative tests for invalid inputs, error paths, and raised exceptions"
            }
        }
    }
}

impl std::fmt::Display for TestType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for TestType {
    type Err = ForgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "unit" => Ok(TestType::Unit),
            "edge" | "edge-case" | "edge_case" => Ok(TestType::Edge),
            "negative" => Ok(TestType::Negative),
            other => Err(ForgeError::invalid_input(
                format!("Unknown test type: {}", other),
                Some("test_types".to_string()),
            )),
        }
    }
}

/// Target test frameworks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestFramework {
    Pytest,
    Unittest,
    Jest,
    Junit,
}

impl TestFramework {
    /// Name used in API payloads and prompts
    pub fn name(&self) -> &'static str {
        match self {
            TestFramework::Pytest => "pytest",
            TestFramework::Unittest => "unittest",
            TestFramework::Jest => "jest",
            TestFramework::Junit => "junit",
        }
    }

    /// The language this framework tests
    pub fn language(&self) -> SourceLanguage {
        match self {
            TestFramework::Pytest | TestFramework::Unittest => SourceLanguage::Python,
            TestFramework::Jest => SourceLanguage::JavaScript,
            TestFramework::Junit => SourceLanguage::Java,
        }
    }

    /// Whether the framework can test the given source language
    pub fn supports(&self, language: SourceLanguage) -> bool {
        self.language() == language
    }

    /// Extension for generated test files
    pub fn file_extension(&self) -> &'static str {
        match self {
            TestFramework::Pytest | TestFramework::Unittest => "py",
            TestFramework::Jest => "test.js",
            TestFramework::Junit => "java",
        }
    }

    /// Default framework for a language
    pub fn default_for(language: SourceLanguage) -> Self {
        match language {
            SourceLanguage::Python => TestFramework::Pytest,
            SourceLanguage::JavaScript => TestFramework::Jest,
            SourceLanguage::Java => TestFramework::Junit,
        }
    }
}

impl std::fmt::Display for TestFramework {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for TestFramework {
    type Err = ForgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pytest" => Ok(TestFramework::Pytest),
            "unittest" => Ok(TestFramework::Unittest),
            "jest" => Ok(TestFramework::Jest),
            "junit" => Ok(TestFramework::Junit),
            other => Err(ForgeError::invalid_input(
                format!("Unknown framework: {}", other),
                Some("framework".to_string()),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn framework_language_fit() {
        assert!(TestFramework::Pytest.supports(SourceLanguage::Python));
        assert!(!TestFramework::Junit.supports(SourceLanguage::Python));
        assert_eq!(
            TestFramework::default_for(SourceLanguage::JavaScript),
            TestFramework::Jest
        );
    }

    #[test]
    fn vocabulary_parses() {
        assert_eq!("edge".parse::<TestType>().unwrap(), TestType::Edge);
        assert_eq!("Pytest".parse::<TestFramework>().unwrap(), TestFramework::Pytest);
        assert!("rspec".parse::<TestFramework>().is_err());
    }
}
