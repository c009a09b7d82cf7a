//! Test case generation
//!
//! Turns a [`CodeAnalysis`](crate::analysis::CodeAnalysis) and the original
//! source into a prompt, sends it to the model, and extracts a test file
//! from the response.

mod extract;
mod generator;
mod prompts;
mod types;

pub use extract::{count_test_cases, extract_code};
pub use generator::{GeneratedTests, TestGenerator};
pub use prompts::PromptBuilder;
pub use types::{TestFramework, TestType};
