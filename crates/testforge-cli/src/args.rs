//! CLI argument definitions

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "testforge", about = "AI-driven test case generator", version)]
pub struct Cli {
    /// Path to a TOML configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Analyze a source file without generating tests
    Analyze(AnalyzeArgs),
    /// Generate a test file for a source file
    Generate(GenerateArgs),
}

#[derive(Debug, Args)]
pub struct AnalyzeArgs {
    /// Source file to analyze
    pub file: PathBuf,

    /// Source language (inferred from the extension when omitted)
    #[arg(long)]
    pub language: Option<String>,
}

#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// Source file to generate tests for
    pub file: PathBuf,

    /// Source language (inferred from the extension when omitted)
    #[arg(long)]
    pub language: Option<String>,

    /// Target test framework (defaults to the language's usual choice)
    #[arg(long)]
    pub framework: Option<String>,

    /// Test categories to request (unit, edge, negative)
    #[arg(long, value_delimiter = ',')]
    pub test_types: Vec<String>,

    /// Directory to write the generated test file into
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Print the generated tests to stdout instead of just the path
    #[arg(long)]
    pub stdout: bool,
}
