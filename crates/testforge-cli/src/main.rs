//! Testforge CLI
//!
//! Generates test cases for source files from the command line:
//!
//! - `testforge analyze <file>` prints the extracted function inventory
//! - `testforge generate <file>` generates a test file with the model

mod args;
mod commands;

use args::{Cli, Commands};
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Set RUST_LOG=debug for verbose logging
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Analyze(args) => commands::analyze(cli.config.as_deref(), args).await,
        Commands::Generate(args) => commands::generate(cli.config.as_deref(), args).await,
    }
}
