//! Error types for testforge
//!
//! A single error enum covers all crates. Each variant carries the
//! contextual fields relevant to its failure domain so HTTP handlers and
//! the CLI can map errors without string matching.

mod constructors;
mod types;

pub use types::{ForgeError, ForgeResult};
