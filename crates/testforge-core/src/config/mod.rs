//! Configuration for the testforge service
//!
//! Configuration is layered: built-in defaults, then an optional TOML file,
//! then environment variables. The environment names
//! (`GCP_PROJECT_ID`, `GCP_LOCATION`, `GCS_BUCKET`, `PORT`) match the
//! deployment environment of the hosted service.

mod provider;
mod service;

pub use provider::{ProviderConfig, TimeoutConfig};
pub use service::{ServiceConfig, StorageBackend};
