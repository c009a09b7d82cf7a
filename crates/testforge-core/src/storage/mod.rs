//! Artifact storage
//!
//! Sources can be fetched from Google Cloud Storage and generated test
//! files are persisted either back to GCS or to a local directory.

mod gcs;
mod local;

pub use gcs::{GcsLocation, GcsStore};
pub use local::LocalStore;

use crate::error::ForgeResult;
use async_trait::async_trait;

/// Unified interface over artifact backends
#[async_trait]
pub trait ArtifactStore: Send + Sync {
    /// Fetch the content at a location (a `gs://` URI or a local path)
    async fn fetch(&self, location: &str) -> ForgeResult<String>;

    /// Store content under an object name, returning the stored URI
    async fn store(&self, content: &str, object_name: &str) -> ForgeResult<String>;
}
