//! Local filesystem backend

use crate::error::{ForgeError, ForgeResult};
use crate::storage::ArtifactStore;
use async_trait::async_trait;
use std::path::{Component, Path, PathBuf};
use tracing::instrument;

/// Stores artifacts under a root directory
pub struct LocalStore {
    root: PathBuf,
}

impl LocalStore {
    /// Create a store rooted at `root` (created lazily on first write)
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn resolve(&self, object_name: &str) -> ForgeResult<PathBuf> {
        let relative = Path::new(object_name);
        if relative.is_absolute()
            || relative
                .components()
                .any(|c| matches!(c, Component::ParentDir))
        {
            return Err(ForgeError::invalid_input(
                format!("Object name must be a relative path: {}", object_name),
                Some("object_name".to_string()),
            ));
        }
        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl ArtifactStore for LocalStore {
    #[instrument(skip(self), level = "debug")]
    async fn fetch(&self, location: &str) -> ForgeResult<String> {
        if location.starts_with("gs://") {
            return Err(ForgeError::storage(
                "Fetching gs:// sources requires the GCS storage backend",
                Some(location.to_string()),
            ));
        }
        // Reads are confined to the root the same way writes are
        let path = self.resolve(location)?;
        tokio::fs::read_to_string(&path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ForgeError::not_found(format!("File not found: {}", location))
            } else {
                ForgeError::io_with_path(e.to_string(), path.display().to_string())
            }
        })
    }

    async fn store(&self, content: &str, object_name: &str) -> ForgeResult<String> {
        let path = self.resolve(object_name)?;
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| ForgeError::io_with_path(e.to_string(), parent.display().to_string()))?;
        }
        tokio::fs::write(&path, content)
            .await
            .map_err(|e| ForgeError::io_with_path(e.to_string(), path.display().to_string()))?;
        Ok(path.display().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn stores_and_fetches_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::new(dir.path());

        store
            .store("def test_x():\n    pass\n", "out/20240101_tests.py")
            .await
            .unwrap();
        let content = store.fetch("out/20240101_tests.py").await.unwrap();
        assert!(content.contains("def test_x"));
    }

    #[tokio::test]
    async fn rejects_path_traversal() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::new(dir.path());
        let err = store.store("x", "../escape.py").await.unwrap_err();
        assert!(matches!(err, ForgeError::InvalidInput { .. }));
    }

    #[tokio::test]
    async fn fetch_is_confined_to_the_root() {
        let outside = tempfile::tempdir().unwrap();
        let secret = outside.path().join("secret.txt");
        tokio::fs::write(&secret, "not yours").await.unwrap();

        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::new(dir.path());

        let err = store.fetch(secret.to_str().unwrap()).await.unwrap_err();
        assert!(matches!(err, ForgeError::InvalidInput { .. }));
        let err = store.fetch("../secret.txt").await.unwrap_err();
        assert!(matches!(err, ForgeError::InvalidInput { .. }));
    }

    #[tokio::test]
    async fn missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::new(dir.path());
        let err = store.fetch("nope.py").await.unwrap_err();
        assert!(matches!(err, ForgeError::NotFound { .. }));
    }

    #[tokio::test]
    async fn gs_paths_are_refused() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::new(dir.path());
        let err = store.fetch("gs://bucket/file.py").await.unwrap_err();
        assert!(matches!(err, ForgeError::Storage { .. }));
    }
}
