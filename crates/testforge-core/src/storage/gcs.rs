//! Google Cloud Storage backend

use crate::error::{ForgeError, ForgeResult};
use crate::storage::ArtifactStore;
use async_trait::async_trait;
use reqwest::Client;
use tracing::instrument;

/// A parsed `gs://bucket/object` location
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GcsLocation {
    pub bucket: String,
    pub object: String,
}

impl GcsLocation {
    /// Parse a `gs://` URI. The bucket is everything up to the first `/`.
    pub fn parse(path: &str) -> ForgeResult<Self> {
        let rest = path.strip_prefix("gs://").ok_or_else(|| {
            ForgeError::invalid_input(
                "GCS path must start with gs://",
                Some("gcs_path".to_string()),
            )
        })?;

        let (bucket, object) = rest.split_once('/').ok_or_else(|| {
            ForgeError::invalid_input(
                "GCS path must name an object: gs://bucket/path/to/object",
                Some("gcs_path".to_string()),
            )
        })?;

        if bucket.is_empty() || object.is_empty() {
            return Err(ForgeError::invalid_input(
                "GCS path must name a bucket and an object",
                Some("gcs_path".to_string()),
            ));
        }

        Ok(Self {
            bucket: bucket.to_string(),
            object: object.to_string(),
        })
    }

    /// Render back to a `gs://` URI
    pub fn uri(&self) -> String {
        format!("gs://{}/{}", self.bucket, self.object)
    }
}

impl std::fmt::Display for GcsLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.uri())
    }
}

/// GCS store over the REST API.
///
/// Downloads address the object's own bucket; uploads land in the
/// configured output bucket. Authentication uses an OAuth bearer token
/// when one is configured; without a token only public objects work.
pub struct GcsStore {
    bucket: String,
    token: Option<String>,
    http_client: Client,
}

impl GcsStore {
    /// Create a store writing to `bucket`
    pub fn new(bucket: impl Into<String>, token: Option<String>) -> Self {
        Self {
            bucket: bucket.into(),
            token,
            http_client: Client::new(),
        }
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }
}

/// JSON API media-download URL. The object name is a single path segment,
/// so its slashes get percent-encoded too.
fn media_download_url(location: &GcsLocation) -> String {
    format!(
        "https://storage.googleapis.com/storage/v1/b/{}/o/{}",
        location.bucket,
        urlencoding::encode(&location.object)
    )
}

#[async_trait]
impl ArtifactStore for GcsStore {
    #[instrument(skip(self), level = "debug")]
    async fn fetch(&self, location: &str) -> ForgeResult<String> {
        let location = GcsLocation::parse(location)?;
        let url = media_download_url(&location);

        let response = self
            .authorize(self.http_client.get(&url))
            .query(&[("alt", "media")])
            .send()
            .await
            .map_err(|e| {
                ForgeError::storage(
                    format!("GCS download failed: {}", e),
                    Some(location.uri()),
                )
            })?;

        if !response.status().is_success() {
            let status = response.status();
            if status == reqwest::StatusCode::NOT_FOUND {
                return Err(ForgeError::not_found(format!(
                    "GCS object not found: {}",
                    location
                )));
            }
            return Err(ForgeError::storage(
                format!("GCS download failed with status {}", status),
                Some(location.uri()),
            ));
        }

        response.text().await.map_err(|e| {
            ForgeError::storage(
                format!("Failed to read GCS object body: {}", e),
                Some(location.uri()),
            )
        })
    }

    #[instrument(skip(self, content), level = "debug", fields(bytes = content.len()))]
    async fn store(&self, content: &str, object_name: &str) -> ForgeResult<String> {
        let url = format!(
            "https://storage.googleapis.com/upload/storage/v1/b/{}/o",
            self.bucket
        );

        let response = self
            .authorize(self.http_client.post(&url))
            .query(&[("uploadType", "media"), ("name", object_name)])
            .header("content-type", "text/plain; charset=utf-8")
            .body(content.to_string())
            .send()
            .await
            .map_err(|e| {
                ForgeError::storage(format!("GCS upload failed: {}", e), Some(url.clone()))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ForgeError::storage(
                format!("GCS upload failed with status {}: {}", status, body),
                Some(format!("gs://{}/{}", self.bucket, object_name)),
            ));
        }

        Ok(format!("gs://{}/{}", self.bucket, object_name))
    }
}
