//! Service-level configuration loading

use crate::config::provider::ProviderConfig;
use crate::error::{ForgeError, ForgeResult};
use crate::llm::ProviderKind;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

/// Which artifact store backs generated test files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Google Cloud Storage
    Gcs,
    /// Local filesystem directory
    Local,
}

impl std::str::FromStr for StorageBackend {
    type Err = ForgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "gcs" => Ok(StorageBackend::Gcs),
            "local" => Ok(StorageBackend::Local),
            other => Err(ForgeError::config(format!(
                "Unknown storage backend: {}",
                other
            ))),
        }
    }
}

/// Top-level configuration for the testforge service
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// GCP project id (required for Vertex AI)
    pub project_id: Option<String>,
    /// GCP region for Vertex AI
    pub location: String,
    /// GCS bucket for generated test files
    pub bucket: Option<String>,
    /// Object prefix for stored test files
    pub output_prefix: String,
    /// HTTP listen port
    pub port: u16,
    /// Artifact storage backend
    pub storage: StorageBackend,
    /// Root directory for the local storage backend
    pub local_root: PathBuf,
    /// Model provider endpoint family
    pub provider: ProviderKind,
    /// Model name passed to the provider
    pub model: String,
    /// Sampling temperature
    pub temperature: Option<f32>,
    /// Output token cap
    pub max_output_tokens: Option<u32>,
    /// Provider connection settings
    pub provider_config: ProviderConfig,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            project_id: None,
            location: "us-central1".to_string(),
            bucket: None,
            output_prefix: "generated_tests".to_string(),
            port: 8080,
            storage: StorageBackend::Local,
            local_root: PathBuf::from("generated_tests"),
            provider: ProviderKind::Gemini,
            model: "gemini-1.5-pro".to_string(),
            temperature: Some(0.2),
            max_output_tokens: Some(8192),
            provider_config: ProviderConfig::default(),
        }
    }
}

impl ServiceConfig {
    /// Load configuration: defaults, then an optional TOML file, then
    /// environment variables. A `.env` file is honored if present.
    pub fn load(config_file: Option<&Path>) -> ForgeResult<Self> {
        dotenv::dotenv().ok();

        let mut config = match config_file {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env();
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> ForgeResult<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::from(path))
            .build()
            .map_err(|e| {
                ForgeError::config_with_context(
                    format!("Failed to read config file: {}", e),
                    path.display().to_string(),
                )
            })?;

        settings.try_deserialize().map_err(|e| {
            ForgeError::config_with_context(
                format!("Invalid config file: {}", e),
                path.display().to_string(),
            )
        })
    }

    /// Overlay settings from environment variables
    pub fn apply_env(&mut self) {
        if let Ok(project) = env::var("GCP_PROJECT_ID") {
            self.project_id = Some(project);
        }
        if let Ok(location) = env::var("GCP_LOCATION") {
            self.location = location;
        }
        if let Ok(bucket) = env::var("GCS_BUCKET") {
            self.bucket = Some(bucket);
            self.storage = StorageBackend::Gcs;
        }
        if let Ok(port) = env::var("PORT") {
            if let Ok(port) = port.parse() {
                self.port = port;
            }
        }
        if let Ok(provider) = env::var("TESTFORGE_PROVIDER") {
            if let Ok(kind) = provider.parse() {
                self.provider = kind;
            }
        }
        if let Ok(model) = env::var("TESTFORGE_MODEL") {
            self.model = model;
        }
        if let Ok(prefix) = env::var("TESTFORGE_OUTPUT_PREFIX") {
            self.output_prefix = prefix;
        }
        if let Ok(storage) = env::var("TESTFORGE_STORAGE") {
            if let Ok(backend) = storage.parse() {
                self.storage = backend;
            }
        }
        if let Ok(root) = env::var("TESTFORGE_LOCAL_ROOT") {
            self.local_root = PathBuf::from(root);
        }
        if let Ok(api_key) = env::var("GEMINI_API_KEY") {
            self.provider_config.api_key = Some(api_key);
        }
        if let Ok(token) = env::var("GOOGLE_ACCESS_TOKEN") {
            self.provider_config.access_token = Some(token);
        }
    }

    /// Validate the assembled configuration
    pub fn validate(&self) -> ForgeResult<()> {
        if self.port == 0 {
            return Err(ForgeError::config("Listen port must be nonzero"));
        }
        if self.model.trim().is_empty() {
            return Err(ForgeError::config("Model name must not be empty"));
        }
        if self.storage == StorageBackend::Gcs && self.bucket.is_none() {
            return Err(ForgeError::config(
                "GCS storage selected but no bucket configured (set GCS_BUCKET)",
            ));
        }
        if self.provider == ProviderKind::Vertex && self.project_id.is_none() {
            return Err(ForgeError::config(
                "Vertex AI selected but no project configured (set GCP_PROJECT_ID)",
            ));
        }
        self.provider_config
            .validate()
            .map_err(ForgeError::config)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = ServiceConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.port, 8080);
        assert_eq!(config.output_prefix, "generated_tests");
    }

    #[test]
    fn gcs_storage_requires_bucket() {
        let config = ServiceConfig {
            storage: StorageBackend::Gcs,
            bucket: None,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn vertex_requires_project() {
        let config = ServiceConfig {
            provider: ProviderKind::Vertex,
            project_id: None,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = ServiceConfig {
            provider: ProviderKind::Vertex,
            project_id: Some("my-project".to_string()),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn storage_backend_parses() {
        assert_eq!("gcs".parse::<StorageBackend>().unwrap(), StorageBackend::Gcs);
        assert_eq!(
            "LOCAL".parse::<StorageBackend>().unwrap(),
            StorageBackend::Local
        );
        assert!("s3".parse::<StorageBackend>().is_err());
    }
}
