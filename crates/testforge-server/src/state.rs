//! Shared application state

use testforge_core::{ServiceConfig, TestPipeline};

/// State shared across request handlers
pub struct AppState {
    pub config: ServiceConfig,
    pub pipeline: TestPipeline,
}

impl AppState {
    pub fn new(config: ServiceConfig, pipeline: TestPipeline) -> Self {
        Self { config, pipeline }
    }
}
