//! Request handlers

use crate::errors::ApiError;
use crate::state::AppState;
use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use testforge_core::{GenerateRequest, SourceLanguage, TestFramework, TestType};
use uuid::Uuid;

/// Body accepted by `/generate-tests` and `/analyze-code`.
///
/// String fields are parsed explicitly so unknown values come back as a
/// 400 with a useful message instead of a deserialization failure.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct GenerateTestsBody {
    pub source_code: Option<String>,
    pub gcs_path: Option<String>,
    pub language: Option<String>,
    pub test_types: Option<Vec<String>>,
    pub framework: Option<String>,
}

impl GenerateTestsBody {
    fn language(&self) -> Result<SourceLanguage, ApiError> {
        match &self.language {
            Some(language) => Ok(language.parse()?),
            None => Ok(SourceLanguage::Python),
        }
    }

    fn framework(&self) -> Result<TestFramework, ApiError> {
        match &self.framework {
            Some(framework) => Ok(framework.parse()?),
            None => Ok(TestFramework::Pytest),
        }
    }

    fn test_types(&self) -> Result<Vec<TestType>, ApiError> {
        match &self.test_types {
            Some(names) => names
                .iter()
                .map(|name| name.parse().map_err(ApiError::from))
                .collect(),
            None => Ok(TestType::all()),
        }
    }
}

/// `GET /health`
pub async fn health() -> Json<Value> {
    Json(json!({"status": "healthy", "service": "testforge"}))
}

/// `POST /generate-tests`
pub async fn generate_tests(
    State(state): State<Arc<AppState>>,
    Json(body): Json<GenerateTestsBody>,
) -> Result<Json<Value>, ApiError> {
    let request_id = Uuid::new_v4();
    tracing::info!(%request_id, "generate-tests request received");

    let request = GenerateRequest {
        source_code: body.source_code.clone(),
        gcs_path: body.gcs_path.clone(),
        language: body.language()?,
        test_types: body.test_types()?,
        framework: body.framework()?,
    };

    let outcome = state.pipeline.run(request).await?;

    Ok(Json(json!({
        "success": true,
        "generated_tests": outcome.test_code,
        "output_path": outcome.output_uri,
        "metadata": {
            "functions_analyzed": outcome.functions_analyzed,
            "test_cases_generated": outcome.test_cases_generated,
            "test_types": outcome.test_types,
            "framework": outcome.framework,
            "timestamp": outcome.timestamp,
            "model": outcome.model,
            "usage": outcome.usage,
        },
        "analysis_summary": outcome.analysis_summary,
    })))
}

/// `POST /analyze-code`
pub async fn analyze_code(
    State(state): State<Arc<AppState>>,
    Json(body): Json<GenerateTestsBody>,
) -> Result<Json<Value>, ApiError> {
    let analysis = state
        .pipeline
        .analyze_only(
            body.source_code.as_deref(),
            body.gcs_path.as_deref(),
            body.language()?,
        )
        .await?;

    Ok(Json(json!({
        "success": true,
        "analysis": analysis,
    })))
}
