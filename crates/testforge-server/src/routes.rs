//! API route registration

use crate::handlers;
use crate::state::AppState;
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;

/// Build the application router
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/generate-tests", post(handlers::generate_tests))
        .route("/analyze-code", post(handlers::analyze_code))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use serde_json::{json, Value};
    use std::sync::Arc;
    use testforge_core::{
        ArtifactStore, LlmClient, LocalStore, ModelParams, ProviderConfig, ProviderKind,
        ServiceConfig, TestGenerator, TestPipeline,
    };
    use tower::ServiceExt;

    /// Router over a pipeline that would fail loudly if the model were
    /// ever actually called (no network leaves these tests).
    fn test_router(tmp: &std::path::Path) -> Router {
        let client = LlmClient::new(
            ProviderKind::Gemini,
            ProviderConfig::new().with_api_key("test-key"),
            ModelParams::for_model("gemini-1.5-pro"),
            None,
            "us-central1".to_string(),
        )
        .unwrap();
        let store: Arc<dyn ArtifactStore> = Arc::new(LocalStore::new(tmp));
        let pipeline = TestPipeline::new(TestGenerator::new(client), store, "generated_tests");
        router(Arc::new(AppState::new(ServiceConfig::default(), pipeline)))
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn health_reports_service_name() {
        let tmp = tempfile::tempdir().unwrap();
        let response = test_router(tmp.path())
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["service"], "testforge");
    }

    #[tokio::test]
    async fn analyze_code_returns_function_inventory() {
        let tmp = tempfile::tempdir().unwrap();
        let request = post_json(
            "/analyze-code",
            json!({
                "source_code": "def add(a, b):\n    return a + b\n",
                "language": "python"
            }),
        );
        let response = test_router(tmp.path()).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["analysis"]["functions"][0]["name"], "add");
        assert!(body["analysis"]["summary"]
            .as_str()
            .unwrap()
            .contains("1 function(s)"));
    }

    #[tokio::test]
    async fn generate_tests_without_source_is_a_400() {
        let tmp = tempfile::tempdir().unwrap();
        let request = post_json("/generate-tests", json!({"language": "python"}));
        let response = test_router(tmp.path()).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert!(body["details"]
            .as_str()
            .unwrap()
            .contains("source_code or gcs_path"));
    }

    #[tokio::test]
    async fn unknown_framework_is_a_400() {
        let tmp = tempfile::tempdir().unwrap();
        let request = post_json(
            "/generate-tests",
            json!({
                "source_code": "def f():\n    pass\n",
                "framework": "rspec"
            }),
        );
        let response = test_router(tmp.path()).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn unparseable_source_is_a_400() {
        let tmp = tempfile::tempdir().unwrap();
        let request = post_json(
            "/analyze-code",
            json!({
                "source_code": "}}} ??? {{{",
                "language": "python"
            }),
        );
        let response = test_router(tmp.path()).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["error"], "Code analysis failed");
    }
}
