//! Error to HTTP response mapping

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use testforge_core::ForgeError;

/// Wrapper that maps [`ForgeError`] onto HTTP status codes
pub struct ApiError(pub ForgeError);

impl From<ForgeError> for ApiError {
    fn from(err: ForgeError) -> Self {
        Self(err)
    }
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match &self.0 {
            ForgeError::InvalidInput { .. }
            | ForgeError::Analysis { .. }
            | ForgeError::Json { .. } => StatusCode::BAD_REQUEST,
            ForgeError::NotFound { .. } => StatusCode::NOT_FOUND,
            ForgeError::Llm { .. } | ForgeError::Http { .. } => StatusCode::BAD_GATEWAY,
            ForgeError::Config { .. }
            | ForgeError::Storage { .. }
            | ForgeError::Io { .. }
            | ForgeError::Other { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn label(&self) -> &'static str {
        match &self.0 {
            ForgeError::Analysis { .. } => "Code analysis failed",
            ForgeError::InvalidInput { .. } | ForgeError::Json { .. } => "Invalid request",
            ForgeError::NotFound { .. } => "Not found",
            ForgeError::Llm { .. } | ForgeError::Http { .. } => "Generation failed",
            _ => "Internal server error",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self.0, "request failed");
        } else {
            tracing::warn!(error = %self.0, "request rejected");
        }
        let body = json!({
            "error": self.label(),
            "details": self.0.to_string(),
        });
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping() {
        assert_eq!(
            ApiError(ForgeError::invalid_input("x", None)).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError(ForgeError::analysis("x", None)).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError(ForgeError::llm("boom")).status(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            ApiError(ForgeError::not_found("gone")).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError(ForgeError::storage("disk", None)).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
