use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::llm_client::LlmError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Upstream(#[from] LlmError),

    /// The model replied, but not with a JSON object. The raw text is logged
    /// where the failure is detected and never carried into the response.
    #[error("Failed to parse model response as JSON")]
    MalformedModelOutput,

    #[error("{0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Upstream(_) | AppError::MalformedModelOutput | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::Validation(msg) => tracing::debug!("Validation error: {msg}"),
            AppError::Upstream(LlmError::Api { status, message }) => {
                tracing::error!("Inference backend returned {status}: {message}")
            }
            AppError::Upstream(e) => tracing::error!("Inference backend error: {e}"),
            AppError::MalformedModelOutput => tracing::error!("Model output rejected: {self}"),
            AppError::Internal(e) => tracing::error!("Internal error: {e:?}"),
        }

        let body = Json(json!({ "error": self.to_string() }));

        (self.status(), body).into_response()
    }
}
