use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::analytics::metrics::ComputationError;
use crate::documents::decode::DecodingError;
use crate::layout::pdf::RenderError;
use crate::llm_client::CompletionError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Every user-triggered action fails as a whole: the handler never returns
/// partial results alongside an error.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Computation error: {0}")]
    Computation(#[from] ComputationError),

    #[error("Decoding error: {0}")]
    Decoding(#[from] DecodingError),

    #[error("Completion error: {0}")]
    Completion(#[from] CompletionError),

    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Computation(e) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "COMPUTATION_ERROR",
                e.to_string(),
            ),
            AppError::Decoding(e) => {
                let status = match e {
                    DecodingError::UnsupportedFormat(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
                    _ => StatusCode::UNPROCESSABLE_ENTITY,
                };
                (status, "DECODING_ERROR", e.to_string())
            }
            AppError::Completion(e) => {
                tracing::warn!("Completion error: {e}");
                let status = match e {
                    CompletionError::RateLimited(_) => StatusCode::TOO_MANY_REQUESTS,
                    _ => StatusCode::BAD_GATEWAY,
                };
                (status, "COMPLETION_ERROR", e.to_string())
            }
            AppError::Render(e) => {
                tracing::error!("Render error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "RENDER_ERROR",
                    e.to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
