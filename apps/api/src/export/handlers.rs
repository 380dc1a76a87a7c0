//! Axum route handlers for the export buttons shared by every view.
//!
//! Both endpoints take the generated text exactly as displayed. The PDF path
//! paginates it; the markdown path returns it byte for byte.

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use tracing::info;

use crate::errors::AppError;
use crate::layout::export_pdf;
use crate::state::AppState;

const DEFAULT_FILE_STEM: &str = "document";

#[derive(Debug, Deserialize)]
pub struct ExportRequest {
    pub content: String,
    /// Download name without extension. Defaults to `document`.
    #[serde(default)]
    pub file_stem: Option<String>,
}

/// POST /api/v1/export/pdf
pub async fn handle_export_pdf(
    State(state): State<AppState>,
    Json(request): Json<ExportRequest>,
) -> Result<Response, AppError> {
    let stem = sanitize_file_stem(request.file_stem.as_deref());
    let bytes = export_pdf(request.content, state.page_geometry).await?;
    info!("Exported {stem}.pdf ({} bytes)", bytes.len());

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (header::CONTENT_DISPOSITION, attachment(&stem, "pdf")),
        ],
        bytes,
    )
        .into_response())
}

/// POST /api/v1/export/markdown
pub async fn handle_export_markdown(Json(request): Json<ExportRequest>) -> Response {
    let stem = sanitize_file_stem(request.file_stem.as_deref());
    (
        [
            (header::CONTENT_TYPE, "text/markdown; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, attachment(&stem, "md")),
        ],
        request.content,
    )
        .into_response()
}

fn attachment(stem: &str, extension: &str) -> String {
    format!("attachment; filename=\"{stem}.{extension}\"")
}

/// Keeps ASCII alphanumerics, `-` and `_`; anything else is dropped.
fn sanitize_file_stem(stem: Option<&str>) -> String {
    let cleaned: String = stem
        .unwrap_or_default()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_'))
        .collect();
    if cleaned.is_empty() {
        DEFAULT_FILE_STEM.to_string()
    } else {
        cleaned
    }
}
