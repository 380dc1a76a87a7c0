//! Axum route handlers for the Document Processing view.

use axum::extract::{Multipart, State};
use axum::Json;
use bytes::Bytes;
use serde::Serialize;
use tracing::info;

use crate::documents::decode::extract_text;
use crate::documents::prompts::ProcessType;
use crate::errors::AppError;
use crate::generation::{dispatch, GeneratedText, GenerationRequest};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ExtractResponse {
    pub filename: String,
    pub text: String,
    pub char_count: usize,
}

#[derive(Debug, Serialize)]
pub struct ProcessResponse {
    pub filename: String,
    pub process_type: ProcessType,
    pub result: GeneratedText,
}

/// Fields read from a document upload form.
struct UploadForm {
    filename: String,
    bytes: Bytes,
    process_type: Option<String>,
}

/// POST /api/v1/documents/extract
///
/// Multipart body with a `file` part. Returns the extracted plain text.
pub async fn handle_extract(multipart: Multipart) -> Result<Json<ExtractResponse>, AppError> {
    let form = read_upload_form(multipart).await?;
    let text = decode_upload(form.filename.clone(), form.bytes).await?;

    Ok(Json(ExtractResponse {
        filename: form.filename,
        char_count: text.chars().count(),
        text,
    }))
}

/// POST /api/v1/documents/process
///
/// Multipart body with a `file` part and a `process_type` text part
/// ("Smart Summary", "Key Points Extraction", "Action Items", "Full Analysis").
pub async fn handle_process(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<ProcessResponse>, AppError> {
    let form = read_upload_form(multipart).await?;

    let label = form
        .process_type
        .ok_or_else(|| AppError::Validation("process_type field is required".to_string()))?;
    let process_type = ProcessType::from_label(&label)
        .ok_or_else(|| AppError::Validation(format!("Unknown process_type '{label}'")))?;

    let text_content = decode_upload(form.filename.clone(), form.bytes).await?;
    info!(
        "Processing {} ({} chars) as {}",
        form.filename,
        text_content.len(),
        process_type.label()
    );

    let request = GenerationRequest::DocumentProcessing {
        text_content,
        process_type,
    };
    let result = dispatch(state.completer.as_ref(), &request).await?;

    Ok(Json(ProcessResponse {
        filename: form.filename,
        process_type,
        result,
    }))
}

async fn read_upload_form(mut multipart: Multipart) -> Result<UploadForm, AppError> {
    let mut file: Option<(String, Bytes)> = None;
    let mut process_type = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("file") => {
                let filename = field
                    .file_name()
                    .map(str::to_string)
                    .ok_or_else(|| AppError::Validation("file part has no filename".to_string()))?;
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?;
                file = Some((filename, bytes));
            }
            Some("process_type") => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("Invalid process_type: {e}")))?;
                process_type = Some(value);
            }
            _ => {}
        }
    }

    let (filename, bytes) =
        file.ok_or_else(|| AppError::Validation("file part is required".to_string()))?;
    Ok(UploadForm {
        filename,
        bytes,
        process_type,
    })
}

/// Decodes on the blocking pool; PDF extraction in particular can be slow.
async fn decode_upload(filename: String, bytes: Bytes) -> Result<String, AppError> {
    let text = tokio::task::spawn_blocking(move || extract_text(&filename, &bytes))
        .await
        .map_err(|e| {
            AppError::Internal(anyhow::anyhow!("spawn_blocking failed in decoding: {e}"))
        })??;
    Ok(text)
}
