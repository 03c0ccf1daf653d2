//! Document upload and question answering handlers.

use crate::{
    AppState,
    types::{AppError, AskForm, AskResponse, Result, StatusResponse, UploadResponse},
};
use axum::{
    Form, Json,
    extract::{Multipart, State, multipart::MultipartRejection, rejection::FormRejection},
};
use std::path::Path;
use std::time::Instant;
use tempfile::NamedTempFile;

/// Strip any directory components a client put in the filename.
fn sanitize_filename(raw: &str) -> String {
    let base = raw.rsplit(['/', '\\']).next().unwrap_or(raw).trim();
    if base.is_empty() || base == "." || base == ".." {
        "upload.pdf".to_string()
    } else {
        base.to_string()
    }
}

/// Create a uniquely named staging file in `upload_dir`, deleted on drop.
fn stage_file(upload_dir: &Path, filename: &str) -> std::io::Result<NamedTempFile> {
    tempfile::Builder::new()
        .prefix("upload-")
        .suffix(&format!("_{}", filename))
        .tempfile_in(upload_dir)
}

/// Upload a PDF and make it the active document.
///
/// The file is staged under the upload directory while it is parsed. The
/// staged copy is removed afterwards, including when the request is dropped
/// mid-ingestion.
pub async fn upload(
    State(state): State<AppState>,
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>> {
    let start = Instant::now();
    let mut multipart = multipart?;

    let mut upload = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::InvalidInput(format!("Malformed multipart body: {}", e)))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let filename = sanitize_filename(field.file_name().unwrap_or_default());
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::InvalidInput(format!("Failed to read upload: {}", e)))?;
        upload = Some((filename, data));
    }

    let (filename, data) =
        upload.ok_or_else(|| AppError::InvalidInput("Missing 'file' field".into()))?;
    if data.is_empty() {
        return Err(AppError::InvalidInput("Uploaded file is empty".into()));
    }

    let upload_dir = &state.config.rag.upload_dir;
    tokio::fs::create_dir_all(upload_dir)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to create upload directory: {}", e)))?;

    let staged = stage_file(upload_dir, &filename)
        .map_err(|e| AppError::Internal(format!("Failed to stage upload: {}", e)))?;
    tokio::fs::write(staged.path(), &data)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to stage upload: {}", e)))?;

    let result = state
        .store
        .replace_with(|| state.pipeline.ingest(staged.path(), &filename))
        .await;

    if let Err(e) = staged.close() {
        tracing::warn!(error = %e, "Failed to remove staged upload");
    }

    let index = result?;

    tracing::info!(
        filename = %filename,
        bytes = data.len(),
        chunks = index.chunk_count(),
        duration_ms = start.elapsed().as_millis() as u64,
        "Upload processed"
    );

    Ok(Json(UploadResponse {
        message: "File uploaded and processed".to_string(),
        filename,
        chunks: index.chunk_count(),
    }))
}

/// Answer a question about the active document.
pub async fn ask(
    State(state): State<AppState>,
    form: std::result::Result<Form<AskForm>, FormRejection>,
) -> Result<Json<AskResponse>> {
    let start = Instant::now();

    let Form(form) = form?;
    if form.question.trim().is_empty() {
        return Err(AppError::InvalidInput("Question must not be empty".into()));
    }

    let answer = state.answerer.answer(&state.store, &form.question).await?;

    tracing::info!(
        sources = answer.sources.len(),
        duration_ms = start.elapsed().as_millis() as u64,
        "Question answered"
    );

    Ok(Json(AskResponse {
        sources: answer.sources.iter().map(Into::into).collect(),
        answer: answer.text,
    }))
}

/// Describe the active document, if any.
pub async fn status(State(state): State<AppState>) -> Json<StatusResponse> {
    let response = match state.store.current() {
        Some(index) => StatusResponse {
            document_loaded: true,
            filename: Some(index.source.clone()),
            chunks: Some(index.chunk_count()),
            built_at: Some(index.built_at),
        },
        None => StatusResponse {
            document_loaded: false,
            filename: None,
            chunks: None,
            built_at: None,
        },
    };
    Json(response)
}
