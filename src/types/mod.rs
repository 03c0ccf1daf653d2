use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ============= RAG Types =============

/// Text extracted from one page of a source document.
#[derive(Debug, Clone, PartialEq)]
pub struct PageText {
    /// 1-based page number
    pub page: usize,
    pub text: String,
}

/// A contiguous slice of document text used as a retrieval unit.
///
/// A document short enough to fit in one chunk is kept whole even when it
/// spans several pages; `page`, `start` and `end` then describe the part
/// taken from its first page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    pub content: String,
    /// Position of the chunk within the whole document
    pub chunk_index: usize,
    /// 1-based page the chunk was taken from
    pub page: usize,
    /// Character offset of the chunk start within its page
    pub start: usize,
    /// Character offset one past the chunk end within its page
    pub end: usize,
}

impl Chunk {
    /// Length of the chunk in characters.
    pub fn char_len(&self) -> usize {
        self.content.chars().count()
    }
}

/// A chunk returned by retrieval together with its similarity score.
#[derive(Debug, Clone)]
pub struct RetrievedChunk {
    pub chunk: Chunk,
    pub score: f32,
}

/// Generated answer plus the chunks that were used as context.
#[derive(Debug, Clone)]
pub struct Answer {
    pub text: String,
    pub sources: Vec<RetrievedChunk>,
}

// ============= API Request/Response Types =============

#[derive(Debug, Serialize, Deserialize)]
pub struct UploadResponse {
    pub message: String,
    pub filename: String,
    pub chunks: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AskForm {
    pub question: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SourceRef {
    pub chunk_index: usize,
    pub page: usize,
    pub score: f32,
}

impl From<&RetrievedChunk> for SourceRef {
    fn from(r: &RetrievedChunk) -> Self {
        Self {
            chunk_index: r.chunk.chunk_index,
            page: r.chunk.page,
            score: r.score,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AskResponse {
    pub answer: String,
    pub sources: Vec<SourceRef>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StatusResponse {
    pub document_loaded: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chunks: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub built_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize)]
pub struct AgentToolsResponse {
    pub tools: &'static [&'static str],
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    pub agent_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<serde_json::Value>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
    pub agent_id: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MultiAgentRequest {
    pub message: String,
    pub agent_ids: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<serde_json::Value>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MultiAgentResponse {
    pub responses: HashMap<String, String>,
}

// ============= Error Types =============

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Document load error: {0}")]
    DocumentLoad(String),

    #[error("Embedding provider error: {0}")]
    EmbeddingProvider(String),

    #[error("Chat provider error: {0}")]
    ChatProvider(String),

    #[error("Index build error: {0}")]
    IndexBuild(String),

    #[error("Please upload a document first.")]
    NoDocumentLoaded,

    #[error("Another document is currently being processed")]
    ConcurrentIngestion,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<ragdoc_vector::Error> for AppError {
    fn from(err: ragdoc_vector::Error) -> Self {
        AppError::IndexBuild(err.to_string())
    }
}

impl From<axum::extract::rejection::FormRejection> for AppError {
    fn from(rejection: axum::extract::rejection::FormRejection) -> Self {
        AppError::InvalidInput(rejection.body_text())
    }
}

impl From<axum::extract::rejection::JsonRejection> for AppError {
    fn from(rejection: axum::extract::rejection::JsonRejection) -> Self {
        AppError::InvalidInput(rejection.body_text())
    }
}

impl From<axum::extract::multipart::MultipartRejection> for AppError {
    fn from(rejection: axum::extract::multipart::MultipartRejection) -> Self {
        AppError::InvalidInput(rejection.body_text())
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::http::StatusCode;

        let status = match &self {
            AppError::DocumentLoad(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::EmbeddingProvider(_) => StatusCode::BAD_GATEWAY,
            AppError::ChatProvider(_) => StatusCode::BAD_GATEWAY,
            AppError::IndexBuild(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::NoDocumentLoaded => StatusCode::CONFLICT,
            AppError::ConcurrentIngestion => StatusCode::CONFLICT,
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        } else {
            tracing::debug!(error = %self, "Request rejected");
        }

        let body = serde_json::json!({
            "error": self.to_string()
        });

        (status, axum::Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
