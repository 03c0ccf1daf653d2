//! Document loading.
//!
//! Turns a file on disk into ordered page texts. PDF parsing is CPU-bound and
//! runs on the blocking pool.

use crate::types::{AppError, PageText, Result};
use async_trait::async_trait;
use std::path::Path;
use tracing::debug;

/// Loads a source document into page texts.
#[async_trait]
pub trait DocumentLoader: Send + Sync {
    /// Parse the document at `path`.
    ///
    /// Fails with [`AppError::DocumentLoad`] when the file cannot be read or parsed.
    async fn load(&self, path: &Path) -> Result<Vec<PageText>>;
}

/// PDF loader backed by `pdf-extract`.
#[derive(Debug, Default, Clone, Copy)]
pub struct PdfLoader;

#[async_trait]
impl DocumentLoader for PdfLoader {
    async fn load(&self, path: &Path) -> Result<Vec<PageText>> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| AppError::DocumentLoad(format!("Failed to read {}: {}", path.display(), e)))?;

        let pages = tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem_by_pages(&bytes))
            .await
            .map_err(|e| AppError::DocumentLoad(format!("PDF parser aborted: {}", e)))?
            .map_err(|e| AppError::DocumentLoad(format!("PDF extraction error: {}", e)))?;

        debug!(path = %path.display(), pages = pages.len(), "Extracted PDF text");

        Ok(pages
            .into_iter()
            .enumerate()
            .map(|(i, text)| PageText { page: i + 1, text })
            .collect())
    }
}
