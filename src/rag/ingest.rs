//! Upload-time pipeline: load → chunk → embed → build.

use crate::rag::chunker::TextChunker;
use crate::rag::embeddings::EmbeddingProvider;
use crate::rag::loader::DocumentLoader;
use crate::rag::store::DocumentIndex;
use crate::types::{AppError, Result};
use ragdoc_vector::{DistanceMetric, VectorIndex};
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, instrument};

/// Builds a fresh [`DocumentIndex`] from a document on disk.
///
/// The pipeline never touches the served index: it returns a new one and the
/// caller decides whether to install it.
#[derive(Clone)]
pub struct IngestionPipeline {
    loader: Arc<dyn DocumentLoader>,
    chunker: TextChunker,
    embedder: Arc<dyn EmbeddingProvider>,
    metric: DistanceMetric,
}

impl IngestionPipeline {
    pub fn new(
        loader: Arc<dyn DocumentLoader>,
        chunker: TextChunker,
        embedder: Arc<dyn EmbeddingProvider>,
        metric: DistanceMetric,
    ) -> Self {
        Self {
            loader,
            chunker,
            embedder,
            metric,
        }
    }

    /// Ingest the document at `path`, labelling the index with `source`.
    #[instrument(skip(self, path, source), fields(source = %source))]
    pub async fn ingest(&self, path: &Path, source: &str) -> Result<DocumentIndex> {
        let start = Instant::now();

        let pages = self.loader.load(path).await?;
        let chunks = self.chunker.chunk_pages(&pages);
        if chunks.is_empty() {
            return Err(AppError::DocumentLoad(
                "Document contains no extractable text".to_string(),
            ));
        }

        let texts: Vec<String> = chunks.iter().map(|c| c.content.clone()).collect();
        let vectors = self.embedder.embed_documents(&texts).await?;

        let index = VectorIndex::build(chunks, vectors, self.metric)?;

        info!(
            pages = pages.len(),
            chunks = index.len(),
            dimensions = index.dimensions(),
            metric = %index.metric(),
            model = %self.embedder.model_name(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Document ingested"
        );

        Ok(DocumentIndex::new(source, index))
    }
}
