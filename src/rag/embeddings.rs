//! Embedding providers.
//!
//! [`EmbeddingProvider`] converts text into dense vectors. Every call goes to
//! the remote model: there is no caching and no retry inside the provider.

use crate::llm::openai::{describe_openai_error, openai_client};
use crate::types::{AppError, Result};
use async_openai::{Client, config::OpenAIConfig, types::embeddings::CreateEmbeddingRequestArgs};
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

/// Converts text into embedding vectors.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Embed a batch of documents, one vector per input, in input order.
    async fn embed_documents(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;

    /// Embed a single query.
    async fn embed_query(&self, text: &str) -> Result<Vec<f32>>;

    /// Identifier of the underlying model.
    fn model_name(&self) -> &str;
}

/// Embedding client for OpenAI-compatible `/embeddings` endpoints.
pub struct OpenAIEmbeddings {
    client: Client<OpenAIConfig>,
    model: String,
    batch_size: usize,
}

impl OpenAIEmbeddings {
    pub fn new(
        api_key: String,
        api_base: String,
        model: String,
        batch_size: usize,
        timeout: Duration,
    ) -> Result<Self> {
        Ok(Self {
            client: openai_client(api_key, &api_base, timeout)?,
            model,
            batch_size: batch_size.max(1),
        })
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        let request = CreateEmbeddingRequestArgs::default()
            .model(&self.model)
            .input(texts.to_vec())
            .build()
            .map_err(|e| AppError::EmbeddingProvider(format!("Failed to build request: {}", e)))?;

        let response = self
            .client
            .embeddings()
            .create(request)
            .await
            .map_err(|e| AppError::EmbeddingProvider(describe_openai_error(&e)))?;

        order_by_index(
            texts.len(),
            response
                .data
                .into_iter()
                .map(|item| (item.index as usize, item.embedding)),
        )
    }
}

/// Place each returned vector at its `index`.
///
/// Servers may answer out of order; the indices must cover `0..expected`
/// exactly once.
fn order_by_index(
    expected: usize,
    items: impl ExactSizeIterator<Item = (usize, Vec<f32>)>,
) -> Result<Vec<Vec<f32>>> {
    if items.len() != expected {
        return Err(AppError::EmbeddingProvider(format!(
            "Expected {} embeddings, got {}",
            expected,
            items.len()
        )));
    }

    let mut slots: Vec<Option<Vec<f32>>> = vec![None; expected];
    for (index, embedding) in items {
        match slots.get_mut(index) {
            Some(slot) if slot.is_none() => *slot = Some(embedding),
            Some(_) => {
                return Err(AppError::EmbeddingProvider(format!(
                    "Duplicate embedding index {}",
                    index
                )));
            }
            None => {
                return Err(AppError::EmbeddingProvider(format!(
                    "Embedding index {} out of range for {} inputs",
                    index, expected
                )));
            }
        }
    }

    slots
        .into_iter()
        .collect::<Option<Vec<_>>>()
        .ok_or_else(|| AppError::EmbeddingProvider("Missing embedding in response".into()))
}

#[async_trait]
impl EmbeddingProvider for OpenAIEmbeddings {
    async fn embed_documents(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        let mut vectors = Vec::with_capacity(texts.len());

        for (batch_no, batch) in texts.chunks(self.batch_size).enumerate() {
            debug!(model = %self.model, batch = batch_no, size = batch.len(), "Embedding batch");
            vectors.extend(self.embed_batch(batch).await?);
        }

        ensure_uniform_dimensions(&vectors)?;
        Ok(vectors)
    }

    async fn embed_query(&self, text: &str) -> Result<Vec<f32>> {
        self.embed_batch(&[text.to_string()])
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| AppError::EmbeddingProvider("No embedding returned for query".into()))
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

fn ensure_uniform_dimensions(vectors: &[Vec<f32>]) -> Result<()> {
    if let Some(first) = vectors.first() {
        let dims = first.len();
        if let Some(bad) = vectors.iter().find(|v| v.len() != dims) {
            return Err(AppError::EmbeddingProvider(format!(
                "Inconsistent embedding dimensions: {} vs {}",
                dims,
                bad.len()
            )));
        }
    }
    Ok(())
}
