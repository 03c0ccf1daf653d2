//! Query-time pipeline: retrieve top-k chunks, then generate an answer.

use crate::llm::LLMClient;
use crate::rag::embeddings::EmbeddingProvider;
use crate::rag::store::{DocumentIndex, IndexStore};
use crate::types::{Answer, AppError, Result, RetrievedChunk};
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, instrument};

pub const SYSTEM_PROMPT: &str = "You are a helpful assistant.";

/// Default number of chunks retrieved per question.
pub const DEFAULT_TOP_K: usize = 4;

/// Join retrieved chunk texts, in retrieval order, separated by a blank line.
pub fn build_context(sources: &[RetrievedChunk]) -> String {
    sources
        .iter()
        .map(|r| r.chunk.content.as_str())
        .collect::<Vec<_>>()
        .join("\n\n")
}

pub fn build_prompt(context: &str, question: &str) -> String {
    format!(
        "Use the following context to answer the question.\n\nContext:\n{}\n\nQuestion: {}\nAnswer:",
        context, question
    )
}

/// Retrieval-augmented answerer.
#[derive(Clone)]
pub struct RagAnswerer {
    embedder: Arc<dyn EmbeddingProvider>,
    llm: Arc<dyn LLMClient>,
    top_k: usize,
}

impl RagAnswerer {
    pub fn new(embedder: Arc<dyn EmbeddingProvider>, llm: Arc<dyn LLMClient>, top_k: usize) -> Self {
        Self {
            embedder,
            llm,
            top_k,
        }
    }

    /// Answer `question` against whatever index `store` currently serves.
    ///
    /// Fails with [`AppError::NoDocumentLoaded`] before the first upload.
    pub async fn answer(&self, store: &IndexStore, question: &str) -> Result<Answer> {
        let index = store.require()?;
        self.answer_with(&index, question).await
    }

    /// Answer `question` against a specific index snapshot.
    #[instrument(skip(self, index, question), fields(source = %index.source))]
    pub async fn answer_with(&self, index: &DocumentIndex, question: &str) -> Result<Answer> {
        let start = Instant::now();

        let sources = self.retrieve(index, question, self.top_k).await?;
        let prompt = build_prompt(&build_context(&sources), question);
        let text = self.llm.generate_with_system(SYSTEM_PROMPT, &prompt).await?;

        info!(
            retrieved = sources.len(),
            top_k = self.top_k,
            model = %self.llm.model_name(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Question answered"
        );

        Ok(Answer { text, sources })
    }

    /// Embed `question` and return the `k` best matching chunks, best-first.
    pub async fn retrieve(
        &self,
        index: &DocumentIndex,
        question: &str,
        k: usize,
    ) -> Result<Vec<RetrievedChunk>> {
        let query = self.embedder.embed_query(question).await?;

        let hits = index.index.search(&query, k).map_err(|e| {
            AppError::EmbeddingProvider(format!("Query embedding incompatible with index: {}", e))
        })?;

        Ok(hits
            .into_iter()
            .map(|hit| RetrievedChunk {
                chunk: hit.item.clone(),
                score: hit.score,
            })
            .collect())
    }
}
