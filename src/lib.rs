//! # ragdoc - Retrieval-augmented PDF question answering
//!
//! Upload a PDF, ask questions about it. The document is split into
//! overlapping chunks, embedded with a remote embedding model and held in an
//! in-memory vector index; questions retrieve the best matching chunks and a
//! chat model answers from that context only. A small persona chat API rides
//! along on the same chat model.
//!
//! ## Overview
//!
//! ragdoc can be used in two ways:
//!
//! 1. **As a standalone server** - Run the `ragdoc-server` binary
//! 2. **As a library** - Build an [`AppState`] and mount [`api::routes::create_router`]
//!
//! ### Basic Example
//!
//! ```rust,ignore
//! use ragdoc::{AppState, RagdocConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = RagdocConfig::load("ragdoc.toml")?;
//!     let state = AppState::from_config(config)?;
//!
//!     let path = std::path::Path::new("report.pdf");
//!     state
//!         .store
//!         .replace_with(|| state.pipeline.ingest(path, "report.pdf"))
//!         .await?;
//!
//!     let answer = state.answerer.answer(&state.store, "What is this about?").await?;
//!     println!("{}", answer.text);
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! - [`agents`] - Persona chat
//! - [`api`] - REST API handlers and routes
//! - [`llm`] - Chat model clients
//! - [`rag`] - Loading, chunking, embedding, indexing and answering
//! - [`types`] - Common types and error handling
//! - [`utils`] - Configuration
//!
//! ## Configuration
//!
//! Infrastructure settings live in `ragdoc.toml`. API keys are read from the
//! environment variables the file names (a `.env` file is honoured).

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(rustdoc::missing_crate_level_docs)]

/// Persona chat on top of the chat model.
pub mod agents;
/// HTTP API handlers and routes.
pub mod api;
/// Command-line interface.
pub mod cli;
/// Chat model clients.
pub mod llm;
/// Retrieval Augmented Generation (RAG) components.
pub mod rag;
/// Core types (requests, responses, errors).
pub mod types;
/// Configuration utilities.
pub mod utils;

// Re-export commonly used types
pub use agents::PersonaChat;
pub use llm::{LLMClient, OpenAIClient};
pub use rag::{
    DocumentLoader, EmbeddingProvider, IndexStore, IngestionPipeline, PdfLoader, RagAnswerer,
    TextChunker,
};
pub use types::{AppError, Result};
pub use utils::RagdocConfig;

use crate::llm::GenerationParams;
use crate::rag::OpenAIEmbeddings;
use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Loaded configuration
    pub config: Arc<RagdocConfig>,
    /// The single active document index
    pub store: Arc<IndexStore>,
    /// Upload pipeline
    pub pipeline: Arc<IngestionPipeline>,
    /// Question answering over the active index
    pub answerer: Arc<RagAnswerer>,
    /// Persona chat
    pub personas: Arc<PersonaChat>,
}

impl AppState {
    /// Wire the state from explicit collaborators.
    pub fn new(
        config: RagdocConfig,
        loader: Arc<dyn DocumentLoader>,
        embedder: Arc<dyn EmbeddingProvider>,
        llm: Arc<dyn LLMClient>,
    ) -> Result<Self> {
        let chunker = TextChunker::new(config.rag.chunk_size, config.rag.chunk_overlap)?;
        let pipeline = IngestionPipeline::new(loader, chunker, embedder.clone(), config.rag.metric);
        let answerer = RagAnswerer::new(embedder, llm.clone(), config.rag.top_k);

        Ok(Self {
            store: Arc::new(IndexStore::new(config.rag.ingestion)),
            pipeline: Arc::new(pipeline),
            answerer: Arc::new(answerer),
            personas: Arc::new(PersonaChat::new(llm)),
            config: Arc::new(config),
        })
    }

    /// Build the production state: PDF loader plus OpenAI-compatible providers.
    ///
    /// Fails when an API key environment variable is missing.
    pub fn from_config(config: RagdocConfig) -> Result<Self> {
        let embedding_key = config
            .embedding_api_key()
            .map_err(|e| AppError::Config(e.to_string()))?;
        let chat_key = config
            .chat_api_key()
            .map_err(|e| AppError::Config(e.to_string()))?;

        let embedder = OpenAIEmbeddings::new(
            embedding_key,
            config.embedding.base_url.clone(),
            config.embedding.model.clone(),
            config.embedding.batch_size,
            config.embedding.timeout(),
        )?;

        let llm = OpenAIClient::new(
            chat_key,
            config.chat.base_url.clone(),
            config.chat.model.clone(),
            GenerationParams {
                temperature: config.chat.temperature,
                top_p: config.chat.top_p,
            },
            config.chat.timeout(),
        )?;

        Self::new(config, Arc::new(PdfLoader), Arc::new(embedder), Arc::new(llm))
    }
}
