//! Retrieval Augmented Generation (RAG) Pipeline
//!
//! Answers questions about a single uploaded document.
//!
//! # Module Structure
//!
//! - [`rag::loader`](crate::rag::loader) - PDF to page text
//! - [`rag::chunker`](crate::rag::chunker) - Overlapping, boundary-aware text chunks
//! - [`rag::embeddings`](crate::rag::embeddings) - Remote embedding models
//! - [`rag::store`](crate::rag::store) - The single active document index
//! - [`rag::ingest`](crate::rag::ingest) - Upload pipeline
//! - [`rag::answer`](crate::rag::answer) - Question answering
//!
//! # RAG Pipeline
//!
//! 1. **Ingestion** - The document is loaded, chunked and embedded
//! 2. **Storage** - A fresh in-memory index replaces the previous one atomically
//! 3. **Retrieval** - The question is embedded and the top-k chunks selected
//! 4. **Generation** - The chat model answers using only the retrieved context
//!
//! # Example
//!
//! ```ignore
//! use ragdoc::rag::{IndexStore, IngestionPipeline, RagAnswerer};
//!
//! let index = store
//!     .replace_with(|| pipeline.ingest(path, "report.pdf"))
//!     .await?;
//! let answer = answerer.answer(&store, "What is the main topic?").await?;
//! println!("{}", answer.text);
//! ```

pub mod answer;
pub mod chunker;
pub mod embeddings;
pub mod ingest;
pub mod loader;
pub mod store;

pub use answer::RagAnswerer;
pub use chunker::TextChunker;
pub use embeddings::{EmbeddingProvider, OpenAIEmbeddings};
pub use ingest::IngestionPipeline;
pub use loader::{DocumentLoader, PdfLoader};
pub use store::{DocumentIndex, IndexStore};
