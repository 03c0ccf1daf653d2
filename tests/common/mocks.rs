//! Mock implementations for testing.
//!
//! This module provides mock collaborators (document loader, embedding
//! provider, LLM client) shared across the integration test files.

#![allow(dead_code)]

use async_trait::async_trait;
use ragdoc::llm::LLMClient;
use ragdoc::rag::{DocumentLoader, EmbeddingProvider};
use ragdoc::types::{AppError, PageText, Result};
use std::path::Path;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::Notify;

/// Dimensionality of [`MockEmbeddings`] vectors.
pub const MOCK_DIMENSIONS: usize = 64;

/// Mock LLM client that records every request.
///
/// # Examples
///
/// ```ignore
/// let client = MockLLMClient::new("Paris");
/// let client = MockLLMClient::failing();
/// ```
pub struct MockLLMClient {
    response: String,
    should_fail: bool,
    calls: Mutex<Vec<(String, String)>>,
}

impl MockLLMClient {
    /// Create a new mock client that returns the given response.
    pub fn new(response: &str) -> Self {
        Self {
            response: response.to_string(),
            should_fail: false,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Create a mock client that always returns an error.
    pub fn failing() -> Self {
        Self {
            response: String::new(),
            should_fail: true,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// `(system, prompt)` pairs received so far.
    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.calls().last().map(|(_, prompt)| prompt.clone())
    }
}

#[async_trait]
impl LLMClient for MockLLMClient {
    async fn generate_with_system(&self, system: &str, prompt: &str) -> Result<String> {
        self.calls
            .lock()
            .unwrap()
            .push((system.to_string(), prompt.to_string()));

        if self.should_fail {
            return Err(AppError::ChatProvider("Mock LLM failure".to_string()));
        }
        Ok(self.response.clone())
    }

    fn model_name(&self) -> &str {
        "mock-chat"
    }
}

/// Deterministic bag-of-words embeddings.
///
/// Each lowercase word is hashed into one of [`MOCK_DIMENSIONS`] buckets, so
/// texts sharing vocabulary score higher under cosine similarity. The last
/// bucket is a constant bias, which keeps every vector non-zero.
pub struct MockEmbeddings {
    fail: AtomicBool,
    document_calls: AtomicUsize,
}

impl Default for MockEmbeddings {
    fn default() -> Self {
        Self::new()
    }
}

impl MockEmbeddings {
    pub fn new() -> Self {
        Self {
            fail: AtomicBool::new(false),
            document_calls: AtomicUsize::new(0),
        }
    }

    /// Make subsequent calls fail (or succeed again).
    pub fn set_failing(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    pub fn document_calls(&self) -> usize {
        self.document_calls.load(Ordering::SeqCst)
    }

    pub fn embed(text: &str) -> Vec<f32> {
        let mut vector = vec![0.0; MOCK_DIMENSIONS];
        for word in text
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
        {
            let bucket = fnv1a(&word.to_lowercase()) as usize % (MOCK_DIMENSIONS - 1);
            vector[bucket] += 1.0;
        }
        vector[MOCK_DIMENSIONS - 1] = 0.1;
        vector
    }

    fn check(&self) -> Result<()> {
        if self.fail.load(Ordering::SeqCst) {
            Err(AppError::EmbeddingProvider("Mock embedding failure".to_string()))
        } else {
            Ok(())
        }
    }
}

fn fnv1a(s: &str) -> u64 {
    s.bytes().fold(0xcbf29ce484222325, |hash, byte| {
        (hash ^ u64::from(byte)).wrapping_mul(0x100000001b3)
    })
}

#[async_trait]
impl EmbeddingProvider for MockEmbeddings {
    async fn embed_documents(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        self.document_calls.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        Ok(texts.iter().map(|t| Self::embed(t)).collect())
    }

    async fn embed_query(&self, text: &str) -> Result<Vec<f32>> {
        self.check()?;
        Ok(Self::embed(text))
    }

    fn model_name(&self) -> &str {
        "mock-embeddings"
    }
}

/// Plain-text loader: pages are separated by form feeds.
///
/// Files starting with `%CORRUPT` fail to load, mimicking an unparseable PDF.
pub struct TextLoader;

#[async_trait]
impl DocumentLoader for TextLoader {
    async fn load(&self, path: &Path) -> Result<Vec<PageText>> {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| AppError::DocumentLoad(e.to_string()))?;

        if content.starts_with("%CORRUPT") {
            return Err(AppError::DocumentLoad("Mock corrupt document".to_string()));
        }

        Ok(content
            .split('\x0c')
            .enumerate()
            .map(|(i, text)| PageText {
                page: i + 1,
                text: text.to_string(),
            })
            .collect())
    }
}

/// Loader that signals when loading begins and then never finishes in time.
///
/// Used to drop an upload request while its document is being ingested.
#[derive(Default)]
pub struct StalledLoader {
    pub started: Notify,
}

#[async_trait]
impl DocumentLoader for StalledLoader {
    async fn load(&self, _path: &Path) -> Result<Vec<PageText>> {
        self.started.notify_one();
        tokio::time::sleep(Duration::from_secs(30)).await;
        Ok(Vec::new())
    }
}

/// A page of `words` distinct filler words tagged with `topic`.
pub fn page_about(topic: &str, words: usize) -> String {
    (0..words)
        .map(|i| format!("{}{}", topic, i % 7))
        .collect::<Vec<_>>()
        .join(" ")
}
