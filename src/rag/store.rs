//! Process-wide active document index.
//!
//! Exactly one [`DocumentIndex`] is served at a time. Queries take a snapshot
//! with [`IndexStore::current`] and keep using it even if a new upload replaces
//! the index meanwhile. Installation is a single atomic pointer swap performed
//! only after a build fully succeeds; ingestions are serialized.

use crate::types::{AppError, Chunk, Result};
use crate::utils::IngestionPolicy;
use arc_swap::ArcSwapOption;
use chrono::{DateTime, Utc};
use ragdoc_vector::VectorIndex;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, warn};

/// A vector index built from one uploaded document.
pub struct DocumentIndex {
    /// Original filename of the uploaded document
    pub source: String,
    pub built_at: DateTime<Utc>,
    pub index: VectorIndex<Chunk>,
}

impl DocumentIndex {
    pub fn new(source: impl Into<String>, index: VectorIndex<Chunk>) -> Self {
        Self {
            source: source.into(),
            built_at: Utc::now(),
            index,
        }
    }

    pub fn chunk_count(&self) -> usize {
        self.index.len()
    }
}

/// Owner of the single active [`DocumentIndex`].
pub struct IndexStore {
    current: ArcSwapOption<DocumentIndex>,
    ingest_lock: Mutex<()>,
    policy: IngestionPolicy,
}

impl Default for IndexStore {
    fn default() -> Self {
        Self::new(IngestionPolicy::default())
    }
}

impl IndexStore {
    pub fn new(policy: IngestionPolicy) -> Self {
        Self {
            current: ArcSwapOption::empty(),
            ingest_lock: Mutex::new(()),
            policy,
        }
    }

    /// Snapshot of the active index, if any document has been loaded.
    pub fn current(&self) -> Option<Arc<DocumentIndex>> {
        self.current.load_full()
    }

    /// Snapshot of the active index, or [`AppError::NoDocumentLoaded`].
    pub fn require(&self) -> Result<Arc<DocumentIndex>> {
        self.current().ok_or(AppError::NoDocumentLoaded)
    }

    /// Build a new index with `build` and install it if the build succeeds.
    ///
    /// Builds run one at a time. Under [`IngestionPolicy::Reject`] a build
    /// requested while another is running fails with
    /// [`AppError::ConcurrentIngestion`]. A failed build leaves the previous
    /// index in place.
    pub async fn replace_with<F, Fut>(&self, build: F) -> Result<Arc<DocumentIndex>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<DocumentIndex>>,
    {
        let _guard = match self.policy {
            IngestionPolicy::Queue => self.ingest_lock.lock().await,
            IngestionPolicy::Reject => self.ingest_lock.try_lock().map_err(|_| {
                warn!("Rejected upload: ingestion already in progress");
                AppError::ConcurrentIngestion
            })?,
        };

        let index = Arc::new(build().await?);
        self.current.store(Some(index.clone()));

        info!(
            source = %index.source,
            chunks = index.chunk_count(),
            "Installed document index"
        );

        Ok(index)
    }
}
