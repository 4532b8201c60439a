//! Application state for the analysis server

use parking_lot::RwLock;
use std::sync::Arc;

use crate::analysis::Segmenter;
use crate::config::AppConfig;
use crate::error::Result;
use crate::storage::DocumentStore;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    /// Configuration
    config: AppConfig,
    /// Per-document filesystem store
    store: DocumentStore,
    /// Shared segmenter (dictionary load is expensive)
    segmenter: Segmenter,
    /// Ready state
    ready: RwLock<bool>,
}

impl AppState {
    /// Create new application state
    pub fn new(config: AppConfig) -> Result<Self> {
        tracing::info!("Initializing application state...");

        let store = DocumentStore::new(
            &config.storage.data_dir,
            config.chunking.store_chunk_size,
            config.chunking.store_chunk_overlap,
        )?;
        tracing::info!("Document store ready at {}", store.root().display());

        let segmenter = Segmenter::new();
        tracing::info!("Segmentation dictionary loaded");

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                store,
                segmenter,
                ready: RwLock::new(true),
            }),
        })
    }

    /// Get configuration
    pub fn config(&self) -> &AppConfig {
        &self.inner.config
    }

    /// Get the document store
    pub fn store(&self) -> &DocumentStore {
        &self.inner.store
    }

    /// Get the shared segmenter
    pub fn segmenter(&self) -> &Segmenter {
        &self.inner.segmenter
    }

    /// Check if the server is ready
    pub fn is_ready(&self) -> bool {
        *self.inner.ready.read()
    }

    /// Set ready state
    pub fn set_ready(&self, ready: bool) {
        *self.inner.ready.write() = ready;
    }
}
