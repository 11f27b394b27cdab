//! Session result store
//!
//! Holds the strips produced by the most recent upload. There is exactly
//! one batch per process: a new upload replaces it wholesale, cleanup
//! empties it. Individual operations are atomic behind the lock; the
//! upload pipeline as a whole is not serialized against concurrent
//! uploads (single-session tool).

use std::sync::Arc;

use axum::body::Bytes;
use tokio::sync::RwLock;

/// One strip of an uploaded image, ready to serve
#[derive(Debug, Clone)]
pub struct ImagePart {
    /// Original upload filename
    pub source_name: String,

    /// Position within the source image, 0 = leftmost
    pub part_index: u32,

    /// Encoded JPEG bytes
    pub data: Bytes,

    /// Filename under which the strip is persisted and served
    pub temp_filename: String,
}

/// Thread-safe holder of the current batch
#[derive(Clone)]
pub struct PartStore {
    parts: Arc<RwLock<Vec<ImagePart>>>,
}

impl Default for PartStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PartStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            parts: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Replace the whole batch, returning the displaced parts so their
    /// temp files can be reclaimed
    pub async fn replace(&self, new_parts: Vec<ImagePart>) -> Vec<ImagePart> {
        let mut parts = self.parts.write().await;
        std::mem::replace(&mut *parts, new_parts)
    }

    /// All parts of the current batch in upload order
    pub async fn all(&self) -> Vec<ImagePart> {
        let parts = self.parts.read().await;
        parts.clone()
    }

    /// Drop the current batch
    pub async fn clear(&self) {
        let mut parts = self.parts.write().await;
        parts.clear();
    }

    /// Number of parts in the current batch
    pub async fn len(&self) -> usize {
        let parts = self.parts.read().await;
        parts.len()
    }

    /// Whether a batch is loaded
    pub async fn is_empty(&self) -> bool {
        let parts = self.parts.read().await;
        parts.is_empty()
    }
}
