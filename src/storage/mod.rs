//! Temp strip storage
//!
//! Server-local directory holding the strip files between upload and
//! cleanup, plus the background sweep that reclaims files no live batch
//! references anymore.

use std::collections::HashSet;
use std::path::{Component, Path, PathBuf};
use std::time::{Duration, SystemTime};

use uuid::Uuid;

use crate::store::PartStore;

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Invalid filename: {0}")]
    InvalidFilename(String),

    #[error("File not found: {0}")]
    NotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

// ============================================================================
// Temp Storage
// ============================================================================

/// Filesystem-backed storage for strip files
#[derive(Debug, Clone)]
pub struct TempStorage {
    root: PathBuf,
}

impl TempStorage {
    /// Open the storage directory, creating it if needed
    pub async fn new(root: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let root = root.into();
        tokio::fs::create_dir_all(&root).await?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Collision-free filename for one strip of a batch
    pub fn part_filename(batch: Uuid, sequence: usize) -> String {
        format!("part_{}_{:02}.jpg", batch.simple(), sequence)
    }

    /// Resolve a client-supplied filename to a path inside the root
    ///
    /// Only a single normal path component is accepted; anything with
    /// separators or parent components is rejected before the filesystem
    /// is touched.
    pub fn resolve(&self, filename: &str) -> Result<PathBuf, StorageError> {
        let mut components = Path::new(filename).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(name)), None) if name == filename => {
                Ok(self.root.join(name))
            }
            _ => Err(StorageError::InvalidFilename(filename.to_string())),
        }
    }

    /// Write one strip file
    pub async fn write(&self, filename: &str, data: &[u8]) -> Result<(), StorageError> {
        let path = self.resolve(filename)?;
        tokio::fs::write(&path, data).await?;
        Ok(())
    }

    /// Read one strip file
    pub async fn read(&self, filename: &str) -> Result<Vec<u8>, StorageError> {
        let path = self.resolve(filename)?;
        match tokio::fs::read(&path).await {
            Ok(data) => Ok(data),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StorageError::NotFound(filename.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Remove one strip file, treating an already-missing file as removed
    pub async fn remove(&self, filename: &str) -> Result<(), StorageError> {
        let path = self.resolve(filename)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// Remove a batch of files, logging and continuing on per-file failures
    pub async fn remove_batch(&self, filenames: impl IntoIterator<Item = String>) {
        for filename in filenames {
            if let Err(e) = self.remove(&filename).await {
                tracing::warn!(filename = %filename, error = %e, "Failed to remove strip file");
            }
        }
    }

    /// Delete every file in the storage directory
    ///
    /// Failing to list the directory is an error; individual deletions
    /// that fail are logged and skipped so one stuck file cannot wedge
    /// cleanup.
    pub async fn remove_all(&self) -> Result<usize, StorageError> {
        let mut entries = tokio::fs::read_dir(&self.root).await?;
        let mut removed = 0;

        while let Some(entry) = entries.next_entry().await? {
            match tokio::fs::remove_file(entry.path()).await {
                Ok(()) => removed += 1,
                Err(e) => {
                    tracing::warn!(
                        path = %entry.path().display(),
                        error = %e,
                        "Failed to delete temp file"
                    );
                }
            }
        }

        Ok(removed)
    }

    /// Delete unreferenced files older than `max_age`
    ///
    /// Returns how many files were removed. Files of the current batch are
    /// never touched, regardless of age.
    pub async fn sweep_orphans(
        &self,
        referenced: &HashSet<String>,
        max_age: Duration,
    ) -> Result<usize, StorageError> {
        let cutoff = SystemTime::now() - max_age;
        let mut entries = tokio::fs::read_dir(&self.root).await?;
        let mut removed = 0;

        while let Some(entry) = entries.next_entry().await? {
            let name = entry.file_name().to_string_lossy().to_string();
            if referenced.contains(&name) {
                continue;
            }

            let modified = match entry.metadata().await.and_then(|m| m.modified()) {
                Ok(modified) => modified,
                Err(_) => continue,
            };
            if modified > cutoff {
                continue;
            }

            match tokio::fs::remove_file(entry.path()).await {
                Ok(()) => {
                    removed += 1;
                    tracing::debug!(filename = %name, "Swept orphaned strip file");
                }
                Err(e) => {
                    tracing::warn!(filename = %name, error = %e, "Failed to sweep orphaned file");
                }
            }
        }

        if removed > 0 {
            tracing::info!(count = removed, "Swept orphaned strip files");
        }

        Ok(removed)
    }
}

// ============================================================================
// Background Sweep
// ============================================================================

/// Start the periodic orphan sweep
pub fn start_sweep_task(
    storage: TempStorage,
    store: PartStore,
    interval: Duration,
    max_age: Duration,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);

        loop {
            ticker.tick().await;

            let referenced: HashSet<String> = store
                .all()
                .await
                .into_iter()
                .map(|part| part.temp_filename)
                .collect();

            if let Err(e) = storage.sweep_orphans(&referenced, max_age).await {
                tracing::warn!(error = %e, "Orphan sweep failed");
            }
        }
    })
}

// ============================================================================
// Tests
// ============================================================================
