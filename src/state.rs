//! Application state management

use std::path::Path;
use std::sync::Arc;

use crate::config::Config;
use crate::pdf::PdfAssembler;
use crate::split::{ImageSplitter, SplitGeometry};
use crate::storage::{StorageError, TempStorage};
use crate::store::PartStore;

/// Error type for state initialization
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("Failed to prepare temp storage: {0}")]
    TempStorageInit(#[from] StorageError),

    #[error("PDF path {pdf} is inside the temp directory {temp}")]
    PdfPathInsideTempDir { pdf: String, temp: String },
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: Config,
    splitter: ImageSplitter,
    assembler: PdfAssembler,
    store: PartStore,
    temp: TempStorage,
}

impl AppState {
    /// Create the application state, preparing the temp directory
    ///
    /// Rejects a PDF path that resolves into the temp directory: cleanup
    /// and the orphan sweep delete the files in there.
    pub async fn new(config: Config) -> Result<Self, StateError> {
        let geometry = SplitGeometry::default();
        let temp = TempStorage::new(&config.storage.temp_dir).await?;

        let temp_root = tokio::fs::canonicalize(temp.root())
            .await
            .map_err(StorageError::from)?;
        let pdf_parent = Path::new(&config.storage.pdf_path)
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .unwrap_or(Path::new("."));
        if let Ok(parent) = tokio::fs::canonicalize(pdf_parent).await {
            if parent == temp_root {
                return Err(StateError::PdfPathInsideTempDir {
                    pdf: config.storage.pdf_path.clone(),
                    temp: config.storage.temp_dir.clone(),
                });
            }
        }

        Ok(Self {
            inner: Arc::new(AppStateInner {
                splitter: ImageSplitter::new(geometry),
                assembler: PdfAssembler::new(geometry),
                store: PartStore::new(),
                temp,
                config,
            }),
        })
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    /// Get the image splitter
    pub fn splitter(&self) -> &ImageSplitter {
        &self.inner.splitter
    }

    /// Get the PDF assembler
    pub fn assembler(&self) -> &PdfAssembler {
        &self.inner.assembler
    }

    /// Get the session result store
    pub fn store(&self) -> &PartStore {
        &self.inner.store
    }

    /// Get the temp strip storage
    pub fn temp(&self) -> &TempStorage {
        &self.inner.temp
    }

    /// Path the assembled PDF is written to
    pub fn pdf_path(&self) -> &Path {
        Path::new(&self.inner.config.storage.pdf_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_new_rejects_pdf_path_inside_temp_dir() {
        let dir = TempDir::new().unwrap();

        let mut config = Config::default();
        config.storage.temp_dir = dir.path().join("temp").display().to_string();
        config.storage.pdf_path = dir
            .path()
            .join("temp")
            .join("output.pdf")
            .display()
            .to_string();

        let result = AppState::new(config).await;
        assert!(matches!(
            result,
            Err(StateError::PdfPathInsideTempDir { .. })
        ));

        // A dot-path alias of the same directory is caught as well
        let mut config = Config::default();
        config.storage.temp_dir = dir.path().join("temp").display().to_string();
        config.storage.pdf_path = dir
            .path()
            .join("temp")
            .join("..")
            .join("temp")
            .join("output.pdf")
            .display()
            .to_string();

        let result = AppState::new(config).await;
        assert!(matches!(
            result,
            Err(StateError::PdfPathInsideTempDir { .. })
        ));
    }

    #[tokio::test]
    async fn test_new_accepts_pdf_path_beside_temp_dir() {
        let dir = TempDir::new().unwrap();

        let mut config = Config::default();
        config.storage.temp_dir = dir.path().join("temp").display().to_string();
        config.storage.pdf_path = dir.path().join("output.pdf").display().to_string();

        assert!(AppState::new(config).await.is_ok());
    }
}
