//! Error types for the SixSplit server
//!
//! Module errors roll up into [`AppError`], which maps each failure onto
//! the status code and plain-text body the client expects. Details of 5xx
//! failures go to the log, never to the client.

use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::pdf::PdfError;
use crate::split::SplitError;
use crate::storage::StorageError;

/// Application-wide result type
pub type Result<T> = std::result::Result<T, AppError>;

/// Application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("No files uploaded.")]
    NoFilesProvided,

    #[error("Too many files: at most {0} images per upload")]
    TooManyFiles(usize),

    #[error("Invalid upload: {0}")]
    Multipart(#[from] MultipartError),

    #[error(transparent)]
    Split(#[from] SplitError),

    #[error(transparent)]
    Pdf(#[from] PdfError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("No PDF has been generated yet")]
    PdfNotReady,

    #[error("Error cleaning up files")]
    CleanupFailed(#[source] StorageError),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            AppError::NoFilesProvided => (StatusCode::BAD_REQUEST, self.to_string()),

            AppError::TooManyFiles(_) => (StatusCode::BAD_REQUEST, self.to_string()),

            AppError::Multipart(_) => (StatusCode::BAD_REQUEST, self.to_string()),

            AppError::Split(e) => {
                tracing::error!(error = %e, "Image processing failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Error processing images".to_string(),
                )
            }

            AppError::Pdf(PdfError::InvalidSelection) => {
                (StatusCode::BAD_REQUEST, self.to_string())
            }

            AppError::Pdf(PdfError::IndexOutOfRange { .. }) => {
                (StatusCode::BAD_REQUEST, self.to_string())
            }

            AppError::Pdf(e) => {
                tracing::error!(error = %e, "PDF generation failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Error generating PDF".to_string(),
                )
            }

            AppError::Storage(StorageError::InvalidFilename(_))
            | AppError::Storage(StorageError::NotFound(_)) => {
                (StatusCode::NOT_FOUND, "File not found".to_string())
            }

            AppError::Storage(e) => {
                tracing::error!(error = %e, "Storage operation failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Storage error".to_string(),
                )
            }

            AppError::PdfNotReady => (StatusCode::NOT_FOUND, self.to_string()),

            AppError::CleanupFailed(e) => {
                tracing::error!(error = %e, "Cleanup failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Error cleaning up files".to_string(),
                )
            }

            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }

            AppError::Io(e) => {
                tracing::error!(error = %e, "IO error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(error: AppError) -> StatusCode {
        error.into_response().status()
    }

    #[test]
    fn test_client_errors_map_to_4xx() {
        assert_eq!(status_of(AppError::NoFilesProvided), StatusCode::BAD_REQUEST);
        assert_eq!(status_of(AppError::TooManyFiles(2)), StatusCode::BAD_REQUEST);
        assert_eq!(
            status_of(AppError::Pdf(PdfError::InvalidSelection)),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(AppError::Pdf(PdfError::IndexOutOfRange { index: 9, len: 6 })),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(status_of(AppError::PdfNotReady), StatusCode::NOT_FOUND);
        assert_eq!(
            status_of(AppError::Storage(StorageError::NotFound("x.jpg".into()))),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(AppError::Storage(StorageError::InvalidFilename("../x".into()))),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn test_processing_failures_map_to_5xx() {
        assert_eq!(
            status_of(AppError::Split(SplitError::Decode("bad".into()))),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            status_of(AppError::Pdf(PdfError::Render("bad".into()))),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            status_of(AppError::CleanupFailed(StorageError::Io(
                std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied")
            ))),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
