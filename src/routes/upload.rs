//! Upload route
//!
//! Accepts up to two images as multipart form data, splits each into six
//! strips, persists the strips and publishes the batch.

use axum::extract::{DefaultBodyLimit, Multipart, State};
use axum::routing::post;
use axum::{Json, Router};
use serde::Serialize;
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::state::AppState;
use crate::storage::TempStorage;
use crate::store::ImagePart;

/// Most images accepted per upload
pub const MAX_FILES: usize = 2;

/// Maximum accepted request body: 50MB
const MAX_UPLOAD_BYTES: usize = 50 * 1024 * 1024;

/// Create the upload router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/upload", post(upload))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
}

#[derive(Serialize)]
struct UploadResponse {
    message: &'static str,
    count: usize,
}

/// POST /upload
///
/// Splits each uploaded image into strips. The new batch replaces the
/// previous one wholesale and the displaced batch's files are deleted.
/// On any failure the half-written batch is rolled back and nothing is
/// published.
async fn upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>> {
    let mut uploads: Vec<(String, Vec<u8>)> = Vec::new();

    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("images") {
            continue;
        }
        if uploads.len() == MAX_FILES {
            return Err(AppError::TooManyFiles(MAX_FILES));
        }

        let source_name = field
            .file_name()
            .map(|name| name.to_string())
            .unwrap_or_else(|| format!("upload-{}", uploads.len() + 1));
        let data = field.bytes().await?;

        uploads.push((source_name, data.to_vec()));
    }

    if uploads.is_empty() {
        return Err(AppError::NoFilesProvided);
    }

    let batch_id = Uuid::new_v4();
    let mut parts: Vec<ImagePart> = Vec::new();

    for (source_name, data) in uploads {
        let strips = match state.splitter().split(data).await {
            Ok(strips) => strips,
            Err(e) => {
                rollback(&state, &parts).await;
                return Err(e.into());
            }
        };

        for strip in strips {
            let temp_filename = TempStorage::part_filename(batch_id, parts.len());
            if let Err(e) = state.temp().write(&temp_filename, &strip.jpeg).await {
                rollback(&state, &parts).await;
                return Err(e.into());
            }

            parts.push(ImagePart {
                source_name: source_name.clone(),
                part_index: strip.index,
                data: strip.jpeg.into(),
                temp_filename,
            });
        }
    }

    let count = parts.len();
    tracing::info!(batch_id = %batch_id, parts = count, "Upload batch processed");

    let displaced = state.store().replace(parts).await;
    if !displaced.is_empty() {
        let displaced_files: Vec<String> = displaced
            .into_iter()
            .map(|part| part.temp_filename)
            .collect();
        state.temp().remove_batch(displaced_files).await;
    }

    Ok(Json(UploadResponse {
        message: "Images processed",
        count,
    }))
}

/// Delete the files of a batch that will never be published
async fn rollback(state: &AppState, parts: &[ImagePart]) {
    let files: Vec<String> = parts
        .iter()
        .map(|part| part.temp_filename.clone())
        .collect();
    state.temp().remove_batch(files).await;
}
