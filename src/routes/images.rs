//! Processed image listing

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Create the listing router
pub fn router() -> Router<AppState> {
    Router::new().route("/processed-images", get(list_processed))
}

/// One strip as the client sees it
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ProcessedImage {
    /// Index within the batch, also the selection index for PDF generation
    id: usize,
    original_image: String,
    part_index: u32,
    image_url: String,
}

/// GET /processed-images
///
/// The current batch in upload order. Empty array when no batch is loaded.
async fn list_processed(State(state): State<AppState>) -> Json<Vec<ProcessedImage>> {
    let parts = state.store().all().await;

    let images = parts
        .into_iter()
        .enumerate()
        .map(|(id, part)| ProcessedImage {
            id,
            original_image: part.source_name,
            part_index: part.part_index,
            image_url: format!("/temp/{}", part.temp_filename),
        })
        .collect();

    Json(images)
}
