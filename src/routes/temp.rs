//! Strip file serving

use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::Response;
use axum::routing::get;
use axum::Router;

use crate::error::{AppError, Result};
use crate::state::AppState;

/// Create the strip serving router
pub fn router() -> Router<AppState> {
    Router::new().route("/temp/:filename", get(serve_strip))
}

/// GET /temp/:filename
///
/// Serves one stored strip file. Traversal attempts and unknown files
/// both come back as 404.
async fn serve_strip(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Result<Response> {
    let bytes = state.temp().read(&filename).await?;

    let content_type = mime_guess::from_path(&filename)
        .first_or_octet_stream()
        .to_string();

    Ok(Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type)
        .header(header::CONTENT_LENGTH, bytes.len())
        .body(Body::from(bytes))
        .map_err(|e| AppError::Internal(e.to_string()))?)
}
