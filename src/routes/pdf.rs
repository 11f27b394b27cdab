//! PDF generation and download routes

use axum::body::Body;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::Response;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::state::AppState;

/// Filename offered to the browser on download
const DOWNLOAD_NAME: &str = "processed_images.pdf";

/// Create the PDF router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/generate-pdf", post(generate_pdf))
        .route("/download-pdf", get(download_pdf))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeneratePdfRequest {
    /// Batch indices to include, in page order. Signed so a negative
    /// index is reported as out of range rather than a decode failure.
    #[serde(default)]
    selected_images: Vec<i64>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GeneratePdfResponse {
    message: &'static str,
    pdf_path: String,
}

/// POST /generate-pdf
///
/// Assembles the selected strips, in the order given, into the export
/// PDF. Overwrites any previously generated one.
async fn generate_pdf(
    State(state): State<AppState>,
    Json(request): Json<GeneratePdfRequest>,
) -> Result<Json<GeneratePdfResponse>> {
    let parts = state.store().all().await;
    let output = state.pdf_path().to_path_buf();

    state
        .assembler()
        .assemble(&parts, &request.selected_images, &output)
        .await?;

    tracing::info!(
        pages = request.selected_images.len(),
        path = %output.display(),
        "PDF generated"
    );

    Ok(Json(GeneratePdfResponse {
        message: "PDF generated",
        pdf_path: output.display().to_string(),
    }))
}

/// GET /download-pdf
///
/// Streams the most recently generated PDF as an attachment. 404 until
/// one has been generated.
async fn download_pdf(State(state): State<AppState>) -> Result<Response> {
    let bytes = match tokio::fs::read(state.pdf_path()).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(AppError::PdfNotReady);
        }
        Err(e) => return Err(e.into()),
    };

    Ok(Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "application/pdf")
        .header(header::CONTENT_LENGTH, bytes.len())
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", DOWNLOAD_NAME),
        )
        .body(Body::from(bytes))
        .map_err(|e| AppError::Internal(e.to_string()))?)
}
