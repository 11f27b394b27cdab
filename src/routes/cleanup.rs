//! Cleanup route

use axum::extract::State;
use axum::routing::post;
use axum::Router;

use crate::error::{AppError, Result};
use crate::state::AppState;

/// Create the cleanup router
pub fn router() -> Router<AppState> {
    Router::new().route("/cleanup", post(cleanup))
}

/// POST /cleanup
///
/// Deletes every strip file and the generated PDF, then empties the
/// current batch. Safe to call repeatedly; also wired to the client's
/// page-unload beacon.
async fn cleanup(State(state): State<AppState>) -> Result<&'static str> {
    let removed = state
        .temp()
        .remove_all()
        .await
        .map_err(AppError::CleanupFailed)?;

    if let Err(e) = tokio::fs::remove_file(state.pdf_path()).await {
        if e.kind() != std::io::ErrorKind::NotFound {
            tracing::warn!(error = %e, "Failed to remove generated PDF");
        }
    }

    state.store().clear().await;

    tracing::info!(removed = removed, "Cleanup completed");
    Ok("Cleanup completed")
}
