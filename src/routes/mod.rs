//! Route modules for the SixSplit server

use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub mod cleanup;
pub mod health;
pub mod images;
pub mod pdf;
pub mod temp;
pub mod upload;

/// Assemble the full application router
///
/// API routes first, the static client UI as the fallback.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let static_dir = state.config().server.static_dir.clone();

    Router::new()
        .merge(health::router())
        .merge(upload::router())
        .merge(images::router())
        .merge(pdf::router())
        .merge(cleanup::router())
        .merge(temp::router())
        .fallback_service(ServeDir::new(static_dir))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
