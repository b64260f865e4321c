/// API route modules
pub mod extract;
pub mod health;
pub mod history;
pub mod media;

use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, TraceLayer},
};

/// Build the application router
pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        // Media
        .route("/stream/:id/:index", get(media::stream))
        .route("/download/:id/:index", get(media::download))
        .route("/check-lrc/:id/:index", get(media::check_lrc))
        // History
        .route("/history/:username/:id", get(history::get_history))
        .route("/history", post(history::save_history))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::default().include_headers(true)),
        )
        .layer(CorsLayer::permissive())
        .with_state(app_state)
}
