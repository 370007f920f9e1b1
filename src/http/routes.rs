use super::handlers;
use super::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Create the HTTP router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Recordings
        .route("/recordings", get(handlers::list_recordings))
        .route(
            "/recordings/:id",
            get(handlers::get_recording).delete(handlers::delete_recording),
        )
        .route("/recordings/:id/title", post(handlers::set_title))
        .route("/recordings/:id/share", get(handlers::share_recording))
        // Enrichment
        .route("/recordings/:id/generate", post(handlers::generate_content))
        .route(
            "/recordings/:id/translate",
            post(handlers::translate_recording),
        )
        // Capture lifecycle
        .route("/capture", get(handlers::capture_status))
        .route("/capture/start", post(handlers::start_capture))
        .route("/capture/stop", post(handlers::stop_capture))
        .route("/capture/save", post(handlers::save_capture))
        .route("/capture/discard", post(handlers::discard_capture))
        // Settings
        .route(
            "/settings/api-key",
            get(handlers::get_api_key).put(handlers::set_api_key),
        )
        // Add tracing middleware for request logging
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
