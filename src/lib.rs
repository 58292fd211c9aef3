pub mod config;
pub mod db;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod services;
pub mod state;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;

use crate::state::AppState;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(handlers::health::health))
        .route("/api/prompt", post(handlers::analyze::preview_prompt))
        .route("/api/analyze", post(handlers::analyze::analyze))
        .route("/api/analyze/batch", post(handlers::analyze::analyze_batch))
        .route("/api/analyses", get(handlers::analyses::list_analyses))
        .route("/api/analyses/:id", get(handlers::analyses::get_analysis))
        .route(
            "/api/analyses/:id/draft",
            post(handlers::analyses::create_draft),
        )
        .route("/api/events", get(handlers::events::events_stream))
        .route("/webhooks/shopify", post(handlers::webhook::shopify_webhook))
        .with_state(state)
}
