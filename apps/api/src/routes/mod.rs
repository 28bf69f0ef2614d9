pub mod analyze;
pub mod health;

use axum::{extract::DefaultBodyLimit, routing::get, Router};

use crate::state::AppState;

/// Room for multipart framing and the description on top of the file itself,
/// so oversized files reach the upload policy's own size check.
const BODY_LIMIT_HEADROOM: usize = 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state
        .upload_policy
        .max_file_size_bytes
        .saturating_add(BODY_LIMIT_HEADROOM);

    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/analyze",
            get(analyze::handle_analyze_status).post(analyze::handle_analyze),
        )
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
