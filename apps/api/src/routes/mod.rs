pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::ingest::handlers as ingest;
use crate::search::handlers as search;
use crate::state::AppState;
use crate::store::handlers as candidates;

pub fn build_router(state: AppState) -> Router {
    // Batch uploads carry several files per request; the per-file cap is
    // enforced per item inside the pipeline.
    let body_limit = state.config.max_upload_bytes.saturating_mul(16);

    Router::new()
        .route("/health", get(health::health_handler))
        // Candidates API
        .route(
            "/api/v1/candidates",
            get(candidates::handle_list_candidates).post(candidates::handle_create_candidate),
        )
        .route(
            "/api/v1/candidates/:id",
            get(candidates::handle_get_candidate)
                .patch(candidates::handle_update_candidate)
                .delete(candidates::handle_delete_candidate),
        )
        // Search API
        .route("/api/v1/search", post(search::handle_search))
        .route("/api/v1/search/skills", get(search::handle_list_skills))
        .route(
            "/api/v1/search/locations",
            get(search::handle_list_locations),
        )
        // Ingestion API
        .route("/api/v1/cv/upload", post(ingest::handle_upload))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
