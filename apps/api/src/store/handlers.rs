//! Axum route handlers for the candidates API.
//!
//! The listing endpoint is one of the two call sites of the filter engine:
//! it exposes the free-text, status and sort facets, then paginates the
//! filtered result.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::candidate::{Candidate, CandidateInput, CandidateUpdate};
use crate::search::criteria::{SearchCriteria, SortKey, StatusFilter};
use crate::search::engine::filter_candidates;
use crate::state::AppState;
use crate::store::fetch_snapshot;

pub const DEFAULT_PAGE_LIMIT: u32 = 10;
pub const MAX_PAGE_LIMIT: u32 = 100;

fn default_limit() -> u32 {
    DEFAULT_PAGE_LIMIT
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// Free-text facet, matched against name, role, skills and email.
    pub q: Option<String>,
    #[serde(default)]
    pub status: StatusFilter,
    /// String-typed so an unknown key surfaces as `InvalidCriteria`.
    pub sort: Option<String>,
    #[serde(default)]
    pub offset: u32,
    #[serde(default = "default_limit")]
    pub limit: u32,
}

#[derive(Debug, Serialize)]
pub struct CandidateListResponse {
    /// Matches before pagination.
    pub total: usize,
    pub candidates: Vec<Candidate>,
}

/// GET /api/v1/candidates
pub async fn handle_list_candidates(
    State(state): State<AppState>,
    Query(params): Query<ListQuery>,
) -> Result<Json<CandidateListResponse>, AppError> {
    let sort = params.sort.as_deref().map(SortKey::parse).transpose()?;
    let criteria = SearchCriteria {
        query: params.q,
        status: params.status,
        sort,
        ..Default::default()
    };

    let snapshot = fetch_snapshot(state.store.as_ref()).await?;
    let matches = filter_candidates(snapshot, &criteria)?;

    let total = matches.len();
    let limit = params.limit.min(MAX_PAGE_LIMIT);
    let candidates: Vec<Candidate> = matches
        .into_iter()
        .skip(params.offset as usize)
        .take(limit as usize)
        .collect();

    Ok(Json(CandidateListResponse { total, candidates }))
}

/// POST /api/v1/candidates
pub async fn handle_create_candidate(
    State(state): State<AppState>,
    Json(input): Json<CandidateInput>,
) -> Result<(StatusCode, Json<Candidate>), AppError> {
    if input.name.trim().is_empty() {
        return Err(AppError::Validation("name must not be empty".to_string()));
    }
    if !input.email.contains('@') {
        return Err(AppError::Validation(format!(
            "'{}' is not an email address",
            input.email
        )));
    }

    let candidate = state.store.create(input).await?;
    Ok((StatusCode::CREATED, Json(candidate)))
}

/// GET /api/v1/candidates/:id
pub async fn handle_get_candidate(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Candidate>, AppError> {
    let candidate = state.store.get(&id).await?;
    Ok(Json(candidate))
}

/// PATCH /api/v1/candidates/:id
pub async fn handle_update_candidate(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<CandidateUpdate>,
) -> Result<Json<Candidate>, AppError> {
    if patch.is_empty() {
        return Err(AppError::Validation(
            "update must set at least one field".to_string(),
        ));
    }
    let candidate = state.store.update(&id, patch).await?;
    Ok(Json(candidate))
}

/// DELETE /api/v1/candidates/:id
pub async fn handle_delete_candidate(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    state.store.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
