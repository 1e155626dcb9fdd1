//! Axum route handlers for the Search API — the second call site of the
//! filter engine. This surface exposes the full facet set (free text,
//! experience floor, skill chips, location, sort) and decorates results
//! with match scores from the ranking subsystem.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::candidate::Candidate;
use crate::search::criteria::{SearchCriteria, SortKey, StatusFilter};
use crate::search::engine::filter_candidates;
use crate::state::AppState;
use crate::store::fetch_snapshot;
use crate::store::handlers::{DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT};

const FACET_LIMIT: u32 = 100;

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SearchRequest {
    pub query: Option<String>,
    pub min_experience: i32,
    pub skills: Vec<String>,
    pub location: Option<String>,
    pub status: StatusFilter,
    pub sort: Option<SortKey>,
    pub offset: u32,
    pub limit: u32,
}

impl Default for SearchRequest {
    fn default() -> Self {
        Self {
            query: None,
            min_experience: 0,
            skills: Vec::new(),
            location: None,
            status: StatusFilter::All,
            sort: None,
            offset: 0,
            limit: DEFAULT_PAGE_LIMIT,
        }
    }
}

impl SearchRequest {
    fn criteria(&self) -> SearchCriteria {
        SearchCriteria {
            query: self.query.clone(),
            min_experience: self.min_experience,
            skills: self.skills.clone(),
            location: self.location.clone(),
            status: self.status,
            sort: self.sort,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    /// Matches before pagination.
    pub total_matches: usize,
    pub results: Vec<Candidate>,
}

/// POST /api/v1/search
pub async fn handle_search(
    State(state): State<AppState>,
    Json(request): Json<SearchRequest>,
) -> Result<Json<SearchResponse>, AppError> {
    let criteria = request.criteria();

    let snapshot = fetch_snapshot(state.store.as_ref()).await?;
    let matches = filter_candidates(snapshot, &criteria)?;
    let total_matches = matches.len();

    let limit = request.limit.min(MAX_PAGE_LIMIT);
    let mut results: Vec<Candidate> = matches
        .into_iter()
        .skip(request.offset as usize)
        .take(limit as usize)
        .collect();

    // Ranking happens after filtering and pagination; scores are display
    // data and never feed back into the filter.
    let scores = state.scorer.score(&results, &criteria).await?;
    for (candidate, score) in results.iter_mut().zip(scores) {
        candidate.match_score = Some(score);
    }

    Ok(Json(SearchResponse {
        total_matches,
        results,
    }))
}

#[derive(Debug, Deserialize)]
pub struct FacetQuery {
    #[serde(default = "default_facet_limit")]
    pub limit: u32,
}

fn default_facet_limit() -> u32 {
    FACET_LIMIT
}

/// GET /api/v1/search/skills
pub async fn handle_list_skills(
    State(state): State<AppState>,
    Query(params): Query<FacetQuery>,
) -> Result<Json<Vec<String>>, AppError> {
    let skills = state.store.distinct_skills(params.limit).await?;
    Ok(Json(skills))
}

/// GET /api/v1/search/locations
pub async fn handle_list_locations(
    State(state): State<AppState>,
    Query(params): Query<FacetQuery>,
) -> Result<Json<Vec<String>>, AppError> {
    let locations = state.store.distinct_locations(params.limit).await?;
    Ok(Json(locations))
}
