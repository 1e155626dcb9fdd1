use std::sync::Arc;

use crate::config::Config;
use crate::ingest::extractor::FieldExtractor;
use crate::search::scoring::MatchScorer;
use crate::store::CandidateStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn CandidateStore>,
    /// Pluggable extraction backend. Default: HeuristicExtractor; a semantic
    /// pipeline plugs in behind the same trait.
    pub extractor: Arc<dyn FieldExtractor>,
    /// Pluggable ranking subsystem. Scores decorate search results after
    /// filtering; the filter engine never reads them.
    pub scorer: Arc<dyn MatchScorer>,
    pub config: Config,
}
