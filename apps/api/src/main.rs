mod config;
mod db;
mod errors;
mod ingest;
mod models;
mod routes;
mod search;
mod state;
mod store;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::create_pool;
use crate::ingest::extractor::HeuristicExtractor;
use crate::routes::build_router;
use crate::search::scoring::KeywordMatchScorer;
use crate::state::AppState;
use crate::store::{CandidateStore, PgCandidateStore};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            let crate_target = env!("CARGO_PKG_NAME").replace('-', "_");
            EnvFilter::new(format!("{crate_target}={}", &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Scout API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL
    let db = create_pool(&config.database_url).await?;

    // Candidate store behind its trait so tests and future backends swap in
    let store: Arc<dyn CandidateStore> = Arc::new(PgCandidateStore::new(db));

    // Default extraction backend: deterministic heuristics. A semantic
    // extractor can replace it behind the same trait.
    let extractor = Arc::new(HeuristicExtractor);
    info!("Field extractor initialized (heuristic backend)");

    // Ranking subsystem: keyword-overlap scorer by default.
    let scorer = Arc::new(KeywordMatchScorer);

    let state = AppState {
        store,
        extractor,
        scorer,
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
