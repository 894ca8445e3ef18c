mod analysis;
mod auth;
mod config;
mod db;
mod errors;
mod extraction;
mod models;
mod routes;
mod state;
mod storage;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use std::sync::Arc;

use crate::analysis::catalog::load_catalog;
use crate::analysis::engine::MatchEngine;
use crate::config::Config;
use crate::db::create_pool;
use crate::extraction::DefaultExtractor;
use crate::routes::build_router;
use crate::state::AppState;
use crate::storage::{AnalysisStore, MemoryAnalysisStore, PgAnalysisStore};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting SkillMatch API v{}", env!("CARGO_PKG_VERSION"));

    // Load skill catalog and roadmap table (built-in unless CATALOG_PATH is set)
    let (catalog, roadmap) =
        load_catalog(config.catalog_path.as_deref()).context("failed to load skill catalog")?;
    info!(
        "Skill catalog ready: {} skills, {} groups, {} roadmap plans",
        catalog.skills().len(),
        catalog.groups().len(),
        roadmap.plan_count()
    );
    let engine = MatchEngine::new(catalog, roadmap);

    // Initialize analysis store
    let store: Arc<dyn AnalysisStore> = match &config.database_url {
        Some(url) => Arc::new(PgAnalysisStore::new(create_pool(url).await?)),
        None => {
            warn!("DATABASE_URL not set; analyses are kept in memory and lost on restart");
            Arc::new(MemoryAnalysisStore::new())
        }
    };

    // Build app state
    let state = AppState {
        config: config.clone(),
        engine,
        extractor: Arc::new(DefaultExtractor),
        store,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the frontend host is fixed

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
