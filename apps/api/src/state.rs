use std::sync::Arc;

use crate::analysis::engine::MatchEngine;
use crate::config::Config;
use crate::extraction::DocumentExtractor;
use crate::storage::AnalysisStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Catalog-backed scoring engine. Immutable after startup.
    pub engine: MatchEngine,
    /// Pluggable résumé text extractor. Default: DefaultExtractor (PDF + plain text).
    pub extractor: Arc<dyn DocumentExtractor>,
    /// Postgres when DATABASE_URL is set, in-memory otherwise.
    pub store: Arc<dyn AnalysisStore>,
}
