//! Persistence for completed analyses.
//!
//! `AppState` holds an `Arc<dyn AnalysisStore>`: Postgres when `DATABASE_URL`
//! is configured, the in-memory store otherwise.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use uuid::Uuid;

use crate::analysis::engine::AnalysisReport;
use crate::errors::AppError;
use crate::models::analysis::{AnalysisRow, AnalysisSummary};

pub use memory::MemoryAnalysisStore;
pub use postgres::PgAnalysisStore;

/// An analysis ready to be stored.
#[derive(Debug, Clone)]
pub struct NewAnalysis {
    pub owner: String,
    pub resume_name: String,
    pub report: AnalysisReport,
}

impl NewAnalysis {
    /// Builds the row persisted for this analysis with a fresh id.
    pub fn into_row(self) -> Result<AnalysisRow, AppError> {
        let report = serde_json::to_value(&self.report)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("failed to encode report: {e}")))?;
        Ok(AnalysisRow {
            id: Uuid::new_v4(),
            owner: self.owner,
            resume_name: self.resume_name,
            match_score: self.report.match_score,
            readiness_level: self.report.readiness_level.label().to_string(),
            estimated_days: i32::try_from(self.report.estimated_days_to_ready).unwrap_or(i32::MAX),
            report,
            created_at: chrono::Utc::now(),
        })
    }
}

#[async_trait]
pub trait AnalysisStore: Send + Sync {
    async fn insert(&self, analysis: NewAnalysis) -> Result<AnalysisRow, AppError>;

    /// Returns the analysis only when it belongs to `owner`.
    async fn get(&self, owner: &str, id: Uuid) -> Result<Option<AnalysisRow>, AppError>;

    /// The owner's analyses, newest first.
    async fn list(&self, owner: &str) -> Result<Vec<AnalysisSummary>, AppError>;

    /// Removes the analysis if `owner` has it. Returns whether a row was removed.
    async fn delete(&self, owner: &str, id: Uuid) -> Result<bool, AppError>;
}
