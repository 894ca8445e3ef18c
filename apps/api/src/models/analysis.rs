use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

/// One stored analysis. `report` holds the full `AnalysisReport` as JSONB.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AnalysisRow {
    pub id: Uuid,
    pub owner: String,
    pub resume_name: String,
    pub match_score: f64,
    pub readiness_level: String,
    pub estimated_days: i32,
    pub report: Value,
    pub created_at: DateTime<Utc>,
}

/// List view of an analysis, without the report body.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AnalysisSummary {
    pub id: Uuid,
    pub resume_name: String,
    pub match_score: f64,
    pub readiness_level: String,
    pub estimated_days: i32,
    pub created_at: DateTime<Utc>,
}

impl From<&AnalysisRow> for AnalysisSummary {
    fn from(row: &AnalysisRow) -> Self {
        AnalysisSummary {
            id: row.id,
            resume_name: row.resume_name.clone(),
            match_score: row.match_score,
            readiness_level: row.readiness_level.clone(),
            estimated_days: row.estimated_days,
            created_at: row.created_at,
        }
    }
}
