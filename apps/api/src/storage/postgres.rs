use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::analysis::{AnalysisRow, AnalysisSummary};
use crate::storage::{AnalysisStore, NewAnalysis};

pub struct PgAnalysisStore {
    db: PgPool,
}

impl PgAnalysisStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AnalysisStore for PgAnalysisStore {
    async fn insert(&self, analysis: NewAnalysis) -> Result<AnalysisRow, AppError> {
        let row = analysis.into_row()?;

        let stored = sqlx::query_as::<_, AnalysisRow>(
            r#"
            INSERT INTO analyses
                (id, owner, resume_name, match_score, readiness_level, estimated_days, report, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(row.id)
        .bind(&row.owner)
        .bind(&row.resume_name)
        .bind(row.match_score)
        .bind(&row.readiness_level)
        .bind(row.estimated_days)
        .bind(&row.report)
        .bind(row.created_at)
        .fetch_one(&self.db)
        .await?;

        Ok(stored)
    }

    async fn get(&self, owner: &str, id: Uuid) -> Result<Option<AnalysisRow>, AppError> {
        Ok(sqlx::query_as::<_, AnalysisRow>(
            "SELECT * FROM analyses WHERE id = $1 AND owner = $2",
        )
        .bind(id)
        .bind(owner)
        .fetch_optional(&self.db)
        .await?)
    }

    async fn list(&self, owner: &str) -> Result<Vec<AnalysisSummary>, AppError> {
        Ok(sqlx::query_as::<_, AnalysisSummary>(
            r#"
            SELECT id, resume_name, match_score, readiness_level, estimated_days, created_at
            FROM analyses
            WHERE owner = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(owner)
        .fetch_all(&self.db)
        .await?)
    }

    async fn delete(&self, owner: &str, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM analyses WHERE id = $1 AND owner = $2")
            .bind(id)
            .bind(owner)
            .execute(&self.db)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
