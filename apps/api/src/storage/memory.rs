use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::analysis::{AnalysisRow, AnalysisSummary};
use crate::storage::{AnalysisStore, NewAnalysis};

/// Process-local store. Contents are lost on restart.
#[derive(Debug, Default)]
pub struct MemoryAnalysisStore {
    rows: RwLock<Vec<AnalysisRow>>,
}

impl MemoryAnalysisStore {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub async fn row_count(&self) -> usize {
        self.rows.read().await.len()
    }
}

#[async_trait]
impl AnalysisStore for MemoryAnalysisStore {
    async fn insert(&self, analysis: NewAnalysis) -> Result<AnalysisRow, AppError> {
        let row = analysis.into_row()?;
        self.rows.write().await.push(row.clone());
        Ok(row)
    }

    async fn get(&self, owner: &str, id: Uuid) -> Result<Option<AnalysisRow>, AppError> {
        let rows = self.rows.read().await;
        Ok(rows.iter().find(|r| r.id == id && r.owner == owner).cloned())
    }

    async fn list(&self, owner: &str) -> Result<Vec<AnalysisSummary>, AppError> {
        let rows = self.rows.read().await;
        // Insertion order is creation order, so reversing gives newest first.
        Ok(rows
            .iter()
            .rev()
            .filter(|r| r.owner == owner)
            .map(AnalysisSummary::from)
            .collect())
    }

    async fn delete(&self, owner: &str, id: Uuid) -> Result<bool, AppError> {
        let mut rows = self.rows.write().await;
        let before = rows.len();
        rows.retain(|r| !(r.id == id && r.owner == owner));
        Ok(rows.len() < before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::engine::MatchEngine;

    fn new_analysis(owner: &str, name: &str) -> NewAnalysis {
        NewAnalysis {
            owner: owner.to_string(),
            resume_name: name.to_string(),
            report: MatchEngine::builtin().analyze("Python and Docker", "Required: Python, AWS"),
        }
    }

    #[tokio::test]
    async fn test_insert_then_get_by_owner() {
        let store = MemoryAnalysisStore::new();
        let row = store.insert(new_analysis("alice", "cv.pdf")).await.unwrap();

        let found = store.get("alice", row.id).await.unwrap().unwrap();
        assert_eq!(found.resume_name, "cv.pdf");
        assert_eq!(found.estimated_days, 7);
        assert_eq!(found.report["fully_missing"][0], "aws");
    }

    #[tokio::test]
    async fn test_other_owner_cannot_read() {
        let store = MemoryAnalysisStore::new();
        let row = store.insert(new_analysis("alice", "cv.pdf")).await.unwrap();
        assert!(store.get("bob", row.id).await.unwrap().is_none());
        assert!(store.get("alice", Uuid::new_v4()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_only_removes_own_analysis() {
        let store = MemoryAnalysisStore::new();
        let row = store.insert(new_analysis("alice", "cv.pdf")).await.unwrap();

        assert!(!store.delete("bob", row.id).await.unwrap());
        assert!(store.get("alice", row.id).await.unwrap().is_some());

        assert!(store.delete("alice", row.id).await.unwrap());
        assert!(store.get("alice", row.id).await.unwrap().is_none());
        assert!(!store.delete("alice", row.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_list_is_newest_first_and_scoped() {
        let store = MemoryAnalysisStore::new();
        store.insert(new_analysis("alice", "first.pdf")).await.unwrap();
        store.insert(new_analysis("bob", "other.pdf")).await.unwrap();
        store.insert(new_analysis("alice", "second.pdf")).await.unwrap();

        let names: Vec<String> = store
            .list("alice")
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.resume_name)
            .collect();
        assert_eq!(names, vec!["second.pdf", "first.pdf"]);
    }
}
