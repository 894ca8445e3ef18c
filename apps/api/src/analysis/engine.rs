//! Match engine: the single entry point from raw résumé and JD text to a report.
//!
//! Pure and synchronous. Handlers run it on the blocking pool because TF-IDF over
//! a long résumé is CPU-bound.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::analysis::catalog::{RoadmapTable, SkillCatalog};
use crate::analysis::coverage::{final_score, partition_skills, ScoreBreakdown};
use crate::analysis::extractor::{extract_skills, SkillSet};
use crate::analysis::readiness::ReadinessLevel;
use crate::analysis::roadmap::{generate_roadmap, RoadmapEntry};
use crate::analysis::suggestions::generate_suggestions;

/// Full analysis returned to callers and persisted as JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub match_score: f64,
    pub readiness_level: ReadinessLevel,
    pub resume_skills: SkillSet,
    pub jd_skills: SkillSet,
    pub fully_matched: Vec<String>,
    pub partially_matched: Vec<String>,
    pub fully_missing: Vec<String>,
    pub roadmap: Vec<RoadmapEntry>,
    pub estimated_days_to_ready: u32,
    pub suggestions: Vec<String>,
    pub breakdown: ScoreBreakdown,
}

/// Holds the read-only catalog tables. Cheap to clone.
#[derive(Debug, Clone)]
pub struct MatchEngine {
    catalog: Arc<SkillCatalog>,
    roadmap: Arc<RoadmapTable>,
}

impl MatchEngine {
    pub fn new(catalog: SkillCatalog, roadmap: RoadmapTable) -> Self {
        Self {
            catalog: Arc::new(catalog),
            roadmap: Arc::new(roadmap),
        }
    }

    pub fn builtin() -> Self {
        Self::new(SkillCatalog::builtin(), RoadmapTable::builtin())
    }

    pub fn analyze(&self, resume_text: &str, jd_text: &str) -> AnalysisReport {
        let resume_skills = extract_skills(resume_text, &self.catalog);
        let jd_skills = extract_skills(jd_text, &self.catalog);
        debug!(?resume_skills, ?jd_skills, "Extracted skills");

        let partitions = partition_skills(&resume_skills, &jd_skills, &self.catalog);
        let breakdown = final_score(resume_text, jd_text, &resume_skills, &jd_skills, &self.catalog);
        debug!(
            semantic = breakdown.semantic_score,
            coverage = breakdown.skill_coverage,
            final_score = breakdown.final_score,
            "Scored analysis"
        );

        let roadmap = generate_roadmap(&partitions.fully_missing, &self.roadmap);
        let match_score = breakdown.final_score;
        let suggestions = generate_suggestions(
            match_score,
            &partitions.fully_missing,
            &partitions.partially_matched,
            resume_skills.len(),
        );

        AnalysisReport {
            match_score,
            readiness_level: ReadinessLevel::from_score(match_score),
            resume_skills,
            jd_skills,
            fully_matched: partitions.fully_matched,
            partially_matched: partitions.partially_matched,
            fully_missing: partitions.fully_missing,
            roadmap: roadmap.entries,
            estimated_days_to_ready: roadmap.total_days,
            suggestions,
            breakdown,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analyze_end_to_end() {
        let engine = MatchEngine::builtin();
        let report = engine.analyze(
            "I use Python and Docker daily",
            "Required: Python, AWS, Kubernetes",
        );

        assert_eq!(report.fully_matched, vec!["python"]);
        assert_eq!(report.fully_missing, vec!["aws", "kubernetes"]);
        assert_eq!(report.breakdown.skill_coverage, 33.33);
        assert_eq!(report.roadmap.len(), 1);
        assert_eq!(report.roadmap[0].skill, "aws");
        assert_eq!(report.estimated_days_to_ready, 7);
        assert_eq!(report.readiness_level, ReadinessLevel::from_score(report.match_score));
        assert!(report.match_score >= 0.0 && report.match_score <= 100.0);
        assert_eq!(
            report.suggestions[1],
            "Consider adding these skills: aws, kubernetes"
        );
        assert_eq!(report.suggestions.len(), 4);
    }

    #[test]
    fn test_report_serializes_readiness_label() {
        let report = MatchEngine::builtin().analyze("", "");
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["readiness_level"], "High Risk – Major skill gaps");
        assert_eq!(json["match_score"], 0.0);
        assert!(json["resume_skills"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_disjoint_texts_report_has_no_negative_zero() {
        let report = MatchEngine::builtin().analyze("python docker", "accounting payroll ledger");
        let json = serde_json::to_string(&report).unwrap();
        assert!(!json.contains("-0.0"), "{json}");
        assert!(report.breakdown.semantic_score.is_sign_positive());
    }

    #[test]
    fn test_score_has_two_decimals() {
        let report = MatchEngine::builtin().analyze(
            "Built Flask services on GCP with MySQL and Git",
            "Strong Django, AWS and PostgreSQL experience required",
        );
        let scaled = report.match_score * 100.0;
        assert!((scaled - scaled.round()).abs() < 1e-6);
        assert_eq!(report.fully_matched, vec!["sql"]);
        assert_eq!(report.partially_matched, vec!["postgresql", "django", "aws"]);
    }
}
