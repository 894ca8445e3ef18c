use serde::{Deserialize, Serialize};

use crate::analysis::catalog::RoadmapTable;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoadmapEntry {
    pub skill: String,
    pub duration_days: u32,
    pub tasks: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Roadmap {
    pub entries: Vec<RoadmapEntry>,
    pub total_days: u32,
}

/// Builds a learning roadmap for the missing skills, in the order given.
/// Skills with no plan in the table are skipped.
pub fn generate_roadmap(missing_skills: &[String], table: &RoadmapTable) -> Roadmap {
    let entries: Vec<RoadmapEntry> = missing_skills
        .iter()
        .filter_map(|skill| table.lookup(skill))
        .map(|plan| RoadmapEntry {
            skill: plan.skill.clone(),
            duration_days: plan.days,
            tasks: plan.tasks.clone(),
        })
        .collect();
    let total_days = entries.iter().map(|e| e.duration_days).sum();
    Roadmap { entries, total_days }
}
