//! Skill catalog, skill groups and the roadmap table.
//!
//! All three are immutable after startup. `MatchEngine` holds them behind an `Arc`
//! and hands out shared references to the pure scoring functions.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

const BUILTIN_SKILLS: &[&str] = &[
    "python",
    "java",
    "c++",
    "sql",
    "mysql",
    "postgresql",
    "machine learning",
    "deep learning",
    "tensorflow",
    "pytorch",
    "react",
    "node.js",
    "fastapi",
    "flask",
    "django",
    "data structures",
    "algorithms",
    "system design",
    "aws",
    "azure",
    "gcp",
    "docker",
    "kubernetes",
    "rest api",
    "microservices",
    "html",
    "css",
    "javascript",
    "mongodb",
    "redis",
    "git",
    "linux",
];

const BUILTIN_GROUPS: &[(&str, &[&str])] = &[
    ("cloud", &["aws", "azure", "gcp"]),
    ("backend_framework", &["fastapi", "flask", "django"]),
    ("database", &["sql", "mysql", "postgresql", "mongodb"]),
];

const BUILTIN_ROADMAP: &[(&str, u32, &[&str])] = &[
    (
        "fastapi",
        7,
        &["Learn FastAPI basics", "Build CRUD API project", "Deploy on Render"],
    ),
    (
        "docker",
        5,
        &[
            "Learn Docker fundamentals",
            "Dockerize a Python app",
            "Push image to Docker Hub",
        ],
    ),
    (
        "system design",
        7,
        &[
            "Learn scalability basics",
            "Study load balancing",
            "Design URL shortener system",
        ],
    ),
    (
        "rest api",
        4,
        &[
            "Understand REST principles",
            "Learn HTTP methods",
            "Build RESTful backend",
        ],
    ),
    (
        "postgresql",
        5,
        &[
            "Learn PostgreSQL basics",
            "Practice joins and indexing",
            "Integrate with backend project",
        ],
    ),
    (
        "aws",
        7,
        &["Learn EC2 basics", "Deploy app on AWS", "Understand S3 and IAM"],
    ),
];

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse catalog file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("skill group '{0}' has no members")]
    EmptyGroup(String),

    #[error("roadmap entry for '{0}' has no tasks")]
    EmptyPlan(String),
}

/// A named cluster of related skills. Membership earns partial credit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillGroup {
    pub name: String,
    pub skills: Vec<String>,
}

impl SkillGroup {
    pub fn contains(&self, skill: &str) -> bool {
        self.skills.iter().any(|s| s == skill)
    }
}

/// Known skills (in extraction order) plus the groups used for partial matching.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillCatalog {
    skills: Vec<String>,
    groups: Vec<SkillGroup>,
}

impl SkillCatalog {
    pub fn new(skills: Vec<String>, groups: Vec<SkillGroup>) -> Self {
        Self {
            skills: normalize_skills(skills),
            groups: groups
                .into_iter()
                .map(|g| SkillGroup {
                    name: g.name,
                    skills: normalize_skills(g.skills),
                })
                .collect(),
        }
    }

    pub fn builtin() -> Self {
        Self::new(
            BUILTIN_SKILLS.iter().map(|s| s.to_string()).collect(),
            BUILTIN_GROUPS
                .iter()
                .map(|(name, skills)| SkillGroup {
                    name: name.to_string(),
                    skills: skills.iter().map(|s| s.to_string()).collect(),
                })
                .collect(),
        )
    }

    pub fn skills(&self) -> &[String] {
        &self.skills
    }

    pub fn groups(&self) -> &[SkillGroup] {
        &self.groups
    }
}

/// Fixed learning plan for one skill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearningPlan {
    pub skill: String,
    pub days: u32,
    pub tasks: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoadmapTable {
    plans: Vec<LearningPlan>,
}

impl RoadmapTable {
    pub fn new(plans: Vec<LearningPlan>) -> Self {
        let plans = plans
            .into_iter()
            .map(|p| LearningPlan {
                skill: p.skill.trim().to_lowercase(),
                ..p
            })
            .collect();
        Self { plans }
    }

    pub fn builtin() -> Self {
        Self::new(
            BUILTIN_ROADMAP
                .iter()
                .map(|(skill, days, tasks)| LearningPlan {
                    skill: skill.to_string(),
                    days: *days,
                    tasks: tasks.iter().map(|t| t.to_string()).collect(),
                })
                .collect(),
        )
    }

    pub fn lookup(&self, skill: &str) -> Option<&LearningPlan> {
        self.plans.iter().find(|p| p.skill == skill)
    }

    pub fn plan_count(&self) -> usize {
        self.plans.len()
    }
}

/// On-disk override format. Omitted sections fall back to the built-in data.
#[derive(Debug, Default, Deserialize)]
struct CatalogFile {
    skills: Option<Vec<String>>,
    groups: Option<Vec<SkillGroup>>,
    roadmap: Option<Vec<LearningPlan>>,
}

/// Loads the catalog and roadmap, optionally overridden by a JSON file.
pub fn load_catalog(path: Option<&Path>) -> Result<(SkillCatalog, RoadmapTable), CatalogError> {
    let Some(path) = path else {
        return Ok((SkillCatalog::builtin(), RoadmapTable::builtin()));
    };

    let shown_path = path.display().to_string();
    let raw = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: shown_path.clone(),
        source,
    })?;
    let file: CatalogFile = serde_json::from_str(&raw).map_err(|source| CatalogError::Parse {
        path: shown_path.clone(),
        source,
    })?;

    let builtin = SkillCatalog::builtin();
    let catalog = SkillCatalog::new(
        file.skills.unwrap_or_else(|| builtin.skills.clone()),
        file.groups.unwrap_or_else(|| builtin.groups.clone()),
    );
    if let Some(group) = catalog.groups.iter().find(|g| g.skills.is_empty()) {
        return Err(CatalogError::EmptyGroup(group.name.clone()));
    }

    let roadmap = match file.roadmap {
        Some(plans) => RoadmapTable::new(plans),
        None => RoadmapTable::builtin(),
    };
    if let Some(plan) = roadmap.plans.iter().find(|p| p.tasks.is_empty()) {
        return Err(CatalogError::EmptyPlan(plan.skill.clone()));
    }

    info!(
        "Loaded catalog override from {shown_path}: {} skills, {} groups, {} roadmap plans",
        catalog.skills.len(),
        catalog.groups.len(),
        roadmap.plan_count()
    );
    Ok((catalog, roadmap))
}

/// Lowercases, trims and de-duplicates while keeping first-seen order.
fn normalize_skills(skills: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    skills
        .into_iter()
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty() && seen.insert(s.clone()))
        .collect()
}
