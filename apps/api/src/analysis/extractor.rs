//! Skill extraction by plain substring search over the catalog.
//!
//! Matching is not word-boundary aware: "java" is found inside "javascript"
//! and "git" inside "digital".

use serde::{Deserialize, Serialize};

use crate::analysis::catalog::SkillCatalog;

/// Skills found in one text blob, in catalog order, without duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SkillSet(Vec<String>);

impl SkillSet {
    pub fn contains(&self, skill: &str) -> bool {
        self.0.iter().any(|s| s == skill)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for SkillSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut skills: Vec<String> = Vec::new();
        for skill in iter {
            let skill = skill.into();
            if !skills.contains(&skill) {
                skills.push(skill);
            }
        }
        SkillSet(skills)
    }
}

pub fn extract_skills(text: &str, catalog: &SkillCatalog) -> SkillSet {
    let text = text.to_lowercase();
    catalog
        .skills()
        .iter()
        .filter(|skill| text.contains(skill.as_str()))
        .cloned()
        .collect()
}
