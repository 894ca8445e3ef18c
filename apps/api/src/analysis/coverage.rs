//! Skill reconciliation and the blended match score.
//!
//! JD skills are partitioned into exact matches, group-based partial matches and
//! misses. Coverage counts exact matches only; partial matches are reported but
//! earn no score.

use serde::{Deserialize, Serialize};

use crate::analysis::catalog::SkillCatalog;
use crate::analysis::extractor::SkillSet;
use crate::analysis::similarity::{round2, similarity};

/// JD phrases that raise every skill's weight when present anywhere in the text.
const EMPHASIS_KEYWORDS: &[&str] = &["required", "must", "mandatory", "strong"];
const EMPHASIS_WEIGHT: f64 = 1.5;

const SEMANTIC_SHARE: f64 = 0.4;
const COVERAGE_SHARE: f64 = 0.6;

/// Three disjoint partitions of the JD skill set. Each keeps JD order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub fully_matched: Vec<String>,
    pub partially_matched: Vec<String>,
    pub fully_missing: Vec<String>,
}

/// Intermediate numbers behind a final score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub semantic_score: f64,
    pub skill_coverage: f64,
    pub emphasis_weight: f64,
    /// 1 per exact match plus 0.5 per group linking a JD skill to the résumé.
    /// Informational only; the final score does not use it.
    pub credited_matches: f64,
    pub final_score: f64,
}

/// True when some group contains `jd_skill` and at least one résumé skill.
fn has_group_sibling(jd_skill: &str, resume_skills: &SkillSet, catalog: &SkillCatalog) -> bool {
    catalog
        .groups()
        .iter()
        .any(|g| g.contains(jd_skill) && g.skills.iter().any(|s| resume_skills.contains(s)))
}

pub fn partition_skills(
    resume_skills: &SkillSet,
    jd_skills: &SkillSet,
    catalog: &SkillCatalog,
) -> MatchResult {
    let mut result = MatchResult::default();
    for jd_skill in jd_skills.iter() {
        if resume_skills.contains(jd_skill) {
            result.fully_matched.push(jd_skill.to_string());
        } else if has_group_sibling(jd_skill, resume_skills, catalog) {
            result.partially_matched.push(jd_skill.to_string());
        } else {
            result.fully_missing.push(jd_skill.to_string());
        }
    }
    result
}

/// Global weight applied to every JD skill.
pub fn emphasis_weight(jd_text: &str) -> f64 {
    let lowered = jd_text.to_lowercase();
    if EMPHASIS_KEYWORDS.iter().any(|k| lowered.contains(k)) {
        EMPHASIS_WEIGHT
    } else {
        1.0
    }
}

/// Counts every qualifying group, so a skill in two groups earns 0.5 twice.
pub fn credited_matches(resume_skills: &SkillSet, jd_skills: &SkillSet, catalog: &SkillCatalog) -> f64 {
    jd_skills
        .iter()
        .map(|jd_skill| {
            if resume_skills.contains(jd_skill) {
                return 1.0;
            }
            catalog
                .groups()
                .iter()
                .filter(|g| g.contains(jd_skill) && g.skills.iter().any(|s| resume_skills.contains(s)))
                .count() as f64
                * 0.5
        })
        .fold(0.0, |acc, x| acc + x)
}

/// Weighted share of JD skills matched exactly, in `[0, 100]`. Unrounded.
pub fn skill_coverage(resume_skills: &SkillSet, jd_skills: &SkillSet, weight: f64) -> f64 {
    if jd_skills.is_empty() {
        return 0.0;
    }
    let weighted_total = weight * jd_skills.len() as f64;
    let weighted_matched = weight * jd_skills.iter().filter(|s| resume_skills.contains(s)).count() as f64;
    100.0 * weighted_matched / weighted_total
}

/// Blends semantic similarity and skill coverage into one score in `[0, 100]`.
pub fn final_score(
    resume_text: &str,
    jd_text: &str,
    resume_skills: &SkillSet,
    jd_skills: &SkillSet,
    catalog: &SkillCatalog,
) -> ScoreBreakdown {
    let semantic_score = similarity(resume_text, jd_text);
    let weight = emphasis_weight(jd_text);
    let coverage = skill_coverage(resume_skills, jd_skills, weight);
    let blended = SEMANTIC_SHARE * semantic_score + COVERAGE_SHARE * coverage;

    ScoreBreakdown {
        semantic_score,
        skill_coverage: round2(coverage),
        emphasis_weight: weight,
        credited_matches: credited_matches(resume_skills, jd_skills, catalog),
        final_score: round2(blended.clamp(0.0, 100.0)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::catalog::SkillGroup;
    use crate::analysis::extractor::extract_skills;

    fn set(skills: &[&str]) -> SkillSet {
        skills.iter().copied().collect()
    }

    #[test]
    fn test_required_python_aws_kubernetes_scenario() {
        let catalog = SkillCatalog::builtin();
        let resume = "I use Python and Docker daily";
        let jd = "Required: Python, AWS, Kubernetes";
        let resume_skills = extract_skills(resume, &catalog);
        let jd_skills = extract_skills(jd, &catalog);
        assert_eq!(resume_skills, set(&["python", "docker"]));
        assert_eq!(jd_skills, set(&["python", "aws", "kubernetes"]));

        let result = partition_skills(&resume_skills, &jd_skills, &catalog);
        assert_eq!(result.fully_matched, vec!["python"]);
        assert!(result.partially_matched.is_empty());
        assert_eq!(result.fully_missing, vec!["aws", "kubernetes"]);

        let breakdown = final_score(resume, jd, &resume_skills, &jd_skills, &catalog);
        assert_eq!(breakdown.emphasis_weight, 1.5);
        assert_eq!(breakdown.skill_coverage, 33.33);
        assert_eq!(breakdown.credited_matches, 1.0);
        let expected = round2(0.4 * breakdown.semantic_score + 0.6 * (100.0 / 3.0));
        assert_eq!(breakdown.final_score, expected);
    }

    #[test]
    fn test_group_sibling_gives_partial_match() {
        let catalog = SkillCatalog::builtin();
        let result = partition_skills(&set(&["postgresql"]), &set(&["mysql"]), &catalog);
        assert_eq!(result.partially_matched, vec!["mysql"]);
        assert!(result.fully_matched.is_empty());
        assert!(result.fully_missing.is_empty());
    }

    #[test]
    fn test_partitions_are_disjoint_and_complete() {
        let catalog = SkillCatalog::builtin();
        let resume = set(&["python", "gcp", "flask", "git"]);
        let jd = set(&["python", "aws", "django", "kubernetes", "redis", "git"]);
        let result = partition_skills(&resume, &jd, &catalog);

        let mut all: Vec<&String> = result
            .fully_matched
            .iter()
            .chain(&result.partially_matched)
            .chain(&result.fully_missing)
            .collect();
        assert_eq!(all.len(), jd.len());
        all.sort();
        all.dedup();
        assert_eq!(all.len(), jd.len());
        assert_eq!(result.fully_matched, vec!["python", "git"]);
        assert_eq!(result.partially_matched, vec!["aws", "django"]);
        assert_eq!(result.fully_missing, vec!["kubernetes", "redis"]);
    }

    #[test]
    fn test_partial_matches_do_not_raise_coverage() {
        let resume = set(&["postgresql"]);
        let jd = set(&["mysql"]);
        assert_eq!(skill_coverage(&resume, &jd, 1.0), 0.0);
        assert_eq!(credited_matches(&resume, &jd, &SkillCatalog::builtin()), 0.5);
    }

    #[test]
    fn test_credited_matches_counts_each_group() {
        let catalog = SkillCatalog::new(
            vec!["sql".into(), "mysql".into(), "sqlite".into()],
            vec![
                SkillGroup { name: "relational".into(), skills: vec!["mysql".into(), "sqlite".into()] },
                SkillGroup { name: "query".into(), skills: vec!["mysql".into(), "sql".into()] },
            ],
        );
        let resume = set(&["sqlite", "sql"]);
        let jd = set(&["mysql"]);
        assert_eq!(credited_matches(&resume, &jd, &catalog), 1.0);
    }

    #[test]
    fn test_empty_jd_skills_score_is_semantic_share() {
        let catalog = SkillCatalog::builtin();
        let resume = "Experienced baker, sourdough and pastries";
        let jd = "Bakery hiring sourdough baker";
        let breakdown = final_score(resume, jd, &SkillSet::default(), &SkillSet::default(), &catalog);
        assert_eq!(breakdown.skill_coverage, 0.0);
        assert_eq!(breakdown.final_score, round2(0.4 * breakdown.semantic_score));
    }

    #[test]
    fn test_no_overlap_serializes_without_negative_zero() {
        let catalog = SkillCatalog::builtin();
        let breakdown = final_score(
            "python docker",
            "accounting payroll ledger",
            &set(&["python", "docker"]),
            &SkillSet::default(),
            &catalog,
        );
        assert!(breakdown.semantic_score.is_sign_positive());
        assert!(breakdown.credited_matches.is_sign_positive());
        let json = serde_json::to_string(&breakdown).unwrap();
        assert!(!json.contains("-0.0"), "{json}");
    }

    #[test]
    fn test_emphasis_weight_is_substring_based() {
        assert_eq!(emphasis_weight("Strongly preferred"), 1.5);
        assert_eq!(emphasis_weight("MANDATORY: Rust"), 1.5);
        assert_eq!(emphasis_weight("Nice to have: Go"), 1.0);
    }

    #[test]
    fn test_full_coverage_with_identical_texts_scores_100() {
        let catalog = SkillCatalog::builtin();
        let text = "Python Docker AWS engineer";
        let skills = extract_skills(text, &catalog);
        let breakdown = final_score(text, text, &skills, &skills, &catalog);
        assert_eq!(breakdown.final_score, 100.0);
    }
}
