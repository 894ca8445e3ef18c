//! Human-readable improvement tips.

const MAX_NAMED_MISSING: usize = 5;
const MIN_RESUME_SKILLS: usize = 5;

const TIER_LOW: &str =
    "Your resume has major skill gaps. Focus on learning core required technologies first.";
const TIER_MID: &str =
    "You are close to the job requirements. Strengthen your weak areas and add more projects.";
const TIER_HIGH: &str =
    "Your profile is strong. Focus on polishing achievements and interview preparation.";
const PARTIAL_DEPTH: &str = "You have related knowledge. Improve depth in partially matched skills.";
const MORE_PROJECTS: &str = "Add more technical projects to strengthen your resume.";
const ATS_TIP: &str = "Use action verbs and quantify achievements (e.g., Improved accuracy by 20%).";

/// Tips in fixed order: score tier, missing skills, partial depth, projects, ATS wording.
pub fn generate_suggestions(
    match_score: f64,
    fully_missing: &[String],
    partially_matched: &[String],
    resume_skill_count: usize,
) -> Vec<String> {
    let mut suggestions = Vec::new();

    let tier = if match_score < 40.0 {
        TIER_LOW
    } else if match_score < 70.0 {
        TIER_MID
    } else {
        TIER_HIGH
    };
    suggestions.push(tier.to_string());

    if !fully_missing.is_empty() {
        let named: Vec<&str> = fully_missing
            .iter()
            .take(MAX_NAMED_MISSING)
            .map(String::as_str)
            .collect();
        suggestions.push(format!("Consider adding these skills: {}", named.join(", ")));
    }

    if !partially_matched.is_empty() {
        suggestions.push(PARTIAL_DEPTH.to_string());
    }

    if resume_skill_count < MIN_RESUME_SKILLS {
        suggestions.push(MORE_PROJECTS.to_string());
    }

    suggestions.push(ATS_TIP.to_string());
    suggestions
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_low_score_with_all_gaps() {
        let missing = strings(&["aws", "docker", "kubernetes", "redis", "git", "linux"]);
        let tips = generate_suggestions(12.5, &missing, &strings(&["mysql"]), 2);
        assert_eq!(tips.len(), 5);
        assert_eq!(tips[0], TIER_LOW);
        assert_eq!(tips[1], "Consider adding these skills: aws, docker, kubernetes, redis, git");
        assert_eq!(tips[2], PARTIAL_DEPTH);
        assert_eq!(tips[3], MORE_PROJECTS);
        assert_eq!(tips[4], ATS_TIP);
    }

    #[test]
    fn test_high_score_only_tier_and_ats() {
        let tips = generate_suggestions(91.0, &[], &[], 8);
        assert_eq!(tips, vec![TIER_HIGH.to_string(), ATS_TIP.to_string()]);
    }

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(generate_suggestions(40.0, &[], &[], 10)[0], TIER_MID);
        assert_eq!(generate_suggestions(70.0, &[], &[], 10)[0], TIER_HIGH);
    }
}
