use std::fmt;

use serde::{Deserialize, Serialize};

/// Interview readiness bucket derived from the final match score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReadinessLevel {
    #[serde(rename = "High Risk – Major skill gaps")]
    HighRisk,
    #[serde(rename = "Moderate – Needs Improvement")]
    Moderate,
    #[serde(rename = "Strong – Interview Possible")]
    Strong,
    #[serde(rename = "Interview Ready")]
    InterviewReady,
}

impl ReadinessLevel {
    /// Lower bounds are inclusive: 40 is Moderate, 70 Strong, 85 Interview Ready.
    pub fn from_score(score: f64) -> Self {
        if score < 40.0 {
            ReadinessLevel::HighRisk
        } else if score < 70.0 {
            ReadinessLevel::Moderate
        } else if score < 85.0 {
            ReadinessLevel::Strong
        } else {
            ReadinessLevel::InterviewReady
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ReadinessLevel::HighRisk => "High Risk – Major skill gaps",
            ReadinessLevel::Moderate => "Moderate – Needs Improvement",
            ReadinessLevel::Strong => "Strong – Interview Possible",
            ReadinessLevel::InterviewReady => "Interview Ready",
        }
    }
}

impl fmt::Display for ReadinessLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
