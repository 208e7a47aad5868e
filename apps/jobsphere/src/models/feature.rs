use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One of the five analyses the service offers per resume submission.
/// The serialized form is the id used in `/api/analyze/{id}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Feature {
    /// "Job Match Analysis": scores the resume against a job description.
    AtsScore,
    MissingSkills,
    ProjectIdeas,
    InterviewPrep,
    JobMatches,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown feature '{0}'. Expected one of: ats-score, missing-skills, project-ideas, interview-prep, job-matches")]
pub struct UnknownFeature(pub String);

impl Feature {
    pub const ALL: [Feature; 5] = [
        Feature::AtsScore,
        Feature::MissingSkills,
        Feature::ProjectIdeas,
        Feature::InterviewPrep,
        Feature::JobMatches,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Feature::AtsScore => "ats-score",
            Feature::MissingSkills => "missing-skills",
            Feature::ProjectIdeas => "project-ideas",
            Feature::InterviewPrep => "interview-prep",
            Feature::JobMatches => "job-matches",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Feature::AtsScore => "Job Match Analysis",
            Feature::MissingSkills => "Missing Skills",
            Feature::ProjectIdeas => "Project Ideas",
            Feature::InterviewPrep => "Interview Prep",
            Feature::JobMatches => "Live Job Links",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Feature::AtsScore => "Optimize for automated screening systems",
            Feature::MissingSkills => "Identify gaps in your profile",
            Feature::ProjectIdeas => "Build to stand out",
            Feature::InterviewPrep => "Practice with real questions",
            Feature::JobMatches => "Find relevant openings",
        }
    }

    /// Only the job match analysis needs the job description filled in.
    pub fn requires_job_description(&self) -> bool {
        matches!(self, Feature::AtsScore)
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Feature {
    type Err = UnknownFeature;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Feature::ALL
            .into_iter()
            .find(|feature| feature.id() == s.trim())
            .ok_or_else(|| UnknownFeature(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_round_trip_through_from_str() {
        for feature in Feature::ALL {
            assert_eq!(feature.id().parse::<Feature>().unwrap(), feature);
        }
    }

    #[test]
    fn test_serde_uses_endpoint_ids() {
        let json = serde_json::to_string(&Feature::MissingSkills).unwrap();
        assert_eq!(json, r#""missing-skills""#);
        let parsed: Feature = serde_json::from_str(r#""job-matches""#).unwrap();
        assert_eq!(parsed, Feature::JobMatches);
    }

    #[test]
    fn test_unknown_feature_is_rejected() {
        let err = "resume-roast".parse::<Feature>().unwrap_err();
        assert_eq!(err, UnknownFeature("resume-roast".to_string()));
    }

    #[test]
    fn test_only_ats_score_requires_job_description() {
        let requiring: Vec<Feature> = Feature::ALL
            .into_iter()
            .filter(Feature::requires_job_description)
            .collect();
        assert_eq!(requiring, vec![Feature::AtsScore]);
    }
}
