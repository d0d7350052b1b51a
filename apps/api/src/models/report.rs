use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result of matching one resume against one job description.
///
/// The JSON field names are the wire contract consumed by the web UI:
/// `score`, `matchingKeywords`, `missingKeywords`, `suggestions`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct MatchReport {
    /// 0 – 100
    pub score: u8,
    /// Ordered by descending JD weight, then alphabetically.
    pub matching_keywords: Vec<String>,
    /// Same ordering as `matching_keywords`.
    pub missing_keywords: Vec<String>,
    pub suggestions: String,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReportViolation {
    #[error("score {0} is outside 0..=100")]
    ScoreOutOfRange(u8),

    #[error("keyword '{0}' is listed as both matching and missing")]
    OverlappingKeyword(String),

    #[error("keyword '{0}' is listed twice")]
    DuplicateKeyword(String),

    #[error("keyword list contains a blank entry")]
    BlankKeyword,

    #[error("suggestions are empty")]
    EmptySuggestions,

    #[error("score is 100 but missing keywords are present")]
    PerfectScoreWithGaps,
}

impl MatchReport {
    /// Checks the structural invariants every report must satisfy.
    pub fn validate(&self) -> Result<(), ReportViolation> {
        if self.score > 100 {
            return Err(ReportViolation::ScoreOutOfRange(self.score));
        }
        if self.suggestions.trim().is_empty() {
            return Err(ReportViolation::EmptySuggestions);
        }
        if self.score == 100 && !self.missing_keywords.is_empty() {
            return Err(ReportViolation::PerfectScoreWithGaps);
        }

        let mut matching = HashSet::new();
        for keyword in &self.matching_keywords {
            if keyword.trim().is_empty() {
                return Err(ReportViolation::BlankKeyword);
            }
            if !matching.insert(keyword.as_str()) {
                return Err(ReportViolation::DuplicateKeyword(keyword.clone()));
            }
        }

        let mut missing = HashSet::new();
        for keyword in &self.missing_keywords {
            if keyword.trim().is_empty() {
                return Err(ReportViolation::BlankKeyword);
            }
            if matching.contains(keyword.as_str()) {
                return Err(ReportViolation::OverlappingKeyword(keyword.clone()));
            }
            if !missing.insert(keyword.as_str()) {
                return Err(ReportViolation::DuplicateKeyword(keyword.clone()));
            }
        }

        Ok(())
    }
}
