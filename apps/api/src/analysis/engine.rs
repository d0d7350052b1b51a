//! Analysis Orchestrator: one resume + one job description in, one `MatchReport` out.
//!
//! Order is fixed: extract resume text (fail fast) → keywords for both texts →
//! match → suggestions → assemble. Either a complete, validated report is
//! returned or exactly one typed error; there are no retries.
//!
//! `AppState` holds an `Arc<dyn Analyzer>` so handlers can be exercised with a
//! stand-in implementation.

use std::sync::Arc;

use anyhow::anyhow;
use tracing::{debug, info};

use crate::analysis::keywords::KeywordExtractor;
use crate::analysis::lexicon::Lexicon;
use crate::analysis::matcher::{match_keywords, MatchOptions};
use crate::analysis::suggestions::{generate_suggestions, DEFAULT_TOP_N};
use crate::analysis::text_extractor::{self, normalize};
use crate::config::Config;
use crate::errors::AnalysisError;
use crate::models::document::Document;
use crate::models::report::MatchReport;

/// Runs one analysis synchronously. Implementations hold no per-request state.
pub trait Analyzer: Send + Sync {
    fn analyze(
        &self,
        document: Option<Document>,
        job_description: &str,
    ) -> Result<MatchReport, AnalysisError>;
}

/// Tunables of the keyword pipeline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineSettings {
    pub phrase_weight: f64,
    pub match_options: MatchOptions,
    pub suggestion_top_n: usize,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            phrase_weight: 1.5,
            match_options: MatchOptions::default(),
            suggestion_top_n: DEFAULT_TOP_N,
        }
    }
}

impl From<&Config> for EngineSettings {
    fn from(config: &Config) -> Self {
        Self {
            phrase_weight: config.phrase_weight,
            match_options: MatchOptions {
                stemming: config.enable_stemming,
            },
            suggestion_top_n: config.suggestion_top_n,
        }
    }
}

/// Keyword-based analyzer: pure, deterministic, no I/O beyond parsing the document bytes.
#[derive(Debug, Clone)]
pub struct AnalysisEngine {
    keywords: KeywordExtractor,
    settings: EngineSettings,
}

impl AnalysisEngine {
    pub fn new(lexicon: Arc<Lexicon>, settings: EngineSettings) -> Self {
        Self {
            keywords: KeywordExtractor::new(lexicon, settings.phrase_weight),
            settings,
        }
    }

    /// Loads the lexicon named by the config (or the built-in one) and wires the engine.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let lexicon = Lexicon::load(config.stopwords_path.as_deref(), config.phrases_path.as_deref())?;
        Ok(Self::new(Arc::new(lexicon), EngineSettings::from(config)))
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }
}

impl Analyzer for AnalysisEngine {
    fn analyze(
        &self,
        document: Option<Document>,
        job_description: &str,
    ) -> Result<MatchReport, AnalysisError> {
        let document = document
            .filter(|d| !d.is_empty())
            .ok_or_else(|| AnalysisError::InvalidInput("A resume file is required".to_string()))?;
        if job_description.trim().is_empty() {
            return Err(AnalysisError::InvalidInput(
                "A job description is required".to_string(),
            ));
        }

        let resume_text = text_extractor::extract(&document)?;
        // the document is not needed past this point
        drop(document);

        let jd_text = normalize(job_description);

        let resume_terms = self.keywords.extract_keywords(&resume_text);
        let jd_terms = self.keywords.extract_keywords(&jd_text);
        debug!(
            resume_terms = resume_terms.len(),
            jd_terms = jd_terms.len(),
            "Keywords extracted"
        );

        let outcome = match_keywords(&resume_terms, &jd_terms, self.settings.match_options);
        let suggestions =
            generate_suggestions(&outcome.missing, outcome.score, self.settings.suggestion_top_n);

        let report = MatchReport {
            score: outcome.score,
            matching_keywords: outcome.matching,
            missing_keywords: outcome.missing,
            suggestions,
        };

        report
            .validate()
            .map_err(|violation| AnalysisError::Internal(anyhow!("Inconsistent report: {violation}")))?;

        info!(
            score = report.score,
            matching = report.matching_keywords.len(),
            missing = report.missing_keywords.len(),
            "Analysis complete"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::suggestions::NO_GAPS_MESSAGE;
    use crate::errors::ExtractError;

    const RESUME: &str = "Experienced Python developer with AWS and Docker skills";
    const JOB: &str = "Looking for a Python engineer familiar with AWS, Kubernetes, and CI/CD";

    fn engine() -> AnalysisEngine {
        AnalysisEngine::new(
            Arc::new(Lexicon::builtin().unwrap()),
            EngineSettings::default(),
        )
    }

    fn text_doc(text: &str) -> Option<Document> {
        Some(Document::new(text.as_bytes().to_vec(), Some("text/plain".into())))
    }

    #[test]
    fn test_python_aws_scenario() {
        let report = engine().analyze(text_doc(RESUME), JOB).unwrap();

        assert!(report.matching_keywords.contains(&"python".to_string()));
        assert!(report.matching_keywords.contains(&"aws".to_string()));
        assert!(report.missing_keywords.contains(&"kubernetes".to_string()));
        assert!(report.missing_keywords.contains(&"ci/cd".to_string()));
        assert!(report.score > 0 && report.score < 100, "score {}", report.score);
        assert!(report.suggestions.contains("kubernetes"));
    }

    #[test]
    fn test_stopword_only_job_description() {
        let report = engine().analyze(text_doc(RESUME), "the and or but").unwrap();
        assert_eq!(report.score, 0);
        assert!(report.matching_keywords.is_empty());
        assert!(report.missing_keywords.is_empty());
        assert_eq!(report.suggestions, NO_GAPS_MESSAGE);
    }

    #[test]
    fn test_empty_job_description_is_invalid_input() {
        let err = engine().analyze(text_doc(RESUME), "  \n\t").unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidInput(_)));
        let err = engine().analyze(text_doc(RESUME), "").unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidInput(_)));
    }

    #[test]
    fn test_missing_or_empty_document_is_invalid_input() {
        let err = engine().analyze(None, JOB).unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidInput(_)));
        let empty = Document::new(Vec::new(), Some("application/pdf".into()));
        let err = engine().analyze(Some(empty), JOB).unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidInput(_)));
    }

    #[test]
    fn test_extraction_failures_surface_as_analysis_failed() {
        let png = Document::new(vec![0x89, b'P', b'N', b'G'], Some("image/png".into()));
        let err = engine().analyze(Some(png), JOB).unwrap_err();
        assert!(matches!(
            err,
            AnalysisError::AnalysisFailed {
                cause: ExtractError::UnsupportedFormat(_)
            }
        ));

        let err = engine().analyze(text_doc("   \n "), JOB).unwrap_err();
        assert!(matches!(
            err,
            AnalysisError::AnalysisFailed {
                cause: ExtractError::EmptyContent
            }
        ));
    }

    #[test]
    fn test_full_coverage_scores_100_with_no_gaps_message() {
        let report = engine()
            .analyze(text_doc("Rust, Kafka and Kubernetes"), "Rust and Kafka required")
            .unwrap();
        assert_eq!(report.score, 100);
        assert!(report.missing_keywords.is_empty());
        assert_eq!(report.suggestions, NO_GAPS_MESSAGE);
    }

    #[test]
    fn test_joined_terms_match_across_phrasings() {
        let report = engine()
            .analyze(
                text_doc("Built CI/CD pipelines in GitLab"),
                "Experience with GitLab CI/CD pipelines",
            )
            .unwrap();
        assert_eq!(report.matching_keywords, vec!["ci/cd", "gitlab", "pipelines"]);
        assert!(report.missing_keywords.is_empty());
        assert_eq!(report.score, 100);
    }

    #[test]
    fn test_hyphenated_jd_matches_spaced_resume() {
        let report = engine()
            .analyze(
                text_doc("Front end and full stack developer"),
                "Front-end and full-stack engineer",
            )
            .unwrap();
        assert_eq!(report.matching_keywords, vec!["front end", "full stack"]);
        assert_eq!(report.missing_keywords, vec!["engineer"]);
    }

    #[test]
    fn test_identical_inputs_give_identical_reports() {
        let a = engine().analyze(text_doc(RESUME), JOB).unwrap();
        let b = engine().analyze(text_doc(RESUME), JOB).unwrap();
        assert_eq!(
            serde_json::to_vec(&a).unwrap(),
            serde_json::to_vec(&b).unwrap()
        );
    }

    #[test]
    fn test_partition_covers_jd_keyword_set() {
        let report = engine().analyze(text_doc(RESUME), JOB).unwrap();
        let mut all: Vec<&String> = report
            .matching_keywords
            .iter()
            .chain(&report.missing_keywords)
            .collect();
        all.sort();
        assert_eq!(all, vec!["aws", "ci/cd", "engineer", "kubernetes", "python"]);
    }

    #[test]
    fn test_stemming_setting_is_honoured() {
        let settings = EngineSettings {
            match_options: MatchOptions { stemming: true },
            ..EngineSettings::default()
        };
        let engine = AnalysisEngine::new(Arc::new(Lexicon::builtin().unwrap()), settings);
        let report = engine
            .analyze(text_doc("Managed budgets"), "Budget management")
            .unwrap();
        assert_eq!(report.score, 100);
    }

    #[test]
    fn test_concurrent_calls_are_isolated() {
        let engine = Arc::new(engine());
        let expected = engine.analyze(text_doc(RESUME), JOB).unwrap();

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let engine = Arc::clone(&engine);
                std::thread::spawn(move || {
                    if i % 2 == 0 {
                        engine.analyze(text_doc(RESUME), JOB).map(Some)
                    } else {
                        engine.analyze(text_doc("Go and Rust"), "Rust").map(|_| None)
                    }
                })
            })
            .collect();

        for handle in handles {
            if let Some(report) = handle.join().unwrap().unwrap() {
                assert_eq!(report, expected);
            }
        }
    }
}
