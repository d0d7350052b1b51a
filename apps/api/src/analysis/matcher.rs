//! Matcher: weighted overlap between resume terms and job-description terms.
//!
//! score = round(100 × Σ weight(matching) / Σ weight(jd)), weights taken from the JD set.

use std::collections::HashSet;

use crate::analysis::keywords::KeywordSet;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatchOptions {
    /// Compare terms by a light suffix-stripped key instead of exact equality.
    pub stemming: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchOutcome {
    /// JD terms found in the resume; descending JD weight, then alphabetical.
    pub matching: Vec<String>,
    /// JD terms absent from the resume; same ordering.
    pub missing: Vec<String>,
    /// 0 – 100
    pub score: u8,
}

/// Partitions the JD terms into matching and missing and computes the score.
/// An empty JD set scores 0 with both lists empty.
pub fn match_keywords(resume: &KeywordSet, jd: &KeywordSet, options: MatchOptions) -> MatchOutcome {
    let stemmed_resume: HashSet<String> = if options.stemming {
        resume.terms().map(stem_key).collect()
    } else {
        HashSet::new()
    };

    let mut matching = Vec::new();
    let mut missing = Vec::new();
    let mut weighted_overlap = 0.0_f64;
    let mut weighted_total = 0.0_f64;

    for (term, weight) in jd.ranked() {
        weighted_total += weight;

        let found = resume.contains(term)
            || (options.stemming && stemmed_resume.contains(&stem_key(term)));

        if found {
            weighted_overlap += weight;
            matching.push(term.to_string());
        } else {
            missing.push(term.to_string());
        }
    }

    let score = compute_score(weighted_overlap, weighted_total, missing.is_empty());

    MatchOutcome {
        matching,
        missing,
        score,
    }
}

fn compute_score(weighted_overlap: f64, weighted_total: f64, complete: bool) -> u8 {
    if weighted_total <= 0.0 {
        return 0;
    }
    let score = (100.0 * weighted_overlap / weighted_total).round().clamp(0.0, 100.0) as u8;
    // 99.6% must not read as a perfect match while a gap remains
    if !complete && score == 100 {
        99
    } else {
        score
    }
}

const SUFFIXES: &[&str] = &[
    "ational", "ations", "ation", "ments", "ment", "ings", "ing", "edly", "ers", "er", "ed",
    "es", "s",
];
const MIN_STEM_CHARS: usize = 3;

/// Light English suffix stripping, applied to each word of a term.
/// `management`, `managed`, `managing` and `manage` all map to `manag`.
pub fn stem_key(term: &str) -> String {
    term.split(' ').map(stem_word).collect::<Vec<_>>().join(" ")
}

fn stem_word(word: &str) -> String {
    if !word.chars().all(char::is_alphabetic) {
        return word.to_string();
    }

    let mut stem = word;
    if let Some(base) = stem.strip_suffix("ies") {
        if base.chars().count() >= MIN_STEM_CHARS {
            return format!("{base}y");
        }
    }
    for suffix in SUFFIXES {
        if *suffix == "s" && stem.ends_with("ss") {
            continue;
        }
        if let Some(base) = stem.strip_suffix(suffix) {
            if base.chars().count() >= MIN_STEM_CHARS {
                stem = base;
                break;
            }
        }
    }
    if stem.chars().count() > MIN_STEM_CHARS {
        stem = stem.strip_suffix('e').unwrap_or(stem);
    }
    stem.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(entries: &[(&str, f64)]) -> KeywordSet {
        entries.iter().map(|(t, w)| (*t, *w)).collect()
    }

    #[test]
    fn test_partition_and_weighted_score() {
        let jd = set(&[
            ("python", 1.0),
            ("aws", 1.0),
            ("engineer", 1.0),
            ("kubernetes", 1.0),
            ("ci/cd", 1.5),
        ]);
        let resume = set(&[("python", 1.0), ("developer", 1.0), ("aws", 1.0), ("docker", 1.0)]);

        let outcome = match_keywords(&resume, &jd, MatchOptions::default());
        assert_eq!(outcome.matching, vec!["aws", "python"]);
        assert_eq!(outcome.missing, vec!["ci/cd", "engineer", "kubernetes"]);
        // 2.0 / 5.5 = 36.36%
        assert_eq!(outcome.score, 36);
    }

    #[test]
    fn test_weights_come_from_the_jd_set() {
        let jd = set(&[("rust", 3.0), ("java", 1.0)]);
        let resume = set(&[("rust", 1.0)]);
        assert_eq!(match_keywords(&resume, &jd, MatchOptions::default()).score, 75);
    }

    #[test]
    fn test_empty_jd_scores_zero_with_empty_lists() {
        let outcome = match_keywords(&set(&[("rust", 1.0)]), &KeywordSet::new(), MatchOptions::default());
        assert_eq!(outcome.score, 0);
        assert!(outcome.matching.is_empty());
        assert!(outcome.missing.is_empty());
    }

    #[test]
    fn test_full_coverage_scores_100() {
        let jd = set(&[("rust", 2.0), ("kafka", 1.0)]);
        let resume = set(&[("rust", 1.0), ("kafka", 5.0), ("go", 1.0)]);
        let outcome = match_keywords(&resume, &jd, MatchOptions::default());
        assert_eq!(outcome.score, 100);
        assert!(outcome.missing.is_empty());
    }

    #[test]
    fn test_tiny_gap_never_scores_100() {
        let jd = set(&[("rust", 999.0), ("kafka", 1.0)]);
        let resume = set(&[("rust", 1.0)]);
        let outcome = match_keywords(&resume, &jd, MatchOptions::default());
        assert_eq!(outcome.score, 99);
        assert_eq!(outcome.missing, vec!["kafka"]);
    }

    #[test]
    fn test_no_overlap_scores_zero() {
        let jd = set(&[("rust", 1.0)]);
        let outcome = match_keywords(&set(&[("cobol", 1.0)]), &jd, MatchOptions::default());
        assert_eq!(outcome.score, 0);
        assert_eq!(outcome.missing, vec!["rust"]);
    }

    #[test]
    fn test_lists_partition_jd_and_respect_ordering() {
        let jd = set(&[("b", 2.0), ("a", 2.0), ("c", 5.0), ("d", 1.0), ("e", 2.0)]);
        let resume = set(&[("a", 1.0), ("d", 1.0), ("c", 1.0)]);
        let outcome = match_keywords(&resume, &jd, MatchOptions::default());
        assert_eq!(outcome.matching, vec!["c", "a", "d"]);
        assert_eq!(outcome.missing, vec!["b", "e"]);

        let mut all: Vec<&String> = outcome.matching.iter().chain(&outcome.missing).collect();
        all.sort();
        all.dedup();
        assert_eq!(all.len(), jd.len());
    }

    #[test]
    fn test_exact_matching_ignores_inflections_by_default() {
        let jd = set(&[("management", 1.0)]);
        let resume = set(&[("managed", 1.0)]);
        let outcome = match_keywords(&resume, &jd, MatchOptions::default());
        assert_eq!(outcome.missing, vec!["management"]);
    }

    #[test]
    fn test_stemming_matches_inflections() {
        let jd = set(&[("management", 1.0), ("project management", 1.5), ("kubernetes", 1.0)]);
        let resume = set(&[("manage", 1.0), ("project managers", 1.0)]);
        let outcome = match_keywords(&resume, &jd, MatchOptions { stemming: true });
        assert_eq!(outcome.matching, vec!["project management", "management"]);
        assert_eq!(outcome.missing, vec!["kubernetes"]);
    }

    #[test]
    fn test_stem_key() {
        assert_eq!(stem_key("management"), "manag");
        assert_eq!(stem_key("managed"), "manag");
        assert_eq!(stem_key("managing"), "manag");
        assert_eq!(stem_key("manage"), "manag");
        assert_eq!(stem_key("libraries"), "library");
        assert_eq!(stem_key("business"), "business");
        assert_eq!(stem_key("aws"), "aws");
        assert_eq!(stem_key("ci/cd"), "ci/cd");
    }
}
