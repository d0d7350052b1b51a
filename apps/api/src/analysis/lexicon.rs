//! Stopword list and phrase dictionary used by keyword extraction.
//!
//! Built once at startup and shared read-only (`Arc<Lexicon>`) by every
//! analysis. Both lists can be replaced by plain text files: one entry per
//! line, `#` starts a comment, blank lines are ignored.
//!
//! Phrase search treats a hyphen between two alphanumerics like a space, so
//! "front-end" and "front end" both hit the same dictionary entry.

use std::collections::HashSet;
use std::path::Path;

use aho_corasick::{AhoCorasick, Anchored, Input, Match, MatchKind, StartKind};
use anyhow::{Context, Result};
use tracing::info;

use crate::analysis::text_extractor::normalize;

/// Common English function words plus generic resume and job-ad filler.
pub const DEFAULT_STOPWORDS: &[&str] = &[
    // function words
    "a", "about", "above", "across", "after", "again", "against", "all", "also", "am", "an",
    "and", "any", "are", "as", "at", "be", "because", "been", "before", "being", "below",
    "between", "both", "but", "by", "can", "could", "did", "do", "does", "doing", "down",
    "during", "each", "either", "etc", "every", "few", "for", "from", "further", "had", "has",
    "have", "having", "he", "her", "here", "hers", "him", "his", "how", "i", "if", "in",
    "into", "is", "it", "its", "itself", "just", "me", "more", "most", "must", "my", "no",
    "nor", "not", "of", "off", "on", "once", "only", "or", "other", "our", "ours", "out",
    "over", "own", "per", "same", "shall", "she", "should", "so", "some", "such", "than",
    "that", "the", "their", "theirs", "them", "then", "there", "these", "they", "this",
    "those", "through", "to", "too", "under", "until", "up", "upon", "us", "very", "via",
    "was", "we", "were", "what", "when", "where", "which", "while", "who", "whom", "why",
    "will", "with", "within", "without", "would", "yet", "you", "your", "yours",
    // contractions
    "aren't", "can't", "cannot", "couldn't", "didn't", "doesn't", "don't", "hasn't",
    "haven't", "he's", "here's", "i'd", "i'll", "i'm", "i've", "isn't", "it's", "let's",
    "she's", "shouldn't", "that's", "there's", "they'll", "they're", "they've", "wasn't",
    "we'd", "we'll", "we're", "we've", "weren't", "what's", "won't", "wouldn't", "you'd",
    "you'll", "you're", "you've",
    // abbreviations
    "e.g", "eg", "i.e", "ie", "vs",
    // resume and job-ad filler
    "ability", "able", "candidate", "company", "duties", "excellent", "experience",
    "experienced", "familiar", "familiarity", "good", "great", "ideal", "including",
    "join", "knowledge", "looking", "new", "plus", "preferred", "proficiency", "proficient",
    "required", "requirements", "responsibilities", "responsible", "role", "seeking",
    "skill", "skills", "strong", "team", "using", "work", "worked", "working", "years",
];

/// Multi-word technical phrases and punctuated terms that must survive tokenization intact.
pub const DEFAULT_PHRASES: &[&str] = &[
    // multi-word skills
    "machine learning", "deep learning", "natural language processing", "computer vision",
    "data science", "data engineering", "data analysis", "data visualization",
    "data structures", "distributed systems", "systems programming", "cloud computing",
    "project management", "product management", "agile methodologies", "test driven development",
    "continuous integration", "continuous delivery", "infrastructure as code",
    "object oriented programming", "functional programming", "version control",
    "software engineering", "software development", "web development", "mobile development",
    "full stack", "front end", "back end", "rest api", "rest apis", "microservices architecture",
    "event driven", "site reliability", "incident response", "unit testing",
    "integration testing", "performance tuning", "big data", "business intelligence",
    "stakeholder management", "technical writing", "problem solving", "code review",
    "google cloud", "amazon web services", "spring boot", "ruby on rails", "react native",
    "sql server", "power bi", "github actions", "gitlab ci",
    // punctuated terms
    "ci/cd", "c++", "c#", "f#", ".net", "asp.net", "node.js", "react.js", "vue.js",
    "next.js", "express.js", "d3.js", "objective-c", "scikit-learn", "tcp/ip", "pl/sql",
    "t-sql", "a/b testing", "ui/ux",
];

/// Stopwords and phrase dictionary, normalized the same way as analysed text.
#[derive(Debug)]
pub struct Lexicon {
    stopwords: HashSet<String>,
    phrases: Vec<String>,
    /// `None` when the phrase dictionary is empty.
    phrase_matcher: Option<AhoCorasick>,
}

/// Joiners that bind alphanumerics into a single term (`ci/cd`, `c++`, `node.js`).
const TERM_JOINERS: &[char] = &['/', '+', '#', '.', '-'];

/// Byte span of one accepted phrase occurrence in a text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhraseSpan {
    pub start: usize,
    pub end: usize,
    pub phrase: usize,
}

impl Lexicon {
    /// Builds a lexicon from raw entries. Entries are normalized and
    /// deduplicated; phrases that are themselves stopwords are dropped, and of
    /// two phrases differing only in hyphen/space the first in sort order is kept.
    pub fn new<S, P>(stopwords: S, phrases: P) -> Result<Self>
    where
        S: IntoIterator,
        S::Item: AsRef<str>,
        P: IntoIterator,
        P::Item: AsRef<str>,
    {
        let stopwords: HashSet<String> = stopwords
            .into_iter()
            .map(|s| normalize(s.as_ref()).as_str().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let mut phrases: Vec<String> = phrases
            .into_iter()
            .map(|p| normalize(p.as_ref()).as_str().to_string())
            .filter(|p| !p.is_empty() && !stopwords.contains(p))
            .collect();
        phrases.sort();
        let mut folded = HashSet::new();
        phrases.retain(|p| folded.insert(fold_hyphens(p)));

        let phrase_matcher = if phrases.is_empty() {
            None
        } else {
            let patterns: Vec<String> = phrases.iter().map(|p| fold_hyphens(p)).collect();
            let matcher = AhoCorasick::builder()
                .match_kind(MatchKind::LeftmostLongest)
                .start_kind(StartKind::Both)
                .build(&patterns)
                .context("Failed to build phrase matcher")?;
            Some(matcher)
        };

        Ok(Self {
            stopwords,
            phrases,
            phrase_matcher,
        })
    }

    /// The compiled-in lists.
    pub fn builtin() -> Result<Self> {
        Self::new(DEFAULT_STOPWORDS, DEFAULT_PHRASES)
    }

    /// No stopwords, no phrases: extraction degrades to unique-token collection.
    pub fn empty() -> Self {
        Self {
            stopwords: HashSet::new(),
            phrases: Vec::new(),
            phrase_matcher: None,
        }
    }

    /// Builds the lexicon, replacing either built-in list by a file when a path is given.
    pub fn load(stopwords_path: Option<&Path>, phrases_path: Option<&Path>) -> Result<Self> {
        let stopwords = match stopwords_path {
            Some(path) => read_list(path)?,
            None => DEFAULT_STOPWORDS.iter().map(|s| s.to_string()).collect(),
        };
        let phrases = match phrases_path {
            Some(path) => read_list(path)?,
            None => DEFAULT_PHRASES.iter().map(|s| s.to_string()).collect(),
        };

        let lexicon = Self::new(stopwords, phrases)?;
        info!(
            "Lexicon loaded: {} stopwords, {} phrases",
            lexicon.stopwords.len(),
            lexicon.phrases.len()
        );
        Ok(lexicon)
    }

    pub fn is_stopword(&self, term: &str) -> bool {
        self.stopwords.contains(term)
    }

    pub fn phrase(&self, index: usize) -> &str {
        &self.phrases[index]
    }

    pub fn stopword_count(&self) -> usize {
        self.stopwords.len()
    }

    pub fn phrase_count(&self) -> usize {
        self.phrases.len()
    }

    /// Finds phrase occurrences, leftmost-longest, that sit on token boundaries.
    ///
    /// A candidate glued to its neighbours (`java` in `javascript`, `gitlab ci`
    /// in `gitlab ci/cd`) is rejected and shorter phrases starting at the same
    /// position are tried before the search moves one character on. Spans are
    /// byte offsets into `text`.
    pub fn find_phrases(&self, text: &str) -> Vec<PhraseSpan> {
        let Some(matcher) = &self.phrase_matcher else {
            return Vec::new();
        };

        // same byte length as `text`, so spans carry over
        let text = fold_hyphens(text);
        let mut spans = Vec::new();
        let mut pos = 0;
        while pos < text.len() {
            let Some(m) = matcher.find(Input::new(&text).span(pos..text.len())) else {
                break;
            };
            match longest_on_boundary(matcher, &text, m) {
                Some(span) => {
                    pos = span.end;
                    spans.push(span);
                }
                None => {
                    pos = m.start() + text[m.start()..].chars().next().map_or(1, char::len_utf8);
                }
            }
        }
        spans
    }
}

fn longest_on_boundary(matcher: &AhoCorasick, text: &str, first: Match) -> Option<PhraseSpan> {
    let start = first.start();
    let mut candidate = Some(first);
    while let Some(m) = candidate {
        if on_token_boundary(text, m.start(), m.end()) {
            return Some(PhraseSpan {
                start: m.start(),
                end: m.end(),
                phrase: m.pattern().as_usize(),
            });
        }
        if m.end() <= start + 1 {
            return None;
        }
        // strictly shorter patterns anchored at the same start
        let input = Input::new(text)
            .span(start..m.end() - 1)
            .anchored(Anchored::Yes);
        candidate = matcher.find(input);
    }
    None
}

fn on_token_boundary(text: &str, start: usize, end: usize) -> bool {
    let mut before = text[..start].chars().rev();
    let mut after = text[end..].chars();
    let (prev, prev2) = (before.next(), before.next());
    let (next, next2) = (after.next(), after.next());
    !glued(prev, prev2) && !glued(next, next2)
}

/// `neighbour` binds to the match when it is alphanumeric, or a joiner that
/// itself continues into an alphanumeric (`/cd`, `.jsx`).
fn glued(neighbour: Option<char>, beyond: Option<char>) -> bool {
    match neighbour {
        Some(c) if c.is_alphanumeric() => true,
        Some(c) if TERM_JOINERS.contains(&c) => beyond.is_some_and(char::is_alphanumeric),
        _ => false,
    }
}

/// Replaces each hyphen between two alphanumerics by a space.
fn fold_hyphens(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    let mut prev: Option<char> = None;
    while let Some(c) = chars.next() {
        let between_words = c == '-'
            && prev.is_some_and(char::is_alphanumeric)
            && chars.peek().copied().is_some_and(char::is_alphanumeric);
        out.push(if between_words { ' ' } else { c });
        prev = Some(c);
    }
    out
}

fn read_list(path: &Path) -> Result<Vec<String>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read word list '{}'", path.display()))?;
    Ok(content
        .lines()
        .map(|line| line.split('#').next().unwrap_or("").trim())
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect())
}
