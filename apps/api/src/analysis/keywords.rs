//! Keyword Extractor: derives weighted skill/requirement terms from normalized text.
//!
//! Algorithm:
//! 1. Match dictionary phrases greedily (leftmost-longest, token boundaries only,
//!    hyphen and space interchangeable). Phrases are reported in dictionary form.
//! 2. Split the rest into words (UAX #29 word boundaries).
//! 3. Drop tokens shorter than 2 characters, tokens without a letter (`10`, `2024`)
//!    and stopwords.
//! 4. Weight: tokens count 1.0 per occurrence, phrases `phrase_weight` (>= 1.0) per occurrence.
//!
//! Identical input always yields an identical `KeywordSet`.

use std::collections::HashMap;
use std::sync::Arc;

use unicode_segmentation::UnicodeSegmentation;

use crate::analysis::lexicon::Lexicon;
use crate::models::document::ExtractedText;

pub const MIN_TOKEN_CHARS: usize = 2;

/// Deduplicated normalized terms, each with a positive weight.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KeywordSet {
    weights: HashMap<String, f64>,
}

impl KeywordSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `weight` to `term`. Blank terms and non-positive weights are ignored.
    pub fn add(&mut self, term: &str, weight: f64) {
        let term = term.trim();
        if term.is_empty() || !(weight > 0.0) {
            return;
        }
        *self.weights.entry(term.to_string()).or_insert(0.0) += weight;
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    pub fn contains(&self, term: &str) -> bool {
        self.weights.contains_key(term)
    }

    pub fn weight(&self, term: &str) -> Option<f64> {
        self.weights.get(term).copied()
    }

    pub fn terms(&self) -> impl Iterator<Item = &str> {
        self.weights.keys().map(String::as_str)
    }

    /// Terms with weights, by descending weight then ascending term.
    pub fn ranked(&self) -> Vec<(&str, f64)> {
        let mut entries: Vec<(&str, f64)> = self
            .weights
            .iter()
            .map(|(term, weight)| (term.as_str(), *weight))
            .collect();
        entries.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        entries
    }

    /// Sum of all weights, accumulated in ranked order so the result is reproducible.
    pub fn total_weight(&self) -> f64 {
        self.ranked().iter().map(|(_, w)| w).sum()
    }
}

impl<S: AsRef<str>> FromIterator<(S, f64)> for KeywordSet {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        let mut set = KeywordSet::new();
        for (term, weight) in iter {
            set.add(term.as_ref(), weight);
        }
        set
    }
}

/// Stateless extractor over a shared, read-only lexicon.
#[derive(Debug, Clone)]
pub struct KeywordExtractor {
    lexicon: Arc<Lexicon>,
    phrase_weight: f64,
}

impl KeywordExtractor {
    /// `phrase_weight` below 1.0 is raised to 1.0 so a phrase never weighs
    /// less than one of its constituent tokens would have.
    pub fn new(lexicon: Arc<Lexicon>, phrase_weight: f64) -> Self {
        Self {
            lexicon,
            phrase_weight: phrase_weight.max(1.0),
        }
    }

    pub fn extract_keywords(&self, text: &ExtractedText) -> KeywordSet {
        let text = text.as_str();
        let mut set = KeywordSet::new();

        // Phrases first, blanked out so they are not split again below.
        let spans = self.lexicon.find_phrases(text);
        let mut remainder = String::with_capacity(text.len());
        let mut cursor = 0;
        for span in &spans {
            set.add(self.lexicon.phrase(span.phrase), self.phrase_weight);
            remainder.push_str(&text[cursor..span.start]);
            remainder.push(' ');
            cursor = span.end;
        }
        remainder.push_str(&text[cursor..]);

        for token in remainder.unicode_words() {
            if token.chars().count() < MIN_TOKEN_CHARS
                || !token.chars().any(char::is_alphabetic)
                || self.lexicon.is_stopword(token)
            {
                continue;
            }
            set.add(token, 1.0);
        }

        set
    }
}
