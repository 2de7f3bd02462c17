//! Rule-based issue classifier
//!
//! Maps raw issue text to an [`Assessment`] by testing two independent
//! vocabularies against the lower-cased text. Each vocabulary compiles
//! into a single regex with word boundaries on every term edge that is a
//! word character, so `tissue` never matches `issue` while `c++` and `!!!`
//! still match. Multi-word phrases tolerate any run of whitespace between
//! words.

use crate::config::Vocabulary;
use crate::error::ConfigError;
use crate::types::{Assessment, Sentiment, Urgency};
use regex::Regex;

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

// `\b` next to a non-word edge would demand a word character beside it.
fn bounded(term: &str, body: &str) -> String {
    let start = if term.starts_with(is_word_char) { r"\b" } else { "" };
    let end = if term.ends_with(is_word_char) { r"\b" } else { "" };
    format!("{start}{body}{end}")
}

/// Compiled vocabulary matcher
#[derive(Debug, Clone)]
struct TermMatcher {
    /// `None` when the vocabulary has no terms
    pattern: Option<Regex>,
}

impl TermMatcher {
    fn compile(terms: &[String], vocabulary: &'static str) -> Result<Self, ConfigError> {
        let mut alternatives = Vec::with_capacity(terms.len());
        for term in terms {
            let lowered = term.to_lowercase();
            let lowered = lowered.trim();
            let words: Vec<String> = lowered.split_whitespace().map(regex::escape).collect();
            if words.is_empty() {
                return Err(ConfigError::EmptyTerm { vocabulary });
            }
            alternatives.push(bounded(lowered, &words.join(r"\s+")));
        }
        if alternatives.is_empty() {
            return Ok(Self { pattern: None });
        }

        // Leftmost-first alternation: longer phrases must be tried first.
        alternatives.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        alternatives.dedup();

        let source = format!("(?:{})", alternatives.join("|"));
        Ok(Self {
            pattern: Some(Regex::new(&source)?),
        })
    }

    /// Distinct matched terms in first-match order, whitespace collapsed
    fn matches(&self, lowered: &str) -> Vec<String> {
        let Some(pattern) = &self.pattern else {
            return Vec::new();
        };
        let mut found: Vec<String> = Vec::new();
        for hit in pattern.find_iter(lowered) {
            let term = hit.as_str().split_whitespace().collect::<Vec<_>>().join(" ");
            if !found.contains(&term) {
                found.push(term);
            }
        }
        found
    }
}

/// Keyword classifier for issue descriptions
///
/// Deterministic and side-effect free; build once per session.
#[derive(Debug, Clone)]
pub struct Classifier {
    negative: TermMatcher,
    urgency: TermMatcher,
}

impl Classifier {
    /// Compile a classifier from vocabularies
    ///
    /// # Errors
    /// Returns error if a term is blank or the vocabulary fails to compile
    pub fn new(vocabulary: &Vocabulary) -> Result<Self, ConfigError> {
        Ok(Self {
            negative: TermMatcher::compile(&vocabulary.negative, "negative")?,
            urgency: TermMatcher::compile(&vocabulary.urgency, "urgency")?,
        })
    }

    /// Classify issue text
    ///
    /// Callers reject blank text before this point; blank text classifies
    /// as Positive / Low.
    #[must_use]
    pub fn classify(&self, text: &str) -> Assessment {
        let lowered = text.to_lowercase();
        let negative_terms = self.negative.matches(&lowered);
        let urgency_terms = self.urgency.matches(&lowered);

        let sentiment = if negative_terms.is_empty() {
            Sentiment::Positive
        } else {
            Sentiment::Negative
        };
        let urgency = if urgency_terms.is_empty() {
            Urgency::Low
        } else {
            Urgency::High
        };

        tracing::debug!(
            %sentiment,
            %urgency,
            negative = ?negative_terms,
            urgent = ?urgency_terms,
            "classified issue text"
        );

        Assessment::new(sentiment, urgency).with_terms(negative_terms, urgency_terms)
    }
}
