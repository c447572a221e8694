//! Keyword gap detection between a job description and a resume
//!
//! Tokens are literal lowercase word runs. There is no stemming, stopword
//! removal or synonym matching, so words like "and" or "for" show up as
//! missing whenever the resume does not happen to contain them.

use crate::processing::document::SanitizedText;
use regex::Regex;
use std::collections::HashSet;

/// Upper bound on reported missing keywords
pub const MAX_MISSING_KEYWORDS: usize = 50;

/// Set of lowercase word tokens of a text
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenSet {
    tokens: HashSet<String>,
}

impl TokenSet {
    pub fn contains(&self, token: &str) -> bool {
        self.tokens.contains(token)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(String::as_str)
    }
}

impl FromIterator<String> for TokenSet {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self {
            tokens: iter.into_iter().collect(),
        }
    }
}

pub struct KeywordGapAnalyzer {
    word_regex: Regex,
    max_keywords: usize,
}

impl Default for KeywordGapAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl KeywordGapAnalyzer {
    pub fn new() -> Self {
        let word_regex = Regex::new(r"\b\w+\b").expect("Invalid word regex");

        Self {
            word_regex,
            max_keywords: MAX_MISSING_KEYWORDS,
        }
    }

    /// Lowercase word tokens in document order, duplicates included
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let lowered = text.to_lowercase();
        self.word_regex
            .find_iter(&lowered)
            .map(|m| m.as_str().to_string())
            .collect()
    }

    pub fn token_set(&self, text: &str) -> TokenSet {
        self.tokenize(text).into_iter().collect()
    }

    /// Job tokens absent from the resume, unique, in order of first
    /// appearance in the job text, capped at `MAX_MISSING_KEYWORDS`.
    pub fn missing_keywords(&self, resume: &SanitizedText, job: &SanitizedText) -> Vec<String> {
        let resume_tokens = self.token_set(resume.as_str());

        let mut seen = HashSet::new();
        self.tokenize(job.as_str())
            .into_iter()
            .filter(|token| !resume_tokens.contains(token))
            .filter(|token| seen.insert(token.clone()))
            .take(self.max_keywords)
            .collect()
    }
}
