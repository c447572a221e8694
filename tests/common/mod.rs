//! Deterministic embedders standing in for the Model2Vec model

#![allow(dead_code)]

use resume_matcher::error::Result;
use resume_matcher::processing::{Embedder, EmbeddingVector, KeywordGapAnalyzer};
use std::collections::BTreeMap;

/// Term-count vectors over a fixed vocabulary; unknown tokens are ignored
pub struct BagOfWordsEmbedder {
    vocabulary: BTreeMap<String, usize>,
    analyzer: KeywordGapAnalyzer,
}

impl BagOfWordsEmbedder {
    pub fn from_texts(texts: &[&str]) -> Self {
        let analyzer = KeywordGapAnalyzer::new();
        let mut vocabulary = BTreeMap::new();
        for text in texts {
            for token in analyzer.tokenize(text) {
                let next = vocabulary.len();
                vocabulary.entry(token).or_insert(next);
            }
        }
        Self { vocabulary, analyzer }
    }
}

impl Embedder for BagOfWordsEmbedder {
    fn embed(&self, text: &str) -> Result<EmbeddingVector> {
        let mut vector = vec![0.0f32; self.vocabulary.len()];
        for token in self.analyzer.tokenize(text) {
            if let Some(&index) = self.vocabulary.get(&token) {
                vector[index] += 1.0;
            }
        }
        Ok(EmbeddingVector::new(vector))
    }

    fn model_name(&self) -> &str {
        "bag-of-words"
    }
}

/// Letter and digit frequencies; similar for any two English texts
pub struct LetterFrequencyEmbedder;

impl Embedder for LetterFrequencyEmbedder {
    fn embed(&self, text: &str) -> Result<EmbeddingVector> {
        let mut vector = vec![0.0f32; 36];
        for c in text.to_lowercase().chars() {
            if let Some(index) = c.to_digit(36) {
                vector[index as usize] += 1.0;
            }
        }
        Ok(EmbeddingVector::new(vector))
    }

    fn model_name(&self) -> &str {
        "letter-frequency"
    }
}
