//! Sentence embeddings and cosine-similarity scoring

use crate::error::{Result, ResumeMatcherError};
use crate::processing::document::SanitizedText;
use log::{info, warn};
use model2vec_rs::model::StaticModel;
use std::path::Path;
use std::time::Instant;

/// Fixed-dimension embedding of one text
#[derive(Debug, Clone, PartialEq)]
pub struct EmbeddingVector(Vec<f32>);

impl EmbeddingVector {
    pub fn new(values: Vec<f32>) -> Self {
        Self(values)
    }

    pub fn dim(&self) -> usize {
        self.0.len()
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }
}

impl From<Vec<f32>> for EmbeddingVector {
    fn from(values: Vec<f32>) -> Self {
        Self(values)
    }
}

/// A loaded embedding model. Inference must be stateless so one instance can
/// serve any number of comparisons.
pub trait Embedder: Send + Sync {
    fn embed(&self, text: &str) -> Result<EmbeddingVector>;

    fn model_name(&self) -> &str;
}

/// Model2Vec static embeddings
pub struct Model2VecEmbedder {
    model: StaticModel,
    model_name: String,
}

impl Model2VecEmbedder {
    pub fn load(model_path: &Path, model_name: &str) -> Result<Self> {
        let start_time = Instant::now();
        info!("Loading Model2Vec embedding model from: {}", model_path.display());

        let model = StaticModel::from_pretrained(
            model_path,
            None, // token
            None, // normalize
            None, // subfolder
        )
        .map_err(|e| {
            ResumeMatcherError::ModelLoading(format!(
                "Failed to load model {}: {}",
                model_path.display(),
                e
            ))
        })?;

        info!("Model loaded in {:.2?}", start_time.elapsed());

        Ok(Self {
            model,
            model_name: model_name.to_string(),
        })
    }
}

impl Embedder for Model2VecEmbedder {
    fn embed(&self, text: &str) -> Result<EmbeddingVector> {
        Ok(EmbeddingVector(self.model.encode_single(text)))
    }

    fn model_name(&self) -> &str {
        &self.model_name
    }
}

/// Cosine similarity of two vectors. Zero-norm input yields 0.0.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Result<f64> {
    if a.len() != b.len() {
        return Err(ResumeMatcherError::Embedding(format!(
            "Embedding dimensions don't match: {} vs {}",
            a.len(),
            b.len()
        )));
    }

    let dot: f64 = a.iter().zip(b).map(|(x, y)| *x as f64 * *y as f64).sum();
    let norm_a: f64 = a.iter().map(|x| (*x as f64).powi(2)).sum::<f64>().sqrt();
    let norm_b: f64 = b.iter().map(|x| (*x as f64).powi(2)).sum::<f64>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return Ok(0.0);
    }

    Ok(dot / (norm_a * norm_b))
}

/// Scale a cosine to a percentage in [0, 100] with two decimals
pub fn to_percentage(cosine: f64) -> f64 {
    if !cosine.is_finite() {
        return 0.0;
    }
    let rounded = (cosine * 100.0 * 100.0).round() / 100.0;
    rounded.clamp(0.0, 100.0)
}

#[derive(Debug, Clone)]
pub struct SimilarityScore {
    /// Percentage, rounded to two decimals
    pub score: f64,
    pub cosine: f64,
    pub embedding_dim: usize,
}

pub struct SimilarityScorer<'a> {
    embedder: &'a dyn Embedder,
}

impl<'a> SimilarityScorer<'a> {
    pub fn new(embedder: &'a dyn Embedder) -> Self {
        Self { embedder }
    }

    /// Empty texts are not special-cased; the score is whatever the
    /// embeddings produce, usually near zero.
    pub fn score(&self, resume: &SanitizedText, job: &SanitizedText) -> Result<SimilarityScore> {
        let resume_embedding = self.embedder.embed(resume.as_str())?;
        let job_embedding = self.embedder.embed(job.as_str())?;

        let cosine = cosine_similarity(resume_embedding.as_slice(), job_embedding.as_slice())?;
        if !cosine.is_finite() {
            warn!("Cosine similarity is not finite; scoring as 0");
        }

        Ok(SimilarityScore {
            score: to_percentage(cosine),
            cosine,
            embedding_dim: resume_embedding.dim(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::sanitizer::TextSanitizer;

    /// Counts vowels, consonants and digits; enough structure to score on
    struct CharClassEmbedder;

    impl Embedder for CharClassEmbedder {
        fn embed(&self, text: &str) -> Result<EmbeddingVector> {
            let mut v = vec![0.0f32; 3];
            for c in text.chars() {
                if "aeiouAEIOU".contains(c) {
                    v[0] += 1.0;
                } else if c.is_ascii_alphabetic() {
                    v[1] += 1.0;
                } else if c.is_ascii_digit() {
                    v[2] += 1.0;
                }
            }
            Ok(EmbeddingVector::new(v))
        }

        fn model_name(&self) -> &str {
            "char-class"
        }
    }

    #[test]
    fn test_cosine_of_identical_vectors() {
        let sim = cosine_similarity(&[0.3, 0.4, 0.5], &[0.3, 0.4, 0.5]).unwrap();
        assert!((sim - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_cosine_of_orthogonal_vectors() {
        let sim = cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]).unwrap();
        assert_eq!(sim, 0.0);
    }

    #[test]
    fn test_cosine_handles_zero_vectors() {
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 2.0]).unwrap(), 0.0);
    }

    #[test]
    fn test_cosine_dimension_mismatch_is_error() {
        let result = cosine_similarity(&[1.0, 0.0, 0.0], &[1.0, 0.0]);
        assert!(matches!(result, Err(ResumeMatcherError::Embedding(_))));
    }

    #[test]
    fn test_percentage_rounding_and_bounds() {
        assert_eq!(to_percentage(0.123456), 12.35);
        assert_eq!(to_percentage(1.0000001), 100.0);
        assert_eq!(to_percentage(-0.4), 0.0);
        assert_eq!(to_percentage(f64::NAN), 0.0);
    }

    #[test]
    fn test_scorer_identical_texts() {
        let sanitizer = TextSanitizer::new();
        let text = sanitizer.sanitize_str("Backend engineer, 7 years");
        let scorer = SimilarityScorer::new(&CharClassEmbedder);

        let result = scorer.score(&text, &text).unwrap();
        assert_eq!(result.score, 100.0);
        assert_eq!(result.embedding_dim, 3);
    }

    #[test]
    fn test_scorer_empty_text_scores_zero() {
        let sanitizer = TextSanitizer::new();
        let scorer = SimilarityScorer::new(&CharClassEmbedder);

        let result = scorer
            .score(&sanitizer.sanitize_str(""), &sanitizer.sanitize_str("Rust"))
            .unwrap();
        assert_eq!(result.score, 0.0);
    }
}
