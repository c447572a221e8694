//! Comparison pipeline: sanitize, score, find keyword gaps, classify fit

use crate::error::Result;
use crate::input::file_detector::FileType;
use crate::input::text_extractor::extract_document;
use crate::processing::document::{Document, SanitizedText};
use crate::processing::embeddings::{Embedder, SimilarityScorer};
use crate::processing::fit::{FitCategory, FitClassifier};
use crate::processing::keywords::KeywordGapAnalyzer;
use crate::processing::sanitizer::TextSanitizer;
use log::{debug, info};
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;

/// Outcome of one resume / job description comparison
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchResult {
    similarity_score: f64,
    missing_keywords: Vec<String>,
    fit_assessment: FitCategory,
}

impl MatchResult {
    pub fn similarity_score(&self) -> f64 {
        self.similarity_score
    }

    pub fn missing_keywords(&self) -> &[String] {
        &self.missing_keywords
    }

    pub fn fit_assessment(&self) -> FitCategory {
        self.fit_assessment
    }
}

/// A MatchResult together with the texts it was computed from
#[derive(Debug, Clone)]
pub struct Comparison {
    pub result: MatchResult,
    pub resume_text: SanitizedText,
    pub job_text: SanitizedText,
    pub embedding_model: String,
    pub processing_time_ms: u64,
}

impl Comparison {
    pub fn resume_preview(&self, max_chars: usize) -> &str {
        self.resume_text.preview(max_chars)
    }

    pub fn job_preview(&self, max_chars: usize) -> &str {
        self.job_text.preview(max_chars)
    }

    /// Characters lost to sanitization across both documents
    pub fn dropped_chars(&self) -> usize {
        self.resume_text.dropped_chars() + self.job_text.dropped_chars()
    }
}

pub struct ComparisonPipeline {
    embedder: Arc<dyn Embedder>,
    sanitizer: TextSanitizer,
    keyword_analyzer: KeywordGapAnalyzer,
    classifier: FitClassifier,
}

impl ComparisonPipeline {
    pub fn new(embedder: Arc<dyn Embedder>) -> Self {
        Self {
            embedder,
            sanitizer: TextSanitizer::new(),
            keyword_analyzer: KeywordGapAnalyzer::new(),
            classifier: FitClassifier::new(),
        }
    }

    /// Extract both inputs, then compare. An extraction failure on either
    /// side returns before any scoring happens.
    pub fn compare_bytes(
        &self,
        resume: (&[u8], FileType),
        job: (&[u8], FileType),
    ) -> Result<Comparison> {
        let resume_doc = extract_document(resume.0, resume.1)?;
        let job_doc = extract_document(job.0, job.1)?;
        self.compare_documents(&resume_doc, &job_doc)
    }

    pub fn compare_documents(&self, resume: &Document, job: &Document) -> Result<Comparison> {
        let start_time = Instant::now();

        let resume_text = self.sanitizer.sanitize(resume);
        let job_text = self.sanitizer.sanitize(job);

        if resume_text.is_empty() || job_text.is_empty() {
            info!(
                "Comparing with empty text (resume: {} chars, job: {} chars); score will be low-confidence",
                resume_text.char_count(),
                job_text.char_count()
            );
        }

        let result = self.compare_sanitized(&resume_text, &job_text)?;
        let processing_time_ms = start_time.elapsed().as_millis() as u64;

        debug!(
            "Comparison finished in {}ms: score {:.2}, {} missing keywords",
            processing_time_ms,
            result.similarity_score,
            result.missing_keywords.len()
        );

        Ok(Comparison {
            result,
            resume_text,
            job_text,
            embedding_model: self.embedder.model_name().to_string(),
            processing_time_ms,
        })
    }

    pub fn compare_sanitized(
        &self,
        resume: &SanitizedText,
        job: &SanitizedText,
    ) -> Result<MatchResult> {
        let missing_keywords = self.keyword_analyzer.missing_keywords(resume, job);
        let similarity = SimilarityScorer::new(self.embedder.as_ref()).score(resume, job)?;
        let fit_assessment = self.classifier.classify(similarity.score);

        Ok(MatchResult {
            similarity_score: similarity.score,
            missing_keywords,
            fit_assessment,
        })
    }
}
