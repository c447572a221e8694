//! Report structure handed to the output formatters

use crate::processing::analyzer::{Comparison, MatchResult};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Shown in place of the keyword list when nothing is missing
pub const NO_MISMATCHES_MESSAGE: &str = "No major mismatches detected!";

#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub match_result: MatchResult,

    /// Leading characters of the sanitized resume text
    pub resume_preview: String,

    /// Leading characters of the sanitized job description text
    pub job_preview: String,

    pub improvement_areas: Vec<ImprovementArea>,

    pub metadata: ReportMetadata,
}

#[derive(Debug, Clone, Serialize)]
pub struct ImprovementArea {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportMetadata {
    pub generated_at: DateTime<Utc>,
    pub matcher_version: String,
    pub resume_file: String,
    pub job_file: String,
    pub processing_time_ms: u64,
    pub embedding_model: String,

    /// Characters removed by sanitization, resume and job combined
    pub dropped_chars: usize,
}

impl AnalysisReport {
    pub fn from_comparison(
        comparison: &Comparison,
        resume_file: &str,
        job_file: &str,
        preview_chars: usize,
    ) -> Self {
        Self {
            match_result: comparison.result.clone(),
            resume_preview: comparison.resume_preview(preview_chars).to_string(),
            job_preview: comparison.job_preview(preview_chars).to_string(),
            improvement_areas: standard_improvement_areas(),
            metadata: ReportMetadata {
                generated_at: Utc::now(),
                matcher_version: env!("CARGO_PKG_VERSION").to_string(),
                resume_file: resume_file.to_string(),
                job_file: job_file.to_string(),
                processing_time_ms: comparison.processing_time_ms,
                embedding_model: comparison.embedding_model.clone(),
                dropped_chars: comparison.dropped_chars(),
            },
        }
    }

    /// Missing keywords as one comma-separated line
    pub fn missing_keywords_text(&self) -> String {
        let keywords = self.match_result.missing_keywords();
        if keywords.is_empty() {
            NO_MISMATCHES_MESSAGE.to_string()
        } else {
            keywords.join(", ")
        }
    }

    pub fn score_text(&self) -> String {
        format_score(self.match_result.similarity_score())
    }
}

/// Score out of 100 without trailing zeros, keeping one decimal for whole numbers
pub fn format_score(score: f64) -> String {
    if score.fract() == 0.0 {
        format!("{:.1}/100", score)
    } else {
        format!("{}/100", score)
    }
}

/// Generic guidance included in every report, independent of the scores
pub fn standard_improvement_areas() -> Vec<ImprovementArea> {
    let areas = [
        (
            "Technical Skills",
            "Focus on the technical competencies the job description explicitly requires. \
             Consider gaining expertise in missing programming languages, frameworks, or tools.",
        ),
        (
            "Soft Skills",
            "Communication, leadership, and teamwork matter for collaborative roles. \
             Workshops or practical experience can help build them.",
        ),
        (
            "Relevant Experience",
            "There may be gaps in work experience related to the job description. \
             Highlight past projects, internships, or freelance work that match the role.",
        ),
        (
            "Certifications & Education",
            "Relevant certifications or further education in the key areas of the job \
             description can strengthen the resume.",
        ),
        (
            "Resume Optimization",
            "Use industry-specific keywords to make the resume more ATS-friendly and \
             more visible to recruiters.",
        ),
    ];

    areas
        .into_iter()
        .map(|(title, description)| ImprovementArea {
            title: title.to_string(),
            description: description.to_string(),
        })
        .collect()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::processing::analyzer::ComparisonPipeline;
    use crate::processing::document::Document;
    use crate::processing::embeddings::{Embedder, EmbeddingVector};
    use std::sync::Arc;

    struct UnitEmbedder;

    impl Embedder for UnitEmbedder {
        fn embed(&self, text: &str) -> crate::error::Result<EmbeddingVector> {
            Ok(EmbeddingVector::new(vec![1.0, text.len() as f32 / 1000.0]))
        }

        fn model_name(&self) -> &str {
            "unit"
        }
    }

    pub(crate) fn sample_report(resume: &str, job: &str) -> AnalysisReport {
        let pipeline = ComparisonPipeline::new(Arc::new(UnitEmbedder));
        let comparison = pipeline
            .compare_documents(&Document::from_text(resume), &Document::from_text(job))
            .unwrap();
        AnalysisReport::from_comparison(&comparison, "resume.pdf", "job.pdf", 1000)
    }

    #[test]
    fn test_missing_keywords_text() {
        let report = sample_report("Rust", "Rust Go Kafka");
        assert_eq!(report.missing_keywords_text(), "go, kafka");
    }

    #[test]
    fn test_no_mismatch_message_when_nothing_missing() {
        let report = sample_report("Rust and Go", "Go");
        assert_eq!(report.missing_keywords_text(), NO_MISMATCHES_MESSAGE);
    }

    #[test]
    fn test_previews_are_truncated() {
        let long_resume = "x".repeat(1500);
        let report = sample_report(&long_resume, "short job");
        assert_eq!(report.resume_preview.len(), 1000);
        assert_eq!(report.job_preview, "short job");
    }

    #[test]
    fn test_format_score() {
        assert_eq!(format_score(78.5), "78.5/100");
        assert_eq!(format_score(72.34), "72.34/100");
        assert_eq!(format_score(100.0), "100.0/100");
        assert_eq!(format_score(0.0), "0.0/100");
    }

    #[test]
    fn test_guidance_has_five_areas() {
        let areas = standard_improvement_areas();
        assert_eq!(areas.len(), 5);
        assert_eq!(areas[0].title, "Technical Skills");
        assert_eq!(areas[4].title, "Resume Optimization");
    }
}
