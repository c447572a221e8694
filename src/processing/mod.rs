//! Text processing and comparison module

pub mod document;
pub mod sanitizer;
pub mod keywords;
pub mod embeddings;
pub mod embedding_manager;
pub mod fit;
pub mod analyzer;

pub use analyzer::{Comparison, ComparisonPipeline, MatchResult};
pub use document::{Document, SanitizedText};
pub use embeddings::{Embedder, EmbeddingVector, Model2VecEmbedder, SimilarityScorer};
pub use fit::{FitCategory, FitClassifier};
pub use keywords::{KeywordGapAnalyzer, TokenSet, MAX_MISSING_KEYWORDS};
pub use sanitizer::TextSanitizer;
