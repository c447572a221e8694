//! Resume matcher library
//!
//! Compares a resume with a job description: extracts and sanitizes both
//! texts, scores them with sentence embeddings, lists job keywords missing
//! from the resume and classifies the overall fit.

pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod processing;
pub mod output;

pub use config::Config;
pub use error::{Result, ResumeMatcherError};
pub use processing::{ComparisonPipeline, Embedder, MatchResult};
