//! Error handling for the resume matcher

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ResumeMatcherError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The input bytes are not a parseable document. Fatal to one comparison.
    #[error("Extraction error: {0}")]
    Extraction(String),

    #[error("File format not supported: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Embedding generation error: {0}")]
    Embedding(String),

    #[error("Model loading error: {0}")]
    ModelLoading(String),

    #[error("Model not found: {0}")]
    ModelNotFound(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Output formatting error: {0}")]
    OutputFormatting(String),
}

pub type Result<T> = std::result::Result<T, ResumeMatcherError>;

/// The embedding library reports failures through anyhow
impl From<anyhow::Error> for ResumeMatcherError {
    fn from(err: anyhow::Error) -> Self {
        ResumeMatcherError::ModelLoading(err.to_string())
    }
}
