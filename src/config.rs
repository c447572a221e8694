//! Configuration management for the resume matcher

use crate::error::{Result, ResumeMatcherError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Embedding model used when the configuration does not name one
pub const DEFAULT_EMBEDDING_MODEL: &str = "potion-base-8M";

/// Number of sanitized characters shown in report previews
pub const DEFAULT_PREVIEW_CHARS: usize = 1000;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub models: ModelConfig,
    pub analysis: AnalysisConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    pub models_dir: PathBuf,
    pub embedding_model: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    pub preview_chars: usize,
    pub cache_extracted_text: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub detailed: bool,
    pub color_output: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
    Pdf,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "console" | "text" => Ok(OutputFormat::Console),
            "json" => Ok(OutputFormat::Json),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            "pdf" => Ok(OutputFormat::Pdf),
            other => Err(format!(
                "Unknown output format '{}'. Expected one of: console, json, markdown, pdf",
                other
            )),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        let models_dir = dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".resume-matcher")
            .join("models");

        Self {
            models: ModelConfig {
                models_dir,
                embedding_model: DEFAULT_EMBEDDING_MODEL.to_string(),
            },
            analysis: AnalysisConfig {
                preview_chars: DEFAULT_PREVIEW_CHARS,
                cache_extracted_text: true,
            },
            output: OutputConfig {
                format: OutputFormat::Console,
                detailed: false,
                color_output: true,
            },
        }
    }
}

impl Config {
    /// Load from the default location, writing defaults on first use
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            let config = Self::default();
            config.save_to(&config_path)?;
            Ok(config)
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| {
            ResumeMatcherError::Configuration(format!(
                "Failed to parse config {}: {}",
                path.display(),
                e
            ))
        })
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self).map_err(|e| {
            ResumeMatcherError::Configuration(format!("Failed to serialize config: {}", e))
        })?;

        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("resume-matcher")
            .join("config.toml")
    }

    pub fn models_dir(&self) -> &PathBuf {
        &self.models.models_dir
    }

    pub fn ensure_models_dir(&self) -> Result<()> {
        std::fs::create_dir_all(&self.models.models_dir)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.models.embedding_model, DEFAULT_EMBEDDING_MODEL);
        assert_eq!(config.analysis.preview_chars, 1000);
        assert_eq!(config.output.format, OutputFormat::Console);
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.output.format = OutputFormat::Pdf;
        config.analysis.preview_chars = 250;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.output.format, OutputFormat::Pdf);
        assert_eq!(loaded.analysis.preview_chars, 250);
    }

    #[test]
    fn test_malformed_config_is_configuration_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "models = 42").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, ResumeMatcherError::Configuration(_)));
    }

    #[test]
    fn test_output_format_parsing() {
        assert_eq!("PDF".parse::<OutputFormat>().unwrap(), OutputFormat::Pdf);
        assert_eq!("md".parse::<OutputFormat>().unwrap(), OutputFormat::Markdown);
        assert!("html".parse::<OutputFormat>().is_err());
    }
}
