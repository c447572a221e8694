//! CLI interface for the resume matcher

use crate::config::OutputFormat;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "resume-matcher")]
#[command(about = "Compare a resume against a job description")]
#[command(long_about = "Score a resume against a job description with sentence embeddings, \
list the job keywords the resume is missing, and render a fit report")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compare a resume with a job description
    Compare {
        /// Path to resume file (PDF, TXT, MD)
        #[arg(short, long)]
        resume: PathBuf,

        /// Path to job description file (PDF, TXT, MD)
        #[arg(short, long)]
        job: PathBuf,

        /// Output format: console, json, markdown, pdf
        #[arg(short, long)]
        output: Option<String>,

        /// Save the report to this file, or into this directory under a name derived
        /// from the resume (PDF output defaults to resume_report.pdf)
        #[arg(short, long)]
        save: Option<PathBuf>,

        /// Include text previews in console output
        #[arg(short, long)]
        detailed: bool,
    },

    /// Embedding model management
    Models {
        #[command(subcommand)]
        action: ModelAction,
    },

    /// Show or reset configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ModelAction {
    /// List known embedding models
    List,

    /// Download an embedding model
    Download {
        /// Model id, display name or Hugging Face repo id
        model: String,
    },

    /// Show model information
    Info {
        /// Model id
        model: String,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,

    /// Print the configuration file path
    Path,
}

pub const SUPPORTED_EXTENSIONS: [&str; 4] = ["pdf", "txt", "md", "markdown"];

pub fn parse_output_format(format: &str) -> Result<OutputFormat, String> {
    format.parse()
}

/// Validate file extension
pub fn validate_file_extension(path: &Path, allowed_extensions: &[&str]) -> Result<(), String> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => {
            if allowed_extensions.contains(&ext.to_lowercase().as_str()) {
                Ok(())
            } else {
                Err(format!(
                    "Unsupported file extension: .{}. Allowed: {}",
                    ext,
                    allowed_extensions.join(", ")
                ))
            }
        }
        None => Err("File has no extension".to_string()),
    }
}
