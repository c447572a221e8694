//! Input manager for reading documents from disk

use crate::error::{Result, ResumeMatcherError};
use crate::input::file_detector::FileType;
use crate::input::text_extractor::extract_document;
use crate::processing::document::Document;
use log::info;
use std::collections::HashMap;
use std::path::Path;
use tokio::fs;

pub struct InputManager {
    cache: HashMap<String, Document>,
    enable_cache: bool,
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

impl InputManager {
    pub fn new() -> Self {
        Self {
            cache: HashMap::new(),
            enable_cache: true,
        }
    }

    pub fn with_cache(mut self, enable: bool) -> Self {
        self.enable_cache = enable;
        self
    }

    /// Read a file and extract its document text
    pub async fn load_document(&mut self, path: &Path) -> Result<Document> {
        let path_str = path.to_string_lossy().to_string();

        if self.enable_cache {
            if let Some(cached) = self.cache.get(&path_str) {
                info!("Using cached text for: {}", path.display());
                return Ok(cached.clone());
            }
        }

        let (bytes, file_type) = self.read_bytes(path).await?;

        info!("Extracting {:?} document: {}", file_type, path.display());
        let document = extract_document(&bytes, file_type).map_err(|e| match e {
            ResumeMatcherError::Extraction(msg) => {
                ResumeMatcherError::Extraction(format!("{}: {}", path.display(), msg))
            }
            other => other,
        })?;

        if self.enable_cache {
            self.cache.insert(path_str, document.clone());
        }

        Ok(document)
    }

    /// Read raw bytes after validating existence and file type
    pub async fn read_bytes(&self, path: &Path) -> Result<(Vec<u8>, FileType)> {
        if !path.exists() {
            return Err(ResumeMatcherError::InvalidInput(format!(
                "File does not exist: {}",
                path.display()
            )));
        }

        let file_type = self.detect_file_type(path)?;
        if file_type == FileType::Unknown {
            return Err(ResumeMatcherError::UnsupportedFormat(format!(
                "Unsupported file type for: {}",
                path.display()
            )));
        }

        let bytes = fs::read(path).await?;
        Ok((bytes, file_type))
    }

    fn detect_file_type(&self, path: &Path) -> Result<FileType> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .ok_or_else(|| {
                ResumeMatcherError::InvalidInput(format!(
                    "File has no extension: {}",
                    path.display()
                ))
            })?;

        Ok(FileType::from_extension(extension))
    }

    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}
