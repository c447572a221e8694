//! Embedding model management: known models, local discovery and downloads

use crate::error::{Result, ResumeMatcherError};
use hf_hub::api::tokio::Api;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};
use tokio::fs;

/// Information about a supported embedding model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingModelInfo {
    pub name: String,
    pub repo_id: String,
    pub size_mb: u64,
    pub description: String,
    pub dimensions: u32,
}

/// Files a Model2Vec checkpoint needs on disk
const REQUIRED_FILES: [&str; 3] = ["model.safetensors", "tokenizer.json", "config.json"];

pub struct EmbeddingModelManager {
    models_dir: PathBuf,
    available_models: BTreeMap<String, EmbeddingModelInfo>,
    downloaded_models: HashSet<String>,
}

impl EmbeddingModelManager {
    pub async fn new(models_dir: PathBuf) -> Result<Self> {
        if !models_dir.exists() {
            fs::create_dir_all(&models_dir).await.map_err(|e| {
                ResumeMatcherError::ModelLoading(format!(
                    "Failed to create models directory {}: {}",
                    models_dir.display(),
                    e
                ))
            })?;
        }

        let mut manager = Self {
            models_dir,
            available_models: Self::known_models(),
            downloaded_models: HashSet::new(),
        };
        manager.scan_downloaded_models().await?;

        Ok(manager)
    }

    fn known_models() -> BTreeMap<String, EmbeddingModelInfo> {
        let mut models = BTreeMap::new();

        models.insert(
            "potion-base-8M".to_string(),
            EmbeddingModelInfo {
                name: "Potion Base 8M".to_string(),
                repo_id: "minishlab/potion-base-8M".to_string(),
                size_mb: 33,
                description: "Model2Vec general-purpose embeddings, 8M parameters".to_string(),
                dimensions: 256,
            },
        );
        models.insert(
            "m2v-base".to_string(),
            EmbeddingModelInfo {
                name: "Model2Vec Base".to_string(),
                repo_id: "minishlab/M2V_base_output".to_string(),
                size_mb: 90,
                description: "Model2Vec base output model".to_string(),
                dimensions: 256,
            },
        );
        models.insert(
            "potion-retrieval-32M".to_string(),
            EmbeddingModelInfo {
                name: "Potion Retrieval 32M".to_string(),
                repo_id: "minishlab/potion-retrieval-32M".to_string(),
                size_mb: 130,
                description: "Larger Model2Vec model tuned for retrieval".to_string(),
                dimensions: 512,
            },
        );

        models
    }

    async fn scan_downloaded_models(&mut self) -> Result<()> {
        let mut entries = fs::read_dir(&self.models_dir).await?;

        while let Some(entry) = entries.next_entry().await? {
            if !entry.file_type().await?.is_dir() {
                continue;
            }
            let model_id = entry.file_name().to_string_lossy().to_string();
            if Self::is_valid_model_directory(&entry.path()).await {
                debug!("Found local embedding model: {}", model_id);
                self.downloaded_models.insert(model_id);
            }
        }

        Ok(())
    }

    async fn is_valid_model_directory(path: &Path) -> bool {
        for file in REQUIRED_FILES {
            if fs::metadata(path.join(file)).await.is_err() {
                return false;
            }
        }
        true
    }

    /// Download a known model from the Hugging Face Hub into the models dir
    pub async fn download_model(&mut self, model_id: &str) -> Result<PathBuf> {
        let model_info = self
            .available_models
            .get(model_id)
            .ok_or_else(|| ResumeMatcherError::ModelNotFound(model_id.to_string()))?
            .clone();

        let model_dir = self.models_dir.join(model_id);
        if self.downloaded_models.contains(model_id) {
            return Ok(model_dir);
        }

        println!(
            "📥 Downloading embedding model: {} ({} MB)",
            model_info.name, model_info.size_mb
        );
        info!("Repository: {}", model_info.repo_id);

        fs::create_dir_all(&model_dir).await?;

        let api = Api::new().map_err(|e| {
            ResumeMatcherError::ModelLoading(format!("Failed to initialize HF API: {}", e))
        })?;
        let repo = api.model(model_info.repo_id.clone());

        for file in REQUIRED_FILES {
            let cached_path = repo.get(file).await.map_err(|e| {
                ResumeMatcherError::ModelLoading(format!(
                    "Failed to download required file {}: {}",
                    file, e
                ))
            })?;
            fs::copy(&cached_path, model_dir.join(file)).await?;
            println!("  ✅ Downloaded: {}", file);
        }

        self.downloaded_models.insert(model_id.to_string());
        println!("✅ Embedding model {} downloaded successfully!", model_info.name);
        Ok(model_dir)
    }

    pub fn get_model_path(&self, model_id: &str) -> Option<PathBuf> {
        self.downloaded_models
            .contains(model_id)
            .then(|| self.models_dir.join(model_id))
    }

    /// Local path of the model, downloading it first when needed
    pub async fn ensure_model_available(&mut self, model: &str) -> Result<PathBuf> {
        let model_id = self
            .resolve_model_id(model)
            .unwrap_or_else(|| model.to_string());

        if let Some(path) = self.get_model_path(&model_id) {
            return Ok(path);
        }

        self.download_model(&model_id).await
    }

    pub fn list_available_models(&self) -> Vec<(&str, &EmbeddingModelInfo)> {
        self.available_models
            .iter()
            .map(|(id, info)| (id.as_str(), info))
            .collect()
    }

    pub fn is_model_downloaded(&self, model_id: &str) -> bool {
        self.downloaded_models.contains(model_id)
    }

    pub fn get_model_info(&self, model_id: &str) -> Option<&EmbeddingModelInfo> {
        self.available_models.get(model_id)
    }

    /// Accepts a model id, a repo id or a display name (case-insensitive)
    pub fn resolve_model_id(&self, input: &str) -> Option<String> {
        if self.available_models.contains_key(input) || self.downloaded_models.contains(input) {
            return Some(input.to_string());
        }

        let input_lower = input.to_lowercase();
        self.available_models
            .iter()
            .find(|(_, info)| info.repo_id == input || info.name.to_lowercase() == input_lower)
            .map(|(id, _)| id.clone())
    }
}
