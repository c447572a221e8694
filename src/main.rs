//! Resume matcher: compare a resume with a job description and render a fit report

use clap::Parser;
use log::{error, info, warn};
use resume_matcher::cli::{self, Cli, Commands, ConfigAction, ModelAction};
use resume_matcher::config::Config;
use resume_matcher::error::{Result, ResumeMatcherError};
use resume_matcher::input::InputManager;
use resume_matcher::output::{
    resolve_report_path, save_report_to_file, AnalysisReport, ReportGenerator,
};
use resume_matcher::processing::embedding_manager::EmbeddingModelManager;
use resume_matcher::processing::{ComparisonPipeline, Model2VecEmbedder};
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config, cli.config).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}

async fn run_command(command: Commands, config: Config, config_path: Option<PathBuf>) -> Result<()> {
    match command {
        Commands::Compare {
            resume,
            job,
            output,
            save,
            detailed,
        } => run_compare(&config, &resume, &job, output.as_deref(), save, detailed).await,

        Commands::Models { action } => run_models(&config, action).await,

        Commands::Config { action } => {
            let path = config_path.unwrap_or_else(Config::config_path);
            match action.unwrap_or(ConfigAction::Show) {
                ConfigAction::Show => {
                    let content = toml::to_string_pretty(&config).map_err(|e| {
                        ResumeMatcherError::Configuration(format!("Failed to serialize config: {}", e))
                    })?;
                    println!("{}", content);
                }
                ConfigAction::Reset => {
                    Config::default().save_to(&path)?;
                    println!("✅ Configuration reset: {}", path.display());
                }
                ConfigAction::Path => println!("{}", path.display()),
            }
            Ok(())
        }
    }
}

async fn run_compare(
    config: &Config,
    resume: &Path,
    job: &Path,
    output: Option<&str>,
    save: Option<PathBuf>,
    detailed: bool,
) -> Result<()> {
    info!("Starting resume comparison");

    cli::validate_file_extension(resume, &cli::SUPPORTED_EXTENSIONS)
        .map_err(|e| ResumeMatcherError::InvalidInput(format!("Resume file: {}", e)))?;
    cli::validate_file_extension(job, &cli::SUPPORTED_EXTENSIONS)
        .map_err(|e| ResumeMatcherError::InvalidInput(format!("Job description file: {}", e)))?;

    let output_format = match output {
        Some(format) => cli::parse_output_format(format).map_err(ResumeMatcherError::InvalidInput)?,
        None => config.output.format,
    };

    println!("🚀 Resume comparison");
    println!("📄 Resume: {}", resume.display());
    println!("💼 Job Description: {}", job.display());

    let mut input_manager = InputManager::new().with_cache(config.analysis.cache_extracted_text);
    let resume_doc = input_manager.load_document(resume).await?;
    let job_doc = input_manager.load_document(job).await?;

    if resume_doc.is_empty() {
        warn!("No text could be extracted from the resume; the score will be unreliable");
    }
    if job_doc.is_empty() {
        warn!("No text could be extracted from the job description; no keywords can be missing");
    }

    println!("🧠 Loading embedding model: {}", config.models.embedding_model);
    let mut model_manager = EmbeddingModelManager::new(config.models_dir().clone()).await?;
    let model_path = model_manager
        .ensure_model_available(&config.models.embedding_model)
        .await?;
    let embedder = Model2VecEmbedder::load(&model_path, &config.models.embedding_model)?;

    let pipeline = ComparisonPipeline::new(Arc::new(embedder));
    let comparison = pipeline.compare_documents(&resume_doc, &job_doc)?;

    let report = AnalysisReport::from_comparison(
        &comparison,
        &resume.to_string_lossy(),
        &job.to_string_lossy(),
        config.analysis.preview_chars,
    );

    let generator = ReportGenerator::with_options(
        config.output.color_output,
        detailed || config.output.detailed,
    );
    let content = generator.generate_report(&report, output_format)?;

    match resolve_report_path(save.as_deref(), output_format, resume) {
        Some(path) => {
            save_report_to_file(&content, &path)?;
            println!("✅ Analysis complete! Report saved to {}", path.display());
        }
        None => println!("{}", String::from_utf8_lossy(&content)),
    }

    Ok(())
}

async fn run_models(config: &Config, action: ModelAction) -> Result<()> {
    config.ensure_models_dir()?;
    let mut manager = EmbeddingModelManager::new(config.models_dir().clone()).await?;

    match action {
        ModelAction::List => {
            println!("📦 Embedding models ({}):", config.models_dir().display());
            for (id, info) in manager.list_available_models() {
                let status = if manager.is_model_downloaded(id) { "✅" } else { "  " };
                let default_marker = if id == config.models.embedding_model { " (default)" } else { "" };
                println!(
                    "{} {}{} - {} [{} dims, {} MB]",
                    status, id, default_marker, info.description, info.dimensions, info.size_mb
                );
            }
        }
        ModelAction::Download { model } => {
            let model_id = manager
                .resolve_model_id(&model)
                .ok_or_else(|| ResumeMatcherError::ModelNotFound(model.clone()))?;
            let path = manager.download_model(&model_id).await?;
            println!("📁 Model available at {}", path.display());
        }
        ModelAction::Info { model } => {
            let model_id = manager
                .resolve_model_id(&model)
                .ok_or_else(|| ResumeMatcherError::ModelNotFound(model.clone()))?;
            match manager.get_model_info(&model_id) {
                Some(info) => {
                    println!("{} ({})", info.name, model_id);
                    println!("  Repository: {}", info.repo_id);
                    println!("  Dimensions: {}", info.dimensions);
                    println!("  Size: {} MB", info.size_mb);
                    println!("  {}", info.description);
                }
                None => println!("{} (local model, no catalog entry)", model_id),
            }
            println!("  Downloaded: {}", manager.is_model_downloaded(&model_id));
        }
    }

    Ok(())
}
