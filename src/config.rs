// file: src/config.rs
// description: application configuration management with toml support
// reference: https://docs.rs/config

use crate::error::{AnalysisError, Result};
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub reference: ReferenceConfig,
    pub matching: MatchingConfig,
    pub embedding: EmbeddingConfig,
    pub validator: ValidatorConfig,
    pub analysis: AnalysisConfig,
    pub batch: BatchConfig,
}

/// Locations of the reference datasets. Missing paths fall back to built-ins.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ReferenceConfig {
    #[serde(default)]
    pub ontology_path: Option<PathBuf>,
    #[serde(default)]
    pub seniority_levels_path: Option<PathBuf>,
    #[serde(default)]
    pub job_titles_path: Option<PathBuf>,
    #[serde(default)]
    pub certifications_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MatchingConfig {
    pub ontology_threshold: f32,
    pub similar_threshold: f32,
    pub recovery_threshold: f32,
    pub recovery_strong_threshold: f32,
    pub regex_fallback_min: usize,
    pub min_skills: usize,
}

/// Which encoder backs skill and sentence similarity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EmbeddingProvider {
    /// Local sentence-embedding model, downloaded on first use.
    #[default]
    FastEmbed,
    /// Offline feature hashing; similarity follows shared spelling only.
    Hashing,
}

/// Sentence-embedding models offered by the local provider.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
pub enum EmbeddingModelKind {
    #[default]
    #[serde(rename = "all-MiniLM-L6-v2")]
    AllMiniLML6V2,
    #[serde(rename = "all-MiniLM-L6-v2-q")]
    AllMiniLML6V2Q,
    #[serde(rename = "bge-small-en-v1.5")]
    BGESmallENV15,
    #[serde(rename = "bge-small-en-v1.5-q")]
    BGESmallENV15Q,
    #[serde(rename = "embeddinggemma-300m")]
    EmbeddingGemma300M,
}

impl EmbeddingModelKind {
    pub fn dimension(&self) -> usize {
        match self {
            EmbeddingModelKind::AllMiniLML6V2 | EmbeddingModelKind::AllMiniLML6V2Q => 384,
            EmbeddingModelKind::BGESmallENV15 | EmbeddingModelKind::BGESmallENV15Q => 384,
            EmbeddingModelKind::EmbeddingGemma300M => 768,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            EmbeddingModelKind::AllMiniLML6V2 => "all-MiniLM-L6-v2",
            EmbeddingModelKind::AllMiniLML6V2Q => "all-MiniLM-L6-v2 (quantized)",
            EmbeddingModelKind::BGESmallENV15 => "BGE-small-en-v1.5",
            EmbeddingModelKind::BGESmallENV15Q => "BGE-small-en-v1.5 (quantized)",
            EmbeddingModelKind::EmbeddingGemma300M => "EmbeddingGemma-300M",
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EmbeddingConfig {
    #[serde(default)]
    pub provider: EmbeddingProvider,
    #[serde(default)]
    pub model: EmbeddingModelKind,
    /// Model file cache; fastembed's default location when unset.
    #[serde(default)]
    pub cache_dir: Option<PathBuf>,
    #[serde(default)]
    pub show_download_progress: bool,
    /// Vector size of the hashing provider.
    pub dimensions: usize,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            provider: EmbeddingProvider::default(),
            model: EmbeddingModelKind::default(),
            cache_dir: None,
            show_download_progress: false,
            dimensions: 512,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ValidatorConfig {
    pub enabled: bool,
    pub endpoint: String,
    pub model: String,
    #[serde(default)]
    pub api_key: Option<String>,
    pub timeout_secs: u64,
    pub max_tokens: u32,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AnalysisConfig {
    pub min_text_chars: usize,
    pub long_text_warning_chars: usize,
    pub max_recommendations: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BatchConfig {
    pub parallel_workers: usize,
    pub extensions: Vec<String>,
    pub skip_patterns: Vec<String>,
    pub max_file_size_mb: usize,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            ontology_threshold: 0.55,
            similar_threshold: 0.55,
            recovery_threshold: 0.65,
            recovery_strong_threshold: 0.75,
            regex_fallback_min: 5,
            min_skills: 3,
        }
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            min_text_chars: 50,
            long_text_warning_chars: 50_000,
            max_recommendations: 8,
        }
    }
}

impl Config {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        dotenv().ok();

        let mut builder = config::Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path));
        } else {
            builder = builder.add_source(config::File::from(Path::new("config/default.toml")));
        }

        builder = builder.add_source(
            config::Environment::with_prefix("WORKALIGN")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .map_err(|e| AnalysisError::Config(e.to_string()))?;

        let config: Config = settings
            .try_deserialize()
            .map_err(|e| AnalysisError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    pub fn default_config() -> Self {
        Self {
            reference: ReferenceConfig::default(),
            matching: MatchingConfig::default(),
            embedding: EmbeddingConfig::default(),
            validator: ValidatorConfig {
                enabled: false,
                endpoint: "https://api.groq.com/openai/v1/chat/completions".to_string(),
                model: "openai/gpt-oss-120b".to_string(),
                api_key: None,
                timeout_secs: 20,
                max_tokens: 2000,
            },
            analysis: AnalysisConfig::default(),
            batch: BatchConfig {
                parallel_workers: 4,
                extensions: vec!["txt".to_string(), "md".to_string(), "text".to_string()],
                skip_patterns: vec![".git/*".to_string(), "*.bak".to_string()],
                max_file_size_mb: 5,
            },
        }
    }

    pub fn validate(&self) -> Result<()> {
        let thresholds = [
            ("ontology_threshold", self.matching.ontology_threshold),
            ("similar_threshold", self.matching.similar_threshold),
            ("recovery_threshold", self.matching.recovery_threshold),
            (
                "recovery_strong_threshold",
                self.matching.recovery_strong_threshold,
            ),
        ];
        for (name, value) in thresholds {
            if !(0.0..=1.0).contains(&value) {
                return Err(AnalysisError::Config(format!(
                    "{} must be within 0.0..=1.0 (got {})",
                    name, value
                )));
            }
        }

        if self.embedding.dimensions == 0 {
            return Err(AnalysisError::Config(
                "embedding dimensions must be greater than 0".to_string(),
            ));
        }

        if self.analysis.max_recommendations == 0 {
            return Err(AnalysisError::Config(
                "max_recommendations must be greater than 0".to_string(),
            ));
        }

        if self.batch.parallel_workers == 0 {
            return Err(AnalysisError::Config(
                "parallel_workers must be greater than 0".to_string(),
            ));
        }

        if self.validator.enabled && self.validator.timeout_secs == 0 {
            return Err(AnalysisError::Config(
                "validator timeout_secs must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}
