//! TOML-based configuration for ragdoc
//!
//! Infrastructure settings (server, providers, chunking) live in `ragdoc.toml`.
//! Provider credentials are never stored there: each provider section names the
//! environment variable holding its API key, and `.env` is loaded first.

use ragdoc_vector::DistanceMetric;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

/// Root configuration structure loaded from ragdoc.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RagdocConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub embedding: EmbeddingConfig,

    #[serde(default)]
    pub chat: ChatConfig,

    #[serde(default)]
    pub rag: RagConfig,
}

// ============= Server Configuration =============

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Origins allowed by the CORS layer
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,

    /// Upper bound on request bodies (PDF uploads)
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_cors_origins() -> Vec<String> {
    vec!["http://localhost:3000".to_string()]
}

fn default_max_upload_bytes() -> usize {
    25 * 1024 * 1024
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            log_level: default_log_level(),
            cors_origins: default_cors_origins(),
            max_upload_bytes: default_max_upload_bytes(),
        }
    }
}

// ============= Provider Configuration =============

fn default_inference_base() -> String {
    "https://models.github.ai/inference".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingConfig {
    #[serde(default = "default_inference_base")]
    pub base_url: String,

    #[serde(default = "default_embedding_model")]
    pub model: String,

    /// Environment variable holding the API key
    #[serde(default = "default_embedding_key_env")]
    pub api_key_env: String,

    /// Maximum number of texts sent in one embedding request
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    #[serde(default = "default_embedding_timeout")]
    pub timeout_secs: u64,
}

fn default_embedding_model() -> String {
    "openai/text-embedding-3-large".to_string()
}

fn default_embedding_key_env() -> String {
    "GITHUB_EMBEDDING_TOKEN".to_string()
}

fn default_batch_size() -> usize {
    64
}

fn default_embedding_timeout() -> u64 {
    60
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            base_url: default_inference_base(),
            model: default_embedding_model(),
            api_key_env: default_embedding_key_env(),
            batch_size: default_batch_size(),
            timeout_secs: default_embedding_timeout(),
        }
    }
}

impl EmbeddingConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatConfig {
    #[serde(default = "default_inference_base")]
    pub base_url: String,

    #[serde(default = "default_chat_model")]
    pub model: String,

    /// Environment variable holding the API key
    #[serde(default = "default_chat_key_env")]
    pub api_key_env: String,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    #[serde(default = "default_top_p")]
    pub top_p: f32,

    #[serde(default = "default_chat_timeout")]
    pub timeout_secs: u64,
}

fn default_chat_model() -> String {
    "openai/gpt-4.1".to_string()
}

fn default_chat_key_env() -> String {
    "GITHUB_CHAT_TOKEN".to_string()
}

fn default_temperature() -> f32 {
    0.7
}

fn default_top_p() -> f32 {
    1.0
}

fn default_chat_timeout() -> u64 {
    120
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            base_url: default_inference_base(),
            model: default_chat_model(),
            api_key_env: default_chat_key_env(),
            temperature: default_temperature(),
            top_p: default_top_p(),
            timeout_secs: default_chat_timeout(),
        }
    }
}

impl ChatConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

// ============= RAG Configuration =============

/// What to do when an upload arrives while another one is being ingested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IngestionPolicy {
    /// Wait for the running ingestion, then build and install.
    #[default]
    Queue,
    /// Fail immediately with a conflict.
    Reject,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RagConfig {
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,

    #[serde(default = "default_chunk_overlap")]
    pub chunk_overlap: usize,

    #[serde(default = "default_top_k")]
    pub top_k: usize,

    #[serde(default)]
    pub metric: DistanceMetric,

    /// Directory where uploads are staged while being parsed
    #[serde(default = "default_upload_dir")]
    pub upload_dir: PathBuf,

    #[serde(default)]
    pub ingestion: IngestionPolicy,
}

fn default_chunk_size() -> usize {
    500
}

fn default_chunk_overlap() -> usize {
    50
}

fn default_top_k() -> usize {
    4
}

fn default_upload_dir() -> PathBuf {
    PathBuf::from("./temp")
}

impl Default for RagConfig {
    fn default() -> Self {
        Self {
            chunk_size: default_chunk_size(),
            chunk_overlap: default_chunk_overlap(),
            top_k: default_top_k(),
            metric: DistanceMetric::default(),
            upload_dir: default_upload_dir(),
            ingestion: IngestionPolicy::default(),
        }
    }
}

// ============= Configuration Loading & Validation =============

/// Errors that can occur during configuration loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read configuration file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Environment variable '{0}' referenced in config is not set")]
    MissingEnvVar(String),
}

impl RagdocConfig {
    /// Load configuration from a TOML file.
    ///
    /// A missing file yields the built-in defaults; a present but malformed
    /// file is an error.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        let config = if path.exists() {
            let content = fs::read_to_string(path)?;
            Self::from_toml(&content)?
        } else {
            info!(path = %path.display(), "Config file not found, using defaults");
            let config = Self::default();
            config.validate()?;
            config
        };

        Ok(config)
    }

    /// Parse and validate configuration from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: RagdocConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let rag = &self.rag;
        if rag.chunk_size == 0 {
            return Err(ConfigError::ValidationError(
                "rag.chunk_size must be greater than 0".into(),
            ));
        }
        if rag.chunk_overlap >= rag.chunk_size {
            return Err(ConfigError::ValidationError(format!(
                "rag.chunk_overlap ({}) must be smaller than rag.chunk_size ({})",
                rag.chunk_overlap, rag.chunk_size
            )));
        }
        if rag.top_k == 0 {
            return Err(ConfigError::ValidationError(
                "rag.top_k must be greater than 0".into(),
            ));
        }
        if self.embedding.batch_size == 0 {
            return Err(ConfigError::ValidationError(
                "embedding.batch_size must be greater than 0".into(),
            ));
        }
        if !(0.0..=2.0).contains(&self.chat.temperature) {
            return Err(ConfigError::ValidationError(format!(
                "chat.temperature must be within [0, 2], got {}",
                self.chat.temperature
            )));
        }
        if !(self.chat.top_p > 0.0 && self.chat.top_p <= 1.0) {
            return Err(ConfigError::ValidationError(format!(
                "chat.top_p must be within (0, 1], got {}",
                self.chat.top_p
            )));
        }
        Ok(())
    }

    /// Resolve the API key for the embedding endpoint from the environment.
    pub fn embedding_api_key(&self) -> Result<String, ConfigError> {
        resolve_env(&self.embedding.api_key_env)
    }

    /// Resolve the API key for the chat endpoint from the environment.
    pub fn chat_api_key(&self) -> Result<String, ConfigError> {
        resolve_env(&self.chat.api_key_env)
    }
}

fn resolve_env(name: &str) -> Result<String, ConfigError> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::MissingEnvVar(name.to_string())),
    }
}
