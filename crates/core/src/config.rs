//! Configuration management for the docchat CLI.
//!
//! This module handles loading and merging configuration from multiple sources:
//! - Built-in defaults
//! - Config file (docchat.yaml)
//! - Environment variables (`DOCCHAT_*`)
//! - Command-line flags
//!
//! Later sources win. The retrieval tunables are surfaced here so the
//! answering policy never reads the environment itself.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{AppError, AppResult};

/// Retrieval and filtering tunables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievalConfig {
    /// Number of candidate passages requested from the index per query
    #[serde(rename = "topK", default = "default_top_k")]
    pub top_k: usize,

    /// Number of ranked passages the relevance filter considers
    #[serde(rename = "fanOut", default = "default_fan_out")]
    pub fan_out: usize,

    /// Maximum passages used for summary prompts
    #[serde(rename = "summaryCap", default = "default_summary_cap")]
    pub summary_cap: usize,

    /// Maximum passages used for grounded non-summary prompts
    #[serde(rename = "specificCap", default = "default_specific_cap")]
    pub specific_cap: usize,

    /// Query tokens of this length or shorter are ignored
    #[serde(rename = "minWordLen", default = "default_min_word_len")]
    pub min_word_len: usize,
}

fn default_top_k() -> usize {
    8
}

fn default_fan_out() -> usize {
    5
}

fn default_summary_cap() -> usize {
    8
}

fn default_specific_cap() -> usize {
    3
}

fn default_min_word_len() -> usize {
    3
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            top_k: default_top_k(),
            fan_out: default_fan_out(),
            summary_cap: default_summary_cap(),
            specific_cap: default_specific_cap(),
            min_word_len: default_min_word_len(),
        }
    }
}

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Path to the document to chat over
    pub document: Option<PathBuf>,

    /// Optional config file path
    pub config_file: Option<PathBuf>,

    /// LLM provider (e.g., "ollama", "openai", "gemini")
    pub provider: String,

    /// Model identifier
    pub model: String,

    /// Provider endpoint override
    pub endpoint: Option<String>,

    /// API key for the LLM provider
    pub api_key: Option<String>,

    /// Environment variable holding the API key
    pub api_key_env: Option<String>,

    /// Log level override
    pub log_level: Option<String>,

    /// Verbose mode (enables debug logging)
    pub verbose: bool,

    /// Disable colored output
    pub no_color: bool,

    /// Retrieval tunables
    pub retrieval: RetrievalConfig,
}

/// Full configuration file structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ConfigFile {
    document: Option<String>,
    llm: Option<LlmFileConfig>,
    retrieval: Option<RetrievalConfig>,
    logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct LlmFileConfig {
    provider: Option<String>,
    model: Option<String>,
    endpoint: Option<String>,
    #[serde(rename = "apiKeyEnv")]
    api_key_env: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct LoggingConfig {
    level: Option<String>,
    color: Option<bool>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            document: None,
            config_file: None,
            provider: "ollama".to_string(), // Local-first default
            model: "llama3.2".to_string(),
            endpoint: None,
            api_key: None,
            api_key_env: None,
            log_level: None,
            verbose: false,
            no_color: false,
            retrieval: RetrievalConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the config file and environment variables.
    ///
    /// Environment variables:
    /// - `DOCCHAT_CONFIG`: Path to config file (default: ./docchat.yaml)
    /// - `DOCCHAT_DOCUMENT`: Path to the document
    /// - `DOCCHAT_PROVIDER`: LLM provider
    /// - `DOCCHAT_MODEL`: Model identifier
    /// - `DOCCHAT_ENDPOINT`: Provider endpoint
    /// - `DOCCHAT_API_KEY`: API key
    /// - `RUST_LOG`: Log level
    /// - `NO_COLOR`: Disable colored output
    pub fn load() -> AppResult<Self> {
        let mut config = Self::default();

        if let Ok(config_file) = std::env::var("DOCCHAT_CONFIG") {
            config.config_file = Some(PathBuf::from(config_file));
        }

        // Load from YAML config file if it exists
        let config_path = config
            .config_file
            .clone()
            .unwrap_or_else(|| PathBuf::from("docchat.yaml"));

        if config_path.exists() {
            config = config.merge_yaml(&config_path)?;
        }

        // Environment variables override YAML config
        if let Ok(document) = std::env::var("DOCCHAT_DOCUMENT") {
            config.document = Some(PathBuf::from(document));
        }

        if let Ok(provider) = std::env::var("DOCCHAT_PROVIDER") {
            config.provider = provider;
        }

        if let Ok(model) = std::env::var("DOCCHAT_MODEL") {
            config.model = model;
        }

        if let Ok(endpoint) = std::env::var("DOCCHAT_ENDPOINT") {
            config.endpoint = Some(endpoint);
        }

        if let Ok(api_key) = std::env::var("DOCCHAT_API_KEY") {
            config.api_key = Some(api_key);
        }

        config.log_level = std::env::var("RUST_LOG").ok();

        if std::env::var("NO_COLOR").is_ok() {
            config.no_color = true;
        }

        Ok(config)
    }

    /// Merge a YAML configuration file into this config.
    fn merge_yaml(&self, path: &Path) -> AppResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("Failed to read config file {:?}: {}", path, e))
        })?;

        let config_file: ConfigFile = serde_yaml::from_str(&contents).map_err(|e| {
            AppError::Config(format!("Failed to parse config file {:?}: {}", path, e))
        })?;

        let mut result = self.clone();

        if let Some(document) = config_file.document {
            result.document = Some(PathBuf::from(document));
        }

        if let Some(llm) = config_file.llm {
            if let Some(provider) = llm.provider {
                result.provider = provider;
            }
            if let Some(model) = llm.model {
                result.model = model;
            }
            if let Some(endpoint) = llm.endpoint {
                result.endpoint = Some(endpoint);
            }
            if let Some(api_key_env) = llm.api_key_env {
                result.api_key_env = Some(api_key_env);
            }
        }

        if let Some(retrieval) = config_file.retrieval {
            result.retrieval = retrieval;
        }

        if let Some(logging) = config_file.logging {
            if let Some(level) = logging.level {
                result.log_level = Some(level);
            }
            if let Some(color) = logging.color {
                result.no_color = !color;
            }
        }

        Ok(result)
    }

    /// Apply CLI overrides to the configuration.
    ///
    /// CLI flags take precedence over environment variables and the
    /// config file.
    #[allow(clippy::too_many_arguments)]
    pub fn with_overrides(
        mut self,
        document: Option<PathBuf>,
        config_file: Option<PathBuf>,
        provider: Option<String>,
        model: Option<String>,
        endpoint: Option<String>,
        log_level: Option<String>,
        verbose: bool,
        no_color: bool,
    ) -> Self {
        if let Some(document) = document {
            self.document = Some(document);
        }

        if let Some(config_file) = config_file {
            self.config_file = Some(config_file);
        }

        if let Some(provider) = provider {
            self.provider = provider;
        }

        if let Some(model) = model {
            self.model = model;
        }

        if let Some(endpoint) = endpoint {
            self.endpoint = Some(endpoint);
        }

        if let Some(log_level) = log_level {
            self.log_level = Some(log_level);
        }

        if verbose {
            self.verbose = true;
            // Verbose mode implies debug logging
            if self.log_level.is_none() {
                self.log_level = Some("debug".to_string());
            }
        }

        if no_color {
            self.no_color = true;
        }

        self
    }

    /// Resolve the API key for the active provider.
    pub fn resolve_api_key(&self) -> Option<String> {
        // Explicit key wins
        if let Some(ref key) = self.api_key {
            return Some(key.clone());
        }

        if let Some(ref env_var) = self.api_key_env {
            if let Ok(key) = std::env::var(env_var) {
                return Some(key);
            }
        }

        None
    }

    /// Validate configuration for the active provider.
    pub fn validate(&self) -> AppResult<()> {
        let known_providers = ["ollama", "openai", "gemini"];

        if !known_providers.contains(&self.provider.as_str()) {
            return Err(AppError::Config(format!(
                "Unknown provider: {}. Supported: {}",
                self.provider,
                known_providers.join(", ")
            )));
        }

        if self.retrieval.top_k == 0 {
            return Err(AppError::Config(
                "retrieval.topK must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}
