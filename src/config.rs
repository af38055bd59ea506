//! Application configuration.
//!
//! Loaded once at process start from `~/.config/plainbrief/config.toml`
//! with environment-variable overrides. Every key is optional; a missing
//! or unparseable file falls back to defaults. A missing API key does
//! not prevent startup — calls that need it fail with an actionable
//! error instead.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub server: ServerConfig,
    pub limits: LimitsConfig,
}

/// Chat-completions provider configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of an OpenAI-compatible API.
    pub base_url: String,
    /// Model name passed on every request.
    pub model: String,
    /// Bearer credential. Usually supplied via `GROQ_API_KEY`.
    pub api_key: Option<String>,
}

/// REST facade configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Socket address the server binds to.
    pub bind: String,
}

/// Input limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Documents longer than this many characters are truncated before
    /// simplification, sized against the default model's context window.
    pub max_document_chars: usize,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.groq.com/openai/v1".to_string(),
            model: "llama3-70b-8192".to_string(),
            api_key: None,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:8000".to_string(),
        }
    }
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_document_chars: 24_000,
        }
    }
}

impl AppConfig {
    /// Load configuration from `~/.config/plainbrief/config.toml`, then
    /// apply environment overrides. Returns defaults if the file is
    /// missing or unparseable.
    pub fn load() -> Self {
        let config_path = Self::config_path();
        let mut config = match std::fs::read_to_string(&config_path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => {
                    tracing::info!("loaded config from {}", config_path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!(
                        "failed to parse config at {}: {e} — using defaults",
                        config_path.display()
                    );
                    Self::default()
                }
            },
            Err(_) => {
                tracing::debug!(
                    "no config file at {} — using defaults",
                    config_path.display()
                );
                Self::default()
            }
        };
        config.apply_env_overrides();
        config
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(key) = std::env::var("GROQ_API_KEY") {
            if !key.is_empty() {
                self.api.api_key = Some(key);
            }
        }
        if let Ok(base_url) = std::env::var("PLAINBRIEF_BASE_URL") {
            if !base_url.is_empty() {
                self.api.base_url = base_url;
            }
        }
        if let Ok(model) = std::env::var("PLAINBRIEF_MODEL") {
            if !model.is_empty() {
                self.api.model = model;
            }
        }
        if let Ok(bind) = std::env::var("PLAINBRIEF_BIND") {
            if !bind.is_empty() {
                self.server.bind = bind;
            }
        }
    }

    fn config_path() -> PathBuf {
        dirs::config_dir()
            .map(|d| d.join("plainbrief").join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("config.toml"))
    }
}
