//! Configuration for the bridge
//!
//! The library API takes everything it needs explicitly (API key, database
//! path, generator). This module exists for binaries and demos: a small
//! YAML file for model and logging settings, with environment variables
//! always winning over file values, and a helper for the conventional
//! `OPENAI_API_KEY` variable.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),
}

/// Model settings for the completion service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Model identifier passed to the chat-completion endpoint.
    pub model: String,

    /// Sampling temperature. Kept at 0.0 to minimize response variance.
    pub temperature: f32,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model: "gpt-4o-mini".to_string(),
            temperature: 0.0,
        }
    }
}

/// Logging settings (consumed by [`crate::logging::init`] via env vars).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level or per-module directives (`RUST_LOG` syntax).
    pub level: String,

    /// Output format: pretty, json, compact.
    pub format: String,

    /// Output destination: stdout, file, both.
    pub output: String,

    /// Directory for log files.
    pub directory: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
            output: "stdout".to_string(),
            directory: "./logs".to_string(),
        }
    }
}

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a YAML file, then apply env overrides.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let mut config: Config = serde_yaml::from_str(&contents)?;

        if let Ok(model) = std::env::var("NLSQL_MODEL") {
            config.llm.model = model;
        }
        if let Ok(temperature) = std::env::var("NLSQL_TEMPERATURE") {
            if let Ok(t) = temperature.parse() {
                config.llm.temperature = t;
            }
        }

        if let Ok(level) = std::env::var("RUST_LOG") {
            config.logging.level = level;
        }
        if let Ok(format) = std::env::var("LOG_FORMAT") {
            config.logging.format = format;
        }
        if let Ok(output) = std::env::var("LOG_OUTPUT") {
            config.logging.output = output;
        }
        if let Ok(dir) = std::env::var("LOG_DIR") {
            config.logging.directory = dir;
        }

        Ok(config)
    }

    /// Get the OpenAI API key from the environment.
    pub fn openai_api_key() -> Result<String, ConfigError> {
        std::env::var("OPENAI_API_KEY")
            .map_err(|_| ConfigError::MissingEnvVar("OPENAI_API_KEY".to_string()))
    }

    /// Export logging settings as the env vars the logging module reads.
    pub fn apply_logging_env(&self) {
        std::env::set_var("RUST_LOG", &self.logging.level);
        std::env::set_var("LOG_FORMAT", &self.logging.format);
        std::env::set_var("LOG_OUTPUT", &self.logging.output);
        std::env::set_var("LOG_DIR", &self.logging.directory);
    }
}
