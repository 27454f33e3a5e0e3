//! services/api/src/config.rs
//!
//! Defines the application's configuration structure and loading logic.
//!
//! All configuration is loaded from environment variables at startup. The `.env`
//! file is used for local development.

use std::net::SocketAddr;
use std::str::FromStr;
use tracing::Level;

/// A custom error type for configuration loading failures.
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing the environment variable {0}")]
    MissingVar(String),
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Which hosted model API serves generation requests.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LlmProvider {
    Gemini,
    OpenAi,
}

impl LlmProvider {
    /// The environment variable holding this provider's API key.
    pub fn api_key_var(self) -> &'static str {
        match self {
            LlmProvider::Gemini => "GOOGLE_API_KEY",
            LlmProvider::OpenAi => "OPENAI_API_KEY",
        }
    }
}

impl FromStr for LlmProvider {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gemini" | "google" => Ok(LlmProvider::Gemini),
            "openai" => Ok(LlmProvider::OpenAi),
            other => Err(ConfigError::InvalidValue(
                "LLM_PROVIDER".to_string(),
                format!("'{}' is not one of 'gemini', 'openai'", other),
            )),
        }
    }
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub bind_address: SocketAddr,
    pub database_url: String,
    pub log_level: Level,
    pub provider: LlmProvider,
    pub google_api_key: Option<String>,
    pub openai_api_key: Option<String>,
    pub openai_base_url: Option<String>,
    pub generation_model: String,
    pub history_enabled: bool,
    pub history_limit: u32,
    pub cors_origin: String,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// It will look for a `.env` file in the current directory for development,
    /// but this is skipped in test environments to ensure tests are hermetic.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Only load from .env in non-test mode to avoid contamination.
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from any variable source.
    pub fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        // --- Server and Database Settings ---
        let bind_address_str = var("BIND_ADDRESS").unwrap_or_else(|| "0.0.0.0:3000".to_string());
        let bind_address = bind_address_str.parse::<SocketAddr>().map_err(|e| {
            ConfigError::InvalidValue("BIND_ADDRESS".to_string(), e.to_string())
        })?;

        let database_url = var("DATABASE_URL")
            .unwrap_or_else(|| "sqlite://gerai_history.db?mode=rwc".to_string());

        let log_level_str = var("RUST_LOG").unwrap_or_else(|| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        // --- Model Provider ---
        let provider = match var("LLM_PROVIDER") {
            Some(value) => value.parse::<LlmProvider>()?,
            None => LlmProvider::Gemini,
        };
        let google_api_key = var("GOOGLE_API_KEY").filter(|k| !k.trim().is_empty());
        let openai_api_key = var("OPENAI_API_KEY").filter(|k| !k.trim().is_empty());
        let openai_base_url = var("OPENAI_BASE_URL").filter(|u| !u.trim().is_empty());

        let selected_key = match provider {
            LlmProvider::Gemini => &google_api_key,
            LlmProvider::OpenAi => &openai_api_key,
        };
        if selected_key.is_none() {
            return Err(ConfigError::MissingVar(provider.api_key_var().to_string()));
        }

        let generation_model = var("GENERATION_MODEL").unwrap_or_else(|| match provider {
            LlmProvider::Gemini => "gemini-1.5-flash".to_string(),
            LlmProvider::OpenAi => "gpt-4o-mini".to_string(),
        });

        // --- History and Web Settings ---
        let history_enabled = match var("HISTORY_ENABLED") {
            Some(value) => parse_bool("HISTORY_ENABLED", &value)?,
            None => true,
        };
        let history_limit = match var("HISTORY_LIMIT") {
            Some(value) => value.trim().parse::<u32>().map_err(|e| {
                ConfigError::InvalidValue("HISTORY_LIMIT".to_string(), e.to_string())
            })?,
            None => 20,
        };
        let cors_origin =
            var("CORS_ORIGIN").unwrap_or_else(|| "http://localhost:3000".to_string());

        Ok(Self {
            bind_address,
            database_url,
            log_level,
            provider,
            google_api_key,
            openai_api_key,
            openai_base_url,
            generation_model,
            history_enabled,
            history_limit,
            cors_origin,
        })
    }
}

fn parse_bool(name: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(ConfigError::InvalidValue(
            name.to_string(),
            format!("'{}' is not a boolean", other),
        )),
    }
}
