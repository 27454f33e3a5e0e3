//! services/api/src/bootstrap.rs
//!
//! Startup wiring shared by the `api` and `cli` binaries: logging, the model
//! adapter selected by configuration, and the optional history store.

use crate::adapters::{DbAdapter, FileExporter, GeminiAdapter, OpenAiChatAdapter};
use crate::config::{Config, LlmProvider};
use crate::error::ApiError;
use async_openai::{config::OpenAIConfig, Client};
use std::sync::Arc;
use tracing::{info, warn, Level};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use writing_assistant_core::{GenerationGateway, TextGenerationService, WritingAssistant};

/// Where log lines go.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogTarget {
    Stdout,
    /// Keeps logs out of the way of interactive terminal output.
    Stderr,
}

/// Installs the global `tracing` subscriber.
pub fn init_tracing(level: Level, target: LogTarget) {
    let filter = tracing_subscriber::EnvFilter::new(level.to_string());
    let registry = tracing_subscriber::registry().with(filter);
    match target {
        LogTarget::Stdout => registry.with(tracing_subscriber::fmt::layer()).init(),
        LogTarget::Stderr => registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init(),
    }
}

/// Creates the adapter for the configured model provider.
pub fn generation_service(config: &Config) -> Result<Arc<dyn TextGenerationService>, ApiError> {
    let missing_key = || {
        ApiError::Internal(format!("{} is required", config.provider.api_key_var()))
    };

    match config.provider {
        LlmProvider::Gemini => {
            let api_key = config.google_api_key.clone().ok_or_else(missing_key)?;
            let http = reqwest::Client::builder()
                .user_agent(concat!("gerai/", env!("CARGO_PKG_VERSION")))
                .build()?;
            Ok(Arc::new(GeminiAdapter::new(http, api_key)))
        }
        LlmProvider::OpenAi => {
            let api_key = config.openai_api_key.as_ref().ok_or_else(missing_key)?;
            let mut openai_config = OpenAIConfig::new().with_api_key(api_key);
            if let Some(base_url) = &config.openai_base_url {
                openai_config = openai_config.with_api_base(base_url);
            }
            Ok(Arc::new(OpenAiChatAdapter::new(Client::with_config(openai_config))))
        }
    }
}

/// Opens the history database and applies migrations.
pub async fn open_history(database_url: &str) -> Result<DbAdapter, ApiError> {
    info!("Connecting to history database...");
    let db = DbAdapter::connect(database_url).await?;
    info!("Running database migrations...");
    db.run_migrations().await?;
    info!("Database migrations complete.");
    Ok(db)
}

/// Wires the workflow from configuration.
///
/// An unreachable history database disables history instead of aborting startup.
pub async fn build_assistant(config: &Config) -> Result<WritingAssistant, ApiError> {
    let gateway = GenerationGateway::new(generation_service(config)?, config.generation_model.clone());
    let assistant = WritingAssistant::new(gateway, Arc::new(FileExporter));
    info!(provider = ?config.provider, model = assistant.model(), "Model adapter ready");

    if !config.history_enabled {
        info!("History is disabled by configuration.");
        return Ok(assistant);
    }
    match open_history(&config.database_url).await {
        Ok(db) => Ok(assistant.with_store(Arc::new(db))),
        Err(e) => {
            warn!("History unavailable, continuing without it: {}", e);
            Ok(assistant)
        }
    }
}
