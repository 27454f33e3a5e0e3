//! crates/writing_assistant_core/src/ports.rs
//!
//! Defines the service contracts (traits) for the application's core logic.
//! These traits form the boundary of the hexagonal architecture, allowing the core
//! to be independent of specific external implementations like databases or APIs.

use crate::domain::{ExportFormat, GenerationParameters, InteractionRecord, NewInteraction};
use crate::error::{ExportError, GenerationError};
use async_trait::async_trait;

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// The error type for the storage port.
/// This abstracts away the specific errors of the underlying database.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PortError {
    #[error("Stored record is invalid: {0}")]
    InvalidRecord(String),
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

#[async_trait]
pub trait TextGenerationService: Send + Sync {
    /// Sends one prompt to `model` and returns the produced text as-is.
    async fn generate_text(
        &self,
        model: &str,
        prompt: &str,
        params: &GenerationParameters,
    ) -> Result<String, GenerationError>;
}

#[async_trait]
pub trait InteractionStore: Send + Sync {
    /// Appends a completed interaction and returns it with its assigned id.
    async fn append(&self, interaction: NewInteraction) -> PortResult<InteractionRecord>;

    /// Returns up to `limit` records, most recent first.
    async fn list_recent(&self, limit: u32) -> PortResult<Vec<InteractionRecord>>;
}

pub trait DocumentExporter: Send + Sync {
    /// Serializes text into the bytes of a downloadable file.
    fn render(&self, text: &str, format: ExportFormat) -> Result<Vec<u8>, ExportError>;
}
