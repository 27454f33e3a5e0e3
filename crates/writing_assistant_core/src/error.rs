//! crates/writing_assistant_core/src/error.rs
//!
//! The typed error taxonomy shared by every front-end.

use crate::ports::PortError;

/// Input rejected at the boundary, before any prompt is built or call is made.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("the topic must not be empty")]
    EmptyTopic,
    #[error("the text to correct must not be empty")]
    EmptySourceText,
    #[error("the text to export must not be empty")]
    EmptyExportText,
    #[error("the file name must not be empty")]
    EmptyFileName,
    #[error("unknown text category: '{0}'")]
    UnknownCategory(String),
    #[error("unknown tone: '{0}'")]
    UnknownTone(String),
    #[error("unknown operation: '{0}'")]
    UnknownOperation(String),
    #[error("unknown export format: '{0}'")]
    UnknownFormat(String),
}

/// The call to the generative-text service failed. Each variant carries the
/// provider's diagnostic message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GenerationError {
    #[error("could not reach the model provider: {0}")]
    Network(String),
    #[error("the model provider rejected the credentials: {0}")]
    Authentication(String),
    #[error("the requested model is not available: {0}")]
    InvalidModel(String),
    #[error("quota or rate limit exceeded: {0}")]
    RateLimited(String),
    #[error("the model provider rejected the request: {0}")]
    InvalidRequest(String),
    #[error("the model provider is unavailable: {0}")]
    Unavailable(String),
    #[error("the model provider sent an unreadable response: {0}")]
    InvalidResponse(String),
    #[error("the model returned no text: {0}")]
    EmptyResponse(String),
    #[error("the model call failed: {0}")]
    Other(String),
}

impl GenerationError {
    /// A short hint telling the user what to check before trying again.
    pub fn advice(&self) -> &'static str {
        match self {
            GenerationError::Network(_) | GenerationError::Unavailable(_) => {
                "Check your internet connection and try again."
            }
            GenerationError::Authentication(_) => "Check the API key in your configuration.",
            GenerationError::InvalidModel(_) => "Check the configured model name.",
            GenerationError::RateLimited(_) => "Wait a moment or check your plan's quota.",
            GenerationError::InvalidRequest(_)
            | GenerationError::InvalidResponse(_)
            | GenerationError::EmptyResponse(_)
            | GenerationError::Other(_) => {
                "Try again; if it keeps failing, check the model name, API key and connection."
            }
        }
    }
}

/// Serializing text for download failed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExportError {
    #[error("failed to build the {format} document: {message}")]
    Document { format: &'static str, message: String },
}

/// Every failure a workflow step can report to a front-end.
#[derive(Debug, thiserror::Error)]
pub enum AssistantError {
    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationError),

    #[error("Generation failed: {0}")]
    Generation(#[from] GenerationError),

    #[error("Export failed: {0}")]
    Export(#[from] ExportError),

    /// Persistence failures. Only surfaced by read paths; writes swallow them.
    #[error("History store error: {0}")]
    Store(#[from] PortError),
}

/// A convenience type alias for `Result<T, AssistantError>`.
pub type AssistantResult<T> = Result<T, AssistantError>;
