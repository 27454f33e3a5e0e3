pub mod assistant;
pub mod domain;
pub mod error;
pub mod gateway;
pub mod ports;
pub mod prompt;

#[cfg(test)]
mod test_support;

pub use assistant::WritingAssistant;
pub use domain::{
    export_file_name, Completion, CorrectionRequest, ExportFormat, GenerationParameters,
    GenerationRequest, InteractionRecord, NewInteraction, OperationKind, Prompt, SessionEntry,
    SessionState, TextCategory, Tone,
};
pub use error::{AssistantError, AssistantResult, ExportError, GenerationError, ValidationError};
pub use gateway::GenerationGateway;
pub use ports::{DocumentExporter, InteractionStore, PortError, PortResult, TextGenerationService};
pub use prompt::{build_correction_prompt, build_generation_prompt};
