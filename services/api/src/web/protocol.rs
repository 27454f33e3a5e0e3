//! services/api/src/web/protocol.rs
//!
//! Defines the JSON payloads exchanged between the browser client and the API
//! server. Selections travel as the stable machine keys of the core enums.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use writing_assistant_core::{
    AssistantError, Completion, ExportFormat, InteractionRecord, TextCategory, Tone,
};

//=========================================================================================
// Payloads Sent FROM the Client (Browser) TO the Server
//=========================================================================================

/// Asks for a new text of the given category and tone about a topic.
#[derive(Deserialize, Debug, ToSchema)]
pub struct GenerateRequest {
    /// A category key (e.g. `professional_email`), menu number or label.
    pub category: String,
    /// A tone key (e.g. `formal`), menu number or label.
    pub tone: String,
    pub topic: String,
}

/// Asks for a revision of `text` in the given tone.
#[derive(Deserialize, Debug, ToSchema)]
pub struct CorrectRequest {
    pub tone: String,
    pub text: String,
}

#[derive(Deserialize, Debug, IntoParams)]
pub struct HistoryQuery {
    /// Maximum number of records to return. Capped at 200.
    pub limit: Option<u32>,
}

/// Asks for a text to be packaged as a downloadable file.
#[derive(Deserialize, Debug, ToSchema)]
pub struct ExportRequest {
    pub text: String,
    /// `txt` or `docx`.
    pub format: String,
    /// Base name of the download; the extension is added when missing.
    pub file_name: Option<String>,
}

//=========================================================================================
// Payloads Sent FROM the Server TO the Client (Browser)
//=========================================================================================

/// A selectable option for form rendering.
#[derive(Serialize, Debug, ToSchema)]
pub struct Choice {
    pub key: String,
    pub label: String,
}

/// Everything a client needs to render the generate and correct forms.
#[derive(Serialize, Debug, ToSchema)]
pub struct OptionsResponse {
    pub categories: Vec<Choice>,
    pub tones: Vec<Choice>,
    pub formats: Vec<Choice>,
}

impl OptionsResponse {
    pub fn all() -> Self {
        Self {
            categories: TextCategory::ALL
                .iter()
                .map(|c| Choice { key: c.key().to_string(), label: c.label().to_string() })
                .collect(),
            tones: Tone::ALL
                .iter()
                .map(|t| Choice { key: t.key().to_string(), label: t.label().to_string() })
                .collect(),
            formats: ExportFormat::ALL
                .iter()
                .map(|f| Choice { key: f.extension().to_string(), label: f.mime_type().to_string() })
                .collect(),
        }
    }
}

/// Download names suggested for a completion.
#[derive(Serialize, Debug, ToSchema)]
pub struct SuggestedFileNames {
    pub txt: String,
    pub docx: String,
}

/// The result of a successful generation or correction.
#[derive(Serialize, Debug, ToSchema)]
pub struct CompletionResponse {
    /// `gerar` or `corrigir`.
    pub operation: String,
    pub model: String,
    pub input: String,
    /// The model's output, unmodified (Markdown).
    pub output: String,
    pub category: Option<String>,
    pub tone: String,
    pub persisted: bool,
    /// Present when the interaction could not be saved to history.
    pub store_warning: Option<String>,
    pub suggested_file_names: SuggestedFileNames,
}

impl From<Completion> for CompletionResponse {
    fn from(completion: Completion) -> Self {
        let suggested_file_names = SuggestedFileNames {
            txt: completion.suggested_file_name(ExportFormat::PlainText),
            docx: completion.suggested_file_name(ExportFormat::Docx),
        };
        Self {
            operation: completion.operation.key().to_string(),
            model: completion.model,
            input: completion.input,
            output: completion.output,
            category: completion.category.map(|c| c.key().to_string()),
            tone: completion.tone.key().to_string(),
            persisted: completion.persisted,
            store_warning: completion.store_warning,
            suggested_file_names,
        }
    }
}

/// One stored interaction.
#[derive(Serialize, Debug, ToSchema)]
pub struct HistoryEntry {
    pub id: i64,
    pub created_at: DateTime<Utc>,
    pub operation: String,
    pub model: String,
    pub input_text: String,
    pub output_text: String,
    pub category: Option<String>,
    pub tone: String,
}

impl From<InteractionRecord> for HistoryEntry {
    fn from(record: InteractionRecord) -> Self {
        Self {
            id: record.id,
            created_at: record.created_at,
            operation: record.operation.key().to_string(),
            model: record.model,
            input_text: record.input_text,
            output_text: record.output_text,
            category: record.category.map(|c| c.key().to_string()),
            tone: record.tone.key().to_string(),
        }
    }
}

/// The body of every non-2xx response.
#[derive(Serialize, Debug, ToSchema)]
pub struct ErrorResponse {
    /// `validation`, `generation`, `export` or `store`.
    pub kind: String,
    pub error: String,
    pub advice: Option<String>,
}

impl From<&AssistantError> for ErrorResponse {
    fn from(err: &AssistantError) -> Self {
        let (kind, advice) = match err {
            AssistantError::Validation(_) => ("validation", None),
            AssistantError::Generation(e) => ("generation", Some(e.advice().to_string())),
            AssistantError::Export(_) => ("export", None),
            AssistantError::Store(_) => ("store", None),
        };
        Self {
            kind: kind.to_string(),
            error: err.to_string(),
            advice,
        }
    }
}
