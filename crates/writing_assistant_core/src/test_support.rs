//! In-memory fakes of the ports, shared by the unit tests of this crate.

use crate::domain::{ExportFormat, GenerationParameters, InteractionRecord, NewInteraction};
use crate::error::{ExportError, GenerationError};
use crate::ports::{DocumentExporter, InteractionStore, PortError, PortResult, TextGenerationService};
use async_trait::async_trait;
use std::sync::Mutex;

#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub model: String,
    pub prompt: String,
    pub params: GenerationParameters,
}

/// Replies with a fixed result and records every call it receives.
pub struct FakeGenerator {
    reply: Result<String, GenerationError>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl FakeGenerator {
    pub fn replying(text: &str) -> Self {
        Self {
            reply: Ok(text.to_string()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(error: GenerationError) -> Self {
        Self {
            reply: Err(error),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextGenerationService for FakeGenerator {
    async fn generate_text(
        &self,
        model: &str,
        prompt: &str,
        params: &GenerationParameters,
    ) -> Result<String, GenerationError> {
        self.calls.lock().unwrap().push(RecordedCall {
            model: model.to_string(),
            prompt: prompt.to_string(),
            params: *params,
        });
        self.reply.clone()
    }
}

/// A vector-backed store that can be told to fail every operation.
#[derive(Default)]
pub struct MemoryStore {
    records: Mutex<Vec<InteractionRecord>>,
    broken: bool,
}

impl MemoryStore {
    pub fn broken() -> Self {
        Self {
            records: Mutex::new(Vec::new()),
            broken: true,
        }
    }

    pub fn records(&self) -> Vec<InteractionRecord> {
        self.records.lock().unwrap().clone()
    }
}

#[async_trait]
impl InteractionStore for MemoryStore {
    async fn append(&self, interaction: NewInteraction) -> PortResult<InteractionRecord> {
        if self.broken {
            return Err(PortError::Unexpected("disk is full".to_string()));
        }
        let mut records = self.records.lock().unwrap();
        let record = InteractionRecord {
            id: records.len() as i64 + 1,
            created_at: interaction.created_at,
            operation: interaction.operation,
            model: interaction.model,
            input_text: interaction.input_text,
            output_text: interaction.output_text,
            category: interaction.category,
            tone: interaction.tone,
        };
        records.push(record.clone());
        Ok(record)
    }

    async fn list_recent(&self, limit: u32) -> PortResult<Vec<InteractionRecord>> {
        if self.broken {
            return Err(PortError::Unexpected("database is locked".to_string()));
        }
        let records = self.records.lock().unwrap();
        Ok(records.iter().rev().take(limit as usize).cloned().collect())
    }
}

/// Writes the text back as bytes, prefixed with the format's extension.
pub struct EchoExporter {
    pub fail: bool,
}

impl DocumentExporter for EchoExporter {
    fn render(&self, text: &str, format: ExportFormat) -> Result<Vec<u8>, ExportError> {
        if self.fail {
            return Err(ExportError::Document {
                format: format.extension(),
                message: "writer closed".to_string(),
            });
        }
        Ok(format!("{}:{}", format.extension(), text).into_bytes())
    }
}
