//! crates/writing_assistant_core/src/assistant.rs
//!
//! The single workflow every front-end calls: validate the user's selections,
//! build the prompt, run it through the gateway, then record the interaction.

use crate::domain::{
    input_preview, Completion, CorrectionRequest, ExportFormat, GenerationRequest,
    InteractionRecord, NewInteraction, OperationKind, TextCategory, Tone,
};
use crate::error::{AssistantResult, ValidationError};
use crate::gateway::GenerationGateway;
use crate::ports::{DocumentExporter, InteractionStore};
use crate::prompt::{build_correction_prompt, build_generation_prompt};
use chrono::Utc;
use std::sync::Arc;
use tracing::{info, warn};

/// Sequences prompt building, generation, history and export for the front-ends.
#[derive(Clone)]
pub struct WritingAssistant {
    gateway: GenerationGateway,
    store: Option<Arc<dyn InteractionStore>>,
    exporter: Arc<dyn DocumentExporter>,
}

impl WritingAssistant {
    /// Creates an assistant without history.
    pub fn new(gateway: GenerationGateway, exporter: Arc<dyn DocumentExporter>) -> Self {
        Self {
            gateway,
            store: None,
            exporter,
        }
    }

    /// Enables recording of completed interactions.
    pub fn with_store(mut self, store: Arc<dyn InteractionStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn model(&self) -> &str {
        self.gateway.model()
    }

    pub fn has_history(&self) -> bool {
        self.store.is_some()
    }

    /// Writes a new text of `category` about `topic`.
    ///
    /// An empty topic is rejected before any prompt is built. A failed model call
    /// records nothing.
    pub async fn generate(
        &self,
        category: TextCategory,
        tone: Tone,
        topic: &str,
    ) -> AssistantResult<Completion> {
        let topic = topic.trim();
        if topic.is_empty() {
            return Err(ValidationError::EmptyTopic.into());
        }

        let request = GenerationRequest {
            category,
            tone,
            topic: topic.to_string(),
        };
        let prompt = build_generation_prompt(&request);
        let output = self.gateway.generate(&prompt).await?;

        let (persisted, store_warning) = self
            .persist(NewInteraction {
                created_at: Utc::now(),
                operation: OperationKind::Generate,
                model: self.model().to_string(),
                input_text: request.topic.clone(),
                output_text: output.clone(),
                category: Some(category),
                tone,
            })
            .await;

        Ok(Completion {
            operation: OperationKind::Generate,
            model: self.model().to_string(),
            input: request.topic,
            output,
            category: Some(category),
            tone,
            persisted,
            store_warning,
        })
    }

    /// Revises `source_text`, returning the revised text followed by suggestions.
    pub async fn correct(&self, tone: Tone, source_text: &str) -> AssistantResult<Completion> {
        if source_text.trim().is_empty() {
            return Err(ValidationError::EmptySourceText.into());
        }

        let request = CorrectionRequest {
            tone,
            source_text: source_text.to_string(),
        };
        let prompt = build_correction_prompt(&request);
        let output = self.gateway.generate(&prompt).await?;

        let (persisted, store_warning) = self
            .persist(NewInteraction {
                created_at: Utc::now(),
                operation: OperationKind::Correct,
                model: self.model().to_string(),
                input_text: input_preview(&request.source_text),
                output_text: output.clone(),
                category: None,
                tone,
            })
            .await;

        Ok(Completion {
            operation: OperationKind::Correct,
            model: self.model().to_string(),
            input: request.source_text,
            output,
            category: None,
            tone,
            persisted,
            store_warning,
        })
    }

    /// Store failures are logged and handed back as a warning, never as an error.
    async fn persist(&self, interaction: NewInteraction) -> (bool, Option<String>) {
        let Some(store) = &self.store else {
            return (false, None);
        };
        let operation = interaction.operation;
        match store.append(interaction).await {
            Ok(record) => {
                info!(id = record.id, operation = operation.key(), "Interaction saved to history");
                (true, None)
            }
            Err(e) => {
                warn!(operation = operation.key(), "Failed to save interaction to history: {}", e);
                (false, Some(e.to_string()))
            }
        }
    }

    /// The most recent interactions, newest first. Empty when history is disabled.
    pub async fn history(&self, limit: u32) -> AssistantResult<Vec<InteractionRecord>> {
        match &self.store {
            Some(store) => Ok(store.list_recent(limit).await?),
            None => Ok(Vec::new()),
        }
    }

    /// Serializes text for download.
    pub fn export(&self, text: &str, format: ExportFormat) -> AssistantResult<Vec<u8>> {
        if text.is_empty() {
            return Err(ValidationError::EmptyExportText.into());
        }
        Ok(self.exporter.render(text, format)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::GenerationParameters;
    use crate::error::{AssistantError, GenerationError};
    use crate::ports::PortError;
    use crate::test_support::{EchoExporter, FakeGenerator, MemoryStore};

    fn assistant(
        generator: Arc<FakeGenerator>,
        store: Option<Arc<MemoryStore>>,
    ) -> WritingAssistant {
        let gateway = GenerationGateway::new(generator, "models/gemini-1.5-flash");
        let assistant = WritingAssistant::new(gateway, Arc::new(EchoExporter { fail: false }));
        match store {
            Some(store) => assistant.with_store(store),
            None => assistant,
        }
    }

    #[tokio::test]
    async fn generate_builds_prompt_calls_model_and_records() {
        let generator = Arc::new(FakeGenerator::replying("Assunto: Férias\nCorpo: ..."));
        let store = Arc::new(MemoryStore::default());
        let assistant = assistant(generator.clone(), Some(store.clone()));

        let completion = assistant
            .generate(TextCategory::ProfessionalEmail, Tone::Formal, "  solicitação de férias ")
            .await
            .unwrap();

        assert_eq!(completion.output, "Assunto: Férias\nCorpo: ...");
        assert_eq!(completion.input, "solicitação de férias");
        assert_eq!(completion.model, "gemini-1.5-flash");
        assert!(completion.persisted);
        assert!(completion.store_warning.is_none());

        let calls = generator.calls();
        assert_eq!(calls.len(), 1);
        assert!(calls[0].prompt.contains("E-mail Profissional"));
        assert_eq!(calls[0].params.max_output_length, 800);

        let records = store.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].operation, OperationKind::Generate);
        assert_eq!(records[0].category, Some(TextCategory::ProfessionalEmail));
        assert_eq!(records[0].input_text, "solicitação de férias");
    }

    #[tokio::test]
    async fn empty_topic_is_rejected_before_calling_the_model() {
        let generator = Arc::new(FakeGenerator::replying("unused"));
        let store = Arc::new(MemoryStore::default());
        let assistant = assistant(generator.clone(), Some(store.clone()));

        let err = assistant
            .generate(TextCategory::SocialMediaPost, Tone::Friendly, " \n\t ")
            .await
            .unwrap_err();

        assert!(matches!(err, AssistantError::Validation(ValidationError::EmptyTopic)));
        assert!(generator.calls().is_empty());
        assert!(store.records().is_empty());
    }

    #[tokio::test]
    async fn failed_generation_records_nothing() {
        let generator = Arc::new(FakeGenerator::failing(GenerationError::Authentication(
            "API key not valid".to_string(),
        )));
        let store = Arc::new(MemoryStore::default());
        let assistant = assistant(generator, Some(store.clone()));

        let err = assistant
            .generate(TextCategory::MarketingContent, Tone::Persuasive, "curso de inglês")
            .await
            .unwrap_err();

        assert!(matches!(err, AssistantError::Generation(GenerationError::Authentication(_))));
        assert!(store.records().is_empty());
    }

    #[tokio::test]
    async fn store_failure_is_reported_but_not_fatal() {
        let generator = Arc::new(FakeGenerator::replying("texto"));
        let store = Arc::new(MemoryStore::broken());
        let assistant = assistant(generator, Some(store));

        let completion = assistant
            .generate(TextCategory::ProductDescription, Tone::Neutral, "garrafa térmica")
            .await
            .unwrap();

        assert_eq!(completion.output, "texto");
        assert!(!completion.persisted);
        assert!(completion.store_warning.unwrap().contains("disk is full"));
    }

    #[tokio::test]
    async fn correct_uses_fixed_parameters_and_truncates_recorded_input() {
        let generator = Arc::new(FakeGenerator::replying("Texto revisado\n\nSugestões:\n1. ..."));
        let store = Arc::new(MemoryStore::default());
        let assistant = assistant(generator.clone(), Some(store.clone()));
        let source = "Ele foi na loja e comprou pão. ".repeat(10);

        let completion = assistant.correct(Tone::Technical, &source).await.unwrap();

        assert_eq!(completion.input, source);
        assert_eq!(completion.category, None);
        let calls = generator.calls();
        assert_eq!(calls[0].params, GenerationParameters::CORRECTION);
        assert_eq!(calls[0].prompt.matches(source.as_str()).count(), 1);

        let records = store.records();
        assert_eq!(records[0].operation, OperationKind::Correct);
        assert!(records[0].input_text.ends_with("..."));
        assert_eq!(records[0].input_text.chars().count(), 203);
    }

    #[tokio::test]
    async fn empty_source_text_is_rejected() {
        let generator = Arc::new(FakeGenerator::replying("unused"));
        let assistant = assistant(generator.clone(), None);

        let err = assistant.correct(Tone::Formal, "   ").await.unwrap_err();

        assert!(matches!(err, AssistantError::Validation(ValidationError::EmptySourceText)));
        assert!(generator.calls().is_empty());
    }

    #[tokio::test]
    async fn history_is_newest_first_and_empty_without_store() {
        let generator = Arc::new(FakeGenerator::replying("texto"));
        let store = Arc::new(MemoryStore::default());
        let with_store = assistant(generator.clone(), Some(store));
        with_store.generate(TextCategory::SimpleScript, Tone::Creative, "praia").await.unwrap();
        with_store.correct(Tone::Neutral, "texto ruim").await.unwrap();

        let history = with_store.history(10).await.unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].operation, OperationKind::Correct);
        assert_eq!(history[1].operation, OperationKind::Generate);
        assert_eq!(with_store.history(1).await.unwrap().len(), 1);

        let without_store = assistant(generator, None);
        assert!(!without_store.has_history());
        assert!(without_store.history(10).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn history_surfaces_store_errors() {
        let assistant = assistant(
            Arc::new(FakeGenerator::replying("texto")),
            Some(Arc::new(MemoryStore::broken())),
        );
        let err = assistant.history(5).await.unwrap_err();
        assert!(matches!(err, AssistantError::Store(PortError::Unexpected(_))));
    }

    #[test]
    fn export_validates_and_delegates() {
        let assistant = assistant(Arc::new(FakeGenerator::replying("")), None);
        assert_eq!(assistant.export("oi", ExportFormat::PlainText).unwrap(), b"txt:oi".to_vec());
        assert!(matches!(
            assistant.export("", ExportFormat::Docx),
            Err(AssistantError::Validation(ValidationError::EmptyExportText))
        ));

        let failing = WritingAssistant::new(
            GenerationGateway::new(Arc::new(FakeGenerator::replying("")), "m"),
            Arc::new(EchoExporter { fail: true }),
        );
        assert!(matches!(
            failing.export("oi", ExportFormat::Docx),
            Err(AssistantError::Export(_))
        ));
    }
}
