//! Shared fixtures for the front-end tests.

use crate::adapters::FileExporter;
use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use writing_assistant_core::{
    GenerationError, GenerationGateway, GenerationParameters, TextGenerationService,
    WritingAssistant,
};

/// A model that always gives the same answer and remembers the prompts it saw.
pub struct StubModel {
    reply: Result<String, GenerationError>,
    prompts: Mutex<Vec<(String, GenerationParameters)>>,
}

impl StubModel {
    pub fn new(reply: Result<String, GenerationError>) -> Arc<Self> {
        Arc::new(Self {
            reply,
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn prompts(&self) -> Vec<(String, GenerationParameters)> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextGenerationService for StubModel {
    async fn generate_text(
        &self,
        _model: &str,
        prompt: &str,
        params: &GenerationParameters,
    ) -> Result<String, GenerationError> {
        self.prompts.lock().unwrap().push((prompt.to_string(), *params));
        self.reply.clone()
    }
}

/// An assistant without history, backed by `model` and the real file exporter.
pub fn assistant_with(model: Arc<StubModel>) -> WritingAssistant {
    let gateway = GenerationGateway::new(model, "gemini-1.5-flash");
    WritingAssistant::new(gateway, Arc::new(FileExporter))
}
