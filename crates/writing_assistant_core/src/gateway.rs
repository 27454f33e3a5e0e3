//! crates/writing_assistant_core/src/gateway.rs
//!
//! A thin adapter over the `TextGenerationService` port: one call per prompt,
//! no retries, no caching.

use crate::domain::Prompt;
use crate::error::GenerationError;
use crate::ports::TextGenerationService;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info};

/// Executes prompts against a single configured model.
#[derive(Clone)]
pub struct GenerationGateway {
    service: Arc<dyn TextGenerationService>,
    model: String,
}

impl GenerationGateway {
    /// Creates a gateway for `model`. A leading `models/` path segment is accepted
    /// and dropped, so both `gemini-1.5-flash` and `models/gemini-1.5-flash` work.
    pub fn new(service: Arc<dyn TextGenerationService>, model: impl Into<String>) -> Self {
        let model = model.into();
        let model = model
            .strip_prefix("models/")
            .map(str::to_string)
            .unwrap_or(model);
        Self { service, model }
    }

    /// The model identifier every call is made against.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Sends the prompt exactly once and returns the produced text unmodified.
    pub async fn generate(&self, prompt: &Prompt) -> Result<String, GenerationError> {
        debug!(
            model = %self.model,
            prompt_chars = prompt.text.chars().count(),
            max_output_length = prompt.params.max_output_length,
            temperature = prompt.params.temperature,
            top_p = prompt.params.nucleus_probability,
            top_k = prompt.params.candidate_pool_size,
            "Sending prompt to the model"
        );
        let started = Instant::now();

        let result = self
            .service
            .generate_text(&self.model, &prompt.text, &prompt.params)
            .await;

        let elapsed_ms = started.elapsed().as_millis() as u64;
        match &result {
            Ok(text) => info!(
                model = %self.model,
                elapsed_ms,
                output_chars = text.chars().count(),
                "Generation completed"
            ),
            Err(e) => error!(model = %self.model, elapsed_ms, "Generation failed: {}", e),
        }
        result
    }
}
