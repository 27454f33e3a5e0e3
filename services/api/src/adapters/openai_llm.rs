//! services/api/src/adapters/openai_llm.rs
//!
//! This module contains the adapter for OpenAI-compatible chat-completion APIs.
//! It implements the `TextGenerationService` port from the `core` crate.

use async_openai::{
    config::OpenAIConfig,
    error::OpenAIError,
    types::{ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs},
    Client,
};
use async_trait::async_trait;
use tracing::debug;
use writing_assistant_core::{error::GenerationError, GenerationParameters, TextGenerationService};

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An adapter that implements `TextGenerationService` using an OpenAI-compatible LLM.
#[derive(Clone)]
pub struct OpenAiChatAdapter {
    client: Client<OpenAIConfig>,
}

impl OpenAiChatAdapter {
    /// Creates a new `OpenAiChatAdapter`.
    pub fn new(client: Client<OpenAIConfig>) -> Self {
        Self { client }
    }
}

/// Maps an `OpenAIError` onto the generation error taxonomy.
fn classify(error: OpenAIError) -> GenerationError {
    match error {
        OpenAIError::Reqwest(e) => GenerationError::Network(e.to_string()),
        OpenAIError::ApiError(api) => classify_api_message(api.message),
        OpenAIError::JSONDeserialize(e) => GenerationError::InvalidResponse(e.to_string()),
        OpenAIError::InvalidArgument(message) => GenerationError::InvalidRequest(message),
        other => GenerationError::Other(other.to_string()),
    }
}

/// API errors only carry free text reliably across compatible providers.
fn classify_api_message(message: String) -> GenerationError {
    let lower = message.to_ascii_lowercase();
    if lower.contains("api key") || lower.contains("authentication") || lower.contains("unauthorized") {
        GenerationError::Authentication(message)
    } else if lower.contains("model") && (lower.contains("does not exist") || lower.contains("not found")) {
        GenerationError::InvalidModel(message)
    } else if lower.contains("quota") || lower.contains("rate limit") {
        GenerationError::RateLimited(message)
    } else if lower.contains("overloaded") || lower.contains("server error") {
        GenerationError::Unavailable(message)
    } else {
        GenerationError::InvalidRequest(message)
    }
}

//=========================================================================================
// `TextGenerationService` Trait Implementation
//=========================================================================================

#[async_trait]
impl TextGenerationService for OpenAiChatAdapter {
    /// Sends the prompt as a single user message.
    async fn generate_text(
        &self,
        model: &str,
        prompt: &str,
        params: &GenerationParameters,
    ) -> Result<String, GenerationError> {
        if params.candidate_pool_size > 0 {
            debug!(
                top_k = params.candidate_pool_size,
                "Chat completions have no top_k; sending without it"
            );
        }

        let messages = vec![ChatCompletionRequestUserMessageArgs::default()
            .content(prompt)
            .build()
            .map_err(classify)?
            .into()];

        #[allow(deprecated)]
        let request = CreateChatCompletionRequestArgs::default()
            .model(model)
            .messages(messages)
            .max_tokens(params.max_output_length)
            .temperature(params.temperature)
            .top_p(params.nucleus_probability)
            .n(1)
            .build()
            .map_err(classify)?;

        // Call the API and map the error into the core taxonomy.
        let response = self.client.chat().create(request).await.map_err(classify)?;

        // Extract the text content from the first choice in the response.
        let Some(choice) = response.choices.into_iter().next() else {
            return Err(GenerationError::EmptyResponse(
                "the model returned no choices".to_string(),
            ));
        };
        match choice.message.content {
            Some(content) if !content.is_empty() => Ok(content),
            _ => Err(GenerationError::EmptyResponse(format!(
                "finish reason: {:?}",
                choice.finish_reason
            ))),
        }
    }
}
