//! services/api/src/adapters/gemini_llm.rs
//!
//! This module contains the adapter for Google's Gemini `generateContent` API.
//! It implements the `TextGenerationService` port from the `core` crate.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::debug;
use writing_assistant_core::{error::GenerationError, GenerationParameters, TextGenerationService};

// Base URL for the Google AI API
const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

//=========================================================================================
// Wire Format
//=========================================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest<'a> {
    contents: Vec<GeminiContent<'a>>,
    generation_config: GeminiGenerationConfig,
}

#[derive(Debug, Serialize)]
struct GeminiContent<'a> {
    role: &'static str,
    parts: Vec<GeminiPart<'a>>,
}

#[derive(Debug, Serialize)]
struct GeminiPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
struct GeminiGenerationConfig {
    max_output_tokens: u32,
    temperature: f32,
    top_p: f32,
    /// Omitted when the candidate pool is unrestricted.
    #[serde(skip_serializing_if = "Option::is_none")]
    top_k: Option<u32>,
}

impl From<&GenerationParameters> for GeminiGenerationConfig {
    fn from(params: &GenerationParameters) -> Self {
        Self {
            max_output_tokens: params.max_output_length,
            temperature: params.temperature,
            top_p: params.nucleus_probability,
            top_k: (params.candidate_pool_size > 0).then_some(params.candidate_pool_size),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
    prompt_feedback: Option<GeminiPromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiCandidate {
    content: Option<GeminiResponseContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponseContent {
    #[serde(default)]
    parts: Vec<GeminiResponsePart>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiPromptFeedback {
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorEnvelope {
    error: GeminiErrorBody,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorBody {
    message: String,
}

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An adapter that implements `TextGenerationService` against the Gemini REST API.
#[derive(Clone)]
pub struct GeminiAdapter {
    client: Client,
    api_key: String,
    base_url: String,
}

impl GeminiAdapter {
    /// Creates a new `GeminiAdapter` using the public Google endpoint.
    pub fn new(client: Client, api_key: String) -> Self {
        Self {
            client,
            api_key,
            base_url: GEMINI_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }
}

/// Maps a non-success HTTP status to the error taxonomy.
fn classify_status(status: StatusCode, body: &str) -> GenerationError {
    let message = serde_json::from_str::<GeminiErrorEnvelope>(body)
        .map(|envelope| envelope.error.message)
        .unwrap_or_else(|_| format!("HTTP {}: {}", status, body.trim()));

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => GenerationError::Authentication(message),
        StatusCode::NOT_FOUND => GenerationError::InvalidModel(message),
        StatusCode::TOO_MANY_REQUESTS => GenerationError::RateLimited(message),
        // Gemini reports a bad key as 400 INVALID_ARGUMENT.
        StatusCode::BAD_REQUEST if message.to_ascii_lowercase().contains("api key") => {
            GenerationError::Authentication(message)
        }
        StatusCode::BAD_REQUEST => GenerationError::InvalidRequest(message),
        s if s.is_server_error() => GenerationError::Unavailable(message),
        _ => GenerationError::Other(message),
    }
}

fn classify_transport(e: reqwest::Error) -> GenerationError {
    if e.is_timeout() || e.is_connect() || e.is_request() {
        GenerationError::Network(e.to_string())
    } else {
        GenerationError::Other(e.to_string())
    }
}

/// Concatenates the text parts of the first candidate.
fn extract_text(response: GeminiResponse) -> Result<String, GenerationError> {
    let Some(candidate) = response.candidates.into_iter().next() else {
        let reason = response
            .prompt_feedback
            .and_then(|f| f.block_reason)
            .unwrap_or_else(|| "no candidates".to_string());
        return Err(GenerationError::EmptyResponse(reason));
    };

    let text: String = candidate
        .content
        .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();

    if text.is_empty() {
        let reason = candidate.finish_reason.unwrap_or_else(|| "unknown".to_string());
        return Err(GenerationError::EmptyResponse(format!("finish reason: {}", reason)));
    }
    Ok(text)
}

//=========================================================================================
// `TextGenerationService` Trait Implementation
//=========================================================================================

#[async_trait]
impl TextGenerationService for GeminiAdapter {
    async fn generate_text(
        &self,
        model: &str,
        prompt: &str,
        params: &GenerationParameters,
    ) -> Result<String, GenerationError> {
        let url = format!("{}/models/{}:generateContent", self.base_url, model);
        let request = GeminiRequest {
            contents: vec![GeminiContent {
                role: "user",
                parts: vec![GeminiPart { text: prompt }],
            }],
            generation_config: params.into(),
        };

        debug!("POST {}", url);
        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(classify_transport)?;

        let status = response.status();
        let body = response.text().await.map_err(classify_transport)?;
        if !status.is_success() {
            return Err(classify_status(status, &body));
        }

        let parsed = serde_json::from_str::<GeminiResponse>(&body)
            .map_err(|e| GenerationError::InvalidResponse(e.to_string()))?;
        extract_text(parsed)
    }
}
