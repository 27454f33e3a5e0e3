//! services/api/src/web/rest.rs
//!
//! Contains the Axum handlers for the REST API endpoints and the master
//! definition for the OpenAPI specification.

use crate::web::protocol::{
    Choice, CompletionResponse, CorrectRequest, ErrorResponse, ExportRequest, GenerateRequest,
    HistoryEntry, HistoryQuery, OptionsResponse, SuggestedFileNames,
};
use crate::web::state::AppState;
use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json},
};
use std::sync::Arc;
use tracing::error;
use utoipa::OpenApi;
use writing_assistant_core::{
    export_file_name, AssistantError, ExportFormat, TextCategory, Tone, ValidationError,
};

//=========================================================================================
// OpenAPI Master Definition
//=========================================================================================

#[derive(OpenApi)]
#[openapi(
    paths(
        options_handler,
        generate_handler,
        correct_handler,
        history_handler,
        export_handler,
    ),
    components(
        schemas(
            Choice,
            OptionsResponse,
            GenerateRequest,
            CorrectRequest,
            CompletionResponse,
            SuggestedFileNames,
            HistoryEntry,
            ExportRequest,
            ErrorResponse
        )
    ),
    tags(
        (name = "GerAI Writing Assistant API", description = "Generate, revise and export texts with a hosted language model.")
    )
)]
pub struct ApiDoc;

//=========================================================================================
// Error Mapping
//=========================================================================================

type HandlerError = (StatusCode, Json<ErrorResponse>);

/// Converts a workflow error into its HTTP response at the boundary.
fn reject(err: AssistantError) -> HandlerError {
    let status = match &err {
        AssistantError::Validation(_) => StatusCode::BAD_REQUEST,
        AssistantError::Generation(_) => StatusCode::BAD_GATEWAY,
        AssistantError::Export(_) | AssistantError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    if status.is_server_error() {
        error!("Request failed: {}", err);
    }
    (status, Json(ErrorResponse::from(&err)))
}

fn invalid(err: ValidationError) -> HandlerError {
    reject(AssistantError::Validation(err))
}

//=========================================================================================
// REST API Handlers
//=========================================================================================

/// List the categories, tones and export formats a client can choose from.
#[utoipa::path(
    get,
    path = "/options",
    responses((status = 200, description = "Available selections", body = OptionsResponse))
)]
pub async fn options_handler() -> Json<OptionsResponse> {
    Json(OptionsResponse::all())
}

/// Generate a new text.
#[utoipa::path(
    post,
    path = "/generate",
    request_body = GenerateRequest,
    responses(
        (status = 200, description = "Text generated", body = CompletionResponse),
        (status = 400, description = "Empty topic or unknown category/tone", body = ErrorResponse),
        (status = 502, description = "The model call failed", body = ErrorResponse)
    )
)]
pub async fn generate_handler(
    State(app_state): State<Arc<AppState>>,
    Json(payload): Json<GenerateRequest>,
) -> Result<Json<CompletionResponse>, HandlerError> {
    let category = payload.category.parse::<TextCategory>().map_err(invalid)?;
    let tone = payload.tone.parse::<Tone>().map_err(invalid)?;

    let completion = app_state
        .assistant
        .generate(category, tone, &payload.topic)
        .await
        .map_err(reject)?;
    Ok(Json(completion.into()))
}

/// Revise an existing text and list suggestions.
#[utoipa::path(
    post,
    path = "/correct",
    request_body = CorrectRequest,
    responses(
        (status = 200, description = "Revised text followed by numbered suggestions", body = CompletionResponse),
        (status = 400, description = "Empty text or unknown tone", body = ErrorResponse),
        (status = 502, description = "The model call failed", body = ErrorResponse)
    )
)]
pub async fn correct_handler(
    State(app_state): State<Arc<AppState>>,
    Json(payload): Json<CorrectRequest>,
) -> Result<Json<CompletionResponse>, HandlerError> {
    let tone = payload.tone.parse::<Tone>().map_err(invalid)?;

    let completion = app_state
        .assistant
        .correct(tone, &payload.text)
        .await
        .map_err(reject)?;
    Ok(Json(completion.into()))
}

/// List the most recent interactions, newest first.
#[utoipa::path(
    get,
    path = "/history",
    params(HistoryQuery),
    responses(
        (status = 200, description = "Stored interactions", body = [HistoryEntry]),
        (status = 500, description = "The history store failed", body = ErrorResponse)
    )
)]
pub async fn history_handler(
    State(app_state): State<Arc<AppState>>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<Vec<HistoryEntry>>, HandlerError> {
    let limit = app_state.history_limit(query.limit);
    let records = app_state.assistant.history(limit).await.map_err(reject)?;
    Ok(Json(records.into_iter().map(HistoryEntry::from).collect()))
}

/// Package a text as a `.txt` or `.docx` download.
#[utoipa::path(
    post,
    path = "/export",
    request_body = ExportRequest,
    responses(
        (status = 200, description = "The file, sent as an attachment"),
        (status = 400, description = "Empty text or file name, or unknown format", body = ErrorResponse),
        (status = 500, description = "The document could not be built", body = ErrorResponse)
    )
)]
pub async fn export_handler(
    State(app_state): State<Arc<AppState>>,
    Json(payload): Json<ExportRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    let format = payload.format.parse::<ExportFormat>().map_err(invalid)?;
    let file_name = match payload.file_name.as_deref() {
        Some(base) => export_file_name(base, format).map_err(invalid)?,
        None => format!("gerai_texto.{}", format.extension()),
    };

    let bytes = app_state
        .assistant
        .export(&payload.text, format)
        .map_err(reject)?;

    let headers = [
        (header::CONTENT_TYPE, format.mime_type().to_string()),
        (header::CONTENT_DISPOSITION, content_disposition(&file_name)),
    ];
    Ok((headers, bytes))
}

/// An attachment header with an ASCII fallback and the UTF-8 name (RFC 6266).
fn content_disposition(file_name: &str) -> String {
    let fallback: String = file_name
        .chars()
        .map(|c| if c.is_ascii_graphic() && c != '"' && c != '\\' { c } else { '_' })
        .collect();
    format!(
        "attachment; filename=\"{}\"; filename*=UTF-8''{}",
        fallback,
        urlencoding::encode(file_name)
    )
}
