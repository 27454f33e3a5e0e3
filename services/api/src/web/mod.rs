pub mod middleware;
pub mod protocol;
pub mod rest;
pub mod state;

pub use middleware::log_requests;
pub use rest::{correct_handler, export_handler, generate_handler, history_handler, options_handler};

use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use state::AppState;
use std::sync::Arc;

/// Builds the API routes. CORS and the Swagger UI are layered on by the binary.
pub fn router(app_state: Arc<AppState>) -> Router {
    Router::new()
        .route("/options", get(options_handler))
        .route("/generate", post(generate_handler))
        .route("/correct", post(correct_handler))
        .route("/history", get(history_handler))
        .route("/export", post(export_handler))
        .layer(axum_middleware::from_fn(log_requests))
        .with_state(app_state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{assistant_with, StubModel};
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;
    use writing_assistant_core::GenerationError;

    fn app(reply: Result<String, GenerationError>) -> Router {
        let assistant = assistant_with(StubModel::new(reply));
        router(Arc::new(AppState::new(assistant, 20)))
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn generate_returns_the_completion() {
        let response = app(Ok("Assunto: Férias".to_string()))
            .oneshot(post_json(
                "/generate",
                json!({ "category": "professional_email", "tone": "formal", "topic": "solicitação de férias" }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["output"], json!("Assunto: Férias"));
        assert_eq!(body["operation"], json!("gerar"));
        assert_eq!(body["category"], json!("professional_email"));
        assert_eq!(body["persisted"], json!(false));
        assert_eq!(
            body["suggested_file_names"]["txt"],
            json!("gerai_E-mail_Profissional_gerado.txt")
        );
    }

    #[tokio::test]
    async fn empty_topic_and_unknown_category_are_bad_requests() {
        let response = app(Ok("unused".to_string()))
            .oneshot(post_json(
                "/generate",
                json!({ "category": "2", "tone": "formal", "topic": "   " }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["kind"], json!("validation"));

        let response = app(Ok("unused".to_string()))
            .oneshot(post_json(
                "/generate",
                json!({ "category": "Marketing Digital", "tone": "formal", "topic": "x" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn failed_generation_is_a_bad_gateway_with_advice() {
        let response = app(Err(GenerationError::InvalidModel("models/gemini-0 not found".to_string())))
            .oneshot(post_json("/correct", json!({ "tone": "technical", "text": "Ele foi na loja" })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let body = json_body(response).await;
        assert_eq!(body["kind"], json!("generation"));
        assert!(body["error"].as_str().unwrap().contains("models/gemini-0 not found"));
        assert!(body["advice"].is_string());
    }

    #[tokio::test]
    async fn history_is_empty_without_a_store() {
        let response = app(Ok("x".to_string()))
            .oneshot(Request::get("/history?limit=5").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await, json!([]));
    }

    #[tokio::test]
    async fn export_sends_an_attachment() {
        let response = app(Ok("x".to_string()))
            .oneshot(post_json(
                "/export",
                json!({ "text": "linha 1\nlinha 2", "format": "txt", "file_name": "carta" }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/plain; charset=utf-8"
        );
        let disposition = response.headers()[header::CONTENT_DISPOSITION].to_str().unwrap().to_string();
        assert!(disposition.starts_with("attachment; filename=\"carta.txt\""));
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"linha 1\nlinha 2");
    }

    #[tokio::test]
    async fn export_rejects_empty_file_names_and_unknown_formats() {
        let response = app(Ok("x".to_string()))
            .oneshot(post_json("/export", json!({ "text": "oi", "format": "docx", "file_name": " " })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = app(Ok("x".to_string()))
            .oneshot(post_json("/export", json!({ "text": "oi", "format": "pdf" })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn options_list_every_selection() {
        let response = app(Ok("x".to_string()))
            .oneshot(Request::get("/options").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let body = json_body(response).await;
        assert_eq!(body["categories"].as_array().unwrap().len(), 6);
        assert_eq!(body["tones"][1]["label"], json!("Amigável"));
        assert_eq!(body["formats"][1]["key"], json!("docx"));
    }
}
