use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    response::IntoResponse,
    routing::{get, post},
};
use serde_json::json;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::{
    ChatBot,
    dto::{ChatRequest, ChatResponse},
};
use crate::service;

pub fn build_router(state: Arc<ChatBot>) -> Router {
    // Configure CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .expose_headers([http::header::AUTHORIZATION]);

    // Build router
    Router::new()
        .route("/health", get(health_check))
        .route("/api/chatbot", post(chat_handler))
        .route("/api/ChatBot", post(chat_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn health_check() -> impl IntoResponse {
    Json(json!({"status": "ok"}))
}

pub async fn chat_handler(
    State(service): State<Arc<ChatBot>>,
    Json(request): Json<ChatRequest>,
) -> service::Result<Json<ChatResponse>> {
    service
        .send_message(request)
        .await
        .map(Json)
        .inspect_err(service::Error::report)
}
