//! Guestbook endpoints: message history, message creation and liveness

use axum::{extract::State, Extension, Json};
use serde::Serialize;

use crate::domain::{CreateMessageRequest, Message};
use crate::logging::CreatedMessageId;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "healthy" })
}

pub async fn list_messages(State(state): State<AppState>) -> Json<Vec<Message>> {
    Json(state.store.list())
}

pub async fn create_message(
    State(state): State<AppState>,
    Json(request): Json<CreateMessageRequest>,
) -> (Extension<CreatedMessageId>, Json<Message>) {
    let message = state.store.append(request.text);
    (Extension(CreatedMessageId(message.id)), Json(message))
}
