use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::chat::agent::answer;
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub response: String,
}

/// POST /chat/
pub async fn handle_chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    let agent = state
        .chat_agent
        .as_ref()
        .ok_or_else(|| AppError::Unavailable("Chat assistant is not configured".to_string()))?;

    if request.message.trim().is_empty() {
        return Err(AppError::Validation("message cannot be empty".to_string()));
    }

    let response = answer(agent.as_ref(), state.store.as_ref(), &request.message).await?;
    Ok(Json(ChatResponse { response }))
}
