//! Coaching chat endpoint.
//!
//! Every turn replays the user's full stored transcript to the provider,
//! then appends the new user message and the assistant reply, in that order.
//! The transcript has no cap.

use crate::dtos::{ChatRequest, ChatResponse};
use crate::models::ChatRole;
use crate::services::metrics::{COMPLETIONS_TOTAL, COMPLETION_DURATION};
use crate::services::providers::PromptMessage;
use crate::startup::AppState;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use service_core::error::AppError;

/// POST /chat/:user_id
pub async fn chat(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(request): Json<ChatRequest>,
) -> Result<impl IntoResponse, AppError> {
    let message = match request.message.as_deref().map(str::trim) {
        Some(m) if !m.is_empty() => m.to_string(),
        _ => return Err(AppError::BadRequest(anyhow::anyhow!("Message required"))),
    };

    match chat_reply(&state, &user_id, &message).await {
        Ok(reply) => Ok(Json(ChatResponse { reply })),
        Err(e) => {
            tracing::error!(user_id = %user_id, error = %e, "Chat request failed");
            Err(AppError::InternalError(anyhow::anyhow!("Chat failed")))
        }
    }
}

async fn chat_reply(state: &AppState, user_id: &str, message: &str) -> Result<String, AppError> {
    let history = state.store.chat_history(user_id).await?;

    let mut messages: Vec<PromptMessage> = history
        .iter()
        .map(|m| PromptMessage::text(ChatRole::from_string(&m.role), m.content.clone()))
        .collect();
    messages.push(PromptMessage::text(ChatRole::User, message));

    tracing::info!(
        user_id = %user_id,
        history_len = history.len(),
        "Requesting chat completion"
    );

    let timer = COMPLETION_DURATION.with_label_values(&["chat"]).start_timer();
    let generated = state
        .provider
        .complete(&state.config.provider.model, &messages)
        .await;
    timer.observe_duration();

    let reply = match generated {
        Ok(text) => {
            COMPLETIONS_TOTAL.with_label_values(&["chat", "ok"]).inc();
            text
        }
        Err(e) => {
            COMPLETIONS_TOTAL.with_label_values(&["chat", "error"]).inc();
            return Err(AppError::InternalError(anyhow::Error::new(e)));
        }
    };

    // The assistant reply is only persisted after its prompting message, so
    // a replayed transcript never contains a reply without its question.
    if let Err(e) = state
        .store
        .append_chat_message(user_id, ChatRole::User, message)
        .await
    {
        tracing::error!(user_id = %user_id, error = %e, "Failed to persist chat message");
    } else if let Err(e) = state
        .store
        .append_chat_message(user_id, ChatRole::Assistant, &reply)
        .await
    {
        tracing::error!(user_id = %user_id, error = %e, "Failed to persist chat reply");
    }

    Ok(reply)
}
