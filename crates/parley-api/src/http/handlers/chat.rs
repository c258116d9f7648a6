//! Chat history CRUD HTTP handlers.
//!
//! Endpoints:
//! - GET    /api/owners/{owner_id}/chats                     - List conversations
//! - GET    /api/owners/{owner_id}/chats/{chat_id}/messages  - List messages
//! - DELETE /api/owners/{owner_id}/chats/{chat_id}           - Delete one conversation
//! - DELETE /api/owners/{owner_id}/chats                     - Delete all conversations
//!
//! Every query is scoped by owner; a conversation that exists but belongs
//! to someone else is indistinguishable from one that does not exist.

use std::time::Instant;

use axum::Json;
use axum::extract::{Path, State};
use uuid::Uuid;

use parley_core::chat::repository::ChatRepository;
use parley_types::chat::{Conversation, Message};

use crate::http::error::AppError;
use crate::http::response::ApiResponse;
use crate::state::AppState;

/// GET /api/owners/{owner_id}/chats - List conversations, most recent first.
pub async fn list_chats(
    State(state): State<AppState>,
    Path(owner_id): Path<String>,
) -> Result<Json<ApiResponse<Vec<Conversation>>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    validate_owner(&owner_id)?;

    let chats = state.engine.repo().list_conversations(&owner_id).await?;

    let elapsed = start.elapsed().as_millis() as u64;
    Ok(Json(ApiResponse::success(chats, request_id, elapsed)))
}

/// GET /api/owners/{owner_id}/chats/{chat_id}/messages - List messages in order.
pub async fn list_messages(
    State(state): State<AppState>,
    Path((owner_id, chat_id)): Path<(String, i64)>,
) -> Result<Json<ApiResponse<Vec<Message>>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    validate_owner(&owner_id)?;

    state
        .engine
        .repo()
        .get_conversation(chat_id, &owner_id)
        .await?
        .ok_or(AppError::Repository(
            parley_types::error::RepositoryError::NotFound,
        ))?;

    let messages = state.engine.repo().list_messages(chat_id, &owner_id).await?;

    let elapsed = start.elapsed().as_millis() as u64;
    Ok(Json(ApiResponse::success(messages, request_id, elapsed)))
}

/// DELETE /api/owners/{owner_id}/chats/{chat_id} - Delete one conversation.
pub async fn delete_chat(
    State(state): State<AppState>,
    Path((owner_id, chat_id)): Path<(String, i64)>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    validate_owner(&owner_id)?;

    state
        .engine
        .repo()
        .delete_conversation(chat_id, &owner_id)
        .await?;

    let elapsed = start.elapsed().as_millis() as u64;
    Ok(Json(ApiResponse::success(
        serde_json::json!({"deleted": true, "chatId": chat_id}),
        request_id,
        elapsed,
    )))
}

/// DELETE /api/owners/{owner_id}/chats - Delete every conversation for an owner.
pub async fn delete_all_chats(
    State(state): State<AppState>,
    Path(owner_id): Path<String>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    validate_owner(&owner_id)?;

    let deleted = state
        .engine
        .repo()
        .delete_all_conversations(&owner_id)
        .await?;

    let elapsed = start.elapsed().as_millis() as u64;
    Ok(Json(ApiResponse::success(
        serde_json::json!({"deleted": deleted}),
        request_id,
        elapsed,
    )))
}

fn validate_owner(owner_id: &str) -> Result<(), AppError> {
    if owner_id.trim().is_empty() {
        return Err(AppError::Validation("owner id must not be blank".to_string()));
    }
    Ok(())
}
