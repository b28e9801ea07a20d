use axum::{extract::{Extension, Query}, http::StatusCode, Json};
use domicilia_core::{
    new_message_id, now_timestamp, validate_contact_message, ContactMessage, Error, HealthResponse,
    ListMessagesQuery, ListMessagesResponse, MessageAck, StoredMessage, WelcomeResponse,
};
use sqlx::SqlitePool;
use std::sync::Arc;

use crate::{store, AppState};

pub const DEFAULT_LIST_LIMIT: u32 = 50;
pub const MAX_LIST_LIMIT: u32 = 200;

type ApiError = (StatusCode, Json<Error>);

fn api_error(status: StatusCode, code: &str, message: impl Into<String>) -> ApiError {
    (status, Json(Error::new(code, message)))
}

/// Pool del database oppure 503 se il server è partito senza storage.
fn require_pool(state: &AppState) -> Result<&SqlitePool, ApiError> {
    state.pool.as_ref().ok_or_else(|| {
        api_error(StatusCode::SERVICE_UNAVAILABLE, "storage_unavailable", "message storage is not available")
    })
}

/// Handler per GET /
pub async fn root() -> Json<WelcomeResponse> {
    Json(WelcomeResponse { message: "Welcome to Domicilia API".to_string() })
}

/// Handler per GET /api/health (liveness: non tocca il database)
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "OK".to_string(), message: "Server is running".to_string() })
}

/// Handler per POST /api/messages
pub async fn create_message(
    Extension(state): Extension<Arc<AppState>>,
    Json(msg): Json<ContactMessage>,
) -> Result<(StatusCode, Json<MessageAck>), ApiError> {
    // il client valida già, ma il server non si fida del payload
    if let Err(e) = validate_contact_message(&msg) {
        tracing::debug!(company_id = %msg.company_id, "rejected message: {}", e);
        return Err(api_error(StatusCode::UNPROCESSABLE_ENTITY, "invalid_message", e.to_string()));
    }
    let pool = require_pool(&state)?;

    let stored = StoredMessage { message_id: new_message_id(), message: msg, received_at: now_timestamp() };
    store::insert_message(pool, &stored).await.map_err(|e| {
        tracing::error!("failed to store message: {:#}", e);
        api_error(StatusCode::INTERNAL_SERVER_ERROR, "internal_error", "failed to store message")
    })?;

    tracing::info!(
        message_id = %stored.message_id,
        company_id = %stored.message.company_id,
        "message received"
    );
    let ack = MessageAck { success: true, message_id: stored.message_id, received_at: stored.received_at };
    Ok((StatusCode::CREATED, Json(ack)))
}

/// Handler per GET /api/messages?companyId=..&limit=..
pub async fn list_messages(
    Extension(state): Extension<Arc<AppState>>,
    Query(q): Query<ListMessagesQuery>,
) -> Result<Json<ListMessagesResponse>, ApiError> {
    let company_id = match q.company_id.as_deref().map(str::trim) {
        Some(c) if !c.is_empty() => c.to_string(),
        _ => return Err(api_error(StatusCode::BAD_REQUEST, "missing_company_id", "companyId is required")),
    };
    let limit = q.limit.unwrap_or(DEFAULT_LIST_LIMIT).clamp(1, MAX_LIST_LIMIT);
    let pool = require_pool(&state)?;

    let messages = store::list_messages(pool, &company_id, limit).await.map_err(|e| {
        tracing::error!("failed to list messages: {:#}", e);
        api_error(StatusCode::INTERNAL_SERVER_ERROR, "internal_error", "failed to list messages")
    })?;
    Ok(Json(ListMessagesResponse { messages }))
}
