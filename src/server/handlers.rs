use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use serde_json::{Value, json};

use crate::models::{ChatRequest, ChatResponse, ChatTurn, HistoryQuery};
use crate::server::{AppState, ServerError};

const CHAT_FAILED: &str = "Failed to process chat request";

const HISTORY_FAILED: &str = "Failed to fetch history";

/// `POST /api/chat`
pub async fn send_chat(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, ServerError> {
    let Json(req) = payload.map_err(|rejection| ServerError::BadRequest(rejection.body_text()))?;
    if req.message.trim().is_empty() {
        return Err(ServerError::BadRequest(
            "message must not be empty".to_string(),
        ));
    }

    let res = state
        .chat
        .handle_chat_send(&req.message, req.session_id.as_deref())
        .await
        .map_err(|report| ServerError::internal(CHAT_FAILED, report))?;
    Ok(Json(res))
}

/// `GET /api/chat/history`
pub async fn chat_history(
    State(state): State<Arc<AppState>>,
    query: Result<Query<HistoryQuery>, QueryRejection>,
) -> Result<Json<Vec<ChatTurn>>, ServerError> {
    let Query(query) =
        query.map_err(|rejection| ServerError::BadRequest(rejection.body_text()))?;

    let turns = state
        .chat
        .history(query.session_id.as_deref())
        .await
        .map_err(|report| ServerError::internal(HISTORY_FAILED, report))?;
    Ok(Json(turns))
}

/// `GET /api/health`
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
