//! Payman relay endpoint.
//!
//! `POST /payman/ask` forwards one query to Payman and returns its answer
//! together with the session id that continues the conversation.

use std::time::Instant;

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::AppState;
use crate::error::{AppError, AppResult};

/// Request body.
#[derive(Debug, Deserialize)]
pub struct AskRequest {
    pub query: String,
    #[serde(default)]
    pub session_id: Option<String>,
}

/// Response body.
#[derive(Debug, Serialize)]
pub struct AskResponse {
    /// Payman's answer, untouched.
    pub response: serde_json::Value,
    /// `sessionId` lifted out of `response`, `null` when Payman sent none.
    pub session_id: Option<String>,
}

/// `POST /payman/ask` — relay a query to Payman.
pub async fn ask_handler(
    State(state): State<AppState>,
    payload: Result<Json<AskRequest>, JsonRejection>,
) -> AppResult<Json<AskResponse>> {
    let Json(body) = payload?;
    if body.query.trim().is_empty() {
        return Err(AppError::Validation("query must not be empty".into()));
    }

    let config = state.config.payman_config(body.session_id.as_deref());
    let resumed = config.session_id.is_some();
    info!(resumed, query_len = body.query.len(), "relaying query to Payman");

    let started_at = Instant::now();
    let response = match state.connector.ask(config, &body.query).await {
        Ok(response) => response,
        Err(e) => {
            warn!(
                error = %e,
                elapsed_ms = started_at.elapsed().as_millis(),
                "Payman call failed"
            );
            return Err(AppError::from(e));
        }
    };

    let session_id = session_id_of(&response);
    info!(
        session_id = session_id.as_deref().unwrap_or(""),
        elapsed_ms = started_at.elapsed().as_millis(),
        "Payman call succeeded"
    );

    Ok(Json(AskResponse {
        response,
        session_id,
    }))
}

/// Session id carried by a Payman answer, if it is a string.
fn session_id_of(response: &serde_json::Value) -> Option<String> {
    response
        .get("sessionId")
        .and_then(serde_json::Value::as_str)
        .map(str::to_owned)
}
