//! Route handler functions.

use axum::body::Bytes;
use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use exportdesk_core::request::{AgentRequest, AgentResponse};

use crate::error::ApiError;
use crate::state::AppState;

// =============================================================================
// Response types
// =============================================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_secs: u64,
}

// =============================================================================
// Handlers
// =============================================================================

/// POST /api/agent - generate the agent's next reply.
///
/// Decoded by hand rather than with `Json<T>`: shape problems and a missing
/// `Content-Type` normalize to defaults, only a non-JSON body fails.
pub async fn agent_reply(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<AgentResponse>, ApiError> {
    let decoded = AgentRequest::decode(&body)?;

    if decoded.messages_defaulted || decoded.profile_defaulted || decoded.dropped_messages > 0 {
        tracing::debug!(
            messages_defaulted = decoded.messages_defaulted,
            profile_defaulted = decoded.profile_defaulted,
            dropped_messages = decoded.dropped_messages,
            "Normalized agent request"
        );
    }

    let request = decoded.request;
    let text = state.engine.reply(&request.messages, &request.profile)?;

    tracing::info!(
        history_len = request.messages.len(),
        reply_len = text.len(),
        "Agent reply generated"
    );

    Ok(Json(AgentResponse::ok(text)))
}

/// GET /health - liveness and uptime.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.start_time.elapsed().as_secs(),
    })
}
