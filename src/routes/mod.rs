//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! One Axum router serves three front doors onto the same board service:
//! MCP over SSE for assistant tool calls, the analyze/inlet filter for chat
//! pipelines, and a plain REST API. Utility endpoints report service shape
//! and health.

pub mod api;
pub mod filter;
pub mod sse;

use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;
use axum::routing::{get, post};
use serde_json::{Value, json};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::board::{BoardError, ErrorKind};
use crate::state::AppState;

pub const SERVICE_NAME: &str = "Miro Board Reader";

/// Build the full application router.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any);

    Router::new()
        .route("/sse", get(sse::connect).post(sse::message))
        .route("/claude/sse", get(sse::connect).post(sse::message))
        .route("/filter/miro/analyze", post(filter::analyze))
        .route("/openwebui/filter/analyze", post(filter::analyze))
        .route("/filter/miro/tools", get(filter::tools))
        .route("/openwebui/filter/tools", get(filter::tools))
        .route("/filter/miro/inlet", post(filter::inlet))
        .route("/api/miro/board/{board_id}", get(api::board))
        .route("/api/miro/board/{board_id}/search", get(api::search))
        .route("/api/miro/board/{board_id}/connections/{item_id}", get(api::connections))
        .route("/", get(root))
        .route("/health", get(health))
        .route("/test", get(usage))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// HTTP status for a failed board operation.
pub(crate) fn error_status(err: &BoardError) -> StatusCode {
    match err.kind() {
        ErrorKind::Validation => StatusCode::BAD_REQUEST,
        ErrorKind::Configuration => StatusCode::INTERNAL_SERVER_ERROR,
        ErrorKind::Upstream => StatusCode::BAD_GATEWAY,
    }
}

// =============================================================================
// UTILITY
// =============================================================================

async fn root() -> Json<Value> {
    Json(json!({
        "service": SERVICE_NAME,
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "mcp": {
                "sse": "/sse or /claude/sse",
                "description": "MCP tool server over JSON-RPC and SSE"
            },
            "filter": {
                "analyze": "/filter/miro/analyze or /openwebui/filter/analyze",
                "tools": "/filter/miro/tools or /openwebui/filter/tools",
                "inlet": "/filter/miro/inlet",
                "description": "Command interface for chat pipelines"
            },
            "api": {
                "board": "/api/miro/board/{board_id}",
                "search": "/api/miro/board/{board_id}/search",
                "connections": "/api/miro/board/{board_id}/connections/{item_id}",
                "description": "REST access to board content"
            },
            "health": "/health",
            "test": "/test"
        }
    }))
}

async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "miro_configured": state.service.is_configured(),
        "active_connections": state.sessions.len(),
        "interfaces": { "mcp": "active", "filter": "active", "api": "active" }
    }))
}

async fn usage() -> Json<Value> {
    Json(json!({
        "mcp_example": {
            "connection": "Add https://your-server/sse as a custom connector",
            "usage": "Ask the assistant to analyze MIRO board [board_id]"
        },
        "filter_example": {
            "analyze": {
                "board_id": "uXjVI_example=",
                "command": "search",
                "params": { "search_text": "roadmap" }
            },
            "inlet": "Send a chat message such as: show shapes on board uXjVI_example="
        },
        "api_examples": {
            "board": "/api/miro/board/uXjVI_example=?left=0&right=1000&top=0&bottom=1000&types=shape,sticky_note",
            "search": "/api/miro/board/uXjVI_example=/search?q=roadmap",
            "connections": "/api/miro/board/uXjVI_example=/connections/3458764512345678901?depth=3"
        }
    }))
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
