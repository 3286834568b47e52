//! Chat-pipeline filter routes: analyze commands, tool listing, and inlet.

use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde_json::{Value, json};
use tracing::{error, info};

use super::error_status;
use crate::board::BoardError;
use crate::command::natural::translate;
use crate::command::render::render;
use crate::command::{AnalyzeRequest, execute};
use crate::rpc::ErrorCode;
use crate::state::AppState;

pub const DATA_HEADER: &str = "[Miro Board Data]";
pub const LOADED_MARKER: &str = "\n\n✓ Miro data loaded";

fn failure(err: &BoardError) -> Response {
    let body = json!({ "success": false, "error": err.to_string(), "code": err.error_code() });
    (error_status(err), Json(body)).into_response()
}

/// `POST /filter/miro/analyze` — run one command.
pub async fn analyze(State(state): State<AppState>, body: Result<Json<AnalyzeRequest>, JsonRejection>) -> Response {
    let request = match body {
        Ok(Json(request)) => request,
        Err(rejection) => return failure(&BoardError::validation(rejection.body_text())),
    };
    let command = match request.to_command() {
        Ok(command) => command,
        Err(e) => return failure(&e),
    };

    info!(command = command.name(), board_id = command.board_id(), "filter: analyze");
    match execute(&state.service, &command).await {
        Ok(output) => {
            let mut body = json!({ "success": true, "data": output, "command": command.name() });
            if request.wants_text() {
                body["text"] = Value::String(render(&output, state.config.render));
            }
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(e) => {
            error!(command = command.name(), error = %e, "filter: analyze failed");
            failure(&e)
        }
    }
}

/// `GET /filter/miro/tools` — describe the analyze command set.
pub async fn tools() -> Json<Value> {
    Json(json!({
        "tools": [{
            "name": "analyze_board",
            "endpoint": "/filter/miro/analyze",
            "commands": [
                {
                    "command": "full_board",
                    "description": "Get entire board content",
                    "params": {
                        "bounds": "optional: {left, right, top, bottom}",
                        "include_types": "optional: array of item types"
                    }
                },
                {
                    "command": "connected_path",
                    "description": "Trace connections from an item",
                    "params": {
                        "start_item_id": "required: starting item ID",
                        "max_depth": "optional: traversal depth (default 5)"
                    }
                },
                {
                    "command": "search",
                    "description": "Search items by text",
                    "params": {
                        "search_text": "required: text to search",
                        "case_sensitive": "optional: boolean (default false)"
                    }
                }
            ]
        }]
    }))
}

/// `POST /filter/miro/inlet` — enrich a chat body with board data.
///
/// The body comes back unchanged when the last message names no board.
/// Command failures are rendered into the injected message rather than
/// failing the request.
pub async fn inlet(State(state): State<AppState>, Json(mut body): Json<Value>) -> Json<Value> {
    let Some(content) = last_message_content(&body) else {
        return Json(body);
    };
    let Some(command) = translate(&content) else {
        return Json(body);
    };

    info!(command = command.name(), board_id = command.board_id(), "filter: inlet");
    let text = match execute(&state.service, &command).await {
        Ok(output) => render(&output, state.config.render),
        Err(e) => {
            error!(command = command.name(), error = %e, "filter: inlet command failed");
            format!("Error: {e}")
        }
    };

    if let Some(messages) = body.get_mut("messages").and_then(Value::as_array_mut) {
        let last = messages.len().saturating_sub(1);
        messages.insert(last, json!({ "role": "system", "content": format!("{DATA_HEADER}\n{text}") }));
        if let Some(message) = messages.last_mut().and_then(Value::as_object_mut) {
            message.insert("content".into(), Value::String(format!("{content}{LOADED_MARKER}")));
        }
    }
    Json(body)
}

fn last_message_content(body: &Value) -> Option<String> {
    let last = body.get("messages")?.as_array()?.last()?;
    last.get("content")?.as_str().map(String::from)
}

#[cfg(test)]
#[path = "filter_test.rs"]
mod tests;
