//! MCP dispatch — JSON-RPC methods for the board-reader tool server.
//!
//! DESIGN
//! ======
//! `handle_message` is transport-free: it takes a parsed request and
//! returns the response to deliver, or `None` for notifications. The SSE
//! routes decide whether that response goes inline or to a session queue.
//!
//! Board errors map on kind: validation becomes invalid params, everything
//! else an internal error, with the error code and kind kept in `data`.

pub mod tools;

use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{error, info};

use crate::board::{BoardError, BoardService, ErrorKind};
use crate::command::execute;
use crate::rpc::{Request, RequestId, Response, error_codes};

pub const PROTOCOL_VERSION: &str = "2024-11-05";
pub const SERVER_NAME: &str = "miro-board-reader";

#[derive(Debug, Default, Deserialize)]
struct ToolCallParams {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    arguments: Value,
}

/// Process one JSON-RPC message.
pub async fn handle_message(service: &BoardService, request: Request) -> Option<Response> {
    let method = request.method.clone().unwrap_or_default();

    if request.is_notification() {
        info!(%method, "mcp: notification");
        return None;
    }
    info!(%method, "mcp: dispatch");

    let id = request.id.clone();
    let response = match method.as_str() {
        "initialize" => Response::success(
            id,
            json!({
                "protocolVersion": PROTOCOL_VERSION,
                "capabilities": { "tools": {} },
                "serverInfo": { "name": SERVER_NAME, "version": env!("CARGO_PKG_VERSION") }
            }),
        ),
        "ping" => Response::success(id, json!({})),
        "tools/list" => Response::success(id, json!({ "tools": tools::board_tools() })),
        "tools/call" => call_tool(service, &request).await,
        _ => Response::error(id, error_codes::METHOD_NOT_FOUND, format!("Method not found: {method}")),
    };
    Some(response)
}

async fn call_tool(service: &BoardService, request: &Request) -> Response {
    let id = request.id.clone();
    let params: ToolCallParams = match request.params() {
        Value::Null => ToolCallParams::default(),
        params => match serde_json::from_value(params.clone()) {
            Ok(p) => p,
            Err(e) => return Response::error(id, error_codes::INVALID_PARAMS, format!("invalid tool call: {e}")),
        },
    };
    let name = params.name.unwrap_or_default();
    info!(tool = %name, "mcp: tool call");

    let Some(command) = tools::tool_command(&name, &params.arguments) else {
        return Response::error(id, error_codes::INVALID_PARAMS, format!("Unknown tool: {name}"));
    };

    let outcome = match command {
        Ok(command) => execute(service, &command).await,
        Err(e) => Err(e),
    };

    match outcome {
        Ok(output) => {
            let text = serde_json::to_string_pretty(&output).unwrap_or_default();
            Response::success(id, json!({ "content": [{ "type": "text", "text": text }] }))
        }
        Err(e) => {
            error!(tool = %name, error = %e, "mcp: tool failed");
            tool_error(id, &e)
        }
    }
}

fn tool_error(id: Option<RequestId>, err: &BoardError) -> Response {
    let code = match err.kind() {
        ErrorKind::Validation => error_codes::INVALID_PARAMS,
        ErrorKind::Configuration | ErrorKind::Upstream => error_codes::INTERNAL_ERROR,
    };
    Response::error_from(id, code, err, Some(json!({ "kind": err.kind() })))
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
