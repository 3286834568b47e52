//! Board-reader tool definitions advertised through `tools/list`.

use serde::Serialize;
use serde_json::{Value, json};

use crate::board::{BoardError, BoardQuery, PathQuery, SearchQuery};
use crate::command::BoardCommand;

pub const GET_REGION: &str = "get_miro_region";
pub const GET_CONNECTED_PATH: &str = "get_miro_connected_path";
pub const SEARCH_ITEMS: &str = "search_miro_items";

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tool {
    pub name: &'static str,
    pub description: &'static str,
    pub input_schema: Value,
}

/// The three read-only tools, in advertised order.
#[must_use]
pub fn board_tools() -> Vec<Tool> {
    vec![
        Tool {
            name: GET_REGION,
            description: "Get all items and connections from a MIRO board region",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "boardId": { "type": "string", "description": "MIRO board ID from URL" },
                    "bounds": {
                        "type": "object",
                        "properties": {
                            "left": { "type": "number" },
                            "right": { "type": "number" },
                            "top": { "type": "number" },
                            "bottom": { "type": "number" }
                        }
                    },
                    "includeTypes": { "type": "array", "items": { "type": "string" } }
                },
                "required": ["boardId"]
            }),
        },
        Tool {
            name: GET_CONNECTED_PATH,
            description: "Get items connected to a starting item",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "boardId": { "type": "string" },
                    "startItemId": { "type": "string" },
                    "maxDepth": { "type": "integer", "default": 5 }
                },
                "required": ["boardId", "startItemId"]
            }),
        },
        Tool {
            name: SEARCH_ITEMS,
            description: "Search for items by text content",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "boardId": { "type": "string" },
                    "searchText": { "type": "string" },
                    "caseSensitive": { "type": "boolean", "default": false }
                },
                "required": ["boardId", "searchText"]
            }),
        },
    ]
}

/// Map a tool call onto a board command. `None` for an unknown tool name.
#[must_use]
pub fn tool_command(name: &str, arguments: &Value) -> Option<Result<BoardCommand, BoardError>> {
    let command = match name {
        GET_REGION => arguments_as::<BoardQuery>(arguments).map(BoardCommand::FullBoard),
        GET_CONNECTED_PATH => arguments_as::<PathQuery>(arguments).map(BoardCommand::ConnectedPath),
        SEARCH_ITEMS => arguments_as::<SearchQuery>(arguments).map(BoardCommand::Search),
        _ => return None,
    };
    Some(command)
}

fn arguments_as<T: serde::de::DeserializeOwned>(arguments: &Value) -> Result<T, BoardError> {
    let arguments = if arguments.is_null() { json!({}) } else { arguments.clone() };
    serde_json::from_value(arguments).map_err(|e| BoardError::validation(format!("invalid arguments: {e}")))
}
