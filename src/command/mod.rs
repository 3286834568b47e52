//! Command — the typed request contract every adapter translates into.
//!
//! DESIGN
//! ======
//! MCP tool calls, analyze requests, REST queries, and the natural-language
//! translator all produce a `BoardCommand`. Only `execute` talks to the
//! board service, so protocol quirks never reach the core.
//!
//! The analyze interface uses snake_case params
//! (`{"board_id", "command", "params": {...}}`); parsing lives here so the
//! route handler stays protocol plumbing.

pub mod natural;
pub mod render;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::board::trace::DEFAULT_MAX_DEPTH;
use crate::board::{
    BoardContent, BoardError, BoardQuery, BoardService, Bounds, ConnectedPath, PathQuery, SearchQuery, SearchResult,
};

pub const DEFAULT_COMMAND: &str = "full_board";

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum BoardCommand {
    FullBoard(BoardQuery),
    ConnectedPath(PathQuery),
    Search(SearchQuery),
}

impl BoardCommand {
    /// Wire name used by the analyze interface.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::FullBoard(_) => "full_board",
            Self::ConnectedPath(_) => "connected_path",
            Self::Search(_) => "search",
        }
    }

    #[must_use]
    pub fn board_id(&self) -> &str {
        match self {
            Self::FullBoard(q) => &q.board_id,
            Self::ConnectedPath(q) => &q.board_id,
            Self::Search(q) => &q.board_id,
        }
    }
}

/// Result of a command. Serializes as the bare core output.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CommandOutput {
    Board(BoardContent),
    Path(ConnectedPath),
    Search(SearchResult),
}

/// Run a command against the board service.
///
/// # Errors
///
/// Propagates the service's [`BoardError`] unchanged.
pub async fn execute(service: &BoardService, command: &BoardCommand) -> Result<CommandOutput, BoardError> {
    match command {
        BoardCommand::FullBoard(q) => service.board_content(q).await.map(CommandOutput::Board),
        BoardCommand::ConnectedPath(q) => service.connected_path(q).await.map(CommandOutput::Path),
        BoardCommand::Search(q) => service.search_items(q).await.map(CommandOutput::Search),
    }
}

// =============================================================================
// ANALYZE REQUEST
// =============================================================================

/// Body of `POST /filter/miro/analyze`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub board_id: Option<String>,
    #[serde(default)]
    pub command: Option<String>,
    #[serde(default)]
    pub params: Value,
    /// `"text"` adds a rendered text view to the response.
    #[serde(default)]
    pub format: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct FullBoardParams {
    #[serde(default)]
    bounds: Option<Bounds>,
    #[serde(default)]
    include_types: Option<Vec<String>>,
}

#[derive(Debug, Default, Deserialize)]
struct PathParams {
    #[serde(default)]
    start_item_id: Option<String>,
    #[serde(default)]
    max_depth: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
struct SearchParams {
    #[serde(default)]
    search_text: Option<String>,
    #[serde(default)]
    case_sensitive: Option<bool>,
}

impl AnalyzeRequest {
    #[must_use]
    pub fn wants_text(&self) -> bool {
        self.format.as_deref() == Some("text")
    }

    /// Translate into a typed command.
    ///
    /// # Errors
    ///
    /// Validation error for a missing board id, an unknown command, a
    /// missing required param, or params of the wrong shape.
    pub fn to_command(&self) -> Result<BoardCommand, BoardError> {
        let board_id = self
            .board_id
            .clone()
            .filter(|id| !id.is_empty())
            .ok_or_else(|| BoardError::validation("board_id is required"))?;

        match self.command.as_deref().unwrap_or(DEFAULT_COMMAND) {
            "full_board" => {
                let p: FullBoardParams = parse_params(&self.params)?;
                Ok(BoardCommand::FullBoard(BoardQuery { board_id, bounds: p.bounds, include_types: p.include_types }))
            }
            "connected_path" => {
                let p: PathParams = parse_params(&self.params)?;
                let start_item_id = p
                    .start_item_id
                    .filter(|id| !id.is_empty())
                    .ok_or_else(|| BoardError::validation("start_item_id required for connected_path"))?;
                Ok(BoardCommand::ConnectedPath(PathQuery {
                    board_id,
                    start_item_id,
                    max_depth: p.max_depth.unwrap_or(DEFAULT_MAX_DEPTH),
                }))
            }
            "search" => {
                let p: SearchParams = parse_params(&self.params)?;
                let search_text = p
                    .search_text
                    .filter(|text| !text.is_empty())
                    .ok_or_else(|| BoardError::validation("search_text required for search"))?;
                Ok(BoardCommand::Search(SearchQuery {
                    board_id,
                    search_text,
                    case_sensitive: p.case_sensitive.unwrap_or(false),
                }))
            }
            other => Err(BoardError::validation(format!("Unknown command: {other}"))),
        }
    }
}

fn parse_params<T: serde::de::DeserializeOwned + Default>(params: &Value) -> Result<T, BoardError> {
    if params.is_null() {
        return Ok(T::default());
    }
    serde_json::from_value(params.clone()).map_err(|e| BoardError::validation(format!("invalid params: {e}")))
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
