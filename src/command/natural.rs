//! Natural-language translator — best-effort mapping of chat text to a command.
//!
//! Rules run in a fixed order and the first one that matches wins:
//! board id (required), search, connected path, region, shapes, type
//! filter, then the full board as fallback.

use once_cell::sync::Lazy;
use regex::Regex;

use super::BoardCommand;
use crate::board::trace::DEFAULT_MAX_DEPTH;
use crate::board::{BoardQuery, Bounds, PathQuery, SearchQuery};

static BOARD_ID_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\[([a-zA-Z0-9_\-=]+)\]|\bboard[:\s]+([a-zA-Z0-9_\-=]+)|miro\.com/app/board/([a-zA-Z0-9_\-=]+)")
        .unwrap()
});
static SEARCH_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)(?:search|find|look\s+for)\s+(?:for\s+)?["']([^"']+)["']|(?:search|find)\s+(?:for\s+)?(\w+)"#)
        .unwrap()
});
static START_ITEM_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)(?:item|from|starting)[:\s]+([a-zA-Z0-9_\-]+)").unwrap());
static DEPTH_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)depth[:\s]+(\d+)").unwrap());
static BOUNDS_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)left[:\s]+([\d.-]+)[,\s]+right[:\s]+([\d.-]+)[,\s]+top[:\s]+([\d.-]+)[,\s]+bottom[:\s]+([\d.-]+)",
    )
    .unwrap()
});
static TYPES_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)(?:only|filter)[:\s]+([a-zA-Z_,\s]+)").unwrap());

const SEARCH_WORDS: &[&str] = &["search", "find", "look for"];
const PATH_WORDS: &[&str] = &["connection", "connected", "path", "trace"];

/// Translate a chat message into a command, or `None` when no board id
/// can be found.
#[must_use]
pub fn translate(message: &str) -> Option<BoardCommand> {
    let board_id = board_id(message)?;
    let lower = message.to_lowercase();
    let mentions = |words: &[&str]| words.iter().any(|w| lower.contains(w));

    if mentions(SEARCH_WORDS) {
        if let Some(search_text) = search_text(message) {
            return Some(BoardCommand::Search(SearchQuery { board_id, search_text, case_sensitive: false }));
        }
    }

    if mentions(PATH_WORDS) {
        if let Some(caps) = START_ITEM_RE.captures(message) {
            let max_depth = DEPTH_RE
                .captures(message)
                .and_then(|d| d[1].parse().ok())
                .unwrap_or(DEFAULT_MAX_DEPTH);
            return Some(BoardCommand::ConnectedPath(PathQuery {
                board_id,
                start_item_id: caps[1].to_string(),
                max_depth,
            }));
        }
    }

    if lower.contains("region") || lower.contains("bounds") {
        if let Some(bounds) = bounds(message) {
            return Some(full_board(board_id, Some(bounds), None));
        }
    }

    if lower.contains("shape") {
        return Some(full_board(board_id, None, Some(vec!["shape".into()])));
    }

    if lower.contains("only") || lower.contains("filter") {
        if let Some(types) = include_types(message) {
            return Some(full_board(board_id, None, Some(types)));
        }
    }

    Some(full_board(board_id, None, None))
}

fn full_board(board_id: String, bounds: Option<Bounds>, include_types: Option<Vec<String>>) -> BoardCommand {
    BoardCommand::FullBoard(BoardQuery { board_id, bounds, include_types })
}

fn board_id(message: &str) -> Option<String> {
    let caps = BOARD_ID_RE.captures(message)?;
    (1..=3).find_map(|i| caps.get(i)).map(|m| m.as_str().to_string())
}

fn search_text(message: &str) -> Option<String> {
    let caps = SEARCH_RE.captures(message)?;
    caps.get(1).or_else(|| caps.get(2)).map(|m| m.as_str().to_string())
}

fn bounds(message: &str) -> Option<Bounds> {
    let caps = BOUNDS_RE.captures(message)?;
    let n = |i: usize| caps[i].parse::<f64>().ok();
    Some(Bounds { left: n(1)?, right: n(2)?, top: n(3)?, bottom: n(4)? })
}

fn include_types(message: &str) -> Option<Vec<String>> {
    let caps = TYPES_RE.captures(message)?;
    let types: Vec<String> = caps[1]
        .split(',')
        .map(|t| {
            let t = t.trim();
            t.strip_suffix(" items").unwrap_or(t).trim().to_string()
        })
        .filter(|t| !t.is_empty())
        .collect();
    (!types.is_empty()).then_some(types)
}

#[cfg(test)]
#[path = "natural_test.rs"]
mod tests;
