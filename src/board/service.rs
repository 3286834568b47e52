//! Board service — the three read operations exposed to every adapter.
//!
//! DESIGN
//! ======
//! Each call fetches fresh upstream data, normalizes it, and derives the
//! answer. Nothing outlives the call: there is no cache and no shared board
//! state between requests.
//!
//! - `board_content`: items and connectors fetched concurrently, combined
//!   only after both succeed.
//! - `connected_path`: connectors first, then the sequential trace, then a
//!   second full item fetch to hydrate the visited ids.
//! - `search_items`: items only, no graph.
//!
//! Arguments are validated before any network call.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use tracing::info;

use super::error::BoardError;
use super::filter::{filter_items, related_connectors};
use super::graph::{Graph, build_graph};
use super::model::{Bounds, Connector, Item, normalize_connector, normalize_item};
use super::search::search;
use super::trace::{DEFAULT_MAX_DEPTH, TracePath, trace};
use crate::miro::BoardFetcher;

pub const FULL_BOARD: &str = "full board";

// =============================================================================
// REQUESTS
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardQuery {
    pub board_id: String,
    #[serde(default)]
    pub bounds: Option<Bounds>,
    #[serde(default)]
    pub include_types: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathQuery {
    pub board_id: String,
    pub start_item_id: String,
    #[serde(default = "default_max_depth")]
    pub max_depth: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchQuery {
    pub board_id: String,
    pub search_text: String,
    #[serde(default)]
    pub case_sensitive: bool,
}

fn default_max_depth() -> u32 {
    DEFAULT_MAX_DEPTH
}

// =============================================================================
// RESPONSES
// =============================================================================

/// The requested region, or the literal `"full board"` when none was given.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum BoundsEcho {
    Region(Bounds),
    FullBoard(&'static str),
}

impl From<Option<Bounds>> for BoundsEcho {
    fn from(bounds: Option<Bounds>) -> Self {
        bounds.map_or(Self::FullBoard(FULL_BOARD), Self::Region)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    pub board_id: String,
    pub item_count: usize,
    pub connector_count: usize,
    pub bounds: BoundsEcho,
    pub timestamp: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoardContent {
    pub metadata: Metadata,
    pub items: Vec<Item>,
    pub connections: Vec<Connector>,
    pub graph: Graph,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PathSummary {
    pub total_items: usize,
    pub total_connections: usize,
    pub max_depth_reached: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectedPath {
    pub start_item: String,
    pub traversal_depth: u32,
    pub items: Vec<Item>,
    pub paths: Vec<TracePath>,
    pub summary: PathSummary,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub query: String,
    pub case_sensitive: bool,
    pub result_count: usize,
    pub items: Vec<Item>,
}

// =============================================================================
// SERVICE
// =============================================================================

#[derive(Clone)]
pub struct BoardService {
    fetcher: BoardFetcher,
}

impl BoardService {
    #[must_use]
    pub fn new(fetcher: BoardFetcher) -> Self {
        Self { fetcher }
    }

    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.fetcher.is_configured()
    }

    async fn items(&self, board_id: &str) -> Result<Vec<Item>, BoardError> {
        let raw = self.fetcher.fetch_items(board_id).await?;
        Ok(raw.iter().map(normalize_item).collect())
    }

    async fn connectors(&self, board_id: &str) -> Result<Vec<Connector>, BoardError> {
        let raw = self.fetcher.fetch_connectors(board_id).await?;
        Ok(raw.iter().map(normalize_connector).collect())
    }

    /// Items, related connectors, and adjacency graph for a board region.
    ///
    /// # Errors
    ///
    /// Validation error for an empty board id; otherwise configuration or
    /// upstream errors from either fetch.
    pub async fn board_content(&self, query: &BoardQuery) -> Result<BoardContent, BoardError> {
        require("boardId", &query.board_id)?;
        let board_id = query.board_id.as_str();

        let (items, connectors) = tokio::try_join!(self.items(board_id), self.connectors(board_id))?;

        let items = filter_items(items, query.bounds.as_ref(), query.include_types.as_deref());
        let connections = {
            let ids: HashSet<&str> = items.iter().map(|i| i.id.as_str()).collect();
            related_connectors(connectors, &ids)
        };
        let graph = build_graph(&items, &connections);

        info!(%board_id, items = items.len(), connectors = connections.len(), "board: content built");

        Ok(BoardContent {
            metadata: Metadata {
                board_id: query.board_id.clone(),
                item_count: items.len(),
                connector_count: connections.len(),
                bounds: query.bounds.into(),
                timestamp: now_rfc3339(),
            },
            items,
            connections,
            graph,
        })
    }

    /// Items reachable from a start item within `max_depth` hops.
    ///
    /// # Errors
    ///
    /// Validation error for an empty board or start id; otherwise
    /// configuration or upstream errors.
    pub async fn connected_path(&self, query: &PathQuery) -> Result<ConnectedPath, BoardError> {
        require("boardId", &query.board_id)?;
        require("startItemId", &query.start_item_id)?;
        let board_id = query.board_id.as_str();

        let connectors = self.connectors(board_id).await?;
        let walk = trace(&connectors, &query.start_item_id, query.max_depth);

        let items: Vec<Item> = {
            let visited = walk.visited_set();
            self.items(board_id)
                .await?
                .into_iter()
                .filter(|item| visited.contains(item.id.as_str()))
                .collect()
        };

        info!(
            %board_id,
            start = %query.start_item_id,
            visited = walk.visited.len(),
            paths = walk.paths.len(),
            "board: path traced"
        );

        let summary = PathSummary {
            total_items: items.len(),
            total_connections: walk.paths.len(),
            max_depth_reached: walk.max_depth_reached(),
        };

        Ok(ConnectedPath {
            start_item: query.start_item_id.clone(),
            traversal_depth: query.max_depth,
            items,
            paths: walk.paths,
            summary,
        })
    }

    /// Items whose text contains the search string.
    ///
    /// # Errors
    ///
    /// Validation error for an empty board id or search text; otherwise
    /// configuration or upstream errors.
    pub async fn search_items(&self, query: &SearchQuery) -> Result<SearchResult, BoardError> {
        require("boardId", &query.board_id)?;
        require("searchText", &query.search_text)?;

        let items = search(self.items(&query.board_id).await?, &query.search_text, query.case_sensitive);

        info!(board_id = %query.board_id, results = items.len(), "board: search complete");

        Ok(SearchResult {
            query: query.search_text.clone(),
            case_sensitive: query.case_sensitive,
            result_count: items.len(),
            items,
        })
    }
}

fn require(field: &str, value: &str) -> Result<(), BoardError> {
    if value.is_empty() {
        return Err(BoardError::validation(format!("{field} is required")));
    }
    Ok(())
}

fn now_rfc3339() -> String {
    OffsetDateTime::now_utc().format(&Rfc3339).unwrap_or_default()
}

#[cfg(test)]
#[path = "service_test.rs"]
mod tests;
