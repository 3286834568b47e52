//! REST routes over the board service.

use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Json, Response};
use serde::Deserialize;
use serde_json::json;
use tracing::error;

use super::error_status;
use crate::board::trace::DEFAULT_MAX_DEPTH;
use crate::board::{
    BoardContent, BoardError, BoardQuery, Bounds, ConnectedPath, PathQuery, SearchQuery, SearchResult,
};
use crate::rpc::ErrorCode;
use crate::state::AppState;

/// Board error rendered as `{detail, code}` with the kind's status.
pub struct ApiError(BoardError);

impl From<BoardError> for ApiError {
    fn from(err: BoardError) -> Self {
        Self(err)
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self(BoardError::validation(rejection.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        error!(error = %self.0, "api: request failed");
        let body = json!({ "detail": self.0.to_string(), "code": self.0.error_code() });
        (error_status(&self.0), Json(body)).into_response()
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct BoardParams {
    pub left: Option<f64>,
    pub right: Option<f64>,
    pub top: Option<f64>,
    pub bottom: Option<f64>,
    /// Comma-separated item types.
    pub types: Option<String>,
}

impl BoardParams {
    /// Bounds apply only when all four edges are given.
    fn bounds(&self) -> Option<Bounds> {
        Some(Bounds { left: self.left?, right: self.right?, top: self.top?, bottom: self.bottom? })
    }

    fn include_types(&self) -> Option<Vec<String>> {
        let types: Vec<String> = self
            .types
            .as_deref()?
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(String::from)
            .collect();
        (!types.is_empty()).then_some(types)
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
    #[serde(default)]
    pub case_sensitive: bool,
}

#[derive(Debug, Default, Deserialize)]
pub struct ConnectionParams {
    pub depth: Option<u32>,
}

/// `GET /api/miro/board/{board_id}`
pub async fn board(
    State(state): State<AppState>,
    Path(board_id): Path<String>,
    params: Result<Query<BoardParams>, QueryRejection>,
) -> Result<Json<BoardContent>, ApiError> {
    let Query(params) = params?;
    let query = BoardQuery { board_id, bounds: params.bounds(), include_types: params.include_types() };
    Ok(Json(state.service.board_content(&query).await?))
}

/// `GET /api/miro/board/{board_id}/search`
pub async fn search(
    State(state): State<AppState>,
    Path(board_id): Path<String>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> Result<Json<SearchResult>, ApiError> {
    let Query(params) = params?;
    let query = SearchQuery { board_id, search_text: params.q, case_sensitive: params.case_sensitive };
    Ok(Json(state.service.search_items(&query).await?))
}

/// `GET /api/miro/board/{board_id}/connections/{item_id}`
pub async fn connections(
    State(state): State<AppState>,
    Path((board_id, item_id)): Path<(String, String)>,
    params: Result<Query<ConnectionParams>, QueryRejection>,
) -> Result<Json<ConnectedPath>, ApiError> {
    let Query(params) = params?;
    let query =
        PathQuery { board_id, start_item_id: item_id, max_depth: params.depth.unwrap_or(DEFAULT_MAX_DEPTH) };
    Ok(Json(state.service.connected_path(&query).await?))
}

#[cfg(test)]
#[path = "api_test.rs"]
mod tests;
