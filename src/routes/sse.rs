//! MCP transport — SSE stream plus JSON-RPC POST.
//!
//! DESIGN
//! ======
//! `GET` opens a session: the first event names it, later events carry
//! responses queued for it, and idle periods get `: keepalive` comments.
//!
//! `POST` carries one JSON-RPC message. Without `?sessionId` the response
//! comes back inline as a one-event stream. With a live session id the
//! call returns 202 at once and the response is queued on that session;
//! the work is dropped if the session closes first.

use std::convert::Infallible;
use std::time::Duration;

use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::response::{IntoResponse, Response};
use futures::Stream;
use serde::Deserialize;
use serde_json::json;
use tokio::sync::mpsc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::board::BoardService;
use crate::mcp;
use crate::rpc::{self, Request, error_codes};
use crate::state::AppState;

const KEEPALIVE_TEXT: &str = "keepalive";

#[derive(Debug, Default, Deserialize)]
pub struct SessionParams {
    #[serde(rename = "sessionId")]
    pub session_id: Option<String>,
}

/// `GET /sse` — open a session stream.
pub async fn connect(State(state): State<AppState>) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let (session_id, mut rx, guard) = state.sessions.open();
    let keepalive = Duration::from_secs(state.config.sse_keepalive_secs);

    let stream = async_stream::stream! {
        let _guard = guard;
        yield Ok(Event::default().data(json!({ "type": "connection", "id": session_id }).to_string()));
        while let Some(message) = rx.recv().await {
            yield Ok(Event::default().data(message));
        }
    };

    Sse::new(stream).keep_alive(KeepAlive::new().interval(keepalive).text(KEEPALIVE_TEXT))
}

/// `POST /sse` — handle one JSON-RPC message.
pub async fn message(State(state): State<AppState>, Query(params): Query<SessionParams>, body: Bytes) -> Response {
    let session = match params.session_id.as_deref() {
        None => None,
        Some(raw) => match Uuid::parse_str(raw).ok().and_then(|id| state.sessions.sender(&id)) {
            Some(sender) => Some(sender),
            None => {
                warn!(session_id = %raw, "sse: unknown session");
                return StatusCode::NOT_FOUND.into_response();
            }
        },
    };

    let request = match parse_request(&body) {
        Ok(request) => request,
        Err(response) => return reply(session, response).await,
    };

    match session {
        Some(sender) => {
            tokio::spawn(deliver(state.service.clone(), request, sender));
            StatusCode::ACCEPTED.into_response()
        }
        None => inline(mcp::handle_message(&state.service, request).await),
    }
}

fn parse_request(body: &[u8]) -> Result<Request, rpc::Response> {
    if body.is_empty() {
        return Ok(Request::default());
    }
    serde_json::from_slice(body).map_err(|e| {
        warn!(error = %e, "mcp: parse error");
        rpc::Response::error(None, error_codes::PARSE_ERROR, format!("Parse error: {e}"))
    })
}

/// Send an already-built response the same way a dispatched one would go.
async fn reply(session: Option<mpsc::Sender<String>>, response: rpc::Response) -> Response {
    match session {
        Some(sender) => {
            if let Ok(text) = serde_json::to_string(&response) {
                let _ = sender.send(text).await;
            }
            StatusCode::ACCEPTED.into_response()
        }
        None => inline(Some(response)),
    }
}

/// Dispatch and queue the response unless the session closes first.
async fn deliver(service: BoardService, request: Request, sender: mpsc::Sender<String>) {
    tokio::select! {
        biased;
        () = sender.closed() => {
            info!("sse: session closed, dropping in-flight call");
        }
        response = mcp::handle_message(&service, request) => {
            let Some(response) = response else { return };
            match serde_json::to_string(&response) {
                Ok(text) => {
                    if sender.send(text).await.is_err() {
                        info!("sse: session closed before delivery");
                    }
                }
                Err(e) => warn!(error = %e, "sse: response serialization failed"),
            }
        }
    }
}

/// One-event stream carrying the response, or an empty stream for none.
fn inline(response: Option<rpc::Response>) -> Response {
    let events: Vec<Result<Event, Infallible>> = response
        .and_then(|r| serde_json::to_string(&r).ok())
        .map(|text| Ok(Event::default().data(text)))
        .into_iter()
        .collect();
    Sse::new(futures::stream::iter(events)).into_response()
}

#[cfg(test)]
#[path = "sse_test.rs"]
mod tests;
