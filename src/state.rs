//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. It
//! holds the board service, the live SSE session registry, and the parsed
//! server config. The board service itself is stateless per request.
//!
//! Sessions are keyed by a random id handed to the client in the first SSE
//! event. A `SessionGuard` owned by the event stream removes the entry when
//! the stream is dropped, so a closed connection never lingers in the map.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::mpsc;
use tracing::info;
use uuid::Uuid;

use crate::board::BoardService;
use crate::config::ServerConfig;

/// Outbound queue depth per SSE session.
const SESSION_QUEUE_CAPACITY: usize = 64;

// =============================================================================
// SESSION REGISTRY
// =============================================================================

/// Live SSE sessions: session id → sender for serialized JSON-RPC messages.
#[derive(Clone, Default)]
pub struct SessionRegistry {
    inner: Arc<Mutex<HashMap<Uuid, mpsc::Sender<String>>>>,
}

impl SessionRegistry {
    /// Register a new session and return its id, the receiving end of its
    /// queue, and a guard that unregisters it on drop.
    #[must_use]
    pub fn open(&self) -> (Uuid, mpsc::Receiver<String>, SessionGuard) {
        let id = Uuid::new_v4();
        let (tx, rx) = mpsc::channel(SESSION_QUEUE_CAPACITY);
        self.inner.lock().unwrap_or_else(PoisonError::into_inner).insert(id, tx);
        info!(session_id = %id, "sse: connected");
        (id, rx, SessionGuard { registry: self.clone(), id })
    }

    /// Sender for a live session.
    #[must_use]
    pub fn sender(&self, id: &Uuid) -> Option<mpsc::Sender<String>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner).get(id).cloned()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn close(&self, id: &Uuid) {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner).remove(id);
    }
}

/// Removes its session from the registry when dropped.
pub struct SessionGuard {
    registry: SessionRegistry,
    id: Uuid,
}

impl Drop for SessionGuard {
    fn drop(&mut self) {
        self.registry.close(&self.id);
        info!(session_id = %self.id, "sse: disconnected");
    }
}

// =============================================================================
// APP STATE
// =============================================================================

/// Clone is required by Axum; every field is cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub service: BoardService,
    pub sessions: SessionRegistry,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    #[must_use]
    pub fn new(service: BoardService, config: ServerConfig) -> Self {
        Self { service, sessions: SessionRegistry::default(), config: Arc::new(config) }
    }
}


#[cfg(test)]
#[path = "state_test.rs"]
mod tests;
