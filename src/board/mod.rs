//! Board — acquisition and graph derivation over upstream board content.
//!
//! ARCHITECTURE
//! ============
//! Data flows one way per request:
//!
//! ```text
//! fetch (miro) → normalize (model) → filter → graph      (board content)
//!                                   └──────→ trace      (connected path)
//!                                   └──────→ search     (text search)
//! ```
//!
//! Every module below `service` is a pure function over owned vectors, so
//! the algorithms are tested without a network.

pub mod error;
pub mod filter;
pub mod graph;
pub mod model;
pub mod search;
pub mod service;
pub mod trace;

pub use error::{BoardError, ErrorKind};
pub use model::{Bounds, Item};
pub use service::{BoardContent, BoardQuery, BoardService, ConnectedPath, PathQuery, SearchQuery, SearchResult};
