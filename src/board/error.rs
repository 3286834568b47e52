//! Board errors — one enum, three kinds.
//!
//! Every variant belongs to exactly one `ErrorKind`. Adapters map on the
//! kind (HTTP status, JSON-RPC code) and never reinterpret it.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorKind {
    Configuration,
    Upstream,
    Validation,
}

#[derive(Debug, thiserror::Error)]
pub enum BoardError {
    /// Missing credential or similar fatal setup problem.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A required argument is missing or malformed.
    #[error("validation error: {0}")]
    Validation(String),

    /// The upstream API answered with a non-success status.
    #[error("upstream returned status {status}")]
    UpstreamStatus { status: u16, body: String },

    /// The request never produced a response (connect, TLS, body read).
    #[error("upstream request failed: {0}")]
    UpstreamRequest(String),

    /// The per-call timeout elapsed.
    #[error("upstream request timed out")]
    UpstreamTimeout,

    /// The upstream body was not the expected page shape.
    #[error("upstream response parse failed: {0}")]
    UpstreamParse(String),
}

impl BoardError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Configuration(_) => ErrorKind::Configuration,
            Self::Validation(_) => ErrorKind::Validation,
            Self::UpstreamStatus { .. } | Self::UpstreamRequest(_) | Self::UpstreamTimeout | Self::UpstreamParse(_) => {
                ErrorKind::Upstream
            }
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub(crate) fn from_reqwest(err: &reqwest::Error) -> Self {
        if err.is_timeout() { Self::UpstreamTimeout } else { Self::UpstreamRequest(err.to_string()) }
    }
}

impl crate::rpc::ErrorCode for BoardError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Configuration(_) => "E_CONFIGURATION",
            Self::Validation(_) => "E_VALIDATION",
            Self::UpstreamStatus { .. } => "E_UPSTREAM_STATUS",
            Self::UpstreamRequest(_) => "E_UPSTREAM_REQUEST",
            Self::UpstreamTimeout => "E_UPSTREAM_TIMEOUT",
            Self::UpstreamParse(_) => "E_UPSTREAM_PARSE",
        }
    }

    fn retryable(&self) -> bool {
        matches!(
            self,
            Self::UpstreamRequest(_) | Self::UpstreamTimeout | Self::UpstreamStatus { status: 429 | 500..=599, .. }
        )
    }
}
